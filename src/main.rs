//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, AppSettings, ArgMatches, SubCommand};
use dotenv::dotenv;
use env_logger::Builder;
use log::Record;
use std::env;
use std::io::Write;
use std::process;
use tiler_service as service;
use time;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap_or_default(),
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log = match (args.value_of("loglevel"), env::var("RUST_LOG")) {
        (None, Ok(rust_log_env)) => rust_log_env,
        (loglevel, _) => match loglevel.unwrap_or("info") {
            "debug" => "debug,tokio=info".to_string(),
            loglevel => loglevel.to_string(),
        },
    };
    builder.parse_filters(&rust_log);

    builder.init();
}

fn parse_arg<T: std::str::FromStr>(
    args: &ArgMatches<'_>,
    name: &str,
    typename: &str,
) -> Result<Option<T>, String> {
    args.value_of(name)
        .map(|s| {
            s.parse::<T>()
                .map_err(|_| format!("Error parsing '{}' as {} value", name, typename))
        })
        .transpose()
}

/// Generate tiles and return the number of failed tiles
fn generate(args: &ArgMatches<'_>) -> Result<usize, String> {
    let config = service::config_from_args(args)?;
    let service = service::service_from_args(&config)?;
    let nodes = parse_arg::<u8>(args, "nodes", "integer")?;
    let nodeno = parse_arg::<u8>(args, "nodeno", "integer")?;
    let progress = parse_arg::<bool>(args, "progress", "boolean")?.unwrap_or(true);
    let overwrite = parse_arg::<bool>(args, "overwrite", "boolean")?.unwrap_or(false);
    let summary = service
        .generate(nodes, nodeno, progress, overwrite)
        .map_err(|e| e.to_string())?;
    info!(
        "{} tiles: {} written, {} skipped, {} failed",
        summary.total,
        summary.written,
        summary.skipped,
        summary.failed.len()
    );
    print!("{}", summary.stats);
    Ok(summary.failed.len())
}

fn info(args: &ArgMatches<'_>) -> Result<(), String> {
    let config = service::config_from_args(args)?;
    let service = service::service_from_args(&config)?;
    let info = service.info().map_err(|e| e.to_string())?;
    print!("{}", info);
    Ok(())
}

#[cfg(feature = "with-gdal")]
extern crate tiler_gdal;

fn version_info() -> String {
    #[cfg(feature = "with-gdal")]
    let version = format!(
        "{} (GDAL version {})",
        crate_version!(),
        tiler_gdal::gdal_version()
    );
    #[cfg(not(feature = "with-gdal"))]
    let version = crate_version!().to_string();
    version
}

const SOURCE_ARGS: &str = "--source=[FILE] 'Source raster (ESRI ASCII grid or GDAL dataset)'
                           --format=[auto|ascii|gdal] 'Source format'
                           --nodata=[VALUE] 'Override source nodata value'
                           --scheme=[raster|slippy|meter] 'Tile scheme'
                           --zoom=[LEVEL] 'Zoom level of slippy map tiles'
                           --pixelsize=[METERS] 'Pixel size of meter aligned tiles'
                           --tilesize=[PIXELS] 'Tile width and height'
                           --resampling=[nearest|bilinear] 'Resampling method'
                           --output=[DIR] 'Tile output directory'
                           --driver=[NAME] 'Write tiles with GDAL driver (e.g. HF2)'
                           --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'";

fn main() {
    dotenv().ok();
    let version_info = version_info();
    let mut app = App::new("hfz_tiler")
        .version(&version_info as &str)
        .author("Pirmin Kalberer <pka@sourcepole.ch>")
        .about("Cut georeferenced raster grids into tiles")
        .subcommand(
            SubCommand::with_name("generate")
                .setting(AppSettings::AllowLeadingHyphen)
                .args_from_usage(SOURCE_ARGS)
                .args_from_usage(
                    "-c, --config=[FILE] 'Load from custom config file'
                     --nodes=[NUM] 'Number of generator nodes'
                     --nodeno=[NUM] 'Number of this nodes (0 <= n < nodes)'
                     --progress=[true|false] 'Show progress bar'
                     --overwrite=[false|true] 'Overwrite previously generated tiles'",
                )
                .about("Generate tiles"),
        )
        .subcommand(
            SubCommand::with_name("genconfig")
                .setting(AppSettings::AllowLeadingHyphen)
                .args_from_usage(SOURCE_ARGS)
                .about("Generate configuration template"),
        )
        .subcommand(
            SubCommand::with_name("info")
                .setting(AppSettings::AllowLeadingHyphen)
                .args_from_usage(SOURCE_ARGS)
                .args_from_usage("-c, --config=[FILE] 'Load from custom config file'")
                .about("Show source grid and tile limits"),
        );

    match app.get_matches_from_safe_borrow(env::args()) {
        Err(e) => {
            println!("{}", e);
        }
        Ok(matches) => {
            let result = match matches.subcommand() {
                ("generate", Some(sub_m)) => {
                    init_logger(sub_m);
                    match generate(sub_m) {
                        Ok(0) => Ok(()),
                        Ok(failed) => Err(format!("{} tiles failed", failed)),
                        Err(e) => Err(e),
                    }
                }
                ("genconfig", Some(sub_m)) => {
                    init_logger(sub_m);
                    service::gen_config(sub_m).map(|config| println!("{}", config))
                }
                ("info", Some(sub_m)) => {
                    init_logger(sub_m);
                    info(sub_m)
                }
                _ => {
                    let _ = app.print_help();
                    println!("");
                    Ok(())
                }
            };
            if let Err(e) = result {
                error!("{}", e);
                process::exit(1);
            }
        }
    }
}
