//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::tiling_service::TilingService;
use clap::ArgMatches;
use std::str::FromStr;
use tiler_core::core::config::{
    ApplicationCfg, FileSinkCfg, GdalSinkCfg, SinkCfg, DEFAULT_CONFIG,
};
use tiler_core::core::{parse_config, read_config, Config};

/// Arguments overriding a configuration file
const CONFIG_ARGS: [&str; 10] = [
    "source",
    "format",
    "scheme",
    "zoom",
    "pixelsize",
    "tilesize",
    "resampling",
    "output",
    "driver",
    "nodata",
];

fn parse_arg<T: FromStr>(args: &ArgMatches, name: &str) -> Result<Option<T>, String> {
    match args.value_of(name) {
        Some(s) => s
            .parse::<T>()
            .map(Some)
            .map_err(|_| format!("Error parsing '{}' value '{}'", name, s)),
        None => Ok(None),
    }
}

/// Configuration from `--config` file or from command line arguments
pub fn config_from_args(args: &ArgMatches) -> Result<ApplicationCfg, String> {
    if let Some(cfgpath) = args.value_of("config") {
        info!("Reading configuration from '{}'", cfgpath);
        for argname in CONFIG_ARGS.iter() {
            if args.value_of(argname).is_some() {
                warn!("Ignoring argument `{}`", argname);
            }
        }
        return read_config(cfgpath);
    }
    let source = args
        .value_of("source")
        .ok_or("Either 'config' or 'source' is required")?;
    let mut config: ApplicationCfg = parse_config(DEFAULT_CONFIG.to_string(), "")?;
    config.source.path = source.to_string();
    if let Some(format) = args.value_of("format") {
        config.source.format = format.to_string();
    }
    config.source.nodata = parse_arg(args, "nodata")?;
    if let Some(scheme) = args.value_of("scheme") {
        config.tiling.scheme.scheme_type = scheme.to_string();
    }
    config.tiling.scheme.zoom = parse_arg(args, "zoom")?;
    if let Some(pixel_size) = parse_arg(args, "pixelsize")? {
        config.tiling.scheme.pixel_size_m = Some(pixel_size);
    }
    if let Some(tile_size) = parse_arg(args, "tilesize")? {
        config.tiling.tile_size = tile_size;
    }
    if let Some(resampling) = args.value_of("resampling") {
        config.tiling.resampling = resampling.parse().map_err(|e| format!("{}", e))?;
    }
    let base = args.value_of("output").unwrap_or("tileset").to_string();
    config.sink = Some(match args.value_of("driver") {
        Some(driver) => SinkCfg {
            file: None,
            gdal: Some(GdalSinkCfg {
                base,
                driver: Some(driver.to_string()),
                extension: None,
                options: Default::default(),
            }),
        },
        None => SinkCfg {
            file: Some(FileSinkCfg {
                base,
                compress: false,
            }),
            gdal: None,
        },
    });
    Ok(config)
}

pub fn service_from_args(config: &ApplicationCfg) -> Result<TilingService, String> {
    TilingService::from_config(config)
}

/// Configuration template, filled in from arguments if a source is given
pub fn gen_config(args: &ArgMatches) -> Result<String, String> {
    if args.value_of("source").is_some() {
        let service = service_from_args(&config_from_args(args)?)?;
        Ok(service.gen_runtime_config())
    } else {
        Ok(TilingService::gen_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::App;
    use tiler_core::resample::Resampling;

    fn matches(argv: &[&str]) -> ArgMatches<'static> {
        App::new("test")
            .args_from_usage(
                "-c, --config=[FILE] 'Config file'
                 --source=[FILE] 'Source raster'
                 --scheme=[raster|slippy|meter] 'Tile scheme'
                 --zoom=[LEVEL] 'Zoom level'
                 --pixelsize=[METERS] 'Pixel size'
                 --tilesize=[PIXELS] 'Tile size'
                 --resampling=[nearest|bilinear] 'Resampling'
                 --nodata=[VALUE] 'Nodata'
                 --output=[DIR] 'Output'
                 --driver=[NAME] 'Driver'",
            )
            .get_matches_from(argv.to_vec())
    }

    #[test]
    fn test_gen_config() {
        let toml = gen_config(&ArgMatches::new()).unwrap();
        assert!(toml.starts_with("# hfz-tiler configuration"));
        let config: ApplicationCfg = parse_config(toml, "").unwrap();
        assert_eq!(config.source.path, "dem.asc");
        assert_eq!(config.tiling.tile_size, 256);
        assert_eq!(config.sink.unwrap().file.unwrap().base, "tileset");
    }

    #[test]
    fn test_config_from_args() {
        let args = matches(&[
            "test",
            "--source",
            "dem.asc",
            "--scheme",
            "slippy",
            "--zoom",
            "12",
            "--tilesize",
            "128",
            "--resampling",
            "nearest",
            "--output",
            "/tmp/tiles",
        ]);
        let config = config_from_args(&args).unwrap();
        assert_eq!(config.tiling.scheme.scheme_type, "slippy");
        assert_eq!(config.tiling.scheme.zoom, Some(12));
        assert_eq!(config.tiling.tile_size, 128);
        assert_eq!(config.tiling.resampling, Resampling::Nearest);
        assert_eq!(config.sink.unwrap().file.unwrap().base, "/tmp/tiles");

        let toml = gen_config(&args).unwrap();
        let config: ApplicationCfg = parse_config(toml, "").unwrap();
        assert_eq!(config.source.path, "dem.asc");
        assert_eq!(config.source.format, "auto");
        assert_eq!(config.tiling.scheme.zoom, Some(12));
    }

    #[test]
    fn test_invalid_args() {
        assert_eq!(
            config_from_args(&matches(&["test"])).err(),
            Some("Either 'config' or 'source' is required".to_string())
        );
        let args = matches(&["test", "--source", "dem.asc", "--zoom", "x"]);
        assert_eq!(
            config_from_args(&args).err(),
            Some("Error parsing 'zoom' value 'x'".to_string())
        );
    }
}
