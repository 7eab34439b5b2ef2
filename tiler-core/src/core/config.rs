//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::resample::Resampling;
use regex::Regex;
use serde::Deserialize;
use std;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use tera::{Context, Tera};
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, String>;
    /// Generate configuration template
    fn gen_config() -> String;
    /// Generate configuration template with runtime information
    fn gen_runtime_config(&self) -> String {
        Self::gen_config()
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    pub source: SourceCfg,
    pub tiling: TilingCfg,
    pub sink: Option<SinkCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SourceCfg {
    pub path: String,
    /// auto | ascii | gdal
    #[serde(default = "default_format")]
    pub format: String,
    /// Overrides the nodata value declared by the source
    pub nodata: Option<f64>,
    /// Sample type of ASCII grids
    pub kind: Option<String>,
}

pub fn default_format() -> String {
    "auto".to_string()
}

#[derive(Deserialize, Clone, Debug)]
pub struct TilingCfg {
    /// Width and height of a tile in pixels
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
    #[serde(default)]
    pub resampling: Resampling,
    /// Do not write tiles without any valid sample
    #[serde(default)]
    pub skip_empty: bool,
    pub scheme: SchemeCfg,
}

pub fn default_tile_size() -> u32 {
    256
}

#[derive(Deserialize, Clone, Debug)]
pub struct SchemeCfg {
    /// raster | slippy | meter
    #[serde(rename = "type")]
    pub scheme_type: String,
    /// Zoom level of slippy map tiles
    pub zoom: Option<u8>,
    /// Ground sampling distance of meter aligned tiles
    pub pixel_size_m: Option<f64>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SinkCfg {
    pub file: Option<FileSinkCfg>,
    pub gdal: Option<GdalSinkCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct FileSinkCfg {
    pub base: String,
    #[serde(default)]
    pub compress: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GdalSinkCfg {
    pub base: String,
    /// GDAL driver short name (Default: HF2)
    pub driver: Option<String>,
    /// File extension (Default: hfz)
    pub extension: Option<String>,
    /// Driver creation options
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

pub const DEFAULT_CONFIG: &'static str = r#"
[source]
path = "dem.asc"

[tiling]
tile_size = 256
resampling = "bilinear"

[tiling.scheme]
type = "meter"
pixel_size_m = 10.0

[sink.file]
base = "tileset"
"#;

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(format!("Error while reading config: [{}]", err));
    };

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T, String> {
    // Check for old ${var} expressions
    let re = Regex::new(r"\$\{([[:alnum:]_]+)\}").map_err(|e| e.to_string())?;
    if re.is_match(&config_toml) {
        return Err(
            "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`".to_string(),
        );
    }

    // Parse template
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_toml)
        .map_err(|e| format!("Template error: {}", e))?;
    let mut context = Context::new();
    let env: HashMap<String, String> = env::vars().collect();
    context.insert("env", &env);
    let toml = tera.render(path, &context).map_err(|e| match e.source() {
        Some(source) => format!("Template error: {}", source),
        None => format!("Template error: {}", e),
    })?;

    toml.parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| format!("{} - {}", path, err))
}
