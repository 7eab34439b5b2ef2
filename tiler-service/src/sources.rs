//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use std::path::Path;
use tiler_core::core::config::SourceCfg;
use tiler_core::core::Config;
#[cfg(not(feature = "with-gdal"))]
use tiler_core::datasource::DummySource as GdalRasterSource;
use tiler_core::datasource::{AsciiGridSource, RasterSource};
use tiler_core::raster::SourceGrid;
use tiler_core::TilerError;
#[cfg(feature = "with-gdal")]
use tiler_gdal::GdalRasterSource;

#[derive(Clone)]
pub enum Source {
    Ascii(AsciiGridSource),
    Gdal(GdalRasterSource),
}

impl RasterSource for Source {
    fn info(&self) -> String {
        match self {
            &Source::Ascii(ref src) => src.info(),
            &Source::Gdal(ref src) => src.info(),
        }
    }
    fn open(&self, path: &Path) -> Result<SourceGrid, TilerError> {
        match self {
            &Source::Ascii(ref src) => src.open(path),
            &Source::Gdal(ref src) => src.open(path),
        }
    }
}

/// ESRI ASCII grid file extension
fn is_ascii_grid(path: &str) -> bool {
    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some(ext) => ext.eq_ignore_ascii_case("asc"),
        None => false,
    }
}

impl<'a> Config<'a, SourceCfg> for Source {
    fn from_config(source_cfg: &SourceCfg) -> Result<Self, String> {
        match source_cfg.format.to_lowercase().as_str() {
            "ascii" => AsciiGridSource::from_config(source_cfg).map(Source::Ascii),
            "gdal" => GdalRasterSource::from_config(source_cfg).map(Source::Gdal),
            "auto" if is_ascii_grid(&source_cfg.path) => {
                AsciiGridSource::from_config(source_cfg).map(Source::Ascii)
            }
            "auto" => GdalRasterSource::from_config(source_cfg).map(Source::Gdal),
            other => Err(format!("Unsupported source format '{}'", other)),
        }
    }
    fn gen_config() -> String {
        AsciiGridSource::gen_config()
    }
}
