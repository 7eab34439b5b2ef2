//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::SourceCfg;
use crate::core::Config;
use crate::error::TilerError;
use crate::raster::SourceGrid;
use std::path::Path;

pub trait RasterSource {
    fn info(&self) -> String;
    /// Decode a single band raster file
    fn open(&self, path: &Path) -> Result<SourceGrid, TilerError>;
}

/// Placeholder for source formats not compiled in
#[derive(Clone)]
pub struct DummySource;

impl RasterSource for DummySource {
    fn info(&self) -> String {
        "Unsupported source".to_string()
    }
    fn open(&self, path: &Path) -> Result<SourceGrid, TilerError> {
        Err(TilerError::UnsupportedFormat(format!(
            "{}: GDAL support not available",
            path.display()
        )))
    }
}

impl<'a> Config<'a, SourceCfg> for DummySource {
    fn from_config(_source_cfg: &SourceCfg) -> Result<Self, String> {
        Ok(DummySource)
    }
    fn gen_config() -> String {
        "".to_string()
    }
}
