//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;

mod gdal_sink;
mod gdal_source;


pub use crate::gdal_sink::GdalTileSink;
pub use crate::gdal_source::GdalRasterSource;

/// GDAL release name, e.g. "3.4.1"
pub fn gdal_version() -> String {
    gdal::version::version_info("RELEASE_NAME")
}
