//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;

#[cfg(feature = "with-gdal")]
extern crate tiler_gdal;

pub mod runtime_config;
pub mod sinks;
pub mod sources;
pub mod tiling_service;

pub use crate::runtime_config::{config_from_args, gen_config, service_from_args};
pub use crate::tiling_service::TilingService;
