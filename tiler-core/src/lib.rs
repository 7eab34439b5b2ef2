//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

#[macro_use]
pub mod raster;
pub mod core;
pub mod datasource;
pub mod error;
pub mod orchestrator;
pub mod resample;
pub mod sink;

#[cfg(test)]
mod orchestrator_test;
#[cfg(test)]
mod resample_test;

pub use crate::error::TilerError;
