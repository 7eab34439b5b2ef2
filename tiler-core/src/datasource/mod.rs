//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod ascii;
pub mod datasource;

#[cfg(test)]
mod ascii_test;

pub use self::ascii::AsciiGridSource;
pub use self::datasource::{DummySource, RasterSource};
