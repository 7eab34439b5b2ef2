//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::raster::NumericKind;
use std::io;
use thiserror::Error;
use tile_grid::GridError;

#[derive(Error, Debug)]
pub enum TilerError {
    /// Rotated or skewed grids, invalid pixel or tile sizes
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("unsupported data type {0}")]
    UnsupportedDataType(String),
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("sample type mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: NumericKind,
        found: NumericKind,
    },
    #[error("buffer of {len} samples does not match {width} x {height}")]
    BufferSize {
        len: usize,
        width: usize,
        height: usize,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("error on tile {x}/{y}: {source}")]
    TileWrite {
        x: u32,
        y: u32,
        #[source]
        source: Box<TilerError>,
    },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("GDAL error: {0}")]
    Gdal(String),
    /// Tile task panicked or was aborted
    #[error("tile task failed: {0}")]
    Task(String),
    #[error("tile generation cancelled")]
    Cancelled,
}

impl TilerError {
    /// Attach tile address to a render or sink error
    pub fn at_tile(self, x: u32, y: u32) -> TilerError {
        TilerError::TileWrite {
            x,
            y,
            source: Box::new(self),
        }
    }
}
