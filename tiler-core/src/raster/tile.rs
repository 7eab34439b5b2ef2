//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::raster::PixelBuffer;
use tile_grid::{AffineTransform, Extent, TileAddress};

/// Resampled output tile
#[derive(Clone, Debug)]
pub struct Tile {
    pub address: TileAddress,
    pub extent: Extent,
    pub transform: AffineTransform,
    pub buffer: PixelBuffer,
}

impl Tile {
    /// True if no sample carries a value
    pub fn is_empty(&self) -> bool {
        self.buffer.valid_count() == 0
    }
}
