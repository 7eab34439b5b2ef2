//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Local tile matrix with a fixed ground sampling distance

use crate::grid::{cell_count, cell_span, Extent, TileGrid, TileLimits};
use crate::transform::{AffineTransform, GridError};

/// Zoom-free partition anchored at the lower left corner of a parent extent.
///
/// Tile rows count upwards from `parent.miny`.
#[derive(PartialEq, Clone, Debug)]
pub struct MeterAligned {
    parent: Extent,
    tile_size: u32,
    pixel_size: f64,
}

impl MeterAligned {
    pub fn new(parent: Extent, tile_size: u32, pixel_size: f64) -> Result<MeterAligned, GridError> {
        if tile_size == 0 {
            return Err(GridError::InvalidTileSize(tile_size));
        }
        if !(pixel_size > 0.0) || !pixel_size.is_finite() {
            return Err(GridError::InvalidPixelSize {
                pixel_width: pixel_size,
                pixel_height: -pixel_size,
            });
        }
        Ok(MeterAligned {
            parent,
            tile_size,
            pixel_size,
        })
    }
    /// Ground distance covered by one tile
    pub fn tile_span(&self) -> f64 {
        self.tile_size as f64 * self.pixel_size
    }
    /// Number of tile columns and rows needed for the parent extent
    pub fn matrix_size(&self) -> (u32, u32) {
        let span = self.tile_span();
        (
            cell_count(self.parent.width(), span),
            cell_count(self.parent.height(), span),
        )
    }
}

impl TileGrid for MeterAligned {
    fn tile_size(&self) -> u32 {
        self.tile_size
    }
    fn scheme_id(&self) -> String {
        "meter".to_string()
    }
    fn tile_limits(&self, extent: &Extent) -> Option<TileLimits> {
        let span = self.tile_span();
        let (nx, ny) = self.matrix_size();
        TileLimits::normalized(
            cell_span(
                (extent.minx - self.parent.minx) / span,
                (extent.maxx - self.parent.minx) / span,
            ),
            cell_span(
                (extent.miny - self.parent.miny) / span,
                (extent.maxy - self.parent.miny) / span,
            ),
            nx,
            ny,
        )
    }
    fn tile_extent(&self, xtile: u32, ytile: u32) -> Extent {
        let span = self.tile_span();
        let minx = self.parent.minx + xtile as f64 * span;
        let miny = self.parent.miny + ytile as f64 * span;
        Extent {
            minx,
            miny,
            maxx: minx + span,
            maxy: miny + span,
        }
    }
    fn tile_transform(&self, xtile: u32, ytile: u32) -> AffineTransform {
        let extent = self.tile_extent(xtile, ytile);
        AffineTransform::north_up(extent.minx, extent.maxy, self.pixel_size, -self.pixel_size)
    }
}
