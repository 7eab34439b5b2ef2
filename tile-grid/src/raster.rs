//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tiles sharing the pixel grid of the source raster

use crate::grid::{cell_span, Extent, TileGrid, TileLimits};
use crate::transform::{AffineTransform, GridError};

/// Direct partition of the source pixel space.
///
/// Tile `(tx, ty)` covers the source pixels
/// `[tx*tile_size, (tx+1)*tile_size) x [ty*tile_size, (ty+1)*tile_size)`.
#[derive(PartialEq, Clone, Debug)]
pub struct RasterAligned {
    source: AffineTransform,
    width: usize,
    height: usize,
    tile_size: u32,
}

impl RasterAligned {
    pub fn new(
        source: AffineTransform,
        width: usize,
        height: usize,
        tile_size: u32,
    ) -> Result<RasterAligned, GridError> {
        source.check_axis_aligned()?;
        if tile_size == 0 {
            return Err(GridError::InvalidTileSize(tile_size));
        }
        Ok(RasterAligned {
            source,
            width,
            height,
            tile_size,
        })
    }
    /// Number of tile columns and rows needed for the whole source grid
    pub fn matrix_size(&self) -> (u32, u32) {
        let ts = self.tile_size as usize;
        (
            ((self.width + ts - 1) / ts) as u32,
            ((self.height + ts - 1) / ts) as u32,
        )
    }
}

impl TileGrid for RasterAligned {
    fn tile_size(&self) -> u32 {
        self.tile_size
    }
    fn scheme_id(&self) -> String {
        "raster".to_string()
    }
    fn tile_limits(&self, extent: &Extent) -> Option<TileLimits> {
        // check_axis_aligned passed in new
        let (c0, r0) = self.source.crs_to_pixel(extent.minx, extent.maxy).ok()?;
        let (c1, r1) = self.source.crs_to_pixel(extent.maxx, extent.miny).ok()?;
        let ts = self.tile_size as f64;
        let (nx, ny) = self.matrix_size();
        TileLimits::normalized(cell_span(c0 / ts, c1 / ts), cell_span(r0 / ts, r1 / ts), nx, ny)
    }
    fn tile_extent(&self, xtile: u32, ytile: u32) -> Extent {
        let ts = self.tile_size as usize;
        self.tile_transform(xtile, ytile).derive_extent(ts, ts)
    }
    fn tile_transform(&self, xtile: u32, ytile: u32) -> AffineTransform {
        let ts = self.tile_size as f64;
        let (origin_x, origin_y) = self
            .source
            .pixel_to_crs(xtile as f64 * ts, ytile as f64 * ts);
        AffineTransform::north_up(
            origin_x,
            origin_y,
            self.source.pixel_width,
            self.source.pixel_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> RasterAligned {
        // 600 x 300 pixels of 10m
        let gt = AffineTransform::from_gdal([1000.0, 10.0, 0.0, 5000.0, 0.0, -10.0]);
        RasterAligned::new(gt, 600, 300, 256).unwrap()
    }

    #[test]
    fn test_tile_transform() {
        let grid = grid();
        assert_eq!(grid.matrix_size(), (3, 2));
        assert_eq!(
            grid.tile_transform(1, 1),
            AffineTransform::from_gdal([3560.0, 10.0, 0.0, 2440.0, 0.0, -10.0])
        );
        assert_eq!(
            grid.tile_extent(0, 0),
            Extent {
                minx: 1000.0,
                miny: 2440.0,
                maxx: 3560.0,
                maxy: 5000.0,
            }
        );
    }

    #[test]
    fn test_tile_limits() {
        let grid = grid();
        let extent = AffineTransform::from_gdal([1000.0, 10.0, 0.0, 5000.0, 0.0, -10.0])
            .derive_extent(600, 300);
        assert_eq!(
            grid.tile_limits(&extent),
            Some(TileLimits {
                minx: 0,
                miny: 0,
                maxx: 2,
                maxy: 1,
            })
        );
        // single pixel in the last tile
        let extent = Extent {
            minx: 6900.0,
            miny: 2100.0,
            maxx: 6910.0,
            maxy: 2110.0,
        };
        assert_eq!(
            grid.tile_limits(&extent),
            Some(TileLimits {
                minx: 2,
                miny: 1,
                maxx: 2,
                maxy: 1,
            })
        );
        // outside
        let extent = Extent {
            minx: -5000.0,
            miny: 0.0,
            maxx: -4000.0,
            maxy: 100.0,
        };
        assert_eq!(grid.tile_limits(&extent), None);
    }

    #[test]
    fn test_rotated_source() {
        let gt = AffineTransform::from_gdal([0.0, 10.0, 1.0, 0.0, 0.0, -10.0]);
        assert!(RasterAligned::new(gt, 10, 10, 256).is_err());
        let gt = AffineTransform::from_gdal([0.0, 10.0, 0.0, 0.0, 0.0, -10.0]);
        assert_eq!(
            RasterAligned::new(gt, 10, 10, 0),
            Err(GridError::InvalidTileSize(0))
        );
    }
}
