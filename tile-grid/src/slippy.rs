//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Slippy map tiles (XYZ adressing) over a geographic source grid
//!
//! Formulas from <https://wiki.openstreetmap.org/wiki/Slippy_map_tilenames>

use crate::grid::{cell_span, Extent, TileGrid, TileLimits};
use crate::transform::{AffineTransform, GridError};
use std::f64::consts::PI;

/// Highest supported zoom level (2^30 tiles per axis still fit into u32)
pub const MAX_ZOOM: u8 = 30;

fn tiles_per_axis(zoom: u8) -> f64 {
    (zoom as f64).exp2()
}

/// Fractional tile column of a longitude
pub fn lon_to_tile_x_frac(lon: f64, zoom: u8) -> f64 {
    (lon + 180.0) / 360.0 * tiles_per_axis(zoom)
}

/// Fractional tile row of a latitude (row 0 is north)
pub fn lat_to_tile_y_frac(lat: f64, zoom: u8) -> f64 {
    let lat_rad = lat.to_radians();
    (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * tiles_per_axis(zoom)
}

pub fn lon_to_tile_x(lon: f64, zoom: u8) -> i64 {
    lon_to_tile_x_frac(lon, zoom).floor() as i64
}

pub fn lat_to_tile_y(lat: f64, zoom: u8) -> i64 {
    lat_to_tile_y_frac(lat, zoom).floor() as i64
}

/// Longitude of the west edge of tile column `xtile`
pub fn tile_x_to_lon(xtile: f64, zoom: u8) -> f64 {
    xtile / tiles_per_axis(zoom) * 360.0 - 180.0
}

/// Latitude of the north edge of tile row `ytile`
pub fn tile_y_to_lat(ytile: f64, zoom: u8) -> f64 {
    let n = PI - 2.0 * PI * ytile / tiles_per_axis(zoom);
    n.sinh().atan().to_degrees()
}

/// Global slippy map tile matrix at a fixed zoom level.
///
/// The source grid has to be referenced in geographic coordinates (lon/lat).
/// Tile resolution is not uniform: every tile gets its own pixel size derived
/// from the number of source pixels it spans.
#[derive(PartialEq, Clone, Debug)]
pub struct SlippyMap {
    zoom: u8,
    tile_size: u32,
    source: AffineTransform,
}

impl SlippyMap {
    pub fn new(zoom: u8, tile_size: u32, source: AffineTransform) -> Result<SlippyMap, GridError> {
        source.check_axis_aligned()?;
        if tile_size == 0 {
            return Err(GridError::InvalidTileSize(tile_size));
        }
        Ok(SlippyMap {
            zoom: zoom.min(MAX_ZOOM),
            tile_size,
            source,
        })
    }
    pub fn zoom(&self) -> u8 {
        self.zoom
    }
    /// Number of tile columns and rows at the grid zoom level
    pub fn matrix_size(&self) -> u32 {
        1u32 << self.zoom
    }
}

impl TileGrid for SlippyMap {
    fn tile_size(&self) -> u32 {
        self.tile_size
    }
    fn scheme_id(&self) -> String {
        format!("{}", self.zoom)
    }
    fn tile_limits(&self, extent: &Extent) -> Option<TileLimits> {
        let x = cell_span(
            lon_to_tile_x_frac(extent.minx, self.zoom),
            lon_to_tile_x_frac(extent.maxx, self.zoom),
        );
        // Latitude grows north while tile rows grow south.
        // cell_span orders the endpoints, TileLimits::normalized clips them.
        let y = cell_span(
            lat_to_tile_y_frac(extent.maxy, self.zoom),
            lat_to_tile_y_frac(extent.miny, self.zoom),
        );
        let n = self.matrix_size();
        TileLimits::normalized(x, y, n, n)
    }
    fn tile_extent(&self, xtile: u32, ytile: u32) -> Extent {
        Extent {
            minx: tile_x_to_lon(xtile as f64, self.zoom),
            miny: tile_y_to_lat(ytile as f64 + 1.0, self.zoom),
            maxx: tile_x_to_lon(xtile as f64 + 1.0, self.zoom),
            maxy: tile_y_to_lat(ytile as f64, self.zoom),
        }
    }
    fn tile_transform(&self, xtile: u32, ytile: u32) -> AffineTransform {
        let extent = self.tile_extent(xtile, ytile);
        let ts = self.tile_size as f64;
        // source pixels covered by this tile
        let pixels_x = (extent.width() / self.source.pixel_width).abs();
        let pixels_y = (extent.height() / self.source.pixel_height).abs();
        AffineTransform::north_up(
            extent.minx,
            extent.maxy,
            self.source.pixel_width.abs() * pixels_x / ts,
            -(self.source.pixel_height.abs() * pixels_y / ts),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> AffineTransform {
        // 1 arc second grid
        AffineTransform::north_up(7.0, 47.0, 1.0 / 3600.0, -1.0 / 3600.0)
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_tile_numbers() {
        assert_eq!(lon_to_tile_x(-180.0, 0), 0);
        assert_eq!(lon_to_tile_x(8.5417, 14), 8580);
        assert_eq!(lat_to_tile_y(47.3769, 14), 5737);
        assert_eq!(lat_to_tile_y(0.0, 1), 1);
        assert_close(tile_x_to_lon(8580.0, 14), 8.525390625);
        assert_close(tile_y_to_lat(0.0, 0), 85.0511287798066);
        assert_close(tile_y_to_lat(1.0, 1), 0.0);
    }

    #[test]
    fn test_tile_extent() {
        let grid = SlippyMap::new(1, 256, source()).unwrap();
        let extent = grid.tile_extent(1, 0);
        assert_close(extent.minx, 0.0);
        assert_close(extent.maxx, 180.0);
        assert_close(extent.miny, 0.0);
        assert_close(extent.maxy, 85.0511287798066);
        assert_eq!(grid.scheme_id(), "1");
    }

    #[test]
    fn test_limits_normalized() {
        let grid = SlippyMap::new(14, 256, source()).unwrap();
        let extent = Extent {
            minx: 8.45,
            miny: 47.32,
            maxx: 8.63,
            maxy: 47.43,
        };
        // raw row of miny is numerically greater than the row of maxy
        assert!(lat_to_tile_y(extent.miny, 14) > lat_to_tile_y(extent.maxy, 14));
        let limits = grid.tile_limits(&extent).unwrap();
        assert!(limits.miny <= limits.maxy);
        assert_eq!(limits.minx, lon_to_tile_x(8.45, 14) as u32);
        assert_eq!(limits.maxx, lon_to_tile_x(8.63, 14) as u32);
        assert_eq!(limits.miny, lat_to_tile_y(47.43, 14) as u32);
        assert_eq!(limits.maxy, lat_to_tile_y(47.32, 14) as u32);
    }

    #[test]
    fn test_limits_clipped() {
        let grid = SlippyMap::new(0, 256, source()).unwrap();
        let world = Extent {
            minx: -180.0,
            miny: -90.0,
            maxx: 180.0,
            maxy: 90.0,
        };
        assert_eq!(
            grid.tile_limits(&world),
            Some(TileLimits {
                minx: 0,
                miny: 0,
                maxx: 0,
                maxy: 0,
            })
        );
        let grid = SlippyMap::new(2, 256, source()).unwrap();
        let outside = Extent {
            minx: 190.0,
            miny: 0.0,
            maxx: 200.0,
            maxy: 10.0,
        };
        assert_eq!(grid.tile_limits(&outside), None);
    }

    #[test]
    fn test_tile_transform() {
        let grid = SlippyMap::new(14, 256, source()).unwrap();
        let extent = grid.tile_extent(8580, 5737);
        let gt = grid.tile_transform(8580, 5737);
        assert_close(gt.origin_x, extent.minx);
        assert_close(gt.origin_y, extent.maxy);
        assert_close(gt.pixel_width, extent.width() / 256.0);
        assert_close(gt.pixel_height, -extent.height() / 256.0);
        let (x, y) = gt.pixel_to_crs(256.0, 256.0);
        assert_close(x, extent.maxx);
        assert_close(y, extent.miny);
        // latitude dependent resolution
        let north = grid.tile_transform(8580, 100);
        assert!(north.pixel_height.abs() < gt.pixel_height.abs());
    }
}
