//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//!Tile grids

use crate::meter::MeterAligned;
use crate::raster::RasterAligned;
use crate::slippy::SlippyMap;
use crate::transform::AffineTransform;

/// Geographic extent
#[derive(PartialEq, Clone, Debug)]
pub struct Extent {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }
    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }
    pub fn intersects(&self, other: &Extent) -> bool {
        self.minx < other.maxx
            && other.minx < self.maxx
            && self.miny < other.maxy
            && other.miny < self.maxy
    }
}

/// Tile index address
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct TileAddress {
    pub x: u32,
    pub y: u32,
}

/// Min and max tile numbers, both inclusive
#[derive(PartialEq, Clone, Debug)]
pub struct TileLimits {
    pub minx: u32,
    pub miny: u32,
    pub maxx: u32,
    pub maxy: u32,
}

// Tolerance for extents ending exactly on a tile border
pub(crate) const EPSILON: f64 = 0.0000001;

impl TileLimits {
    /// Number of tiles within limits
    pub fn count(&self) -> u64 {
        (self.maxx as u64 - self.minx as u64 + 1) * (self.maxy as u64 - self.miny as u64 + 1)
    }
    pub fn contains(&self, xtile: u32, ytile: u32) -> bool {
        xtile >= self.minx && xtile <= self.maxx && ytile >= self.miny && ytile <= self.maxy
    }
    /// Order both axes, then clip to `[0, nx) x [0, ny)`.
    /// Returns `None` for an empty intersection.
    pub(crate) fn normalized(
        x: (i64, i64),
        y: (i64, i64),
        nx: u32,
        ny: u32,
    ) -> Option<TileLimits> {
        let (minx, maxx) = clip_axis(x, nx)?;
        let (miny, maxy) = clip_axis(y, ny)?;
        Some(TileLimits {
            minx,
            miny,
            maxx,
            maxy,
        })
    }
}

fn clip_axis((a, b): (i64, i64), n: u32) -> Option<(u32, u32)> {
    if n == 0 {
        return None;
    }
    let (min, max) = if a > b { (b, a) } else { (a, b) };
    let min = min.max(0);
    let max = max.min(n as i64 - 1);
    if max < min {
        None
    } else {
        Some((min as u32, max as u32))
    }
}

/// First and last cell covering `[lo, hi]` for fractional cell positions
pub(crate) fn cell_span(lo: f64, hi: f64) -> (i64, i64) {
    let (lo, hi) = if lo > hi { (hi, lo) } else { (lo, hi) };
    let first = (lo + EPSILON).floor();
    let last = ((hi - EPSILON).ceil() - 1.0).max(first);
    (saturating_i64(first), saturating_i64(last))
}

fn saturating_i64(v: f64) -> i64 {
    if v.is_nan() {
        0
    } else {
        v.max(i64::MIN as f64).min(i64::MAX as f64) as i64
    }
}

/// Number of cells of size `cell` needed to cover `length`
pub(crate) fn cell_count(length: f64, cell: f64) -> u32 {
    if !(length > 0.0) || !(cell > 0.0) {
        return 0;
    }
    (length / cell - EPSILON).ceil().max(1.0).min(u32::MAX as f64) as u32
}

/// Tile addressing scheme
pub trait TileGrid {
    /// Width and height of a tile in pixels
    fn tile_size(&self) -> u32;
    /// Identifier used as path prefix of generated tiles
    fn scheme_id(&self) -> String;
    /// Tile index limits covering extent
    fn tile_limits(&self, extent: &Extent) -> Option<TileLimits>;
    /// Extent of a given tile
    fn tile_extent(&self, xtile: u32, ytile: u32) -> Extent;
    /// Placement of tile pixels in CRS space
    fn tile_transform(&self, xtile: u32, ytile: u32) -> AffineTransform;
}

/// Available tile addressing schemes
#[derive(PartialEq, Clone, Debug)]
pub enum TileScheme {
    RasterAligned(RasterAligned),
    SlippyMap(SlippyMap),
    MeterAligned(MeterAligned),
}

impl TileGrid for TileScheme {
    fn tile_size(&self) -> u32 {
        match self {
            TileScheme::RasterAligned(grid) => grid.tile_size(),
            TileScheme::SlippyMap(grid) => grid.tile_size(),
            TileScheme::MeterAligned(grid) => grid.tile_size(),
        }
    }
    fn scheme_id(&self) -> String {
        match self {
            TileScheme::RasterAligned(grid) => grid.scheme_id(),
            TileScheme::SlippyMap(grid) => grid.scheme_id(),
            TileScheme::MeterAligned(grid) => grid.scheme_id(),
        }
    }
    fn tile_limits(&self, extent: &Extent) -> Option<TileLimits> {
        match self {
            TileScheme::RasterAligned(grid) => grid.tile_limits(extent),
            TileScheme::SlippyMap(grid) => grid.tile_limits(extent),
            TileScheme::MeterAligned(grid) => grid.tile_limits(extent),
        }
    }
    fn tile_extent(&self, xtile: u32, ytile: u32) -> Extent {
        match self {
            TileScheme::RasterAligned(grid) => grid.tile_extent(xtile, ytile),
            TileScheme::SlippyMap(grid) => grid.tile_extent(xtile, ytile),
            TileScheme::MeterAligned(grid) => grid.tile_extent(xtile, ytile),
        }
    }
    fn tile_transform(&self, xtile: u32, ytile: u32) -> AffineTransform {
        match self {
            TileScheme::RasterAligned(grid) => grid.tile_transform(xtile, ytile),
            TileScheme::SlippyMap(grid) => grid.tile_transform(xtile, ytile),
            TileScheme::MeterAligned(grid) => grid.tile_transform(xtile, ytile),
        }
    }
}
