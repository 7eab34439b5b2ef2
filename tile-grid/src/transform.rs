//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Affine pixel <-> CRS transformations

use crate::grid::Extent;
use thiserror::Error;

#[derive(Error, PartialEq, Clone, Debug)]
pub enum GridError {
    #[error("rotated or skewed grids are not supported (row rotation {row_rotation}, column rotation {col_rotation})")]
    UnsupportedGeometry {
        row_rotation: f64,
        col_rotation: f64,
    },
    #[error("invalid pixel size {pixel_width} x {pixel_height}")]
    InvalidPixelSize { pixel_width: f64, pixel_height: f64 },
    #[error("invalid tile size {0}")]
    InvalidTileSize(u32),
}

/// Six coefficient affine transform in GDAL order.
///
/// Maps pixel column/row `(c, r)` to CRS coordinates:
/// `x = origin_x + c * pixel_width + r * row_rotation` and
/// `y = origin_y + c * col_rotation + r * pixel_height`.
/// `pixel_height` is negative for north-up grids.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct AffineTransform {
    pub origin_x: f64,
    pub pixel_width: f64,
    pub row_rotation: f64,
    pub origin_y: f64,
    pub col_rotation: f64,
    pub pixel_height: f64,
}

impl AffineTransform {
    /// North-up transform without rotation terms
    pub fn north_up(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        AffineTransform {
            origin_x,
            pixel_width,
            row_rotation: 0.0,
            origin_y,
            col_rotation: 0.0,
            pixel_height,
        }
    }
    pub fn from_gdal(gt: [f64; 6]) -> Self {
        AffineTransform {
            origin_x: gt[0],
            pixel_width: gt[1],
            row_rotation: gt[2],
            origin_y: gt[3],
            col_rotation: gt[4],
            pixel_height: gt[5],
        }
    }
    pub fn to_gdal(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.row_rotation,
            self.origin_y,
            self.col_rotation,
            self.pixel_height,
        ]
    }
    pub fn is_axis_aligned(&self) -> bool {
        self.row_rotation == 0.0 && self.col_rotation == 0.0
    }
    /// Reject rotated or skewed grids and degenerate pixel sizes
    pub fn check_axis_aligned(&self) -> Result<(), GridError> {
        if !self.is_axis_aligned() {
            return Err(GridError::UnsupportedGeometry {
                row_rotation: self.row_rotation,
                col_rotation: self.col_rotation,
            });
        }
        if self.pixel_width == 0.0
            || self.pixel_height == 0.0
            || !self.pixel_width.is_finite()
            || !self.pixel_height.is_finite()
        {
            return Err(GridError::InvalidPixelSize {
                pixel_width: self.pixel_width,
                pixel_height: self.pixel_height,
            });
        }
        Ok(())
    }
    /// CRS coordinate of the upper left corner of pixel `(col, row)`.
    /// Fractional pixel positions are allowed.
    pub fn pixel_to_crs(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.origin_x + col * self.pixel_width + row * self.row_rotation,
            self.origin_y + col * self.col_rotation + row * self.pixel_height,
        )
    }
    /// Fractional pixel position of a CRS coordinate
    pub fn crs_to_pixel(&self, x: f64, y: f64) -> Result<(f64, f64), GridError> {
        self.check_axis_aligned()?;
        Ok((
            (x - self.origin_x) / self.pixel_width,
            (y - self.origin_y) / self.pixel_height,
        ))
    }
    /// Bounding box of a `width` x `height` pixel grid
    pub fn derive_extent(&self, width: usize, height: usize) -> Extent {
        let corners = [
            self.pixel_to_crs(0.0, 0.0),
            self.pixel_to_crs(width as f64, 0.0),
            self.pixel_to_crs(0.0, height as f64),
            self.pixel_to_crs(width as f64, height as f64),
        ];
        let mut extent = Extent {
            minx: corners[0].0,
            miny: corners[0].1,
            maxx: corners[0].0,
            maxy: corners[0].1,
        };
        for &(x, y) in &corners[1..] {
            extent.minx = extent.minx.min(x);
            extent.miny = extent.miny.min(y);
            extent.maxx = extent.maxx.max(x);
            extent.maxy = extent.maxy.max(y);
        }
        extent
    }
}
