//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::TilerError;
use crate::raster::{NumericKind, PixelBuffer};
use tile_grid::{AffineTransform, Extent};

/// Georeferenced source raster. Immutable after loading.
#[derive(Clone, Debug)]
pub struct SourceGrid {
    buffer: PixelBuffer,
    transform: AffineTransform,
    projection: String,
    extent: Extent,
}

impl SourceGrid {
    /// Rotated or skewed transforms are rejected with `UnsupportedGeometry`
    pub fn new(
        buffer: PixelBuffer,
        transform: AffineTransform,
        projection: String,
    ) -> Result<SourceGrid, TilerError> {
        transform.check_axis_aligned()?;
        let extent = transform.derive_extent(buffer.width(), buffer.height());
        Ok(SourceGrid {
            buffer,
            transform,
            projection,
            extent,
        })
    }
    pub fn width(&self) -> usize {
        self.buffer.width()
    }
    pub fn height(&self) -> usize {
        self.buffer.height()
    }
    pub fn kind(&self) -> NumericKind {
        self.buffer.kind()
    }
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }
    pub fn transform(&self) -> &AffineTransform {
        &self.transform
    }
    /// WKT, empty if unknown
    pub fn projection(&self) -> &str {
        &self.projection
    }
    pub fn extent(&self) -> &Extent {
        &self.extent
    }
}
