//! A library for raster tile grid calculations
//!
//! ## Affine transforms
//!
//! ```rust
//! use tile_grid::{AffineTransform, Extent};
//!
//! let gt = AffineTransform::from_gdal([0.0, 10.0, 0.0, 2560.0, 0.0, -10.0]);
//! assert_eq!(gt.crs_to_pixel(1230.0, 1570.0), Ok((123.0, 99.0)));
//! assert_eq!(gt.pixel_to_crs(123.0, 99.0), (1230.0, 1570.0));
//! assert_eq!(
//!     gt.derive_extent(256, 256),
//!     Extent {
//!         minx: 0.0,
//!         miny: 0.0,
//!         maxx: 2560.0,
//!         maxy: 2560.0,
//!     }
//! );
//! ```
//!
//! ## Tile schemes
//!
//! ```rust
//! use tile_grid::{AffineTransform, Extent, MeterAligned, TileGrid};
//!
//! let parent = Extent {
//!     minx: 0.0,
//!     miny: 0.0,
//!     maxx: 1000.0,
//!     maxy: 1000.0,
//! };
//! let grid = MeterAligned::new(parent, 256, 10.0).unwrap();
//! assert_eq!(
//!     grid.tile_transform(0, 0),
//!     AffineTransform::from_gdal([0.0, 10.0, 0.0, 2560.0, 0.0, -10.0])
//! );
//! ```
//!
//! ## Grid iterators
//!
//! ```rust
//! use tile_grid::{AffineTransform, GridIterator, RasterAligned, TileGrid};
//!
//! let gt = AffineTransform::from_gdal([0.0, 10.0, 0.0, 5120.0, 0.0, -10.0]);
//! let grid = RasterAligned::new(gt, 512, 512, 256).unwrap();
//! let tile_limits = grid.tile_limits(&gt.derive_extent(512, 512));
//! for (x, y) in GridIterator::new(tile_limits) {
//!     println!("Tile {}/{}", x, y);
//! }
//! ```

mod grid;
mod grid_iterator;
mod meter;
mod raster;
pub mod slippy;
mod transform;

pub use grid::{Extent, TileAddress, TileGrid, TileLimits, TileScheme};
pub use grid_iterator::GridIterator;
pub use meter::MeterAligned;
pub use raster::RasterAligned;
pub use slippy::SlippyMap;
pub use transform::{AffineTransform, GridError};
