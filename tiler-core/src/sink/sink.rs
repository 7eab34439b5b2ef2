//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::GdalSinkCfg;
use crate::core::Config;
use crate::error::TilerError;
use crate::raster::{NumericKind, SourceGrid, Tile};
use crate::resample::Resampling;
use tile_grid::{TileAddress, TileGrid, TileLimits, TileScheme};

/// Tileset description written next to the tiles
#[derive(Serialize, Clone, Debug)]
pub struct TilesetMetadata {
    pub scheme: String,
    pub scheme_id: String,
    pub tile_size: u32,
    pub kind: NumericKind,
    pub nodata: f64,
    pub resampling: Resampling,
    /// minx, miny, maxx, maxy of the source grid
    pub bounds: [f64; 4],
    /// minx, miny, maxx, maxy tile index
    pub limits: Option<[u32; 4]>,
    pub projection: String,
}

impl TilesetMetadata {
    pub fn new(
        source: &SourceGrid,
        scheme: &TileScheme,
        resampling: Resampling,
        limits: Option<&TileLimits>,
    ) -> TilesetMetadata {
        let scheme_name = match scheme {
            TileScheme::RasterAligned(_) => "raster",
            TileScheme::SlippyMap(_) => "slippy",
            TileScheme::MeterAligned(_) => "meter",
        };
        let extent = source.extent();
        TilesetMetadata {
            scheme: scheme_name.to_string(),
            scheme_id: scheme.scheme_id(),
            tile_size: scheme.tile_size(),
            kind: source.kind(),
            nodata: source.buffer().nodata(),
            resampling,
            bounds: [extent.minx, extent.miny, extent.maxx, extent.maxy],
            limits: limits.map(|l| [l.minx, l.miny, l.maxx, l.maxy]),
            projection: source.projection().to_string(),
        }
    }
}

/// Tile storage. Implementations must accept concurrent and out of order writes.
pub trait TileSink {
    fn info(&self) -> String;
    /// Prepare output for a tileset
    fn init(&self, metadata: &TilesetMetadata) -> Result<(), TilerError>;
    fn exists(&self, scheme_id: &str, address: &TileAddress) -> bool;
    fn write(&self, scheme_id: &str, tile: &Tile, projection: &str) -> Result<(), TilerError>;
}

/// Discards all tiles
#[derive(Clone)]
pub struct Nosink;

impl TileSink for Nosink {
    fn info(&self) -> String {
        "No output".to_string()
    }
    fn init(&self, _metadata: &TilesetMetadata) -> Result<(), TilerError> {
        Ok(())
    }
    fn exists(&self, _scheme_id: &str, _address: &TileAddress) -> bool {
        false
    }
    #[allow(unused_variables)]
    fn write(&self, scheme_id: &str, tile: &Tile, projection: &str) -> Result<(), TilerError> {
        Ok(())
    }
}

/// Placeholder for sinks not compiled in
#[derive(Clone)]
pub struct DummySink;

impl TileSink for DummySink {
    fn info(&self) -> String {
        "Unsupported output".to_string()
    }
    fn init(&self, _metadata: &TilesetMetadata) -> Result<(), TilerError> {
        Err(TilerError::UnsupportedFormat(
            "GDAL support not available".to_string(),
        ))
    }
    fn exists(&self, _scheme_id: &str, _address: &TileAddress) -> bool {
        false
    }
    fn write(&self, _scheme_id: &str, _tile: &Tile, _projection: &str) -> Result<(), TilerError> {
        Err(TilerError::UnsupportedFormat(
            "GDAL support not available".to_string(),
        ))
    }
}

impl<'a> Config<'a, GdalSinkCfg> for DummySink {
    fn from_config(_sink_cfg: &GdalSinkCfg) -> Result<Self, String> {
        Ok(DummySink)
    }
    fn gen_config() -> String {
        "".to_string()
    }
}

/// ESRI world file: pixel sizes, rotations and center of the upper left pixel
pub fn world_file(tile: &Tile) -> String {
    let gt = &tile.transform;
    let (cx, cy) = gt.pixel_to_crs(0.5, 0.5);
    format!(
        "{}\n{}\n{}\n{}\n{}\n{}\n",
        gt.pixel_width, gt.col_rotation, gt.row_rotation, gt.pixel_height, cx, cy
    )
}
