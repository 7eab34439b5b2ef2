//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use tile_grid::TileAddress;
use tiler_core::core::config::SinkCfg;
use tiler_core::core::Config;
use tiler_core::raster::Tile;
#[cfg(not(feature = "with-gdal"))]
use tiler_core::sink::DummySink as GdalTileSink;
use tiler_core::sink::{Filesink, Nosink, TileSink, TilesetMetadata};
use tiler_core::TilerError;
#[cfg(feature = "with-gdal")]
use tiler_gdal::GdalTileSink;

#[derive(Clone)]
pub enum Sink {
    Nosink(Nosink),
    Filesink(Filesink),
    Gdal(GdalTileSink),
}

impl TileSink for Sink {
    fn info(&self) -> String {
        match self {
            &Sink::Nosink(ref sink) => sink.info(),
            &Sink::Filesink(ref sink) => sink.info(),
            &Sink::Gdal(ref sink) => sink.info(),
        }
    }
    fn init(&self, metadata: &TilesetMetadata) -> Result<(), TilerError> {
        match self {
            &Sink::Nosink(ref sink) => sink.init(metadata),
            &Sink::Filesink(ref sink) => sink.init(metadata),
            &Sink::Gdal(ref sink) => sink.init(metadata),
        }
    }
    fn exists(&self, scheme_id: &str, address: &TileAddress) -> bool {
        match self {
            &Sink::Nosink(ref sink) => sink.exists(scheme_id, address),
            &Sink::Filesink(ref sink) => sink.exists(scheme_id, address),
            &Sink::Gdal(ref sink) => sink.exists(scheme_id, address),
        }
    }
    fn write(&self, scheme_id: &str, tile: &Tile, projection: &str) -> Result<(), TilerError> {
        match self {
            &Sink::Nosink(ref sink) => sink.write(scheme_id, tile, projection),
            &Sink::Filesink(ref sink) => sink.write(scheme_id, tile, projection),
            &Sink::Gdal(ref sink) => sink.write(scheme_id, tile, projection),
        }
    }
}

impl<'a> Config<'a, Option<SinkCfg>> for Sink {
    fn from_config(sink_cfg: &Option<SinkCfg>) -> Result<Self, String> {
        match sink_cfg {
            Some(SinkCfg {
                gdal: Some(gdal_cfg),
                ..
            }) => GdalTileSink::from_config(gdal_cfg).map(Sink::Gdal),
            Some(SinkCfg {
                file: Some(file_cfg),
                ..
            }) => Filesink::from_config(file_cfg).map(Sink::Filesink),
            _ => Ok(Sink::Nosink(Nosink)),
        }
    }
    fn gen_config() -> String {
        format!("{}{}", Filesink::gen_config(), GdalTileSink::gen_config())
    }
    fn gen_runtime_config(&self) -> String {
        match self {
            &Sink::Nosink(_) => "".to_string(),
            &Sink::Filesink(ref sink) => sink.gen_runtime_config(),
            &Sink::Gdal(ref sink) => sink.gen_runtime_config(),
        }
    }
}
