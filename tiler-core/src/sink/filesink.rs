//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::FileSinkCfg;
use crate::core::Config;
use crate::error::TilerError;
use crate::raster::Tile;
use crate::sink::sink::{world_file, TileSink, TilesetMetadata};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tile_grid::TileAddress;

/// Raw little-endian samples in `<base>/<scheme_id>/<x>/<y>.raw`
#[derive(Clone)]
pub struct Filesink {
    pub basepath: String,
    /// gzip tiles (`.raw.gz`)
    pub compress: bool,
}

impl Filesink {
    pub fn tile_path(&self, scheme_id: &str, address: &TileAddress, ext: &str) -> PathBuf {
        Path::new(&self.basepath)
            .join(scheme_id)
            .join(address.x.to_string())
            .join(format!("{}.{}", address.y, ext))
    }
    fn data_ext(&self) -> &'static str {
        if self.compress {
            "raw.gz"
        } else {
            "raw"
        }
    }
    fn write_file(path: &Path, obj: &[u8]) -> Result<(), io::Error> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut f = File::create(path)?;
        f.write_all(obj)
    }
}

impl TileSink for Filesink {
    fn info(&self) -> String {
        format!("Tile output directory: {}", self.basepath)
    }
    fn init(&self, metadata: &TilesetMetadata) -> Result<(), TilerError> {
        let path = Path::new(&self.basepath)
            .join(&metadata.scheme_id)
            .join("metadata.json");
        let json = serde_json::to_string_pretty(metadata)
            .map_err(|e| TilerError::Io(io::Error::new(io::ErrorKind::Other, e)))?;
        debug!("Filesink.init {}", path.display());
        Filesink::write_file(&path, json.as_bytes())?;
        Ok(())
    }
    fn exists(&self, scheme_id: &str, address: &TileAddress) -> bool {
        self.tile_path(scheme_id, address, self.data_ext()).exists()
    }
    fn write(&self, scheme_id: &str, tile: &Tile, projection: &str) -> Result<(), TilerError> {
        let path = self.tile_path(scheme_id, &tile.address, self.data_ext());
        debug!("Filesink.write {}", path.display());
        let data = tile.buffer.to_le_bytes();
        if self.compress {
            let mut gz = GzEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
            gz.write_all(&data)?;
            Filesink::write_file(&path, &gz.finish()?)?;
        } else {
            Filesink::write_file(&path, &data)?;
        }
        let wld = self.tile_path(scheme_id, &tile.address, "wld");
        Filesink::write_file(&wld, world_file(tile).as_bytes())?;
        if !projection.is_empty() {
            let prj = self.tile_path(scheme_id, &tile.address, "prj");
            Filesink::write_file(&prj, projection.as_bytes())?;
        }
        Ok(())
    }
}

impl<'a> Config<'a, FileSinkCfg> for Filesink {
    fn from_config(sink_cfg: &FileSinkCfg) -> Result<Self, String> {
        Ok(Filesink {
            basepath: sink_cfg.base.clone(),
            compress: sink_cfg.compress,
        })
    }
    fn gen_config() -> String {
        let toml = r#"
[sink.file]
base = "tileset"
compress = false
"#;
        toml.to_string()
    }
    fn gen_runtime_config(&self) -> String {
        format!(
            "\n[sink.file]\nbase = {:?}\ncompress = {}\n",
            self.basepath, self.compress
        )
    }
}
