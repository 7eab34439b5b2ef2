//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::gdal_source::gdal_err;
use gdal::raster::{Buffer, GdalType};
use gdal::{Dataset, Driver};
use gdal_sys;
use std::collections::BTreeMap;
use std::ffi::{CStr, CString};
use std::fs;
use std::path::{Path, PathBuf};
use std::ptr;
use tile_grid::TileAddress;
use tiler_core::core::config::GdalSinkCfg;
use tiler_core::core::Config;
use tiler_core::raster::{PixelBuffer, Raster, Sample, Tile};
use tiler_core::sink::{TileSink, TilesetMetadata};
use tiler_core::TilerError;

/// Tiles written with a GDAL driver, HFZ (HF2) by default.
///
/// Each tile is rendered into an in-memory dataset which is then copied
/// with the configured driver and creation options.
#[derive(Clone, Debug)]
pub struct GdalTileSink {
    pub basepath: String,
    pub driver: String,
    pub extension: String,
    pub options: BTreeMap<String, String>,
}

impl GdalTileSink {
    pub fn new(basepath: &str) -> GdalTileSink {
        GdalTileSink {
            basepath: basepath.to_string(),
            driver: "HF2".to_string(),
            extension: "hfz".to_string(),
            options: BTreeMap::new(),
        }
    }
    pub fn tile_path(&self, scheme_id: &str, address: &TileAddress) -> PathBuf {
        Path::new(&self.basepath)
            .join(scheme_id)
            .join(address.x.to_string())
            .join(format!("{}.{}", address.y, self.extension))
    }
    fn mem_dataset(tile: &Tile, projection: &str) -> Result<Dataset, TilerError> {
        let mut dataset = match &tile.buffer {
            PixelBuffer::U8(r) => mem_dataset_of(r)?,
            PixelBuffer::U16(r) => mem_dataset_of(r)?,
            PixelBuffer::I16(r) => mem_dataset_of(r)?,
            PixelBuffer::U32(r) => mem_dataset_of(r)?,
            PixelBuffer::I32(r) => mem_dataset_of(r)?,
            PixelBuffer::F32(r) => mem_dataset_of(r)?,
            PixelBuffer::F64(r) => mem_dataset_of(r)?,
        };
        dataset
            .set_geo_transform(&tile.transform.to_gdal())
            .map_err(gdal_err)?;
        if !projection.is_empty() {
            dataset.set_projection(projection).map_err(gdal_err)?;
        }
        Ok(dataset)
    }
    /// Copy `src` to `path` with the configured driver and creation options
    fn create_copy(&self, src: &Dataset, path: &Path) -> Result<(), TilerError> {
        let driver = Driver::get(&self.driver).map_err(gdal_err)?;
        let c_filename = CString::new(path.to_string_lossy().as_bytes())
            .map_err(|e| TilerError::Gdal(e.to_string()))?;
        let mut c_options = ptr::null_mut();
        for (key, value) in &self.options {
            let c_key = CString::new(key.as_str()).map_err(|e| TilerError::Gdal(e.to_string()))?;
            let c_value =
                CString::new(value.as_str()).map_err(|e| TilerError::Gdal(e.to_string()))?;
            c_options = unsafe { gdal_sys::CSLSetNameValue(c_options, c_key.as_ptr(), c_value.as_ptr()) };
        }
        let c_dataset = unsafe {
            gdal_sys::GDALCreateCopy(
                driver.c_driver(),
                c_filename.as_ptr(),
                src.c_dataset(),
                0,
                c_options,
                None,
                ptr::null_mut(),
            )
        };
        unsafe { gdal_sys::CSLDestroy(c_options) };
        if c_dataset.is_null() {
            let msg = unsafe { CStr::from_ptr(gdal_sys::CPLGetLastErrorMsg()) };
            return Err(TilerError::Gdal(format!(
                "{} copy failed: {}",
                self.driver,
                msg.to_string_lossy()
            )));
        }
        unsafe { gdal_sys::GDALClose(c_dataset) };
        Ok(())
    }
}

fn mem_dataset_of<T: Sample + GdalType>(raster: &Raster<T>) -> Result<Dataset, TilerError> {
    let driver = Driver::get("MEM").map_err(gdal_err)?;
    let dataset = driver
        .create_with_band_type::<T>("", raster.width() as isize, raster.height() as isize, 1)
        .map_err(gdal_err)?;
    {
        let mut band = dataset.rasterband(1).map_err(gdal_err)?;
        band.set_no_data_value(raster.nodata().to_f64())
            .map_err(gdal_err)?;
        let buffer = Buffer {
            size: (raster.width(), raster.height()),
            data: raster.data().to_vec(),
        };
        band.write((0, 0), buffer.size, &buffer).map_err(gdal_err)?;
    }
    Ok(dataset)
}

impl TileSink for GdalTileSink {
    fn info(&self) -> String {
        format!("{} tiles in {}", self.driver, self.basepath)
    }
    fn init(&self, metadata: &TilesetMetadata) -> Result<(), TilerError> {
        let dir = Path::new(&self.basepath).join(&metadata.scheme_id);
        fs::create_dir_all(&dir)?;
        Driver::get(&self.driver).map_err(gdal_err)?;
        debug!(
            "GDAL {} driver {} ready for {}",
            crate::gdal_version(),
            self.driver,
            dir.display()
        );
        Ok(())
    }
    fn exists(&self, scheme_id: &str, address: &TileAddress) -> bool {
        self.tile_path(scheme_id, address).exists()
    }
    fn write(&self, scheme_id: &str, tile: &Tile, projection: &str) -> Result<(), TilerError> {
        let path = self.tile_path(scheme_id, &tile.address);
        debug!("GdalTileSink.write {}", path.display());
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mem = GdalTileSink::mem_dataset(tile, projection)?;
        self.create_copy(&mem, &path)
    }
}

impl<'a> Config<'a, GdalSinkCfg> for GdalTileSink {
    fn from_config(sink_cfg: &GdalSinkCfg) -> Result<Self, String> {
        let mut sink = GdalTileSink::new(&sink_cfg.base);
        if let Some(ref driver) = sink_cfg.driver {
            sink.driver = driver.clone();
        }
        if let Some(ref extension) = sink_cfg.extension {
            sink.extension = extension.clone();
        }
        sink.options = sink_cfg.options.clone();
        Ok(sink)
    }
    fn gen_config() -> String {
        let toml = r#"
#[sink.gdal]
#base = "tileset"
#driver = "HF2"
#extension = "hfz"
#options = { COMPRESS = "YES", VERTICAL_PRECISION = "0.1" }
"#;
        toml.to_string()
    }
    fn gen_runtime_config(&self) -> String {
        let options: Vec<String> = self
            .options
            .iter()
            .map(|(k, v)| format!("{} = {:?}", k, v))
            .collect();
        format!(
            "\n[sink.gdal]\nbase = {:?}\ndriver = {:?}\nextension = {:?}\noptions = {{ {} }}\n",
            self.basepath,
            self.driver,
            self.extension,
            options.join(", ")
        )
    }
}
