//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use gdal::raster::{GdalType, RasterBand};
use gdal::Dataset;
use gdal_sys::GDALDataType;
use std::path::Path;
use tile_grid::AffineTransform;
use tiler_core::core::config::SourceCfg;
use tiler_core::core::Config;
use tiler_core::datasource::RasterSource;
use tiler_core::raster::{NumericKind, PixelBuffer, Raster, Sample, SourceGrid};
use tiler_core::TilerError;

/// Single band raster readable by GDAL
#[derive(Clone, Default, Debug)]
pub struct GdalRasterSource {
    /// Overrides the band nodata value
    pub nodata: Option<f64>,
}

pub(crate) fn gdal_err(e: gdal::errors::GdalError) -> TilerError {
    TilerError::Gdal(e.to_string())
}

pub(crate) fn numeric_kind(band_type: GDALDataType::Type) -> Result<NumericKind, TilerError> {
    match band_type {
        GDALDataType::GDT_Byte => Ok(NumericKind::U8),
        GDALDataType::GDT_UInt16 => Ok(NumericKind::U16),
        GDALDataType::GDT_Int16 => Ok(NumericKind::I16),
        GDALDataType::GDT_UInt32 => Ok(NumericKind::U32),
        GDALDataType::GDT_Int32 => Ok(NumericKind::I32),
        GDALDataType::GDT_Float32 => Ok(NumericKind::F32),
        GDALDataType::GDT_Float64 => Ok(NumericKind::F64),
        other => Err(TilerError::UnsupportedDataType(format!(
            "GDAL data type {}",
            other
        ))),
    }
}

fn read_band<T: Sample + GdalType>(
    band: &RasterBand,
    nodata: Option<f64>,
) -> Result<PixelBuffer, TilerError>
where
    PixelBuffer: From<Raster<T>>,
{
    let buffer = band.read_band_as::<T>().map_err(gdal_err)?;
    let (width, height) = buffer.size;
    let raster = Raster::with_declared_nodata(width, height, buffer.data, nodata)?;
    Ok(raster.into())
}

impl RasterSource for GdalRasterSource {
    fn info(&self) -> String {
        format!("GDAL {}", crate::gdal_version())
    }
    fn open(&self, path: &Path) -> Result<SourceGrid, TilerError> {
        info!("Reading {} with GDAL", path.display());
        let dataset = Dataset::open(path)
            .map_err(|e| TilerError::UnsupportedFormat(format!("{}: {}", path.display(), e)))?;
        let bands = dataset.raster_count();
        if bands != 1 {
            return Err(TilerError::UnsupportedFormat(format!(
                "{}: expected a single band raster, found {} bands",
                path.display(),
                bands
            )));
        }
        let band = dataset.rasterband(1).map_err(gdal_err)?;
        let nodata = self.nodata.or_else(|| band.no_data_value());
        let kind = numeric_kind(band.band_type())?;
        let buffer = match kind {
            NumericKind::U8 => read_band::<u8>(&band, nodata)?,
            NumericKind::U16 => read_band::<u16>(&band, nodata)?,
            NumericKind::I16 => read_band::<i16>(&band, nodata)?,
            NumericKind::U32 => read_band::<u32>(&band, nodata)?,
            NumericKind::I32 => read_band::<i32>(&band, nodata)?,
            NumericKind::F32 => read_band::<f32>(&band, nodata)?,
            NumericKind::F64 => read_band::<f64>(&band, nodata)?,
        };
        let transform = AffineTransform::from_gdal(dataset.geo_transform().map_err(gdal_err)?);
        debug!(
            "{} x {} {} raster, transform {:?}",
            buffer.width(),
            buffer.height(),
            kind,
            transform.to_gdal()
        );
        SourceGrid::new(buffer, transform, dataset.projection())
    }
}

impl<'a> Config<'a, SourceCfg> for GdalRasterSource {
    fn from_config(source_cfg: &SourceCfg) -> Result<Self, String> {
        Ok(GdalRasterSource {
            nodata: source_cfg.nodata,
        })
    }
    fn gen_config() -> String {
        let toml = r#"
[source]
path = "dem.tif"
format = "gdal"
# nodata = -9999.0
"#;
        toml.to_string()
    }
}
