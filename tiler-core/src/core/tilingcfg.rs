//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{SchemeCfg, TilingCfg};
use crate::core::Config;
use crate::error::TilerError;
use crate::raster::SourceGrid;
use crate::resample::Resampling;
use tile_grid::slippy::MAX_ZOOM;
use tile_grid::{MeterAligned, RasterAligned, SlippyMap, TileScheme};

pub const DEFAULT_PIXEL_SIZE: f64 = 10.0;

/// Addressing scheme selected by configuration
#[derive(PartialEq, Clone, Debug)]
pub enum SchemeParams {
    Raster,
    Slippy { zoom: u8 },
    Meter { pixel_size: f64 },
}

#[derive(PartialEq, Clone, Debug)]
pub struct TilingParams {
    pub tile_size: u32,
    pub resampling: Resampling,
    pub skip_empty: bool,
    pub scheme: SchemeParams,
}

impl SchemeParams {
    pub fn from_config(scheme_cfg: &SchemeCfg) -> Result<SchemeParams, String> {
        match scheme_cfg.scheme_type.to_lowercase().as_str() {
            "raster" => Ok(SchemeParams::Raster),
            "slippy" => match scheme_cfg.zoom {
                Some(zoom) if zoom <= MAX_ZOOM => Ok(SchemeParams::Slippy { zoom }),
                Some(zoom) => Err(format!("Zoom level {} exceeds maximum {}", zoom, MAX_ZOOM)),
                None => Err("Slippy map tiles require a zoom level".to_string()),
            },
            "meter" => {
                let pixel_size = scheme_cfg.pixel_size_m.unwrap_or(DEFAULT_PIXEL_SIZE);
                if pixel_size > 0.0 && pixel_size.is_finite() {
                    Ok(SchemeParams::Meter { pixel_size })
                } else {
                    Err(format!("Invalid pixel size {}", pixel_size))
                }
            }
            other => Err(format!("Unknown tile scheme '{}'", other)),
        }
    }
}

impl TilingParams {
    /// Tile scheme covering `source`
    pub fn scheme_for(&self, source: &SourceGrid) -> Result<TileScheme, TilerError> {
        let scheme = match self.scheme {
            SchemeParams::Raster => TileScheme::RasterAligned(RasterAligned::new(
                *source.transform(),
                source.width(),
                source.height(),
                self.tile_size,
            )?),
            SchemeParams::Slippy { zoom } => {
                if !source.projection().is_empty() && !source.projection().contains("GEOGCS") {
                    warn!("Slippy map tiles expect a geographic lon/lat source grid");
                }
                TileScheme::SlippyMap(SlippyMap::new(zoom, self.tile_size, *source.transform())?)
            }
            SchemeParams::Meter { pixel_size } => TileScheme::MeterAligned(MeterAligned::new(
                source.extent().clone(),
                self.tile_size,
                pixel_size,
            )?),
        };
        Ok(scheme)
    }
}

impl<'a> Config<'a, TilingCfg> for TilingParams {
    fn from_config(tiling_cfg: &TilingCfg) -> Result<Self, String> {
        if tiling_cfg.tile_size == 0 {
            return Err("Tile size must be positive".to_string());
        }
        Ok(TilingParams {
            tile_size: tiling_cfg.tile_size,
            resampling: tiling_cfg.resampling,
            skip_empty: tiling_cfg.skip_empty,
            scheme: SchemeParams::from_config(&tiling_cfg.scheme)?,
        })
    }
    fn gen_config() -> String {
        let toml = r#"
[tiling]
tile_size = 256
resampling = "bilinear"  # nearest | bilinear
skip_empty = false

[tiling.scheme]
type = "meter"            # raster | slippy | meter
# zoom = 14               # slippy
pixel_size_m = 10.0       # meter
"#;
        toml.to_string()
    }
    fn gen_runtime_config(&self) -> String {
        let scheme = match self.scheme {
            SchemeParams::Raster => "type = \"raster\"\n".to_string(),
            SchemeParams::Slippy { zoom } => format!("type = \"slippy\"\nzoom = {}\n", zoom),
            SchemeParams::Meter { pixel_size } => {
                format!("type = \"meter\"\npixel_size_m = {:?}\n", pixel_size)
            }
        };
        format!(
            "\n[tiling]\ntile_size = {}\nresampling = \"{}\"\nskip_empty = {}\n\n[tiling.scheme]\n{}",
            self.tile_size, self.resampling, self.skip_empty, scheme
        )
    }
}
