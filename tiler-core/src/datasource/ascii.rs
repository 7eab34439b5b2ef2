//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! ESRI ASCII grid reader

use crate::core::config::SourceCfg;
use crate::core::Config;
use crate::datasource::RasterSource;
use crate::error::TilerError;
use crate::raster::{NumericKind, PixelBuffer, SourceGrid};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tile_grid::AffineTransform;

#[derive(Clone, Default, Debug)]
pub struct AsciiGridSource {
    /// Overrides `NODATA_value` of the file
    pub nodata: Option<f64>,
    /// Sample type. Inferred from the values if missing.
    pub kind: Option<NumericKind>,
}

const HEADER_KEYS: [&str; 9] = [
    "ncols",
    "nrows",
    "xllcorner",
    "yllcorner",
    "xllcenter",
    "yllcenter",
    "cellsize",
    "dx",
    "dy",
];

#[derive(Debug)]
struct Header {
    ncols: usize,
    nrows: usize,
    transform: AffineTransform,
    nodata: Option<f64>,
}

fn format_err(path: &Path, msg: &str) -> TilerError {
    TilerError::UnsupportedFormat(format!("{}: {}", path.display(), msg))
}

impl AsciiGridSource {
    /// Parse grid from file content
    pub fn parse(&self, content: &str, path: &Path) -> Result<(PixelBuffer, AffineTransform), TilerError> {
        let mut tokens = content.split_ascii_whitespace().peekable();
        let mut values = HashMap::new();
        while let Some(key) = tokens.peek() {
            let key = key.to_lowercase();
            if !HEADER_KEYS.contains(&key.as_str()) && key != "nodata_value" {
                break;
            }
            tokens.next();
            let value = tokens
                .next()
                .and_then(|v| v.parse::<f64>().ok())
                .ok_or_else(|| format_err(path, &format!("invalid value for {}", key)))?;
            values.insert(key, value);
        }
        let header = Header::from_values(&values).map_err(|e| format_err(path, &e))?;

        let data: Vec<&str> = tokens.collect();
        let expected = header.ncols.checked_mul(header.nrows).ok_or_else(|| {
            format_err(
                path,
                &format!("grid size {} x {} too large", header.ncols, header.nrows),
            )
        })?;
        if data.len() != expected {
            return Err(format_err(
                path,
                &format!(
                    "expected {} x {} values, found {}",
                    header.ncols,
                    header.nrows,
                    data.len()
                ),
            ));
        }
        let samples = data
            .iter()
            .map(|v| v.parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|e| format_err(path, &e.to_string()))?;
        let kind = match self.kind {
            Some(kind) => kind,
            None => infer_kind(&data, &samples),
        };
        let nodata = self.nodata.or(header.nodata);
        let buffer =
            PixelBuffer::from_f64_values(kind, header.ncols, header.nrows, &samples, nodata)?;
        Ok((buffer, header.transform))
    }
}

/// I32 for integer grids within i32 range, F64 for larger integers, F32 otherwise
fn infer_kind(tokens: &[&str], samples: &[f64]) -> NumericKind {
    let integers = tokens
        .iter()
        .all(|v| v.bytes().all(|b| b.is_ascii_digit() || b == b'-' || b == b'+'));
    if !integers {
        NumericKind::F32
    } else if samples
        .iter()
        .all(|v| *v >= i32::MIN as f64 && *v <= i32::MAX as f64)
    {
        NumericKind::I32
    } else {
        debug!("integer values exceed i32, reading grid as f64");
        NumericKind::F64
    }
}

impl Header {
    fn from_values(values: &HashMap<String, f64>) -> Result<Header, String> {
        let get = |key: &str| {
            values
                .get(key)
                .copied()
                .ok_or_else(|| format!("missing header {}", key))
        };
        let ncols = get("ncols")?;
        let nrows = get("nrows")?;
        if !(ncols >= 1.0 && nrows >= 1.0) || ncols.fract() != 0.0 || nrows.fract() != 0.0 {
            return Err(format!("invalid grid size {} x {}", ncols, nrows));
        }
        let (dx, dy) = match values.get("cellsize") {
            Some(cs) => (*cs, *cs),
            None => (get("dx")?, get("dy")?),
        };
        let (xll, yll) = match (values.get("xllcorner"), values.get("yllcorner")) {
            (Some(x), Some(y)) => (*x, *y),
            _ => (get("xllcenter")? - dx / 2.0, get("yllcenter")? - dy / 2.0),
        };
        Ok(Header {
            ncols: ncols as usize,
            nrows: nrows as usize,
            transform: AffineTransform::north_up(xll, yll + nrows * dy, dx, -dy),
            nodata: values.get("nodata_value").copied(),
        })
    }
}

impl RasterSource for AsciiGridSource {
    fn info(&self) -> String {
        "ESRI ASCII grid".to_string()
    }
    fn open(&self, path: &Path) -> Result<SourceGrid, TilerError> {
        info!("Reading ASCII grid {}", path.display());
        let content = fs::read_to_string(path)?;
        let (buffer, transform) = self.parse(&content, path)?;
        let projection = fs::read_to_string(path.with_extension("prj")).unwrap_or_default();
        debug!(
            "{} x {} {} grid, nodata {}",
            buffer.width(),
            buffer.height(),
            buffer.kind(),
            buffer.nodata()
        );
        SourceGrid::new(buffer, transform, projection.trim().to_string())
    }
}

impl<'a> Config<'a, SourceCfg> for AsciiGridSource {
    fn from_config(source_cfg: &SourceCfg) -> Result<Self, String> {
        let kind = match source_cfg.kind {
            Some(ref name) => Some(name.parse::<NumericKind>().map_err(|e| e.to_string())?),
            None => None,
        };
        Ok(AsciiGridSource {
            nodata: source_cfg.nodata,
            kind,
        })
    }
    fn gen_config() -> String {
        let toml = r#"
[source]
path = "dem.asc"
# format = "auto"      # auto | ascii | gdal
# nodata = -9999.0     # overrides the nodata value of the source
# kind = "f32"         # ASCII grids only: u8 | u16 | i16 | u32 | i32 | f32 | f64
"#;
        toml.to_string()
    }
}
