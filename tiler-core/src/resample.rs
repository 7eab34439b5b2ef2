//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Nodata aware resampling of source grids into tiles

use crate::error::TilerError;
use crate::raster::{PixelBuffer, Raster, Sample, SourceGrid};
use std::fmt;
use std::str::FromStr;
use tile_grid::AffineTransform;

#[derive(Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Resampling {
    Nearest,
    Bilinear,
}

impl Default for Resampling {
    fn default() -> Self {
        Resampling::Bilinear
    }
}

impl fmt::Display for Resampling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Resampling::Nearest => f.write_str("nearest"),
            Resampling::Bilinear => f.write_str("bilinear"),
        }
    }
}

impl FromStr for Resampling {
    type Err = TilerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest" | "nn" => Ok(Resampling::Nearest),
            "bilinear" => Ok(Resampling::Bilinear),
            _ => Err(TilerError::Config(format!(
                "Unknown resampling method '{}'",
                s
            ))),
        }
    }
}

/// Resample `source` into a new `tile_size` x `tile_size` buffer placed by `transform`
pub fn resample(
    source: &SourceGrid,
    transform: &AffineTransform,
    tile_size: u32,
    policy: Resampling,
) -> Result<PixelBuffer, TilerError> {
    let ts = tile_size as usize;
    let mut target = source.buffer().empty_like(ts, ts);
    resample_into(source, transform, policy, &mut target)?;
    Ok(target)
}

/// Resample `source` into an existing buffer of the same sample type
pub fn resample_into(
    source: &SourceGrid,
    transform: &AffineTransform,
    policy: Resampling,
    target: &mut PixelBuffer,
) -> Result<(), TilerError> {
    let src_transform = source.transform();
    // Fail before touching any pixel
    src_transform.check_axis_aligned()?;
    let expected = source.kind();
    let found = target.kind();
    dispatch_pair!(source.buffer(), target, src, dst => {
        fill(src, src_transform, transform, policy, dst);
        Ok(())
    }, _ => Err(TilerError::KindMismatch { expected, found }))
}

fn fill<T: Sample>(
    src: &Raster<T>,
    src_transform: &AffineTransform,
    transform: &AffineTransform,
    policy: Resampling,
    dst: &mut Raster<T>,
) {
    let width = dst.width();
    let nodata = dst.nodata();
    for (idx, px) in dst.data_mut().iter_mut().enumerate() {
        let i = (idx % width) as f64;
        let j = (idx / width) as f64;
        let (x, y) = transform.pixel_to_crs(i, j);
        *px = match src_transform.crs_to_pixel(x, y) {
            Ok((sx, sy)) => match policy {
                Resampling::Nearest => sample_nearest(src, sx, sy),
                Resampling::Bilinear => sample_bilinear(src, sx, sy),
            },
            Err(_) => None,
        }
        .unwrap_or(nodata);
    }
}

// Source positions closer than this to a pixel corner are snapped onto it
const SNAP_EPSILON: f64 = 0.000001;

/// Remove round-off of the CRS round trip, e.g. 299.99999999 -> 300
fn snap(v: f64) -> f64 {
    let r = v.round();
    if (v - r).abs() < SNAP_EPSILON {
        r
    } else {
        v
    }
}

/// Sample at the pixel containing `(sx, sy)`
pub fn sample_nearest<T: Sample>(src: &Raster<T>, sx: f64, sy: f64) -> Option<T> {
    if !sx.is_finite() || !sy.is_finite() {
        return None;
    }
    let (sx, sy) = (snap(sx), snap(sy));
    src.get(sx.floor() as i64, sy.floor() as i64)
        .filter(|v| !src.is_nodata(*v))
}

/// Weighted mean of the four pixels around `(sx, sy)`.
/// `None` if any of them is outside or nodata.
pub fn sample_bilinear<T: Sample>(src: &Raster<T>, sx: f64, sy: f64) -> Option<T> {
    if !sx.is_finite() || !sy.is_finite() {
        return None;
    }
    let (sx, sy) = (snap(sx), snap(sy));
    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = sx - x0;
    let fy = sy - y0;
    let (c, r) = (x0 as i64, y0 as i64);
    let tap = |dc: i64, dr: i64| {
        src.get(c.saturating_add(dc), r.saturating_add(dr))
            .filter(|v| !src.is_nodata(*v))
            .map(|v| v.to_f64())
    };
    let ul = tap(0, 0)?;
    let ur = tap(1, 0)?;
    let ll = tap(0, 1)?;
    let lr = tap(1, 1)?;
    let value = ul * (1.0 - fx) * (1.0 - fy)
        + ur * fx * (1.0 - fy)
        + ll * (1.0 - fx) * fy
        + lr * fx * fy;
    Some(T::from_f64(value))
}
