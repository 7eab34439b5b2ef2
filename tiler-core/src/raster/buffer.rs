//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::TilerError;
use crate::raster::kind::{NumericKind, Sample};

/// Row-major single band raster with nodata sentinel
#[derive(PartialEq, Clone, Debug)]
pub struct Raster<T: Sample> {
    width: usize,
    height: usize,
    data: Vec<T>,
    nodata: T,
}

impl<T: Sample> Raster<T> {
    pub fn new_filled(width: usize, height: usize, nodata: T) -> Raster<T> {
        Raster {
            width,
            height,
            data: vec![nodata; width * height],
            nodata,
        }
    }
    pub fn from_vec(
        width: usize,
        height: usize,
        data: Vec<T>,
        nodata: T,
    ) -> Result<Raster<T>, TilerError> {
        if data.len() != width * height {
            return Err(TilerError::BufferSize {
                len: data.len(),
                width,
                height,
            });
        }
        Ok(Raster {
            width,
            height,
            data,
            nodata,
        })
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn nodata(&self) -> T {
        self.nodata
    }
    pub fn data(&self) -> &[T] {
        &self.data
    }
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
    /// Sample at `(col, row)`, `None` outside of the raster
    pub fn get(&self, col: i64, row: i64) -> Option<T> {
        if col < 0 || row < 0 || col as u64 >= self.width as u64 || row as u64 >= self.height as u64
        {
            return None;
        }
        self.data
            .get(row as usize * self.width + col as usize)
            .copied()
    }
    /// Set sample at `(col, row)`. Returns false outside of the raster.
    pub fn set(&mut self, col: usize, row: usize, value: T) -> bool {
        if col >= self.width || row >= self.height {
            return false;
        }
        match self.data.get_mut(row * self.width + col) {
            Some(px) => {
                *px = value;
                true
            }
            None => false,
        }
    }
    pub fn is_nodata(&self, value: T) -> bool {
        value.is_nodata(self.nodata)
    }
    /// Number of samples which are not nodata
    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|v| !self.is_nodata(**v)).count()
    }
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * T::KIND.size());
        for v in &self.data {
            v.write_le(&mut out);
        }
        out
    }
    /// Sentinel for a declared nodata value
    fn resolve_nodata(declared: Option<f64>) -> T {
        let nodata = T::nodata_or_default(declared);
        if let Some(value) = declared {
            if T::nodata_from_f64(value).is_none() {
                warn!(
                    "nodata {} not representable as {}, using {}",
                    value,
                    T::KIND,
                    nodata.to_f64()
                );
            }
        }
        nodata
    }
    /// Raster of decoded samples with the nodata value declared by the source.
    /// Samples equal to the declared value become the sentinel.
    pub fn with_declared_nodata(
        width: usize,
        height: usize,
        data: Vec<T>,
        declared: Option<f64>,
    ) -> Result<Raster<T>, TilerError> {
        let nodata = Raster::<T>::resolve_nodata(declared);
        let data = match declared {
            Some(value) => data
                .into_iter()
                .map(|v| if v.to_f64() == value { nodata } else { v })
                .collect(),
            None => data,
        };
        Raster::from_vec(width, height, data, nodata)
    }
    /// Convert `f64` values, mapping the declared nodata and NaN to the sentinel
    fn from_f64_values(
        width: usize,
        height: usize,
        values: &[f64],
        declared: Option<f64>,
    ) -> Result<Raster<T>, TilerError> {
        let nodata = Raster::<T>::resolve_nodata(declared);
        let data = values
            .iter()
            .map(|v| {
                if v.is_nan() || Some(*v) == declared {
                    nodata
                } else {
                    T::from_f64(*v)
                }
            })
            .collect();
        Raster::from_vec(width, height, data, nodata)
    }
}

/// Raster buffer tagged with its sample type
#[derive(PartialEq, Clone, Debug)]
pub enum PixelBuffer {
    U8(Raster<u8>),
    U16(Raster<u16>),
    I16(Raster<i16>),
    U32(Raster<u32>),
    I32(Raster<i32>),
    F32(Raster<f32>),
    F64(Raster<f64>),
}

macro_rules! from_raster {
    ($t:ty, $variant:ident) => {
        impl From<Raster<$t>> for PixelBuffer {
            fn from(raster: Raster<$t>) -> PixelBuffer {
                PixelBuffer::$variant(raster)
            }
        }
    };
}

from_raster!(u8, U8);
from_raster!(u16, U16);
from_raster!(i16, I16);
from_raster!(u32, U32);
from_raster!(i32, I32);
from_raster!(f32, F32);
from_raster!(f64, F64);

impl PixelBuffer {
    /// Buffer filled with the nodata value of `kind`
    pub fn new_filled(
        kind: NumericKind,
        width: usize,
        height: usize,
        nodata: Option<f64>,
    ) -> PixelBuffer {
        match kind {
            NumericKind::U8 => Raster::new_filled(width, height, u8::nodata_or_default(nodata)).into(),
            NumericKind::U16 => {
                Raster::new_filled(width, height, u16::nodata_or_default(nodata)).into()
            }
            NumericKind::I16 => {
                Raster::new_filled(width, height, i16::nodata_or_default(nodata)).into()
            }
            NumericKind::U32 => {
                Raster::new_filled(width, height, u32::nodata_or_default(nodata)).into()
            }
            NumericKind::I32 => {
                Raster::new_filled(width, height, i32::nodata_or_default(nodata)).into()
            }
            NumericKind::F32 => {
                Raster::new_filled(width, height, f32::nodata_or_default(nodata)).into()
            }
            NumericKind::F64 => {
                Raster::new_filled(width, height, f64::nodata_or_default(nodata)).into()
            }
        }
    }
    /// Buffer of `kind` from decoded values. `declared` nodata and NaN become the sentinel.
    pub fn from_f64_values(
        kind: NumericKind,
        width: usize,
        height: usize,
        values: &[f64],
        declared: Option<f64>,
    ) -> Result<PixelBuffer, TilerError> {
        Ok(match kind {
            NumericKind::U8 => Raster::<u8>::from_f64_values(width, height, values, declared)?.into(),
            NumericKind::U16 => {
                Raster::<u16>::from_f64_values(width, height, values, declared)?.into()
            }
            NumericKind::I16 => {
                Raster::<i16>::from_f64_values(width, height, values, declared)?.into()
            }
            NumericKind::U32 => {
                Raster::<u32>::from_f64_values(width, height, values, declared)?.into()
            }
            NumericKind::I32 => {
                Raster::<i32>::from_f64_values(width, height, values, declared)?.into()
            }
            NumericKind::F32 => {
                Raster::<f32>::from_f64_values(width, height, values, declared)?.into()
            }
            NumericKind::F64 => {
                Raster::<f64>::from_f64_values(width, height, values, declared)?.into()
            }
        })
    }
    pub fn kind(&self) -> NumericKind {
        match self {
            PixelBuffer::U8(_) => NumericKind::U8,
            PixelBuffer::U16(_) => NumericKind::U16,
            PixelBuffer::I16(_) => NumericKind::I16,
            PixelBuffer::U32(_) => NumericKind::U32,
            PixelBuffer::I32(_) => NumericKind::I32,
            PixelBuffer::F32(_) => NumericKind::F32,
            PixelBuffer::F64(_) => NumericKind::F64,
        }
    }
    pub fn width(&self) -> usize {
        dispatch!(self, r => r.width())
    }
    pub fn height(&self) -> usize {
        dispatch!(self, r => r.height())
    }
    pub fn nodata(&self) -> f64 {
        dispatch!(self, r => r.nodata().to_f64())
    }
    /// Sample value, `None` outside of the raster or for nodata
    pub fn value(&self, col: i64, row: i64) -> Option<f64> {
        dispatch!(self, r => r.get(col, row).filter(|v| !r.is_nodata(*v)).map(|v| v.to_f64()))
    }
    /// Nodata filled buffer of the same kind and nodata value
    pub fn empty_like(&self, width: usize, height: usize) -> PixelBuffer {
        dispatch!(self, r => Raster::new_filled(width, height, r.nodata()).into())
    }
    pub fn valid_count(&self) -> usize {
        dispatch!(self, r => r.valid_count())
    }
    /// Samples as little-endian bytes, row by row
    pub fn to_le_bytes(&self) -> Vec<u8> {
        dispatch!(self, r => r.to_le_bytes())
    }
}
