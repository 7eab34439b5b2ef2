//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Sample types

use crate::error::TilerError;
use std::fmt;
use std::str::FromStr;

/// Sample type of a single band raster
#[derive(Serialize, PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum NumericKind {
    U8,
    U16,
    I16,
    U32,
    I32,
    F32,
    F64,
}

impl NumericKind {
    pub fn name(&self) -> &'static str {
        match self {
            NumericKind::U8 => "u8",
            NumericKind::U16 => "u16",
            NumericKind::I16 => "i16",
            NumericKind::U32 => "u32",
            NumericKind::I32 => "i32",
            NumericKind::F32 => "f32",
            NumericKind::F64 => "f64",
        }
    }
    /// Bytes per sample
    pub fn size(&self) -> usize {
        match self {
            NumericKind::U8 => 1,
            NumericKind::U16 | NumericKind::I16 => 2,
            NumericKind::U32 | NumericKind::I32 | NumericKind::F32 => 4,
            NumericKind::F64 => 8,
        }
    }
    pub fn is_float(&self) -> bool {
        *self == NumericKind::F32 || *self == NumericKind::F64
    }
    /// Default nodata sentinel
    pub fn default_nodata(&self) -> f64 {
        match self {
            NumericKind::U8 => u8::default_nodata().to_f64(),
            NumericKind::U16 => u16::default_nodata().to_f64(),
            NumericKind::I16 => i16::default_nodata().to_f64(),
            NumericKind::U32 => u32::default_nodata().to_f64(),
            NumericKind::I32 => i32::default_nodata().to_f64(),
            NumericKind::F32 => f32::default_nodata().to_f64(),
            NumericKind::F64 => f64::default_nodata().to_f64(),
        }
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumericKind {
    type Err = TilerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "u8" | "byte" => Ok(NumericKind::U8),
            "u16" | "uint16" => Ok(NumericKind::U16),
            "i16" | "int16" => Ok(NumericKind::I16),
            "u32" | "uint32" => Ok(NumericKind::U32),
            "i32" | "int32" => Ok(NumericKind::I32),
            "f32" | "float32" => Ok(NumericKind::F32),
            "f64" | "float64" => Ok(NumericKind::F64),
            _ => Err(TilerError::UnsupportedDataType(s.to_string())),
        }
    }
}

/// Scalar sample stored in a raster buffer
pub trait Sample: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    const KIND: NumericKind;
    /// Sentinel used when no nodata value is declared
    fn default_nodata() -> Self;
    fn to_f64(self) -> f64;
    /// Saturating and truncating conversion
    fn from_f64(value: f64) -> Self;
    fn is_nodata(self, nodata: Self) -> bool {
        self == nodata
    }
    fn write_le(self, out: &mut Vec<u8>);
    /// Conversion without loss, if possible
    fn from_f64_exact(value: f64) -> Option<Self> {
        let sample = Self::from_f64(value);
        if sample.to_f64() == value {
            Some(sample)
        } else {
            None
        }
    }
    /// Sentinel for a declared nodata value, `None` if the kind cannot hold it
    fn nodata_from_f64(value: f64) -> Option<Self> {
        Self::from_f64_exact(value)
    }
    /// Declared nodata value if representable, default sentinel otherwise
    fn nodata_or_default(declared: Option<f64>) -> Self {
        declared
            .and_then(Self::nodata_from_f64)
            .unwrap_or_else(Self::default_nodata)
    }
}

macro_rules! int_sample {
    ($t:ty, $kind:ident, $nodata:expr) => {
        impl Sample for $t {
            const KIND: NumericKind = NumericKind::$kind;
            fn default_nodata() -> Self {
                $nodata
            }
            fn to_f64(self) -> f64 {
                self as f64
            }
            fn from_f64(value: f64) -> Self {
                // `as` saturates at the type bounds and maps NaN to 0
                value as $t
            }
            fn write_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }
        }
    };
}

macro_rules! float_sample {
    ($t:ty, $kind:ident) => {
        impl Sample for $t {
            const KIND: NumericKind = NumericKind::$kind;
            fn default_nodata() -> Self {
                -9999.0
            }
            fn to_f64(self) -> f64 {
                self as f64
            }
            fn from_f64(value: f64) -> Self {
                value as $t
            }
            fn is_nodata(self, nodata: Self) -> bool {
                self == nodata || self.is_nan()
            }
            // f32 nodata like -3.4e38 is declared as the nearest f64
            fn nodata_from_f64(value: f64) -> Option<Self> {
                if value.is_nan() {
                    None
                } else {
                    Some(value as $t)
                }
            }
            fn write_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }
        }
    };
}

int_sample!(u8, U8, u8::MAX);
int_sample!(u16, U16, u16::MAX);
int_sample!(i16, I16, -9999);
int_sample!(u32, U32, u32::MAX);
int_sample!(i32, I32, -9999);
float_sample!(f32, F32);
float_sample!(f64, F64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!("Float32".parse::<NumericKind>().unwrap(), NumericKind::F32);
        assert_eq!("byte".parse::<NumericKind>().unwrap(), NumericKind::U8);
        assert_eq!(NumericKind::I16.to_string(), "i16");
        assert_eq!(NumericKind::F64.size(), 8);
        match "CInt16".parse::<NumericKind>() {
            Err(TilerError::UnsupportedDataType(name)) => assert_eq!(name, "CInt16"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_saturating_cast() {
        assert_eq!(u8::from_f64(300.7), 255);
        assert_eq!(u8::from_f64(-3.0), 0);
        assert_eq!(i16::from_f64(1234.9), 1234);
        assert_eq!(i16::from_f64(-1234.9), -1234);
        assert_eq!(u32::from_f64(f64::NAN), 0);
        assert_eq!(f32::from_f64(0.5), 0.5);
    }

    #[test]
    fn test_nodata_sentinels() {
        assert_eq!(NumericKind::U8.default_nodata(), 255.0);
        assert_eq!(NumericKind::U16.default_nodata(), 65535.0);
        assert_eq!(NumericKind::U32.default_nodata(), 4294967295.0);
        assert_eq!(NumericKind::I16.default_nodata(), -9999.0);
        assert_eq!(NumericKind::F32.default_nodata(), -9999.0);
        // -9999 does not fit into unsigned types
        assert_eq!(u16::nodata_or_default(Some(-9999.0)), u16::MAX);
        assert_eq!(u16::nodata_or_default(Some(0.0)), 0);
        assert_eq!(i16::nodata_or_default(Some(-32768.0)), -32768);
        assert_eq!(f32::nodata_or_default(Some(0.1)), f32::default_nodata());
        assert_eq!(f64::nodata_or_default(None), -9999.0);
        assert!(f32::NAN.is_nodata(-9999.0));
    }
}
