//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

/// Run `$body` with `$raster` bound to the typed raster of a `PixelBuffer`
macro_rules! dispatch {
    ($buffer:expr, $raster:ident => $body:expr) => {
        match $buffer {
            $crate::raster::PixelBuffer::U8($raster) => $body,
            $crate::raster::PixelBuffer::U16($raster) => $body,
            $crate::raster::PixelBuffer::I16($raster) => $body,
            $crate::raster::PixelBuffer::U32($raster) => $body,
            $crate::raster::PixelBuffer::I32($raster) => $body,
            $crate::raster::PixelBuffer::F32($raster) => $body,
            $crate::raster::PixelBuffer::F64($raster) => $body,
        }
    };
}

/// Like `dispatch!` for two buffers of the same kind, `$mismatch` otherwise
macro_rules! dispatch_pair {
    ($a:expr, $b:expr, $ra:ident, $rb:ident => $body:expr, _ => $mismatch:expr) => {
        match ($a, $b) {
            ($crate::raster::PixelBuffer::U8($ra), $crate::raster::PixelBuffer::U8($rb)) => $body,
            ($crate::raster::PixelBuffer::U16($ra), $crate::raster::PixelBuffer::U16($rb)) => $body,
            ($crate::raster::PixelBuffer::I16($ra), $crate::raster::PixelBuffer::I16($rb)) => $body,
            ($crate::raster::PixelBuffer::U32($ra), $crate::raster::PixelBuffer::U32($rb)) => $body,
            ($crate::raster::PixelBuffer::I32($ra), $crate::raster::PixelBuffer::I32($rb)) => $body,
            ($crate::raster::PixelBuffer::F32($ra), $crate::raster::PixelBuffer::F32($rb)) => $body,
            ($crate::raster::PixelBuffer::F64($ra), $crate::raster::PixelBuffer::F64($rb)) => $body,
            _ => $mismatch,
        }
    };
}

mod buffer;
mod grid;
mod kind;
mod tile;


pub use self::buffer::{PixelBuffer, Raster};
pub use self::grid::SourceGrid;
pub use self::kind::{NumericKind, Sample};
pub use self::tile::Tile;
