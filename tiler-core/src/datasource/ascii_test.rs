//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::datasource::{AsciiGridSource, RasterSource};
use crate::error::TilerError;
use crate::raster::NumericKind;
use std::env;
use std::fs;
use std::path::Path;
use tile_grid::{AffineTransform, Extent};

const GRID: &str = "ncols 3
nrows 2
xllcorner 1000.0
yllcorner 2000.0
cellsize 10
NODATA_value -9999
1 2 3
4 -9999 6
";

#[test]
fn test_parse_int_grid() {
    let source = AsciiGridSource::default();
    let (buffer, gt) = source.parse(GRID, Path::new("test.asc")).unwrap();
    assert_eq!(buffer.kind(), NumericKind::I32);
    assert_eq!((buffer.width(), buffer.height()), (3, 2));
    assert_eq!(gt, AffineTransform::north_up(1000.0, 2020.0, 10.0, -10.0));
    assert_eq!(buffer.value(0, 0), Some(1.0));
    assert_eq!(buffer.value(2, 1), Some(6.0));
    assert_eq!(buffer.value(1, 1), None);
    assert_eq!(buffer.nodata(), -9999.0);
}

#[test]
fn test_parse_float_center() {
    let grid = "NCOLS 2\nNROWS 2\nXLLCENTER 5\nYLLCENTER 5\nCELLSIZE 10\n0.5 1.5\n2.5 nan\n";
    let source = AsciiGridSource::default();
    let (buffer, gt) = source.parse(grid, Path::new("test.asc")).unwrap();
    assert_eq!(buffer.kind(), NumericKind::F32);
    assert_eq!(gt, AffineTransform::north_up(0.0, 20.0, 10.0, -10.0));
    assert_eq!(buffer.value(1, 0), Some(1.5));
    assert_eq!(buffer.value(1, 1), None);
}

#[test]
fn test_kind_and_nodata_override() {
    let source = AsciiGridSource {
        nodata: Some(6.0),
        kind: Some(NumericKind::U8),
    };
    let (buffer, _) = source.parse(GRID, Path::new("test.asc")).unwrap();
    assert_eq!(buffer.kind(), NumericKind::U8);
    assert_eq!(buffer.nodata(), 6.0);
    assert_eq!(buffer.value(2, 1), None);
    // -9999 saturates to 0
    assert_eq!(buffer.value(1, 1), Some(0.0));
}

#[test]
fn test_invalid_grids() {
    let source = AsciiGridSource::default();
    let missing = "ncols 2\nnrows 2\ncellsize 1\n1 2 3 4\n";
    match source.parse(missing, Path::new("missing.asc")) {
        Err(TilerError::UnsupportedFormat(msg)) => assert!(msg.contains("xllcenter"), "{}", msg),
        other => panic!("unexpected {:?}", other),
    }
    let short = "ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 1\n1 2 3\n";
    match source.parse(short, Path::new("short.asc")) {
        Err(TilerError::UnsupportedFormat(msg)) => {
            assert_eq!(msg, "short.asc: expected 2 x 2 values, found 3")
        }
        other => panic!("unexpected {:?}", other),
    }
    let huge = "ncols 10000000000\nnrows 10000000000\nxllcorner 0\nyllcorner 0\ncellsize 1\n1\n";
    match source.parse(huge, Path::new("huge.asc")) {
        Err(TilerError::UnsupportedFormat(msg)) => {
            assert_eq!(msg, "huge.asc: grid size 10000000000 x 10000000000 too large")
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_large_integers() {
    let grid = "ncols 2\nnrows 1\nxllcorner 0\nyllcorner 0\ncellsize 1\n3000000000 -7\n";
    let source = AsciiGridSource::default();
    let (buffer, _) = source.parse(grid, Path::new("large.asc")).unwrap();
    assert_eq!(buffer.kind(), NumericKind::F64);
    assert_eq!(buffer.value(0, 0), Some(3000000000.0));
    assert_eq!(buffer.value(1, 0), Some(-7.0));
}

#[test]
fn test_open_file() {
    let mut dir = env::temp_dir();
    dir.push("hfz_tiler_ascii_test");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("dem.asc");
    fs::write(&path, GRID).unwrap();
    fs::write(dir.join("dem.prj"), "LOCAL_CS[\"test\"]\n").unwrap();

    let grid = AsciiGridSource::default().open(&path).unwrap();
    assert_eq!(grid.projection(), "LOCAL_CS[\"test\"]");
    assert_eq!(
        grid.extent(),
        &Extent {
            minx: 1000.0,
            miny: 2000.0,
            maxx: 1030.0,
            maxy: 2020.0,
        }
    );

    match AsciiGridSource::default().open(&dir.join("nothing.asc")) {
        Err(TilerError::Io(_)) => {}
        other => panic!("unexpected {:?}", other),
    }
}
