//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::TilerError;
use crate::raster::{NumericKind, PixelBuffer, SourceGrid};
use crate::resample::{resample, resample_into, Resampling};
use tile_grid::{AffineTransform, RasterAligned, TileGrid};

const ALL_KINDS: [NumericKind; 7] = [
    NumericKind::U8,
    NumericKind::U16,
    NumericKind::I16,
    NumericKind::U32,
    NumericKind::I32,
    NumericKind::F32,
    NumericKind::F64,
];

fn grid(kind: NumericKind, width: usize, height: usize, values: &[f64]) -> SourceGrid {
    let buffer = PixelBuffer::from_f64_values(kind, width, height, values, Some(-9999.0)).unwrap();
    // 1 unit pixels, upper left corner at (0, height)
    let gt = AffineTransform::north_up(0.0, height as f64, 1.0, -1.0);
    SourceGrid::new(buffer, gt, String::new()).unwrap()
}

#[test]
fn test_bilinear_nodata_propagation() {
    // Sampling the center of a 2x2 patch
    let center = AffineTransform::north_up(0.5, 1.5, 1.0, -1.0);

    let source = grid(NumericKind::F32, 2, 2, &[1.0, 2.0, 3.0, -9999.0]);
    let tile = resample(&source, &center, 1, Resampling::Bilinear).unwrap();
    assert_eq!(tile.value(0, 0), None);
    assert_eq!(tile.nodata(), -9999.0);

    let source = grid(NumericKind::F32, 2, 2, &[1.0, 2.0, 3.0, 4.0]);
    let tile = resample(&source, &center, 1, Resampling::Bilinear).unwrap();
    assert_eq!(tile.value(0, 0), Some(2.5));
}

#[test]
fn test_out_of_bounds_is_nodata() {
    let outside = AffineTransform::north_up(100.0, 100.0, 1.0, -1.0);
    for kind in ALL_KINDS.iter() {
        let source = grid(*kind, 2, 2, &[1.0, 2.0, 3.0, 4.0]);
        for policy in &[Resampling::Nearest, Resampling::Bilinear] {
            let tile = resample(&source, &outside, 4, *policy).unwrap();
            assert_eq!(tile.kind(), *kind);
            assert_eq!(tile.width(), 4);
            assert_eq!(tile.valid_count(), 0, "{} {}", kind, policy);
            assert_eq!(tile.nodata(), kind.default_nodata());
        }
    }
    // Partially outside: left of the grid
    let left = AffineTransform::north_up(-1.0, 2.0, 1.0, -1.0);
    let source = grid(NumericKind::U8, 2, 2, &[1.0, 2.0, 3.0, 4.0]);
    let tile = resample(&source, &left, 2, Resampling::Nearest).unwrap();
    assert_eq!(tile.value(0, 0), None);
    assert_eq!(tile.value(1, 0), Some(1.0));
    assert_eq!(tile.value(1, 1), Some(3.0));
}

#[test]
fn test_nearest_copies_raster_tiles() {
    let values: Vec<f64> = (0..16).map(|v| v as f64).collect();
    let source = grid(NumericKind::I32, 4, 4, &values);
    let scheme = RasterAligned::new(*source.transform(), 4, 4, 2).unwrap();
    let tile = resample(
        &source,
        &scheme.tile_transform(1, 1),
        scheme.tile_size(),
        Resampling::Nearest,
    )
    .unwrap();
    assert_eq!(tile.value(0, 0), Some(10.0));
    assert_eq!(tile.value(1, 0), Some(11.0));
    assert_eq!(tile.value(0, 1), Some(14.0));
    assert_eq!(tile.value(1, 1), Some(15.0));
}

#[test]
fn test_raster_tiles_keep_source_pixels() {
    // Decimetre pixels at Swiss LV95 coordinates do not round trip exactly
    let (width, height) = (300, 200);
    let values: Vec<f64> = (0..width * height)
        .map(|i| ((i % width) + 1000 * (i / width)) as f64)
        .collect();
    let buffer =
        PixelBuffer::from_f64_values(NumericKind::I32, width, height, &values, None).unwrap();
    let gt = AffineTransform::north_up(2600000.1, 1200000.3, 0.1, -0.1);
    let source = SourceGrid::new(buffer, gt, String::new()).unwrap();
    let scheme = RasterAligned::new(gt, width, height, 64).unwrap();
    let ts = scheme.tile_size() as usize;
    let limits = scheme.tile_limits(source.extent()).unwrap();
    assert_eq!((limits.maxx, limits.maxy), (4, 3));
    for policy in &[Resampling::Nearest, Resampling::Bilinear] {
        for ty in 0..=limits.maxy {
            for tx in 0..=limits.maxx {
                let tile = resample(&source, &scheme.tile_transform(tx, ty), 64, *policy).unwrap();
                for row in 0..ts {
                    for col in 0..ts {
                        let (c, r) = (tx as usize * ts + col, ty as usize * ts + row);
                        if c >= width || r >= height {
                            assert_eq!(tile.value(col as i64, row as i64), None);
                            continue;
                        }
                        // bilinear needs the right and lower neighbours
                        if *policy == Resampling::Bilinear && (c + 1 == width || r + 1 == height) {
                            continue;
                        }
                        assert_eq!(
                            tile.value(col as i64, row as i64),
                            source.buffer().value(c as i64, r as i64),
                            "{} tile {}/{} pixel {}/{}",
                            policy,
                            tx,
                            ty,
                            col,
                            row
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_bilinear_weights() {
    let source = grid(NumericKind::I16, 2, 2, &[0.0, 10.0, 20.0, 30.0]);
    let quarter = AffineTransform::north_up(0.25, 1.75, 1.0, -1.0);
    let tile = resample(&source, &quarter, 1, Resampling::Bilinear).unwrap();
    // 10*0.25*0.75 + 20*0.75*0.25 + 30*0.0625 = 7.5, truncated
    assert_eq!(tile.value(0, 0), Some(7.0));

    let source = grid(NumericKind::F64, 2, 2, &[0.0, 10.0, 20.0, 30.0]);
    let tile = resample(&source, &quarter, 1, Resampling::Bilinear).unwrap();
    assert_eq!(tile.value(0, 0), Some(7.5));
}

#[test]
fn test_nan_is_nodata() {
    let source = grid(NumericKind::F64, 2, 2, &[f64::NAN, 1.0, 1.0, 1.0]);
    let center = AffineTransform::north_up(0.5, 1.5, 1.0, -1.0);
    let tile = resample(&source, &center, 1, Resampling::Bilinear).unwrap();
    assert_eq!(tile.value(0, 0), None);
    let ul = AffineTransform::north_up(0.0, 2.0, 1.0, -1.0);
    let tile = resample(&source, &ul, 1, Resampling::Nearest).unwrap();
    assert_eq!(tile.value(0, 0), None);
}

#[test]
fn test_kind_mismatch() {
    let source = grid(NumericKind::F32, 2, 2, &[1.0, 2.0, 3.0, 4.0]);
    let mut target = PixelBuffer::new_filled(NumericKind::U8, 2, 2, None);
    let gt = AffineTransform::north_up(0.0, 2.0, 1.0, -1.0);
    match resample_into(&source, &gt, Resampling::Nearest, &mut target) {
        Err(TilerError::KindMismatch { expected, found }) => {
            assert_eq!(expected, NumericKind::F32);
            assert_eq!(found, NumericKind::U8);
        }
        other => panic!("unexpected {:?}", other),
    }
    // untouched
    assert_eq!(target.valid_count(), 0);
}

#[test]
fn test_parse_resampling() {
    assert_eq!("NN".parse::<Resampling>().unwrap(), Resampling::Nearest);
    assert_eq!("bilinear".parse::<Resampling>().unwrap(), Resampling::Bilinear);
    assert!("cubic".parse::<Resampling>().is_err());
}
