//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::TilerError;
use crate::orchestrator::{render_tile, run, RunOptions};
use crate::raster::{NumericKind, PixelBuffer, SourceGrid, Tile};
use crate::resample::Resampling;
use crate::sink::{Nosink, TileSink, TilesetMetadata};
use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::Mutex;
use tile_grid::{AffineTransform, Extent, MeterAligned, TileAddress, TileScheme};

fn source() -> SourceGrid {
    let values = [
        1.0, 2.0, 3.0, 4.0, //
        5.0, 6.0, 7.0, 8.0, //
        9.0, 10.0, -9999.0, -9999.0, //
        13.0, 14.0, -9999.0, -9999.0,
    ];
    let buffer =
        PixelBuffer::from_f64_values(NumericKind::I16, 4, 4, &values, Some(-9999.0)).unwrap();
    let gt = AffineTransform::north_up(0.0, 40.0, 10.0, -10.0);
    SourceGrid::new(buffer, gt, String::new()).unwrap()
}

fn meter_scheme(source: &SourceGrid) -> TileScheme {
    TileScheme::MeterAligned(MeterAligned::new(source.extent().clone(), 2, 10.0).unwrap())
}

/// Records written tiles, fails for column `fail_x`
struct RecordingSink {
    fail_x: Option<u32>,
    written: Mutex<Vec<(String, TileAddress, usize)>>,
    metadata: Mutex<Option<TilesetMetadata>>,
}

impl RecordingSink {
    fn new(fail_x: Option<u32>) -> RecordingSink {
        RecordingSink {
            fail_x,
            written: Mutex::new(Vec::new()),
            metadata: Mutex::new(None),
        }
    }
}

impl TileSink for RecordingSink {
    fn info(&self) -> String {
        "recording sink".to_string()
    }
    fn init(&self, metadata: &TilesetMetadata) -> Result<(), TilerError> {
        *self.metadata.lock().unwrap() = Some(metadata.clone());
        Ok(())
    }
    fn exists(&self, _scheme_id: &str, _address: &TileAddress) -> bool {
        false
    }
    fn write(&self, scheme_id: &str, tile: &Tile, _projection: &str) -> Result<(), TilerError> {
        if Some(tile.address.x) == self.fail_x {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into());
        }
        self.written.lock().unwrap().push((
            scheme_id.to_string(),
            tile.address,
            tile.buffer.valid_count(),
        ));
        Ok(())
    }
}

#[test]
fn test_render_meter_tile() {
    let source = source();
    let scheme = meter_scheme(&source);
    // rows count upwards: tile 0/0 is the lower left quarter
    let tile = render_tile(&source, &scheme, Resampling::Nearest, 0, 0).unwrap();
    assert_eq!(tile.address, TileAddress { x: 0, y: 0 });
    assert_eq!(
        tile.extent,
        Extent {
            minx: 0.0,
            miny: 0.0,
            maxx: 20.0,
            maxy: 20.0,
        }
    );
    assert_eq!(tile.buffer.value(0, 0), Some(9.0));
    assert_eq!(tile.buffer.value(1, 0), Some(10.0));
    assert_eq!(tile.buffer.value(0, 1), Some(13.0));
    assert_eq!(tile.buffer.value(1, 1), Some(14.0));

    let tile = render_tile(&source, &scheme, Resampling::Nearest, 1, 0).unwrap();
    assert!(tile.is_empty());
}

#[test]
fn test_run_skip_empty() {
    let source = source();
    let scheme = meter_scheme(&source);
    let sink = RecordingSink::new(None);
    let options = RunOptions {
        skip_empty: true,
        cancel: None,
    };
    let mut progress = Vec::new();
    let summary = run(&source, &scheme, Resampling::Nearest, &sink, &options, |n, total| {
        progress.push((n, total))
    })
    .unwrap();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.written, 3);
    assert_eq!(summary.skipped, 1);
    assert!(summary.failed.is_empty());
    assert_eq!(progress, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
    let written = sink.written.lock().unwrap();
    let addresses: Vec<(u32, u32)> = written.iter().map(|(_, a, _)| (a.x, a.y)).collect();
    assert_eq!(addresses, vec![(0, 0), (0, 1), (1, 1)]);
    assert!(written.iter().all(|(id, _, valid)| id == "meter" && *valid == 4));
    assert_eq!(summary.stats.results("valid_pixels.meter").count, 4);
    assert_eq!(summary.stats.results("tile_ms.meter").count, 4);

    let metadata = sink.metadata.lock().unwrap().clone().unwrap();
    assert_eq!(metadata.scheme, "meter");
    assert_eq!(metadata.kind, NumericKind::I16);
    assert_eq!(metadata.limits, Some([0, 0, 1, 1]));
}

#[test]
fn test_run_collects_write_errors() {
    let source = source();
    let scheme = meter_scheme(&source);
    let sink = RecordingSink::new(Some(1));
    let mut completed = 0;
    let summary = run(
        &source,
        &scheme,
        Resampling::Bilinear,
        &sink,
        &RunOptions::default(),
        |n, _| completed = n,
    )
    .unwrap();
    assert_eq!(summary.written, 2);
    assert_eq!(summary.failed.len(), 2);
    // failed tiles count as completed
    assert_eq!(completed, 4);
    match &summary.failed[0] {
        TilerError::TileWrite { x, y, .. } => assert_eq!((*x, *y), (1, 0)),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(
        summary.failed[1].to_string(),
        "error on tile 1/1: read-only"
    );
}

#[test]
fn test_run_cancelled() {
    let source = source();
    let scheme = meter_scheme(&source);
    let cancel = AtomicBool::new(true);
    let options = RunOptions {
        skip_empty: false,
        cancel: Some(&cancel),
    };
    let sink = RecordingSink::new(None);
    match run(&source, &scheme, Resampling::Nearest, &sink, &options, |_, _| {}) {
        Err(TilerError::Cancelled) => {}
        Err(e) => panic!("unexpected {:?}", e),
        Ok(_) => panic!("not cancelled"),
    }
    assert!(sink.written.lock().unwrap().is_empty());
}

#[test]
fn test_run_no_intersection() {
    let source = source();
    let parent = Extent {
        minx: 1000.0,
        miny: 1000.0,
        maxx: 2000.0,
        maxy: 2000.0,
    };
    let scheme = TileScheme::MeterAligned(MeterAligned::new(parent, 2, 10.0).unwrap());
    let summary = run(
        &source,
        &scheme,
        Resampling::Nearest,
        &Nosink,
        &RunOptions::default(),
        |_, _| panic!("no tiles expected"),
    )
    .unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.written, 0);
}
