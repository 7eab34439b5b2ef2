//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Sequential tile generation

use crate::core::stats::Statistics;
use crate::error::TilerError;
use crate::raster::{SourceGrid, Tile};
use crate::resample::{resample, Resampling};
use crate::sink::{TileSink, TilesetMetadata};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tile_grid::{GridIterator, TileAddress, TileGrid, TileScheme};

#[derive(Default)]
pub struct RunOptions<'a> {
    /// Do not write tiles without valid samples
    pub skip_empty: bool,
    /// Checked between tiles
    pub cancel: Option<&'a AtomicBool>,
}

#[derive(Default)]
pub struct RunSummary {
    pub total: u64,
    pub written: u64,
    pub skipped: u64,
    /// Sink errors with tile address
    pub failed: Vec<TilerError>,
    pub stats: Statistics,
}

/// Resample a single tile
pub fn render_tile(
    source: &SourceGrid,
    scheme: &TileScheme,
    policy: Resampling,
    xtile: u32,
    ytile: u32,
) -> Result<Tile, TilerError> {
    let transform = scheme.tile_transform(xtile, ytile);
    let buffer = resample(source, &transform, scheme.tile_size(), policy)?;
    Ok(Tile {
        address: TileAddress { x: xtile, y: ytile },
        extent: scheme.tile_extent(xtile, ytile),
        transform,
        buffer,
    })
}

/// Render all tiles covering `source` into `sink`, row by row.
///
/// Render and sink failures are collected in the summary and do not stop the run.
/// `progress` is called with `(completed, total)` after every tile.
pub fn run<S, F>(
    source: &SourceGrid,
    scheme: &TileScheme,
    policy: Resampling,
    sink: &S,
    options: &RunOptions,
    mut progress: F,
) -> Result<RunSummary, TilerError>
where
    S: TileSink,
    F: FnMut(u64, u64),
{
    let limits = scheme.tile_limits(source.extent());
    let scheme_id = scheme.scheme_id();
    let mut summary = RunSummary {
        total: limits.as_ref().map(|l| l.count()).unwrap_or(0),
        ..Default::default()
    };
    info!(
        "Generating {} tiles of scheme '{}' into {}",
        summary.total,
        scheme_id,
        sink.info()
    );
    if limits.is_none() {
        warn!("Source extent does not intersect the tile scheme");
    }
    sink.init(&TilesetMetadata::new(source, scheme, policy, limits.as_ref()))?;

    let mut completed = 0;
    for (xtile, ytile) in GridIterator::new(limits) {
        if let Some(cancel) = options.cancel {
            if cancel.load(Ordering::Relaxed) {
                info!("Cancelled after {} of {} tiles", completed, summary.total);
                return Err(TilerError::Cancelled);
            }
        }
        let start = Instant::now();
        match render_tile(source, scheme, policy, xtile, ytile) {
            Ok(tile) => {
                let valid = tile.buffer.valid_count();
                if options.skip_empty && valid == 0 {
                    debug!("Skipping empty tile {}/{}", xtile, ytile);
                    summary.skipped += 1;
                } else {
                    match sink.write(&scheme_id, &tile, source.projection()) {
                        Ok(_) => summary.written += 1,
                        Err(e) => {
                            let e = e.at_tile(xtile, ytile);
                            error!("{}", e);
                            summary.failed.push(e);
                        }
                    }
                }
                summary
                    .stats
                    .add_duration(&format!("tile_ms.{}", scheme_id), start.elapsed());
                summary
                    .stats
                    .add(&format!("valid_pixels.{}", scheme_id), valid as u64);
            }
            Err(e) => {
                let e = e.at_tile(xtile, ytile);
                error!("{}", e);
                summary.failed.push(e);
            }
        }
        completed += 1;
        progress(completed, summary.total);
    }
    Ok(summary)
}
