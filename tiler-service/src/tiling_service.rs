//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::sinks::Sink;
use crate::sources::Source;
use pbr::ProgressBar;
use std::cmp;
use std::io::Stdout;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tile_grid::{GridIterator, TileGrid, TileLimits, TileScheme};
use tiler_core::core::config::SourceCfg;
use tiler_core::core::{ApplicationCfg, Config, TilingParams};
use tiler_core::datasource::RasterSource;
use tiler_core::orchestrator::{render_tile, RunSummary};
use tiler_core::raster::SourceGrid;
use tiler_core::sink::{TileSink, TilesetMetadata};
use tiler_core::TilerError;
use tokio::task;

/// Raster tiling service
#[derive(Clone)]
pub struct TilingService {
    pub source_cfg: SourceCfg,
    pub source: Source,
    pub tiling: TilingParams,
    pub sink: Sink,
}

/// Result of a single tile task
pub(crate) enum TileOutcome {
    Written { valid: usize, millis: u64 },
    Empty { millis: u64 },
    Failed(TilerError),
}

impl TilingService {
    pub fn load_source(&self) -> Result<SourceGrid, TilerError> {
        self.source.open(Path::new(&self.source_cfg.path))
    }
    /// Grid properties and tile limits of the configured scheme
    pub fn info(&self) -> Result<String, TilerError> {
        let grid = self.load_source()?;
        let scheme = self.tiling.scheme_for(&grid)?;
        let limits = scheme.tile_limits(grid.extent());
        let extent = grid.extent();
        let mut info = format!("Source: {} ({})\n", self.source_cfg.path, self.source.info());
        info.push_str(&format!(
            "Size: {} x {} {} nodata={}\n",
            grid.width(),
            grid.height(),
            grid.kind(),
            grid.buffer().nodata()
        ));
        info.push_str(&format!("Transform: {:?}\n", grid.transform().to_gdal()));
        info.push_str(&format!(
            "Extent: {} {} {} {}\n",
            extent.minx, extent.miny, extent.maxx, extent.maxy
        ));
        if !grid.projection().is_empty() {
            info.push_str(&format!("Projection: {}\n", grid.projection()));
        }
        info.push_str(&format!(
            "Scheme: {} tile_size={}\n",
            scheme.scheme_id(),
            scheme.tile_size()
        ));
        match limits {
            Some(l) => info.push_str(&format!(
                "Tiles: x {}..{} y {}..{} ({} tiles)\n",
                l.minx,
                l.maxx,
                l.miny,
                l.maxy,
                l.count()
            )),
            None => info.push_str("Tiles: none\n"),
        }
        Ok(info)
    }
    fn progress_bar(&self, msg: &str, tiles: u64) -> ProgressBar<Stdout> {
        let mut pb = ProgressBar::new(tiles);
        pb.message(msg);
        pb.show_speed = false;
        pb.show_percent = false;
        pb.show_time_left = false;
        pb
    }
    /// Generate all tiles of the source grid
    pub fn generate(
        &self,
        nodes: Option<u8>,
        nodeno: Option<u8>,
        progress: bool,
        overwrite: bool,
    ) -> Result<RunSummary, TilerError> {
        let nodes = nodes.unwrap_or(1).max(1) as u64;
        let nodeno = nodeno.unwrap_or(0) as u64;
        if nodeno >= nodes {
            return Err(TilerError::Config(format!(
                "nodeno {} must be less than nodes {}",
                nodeno, nodes
            )));
        }
        let grid = Arc::new(self.load_source()?);
        let scheme = Arc::new(self.tiling.scheme_for(&grid)?);
        let limits = scheme.tile_limits(grid.extent());
        info!("{}", self.sink.info());
        self.sink.init(&TilesetMetadata::new(
            &grid,
            &scheme,
            self.tiling.resampling,
            limits.as_ref(),
        ))?;
        if limits.is_none() {
            warn!("Source extent does not intersect the tile scheme");
        }
        let rt = tokio::runtime::Runtime::new()?;
        let summary = rt.block_on(self.generate_tiles(
            grid, scheme, limits, nodes, nodeno, progress, overwrite,
        ));
        if progress {
            println!("");
        }
        Ok(summary)
    }
    async fn generate_tiles(
        &self,
        grid: Arc<SourceGrid>,
        scheme: Arc<TileScheme>,
        limits: Option<TileLimits>,
        nodes: u64,
        nodeno: u64,
        progress: bool,
        overwrite: bool,
    ) -> RunSummary {
        // Keep a queue of tasks waiting for parallel execution (size >= #cores)
        let task_queue_size = cmp::min(num_cpus::get() * 2, 64);
        let mut tasks = Vec::with_capacity(task_queue_size);
        let scheme_id = scheme.scheme_id();
        let mut summary = RunSummary::default();
        let total = limits.as_ref().map(|l| l.count()).unwrap_or(0);
        summary.total = (total + nodes - 1 - nodeno) / nodes;
        let mut pb = self.progress_bar(&format!("Tiles {}: ", scheme_id), summary.total);
        if progress {
            pb.tick();
        }
        let mut tileno: u64 = 0;
        for (xtile, ytile) in GridIterator::new(limits) {
            let skip = tileno % nodes != nodeno;
            tileno += 1;
            if skip {
                continue;
            }
            let address = tile_grid::TileAddress { x: xtile, y: ytile };
            if overwrite || !self.sink.exists(&scheme_id, &address) {
                let grid = grid.clone();
                let scheme = scheme.clone();
                let sink = self.sink.clone();
                let resampling = self.tiling.resampling;
                let skip_empty = self.tiling.skip_empty;
                let task_scheme_id = scheme_id.clone();
                tasks.push(task::spawn_blocking(move || {
                    let start = Instant::now();
                    let tile = match render_tile(&grid, &scheme, resampling, xtile, ytile) {
                        Ok(tile) => tile,
                        Err(e) => return TileOutcome::Failed(e.at_tile(xtile, ytile)),
                    };
                    let valid = tile.buffer.valid_count();
                    if skip_empty && valid == 0 {
                        debug!("Skipping empty tile {}/{}", xtile, ytile);
                        return TileOutcome::Empty {
                            millis: start.elapsed().as_millis() as u64,
                        };
                    }
                    match sink.write(&task_scheme_id, &tile, grid.projection()) {
                        Ok(_) => TileOutcome::Written {
                            valid,
                            millis: start.elapsed().as_millis() as u64,
                        },
                        Err(e) => TileOutcome::Failed(e.at_tile(xtile, ytile)),
                    }
                }));
                if tasks.len() >= task_queue_size {
                    let (outcome, remaining) = await_one_task(tasks).await;
                    tasks = remaining;
                    record(&mut summary, &scheme_id, outcome);
                }
            } else {
                debug!("Keeping existing tile {}/{}", xtile, ytile);
                summary.skipped += 1;
            }
            if progress {
                pb.inc();
            }
        }
        // Finish remaining tasks
        for outcome in futures_util::future::join_all(tasks).await {
            record(&mut summary, &scheme_id, outcome);
        }
        summary
    }
}

pub(crate) fn record(
    summary: &mut RunSummary,
    scheme_id: &str,
    outcome: Result<TileOutcome, task::JoinError>,
) {
    match outcome {
        Ok(TileOutcome::Written { valid, millis }) => {
            summary.written += 1;
            summary.stats.add(&format!("tile_ms.{}", scheme_id), millis);
            summary
                .stats
                .add(&format!("valid_pixels.{}", scheme_id), valid as u64);
        }
        Ok(TileOutcome::Empty { millis }) => {
            summary.skipped += 1;
            summary.stats.add(&format!("tile_ms.{}", scheme_id), millis);
            summary.stats.add(&format!("valid_pixels.{}", scheme_id), 0);
        }
        Ok(TileOutcome::Failed(e)) => {
            error!("{}", e);
            summary.failed.push(e);
        }
        Err(e) => {
            let e = TilerError::Task(e.to_string());
            error!("{}", e);
            summary.failed.push(e);
        }
    }
}

async fn await_one_task<T>(
    tasks: Vec<task::JoinHandle<T>>,
) -> (Result<T, task::JoinError>, Vec<task::JoinHandle<T>>) {
    let (result, _index, remaining) = futures_util::future::select_all(tasks).await;
    (result, remaining)
}

impl<'a> Config<'a, ApplicationCfg> for TilingService {
    fn from_config(config: &ApplicationCfg) -> Result<Self, String> {
        let source = Source::from_config(&config.source)?;
        let tiling = TilingParams::from_config(&config.tiling)?;
        let sink = Sink::from_config(&config.sink)?;
        Ok(TilingService {
            source_cfg: config.source.clone(),
            source,
            tiling,
            sink,
        })
    }
    fn gen_config() -> String {
        let mut config = String::new();
        config.push_str(TOML_HEADER);
        config.push_str(&Source::gen_config());
        config.push_str(&TilingParams::gen_config());
        config.push_str(&Sink::gen_config());
        config
    }
    fn gen_runtime_config(&self) -> String {
        let mut config = String::new();
        config.push_str(TOML_HEADER);
        config.push_str(&format!(
            "\n[source]\npath = {:?}\nformat = {:?}\n",
            self.source_cfg.path, self.source_cfg.format
        ));
        if let Some(nodata) = self.source_cfg.nodata {
            config.push_str(&format!("nodata = {:?}\n", nodata));
        }
        if let Some(ref kind) = self.source_cfg.kind {
            config.push_str(&format!("kind = {:?}\n", kind));
        }
        config.push_str(&self.tiling.gen_runtime_config());
        config.push_str(&self.sink.gen_runtime_config());
        config
    }
}

const TOML_HEADER: &'static str = "# hfz-tiler configuration\n";
