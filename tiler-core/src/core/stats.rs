//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Run statistics

use stats::{MinMax, OnlineStats};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

type Measurement = u64;

struct Collector {
    online: OnlineStats,
    minmax: MinMax<Measurement>,
}

impl Collector {
    fn new() -> Collector {
        Collector {
            online: OnlineStats::new(),
            minmax: MinMax::new(),
        }
    }
}

#[derive(PartialEq, Default, Debug)]
pub struct StatResults {
    pub count: usize,
    pub min: Measurement,
    pub max: Measurement,
    pub mean: f64,
    pub stddev: f64,
}

/// Measurements grouped by key, e.g. `tile_ms.14`
#[derive(Default)]
pub struct Statistics(BTreeMap<String, Collector>);

impl Statistics {
    pub fn new() -> Statistics {
        Statistics(BTreeMap::new())
    }
    pub fn add(&mut self, key: &str, value: Measurement) {
        let collector = self
            .0
            .entry(key.to_string())
            .or_insert_with(Collector::new);
        collector.online.add(value);
        collector.minmax.add(value);
    }
    /// Add elapsed time in milliseconds
    pub fn add_duration(&mut self, key: &str, elapsed: Duration) {
        self.add(key, elapsed.as_millis() as Measurement);
    }
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
    pub fn results(&self, key: &str) -> StatResults {
        match self.0.get(key) {
            Some(collector) => StatResults {
                count: collector.minmax.len(),
                min: collector.minmax.min().copied().unwrap_or(0),
                max: collector.minmax.max().copied().unwrap_or(0),
                mean: collector.online.mean(),
                stddev: collector.online.stddev(),
            },
            None => StatResults::default(),
        }
    }
}

impl fmt::Display for StatResults {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "n={} min={} max={} mean={:.2} stddev={:.2}",
            self.count, self.min, self.max, self.mean, self.stddev
        )
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for key in self.keys() {
            writeln!(f, "{}: {}", key, self.results(key))?;
        }
        Ok(())
    }
}

#[test]
fn test_tile_stats() {
    let mut stats = Statistics::new();
    stats.add("valid_pixels.meter", 4);
    stats.add("valid_pixels.meter", 2);
    stats.add_duration("tile_ms.meter", Duration::from_millis(12));
    stats.add("valid_pixels.meter", 0);
    let res = stats.results("valid_pixels.meter");
    assert_eq!(res.count, 3);
    assert_eq!((res.min, res.max), (0, 4));
    assert_eq!(res.mean, 2.0);
    assert_eq!(stats.results("tile_ms.meter").max, 12);
    assert_eq!(stats.results("tile_ms.14"), StatResults::default());
    assert_eq!(
        format!("{}", stats),
        "tile_ms.meter: n=1 min=12 max=12 mean=12.00 stddev=0.00\n\
         valid_pixels.meter: n=3 min=0 max=4 mean=2.00 stddev=1.63\n"
    );
}
