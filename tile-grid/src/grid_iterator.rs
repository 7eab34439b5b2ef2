//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Grid iterators

use crate::grid::TileLimits;

/// Row-major iterator over tile limits
pub struct GridIterator {
    x: u32,
    y: u32,
    limits: TileLimits,
    finished: bool,
}

impl GridIterator {
    pub fn new(limits: Option<TileLimits>) -> GridIterator {
        match limits {
            Some(limits) if limits.minx <= limits.maxx && limits.miny <= limits.maxy => {
                GridIterator {
                    x: limits.minx,
                    y: limits.miny,
                    limits,
                    finished: false,
                }
            }
            _ => {
                // Return "empty" iterator for empty limits
                GridIterator {
                    x: 0,
                    y: 0,
                    limits: TileLimits {
                        minx: 0,
                        miny: 0,
                        maxx: 0,
                        maxy: 0,
                    },
                    finished: true,
                }
            }
        }
    }
}

impl Iterator for GridIterator {
    /// Current cell index `(x, y)`
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let current = (self.x, self.y);
        if self.x < self.limits.maxx {
            self.x += 1;
        } else if self.y < self.limits.maxy {
            self.y += 1;
            self.x = self.limits.minx;
        } else {
            self.finished = true;
        }
        Some(current)
    }
}

#[test]
fn test_row_major_iter() {
    let limits = TileLimits {
        minx: 3,
        miny: 7,
        maxx: 5,
        maxy: 8,
    };
    let cells = GridIterator::new(Some(limits.clone())).collect::<Vec<_>>();
    assert_eq!(
        cells,
        vec![(3, 7), (4, 7), (5, 7), (3, 8), (4, 8), (5, 8)]
    );
    assert_eq!(cells.len() as u64, limits.count());

    let single = TileLimits {
        minx: 0,
        miny: 0,
        maxx: 0,
        maxy: 0,
    };
    let cells = GridIterator::new(Some(single)).collect::<Vec<_>>();
    assert_eq!(cells, vec![(0, 0)]);
}

#[test]
fn test_empty_limits() {
    let cells = GridIterator::new(None).collect::<Vec<_>>();
    assert_eq!(cells, vec![]);

    // inverted limits
    let griditer = GridIterator::new(Some(TileLimits {
        minx: 2,
        miny: 0,
        maxx: 1,
        maxy: 0,
    }));
    assert_eq!(griditer.count(), 0);
}

#[test]
fn test_max_index() {
    let limits = TileLimits {
        minx: u32::MAX,
        miny: u32::MAX - 1,
        maxx: u32::MAX,
        maxy: u32::MAX,
    };
    let cells = GridIterator::new(Some(limits)).collect::<Vec<_>>();
    assert_eq!(cells, vec![(u32::MAX, u32::MAX - 1), (u32::MAX, u32::MAX)]);
}
