//
// Copyright 2020, Gobsmacked Labs, LLC.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A Hilbert curve laid over a bounded plane of `f64` coordinates.

use crate::error::{CurveError, Result};
use crate::hilbert::h_2::{self, check_order, H2};
use crate::index_range::{self, CoveredRange, IndexRange, OverlappingRange};
use crate::normalized_dimension::{BinNormalizer, NormalizedDimension};
use crate::RangeComputeHints;
use alloc::{boxed::Box, collections::VecDeque, vec::Vec};
use tracing::debug;

const DEFAULT_RECURSE: usize = 7;

const LEVEL_TERMINATOR: Option<Cell> = None;

/// 2-Dimensional Hilbert curve, with x as longitude and y as latitude by default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HilbertCurve2D {
    order: u32,
    x: BinNormalizer,
    y: BinNormalizer,
}

impl Default for HilbertCurve2D {
    fn default() -> Self {
        HilbertCurve2D {
            order: 10,
            x: BinNormalizer::lon(10),
            y: BinNormalizer::lat(10),
        }
    }
}

impl HilbertCurve2D {
    /// Constructor. The plane `[x_min, x_max] x [y_min, y_max]` is split into
    /// a `2^order` square grid.
    pub fn new(order: u32, x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self> {
        check_order(order)?;
        let finite = [x_min, y_min, x_max, y_max, x_max - x_min, y_max - y_min]
            .iter()
            .all(|v| v.is_finite());
        if !finite || x_min >= x_max || y_min >= y_max {
            return Err(CurveError::InvalidBounds {
                x_min,
                y_min,
                x_max,
                y_max,
            });
        }
        Ok(HilbertCurve2D {
            order,
            x: BinNormalizer::new(order, x_min, x_max),
            y: BinNormalizer::new(order, y_min, y_max),
        })
    }

    /// Curve order.
    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }

    fn in_bounds(&self, x: f64, y: f64) -> bool {
        self.x.min() <= x && x <= self.x.max() && self.y.min() <= y && y <= self.y.max()
    }

    /// Get the index for a point.
    pub fn index(&self, x: f64, y: f64) -> Result<u64> {
        if !self.in_bounds(x, y) {
            return Err(CurveError::PointOutOfBounds { x, y });
        }
        Ok(h_2::encode(
            self.order,
            self.x.normalize(x),
            self.y.normalize(y),
        ))
    }

    /// Get the center of the cell at an index.
    pub fn point(&self, index: u64) -> Result<(f64, f64)> {
        let (col, row) = H2::new_from_index(self.order, index)?.decode();
        Ok((self.x.denormalize(col), self.y.denormalize(row)))
    }

    /// Get the index ranges for a bounding box.
    ///
    /// Every point inside the box indexes into one of the returned ranges.
    /// A covered range holds only cells lying wholly inside the box; cells the
    /// box edges cut through come back as overlapping ranges.
    pub fn ranges(
        &self,
        x_min: f64,
        y_min: f64,
        x_max: f64,
        y_max: f64,
        hints: &[RangeComputeHints],
    ) -> Result<Vec<Box<dyn IndexRange>>> {
        let ordered = x_min <= x_max && y_min <= y_max;
        if !ordered || !self.in_bounds(x_min, y_min) || !self.in_bounds(x_max, y_max) {
            return Err(CurveError::InvalidBounds {
                x_min,
                y_min,
                x_max,
                y_max,
            });
        }

        let touched = QueryWindow {
            x_min: self.x.normalize(x_min).into(),
            y_min: self.y.normalize(y_min).into(),
            x_max: self.x.normalize(x_max).into(),
            y_max: self.y.normalize(y_max).into(),
        };
        let covered = match (self.x.last_full_bin(x_max), self.y.last_full_bin(y_max)) {
            (Some(x_last), Some(y_last)) => Some(QueryWindow {
                x_min: self.x.first_full_bin(x_min),
                y_min: self.y.first_full_bin(y_min),
                x_max: x_last,
                y_max: y_last,
            }),
            _ => None,
        };
        let window = Query { touched, covered };

        let max_recurse = hints
            .iter()
            .find_map(|h| match *h {
                RangeComputeHints::MaxRecurse(max) => Some(max),
                RangeComputeHints::MaxRanges(_) => None,
            })
            .unwrap_or(DEFAULT_RECURSE)
            .min(self.order as usize);

        let max_ranges = hints
            .iter()
            .find_map(|h| match *h {
                RangeComputeHints::MaxRanges(max) => Some(max),
                RangeComputeHints::MaxRecurse(_) => None,
            })
            .unwrap_or(usize::max_value());

        let ranges = self.ranges_impl(&window, max_recurse, max_ranges);

        debug!(
            order = self.order,
            max_recurse,
            ranges = ranges.len(),
            "computed hilbert index ranges"
        );

        Ok(ranges)
    }

    fn ranges_impl(
        &self,
        window: &Query,
        max_recurse: usize,
        max_ranges: usize,
    ) -> Vec<Box<dyn IndexRange>> {
        let mut ranges: Vec<Box<dyn IndexRange>> = Vec::with_capacity(100);

        let mut remaining: VecDeque<Option<Cell>> = VecDeque::with_capacity(100);

        self.check_cell(Cell::ROOT, window, &mut ranges, &mut remaining);
        if max_recurse == 0 {
            self.bottom_out(&mut ranges, &mut remaining);
        }
        remaining.push_back(LEVEL_TERMINATOR);

        let mut level = 0;

        while let Some(next) = remaining.pop_front() {
            match next {
                Some(cell) => {
                    for child in &cell.children() {
                        self.check_cell(*child, window, &mut ranges, &mut remaining);
                    }
                    // One level terminator is always queued here.
                    let pending = remaining.len() - 1;
                    if ranges.len() + pending > max_ranges {
                        self.bottom_out(&mut ranges, &mut remaining);
                    }
                }
                None => {
                    if !remaining.is_empty() {
                        level += 1;
                        if level >= max_recurse {
                            self.bottom_out(&mut ranges, &mut remaining);
                        } else {
                            remaining.push_back(LEVEL_TERMINATOR);
                        }
                    }
                }
            }
        }

        index_range::merge(ranges)
    }

    fn check_cell(
        &self,
        cell: Cell,
        window: &Query,
        ranges: &mut Vec<Box<dyn IndexRange>>,
        remaining: &mut VecDeque<Option<Cell>>,
    ) {
        let extent = cell.extent(self.order);
        if window.covers(&extent) {
            let (min, max) = cell.index_interval(self.order);
            ranges.push(Box::new(CoveredRange::new(min, max)));
        } else if window.touched.overlaps(&extent) {
            remaining.push_back(Some(cell));
        }
    }

    fn bottom_out(
        &self,
        ranges: &mut Vec<Box<dyn IndexRange>>,
        remaining: &mut VecDeque<Option<Cell>>,
    ) {
        while let Some(cell) = remaining.pop_front() {
            if let Some(cell) = cell {
                let (min, max) = cell.index_interval(self.order);
                ranges.push(Box::new(OverlappingRange::new(min, max)));
            }
        }
    }
}

/// Inclusive rectangle of full-resolution grid cells.
#[derive(Debug, Clone, Copy, PartialEq)]
struct QueryWindow {
    x_min: u64,
    y_min: u64,
    x_max: u64,
    y_max: u64,
}

impl QueryWindow {
    fn contains(&self, other: &QueryWindow) -> bool {
        self.x_min <= other.x_min
            && other.x_max <= self.x_max
            && self.y_min <= other.y_min
            && other.y_max <= self.y_max
    }

    fn overlaps(&self, other: &QueryWindow) -> bool {
        self.x_min <= other.x_max
            && other.x_min <= self.x_max
            && self.y_min <= other.y_max
            && other.y_min <= self.y_max
    }
}

/// The grid cells a query box reaches into, and those it holds whole.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Query {
    touched: QueryWindow,
    covered: Option<QueryWindow>,
}

impl Query {
    fn covers(&self, extent: &QueryWindow) -> bool {
        self.covered.map_or(false, |c| c.contains(extent))
    }
}

/// A quadrant of the grid at some subdivision level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    level: u32,
    x: u32,
    y: u32,
}

impl Cell {
    const ROOT: Cell = Cell {
        level: 0,
        x: 0,
        y: 0,
    };

    fn children(&self) -> [Cell; 4] {
        let (x, y, level) = (self.x << 1, self.y << 1, self.level + 1);
        [
            Cell { level, x, y },
            Cell { level, x: x + 1, y },
            Cell { level, x, y: y + 1 },
            Cell {
                level,
                x: x + 1,
                y: y + 1,
            },
        ]
    }

    /// The full-resolution cells this quadrant spans.
    fn extent(&self, order: u32) -> QueryWindow {
        let shift = order - self.level;
        let width = 1_u64 << shift;
        let x_min = u64::from(self.x) << shift;
        let y_min = u64::from(self.y) << shift;
        QueryWindow {
            x_min,
            y_min,
            x_max: x_min + width - 1,
            y_max: y_min + width - 1,
        }
    }

    /// Coarse cells own a contiguous block of `4^(order - level)` indexes.
    fn index_interval(&self, order: u32) -> (u64, u64) {
        let shift = 2 * (order - self.level);
        let min = h_2::encode(self.level, self.x, self.y) << shift;
        (min, min + ((1_u64 << shift) - 1))
    }
}
