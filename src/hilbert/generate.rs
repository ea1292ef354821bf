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

//! Whole-curve generation: every cell in traversal order, the index matrix and
//! its inverse, and a fixed order 3 layout to check against.

use crate::error::{CurveError, Result};
use crate::hilbert::h_2::{self, check_order};
use alloc::{collections::BTreeMap, vec::Vec};
use core::iter::FusedIterator;
use core::ops::Range;

/// Largest order `points` and `index_matrix` will materialize (16.7M cells).
pub const MAX_GENERATE_ORDER: u32 = 12;

/// Largest order whose cell count fits in `usize`, so `HilbertPoints::len` is exact.
pub const MAX_ITER_ORDER: u32 = if (usize::BITS - 1) / 2 < h_2::MAX_ORDER {
    (usize::BITS - 1) / 2
} else {
    h_2::MAX_ORDER
};

/// Indexes along the order 3 curve, one row per `y`, one column per `x`.
///
/// The curve starts at the top left and leaves at the top right:
///
/// ```text
///  v┌─┐┌─┐^
///  └┘┌┘└┐└┘
///  ┌┐└┐┌┘┌┐
///  │└─┘└─┘│
///  └┐┌──┐┌┘
///  ┌┘└┐┌┘└┐
///  │┌┐││┌┐│
///  └┘└┘└┘└┘
/// ```
pub const HILBERT_ORDER_3: [[u64; 8]; 8] = [
    [0, 3, 4, 5, 58, 59, 60, 63],
    [1, 2, 7, 6, 57, 56, 61, 62],
    [14, 13, 8, 9, 54, 55, 50, 49],
    [15, 12, 11, 10, 53, 52, 51, 48],
    [16, 17, 30, 31, 32, 33, 46, 47],
    [19, 18, 29, 28, 35, 34, 45, 44],
    [20, 23, 24, 27, 36, 39, 40, 43],
    [21, 22, 25, 26, 37, 38, 41, 42],
];

/// Look up the order 3 index of `(x, y)` in `HILBERT_ORDER_3`.
#[must_use]
pub fn reference_index(x: usize, y: usize) -> Option<u64> {
    HILBERT_ORDER_3.get(y).and_then(|row| row.get(x)).copied()
}

/// Iterator over the cells of one curve in index order.
///
/// ```
/// use hilbert_curve::hilbert::generate::HilbertPoints;
///
/// let cells: Vec<_> = HilbertPoints::new(1).unwrap().collect();
/// assert_eq!(cells, vec![(0, 0), (0, 1), (1, 1), (1, 0)]);
/// ```
#[derive(Debug, Clone)]
pub struct HilbertPoints {
    order: u32,
    indexes: Range<u64>,
}

impl HilbertPoints {
    /// All cells of a curve of `order`, at most `MAX_ITER_ORDER`.
    pub fn new(order: u32) -> Result<Self> {
        check_order(order)?;
        if order > MAX_ITER_ORDER {
            return Err(CurveError::InvalidOrder {
                order,
                max: MAX_ITER_ORDER,
            });
        }
        Ok(HilbertPoints {
            order,
            indexes: 0..h_2::length(order),
        })
    }
}

impl Iterator for HilbertPoints {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        self.indexes
            .next()
            .map(|index| h_2::decode(self.order, index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // `new` bounds the order so the count fits.
        let remaining = (self.indexes.end - self.indexes.start) as usize;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.indexes
            .nth(n)
            .map(|index| h_2::decode(self.order, index))
    }
}

impl DoubleEndedIterator for HilbertPoints {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.indexes
            .next_back()
            .map(|index| h_2::decode(self.order, index))
    }
}

impl ExactSizeIterator for HilbertPoints {}

impl FusedIterator for HilbertPoints {}

pub(crate) fn check_generate_order(order: u32) -> Result<()> {
    if order > MAX_GENERATE_ORDER {
        Err(CurveError::InvalidOrder {
            order,
            max: MAX_GENERATE_ORDER,
        })
    } else {
        Ok(())
    }
}

/// Every cell of the curve, in index order.
pub fn points(order: u32) -> Result<Vec<(u32, u32)>> {
    check_generate_order(order)?;
    Ok(HilbertPoints::new(order)?.collect())
}

/// A `2^order` square matrix where `matrix[x][y]` is the index of `(x, y)`.
pub fn index_matrix(order: u32) -> Result<Vec<Vec<u64>>> {
    check_generate_order(order)?;
    let side = h_2::side(order) as u32;
    Ok((0..side)
        .map(|x| (0..side).map(|y| h_2::encode(order, x, y)).collect())
        .collect())
}

/// Map each index in `grid` to its position, with `grid[x][y]` read as the
/// index of `(x, y)`. Inverse of `index_matrix`.
///
/// Rows may differ in length. If an index repeats, the last position wins.
pub fn coordinates_from_grid<R: AsRef<[u64]>>(grid: &[R]) -> BTreeMap<u64, (usize, usize)> {
    let mut coordinates = BTreeMap::new();
    for (x, row) in grid.iter().enumerate() {
        for (y, index) in row.as_ref().iter().enumerate() {
            coordinates.insert(*index, (x, y));
        }
    }
    coordinates
}
