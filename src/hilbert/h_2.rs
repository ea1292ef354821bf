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

//! A two dimensional Hilbert curve over a `2^order x 2^order` grid.
//!
//! ```
//! use hilbert_curve::hilbert::h_2::H2;
//!
//! let h = H2::new(3, 7, 0).unwrap();
//! assert_eq!(h.index(), 63);
//! assert_eq!(h.decode(), (7, 0));
//! ```

use crate::error::{CurveError, Result};
use core::convert::TryInto;

/// The largest supported order. Coordinates fit in `u32` and indexes in `u64`.
pub const MAX_ORDER: u32 = 31;

/// A cell on a Hilbert curve of a fixed order, stored as its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct H2 {
    order: u32,
    index: u64,
}

impl H2 {
    /// Encode the cell `(x, y)` on a curve of `order`.
    pub fn new(order: u32, x: u32, y: u32) -> Result<Self> {
        check_order(order)?;
        let side = side(order);
        if u64::from(x) >= side || u64::from(y) >= side {
            return Err(CurveError::PointOutOfRange { x, y, side });
        }
        Ok(H2 {
            order,
            index: encode(order, x, y),
        })
    }

    /// Create an `H2` directly from the index.
    pub fn new_from_index(order: u32, index: u64) -> Result<Self> {
        check_order(order)?;
        let length = length(order);
        if index >= length {
            return Err(CurveError::IndexOutOfRange { index, length });
        }
        Ok(H2 { order, index })
    }

    /// Index value.
    #[must_use]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Curve order.
    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Return the grid cell for this index.
    #[must_use]
    pub fn decode(&self) -> (u32, u32) {
        decode(self.order, self.index)
    }

    /// The cell at the next index, or `None` at the end of the curve.
    #[must_use]
    pub fn successor(&self) -> Option<Self> {
        let index = self.index + 1;
        if index < length(self.order) {
            Some(H2 {
                order: self.order,
                index,
            })
        } else {
            None
        }
    }

    /// The cell containing this one on a coarser curve of `order`.
    ///
    /// Every level-`order` cell covers a contiguous block of finer indexes.
    #[must_use]
    pub fn parent(&self, order: u32) -> Option<Self> {
        if order > self.order {
            return None;
        }
        Some(H2 {
            order,
            index: self.index >> (2 * (self.order - order)),
        })
    }
}

/// Number of cells along each side of the grid.
#[must_use]
pub const fn side(order: u32) -> u64 {
    1_u64 << order
}

/// Number of cells the curve visits, `4^order`.
#[must_use]
pub const fn length(order: u32) -> u64 {
    1_u64 << (2 * order)
}

pub(crate) fn check_order(order: u32) -> Result<()> {
    if order > MAX_ORDER {
        Err(CurveError::InvalidOrder {
            order,
            max: MAX_ORDER,
        })
    } else {
        Ok(())
    }
}

/// Convert a curve index to its `(x, y)` cell.
///
/// ```
/// use hilbert_curve::hilbert::h_2::index_to_point;
///
/// assert_eq!(index_to_point(1, 2).unwrap(), (1, 1));
/// ```
pub fn index_to_point(order: u32, index: u64) -> Result<(u32, u32)> {
    H2::new_from_index(order, index).map(|h| h.decode())
}

/// Convert an `(x, y)` cell to its curve index.
pub fn point_to_index(order: u32, x: u32, y: u32) -> Result<u64> {
    H2::new(order, x, y).map(|h| h.index())
}

/// Alias for `index_to_point`, named after the distance along the curve.
pub fn point_from_distance(order: u32, distance: u64) -> Result<(u32, u32)> {
    index_to_point(order, distance)
}

/// Alias for `point_to_index`, named after the distance along the curve.
pub fn distance_from_point(order: u32, x: u32, y: u32) -> Result<u64> {
    point_to_index(order, x, y)
}

/// Walks the quadrants from the most significant bit down.
/// Inputs must already be validated against `order`.
pub(crate) fn encode(order: u32, x: u32, y: u32) -> u64 {
    let (mut x, mut y) = (u64::from(x), u64::from(y));
    let mut index = 0_u64;
    let mut s = side(order) >> 1;
    while s > 0 {
        let rx = u64::from(x & s != 0);
        let ry = u64::from(y & s != 0);
        index += s * s * ((3 * rx) ^ ry);
        let (nx, ny) = rotate(s, x, y, rx, ry);
        x = nx;
        y = ny;
        s >>= 1;
    }
    index
}

/// Walks the quadrants from the least significant pair of bits up.
pub(crate) fn decode(order: u32, index: u64) -> (u32, u32) {
    let n = side(order);
    let (mut x, mut y) = (0_u64, 0_u64);
    let mut t = index;
    let mut s = 1_u64;
    while s < n {
        let rx = 1 & (t >> 1);
        let ry = 1 & (t ^ rx);
        let (nx, ny) = rotate(s, x, y, rx, ry);
        x = nx + s * rx;
        y = ny + s * ry;
        t >>= 2;
        s <<= 1;
    }
    (
        x.try_into().expect("x is below side which fits u32"),
        y.try_into().expect("y is below side which fits u32"),
    )
}

/// Rotate and flip a quadrant of side `s`.
///
/// Only the bits below `s` are meaningful afterwards.
fn rotate(s: u64, x: u64, y: u64, rx: u64, ry: u64) -> (u64, u64) {
    if ry != 0 {
        return (x, y);
    }
    let (x, y) = if rx == 1 {
        let low = s - 1;
        (low - (x & low), low - (y & low))
    } else {
        (x, y)
    };
    (y, x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[quickcheck]
    fn test_point_to_h2_and_back(x: u32, y: u32) -> bool {
        let (x, y) = (x & 0x7fff_ffff, y & 0x7fff_ffff);
        H2::new(MAX_ORDER, x, y).map(|h| h.decode()) == Ok((x, y))
    }

    #[quickcheck]
    fn test_index_to_h2_and_back(index: u64) -> bool {
        let index = index % length(MAX_ORDER);
        let (x, y) = index_to_point(MAX_ORDER, index).unwrap();
        point_to_index(MAX_ORDER, x, y) == Ok(index)
    }

    #[quickcheck]
    fn test_parent_matches_coarse_curve(x: u16, y: u16) -> bool {
        let fine = H2::new(16, x.into(), y.into()).unwrap();
        let coarse = H2::new(10, u32::from(x) >> 6, u32::from(y) >> 6).unwrap();
        fine.parent(10) == Some(coarse)
    }

    #[test]
    fn test_every_index_round_trips() {
        for order in 0..=6 {
            for index in 0..length(order) {
                let (x, y) = decode(order, index);
                assert_eq!(encode(order, x, y), index, "order {}", order);
            }
        }
    }

    #[test]
    fn test_h2_encoding() {
        assert_eq!(point_to_index(1, 0, 0), Ok(0));
        assert_eq!(point_to_index(1, 0, 1), Ok(1));
        assert_eq!(point_to_index(1, 1, 1), Ok(2));
        assert_eq!(point_to_index(1, 1, 0), Ok(3));

        assert_eq!(point_to_index(3, 2, 0), Ok(4));
        assert_eq!(point_to_index(3, 3, 3), Ok(10));
        assert_eq!(point_to_index(3, 4, 4), Ok(32));
    }

    #[test]
    fn test_h2_endpoints() {
        for order in 1..=MAX_ORDER {
            let last = (side(order) - 1) as u32;
            assert_eq!(index_to_point(order, 0), Ok((0, 0)));
            assert_eq!(index_to_point(order, length(order) - 1), Ok((last, 0)));
        }
    }

    #[test]
    fn test_order_zero_is_single_cell() {
        assert_eq!(index_to_point(0, 0), Ok((0, 0)));
        assert_eq!(point_to_index(0, 0, 0), Ok(0));
        assert!(point_to_index(0, 1, 0).is_err());
    }

    #[test]
    fn test_consecutive_cells_are_adjacent() {
        let mut h = H2::new_from_index(5, 0).unwrap();
        while let Some(next) = h.successor() {
            let (x0, y0) = h.decode();
            let (x1, y1) = next.decode();
            let dist =
                (i64::from(x0) - i64::from(x1)).abs() + (i64::from(y0) - i64::from(y1)).abs();
            assert_eq!(dist, 1, "{:?} -> {:?}", h, next);
            h = next;
        }
        assert_eq!(h.index(), length(5) - 1);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            point_to_index(32, 0, 0),
            Err(CurveError::InvalidOrder { order: 32, max: 31 })
        );
        assert_eq!(
            point_to_index(2, 4, 0),
            Err(CurveError::PointOutOfRange { x: 4, y: 0, side: 4 })
        );
        assert_eq!(
            index_to_point(2, 16),
            Err(CurveError::IndexOutOfRange {
                index: 16,
                length: 16
            })
        );
    }

    #[test]
    fn test_aliases() {
        assert_eq!(point_from_distance(3, 63), index_to_point(3, 63));
        assert_eq!(distance_from_point(3, 5, 6), point_to_index(3, 5, 6));
    }
}
