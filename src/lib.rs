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

#![no_std]
#![deny(missing_docs)]
//! Hilbert space-filling curve library.
//!
//! Maps between positions along a 2-D Hilbert curve and cells of a
//! `2^order x 2^order` grid, generates whole curves, draws them, and indexes
//! real-valued points with covering range queries.
//!
//! The integer codec lives in `hilbert::h_2`.
//! ```
//! use hilbert_curve::hilbert::h_2::{index_to_point, point_to_index};
//!
//! let (x, y) = index_to_point(3, 42).unwrap();
//! assert_eq!((x, y), (7, 7));
//! assert_eq!(point_to_index(3, x, y).unwrap(), 42);
//! ```
//!
//! A curve over a plane is accessed through the `SpaceFillingCurves` factory.
//! ```
//! use hilbert_curve::SpaceFillingCurves;
//!
//! let curve = SpaceFillingCurves::get_point_curve(10, -180.0, -90.0, 180.0, 90.0).unwrap();
//! let indexed_point = curve.index(2.3522, 48.8566).unwrap();
//! let range_of_index = curve.ranges(2.35, 48.85, 2.354, 48.857, &[]).unwrap();
//!
//! assert!(range_of_index
//!     .iter()
//!     .any(|r| r.lower() <= indexed_point && r.upper() >= indexed_point));
//! ```

pub mod error;
pub mod hilbert;
pub mod index_range;
pub mod normalized_dimension;
pub mod render;

#[cfg(test)]
extern crate quickcheck;

#[cfg(test)]
#[macro_use]
extern crate quickcheck_macros;

extern crate alloc;

pub use error::{CurveError, Result};
use hilbert::h_curve_2d::HilbertCurve2D;

/// Factory providing space filling curves
pub struct SpaceFillingCurves;

impl SpaceFillingCurves {
    /// Return a point indexing curve of `order` over a bounded plane.
    pub fn get_point_curve(
        order: u32,
        x_min: f64,
        y_min: f64,
        x_max: f64,
        y_max: f64,
    ) -> Result<HilbertCurve2D> {
        HilbertCurve2D::new(order, x_min, y_min, x_max, y_max)
    }
}

/// Hints to the `ranges` function of `HilbertCurve2D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeComputeHints {
    /// Number of times to recurse.
    MaxRecurse(usize),
    /// Stop subdividing once about this many ranges are pending.
    MaxRanges(usize),
}
