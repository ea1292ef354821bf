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

//! Errors returned by curve construction, mapping and drawing.

use thiserror::Error;

/// Errors from the Hilbert curve operations.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CurveError {
    /// The order is larger than the operation supports.
    #[error("order {order} exceeds the maximum of {max}")]
    InvalidOrder {
        /// Requested order.
        order: u32,
        /// Largest accepted order.
        max: u32,
    },

    /// A grid coordinate does not fit in a `2^order` sided grid.
    #[error("point ({x}, {y}) is outside the {side}x{side} grid")]
    PointOutOfRange {
        /// Column.
        x: u32,
        /// Row.
        y: u32,
        /// Grid side length.
        side: u64,
    },

    /// An index is not less than `4^order`.
    #[error("index {index} is not below the curve length {length}")]
    IndexOutOfRange {
        /// Requested index.
        index: u64,
        /// Number of cells on the curve.
        length: u64,
    },

    /// A bounding box has min > max, or is empty, or is not finite.
    #[error("invalid bounds: ({x_min}, {y_min}) to ({x_max}, {y_max})")]
    InvalidBounds {
        /// Minimum x.
        x_min: f64,
        /// Minimum y.
        y_min: f64,
        /// Maximum x.
        x_max: f64,
        /// Maximum y.
        y_max: f64,
    },

    /// A real-valued point lies outside the curve's bounds.
    #[error("point ({x}, {y}) is outside the curve bounds")]
    PointOutOfBounds {
        /// x value.
        x: f64,
        /// y value.
        y: f64,
    },

    /// The canvas leaves no room between the margins.
    #[error("canvas size {size} leaves no drawing area with margin {margin}")]
    InvalidCanvas {
        /// Canvas side in pixels.
        size: f64,
        /// Margin in pixels.
        margin: f64,
    },

    /// An order 0 curve is a single cell and has no segments to scale.
    #[error("an order 0 curve has nothing to draw")]
    NothingToDraw,
}

/// Result alias for curve operations.
pub type Result<T> = core::result::Result<T, CurveError>;
