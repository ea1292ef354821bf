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

//! Normalizes an `f64` in the range [min, max] to a grid column in
//! [0, 2^order - 1].
//!
//! `BinNormalizer::lat` normalizes latitudes. [-90.0, 90].
//! `BinNormalizer::lon` normalizes longitudes. [-180, 180].

use core::convert::TryInto;
#[allow(unused_imports)]
use num_traits::Float;

/// Maps a `f64` to a grid column `<= max_index`.
pub trait NormalizedDimension {
    /// The minimum input.
    fn min(&self) -> f64;

    /// The maximum input.
    fn max(&self) -> f64;

    /// The maximum output value.
    fn max_index(&self) -> u32;

    /// Normalize input `f64` into range [0, `max_index`].
    fn normalize(&self, x: f64) -> u32;

    /// Reverse of normalize. Returns the center of the bin.
    fn denormalize(&self, y: u32) -> f64;
}

/// Splits `[min, max]` into `2^order` equal bins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinNormalizer {
    order: u32,
    min: f64,
    max: f64,
}

impl BinNormalizer {
    /// Constructor.
    ///
    /// # Panics
    /// If `order > 31`, `min >= max`, or `max - min` overflows; callers
    /// validate first.
    #[must_use]
    pub(crate) fn new(order: u32, min: f64, max: f64) -> Self {
        assert!(order <= 31);
        assert!(min < max);
        assert!((max - min).is_finite());
        BinNormalizer { order, min, max }
    }

    /// Latitudes, [-90.0, 90.0].
    #[must_use]
    pub fn lat(order: u32) -> Self {
        Self::new(order, -90.0, 90.0)
    }

    /// Longitudes, [-180.0, 180.0].
    #[must_use]
    pub fn lon(order: u32) -> Self {
        Self::new(order, -180.0, 180.0)
    }

    fn bins(&self) -> u64 {
        1_u64 << self.order
    }

    fn normalizer(&self) -> f64 {
        self.bins() as f64 / (self.max - self.min)
    }

    fn denormalizer(&self) -> f64 {
        (self.max - self.min) / self.bins() as f64
    }

    fn scale(&self, x: f64) -> f64 {
        (x - self.min) * self.normalizer()
    }

    /// The first bin whose every value is `>= lower`.
    ///
    /// May be `bins()` when no bin qualifies.
    pub(crate) fn first_full_bin(&self, lower: f64) -> u64 {
        if lower <= self.min {
            return 0;
        }
        // Anything below `lower` lands at or before the bin of its predecessor.
        self.scale(next_down(lower)).floor() as u64 + 1
    }

    /// The last bin whose every value is `<= upper`, if any.
    pub(crate) fn last_full_bin(&self, upper: f64) -> Option<u64> {
        if upper >= self.max {
            return Some(self.bins() - 1);
        }
        // The last bin also holds `max`, so it is never full here.
        let end = (self.scale(next_up(upper)).floor() as u64).min(self.bins() - 1);
        end.checked_sub(1)
    }
}

fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

fn next_down(x: f64) -> f64 {
    -next_up(-x)
}

impl NormalizedDimension for BinNormalizer {
    fn min(&self) -> f64 {
        self.min
    }

    fn max(&self) -> f64 {
        self.max
    }

    fn max_index(&self) -> u32 {
        (self.bins() - 1)
            .try_into()
            .expect("order was restricted to allow bins - 1 to fit into u32")
    }

    fn normalize(&self, x: f64) -> u32 {
        if x >= self.max {
            self.max_index()
        } else if x <= self.min {
            0
        } else {
            // Rounding can push values just below max into the bin past the end.
            (((x - self.min) * self.normalizer()).floor() as u32).min(self.max_index())
        }
    }

    fn denormalize(&self, y: u32) -> f64 {
        let y = y.min(self.max_index());
        self.min + (f64::from(y) + 0.5) * self.denormalizer()
    }
}

#[cfg(test)]
mod tests {
    use super::{next_down, next_up, BinNormalizer, NormalizedDimension};

    #[test]
    fn test_normalize_round_trip_minimum() {
        let norm_lat = BinNormalizer::lat(31);
        let norm_lon = BinNormalizer::lon(31);

        assert_eq!(norm_lat.normalize(norm_lat.denormalize(0)), 0);
        assert_eq!(norm_lon.normalize(norm_lon.denormalize(0)), 0);
    }

    #[test]
    fn test_normalize_round_trip_maximum() {
        let norm_lat = BinNormalizer::lat(31);
        let norm_lon = BinNormalizer::lon(31);
        let max_bin = (2_u64.pow(31) - 1) as u32;
        assert_eq!(norm_lat.normalize(norm_lat.denormalize(max_bin)), max_bin);
        assert_eq!(norm_lon.normalize(norm_lon.denormalize(max_bin)), max_bin);
    }

    #[test]
    fn test_normalize_bounds() {
        let norm = BinNormalizer::new(3, 0.0, 8.0);

        assert_eq!(norm.normalize(norm.min()), 0);
        assert_eq!(norm.normalize(norm.max()), 7);
        assert_eq!(norm.normalize(3.999), 3);
        assert_eq!(norm.normalize(4.0), 4);
        assert_eq!(norm.max_index(), 7);
    }

    #[test]
    fn test_denormalize_to_middle() {
        let norm = BinNormalizer::new(3, 0.0, 8.0);

        assert_eq!(norm.denormalize(0), 0.5);
        assert_eq!(norm.denormalize(7), 7.5);
        assert_eq!(norm.denormalize(100), 7.5);
    }

    #[test]
    fn test_order_zero_is_one_bin() {
        let norm = BinNormalizer::lon(0);

        assert_eq!(norm.max_index(), 0);
        assert_eq!(norm.normalize(123.0), 0);
        assert_eq!(norm.denormalize(0), 0.0);
    }

    #[test]
    fn test_full_bins_inside_bounds() {
        let norm = BinNormalizer::new(2, 0.0, 4.0);

        assert_eq!(norm.first_full_bin(0.0), 0);
        assert_eq!(norm.first_full_bin(2.0), 2);
        assert_eq!(norm.first_full_bin(1.5), 2);
        assert_eq!(norm.first_full_bin(4.0), 4);

        assert_eq!(norm.last_full_bin(4.0), Some(3));
        assert_eq!(norm.last_full_bin(2.0), Some(1));
        assert_eq!(norm.last_full_bin(1.9), Some(0));
        assert_eq!(norm.last_full_bin(3.999), Some(2));
        assert_eq!(norm.last_full_bin(0.5), None);
    }

    #[test]
    fn test_next_up_and_down() {
        assert!(next_up(1.0) > 1.0);
        assert!(next_down(1.0) < 1.0);
        assert!(next_up(-1.0) > -1.0);
        assert!(next_down(-1.0) < -1.0);
        assert!(next_up(0.0) > 0.0);
        assert!(next_down(0.0) < 0.0);
        assert_eq!(next_up(f64::INFINITY), f64::INFINITY);
        assert_eq!(next_down(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }

    #[test]
    #[should_panic]
    fn test_new_rejects_overflowing_span() {
        let _ = BinNormalizer::new(4, -1e308, 1e308);
    }

    #[quickcheck]
    fn test_normalize_within_max_index(x: f64) -> bool {
        let norm = BinNormalizer::lat(10);
        x.is_nan() || norm.normalize(x) <= norm.max_index()
    }
}
