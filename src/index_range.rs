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

//! Hilbert index intervals returned by range queries.
//!
//! `CoveredRange` holds only indexes of cells inside the query window.
//! `OverlappingRange` may also hold cells outside it, so callers must filter.
//! Both sort by `(lower, upper)` through `dyn IndexRange`.

use alloc::{boxed::Box, vec::Vec};
use core::cmp::{Ord, Ordering};

/// An inclusive interval of curve indexes.
pub trait IndexRange: core::fmt::Debug {
    /// The lower index.
    fn lower(&self) -> u64;

    /// The upper index.
    fn upper(&self) -> u64;

    /// Whether every index in the interval lies inside the query.
    fn contained(&self) -> bool;

    /// Returns all three (lower, upper, contained) as a tuple.
    fn tuple(&self) -> (u64, u64, bool) {
        (self.lower(), self.upper(), self.contained())
    }

    /// True when `index` falls in `[lower, upper]`.
    fn contains(&self, index: u64) -> bool {
        self.lower() <= index && index <= self.upper()
    }
}

impl Ord for dyn IndexRange {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lower()
            .cmp(&other.lower())
            .then_with(|| self.upper().cmp(&other.upper()))
    }
}

impl PartialOrd for dyn IndexRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for dyn IndexRange {
    fn eq(&self, other: &Self) -> bool {
        self.lower() == other.lower() && self.upper() == other.upper()
    }
}

impl Eq for dyn IndexRange {}

/// A range whose cells all lie inside the query window.
#[derive(Debug, PartialEq, Eq)]
pub struct CoveredRange {
    upper: u64,
    lower: u64,
}

impl CoveredRange {
    /// Constructor.
    #[must_use]
    pub fn new(lower: u64, upper: u64) -> Self {
        CoveredRange { upper, lower }
    }
}

impl IndexRange for CoveredRange {
    fn upper(&self) -> u64 {
        self.upper
    }

    fn lower(&self) -> u64 {
        self.lower
    }

    fn contained(&self) -> bool {
        true
    }
}

/// A range that only partly overlaps the query window.
#[derive(Debug, PartialEq, Eq)]
pub struct OverlappingRange {
    upper: u64,
    lower: u64,
}

impl OverlappingRange {
    /// Constructor.
    #[must_use]
    pub fn new(lower: u64, upper: u64) -> Self {
        OverlappingRange { upper, lower }
    }
}

impl IndexRange for OverlappingRange {
    fn upper(&self) -> u64 {
        self.upper
    }

    fn lower(&self) -> u64 {
        self.lower
    }

    fn contained(&self) -> bool {
        false
    }
}

/// Sort `ranges` and merge the ones that touch or overlap.
///
/// A merged range stays covered only if both inputs were covered.
#[must_use]
pub fn merge(mut ranges: Vec<Box<dyn IndexRange>>) -> Vec<Box<dyn IndexRange>> {
    ranges.sort();

    let mut current: Option<Box<dyn IndexRange>> = None;
    let mut results = Vec::with_capacity(ranges.len());

    for range in ranges {
        match current.take() {
            Some(cur) if range.lower() <= cur.upper().saturating_add(1) => {
                let min = cur.lower();
                let max = cur.upper().max(range.upper());
                if cur.contained() && range.contained() {
                    current = Some(Box::new(CoveredRange::new(min, max)));
                } else {
                    current = Some(Box::new(OverlappingRange::new(min, max)));
                }
            }
            Some(cur) => {
                results.push(cur);
                current = Some(range);
            }
            None => current = Some(range),
        }
    }
    if let Some(cur) = current {
        results.push(cur);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_sorts_by_lower_then_upper() {
        let mut ranges: Vec<Box<dyn IndexRange>> = vec![
            Box::new(CoveredRange::new(8, 9)),
            Box::new(OverlappingRange::new(2, 5)),
            Box::new(CoveredRange::new(2, 3)),
        ];
        ranges.sort();

        assert_eq!(ranges[0].tuple(), (2, 3, true));
        assert_eq!(ranges[1].tuple(), (2, 5, false));
        assert_eq!(ranges[2].tuple(), (8, 9, true));
    }

    #[test]
    fn test_merge_adjacent_covered() {
        let ranges: Vec<Box<dyn IndexRange>> = vec![
            Box::new(CoveredRange::new(4, 7)),
            Box::new(CoveredRange::new(0, 3)),
            Box::new(CoveredRange::new(12, 15)),
        ];
        let merged = merge(ranges);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].tuple(), (0, 7, true));
        assert_eq!(merged[1].tuple(), (12, 15, true));
    }

    #[test]
    fn test_merge_mixed_becomes_overlapping() {
        let ranges: Vec<Box<dyn IndexRange>> = vec![
            Box::new(CoveredRange::new(0, 3)),
            Box::new(OverlappingRange::new(4, 4)),
        ];
        let merged = merge(ranges);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].tuple(), (0, 4, false));
    }

    #[test]
    fn test_merge_at_u64_max() {
        let ranges: Vec<Box<dyn IndexRange>> = vec![
            Box::new(CoveredRange::new(u64::MAX - 1, u64::MAX)),
            Box::new(CoveredRange::new(u64::MAX, u64::MAX)),
        ];
        let merged = merge(ranges);

        assert_eq!(merged.len(), 1);
        assert!(merged[0].contains(u64::MAX));
        assert!(!merged[0].contains(0));
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge(Vec::new()).is_empty());
    }
}
