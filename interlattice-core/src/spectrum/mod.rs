//! Spectral analysis of an interference lattice.
//!
//! | Spectrum | Input | Cost bound | Key precision |
//! |----------|-------|------------|---------------|
//! | distances | points | first `max_pairs` pairs | 6 digits (in units) |
//! | directions | points | first `max_pairs` pairs | 9 digits |
//! | angles | directions | all pairs | 2 digits |
//! | ratios | distance histogram | all pairs of bins | n/a |
//!
//! ## Sampling caps
//!
//! Pairwise spectra over `n` points cost `O(n²)`. Distances and directions
//! visit pairs in combinatorial order `(0,1), (0,2), …, (1,2), …` and stop
//! after `max_pairs`. This is truncation, not statistical sampling: pairs
//! that only occur late in that order are never seen. Counts asserted in
//! tests depend on this exact order.

mod angles;
mod directions;
mod distances;
mod ratios;

pub use angles::{
    analyze_angles, classify_special_angles, SpecialAngleCount, ANGLE_DIGITS, SPECIAL_ANGLES,
    SPECIAL_ANGLE_WINDOW,
};
pub use directions::{
    analyze_directions, canonicalize_direction, icosahedral_alignment, icosahedral_axis,
    AlignmentStrength, IcosahedralMatch,
};
pub use distances::{analyze_distances, analyze_distances_in_units, DISTANCE_DIGITS};
pub use ratios::{
    scan_for_phi, scan_for_ratio, scan_notable_ratios, PhiCandidate, RatioCandidate, RatioCount,
    NOTABLE_RATIOS,
};

use crate::dedup::{dequantize, quantize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One histogram bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Bucket value, rounded to the histogram's precision
    pub value: f64,
    /// First unrounded value that landed in this bucket
    pub representative: f64,
    pub count: usize,
}

/// Histogram of values rounded to a fixed number of decimal digits,
/// sorted by value ascending.
///
/// Values are rounded in multiples of `unit` (1 unless built with
/// [`Histogram::from_values_in_units`]): a bucket holds values whose
/// `value / unit` agree to `digits` decimal digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    digits: u32,
    #[serde(default = "unit_length")]
    unit: f64,
    bins: Vec<HistogramBin>,
}

fn unit_length() -> f64 {
    1.0
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            digits: 0,
            unit: unit_length(),
            bins: Vec::new(),
        }
    }
}

impl Histogram {
    /// Bucket `values` after rounding to `digits` decimal digits
    pub fn from_values<I>(values: I, digits: u32) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self::from_values_in_units(values, digits, unit_length())
    }

    /// Bucket `values` after rounding `value / unit` to `digits` decimal
    /// digits. Bucket values are reported back in the original scale.
    ///
    /// `unit` must be positive and finite.
    pub fn from_values_in_units<I>(values: I, digits: u32, unit: f64) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let inv = 1.0 / unit;
        let mut buckets: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
        for value in values {
            buckets
                .entry(quantize(value * inv, digits))
                .or_insert((value, 0))
                .1 += 1;
        }

        let bins = buckets
            .into_iter()
            .map(|(key, (representative, count))| HistogramBin {
                value: dequantize(key, digits) * unit,
                representative,
                count,
            })
            .collect();

        Self { digits, unit, bins }
    }

    /// Rounding precision of the bucket values
    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// Length unit the rounding grid is measured in
    pub fn unit(&self) -> f64 {
        self.unit
    }

    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    /// Number of distinct buckets
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Bucket values, ascending
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.bins.iter().map(|b| b.value)
    }

    /// Unrounded representatives, in bucket order
    pub fn representatives(&self) -> impl Iterator<Item = f64> + '_ {
        self.bins.iter().map(|b| b.representative)
    }

    /// Sum of all counts
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Sum of counts of buckets within `window` of `center`
    pub fn count_within(&self, center: f64, window: f64) -> usize {
        self.bins
            .iter()
            .filter(|b| (b.value - center).abs() <= window)
            .map(|b| b.count)
            .sum()
    }

    /// Count of the bucket holding `value`, if any
    pub fn count_of(&self, value: f64) -> usize {
        let key = quantize(value / self.unit, self.digits);
        self.bins
            .iter()
            .find(|b| quantize(b.value / self.unit, self.digits) == key)
            .map_or(0, |b| b.count)
    }
}

/// Index pairs `(i, j)`, `i < j < n`, in combinatorial order, stopping
/// after `max_pairs`.
pub(crate) fn capped_pairs(n: usize, max_pairs: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n)
        .flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
        .take(max_pairs)
}

/// Number of pairs [`capped_pairs`] yields
pub(crate) fn capped_pair_count(n: usize, max_pairs: usize) -> usize {
    (n * n.saturating_sub(1) / 2).min(max_pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_sorted_and_rounded() {
        let h = Histogram::from_values([2.0, 1.0000001, 1.0, 3.5, 2.0], 6);
        let values: Vec<f64> = h.values().collect();
        assert_eq!(values, vec![1.0, 2.0, 3.5]);
        assert_eq!(h.bins()[0].count, 2);
        assert_eq!(h.total_count(), 5);
        assert_eq!(h.count_of(2.0), 2);
        assert_eq!(h.count_of(9.0), 0);
    }

    #[test]
    fn test_count_within_window() {
        let h = Histogram::from_values([89.7, 90.0, 90.0, 90.4, 91.0], 2);
        assert_eq!(h.count_within(90.0, 0.5), 4);
        assert_eq!(h.count_within(45.0, 0.5), 0);
    }

    #[test]
    fn test_representative_is_first_unrounded_value() {
        let h = Histogram::from_values([1.0000004, 1.0000001, 2.0], 6);
        assert_eq!(h.bins()[0].value, 1.0);
        assert_eq!(h.bins()[0].representative, 1.0000004);
        assert_eq!(h.bins()[0].count, 2);
        assert_eq!(h.representatives().collect::<Vec<_>>(), vec![1.0000004, 2.0]);
    }

    #[test]
    fn test_grid_measured_in_units() {
        // 3e-7 apart: one bucket in unit 1, two once measured in units of 0.1
        let values = [0.1, 0.1000003];
        assert_eq!(Histogram::from_values(values, 6).len(), 1);

        let h = Histogram::from_values_in_units(values, 6, 0.1);
        assert_eq!(h.len(), 2);
        assert_eq!(h.unit(), 0.1);
        assert_eq!(h.count_of(0.1), 1);
        assert!((h.bins()[1].value - 0.1000003).abs() < 1e-12);
    }

    #[test]
    fn test_empty_histogram() {
        let h = Histogram::from_values(std::iter::empty(), 6);
        assert!(h.is_empty());
        assert_eq!(h.total_count(), 0);
        assert_eq!(Histogram::default().unit(), 1.0);
    }

    #[test]
    fn test_capped_pairs_order() {
        let pairs: Vec<_> = capped_pairs(4, 4).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2)]);
        assert_eq!(capped_pairs(4, 100).count(), 6);
        assert_eq!(capped_pairs(1, 100).count(), 0);
        assert_eq!(capped_pairs(0, 100).count(), 0);
        assert_eq!(capped_pair_count(4, 4), 4);
        assert_eq!(capped_pair_count(4, 100), 6);
        assert_eq!(capped_pair_count(0, 100), 0);
    }
}
