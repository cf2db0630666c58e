//! Ratio scans over a distance spectrum.
//!
//! Looks for pairs of distinct distances whose ratio sits near φ or another
//! notable constant. Only numerically close pairs within the sampled
//! distance set are found; exact relationships outside it are not.
//!
//! Ratios are taken between the unrounded representatives of two buckets,
//! never between rounded bucket values, so rounding error does not depend on
//! the scale of the lattice.

use super::Histogram;
use crate::{EPS, PHI};
use serde::{Deserialize, Serialize};

/// Ratios reported alongside φ
pub const NOTABLE_RATIOS: [(&str, f64); 5] = [
    ("phi", PHI),
    ("sqrt2", std::f64::consts::SQRT_2),
    ("sqrt3", 1.732_050_807_568_877_2),
    ("double", 2.0),
    ("phi_squared", PHI + 1.0),
];

/// A distance pair `(larger, smaller)` with `larger / smaller` near a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioCandidate {
    pub larger: f64,
    pub smaller: f64,
    pub ratio: f64,
}

/// A [`RatioCandidate`] for φ
pub type PhiCandidate = RatioCandidate;

/// Number of candidates found for one notable ratio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioCount {
    pub name: String,
    pub target: f64,
    pub count: usize,
}

/// All pairs of distinct histogram buckets `b < a` with `|a/b − target| < tol`.
///
/// `a` and `b` are the buckets' representatives. Buckets below
/// `EPS · unit` never act as the denominator. Results follow the ascending
/// order of the histogram (outer loop on `b`), not closeness.
pub fn scan_for_ratio(distances: &Histogram, target: f64, tol: f64) -> Vec<RatioCandidate> {
    let values: Vec<f64> = distances.representatives().collect();
    let floor = EPS * distances.unit();
    let mut candidates = Vec::new();

    for (i, &smaller) in values.iter().enumerate() {
        if smaller < floor {
            continue;
        }
        for &larger in &values[i + 1..] {
            let ratio = larger / smaller;
            if (ratio - target).abs() < tol {
                candidates.push(RatioCandidate {
                    larger,
                    smaller,
                    ratio,
                });
            }
        }
    }

    candidates
}

/// Distance pairs whose ratio is within `tol` of φ
pub fn scan_for_phi(distances: &Histogram, tol: f64) -> Vec<PhiCandidate> {
    scan_for_ratio(distances, PHI, tol)
}

/// Candidate counts for every entry of [`NOTABLE_RATIOS`]
pub fn scan_notable_ratios(distances: &Histogram, tol: f64) -> Vec<RatioCount> {
    NOTABLE_RATIOS
        .iter()
        .map(|&(name, target)| RatioCount {
            name: name.to_string(),
            target,
            count: scan_for_ratio(distances, target, tol).len(),
        })
        .collect()
}
