//! Binning and quartiles behind the `hist` and `boxplot` routines.

use std::cmp::Ordering;

/// Five-number summary of one box, whiskers at 1.5 * IQR.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Summary of the finite entries of `values`; `None` when there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted_finite(values);
        if sorted.is_empty() {
            return None;
        }
        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let lower_fence = q1 - 1.5 * iqr;
        let upper_fence = q3 + 1.5 * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&x| x >= lower_fence)
            .unwrap_or(sorted[0]);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&x| x <= upper_fence)
            .unwrap_or(sorted[sorted.len() - 1]);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&x| x < lower_fence || x > upper_fence)
            .collect();

        Some(Self {
            whisker_low,
            q1,
            median,
            q3,
            whisker_high,
            outliers,
        })
    }
}

/// Equal-width bins: `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Bins {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Sturges' rule: `ceil(log2(n)) + 1`, at least 1.
pub fn sturges_bin_count(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    ((n as f64).log2().ceil() as usize + 1).max(1)
}

/// Histogram of the finite entries of `values` with Sturges' bin count.
///
/// Bins are half-open except the last, which includes the maximum. A constant
/// input is binned over `[v - 0.5, v + 0.5]`.
pub fn histogram(values: &[f64]) -> Bins {
    let sorted = sorted_finite(values);
    let (Some(&first), Some(&last)) = (sorted.first(), sorted.last()) else {
        return Bins {
            edges: vec![0.0, 1.0],
            counts: vec![0],
        };
    };
    let (lo, hi) = if (last - first).abs() < f64::EPSILON {
        (first - 0.5, last + 0.5)
    } else {
        (first, last)
    };

    let bins = sturges_bin_count(sorted.len());
    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for v in sorted {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Bins { edges, counts }
}

fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let k = (p / 100.0) * (sorted.len() - 1) as f64;
    let f = k.floor() as usize;
    let c = k.ceil() as usize;
    if f == c || c >= sorted.len() {
        sorted[f.min(sorted.len() - 1)]
    } else {
        let d = k - f as f64;
        sorted[f] * (1.0 - d) + sorted[c] * d
    }
}
