//! Flat summary metrics for any comparison result.
//!
//! The record is a flat mapping of scalar statistics; fields that do not
//! apply to the given method, or that depend on an absent significance mask,
//! are left as `None` and skipped during serialization. An absent mask is
//! not an error — the dependent counts are silently omitted.

use serde::Serialize;

use super::{ComparisonResult, DifferenceResult};
use crate::grid::{BoolGrid, TempGrid};

/// Scalar summary statistics derived from a [`ComparisonResult`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ComparisonMetrics {
    // Difference-based methods
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_diff: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_diff: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_diff: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_diff: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub significant_pixel_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positive_changes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_changes: Option<usize>,
    // Statistical method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_zscore: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_zscore: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zscore: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_zscore: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positive_significant: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_significant: Option<usize>,
    // Correlation method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_correlation: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_correlation: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_correlation_count: Option<usize>,
}

/// Mean, population standard deviation, max, and min of a grid.
fn summary(grid: &TempGrid) -> (f32, f32, f32, f32) {
    let n = grid.data.len().max(1) as f64;
    let mean = grid.data.iter().map(|&v| v as f64).sum::<f64>() / n;
    let var = grid
        .data
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    let (min, max) = grid.min_max();
    (mean as f32, var.sqrt() as f32, max, min)
}

/// Count masked pixels whose primary value matches `keep`.
fn count_signed(primary: &TempGrid, mask: &BoolGrid, keep: impl Fn(f32) -> bool) -> usize {
    primary
        .data
        .iter()
        .zip(mask.data.iter())
        .filter(|(&v, &m)| m && keep(v))
        .count()
}

fn difference_metrics(result: &DifferenceResult, metrics: &mut ComparisonMetrics) {
    let (mean, std, max, min) = summary(&result.difference);
    metrics.mean_diff = Some(mean);
    metrics.std_diff = Some(std);
    metrics.max_diff = Some(max);
    metrics.min_diff = Some(min);
    if let Some(mask) = &result.significant_changes {
        metrics.significant_pixel_count = Some(mask.count_true());
        metrics.positive_changes = Some(count_signed(&result.difference, mask, |v| v > 0.0));
        metrics.negative_changes = Some(count_signed(&result.difference, mask, |v| v < 0.0));
    }
}

/// Compute summary metrics for a comparison result. Sign splits use the sign
/// of the primary quantity, not the mask.
pub fn calculate_metrics(result: &ComparisonResult) -> ComparisonMetrics {
    let mut metrics = ComparisonMetrics::default();
    match result {
        ComparisonResult::DirectDiff(r) => difference_metrics(r, &mut metrics),
        ComparisonResult::GradientDiff(r) => difference_metrics(&r.diff, &mut metrics),
        ComparisonResult::SmoothedDiff(r) => difference_metrics(&r.diff, &mut metrics),
        ComparisonResult::Statistical(r) => {
            let (mean, std, max, min) = summary(&r.zscores);
            metrics.mean_zscore = Some(mean);
            metrics.std_zscore = Some(std);
            metrics.max_zscore = Some(max);
            metrics.min_zscore = Some(min);
            if let Some(mask) = &r.significant_changes {
                metrics.significant_pixel_count = Some(mask.count_true());
                metrics.positive_significant = Some(count_signed(&r.zscores, mask, |v| v > 0.0));
                metrics.negative_significant = Some(count_signed(&r.zscores, mask, |v| v < 0.0));
            }
        }
        ComparisonResult::Correlation(r) => {
            let (mean, _, _, min) = summary(&r.correlation_map);
            metrics.mean_correlation = Some(mean);
            metrics.min_correlation = Some(min);
            if let Some(mask) = &r.low_correlation_mask {
                metrics.low_correlation_count = Some(mask.count_true());
            }
        }
    }
    metrics
}
