//! Master/slave thermal comparison engines.
//!
//! Five interchangeable strategies quantify change between two co-registered
//! temperature grids:
//!
//! - direct difference (raw °C or relative percent) with significance masking,
//! - gradient-preprocessed difference (change in thermal structure),
//! - Gaussian-smoothed difference (noise-robust trends),
//! - statistical significance (z-scores against the master's local noise),
//! - moving-window spatial correlation (pattern change).
//!
//! Each engine is a pure function: it validates shapes up front, allocates
//! fresh output grids, and returns an immutable result record. The
//! [`ComparisonResult`] union carries any of the five records into
//! [`calculate_metrics`].

pub mod correlation;
pub mod difference;
pub mod metrics;
pub mod statistical;

pub use self::correlation::{compute_spatial_correlation, CorrelationResult};
pub use self::difference::{
    compute_difference, compute_gradient_preprocessed_difference, compute_smoothed_difference,
    DifferenceResult, GradientDifference, SmoothedDifference,
};
pub use self::metrics::{calculate_metrics, ComparisonMetrics};
pub use self::statistical::{compute_statistical_significance, StatisticalResult};

use crate::error::{AnalysisError, Result};
use crate::grid::TempGrid;
use serde::Serialize;

/// Result of any comparison strategy, tagged by method.
#[derive(Clone, Debug, Serialize)]
pub enum ComparisonResult {
    DirectDiff(DifferenceResult),
    GradientDiff(GradientDifference),
    SmoothedDiff(SmoothedDifference),
    Statistical(StatisticalResult),
    Correlation(CorrelationResult),
}

/// Reject mismatched master/slave dimensions before any computation.
pub(crate) fn ensure_same_shape(master: &TempGrid, slave: &TempGrid) -> Result<()> {
    if master.shape() != slave.shape() {
        return Err(AnalysisError::ShapeMismatch {
            master: master.shape(),
            slave: slave.shape(),
        });
    }
    Ok(())
}
