//! Direct, gradient-preprocessed, and smoothed difference engines.
//!
//! All three share the same core: `difference = slave − master`, optional
//! rescale to percent of the master value, and a strict-threshold
//! significance mask. The preprocessed variants apply the same logic to
//! derived grids (gradient magnitudes or Gaussian-smoothed copies) and
//! return those grids alongside the result for inspection.

use log::debug;
use serde::Serialize;

use super::ensure_same_shape;
use crate::error::Result;
use crate::gradient::gradient_magnitude;
use crate::grid::{gaussian_smooth, BoolGrid, TempGrid};

/// Floor applied to |master| in relative mode to keep percentages finite.
const RELATIVE_EPSILON: f32 = 1e-5;

/// Pixel-wise difference between two grids with significance masking.
#[derive(Clone, Debug, Serialize)]
pub struct DifferenceResult {
    /// `slave − master`, in °C, or in percent of the master when relative.
    pub difference: TempGrid,
    /// Pixels where `|difference|` strictly exceeds the threshold.
    pub significant_changes: Option<BoolGrid>,
    /// Threshold used for the mask (°C, or percent when relative).
    pub threshold_value: f32,
    /// Whether `difference` is a relative (percent) quantity.
    pub is_relative: bool,
}

/// Difference of gradient magnitudes, with both gradient grids retained.
#[derive(Clone, Debug, Serialize)]
pub struct GradientDifference {
    pub diff: DifferenceResult,
    pub master_gradient: TempGrid,
    pub slave_gradient: TempGrid,
    pub window_size: usize,
}

/// Difference of Gaussian-smoothed grids, with both smoothed grids retained.
#[derive(Clone, Debug, Serialize)]
pub struct SmoothedDifference {
    pub diff: DifferenceResult,
    pub smoothed_master: TempGrid,
    pub smoothed_slave: TempGrid,
    pub window_size: usize,
}

/// Shared difference core. Inputs are already shape-checked.
fn difference_of(
    master: &TempGrid,
    slave: &TempGrid,
    threshold: f32,
    relative: bool,
) -> DifferenceResult {
    let mut difference = slave.zip_map(master, |s, m| s - m);
    if relative {
        difference = difference.zip_map(master, |d, m| {
            let safe = if m.abs() > RELATIVE_EPSILON {
                m
            } else {
                RELATIVE_EPSILON
            };
            d / safe.abs() * 100.0
        });
    }

    let mut significant = BoolGrid::new(difference.w, difference.h);
    for (dst, &d) in significant.data.iter_mut().zip(difference.data.iter()) {
        *dst = d.abs() > threshold;
    }

    DifferenceResult {
        difference,
        significant_changes: Some(significant),
        threshold_value: threshold,
        is_relative: relative,
    }
}

/// Direct difference between master and slave grids.
///
/// `threshold` is in °C for absolute mode, in percent for relative mode.
/// Equality with the threshold is not significant.
pub fn compute_difference(
    master: &TempGrid,
    slave: &TempGrid,
    threshold: f32,
    relative: bool,
) -> Result<DifferenceResult> {
    ensure_same_shape(master, slave)?;
    let result = difference_of(master, slave, threshold, relative);
    debug!(
        "direct difference: {}x{}, threshold={}, relative={}, flagged={}",
        master.w,
        master.h,
        threshold,
        relative,
        result
            .significant_changes
            .as_ref()
            .map_or(0, BoolGrid::count_true)
    );
    Ok(result)
}

/// Difference of gradient magnitudes, highlighting changes in thermal
/// structure rather than absolute temperature.
pub fn compute_gradient_preprocessed_difference(
    master: &TempGrid,
    slave: &TempGrid,
    window_size: usize,
    threshold: f32,
    relative: bool,
) -> Result<GradientDifference> {
    ensure_same_shape(master, slave)?;
    let master_gradient = gradient_magnitude(master, window_size)?;
    let slave_gradient = gradient_magnitude(slave, window_size)?;
    let diff = difference_of(&master_gradient, &slave_gradient, threshold, relative);
    debug!(
        "gradient difference: {}x{}, window={}, flagged={}",
        master.w,
        master.h,
        window_size,
        diff.significant_changes
            .as_ref()
            .map_or(0, BoolGrid::count_true)
    );
    Ok(GradientDifference {
        diff,
        master_gradient,
        slave_gradient,
        window_size,
    })
}

/// Difference of Gaussian-smoothed grids. Smoothing sigma is derived from
/// the window size as `window_size / 3`.
pub fn compute_smoothed_difference(
    master: &TempGrid,
    slave: &TempGrid,
    window_size: usize,
    threshold: f32,
    relative: bool,
) -> Result<SmoothedDifference> {
    ensure_same_shape(master, slave)?;
    let sigma = window_size as f32 / 3.0;
    let smoothed_master = gaussian_smooth(master, sigma);
    let smoothed_slave = gaussian_smooth(slave, sigma);
    let diff = difference_of(&smoothed_master, &smoothed_slave, threshold, relative);
    debug!(
        "smoothed difference: {}x{}, window={}, sigma={:.3}, flagged={}",
        master.w,
        master.h,
        window_size,
        sigma,
        diff.significant_changes
            .as_ref()
            .map_or(0, BoolGrid::count_true)
    );
    Ok(SmoothedDifference {
        diff,
        smoothed_master,
        smoothed_slave,
        window_size,
    })
}
