//! Statistical significance of change against the master's local noise.
//!
//! The master image provides its own null model: a box-filtered local mean
//! and local standard deviation. The observed change `slave − master` is
//! converted to a z-score against the local noise scale, so a fixed absolute
//! temperature threshold is not required; significance adapts spatially.

use log::debug;
use serde::Serialize;

use super::ensure_same_shape;
use crate::error::Result;
use crate::gradient::check_window;
use crate::grid::{box_mean, BoolGrid, TempGrid};

/// Floor applied to local standard deviations before dividing.
const STD_EPSILON: f32 = 1e-3;

/// Z-score comparison of a slave grid against the master's local statistics.
#[derive(Clone, Debug, Serialize)]
pub struct StatisticalResult {
    /// `(slave − master) / max(local_stds, 1e-3)`
    pub zscores: TempGrid,
    /// Pixels where `|zscore|` strictly exceeds the threshold.
    pub significant_changes: Option<BoolGrid>,
    /// Local box-filtered means of the master grid.
    pub local_means: TempGrid,
    /// Local standard deviations of the master grid (unclamped).
    pub local_stds: TempGrid,
    pub zscore_threshold: f32,
    pub window_size: usize,
}

/// Compare `slave` against `master` using the master's windowed mean and
/// standard deviation as the null-hypothesis scale.
pub fn compute_statistical_significance(
    master: &TempGrid,
    slave: &TempGrid,
    window_size: usize,
    zscore_threshold: f32,
) -> Result<StatisticalResult> {
    ensure_same_shape(master, slave)?;
    check_window(window_size)?;

    let local_means = box_mean(master, window_size);
    let squared_deviations = master.zip_map(&local_means, |m, mu| (m - mu) * (m - mu));
    let local_variance = box_mean(&squared_deviations, window_size);
    let local_stds = local_variance.map(|v| v.max(0.0).sqrt());

    let differences = slave.zip_map(master, |s, m| s - m);
    let zscores = differences.zip_map(&local_stds, |d, sd| d / sd.max(STD_EPSILON));

    let mut significant = BoolGrid::new(zscores.w, zscores.h);
    for (dst, &z) in significant.data.iter_mut().zip(zscores.data.iter()) {
        *dst = z.abs() > zscore_threshold;
    }
    debug!(
        "statistical significance: {}x{}, window={}, z-threshold={}, flagged={}",
        master.w,
        master.h,
        window_size,
        zscore_threshold,
        significant.count_true()
    );

    Ok(StatisticalResult {
        zscores,
        significant_changes: Some(significant),
        local_means,
        local_stds,
        zscore_threshold,
        window_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: usize, h: usize) -> TempGrid {
        let mut g = TempGrid::new(w, h);
        for y in 0..h {
            for x in 0..w {
                g.set(x, y, 18.0 + 0.5 * x as f32 + 0.25 * y as f32);
            }
        }
        g
    }

    #[test]
    fn hot_spot_in_quiet_scene_is_significant() {
        let master = ramp(9, 9);
        let mut slave = master.clone();
        slave.set(4, 4, master.get(4, 4) + 50.0);
        let r = compute_statistical_significance(&master, &slave, 5, 2.0).unwrap();
        assert!(r.significant_changes.unwrap().get(4, 4));
        assert!(r.zscores.get(4, 4) > 10.0);
    }

    #[test]
    fn outputs_are_finite_for_constant_master() {
        // Constant master has zero local std everywhere; the epsilon floor
        // keeps z-scores finite.
        let master = TempGrid::filled(7, 7, 20.0);
        let mut slave = master.clone();
        slave.set(3, 3, 20.5);
        let r = compute_statistical_significance(&master, &slave, 3, 2.0).unwrap();
        assert!(r.zscores.data.iter().all(|v| v.is_finite()));
        assert!(r.zscores.get(3, 3) > 0.0);
    }
}
