//! Moving-window Pearson correlation between master and slave grids.
//!
//! For every pixel, the correlation coefficient is computed over a
//! reflect-padded `window × window` neighborhood. Instead of the naive
//! O(H·W·window²) per-pixel loop, the map is assembled from five separable
//! windowed means (x, y, x², y², xy), which is O(H·W) and equal to the
//! direct definition up to floating-point rounding.
//!
//! Constant neighborhoods make the denominator degenerate; those pixels are
//! assigned correlation 0 by convention rather than treated as errors.

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use super::ensure_same_shape;
use crate::error::Result;
use crate::gradient::check_window;
use crate::grid::{box_mean, BoolGrid, TempGrid};

/// Below this value the windowed sum-of-squares product counts as
/// degenerate and the correlation is defined as 0.
const DEGENERATE_DENOMINATOR: f32 = 1e-10;

/// Spatial correlation map with low-correlation flagging.
#[derive(Clone, Debug, Serialize)]
pub struct CorrelationResult {
    /// Per-pixel Pearson correlation, bounded in [-1, 1].
    pub correlation_map: TempGrid,
    /// Pixels whose correlation falls strictly below the threshold.
    pub low_correlation_mask: Option<BoolGrid>,
    pub correlation_threshold: f32,
    pub window_size: usize,
}

/// Correlate master and slave neighborhoods at every pixel and flag regions
/// where the local pattern has changed.
pub fn compute_spatial_correlation(
    master: &TempGrid,
    slave: &TempGrid,
    window_size: usize,
    threshold: f32,
) -> Result<CorrelationResult> {
    ensure_same_shape(master, slave)?;
    check_window(window_size)?;

    let n = (window_size * window_size) as f32;
    let mean_x = box_mean(master, window_size);
    let mean_y = box_mean(slave, window_size);
    let mean_xx = box_mean(&master.zip_map(master, |a, b| a * b), window_size);
    let mean_yy = box_mean(&slave.zip_map(slave, |a, b| a * b), window_size);
    let mean_xy = box_mean(&master.zip_map(slave, |a, b| a * b), window_size);

    let w = master.w;
    let mut correlation_map = TempGrid::new(w, master.h);
    correlation_map
        .data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out_row)| {
            let mx = mean_x.row(y);
            let my = mean_y.row(y);
            let mxx = mean_xx.row(y);
            let myy = mean_yy.row(y);
            let mxy = mean_xy.row(y);
            for x in 0..w {
                let cov_sum = n * (mxy[x] - mx[x] * my[x]);
                let var_x_sum = (n * (mxx[x] - mx[x] * mx[x])).max(0.0);
                let var_y_sum = (n * (myy[x] - my[x] * my[x])).max(0.0);
                let denominator = (var_x_sum * var_y_sum).sqrt();
                out_row[x] = if denominator < DEGENERATE_DENOMINATOR {
                    0.0
                } else {
                    (cov_sum / denominator).clamp(-1.0, 1.0)
                };
            }
        });

    let mut low_correlation_mask = BoolGrid::new(w, master.h);
    for (dst, &c) in low_correlation_mask
        .data
        .iter_mut()
        .zip(correlation_map.data.iter())
    {
        *dst = c < threshold;
    }
    debug!(
        "spatial correlation: {}x{}, window={}, threshold={}, low={}",
        master.w,
        master.h,
        window_size,
        threshold,
        low_correlation_mask.count_true()
    );

    Ok(CorrelationResult {
        correlation_map,
        low_correlation_mask: Some(low_correlation_mask),
        correlation_threshold: threshold,
        window_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textured(w: usize, h: usize) -> TempGrid {
        let mut g = TempGrid::new(w, h);
        for y in 0..h {
            for x in 0..w {
                g.set(x, y, 20.0 + ((x * 3 + y * 7) % 11) as f32);
            }
        }
        g
    }

    #[test]
    fn anticorrelated_neighborhoods_reach_minus_one() {
        // Slave is the master reflected around its mean: correlation −1
        // wherever the neighborhood is non-constant.
        let master = textured(9, 9);
        let slave = master.map(|v| 50.0 - v);
        let r = compute_spatial_correlation(&master, &slave, 3, 0.7).unwrap();
        let c = r.correlation_map.get(4, 4);
        assert!((c + 1.0).abs() < 1e-3, "expected -1, got {c}");
    }

    #[test]
    fn constant_grids_are_degenerate_zero() {
        let master = TempGrid::filled(6, 6, 20.0);
        let slave = TempGrid::filled(6, 6, 25.0);
        let r = compute_spatial_correlation(&master, &slave, 3, 0.5).unwrap();
        assert!(r.correlation_map.data.iter().all(|&c| c == 0.0));
        // 0 < 0.5: every degenerate pixel counts as low correlation.
        assert_eq!(r.low_correlation_mask.unwrap().count_true(), 36);
    }

    #[test]
    fn map_is_bounded() {
        let master = textured(12, 10);
        let slave = master.map(|v| v * 1.3 - 2.0);
        let r = compute_spatial_correlation(&master, &slave, 5, 0.7).unwrap();
        assert!(r
            .correlation_map
            .data
            .iter()
            .all(|&c| (-1.0..=1.0).contains(&c)));
    }
}
