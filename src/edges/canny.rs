//! Canny-style edge detection: non-maximum suppression, double threshold,
//! and 8-connected hysteresis linking.
//!
//! The caller smooths the input first; this module works on Sobel gradients
//! of the already-smoothed grid. NMS compares each pixel's magnitude against
//! its two neighbors along the quantized gradient direction; the comparison
//! is non-strict toward the first neighbor and strict toward the second, so
//! a two-pixel tie (a sharp unsmoothed step) keeps exactly one side instead
//! of suppressing both. The outermost 1-pixel frame is ignored to avoid
//! out-of-bounds neighbor lookups.

use crate::grid::{BoolGrid, TempGrid};

const TAN_22_5_DEG: f32 = 0.41421356237;

/// Suppress non-maximal gradient responses, keeping magnitudes elsewhere 0.
fn non_maximum_suppression(gx: &TempGrid, gy: &TempGrid, mag: &TempGrid) -> TempGrid {
    let w = mag.w;
    let h = mag.h;
    let mut out = TempGrid::new(w, h);
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        let mag_prev = mag.row(y - 1);
        let mag_row = mag.row(y);
        let mag_next = mag.row(y + 1);
        let gx_row = gx.row(y);
        let gy_row = gy.row(y);

        for x in 1..w - 1 {
            let m = mag_row[x];
            if m == 0.0 {
                continue;
            }

            let gxv = gx_row[x];
            let gyv = gy_row[x];
            let abs_gx = gxv.abs();
            let abs_gy = gyv.abs();
            let same_sign = (gxv >= 0.0 && gyv >= 0.0) || (gxv <= 0.0 && gyv <= 0.0);

            let (neighbor1, neighbor2) = if abs_gx >= abs_gy {
                if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (mag_row[x - 1], mag_row[x + 1])
                } else if same_sign {
                    (mag_prev[x + 1], mag_next[x - 1])
                } else {
                    (mag_prev[x - 1], mag_next[x + 1])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x + 1], mag_next[x - 1])
            } else {
                (mag_prev[x - 1], mag_next[x + 1])
            };

            // Non-strict on one side breaks two-pixel ties in favor of the
            // neighbor2 direction.
            if m >= neighbor1 && m > neighbor2 {
                out.set(x, y, m);
            }
        }
    }

    out
}

/// Double threshold plus hysteresis: strong responses (`> high`) seed the
/// edge mask and recruit 8-connected weak responses (`> low`).
pub(crate) fn hysteresis_edges(
    gx: &TempGrid,
    gy: &TempGrid,
    mag: &TempGrid,
    low: f32,
    high: f32,
) -> BoolGrid {
    let w = mag.w;
    let h = mag.h;
    let thinned = non_maximum_suppression(gx, gy, mag);

    let mut edges = BoolGrid::new(w, h);
    let mut stack: Vec<(usize, usize)> = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if thinned.get(x, y) > high {
                edges.set(x, y, true);
                stack.push((x, y));
            }
        }
    }

    while let Some((x, y)) = stack.pop() {
        let x0 = x.saturating_sub(1);
        let y0 = y.saturating_sub(1);
        let x1 = (x + 1).min(w.saturating_sub(1));
        let y1 = (y + 1).min(h.saturating_sub(1));
        for ny in y0..=y1 {
            for nx in x0..=x1 {
                if !edges.get(nx, ny) && thinned.get(nx, ny) > low {
                    edges.set(nx, ny, true);
                    stack.push((nx, ny));
                }
            }
        }
    }

    edges
}
