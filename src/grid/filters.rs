//! Separable, reflect-padded filter primitives shared by the engines.
//!
//! All filters use reflect boundary handling: index −1 maps back to 0,
//! index `n` back to `n − 1`, and so on symmetrically. No value outside the
//! grid is ever fabricated beyond that mirroring.

use super::TempGrid;

/// Axis along which a 1D kernel is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Along rows (horizontal).
    X,
    /// Along columns (vertical).
    Y,
}

/// Reflect an out-of-range index back into `[0, n)`.
#[inline]
pub(crate) fn reflect(i: isize, n: usize) -> usize {
    debug_assert!(n > 0);
    let n = n as isize;
    let mut i = i;
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return i as usize;
        }
    }
}

/// Correlate a centered 1D kernel with the grid along `axis`, reflecting at
/// the borders. `taps.len()` must be odd.
pub fn convolve1d(grid: &TempGrid, taps: &[f32], axis: Axis) -> TempGrid {
    debug_assert!(taps.len() % 2 == 1, "kernel length must be odd");
    let half = (taps.len() / 2) as isize;
    let mut out = TempGrid::new(grid.w, grid.h);
    match axis {
        Axis::X => {
            for y in 0..grid.h {
                let src = grid.row(y);
                let dst = out.row_mut(y);
                for x in 0..grid.w {
                    let mut acc = 0.0;
                    for (k, &t) in taps.iter().enumerate() {
                        let xi = reflect(x as isize + k as isize - half, grid.w);
                        acc += src[xi] * t;
                    }
                    dst[x] = acc;
                }
            }
        }
        Axis::Y => {
            for y in 0..grid.h {
                for x in 0..grid.w {
                    let mut acc = 0.0;
                    for (k, &t) in taps.iter().enumerate() {
                        let yi = reflect(y as isize + k as isize - half, grid.h);
                        acc += grid.get(x, yi) * t;
                    }
                    out.set(x, y, acc);
                }
            }
        }
    }
    out
}

/// Normalized Gaussian taps for the given sigma, truncated at 4σ.
pub(crate) fn gaussian_taps(sigma: f32) -> Vec<f32> {
    let radius = (4.0 * sigma + 0.5).floor().max(1.0) as isize;
    let inv_two_sigma2 = 1.0 / (2.0 * sigma * sigma);
    let mut taps: Vec<f32> = (-radius..=radius)
        .map(|i| (-(i * i) as f32 * inv_two_sigma2).exp())
        .collect();
    let sum: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    taps
}

/// Separable Gaussian smoothing with reflect padding. `sigma <= 0` returns
/// the input unchanged.
pub fn gaussian_smooth(grid: &TempGrid, sigma: f32) -> TempGrid {
    if sigma <= 0.0 {
        return grid.clone();
    }
    let taps = gaussian_taps(sigma);
    let horiz = convolve1d(grid, &taps, Axis::X);
    convolve1d(&horiz, &taps, Axis::Y)
}

/// Uniform (box) mean over a `window × window` neighborhood, reflect-padded.
/// `window` must be odd so the kernel stays centered.
pub fn box_mean(grid: &TempGrid, window: usize) -> TempGrid {
    debug_assert!(window % 2 == 1, "box window must be odd");
    let taps = vec![1.0 / window as f32; window];
    let horiz = convolve1d(grid, &taps, Axis::X);
    convolve1d(&horiz, &taps, Axis::Y)
}
