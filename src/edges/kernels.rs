//! Directional derivative kernels for the gradient-based edge strategies.
//!
//! Each pair is normalized so that a unit step produces a peak response of
//! one: Sobel by 4, Prewitt by 3, Scharr by 16. The Roberts cross operates
//! on 2×2 diagonal differences and is used as-is.

use crate::grid::TempGrid;

type Kernel3 = [[f32; 3]; 3];

/// A 3×3 derivative kernel pair with its normalization divisor.
pub(crate) struct KernelPair {
    pub x: Kernel3,
    pub y: Kernel3,
    pub norm: f32,
}

pub(crate) const SOBEL: KernelPair = KernelPair {
    x: [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]],
    y: [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]],
    norm: 4.0,
};

pub(crate) const PREWITT: KernelPair = KernelPair {
    x: [[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]],
    y: [[-1.0, -1.0, -1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
    norm: 3.0,
};

pub(crate) const SCHARR: KernelPair = KernelPair {
    x: [[-3.0, 0.0, 3.0], [-10.0, 0.0, 10.0], [-3.0, 0.0, 3.0]],
    y: [[-3.0, -10.0, -3.0], [0.0, 0.0, 0.0], [3.0, 10.0, 3.0]],
    norm: 16.0,
};

/// Convolve a 3×3 kernel pair with border clamping, returning `(gx, gy)`.
pub(crate) fn gradients_with_kernels(grid: &TempGrid, pair: &KernelPair) -> (TempGrid, TempGrid) {
    let w = grid.w;
    let h = grid.h;
    let mut gx = TempGrid::new(w, h);
    let mut gy = TempGrid::new(w, h);
    if w == 0 || h == 0 {
        return (gx, gy);
    }

    let inv_norm = 1.0 / pair.norm;
    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        let rows = [grid.row(y_idx[0]), grid.row(y_idx[1]), grid.row(y_idx[2])];
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, row) in rows.iter().enumerate() {
                let kx_row = &pair.x[ky];
                let ky_row = &pair.y[ky];
                sum_x += row[x_idx[0]] * kx_row[0]
                    + row[x_idx[1]] * kx_row[1]
                    + row[x_idx[2]] * kx_row[2];
                sum_y += row[x_idx[0]] * ky_row[0]
                    + row[x_idx[1]] * ky_row[1]
                    + row[x_idx[2]] * ky_row[2];
            }

            gx.set(x, y, sum_x * inv_norm);
            gy.set(x, y, sum_y * inv_norm);
        }
    }

    (gx, gy)
}

/// Roberts cross: 2×2 diagonal differences, clamped at the far border.
/// Returns the positive- and negative-diagonal responses.
pub(crate) fn roberts_gradients(grid: &TempGrid) -> (TempGrid, TempGrid) {
    let w = grid.w;
    let h = grid.h;
    let mut g_pos = TempGrid::new(w, h);
    let mut g_neg = TempGrid::new(w, h);
    for y in 0..h {
        let y1 = (y + 1).min(h.saturating_sub(1));
        for x in 0..w {
            let x1 = (x + 1).min(w.saturating_sub(1));
            let a = grid.get(x, y);
            let b = grid.get(x1, y);
            let c = grid.get(x, y1);
            let d = grid.get(x1, y1);
            g_pos.set(x, y, a - d);
            g_neg.set(x, y, b - c);
        }
    }
    (g_pos, g_neg)
}
