//! Edge-detection strategy dispatch.
//!
//! A method name selects one of five strategies; every strategy produces the
//! same result shape: a binary edge mask, a gradient-magnitude grid, and a
//! gradient-direction grid in radians. Canny has its own thinning and
//! hysteresis pipeline but reports magnitude and direction from an
//! independent Sobel pass so results stay comparable across methods.

use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use super::canny::hysteresis_edges;
use super::kernels::{gradients_with_kernels, roberts_gradients, PREWITT, SCHARR, SOBEL};
use crate::error::{AnalysisError, Result};
use crate::grid::{gaussian_smooth, BoolGrid, TempGrid};

/// The five supported edge-detection strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMethod {
    Sobel,
    Canny,
    Prewitt,
    Roberts,
    Scharr,
}

impl FromStr for EdgeMethod {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sobel" => Ok(EdgeMethod::Sobel),
            "canny" => Ok(EdgeMethod::Canny),
            "prewitt" => Ok(EdgeMethod::Prewitt),
            "roberts" => Ok(EdgeMethod::Roberts),
            "scharr" => Ok(EdgeMethod::Scharr),
            _ => Err(AnalysisError::UnsupportedMethod {
                name: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for EdgeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EdgeMethod::Sobel => "sobel",
            EdgeMethod::Canny => "canny",
            EdgeMethod::Prewitt => "prewitt",
            EdgeMethod::Roberts => "roberts",
            EdgeMethod::Scharr => "scharr",
        };
        f.write_str(name)
    }
}

/// Numeric configuration for edge detection.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    /// Gradient-magnitude threshold (°C per pixel).
    pub threshold: f32,
    /// Gaussian pre-smoothing sigma; `<= 0` skips smoothing.
    pub sigma: f32,
    /// Canny low threshold; defaults to `0.5 · threshold`.
    pub low_threshold: Option<f32>,
    /// Canny high threshold; defaults to `threshold`.
    pub high_threshold: Option<f32>,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            threshold: 1.5,
            sigma: 1.0,
            low_threshold: None,
            high_threshold: None,
        }
    }
}

/// Edge mask plus the gradient fields it was derived from.
#[derive(Clone, Debug, Serialize)]
pub struct EdgeResult {
    /// Binary edge mask.
    pub edges: BoolGrid,
    /// Gradient magnitude, ≥ 0.
    pub gradient_magnitude: TempGrid,
    /// Gradient direction `atan2(gy, gx)` in radians, range (−π, π].
    pub gradient_direction: TempGrid,
}

fn magnitude_direction(gx: &TempGrid, gy: &TempGrid) -> (TempGrid, TempGrid) {
    let mag = gx.zip_map(gy, |x, y| (x * x + y * y).sqrt());
    let dir = gy.zip_map(gx, |y, x| y.atan2(x));
    (mag, dir)
}

/// Detect edges using a method selected by name.
///
/// Unknown names are rejected with [`AnalysisError::UnsupportedMethod`]
/// before any computation.
pub fn detect_edges(grid: &TempGrid, method: &str, params: &EdgeParams) -> Result<EdgeResult> {
    detect_edges_with(grid, EdgeMethod::from_str(method)?, params)
}

/// Detect edges with an already-resolved method.
pub fn detect_edges_with(
    grid: &TempGrid,
    method: EdgeMethod,
    params: &EdgeParams,
) -> Result<EdgeResult> {
    let smoothed = gaussian_smooth(grid, params.sigma);

    let result = match method {
        EdgeMethod::Sobel => threshold_gradients(gradients_with_kernels(&smoothed, &SOBEL), params),
        EdgeMethod::Prewitt => {
            threshold_gradients(gradients_with_kernels(&smoothed, &PREWITT), params)
        }
        EdgeMethod::Scharr => {
            threshold_gradients(gradients_with_kernels(&smoothed, &SCHARR), params)
        }
        EdgeMethod::Roberts => threshold_gradients(roberts_gradients(&smoothed), params),
        EdgeMethod::Canny => {
            let low = params.low_threshold.unwrap_or(0.5 * params.threshold);
            let high = params.high_threshold.unwrap_or(params.threshold);
            let (gx, gy) = gradients_with_kernels(&smoothed, &SOBEL);
            let (gradient_magnitude, gradient_direction) = magnitude_direction(&gx, &gy);
            let edges = hysteresis_edges(&gx, &gy, &gradient_magnitude, low, high);
            EdgeResult {
                edges,
                gradient_magnitude,
                gradient_direction,
            }
        }
    };
    debug!(
        "edge detection: {}x{}, method={}, threshold={}, sigma={}, edges={}",
        grid.w,
        grid.h,
        method,
        params.threshold,
        params.sigma,
        result.edges.count_true()
    );
    Ok(result)
}

/// Shared tail for the plain gradient strategies: magnitude, direction, and
/// a strict threshold on the magnitude.
fn threshold_gradients((gx, gy): (TempGrid, TempGrid), params: &EdgeParams) -> EdgeResult {
    let (gradient_magnitude, gradient_direction) = magnitude_direction(&gx, &gy);
    let mut edges = BoolGrid::new(gradient_magnitude.w, gradient_magnitude.h);
    for (dst, &m) in edges
        .data
        .iter_mut()
        .zip(gradient_magnitude.data.iter())
    {
        *dst = m > params.threshold;
    }
    EdgeResult {
        edges,
        gradient_magnitude,
        gradient_direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_parse_case_insensitively() {
        assert_eq!(EdgeMethod::from_str("Sobel").unwrap(), EdgeMethod::Sobel);
        assert_eq!(EdgeMethod::from_str("SCHARR").unwrap(), EdgeMethod::Scharr);
        assert!(matches!(
            EdgeMethod::from_str("laplacian"),
            Err(AnalysisError::UnsupportedMethod { .. })
        ));
    }

    #[test]
    fn uniform_grid_has_no_edges_for_any_method() {
        let g = TempGrid::filled(12, 12, 20.0);
        let params = EdgeParams::default();
        for method in ["sobel", "canny", "prewitt", "roberts", "scharr"] {
            let r = detect_edges(&g, method, &params).unwrap();
            assert!(r.edges.all_false(), "method {method} found edges");
            assert!(r.gradient_magnitude.data.iter().all(|&m| m.abs() < 1e-4));
        }
    }
}
