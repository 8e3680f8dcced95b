//! JSON-backed parameter configuration for the analysis engines.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::edges::EdgeParams;

#[derive(Debug, Default, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub compare: CompareConfig,
    #[serde(default)]
    pub edge: EdgeConfig,
}

/// Thresholds and window sizes for the comparison engines.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Difference significance threshold (°C, or percent when relative).
    pub threshold: f32,
    /// Report relative (percent) differences instead of absolute.
    pub relative: bool,
    /// Window for gradient / smoothing preprocessing.
    pub window_size: usize,
    /// Window for local statistics in the z-score engine.
    pub stat_window_size: usize,
    pub zscore_threshold: f32,
    /// Window for moving-window correlation.
    pub correlation_window_size: usize,
    pub correlation_threshold: f32,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            relative: false,
            window_size: 3,
            stat_window_size: 5,
            zscore_threshold: 2.0,
            correlation_window_size: 7,
            correlation_threshold: 0.7,
        }
    }
}

/// Edge detection and overlay settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    pub method: String,
    pub threshold: f32,
    pub sigma: f32,
    pub low_threshold: Option<f32>,
    pub high_threshold: Option<f32>,
    pub edge_color: String,
    pub alpha: f32,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            method: "sobel".to_string(),
            threshold: 1.5,
            sigma: 1.0,
            low_threshold: None,
            high_threshold: None,
            edge_color: "white".to_string(),
            alpha: 0.7,
        }
    }
}

impl EdgeConfig {
    /// Numeric parameters for [`crate::edges::detect_edges`].
    pub fn params(&self) -> EdgeParams {
        EdgeParams {
            threshold: self.threshold,
            sigma: self.sigma,
            low_threshold: self.low_threshold,
            high_threshold: self.high_threshold,
        }
    }
}

pub fn load_config(path: &Path) -> Result<AnalysisConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
