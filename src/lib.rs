#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod compare;
pub mod config;
pub mod edges;
pub mod error;
pub mod gradient;
pub mod grid;
pub mod overlay;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{AnalysisError, Result};
pub use crate::grid::{BoolGrid, TempGrid};

pub use crate::compare::{
    calculate_metrics, compute_difference, compute_gradient_preprocessed_difference,
    compute_smoothed_difference, compute_spatial_correlation, compute_statistical_significance,
    ComparisonMetrics, ComparisonResult, CorrelationResult, DifferenceResult, GradientDifference,
    SmoothedDifference, StatisticalResult,
};

pub use crate::edges::{
    calculate_edge_metrics, detect_edges, detect_edges_with, find_contours, Contour, EdgeMethod,
    EdgeMetrics, EdgeParams, EdgeResult,
};

pub use crate::overlay::{create_edge_overlay, LegendInfo, LegendKind, RgbaImage};

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::compare::{
        calculate_metrics, compute_difference, compute_spatial_correlation,
        compute_statistical_significance, ComparisonResult,
    };
    pub use crate::edges::{detect_edges, EdgeParams};
    pub use crate::grid::{BoolGrid, TempGrid};
    pub use crate::overlay::create_edge_overlay;
}
