//! Edge detection for single thermal grids.
//!
//! Five interchangeable strategies (sobel, canny, prewitt, roberts, scharr)
//! produce a binary edge mask together with gradient magnitude and direction
//! grids. A marching-squares contour extractor and per-contour metrics turn
//! the mask into quantitative edge statistics, and the overlay module renders
//! it for external display.
//!
//! Design notes
//! - Kernels are normalized so a unit temperature step yields unit peak
//!   magnitude; thresholds are therefore in °C per pixel.
//! - Borders are handled by clamping indices (replicate), which coincides
//!   with reflect padding for the 3×3 and 2×2 kernels used here.

pub mod canny;
pub mod contours;
pub mod detector;
pub mod kernels;
pub mod metrics;

pub use self::contours::{find_contours, Contour};
pub use self::detector::{detect_edges, detect_edges_with, EdgeMethod, EdgeParams, EdgeResult};
pub use self::metrics::{calculate_edge_metrics, EdgeMetrics};
