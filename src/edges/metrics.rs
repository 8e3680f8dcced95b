//! Contour-based statistics for an edge mask.
//!
//! Counts and densities come straight from the mask; arc lengths come from
//! the extracted contours. When the source temperature grid is supplied, a
//! forward-difference gradient magnitude is sampled along each contour's
//! integer-rounded coordinates and aggregated per contour and overall.

use serde::Serialize;

use super::contours::{find_contours, Contour};
use crate::grid::{BoolGrid, TempGrid};

/// Summary statistics for a detected edge mask.
#[derive(Clone, Debug, Default, Serialize)]
pub struct EdgeMetrics {
    /// Number of set pixels in the mask.
    pub num_edge_pixels: usize,
    /// Set pixels as a percentage of all pixels.
    pub edge_density: f32,
    /// Number of extracted contours.
    pub num_contours: usize,
    /// Sum of all contour arc lengths.
    pub total_edge_length: f32,
    /// Arc length of each contour.
    pub contour_lengths: Vec<f32>,
    /// Mean of the per-contour gradient means, when thermal data was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_temp_gradient: Option<f32>,
    /// Max of the per-contour gradient means.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temp_gradient: Option<f32>,
    /// Mean gradient magnitude along each contour with in-bounds samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contour_temp_gradients: Option<Vec<f32>>,
}

/// Mean forward-difference gradient magnitude along a contour, sampling at
/// integer-rounded coordinates and skipping out-of-bounds points. `None`
/// when no point lands in bounds.
fn contour_gradient(contour: &Contour, grid: &TempGrid) -> Option<f32> {
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for p in &contour.points {
        let y = p[0].round() as isize;
        let x = p[1].round() as isize;
        if y < 0 || x < 0 {
            continue;
        }
        let (y, x) = (y as usize, x as usize);
        if y + 1 >= grid.h || x + 1 >= grid.w {
            continue;
        }
        let grad_y = grid.get(x, y + 1) - grid.get(x, y);
        let grad_x = grid.get(x + 1, y) - grid.get(x, y);
        sum += f64::from((grad_x * grad_x + grad_y * grad_y).sqrt());
        count += 1;
    }
    (count > 0).then(|| (sum / count as f64) as f32)
}

/// Compute contour counts, lengths, and (optionally) along-contour thermal
/// gradients for an edge mask.
pub fn calculate_edge_metrics(edges: &BoolGrid, grid: Option<&TempGrid>) -> EdgeMetrics {
    let num_edge_pixels = edges.count_true();
    let total_pixels = edges.len().max(1);
    let edge_density = num_edge_pixels as f32 / total_pixels as f32 * 100.0;

    let contours = find_contours(edges);
    let contour_lengths: Vec<f32> = contours.iter().map(Contour::arc_length).collect();
    let total_edge_length = contour_lengths.iter().sum();

    let mut metrics = EdgeMetrics {
        num_edge_pixels,
        edge_density,
        num_contours: contours.len(),
        total_edge_length,
        contour_lengths,
        ..EdgeMetrics::default()
    };

    if let Some(grid) = grid {
        let per_contour: Vec<f32> = contours
            .iter()
            .filter_map(|c| contour_gradient(c, grid))
            .collect();
        if !per_contour.is_empty() {
            let mean = per_contour.iter().sum::<f32>() / per_contour.len() as f32;
            let max = per_contour.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
            metrics.mean_temp_gradient = Some(mean);
            metrics.max_temp_gradient = Some(max);
            metrics.contour_temp_gradients = Some(per_contour);
        }
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mask_produces_zeroed_metrics() {
        let m = calculate_edge_metrics(&BoolGrid::new(10, 10), None);
        assert_eq!(m.num_edge_pixels, 0);
        assert_eq!(m.edge_density, 0.0);
        assert_eq!(m.num_contours, 0);
        assert_eq!(m.total_edge_length, 0.0);
        assert!(m.mean_temp_gradient.is_none());
    }

    #[test]
    fn density_is_percent_of_total() {
        let mut mask = BoolGrid::new(10, 10);
        for x in 0..5 {
            mask.set(x, 4, true);
        }
        let m = calculate_edge_metrics(&mask, None);
        assert_eq!(m.num_edge_pixels, 5);
        assert!((m.edge_density - 5.0).abs() < 1e-6);
        assert_eq!(m.num_contours, 1);
    }

    #[test]
    fn gradient_along_contour_reflects_local_step() {
        let mut grid = TempGrid::filled(8, 8, 20.0);
        let mut mask = BoolGrid::new(8, 8);
        for y in 2..6 {
            grid.set(4, y, 30.0);
            mask.set(4, y, true);
        }
        let m = calculate_edge_metrics(&mask, Some(&grid));
        let mean = m.mean_temp_gradient.expect("thermal data was supplied");
        assert!(mean > 0.0);
        assert_eq!(
            m.contour_temp_gradients.as_ref().map(Vec::len),
            Some(m.num_contours)
        );
        assert!(m.max_temp_gradient.unwrap() >= mean);
    }
}
