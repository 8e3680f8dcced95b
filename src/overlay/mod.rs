//! Visualization-ready edge overlays.
//!
//! Converts a temperature grid plus edge data into an RGBA image for an
//! external display layer: the grid is normalized by its own range and
//! mapped through inferno to form an opaque base, then edge pixels are
//! tinted — with a flat color, or with a per-pixel direction/magnitude
//! coloring — at the requested transparency. Continuous colorings return
//! legend metadata (value range, colormap name, ticks) alongside the image.

pub mod colormap;

use log::debug;
use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::grid::{BoolGrid, TempGrid};

use self::colormap::{hsv, inferno, viridis};

/// Default transparency applied to edge pixels.
pub const DEFAULT_EDGE_ALPHA: f32 = 0.7;

/// Owned RGBA image with interleaved channels, values in [0, 1].
#[derive(Clone, Debug, Serialize)]
pub struct RgbaImage {
    pub w: usize,
    pub h: usize,
    /// Row-major interleaved RGBA storage of length `w * h * 4`.
    pub data: Vec<f32>,
}

impl RgbaImage {
    /// Construct a fully transparent black image.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h * 4],
        }
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        (y * self.w + x) * 4
    }

    #[inline]
    /// RGBA channels at (x, y).
    pub fn pixel(&self, x: usize, y: usize) -> [f32; 4] {
        let i = self.idx(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, rgba: [f32; 4]) {
        let i = self.idx(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }
}

/// What a continuous edge coloring encodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendKind {
    Direction,
    Magnitude,
}

/// Legend metadata accompanying a continuous edge coloring.
#[derive(Clone, Debug, Serialize)]
pub struct LegendInfo {
    pub kind: LegendKind,
    pub min_value: f32,
    pub max_value: f32,
    pub label: String,
    pub colormap: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_labels: Option<Vec<String>>,
}

/// Resolved edge coloring strategy.
enum EdgeStyle {
    Flat([f32; 3]),
    Direction,
    Magnitude,
}

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// Map a color name to an edge style. Malformed hex strings and unknown
/// names fall back to flat white rather than failing.
fn parse_edge_color(name: &str) -> EdgeStyle {
    match name {
        "white" => EdgeStyle::Flat(WHITE),
        "red" => EdgeStyle::Flat([1.0, 0.0, 0.0]),
        "green" => EdgeStyle::Flat([0.0, 1.0, 0.0]),
        "blue" => EdgeStyle::Flat([0.0, 0.0, 1.0]),
        "yellow" => EdgeStyle::Flat([1.0, 1.0, 0.0]),
        "direction" => EdgeStyle::Direction,
        "magnitude" => EdgeStyle::Magnitude,
        _ if name.starts_with('#') => EdgeStyle::Flat(parse_hex(name).unwrap_or(WHITE)),
        _ => EdgeStyle::Flat(WHITE),
    }
}

fn parse_hex(s: &str) -> Option<[f32; 3]> {
    if s.len() != 7 {
        return None;
    }
    let r = u8::from_str_radix(&s[1..3], 16).ok()?;
    let g = u8::from_str_radix(&s[3..5], 16).ok()?;
    let b = u8::from_str_radix(&s[5..7], 16).ok()?;
    Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

fn check_shape(grid: &TempGrid, other: (usize, usize)) -> Result<()> {
    if grid.shape() != other {
        return Err(AnalysisError::ShapeMismatch {
            master: grid.shape(),
            slave: other,
        });
    }
    Ok(())
}

/// Render an edge overlay on top of an inferno-mapped base image.
///
/// `edge_color` accepts named colors (`white`, `red`, `green`, `blue`,
/// `yellow`), `#rrggbb` hex, or the continuous modes `direction` /
/// `magnitude`, which require the corresponding grid and fall back to flat
/// white when it is absent. Edge pixels receive the requested `alpha`
/// (typically [`DEFAULT_EDGE_ALPHA`]); the base stays opaque.
pub fn create_edge_overlay(
    grid: &TempGrid,
    edges: &BoolGrid,
    gradient_magnitude: Option<&TempGrid>,
    gradient_direction: Option<&TempGrid>,
    edge_color: &str,
    alpha: f32,
) -> Result<(RgbaImage, Option<LegendInfo>)> {
    check_shape(grid, edges.shape())?;
    if let Some(mag) = gradient_magnitude {
        check_shape(grid, mag.shape())?;
    }
    if let Some(dir) = gradient_direction {
        check_shape(grid, dir.shape())?;
    }

    // Continuous modes degrade to flat white when their grid is missing.
    let style = match parse_edge_color(edge_color) {
        EdgeStyle::Direction if gradient_direction.is_none() => EdgeStyle::Flat(WHITE),
        EdgeStyle::Magnitude if gradient_magnitude.is_none() => EdgeStyle::Flat(WHITE),
        style => style,
    };

    let (min, max) = grid.min_max();
    let range = max - min;
    let max_magnitude = gradient_magnitude.map(|m| m.min_max().1).unwrap_or(0.0);

    let mut image = RgbaImage::new(grid.w, grid.h);
    for y in 0..grid.h {
        for x in 0..grid.w {
            let t = if range > 0.0 {
                (grid.get(x, y) - min) / range
            } else {
                0.0
            };
            let base = inferno(t);
            let rgba = if edges.get(x, y) {
                let rgb = match &style {
                    EdgeStyle::Flat(rgb) => *rgb,
                    EdgeStyle::Direction => {
                        let d = gradient_direction.expect("checked above").get(x, y);
                        hsv((d + std::f32::consts::PI) / std::f32::consts::TAU)
                    }
                    EdgeStyle::Magnitude => {
                        let m = gradient_magnitude.expect("checked above").get(x, y);
                        let t = if max_magnitude > 0.0 {
                            m / max_magnitude
                        } else {
                            0.0
                        };
                        viridis(t)
                    }
                };
                [rgb[0], rgb[1], rgb[2], alpha]
            } else {
                [base[0], base[1], base[2], 1.0]
            };
            image.set_pixel(x, y, rgba);
        }
    }

    let legend = match style {
        EdgeStyle::Direction => Some(direction_legend()),
        EdgeStyle::Magnitude => Some(magnitude_legend(max_magnitude)),
        EdgeStyle::Flat(_) => None,
    };
    debug!(
        "edge overlay: {}x{}, color={}, alpha={}, legend={}",
        grid.w,
        grid.h,
        edge_color,
        alpha,
        legend.is_some()
    );

    Ok((image, legend))
}

fn direction_legend() -> LegendInfo {
    use std::f32::consts::{FRAC_PI_2, PI};
    LegendInfo {
        kind: LegendKind::Direction,
        min_value: -PI,
        max_value: PI,
        label: "Edge Direction (radians)".to_string(),
        colormap: "hsv".to_string(),
        ticks: Some(vec![-PI, -FRAC_PI_2, 0.0, FRAC_PI_2, PI]),
        tick_labels: Some(
            ["-π", "-π/2", "0", "π/2", "π"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ),
    }
}

fn magnitude_legend(max_magnitude: f32) -> LegendInfo {
    LegendInfo {
        kind: LegendKind::Magnitude,
        min_value: 0.0,
        max_value: if max_magnitude > 0.0 {
            max_magnitude
        } else {
            1.0
        },
        label: "Temperature Gradient (°C/pixel)".to_string(),
        colormap: "viridis".to_string(),
        ticks: None,
        tick_labels: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_flat(style: EdgeStyle) -> [f32; 3] {
        match style {
            EdgeStyle::Flat(rgb) => rgb,
            _ => panic!("expected a flat edge style"),
        }
    }

    #[test]
    fn hex_colors_parse_and_fall_back() {
        assert_eq!(parse_hex("#ff0080"), Some([1.0, 0.0, 128.0 / 255.0]));
        assert_eq!(parse_hex("#ff00"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
        assert_eq!(expect_flat(parse_edge_color("#oops")), WHITE);
        assert_eq!(expect_flat(parse_edge_color("magenta")), WHITE);
    }
}
