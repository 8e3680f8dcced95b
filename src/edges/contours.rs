//! Iso-level contour extraction via marching squares.
//!
//! The edge mask is treated as a 0/1 field and traced at level 0.5. Each
//! 2×2 cell contributes line segments with linearly interpolated crossing
//! points; segments are then chained into ordered polylines in fractional
//! (row, col) coordinates. Shared cell edges reproduce bit-identical
//! crossing points, so chaining matches endpoints exactly.

use std::collections::HashMap;

use serde::Serialize;

use crate::grid::BoolGrid;

/// An ordered boundary polyline in fractional (row, col) coordinates.
#[derive(Clone, Debug, Serialize)]
pub struct Contour {
    pub points: Vec<[f32; 2]>,
    /// True when the polyline loops back onto its first point.
    pub closed: bool,
}

impl Contour {
    /// Sum of consecutive-point Euclidean distances.
    pub fn arc_length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|pair| {
                let dy = pair[1][0] - pair[0][0];
                let dx = pair[1][1] - pair[0][1];
                (dy * dy + dx * dx).sqrt()
            })
            .sum()
    }
}

type Point = [f32; 2];
type Segment = (Point, Point);

#[inline]
fn interp(level: f32, a: f32, b: f32) -> f32 {
    (level - a) / (b - a)
}

/// Emit the marching-squares segments for one cell. Corners are given in
/// (row, col) order: top-left, top-right, bottom-right, bottom-left.
#[allow(clippy::too_many_arguments)]
fn cell_segments(
    y: f32,
    x: f32,
    tl: f32,
    tr: f32,
    br: f32,
    bl: f32,
    level: f32,
    out: &mut Vec<Segment>,
) {
    let mut index = 0u8;
    if tl >= level {
        index |= 1;
    }
    if tr >= level {
        index |= 2;
    }
    if br >= level {
        index |= 4;
    }
    if bl >= level {
        index |= 8;
    }
    if index == 0 || index == 15 {
        return;
    }

    let top = || [y, x + interp(level, tl, tr)];
    let right = || [y + interp(level, tr, br), x + 1.0];
    let bottom = || [y + 1.0, x + interp(level, bl, br)];
    let left = || [y + interp(level, tl, bl), x];

    match index {
        1 | 14 => out.push((left(), top())),
        2 | 13 => out.push((top(), right())),
        4 | 11 => out.push((right(), bottom())),
        8 | 7 => out.push((bottom(), left())),
        3 | 12 => out.push((left(), right())),
        6 | 9 => out.push((top(), bottom())),
        5 | 10 => {
            // Saddle cell: disambiguate with the center average.
            let center_above = (tl + tr + br + bl) / 4.0 >= level;
            let pair_with_tl = (index == 5) == center_above;
            if pair_with_tl {
                out.push((left(), bottom()));
                out.push((top(), right()));
            } else {
                out.push((left(), top()));
                out.push((bottom(), right()));
            }
        }
        _ => unreachable!(),
    }
}

#[inline]
fn key(p: &Point) -> (u32, u32) {
    (p[0].to_bits(), p[1].to_bits())
}

/// Chain raw segments into ordered polylines by matching endpoints.
fn chain_segments(segments: Vec<Segment>) -> Vec<Contour> {
    let mut by_endpoint: HashMap<(u32, u32), Vec<usize>> = HashMap::new();
    for (i, (a, b)) in segments.iter().enumerate() {
        by_endpoint.entry(key(a)).or_default().push(i);
        by_endpoint.entry(key(b)).or_default().push(i);
    }

    let mut used = vec![false; segments.len()];
    let mut contours = Vec::new();

    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let (a, b) = segments[start];
        let mut points = vec![a, b];

        // Grow from the tail, then flip and grow from the former head.
        for _ in 0..2 {
            loop {
                let tail = *points.last().expect("polyline is never empty");
                let head = points[0];
                let Some(candidates) = by_endpoint.get(&key(&tail)) else {
                    break;
                };
                let next = candidates.iter().copied().find(|&i| !used[i]);
                let Some(i) = next else { break };
                used[i] = true;
                let (a, b) = segments[i];
                let other = if key(&a) == key(&tail) { b } else { a };
                points.push(other);
                if key(&other) == key(&head) {
                    break;
                }
            }
            points.reverse();
        }

        let closed = points.len() > 2 && key(&points[0]) == key(points.last().unwrap());
        contours.push(Contour { points, closed });
    }

    contours
}

/// Extract 0.5-level contours of a boolean mask as ordered polylines.
pub fn find_contours(mask: &BoolGrid) -> Vec<Contour> {
    let w = mask.w;
    let h = mask.h;
    if w < 2 || h < 2 {
        return Vec::new();
    }

    let level = 0.5f32;
    let mut segments = Vec::new();
    for y in 0..h - 1 {
        let row0 = mask.row(y);
        let row1 = mask.row(y + 1);
        for x in 0..w - 1 {
            let tl = row0[x] as u8 as f32;
            let tr = row0[x + 1] as u8 as f32;
            let bl = row1[x] as u8 as f32;
            let br = row1[x + 1] as u8 as f32;
            cell_segments(y as f32, x as f32, tl, tr, br, bl, level, &mut segments);
        }
    }

    chain_segments(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mask_has_no_contours() {
        assert!(find_contours(&BoolGrid::new(6, 6)).is_empty());
    }

    #[test]
    fn single_pixel_yields_one_closed_diamond() {
        let mut mask = BoolGrid::new(5, 5);
        mask.set(2, 2, true);
        let contours = find_contours(&mask);
        assert_eq!(contours.len(), 1);
        let c = &contours[0];
        assert!(c.closed);
        // Diamond through the four half-step crossings around (2, 2):
        // perimeter 4·(√2/2)·√2 = 4·1 = 2√2.
        assert!((c.arc_length() - 4.0 * (0.5f32 * 0.5 + 0.5 * 0.5).sqrt()).abs() < 1e-4);
    }

    #[test]
    fn solid_block_contour_encloses_the_block() {
        let mut mask = BoolGrid::new(8, 8);
        for y in 2..6 {
            for x in 2..6 {
                mask.set(x, y, true);
            }
        }
        let contours = find_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert!(contours[0].closed);
        // All points stay within the dilated block bounds.
        for p in &contours[0].points {
            assert!(p[0] >= 1.0 && p[0] <= 6.0);
            assert!(p[1] >= 1.0 && p[1] <= 6.0);
        }
    }

    #[test]
    fn two_separate_pixels_yield_two_contours() {
        let mut mask = BoolGrid::new(8, 8);
        mask.set(1, 1, true);
        mask.set(6, 6, true);
        assert_eq!(find_contours(&mask).len(), 2);
    }
}
