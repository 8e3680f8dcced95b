use thermal_detector::grid::TempGrid;

/// Grid of a single constant temperature.
pub fn uniform_grid(width: usize, height: usize, value: f32) -> TempGrid {
    TempGrid::filled(width, height, value)
}

/// Vertical step: `base` left of `split_x`, `base + step` from `split_x` on.
pub fn step_grid(width: usize, height: usize, split_x: usize, base: f32, step: f32) -> TempGrid {
    let mut grid = TempGrid::filled(width, height, base);
    for y in 0..height {
        for x in split_x..width {
            grid.set(x, y, base + step);
        }
    }
    grid
}

/// Deterministic textured scene with repeating small-scale variation.
pub fn textured_grid(width: usize, height: usize, base: f32) -> TempGrid {
    let mut grid = TempGrid::new(width, height);
    for y in 0..height {
        for x in 0..width {
            grid.set(x, y, base + ((x * 3 + y * 7) % 11) as f32 * 0.5);
        }
    }
    grid
}

/// Copy of `scene` with a square hot spot of the given temperature delta.
pub fn with_hot_spot(scene: &TempGrid, x0: usize, y0: usize, size: usize, delta: f32) -> TempGrid {
    let mut grid = scene.clone();
    for y in y0..(y0 + size).min(scene.h) {
        for x in x0..(x0 + size).min(scene.w) {
            grid.set(x, y, grid.get(x, y) + delta);
        }
    }
    grid
}
