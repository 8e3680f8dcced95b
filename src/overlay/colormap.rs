//! Compact colormap tables with linear interpolation.
//!
//! Anchor values are sampled from the standard matplotlib maps: `inferno`
//! (perceptually uniform, used for the thermal base image) and `viridis`
//! (sequential, used for magnitude coloring). The cyclic `hsv` wheel is
//! computed analytically.

/// Evenly spaced RGB anchors over [0, 1].
type Anchors = [[f32; 3]; 9];

const INFERNO: Anchors = [
    [0.001462, 0.000466, 0.013866],
    [0.087411, 0.044556, 0.224813],
    [0.258234, 0.038571, 0.406485],
    [0.416331, 0.090203, 0.432943],
    [0.578304, 0.148039, 0.404411],
    [0.735683, 0.215906, 0.330245],
    [0.865006, 0.316822, 0.226055],
    [0.954506, 0.468744, 0.099874],
    [0.988362, 0.998364, 0.644924],
];

const VIRIDIS: Anchors = [
    [0.267004, 0.004874, 0.329415],
    [0.282623, 0.140926, 0.457517],
    [0.253935, 0.265254, 0.529983],
    [0.206756, 0.371758, 0.553117],
    [0.163625, 0.471133, 0.558148],
    [0.127568, 0.566949, 0.550556],
    [0.134692, 0.658636, 0.517649],
    [0.266941, 0.748751, 0.440573],
    [0.993248, 0.906157, 0.143936],
];

fn sample(anchors: &Anchors, t: f32) -> [f32; 3] {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (anchors.len() - 1) as f32;
    let lo = scaled.floor() as usize;
    let hi = (lo + 1).min(anchors.len() - 1);
    let frac = scaled - lo as f32;
    let a = anchors[lo];
    let b = anchors[hi];
    [
        a[0] + (b[0] - a[0]) * frac,
        a[1] + (b[1] - a[1]) * frac,
        a[2] + (b[2] - a[2]) * frac,
    ]
}

/// Perceptually uniform dark-to-bright map for the thermal base image.
pub fn inferno(t: f32) -> [f32; 3] {
    sample(&INFERNO, t)
}

/// Sequential map for gradient-magnitude coloring.
pub fn viridis(t: f32) -> [f32; 3] {
    sample(&VIRIDIS, t)
}

/// Cyclic hue wheel for direction coloring; `t` in [0, 1] spans one full
/// revolution with saturation and value fixed at 1.
pub fn hsv(t: f32) -> [f32; 3] {
    let h = t.clamp(0.0, 1.0) * 6.0;
    let sector = (h.floor() as usize).min(5);
    let f = h - sector as f32;
    match sector {
        0 => [1.0, f, 0.0],
        1 => [1.0 - f, 1.0, 0.0],
        2 => [0.0, 1.0, f],
        3 => [0.0, 1.0 - f, 1.0],
        4 => [f, 0.0, 1.0],
        _ => [1.0, 0.0, 1.0 - f],
    }
}
