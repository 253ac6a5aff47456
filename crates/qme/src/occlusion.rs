//! Horizon-occlusion point computation.
//!
//! See <https://cesium.com/blog/2013/05/09/computing-the-horizon-occlusion-point/>.

use crate::ellipsoid::Ellipsoid;

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn norm(v: [f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

fn scale_down(p: [f64; 3], s: [f64; 3]) -> [f64; 3] {
    [p[0] / s[0], p[1] / s[1], p[2] / s[2]]
}

fn scale_up(p: [f64; 3], s: [f64; 3]) -> [f64; 3] {
    [p[0] * s[0], p[1] * s[1], p[2] * s[2]]
}

/// Per-point magnitude `M` such that scaling the unit direction toward `p` by
/// `M` places it exactly on the horizon plane through `d`.
fn magnitude(p: [f64; 3], d: [f64; 3]) -> f64 {
    let m2 = dot(p, p);
    let m = m2.sqrt();
    let u = [p[0] / m, p[1] / m, p[2] / m];

    let m2 = m2.max(1.0);
    let m = m.max(1.0);

    let cos_alpha = dot(u, d);
    let sin_alpha = norm(cross(u, d));
    let cos_beta = 1.0 / m;
    let sin_beta = (m2 - 1.0).sqrt() * cos_beta;

    1.0 / (cos_alpha * cos_beta - sin_alpha * sin_beta)
}

/// Computes the horizon occlusion point in ECEF, given the ECEF mesh points,
/// the bounding-sphere center (ECEF), and the ellipsoid.
///
/// Operates on an owned copy of `points`; the caller's slice is never
/// mutated.
pub fn occlusion_point(points: &[[f64; 3]], bounding_center: [f64; 3], ellipsoid: &Ellipsoid) -> [f64; 3] {
    let scale = [ellipsoid.a, ellipsoid.a, ellipsoid.b];

    let scaled_center = scale_down(bounding_center, scale);
    let center_norm = norm(scaled_center);
    let d = [
        scaled_center[0] / center_norm,
        scaled_center[1] / center_norm,
        scaled_center[2] / center_norm,
    ];

    let max_magnitude = points
        .iter()
        .map(|&p| magnitude(scale_down(p, scale), d))
        .fold(f64::NEG_INFINITY, f64::max);

    scale_up([d[0] * max_magnitude, d[1] * max_magnitude, d[2] * max_magnitude], scale)
}
