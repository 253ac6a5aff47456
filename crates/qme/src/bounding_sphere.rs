//! Bounding-sphere computation over ECEF points, one of four strategies.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SphereMethod {
    BoundingBox,
    Naive,
    Ritter,
    /// Runs both `Naive` and `Ritter`, keeps the smaller radius. Ties favor `Naive`.
    Auto,
}

impl Default for SphereMethod {
    fn default() -> Self {
        SphereMethod::Auto
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: [f64; 3],
    pub radius: f64,
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn aabb(points: &[[f64; 3]]) -> ([f64; 3], [f64; 3]) {
    let mut min = points[0];
    let mut max = points[0];

    for p in &points[1..] {
        for axis in 0..3 {
            if p[axis] < min[axis] {
                min[axis] = p[axis];
            }
            if p[axis] > max[axis] {
                max[axis] = p[axis];
            }
        }
    }

    (min, max)
}

fn bounding_box_sphere(points: &[[f64; 3]]) -> Sphere {
    let (min, max) = aabb(points);
    let center = [
        (min[0] + max[0]) / 2.0,
        (min[1] + max[1]) / 2.0,
        (min[2] + max[2]) / 2.0,
    ];
    let radius = norm(sub(max, center));
    Sphere { center, radius }
}

fn naive_sphere(points: &[[f64; 3]]) -> Sphere {
    let (min, max) = aabb(points);
    let center = [
        (min[0] + max[0]) / 2.0,
        (min[1] + max[1]) / 2.0,
        (min[2] + max[2]) / 2.0,
    ];

    let radius = points
        .iter()
        .map(|&p| norm(sub(p, center)))
        .fold(0.0_f64, f64::max);

    Sphere { center, radius }
}

fn ritter_sphere(points: &[[f64; 3]]) -> Sphere {
    // Find the six extremal points (smallest/largest x, y, z).
    let mut min_idx = [0usize; 3];
    let mut max_idx = [0usize; 3];

    for axis in 0..3 {
        let mut min_v = points[0][axis];
        let mut max_v = points[0][axis];
        let (mut mi, mut ma) = (0usize, 0usize);

        for (i, p) in points.iter().enumerate() {
            if p[axis] < min_v {
                min_v = p[axis];
                mi = i;
            }
            if p[axis] > max_v {
                max_v = p[axis];
                ma = i;
            }
        }

        min_idx[axis] = mi;
        max_idx[axis] = ma;
    }

    let spans = [
        norm(sub(points[max_idx[0]], points[min_idx[0]])),
        norm(sub(points[max_idx[1]], points[min_idx[1]])),
        norm(sub(points[max_idx[2]], points[min_idx[2]])),
    ];

    let axis = if spans[0] >= spans[1] && spans[0] >= spans[2] {
        0
    } else if spans[1] >= spans[2] {
        1
    } else {
        2
    };

    let p_min = points[min_idx[axis]];
    let p_max = points[max_idx[axis]];

    let mut center = [
        (p_min[0] + p_max[0]) / 2.0,
        (p_min[1] + p_max[1]) / 2.0,
        (p_min[2] + p_max[2]) / 2.0,
    ];
    let mut radius = spans[axis] / 2.0;

    // Second pass: grow the sphere to contain every point.
    for &p in points {
        let d = norm(sub(p, center));
        if d > radius {
            let new_radius = (radius + d) / 2.0;
            let k = (d - new_radius) / d;
            center = [
                center[0] + k * (p[0] - center[0]),
                center[1] + k * (p[1] - center[1]),
                center[2] + k * (p[2] - center[2]),
            ];
            radius = new_radius;
        }
    }

    Sphere { center, radius }
}

/// Computes a bounding sphere over `points` using `method`. `points` must be
/// non-empty.
pub fn compute(points: &[[f64; 3]], method: SphereMethod) -> Sphere {
    match method {
        SphereMethod::BoundingBox => bounding_box_sphere(points),
        SphereMethod::Naive => naive_sphere(points),
        SphereMethod::Ritter => ritter_sphere(points),
        SphereMethod::Auto => {
            let naive = naive_sphere(points);
            let ritter = ritter_sphere(points);
            if ritter.radius < naive.radius {
                ritter
            } else {
                naive
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_corners() -> Vec<[f64; 3]> {
        let mut pts = Vec::with_capacity(8);
        for &x in &[-1.0, 1.0] {
            for &y in &[-1.0, 1.0] {
                for &z in &[-1.0, 1.0] {
                    pts.push([x, y, z]);
                }
            }
        }
        pts
    }

    #[test]
    fn cube_center_and_radius_all_methods() {
        let pts = cube_corners();
        for method in [
            SphereMethod::BoundingBox,
            SphereMethod::Naive,
            SphereMethod::Ritter,
            SphereMethod::Auto,
        ] {
            let s = compute(&pts, method);
            assert!(norm(s.center) < 1e-9, "method {:?}", method);
            assert!((s.radius - 3.0_f64.sqrt()).abs() < 1e-9, "method {:?}", method);
        }
    }

    #[test]
    fn all_points_contained() {
        let pts = vec![
            [1.0, 2.0, 3.0],
            [-4.0, 5.0, -1.0],
            [10.0, -2.0, 0.5],
            [3.0, 3.0, 3.0],
            [0.0, 0.0, 0.0],
        ];

        for method in [
            SphereMethod::BoundingBox,
            SphereMethod::Naive,
            SphereMethod::Ritter,
            SphereMethod::Auto,
        ] {
            let s = compute(&pts, method);
            for &p in &pts {
                let d = norm(sub(p, s.center));
                assert!(d <= s.radius * (1.0 + 1e-6), "method {:?}: {} > {}", method, d, s.radius);
            }
        }
    }

    #[test]
    fn auto_ties_prefer_naive() {
        // A perfectly symmetric point set makes naive and ritter agree
        // exactly; auto must still resolve deterministically to naive.
        let pts = cube_corners();
        let naive = naive_sphere(&pts);
        let auto = compute(&pts, SphereMethod::Auto);
        assert_eq!(auto.radius, naive.radius);
    }
}
