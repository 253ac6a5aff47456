//! Geodetic (lon, lat, height) to ECEF Cartesian projection.

use crate::ellipsoid::Ellipsoid;

/// Converts a single (longitude deg, latitude deg, height m) triple to ECEF
/// meters on the given ellipsoid. No geoid correction is applied.
#[inline]
pub fn geodetic_to_ecef(lon_deg: f64, lat_deg: f64, height_m: f64, ellipsoid: &Ellipsoid) -> [f64; 3] {
    let lambda = lon_deg.to_radians();
    let phi = lat_deg.to_radians();

    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_lambda, cos_lambda) = lambda.sin_cos();

    let e2 = ellipsoid.e2();
    let n = ellipsoid.a / (1.0 - e2 * sin_phi * sin_phi).sqrt();

    let x = (n + height_m) * cos_phi * cos_lambda;
    let y = (n + height_m) * cos_phi * sin_lambda;
    let z = (n * (1.0 - e2) + height_m) * sin_phi;

    [x, y, z]
}

/// Projects a flat `[lon, lat, h, lon, lat, h, ...]` buffer into a flat ECEF
/// buffer `[x, y, z, x, y, z, ...]` of the same length.
pub fn project_all(positions: &[f64], ellipsoid: &Ellipsoid) -> Vec<f64> {
    let mut out = Vec::with_capacity(positions.len());

    for triple in positions.chunks_exact(3) {
        let [x, y, z] = geodetic_to_ecef(triple[0], triple[1], triple[2], ellipsoid);
        out.push(x);
        out.push(y);
        out.push(z);
    }

    out
}
