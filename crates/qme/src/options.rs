//! Encode-time configuration: constructed once per call, passed by reference,
//! never mutated.

use crate::bounding_sphere::SphereMethod;
use crate::ellipsoid::Ellipsoid;
use crate::extensions::Extension;

/// Planar bounds `(min_lon, min_lat, max_lon, max_lat)` in degrees.
pub type PlanarBounds = (f64, f64, f64, f64);

#[derive(Default)]
pub struct EncodeOptions {
    pub bounds: Option<PlanarBounds>,
    pub sphere_method: SphereMethod,
    pub ellipsoid: Ellipsoid,
    pub extensions: Vec<Extension>,
    /// When set, coincident-position meshes (zero-radius bounding sphere)
    /// are reported as `NumericFailure` instead of silently accepted.
    pub strict: bool,
}

impl EncodeOptions {
    pub fn builder() -> EncodeOptionsBuilder {
        EncodeOptionsBuilder::default()
    }
}

#[derive(Default)]
pub struct EncodeOptionsBuilder {
    bounds: Option<PlanarBounds>,
    sphere_method: SphereMethod,
    ellipsoid: Ellipsoid,
    extensions: Vec<Extension>,
    strict: bool,
}

impl EncodeOptionsBuilder {
    pub fn bounds(mut self, bounds: PlanarBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn sphere_method(mut self, method: SphereMethod) -> Self {
        self.sphere_method = method;
        self
    }

    pub fn ellipsoid(mut self, ellipsoid: Ellipsoid) -> Self {
        self.ellipsoid = ellipsoid;
        self
    }

    pub fn extension(mut self, extension: Extension) -> Self {
        self.extensions.push(extension);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn build(self) -> EncodeOptions {
        EncodeOptions {
            bounds: self.bounds,
            sphere_method: self.sphere_method,
            ellipsoid: self.ellipsoid,
            extensions: self.extensions,
            strict: self.strict,
        }
    }
}
