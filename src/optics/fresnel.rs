// Copyright @yucwang 2026

//! Reflection and refraction at a flat interface between two dielectrics.
//!
//! Directions point along the travel of the light. Normals point back into
//! the medium the light arrives from, so `d.dot(n) <= 0`.
//!
//! For unpolarised light the reflectance is the mean of the squared s and p
//! amplitude coefficients,
//!
//! ```text
//! r_s = (n1 cos θ1 - n2 cos θ2) / (n1 cos θ1 + n2 cos θ2)
//! r_p = (n2 cos θ1 - n1 cos θ2) / (n2 cos θ1 + n1 cos θ2)
//! R   = (r_s² + r_p²) / 2
//! ```
//!
//! and the transmitted fraction is `1 - R`.

use crate::math::constants::{Float, Vector2f};

/// Outcome of light meeting an interface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Scattering {
    /// No real refraction angle exists; all power is reflected.
    TotalInternalReflection { reflected: Vector2f },
    /// Power divides into a reflected fraction `reflectance` and a
    /// transmitted fraction `1 - reflectance`.
    Split { reflected: Vector2f, transmitted: Vector2f, reflectance: Float },
}

impl Scattering {
    pub fn reflected(&self) -> Vector2f {
        match self {
            Scattering::TotalInternalReflection { reflected } => *reflected,
            Scattering::Split { reflected, .. } => *reflected,
        }
    }

    pub fn transmitted(&self) -> Option<Vector2f> {
        match self {
            Scattering::TotalInternalReflection { .. } => None,
            Scattering::Split { transmitted, .. } => Some(*transmitted),
        }
    }

    pub fn reflectance(&self) -> Float {
        match self {
            Scattering::TotalInternalReflection { .. } => 1.0,
            Scattering::Split { reflectance, .. } => *reflectance,
        }
    }
}

/// Cosine of the angle of incidence, in `[0, 1]`.
#[inline]
pub fn cos_incidence(d: &Vector2f, n: &Vector2f) -> Float {
    (-d.dot(n)).max(0.0).min(1.0)
}

/// Mirror direction of `d` about the surface with normal `n`.
#[inline]
pub fn reflect(d: &Vector2f, n: &Vector2f) -> Vector2f {
    d - 2.0 * d.dot(n) * n
}

/// Refracted direction going from index `n1` into `n2`, or `None` under
/// total internal reflection.
pub fn refract(d: &Vector2f, n: &Vector2f, n1: Float, n2: Float) -> Option<Vector2f> {
    let cos_i = cos_incidence(d, n);
    let eta = n1 / n2;
    let sin2_t = eta * eta * (1.0 - cos_i * cos_i).max(0.0);
    if sin2_t > 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    Some((eta * d + (eta * cos_i - cos_t) * n).normalize())
}

/// Unpolarised Fresnel reflectance; 1 under total internal reflection.
pub fn reflectance_unpolarized(cos_i: Float, n1: Float, n2: Float) -> Float {
    if n1 == n2 {
        return 0.0;
    }
    let cos_i = cos_i.abs().min(1.0);
    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let eta = n1 / n2;
    let sin2_t = eta * eta * sin2_i;
    if sin2_t > 1.0 {
        return 1.0;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    let r_perp = (n1 * cos_i - n2 * cos_t) / (n1 * cos_i + n2 * cos_t);
    let r_parl = (n2 * cos_i - n1 * cos_t) / (n2 * cos_i + n1 * cos_t);
    (0.5 * (r_parl * r_parl + r_perp * r_perp)).max(0.0).min(1.0)
}

/// Snell's law for angles measured from the normal.
pub fn refraction_angle(theta_i: Float, n1: Float, n2: Float) -> Option<Float> {
    let sin_t = n1 * theta_i.sin() / n2;
    if sin_t.abs() > 1.0 {
        None
    } else {
        Some(sin_t.asin())
    }
}

/// Smallest incidence angle giving total internal reflection, if any.
pub fn critical_angle(n1: Float, n2: Float) -> Option<Float> {
    if n1 > n2 {
        Some((n2 / n1).asin())
    } else {
        None
    }
}

pub fn scatter(d: &Vector2f, n: &Vector2f, n1: Float, n2: Float) -> Scattering {
    let reflected = reflect(d, n);
    match refract(d, n, n1, n2) {
        None => Scattering::TotalInternalReflection { reflected },
        Some(transmitted) => Scattering::Split {
            reflected,
            transmitted,
            reflectance: reflectance_unpolarized(cos_incidence(d, n), n1, n2),
        },
    }
}
