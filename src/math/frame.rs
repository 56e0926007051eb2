// Copyright @yucwang 2023

use crate::math::constants::{Float, Vector2f, EPSILON};

/// z component of the 3D cross product of two plane vectors.
pub fn cross(a: &Vector2f, b: &Vector2f) -> Float {
    a.x * b.y - a.y * b.x
}

/// `v` rotated a quarter turn counter-clockwise.
pub fn perpendicular(v: &Vector2f) -> Vector2f {
    Vector2f::new(-v.y, v.x)
}

pub fn from_angle(angle: Float) -> Vector2f {
    Vector2f::new(angle.cos(), angle.sin())
}

/// Closest distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: &Vector2f, a: &Vector2f, b: &Vector2f) -> Float {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 <= EPSILON * EPSILON {
        return (p - a).norm();
    }
    let s = ((p - a).dot(&ab) / len2).max(0.0).min(1.0);
    (p - (a + ab * s)).norm()
}

/// Parameters `(s, u)` where segment `a0`-`a1` meets segment `b0`-`b1` at
/// `a0 + s * (a1 - a0) == b0 + u * (b1 - b0)`, both in `[0, 1]`.
pub fn segment_intersection(a0: &Vector2f, a1: &Vector2f,
                            b0: &Vector2f, b1: &Vector2f) -> Option<(Float, Float)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let denom = cross(&da, &db);
    if denom.abs() < EPSILON * EPSILON {
        return None;
    }
    let w = b0 - a0;
    let s = cross(&w, &db) / denom;
    let u = cross(&w, &da) / denom;
    if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&u) {
        Some((s, u))
    } else {
        None
    }
}

/// Distance along the ray `o + t * d` at which it crosses segment `a`-`b`,
/// for `t > 0`. Rays parallel to the segment never cross it.
pub fn ray_segment_distance(o: &Vector2f, d: &Vector2f,
                            a: &Vector2f, b: &Vector2f) -> Option<Float> {
    let e = b - a;
    let denom = cross(d, &e);
    if denom.abs() < EPSILON * EPSILON {
        return None;
    }
    let w = a - o;
    let t = cross(&w, &e) / denom;
    let s = cross(&w, d) / denom;
    if t > 0.0 && (-EPSILON..=1.0 + EPSILON).contains(&s) {
        Some(t)
    } else {
        None
    }
}
