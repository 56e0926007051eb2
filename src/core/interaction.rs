// Copyright @yucwang 2023

use crate::math::constants::{Float, Vector2f};
use crate::math::ray::Ray2f;
use std::cmp::Ordering;

/// One crossing of a shape boundary.
///
/// The normal always points back into the medium the ray arrives from, so
/// `normal.dot(ray.dir()) < 0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Intersection {
    point: Vector2f,
    normal: Vector2f,
    t: Float,
}

impl Intersection {
    pub fn new(point: Vector2f, normal: Vector2f, t: Float) -> Self {
        Self { point, normal, t }
    }

    /// Builds the record for a hit at distance `t` along `ray`, orienting
    /// `outward` (any non-zero boundary normal) against the ray.
    pub fn facing(ray: &Ray2f, t: Float, outward: Vector2f) -> Self {
        let mut normal = outward.normalize();
        if normal.dot(&ray.dir()) > 0.0 {
            normal = -normal;
        }
        Self::new(ray.at(t), normal, t)
    }

    pub fn point(&self) -> Vector2f {
        self.point
    }

    pub fn normal(&self) -> Vector2f {
        self.normal
    }

    pub fn t(&self) -> Float {
        self.t
    }
}

pub fn sort_by_distance(intersections: &mut [Intersection]) {
    intersections.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(Ordering::Equal));
}
