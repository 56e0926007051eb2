// Copyright @yucwang 2023

use crate::core::interaction::Intersection;
use crate::math::bounds::Bounds2f;
use crate::math::constants::{Float, Vector2f};
use crate::math::ray::Ray2f;
use crate::math::transform::Transform2;
use crate::shapes::circle::Circle;
use crate::shapes::polygon::Polygon;
use crate::shapes::semicircle::SemiCircle;

/// Boundary of a prism or medium region. The set of kinds is closed, so
/// every query is a plain `match`.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Polygon(Polygon),
    SemiCircle(SemiCircle),
}

impl Shape {
    /// Boundary crossings strictly ahead of the ray origin, nearest first.
    pub fn intersections(&self, ray: &Ray2f) -> Vec<Intersection> {
        match self {
            Shape::Circle(c) => c.ray_intersections(ray),
            Shape::Polygon(p) => p.ray_intersections(ray),
            Shape::SemiCircle(s) => s.ray_intersections(ray),
        }
    }

    pub fn contains_point(&self, p: &Vector2f) -> bool {
        match self {
            Shape::Circle(c) => c.contains_point(p),
            Shape::Polygon(poly) => poly.contains_point(p),
            Shape::SemiCircle(s) => s.contains_point(p),
        }
    }

    pub fn transformed(&self, t: &Transform2) -> Shape {
        match self {
            Shape::Circle(c) => Shape::Circle(c.transformed(t)),
            Shape::Polygon(p) => Shape::Polygon(p.transformed(t)),
            Shape::SemiCircle(s) => Shape::SemiCircle(s.transformed(t)),
        }
    }

    pub fn translated(&self, dx: Float, dy: Float) -> Shape {
        self.transformed(&Transform2::translation(dx, dy))
    }

    pub fn rotated(&self, angle: Float, pivot: &Vector2f) -> Shape {
        self.transformed(&Transform2::rotation_about(angle, pivot))
    }

    pub fn rotation_center(&self) -> Vector2f {
        match self {
            Shape::Circle(c) => c.rotation_center(),
            Shape::Polygon(p) => p.rotation_center(),
            Shape::SemiCircle(s) => s.rotation_center(),
        }
    }

    /// Handle used to rotate the shape; a circle looks the same at every
    /// angle and has none.
    pub fn reference_point(&self) -> Option<Vector2f> {
        match self {
            Shape::Circle(_) => None,
            Shape::Polygon(p) => Some(p.reference_point()),
            Shape::SemiCircle(s) => Some(s.reference_point()),
        }
    }

    pub fn bounds(&self) -> Bounds2f {
        match self {
            Shape::Circle(c) => c.bounds(),
            Shape::Polygon(p) => p.bounds(),
            Shape::SemiCircle(s) => s.bounds(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Circle(_) => "circle",
            Shape::Polygon(_) => "polygon",
            Shape::SemiCircle(_) => "semicircle",
        }
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Shape::Circle(c)
    }
}

impl From<Polygon> for Shape {
    fn from(p: Polygon) -> Self {
        Shape::Polygon(p)
    }
}

impl From<SemiCircle> for Shape {
    fn from(s: SemiCircle) -> Self {
        Shape::SemiCircle(s)
    }
}
