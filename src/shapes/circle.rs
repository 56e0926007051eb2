// Copyright @yucwang 2023

use crate::core::error::{ConfigError, ConfigResult};
use crate::core::interaction::Intersection;
use crate::math::bounds::Bounds2f;
use crate::math::constants::{Float, Vector2f, EPSILON};
use crate::math::ray::Ray2f;
use crate::math::transform::Transform2;

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Vector2f,
    radius: Float,
}

impl Circle {
    pub fn new(center: Vector2f, radius: Float) -> ConfigResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::DegenerateCircle(radius));
        }
        if !(center.x.is_finite() && center.y.is_finite()) {
            return Err(ConfigError::NonFiniteCoordinate);
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Vector2f {
        self.center
    }

    pub fn radius(&self) -> Float {
        self.radius
    }

    pub fn transformed(&self, t: &Transform2) -> Self {
        Self { center: t.apply_point(&self.center), radius: self.radius }
    }

    pub fn translated(&self, dx: Float, dy: Float) -> Self {
        self.transformed(&Transform2::translation(dx, dy))
    }

    pub fn rotated(&self, angle: Float, pivot: &Vector2f) -> Self {
        self.transformed(&Transform2::rotation_about(angle, pivot))
    }

    pub fn rotation_center(&self) -> Vector2f {
        self.center
    }

    pub fn contains_point(&self, p: &Vector2f) -> bool {
        (p - self.center).norm() <= self.radius
    }

    pub fn bounds(&self) -> Bounds2f {
        Bounds2f::centered(self.center, self.radius, self.radius)
    }

    /// Distances along the ray where it meets the circle, smallest first,
    /// including points behind the origin. A tangent ray yields one root.
    pub fn ray_roots(&self, ray: &Ray2f) -> Vec<Float> {
        // |o + t d - c|^2 = r^2 with |d| = 1
        let oc = ray.origin() - self.center;
        let b = ray.dir().dot(&oc);
        let c = oc.norm_squared() - self.radius * self.radius;
        let disc = b * b - c;
        let tolerance = EPSILON * self.radius;

        if disc < -tolerance {
            Vec::new()
        } else if disc <= tolerance {
            vec![-b]
        } else {
            let root = disc.sqrt();
            vec![-b - root, -b + root]
        }
    }

    pub fn ray_intersections(&self, ray: &Ray2f) -> Vec<Intersection> {
        self.ray_roots(ray)
            .into_iter()
            .filter(|t| *t > 0.0)
            .map(|t| Intersection::facing(ray, t, ray.at(t) - self.center))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_circle() -> Circle {
        Circle::new(Vector2f::zeros(), 1.0).unwrap()
    }

    #[test]
    fn test_rejects_degenerate_radius() {
        assert_eq!(Circle::new(Vector2f::zeros(), 0.0), Err(ConfigError::DegenerateCircle(0.0)));
        assert!(Circle::new(Vector2f::zeros(), -2.0).is_err());
        assert!(Circle::new(Vector2f::zeros(), Float::NAN).is_err());
    }

    #[test]
    fn test_ray_from_outside() {
        let ray = Ray2f::new(Vector2f::new(-3.0, 0.0), Vector2f::new(1.0, 0.0), None, None);
        let hits = unit_circle().ray_intersections(&ray);
        assert_eq!(hits.len(), 2);
        assert_abs_diff_eq!(hits[0].t(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hits[1].t(), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hits[0].point().x, -1.0, epsilon = 1e-12);
        // Both normals face the incoming ray.
        assert_eq!(hits[0].normal(), Vector2f::new(-1.0, 0.0));
        assert_abs_diff_eq!(hits[1].normal().x, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ray_from_inside_only_forward() {
        let ray = Ray2f::new(Vector2f::zeros(), Vector2f::new(0.0, 1.0), None, None);
        let hits = unit_circle().ray_intersections(&ray);
        assert_eq!(hits.len(), 1);
        assert_abs_diff_eq!(hits[0].point().y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hits[0].normal().y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tangent_and_miss() {
        let tangent = Ray2f::new(Vector2f::new(-2.0, 1.0), Vector2f::new(1.0, 0.0), None, None);
        assert_eq!(unit_circle().ray_intersections(&tangent).len(), 1);

        let miss = Ray2f::new(Vector2f::new(-2.0, 1.5), Vector2f::new(1.0, 0.0), None, None);
        assert!(unit_circle().ray_intersections(&miss).is_empty());

        let behind = Ray2f::new(Vector2f::new(3.0, 0.0), Vector2f::new(1.0, 0.0), None, None);
        assert!(unit_circle().ray_intersections(&behind).is_empty());
    }

    #[test]
    fn test_transformed_instances() {
        let moved = unit_circle().translated(2.0, -1.0);
        assert_eq!(moved.center(), Vector2f::new(2.0, -1.0));
        assert!(moved.contains_point(&Vector2f::new(2.5, -1.0)));
        assert!(!moved.contains_point(&Vector2f::zeros()));

        let spun = moved.rotated(std::f64::consts::PI, &Vector2f::zeros());
        assert_abs_diff_eq!(spun.center().x, -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spun.center().y, 1.0, epsilon = 1e-12);
        assert_eq!(spun.radius(), 1.0);
    }
}
