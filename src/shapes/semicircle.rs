// Copyright @yucwang 2026

use crate::core::error::ConfigResult;
use crate::core::interaction::{sort_by_distance, Intersection};
use crate::math::bounds::Bounds2f;
use crate::math::constants::{Float, Vector2f, EPSILON, PI};
use crate::math::frame::{from_angle, perpendicular, ray_segment_distance};
use crate::math::ray::Ray2f;
use crate::math::transform::Transform2;
use crate::shapes::circle::Circle;

/// Half disk: the curved side bulges towards `facing`, the flat side is the
/// diameter through `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct SemiCircle {
    disk: Circle,
    facing: Float,
}

impl SemiCircle {
    pub fn new(center: Vector2f, radius: Float, facing: Float) -> ConfigResult<Self> {
        let disk = Circle::new(center, radius)?;
        Ok(Self { disk, facing })
    }

    pub fn center(&self) -> Vector2f {
        self.disk.center()
    }

    pub fn radius(&self) -> Float {
        self.disk.radius()
    }

    pub fn facing(&self) -> Float {
        self.facing
    }

    fn axis(&self) -> Vector2f {
        from_angle(self.facing)
    }

    /// Endpoints of the flat side.
    pub fn chord(&self) -> (Vector2f, Vector2f) {
        let half = perpendicular(&self.axis()) * self.radius();
        (self.center() + half, self.center() - half)
    }

    fn on_curved_side(&self, p: &Vector2f) -> bool {
        (p - self.center()).dot(&self.axis()) >= -EPSILON
    }

    pub fn transformed(&self, t: &Transform2) -> Self {
        Self { disk: self.disk.transformed(t), facing: self.facing + t.angle() }
    }

    pub fn translated(&self, dx: Float, dy: Float) -> Self {
        self.transformed(&Transform2::translation(dx, dy))
    }

    pub fn rotated(&self, angle: Float, pivot: &Vector2f) -> Self {
        self.transformed(&Transform2::rotation_about(angle, pivot))
    }

    /// Centroid of the half disk.
    pub fn rotation_center(&self) -> Vector2f {
        self.center() + self.axis() * (4.0 * self.radius() / (3.0 * PI))
    }

    /// Apex of the curved side.
    pub fn reference_point(&self) -> Vector2f {
        self.center() + self.axis() * self.radius()
    }

    pub fn contains_point(&self, p: &Vector2f) -> bool {
        self.disk.contains_point(p) && (p - self.center()).dot(&self.axis()) >= 0.0
    }

    pub fn bounds(&self) -> Bounds2f {
        let (a, b) = self.chord();
        let mut bounds = Bounds2f::default();
        bounds.expand_by_point(&a);
        bounds.expand_by_point(&b);
        bounds.expand_by_point(&self.reference_point());
        // Extreme points of the arc along each axis.
        let axis = self.axis();
        for dir in [Vector2f::new(1.0, 0.0), Vector2f::new(-1.0, 0.0),
                    Vector2f::new(0.0, 1.0), Vector2f::new(0.0, -1.0)] {
            if dir.dot(&axis) >= 0.0 {
                bounds.expand_by_point(&(self.center() + dir * self.radius()));
            }
        }
        bounds
    }

    pub fn ray_intersections(&self, ray: &Ray2f) -> Vec<Intersection> {
        let mut hits: Vec<Intersection> = self.disk
            .ray_intersections(ray)
            .into_iter()
            .filter(|hit| self.on_curved_side(&hit.point()))
            .collect();

        let (a, b) = self.chord();
        if let Some(t) = ray_segment_distance(&ray.origin(), &ray.dir(), &a, &b) {
            hits.push(Intersection::facing(ray, t, self.axis()));
        }
        sort_by_distance(&mut hits);
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // Curved side towards +x.
    fn half_disk() -> SemiCircle {
        SemiCircle::new(Vector2f::zeros(), 1.0, 0.0).unwrap()
    }

    #[test]
    fn test_rejects_zero_radius() {
        assert!(SemiCircle::new(Vector2f::zeros(), 0.0, 0.0).is_err());
    }

    #[test]
    fn test_through_flat_and_curved_side() {
        let ray = Ray2f::new(Vector2f::new(-2.0, 0.0), Vector2f::new(1.0, 0.0), None, None);
        let hits = half_disk().ray_intersections(&ray);
        assert_eq!(hits.len(), 2);
        assert_abs_diff_eq!(hits[0].point().x, 0.0, epsilon = 1e-12);
        assert_eq!(hits[0].normal(), Vector2f::new(-1.0, 0.0));
        assert_abs_diff_eq!(hits[1].point().x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hits[1].normal().x, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ignores_missing_half() {
        // Passes through where the other half of the disk would be.
        let ray = Ray2f::new(Vector2f::new(-0.5, -2.0), Vector2f::new(0.0, 1.0), None, None);
        assert!(half_disk().ray_intersections(&ray).is_empty());

        let ray = Ray2f::new(Vector2f::new(0.5, -2.0), Vector2f::new(0.0, 1.0), None, None);
        assert_eq!(half_disk().ray_intersections(&ray).len(), 2);
    }

    #[test]
    fn test_contains_and_rotation() {
        let shape = half_disk();
        assert!(shape.contains_point(&Vector2f::new(0.5, 0.0)));
        assert!(!shape.contains_point(&Vector2f::new(-0.5, 0.0)));

        let turned = shape.rotated(PI, &Vector2f::zeros());
        assert!(turned.contains_point(&Vector2f::new(-0.5, 0.0)));
        assert_abs_diff_eq!(turned.reference_point().x, -1.0, epsilon = 1e-12);
        assert!(turned.rotation_center().x < 0.0);

        let bounds = shape.bounds();
        assert_abs_diff_eq!(bounds.p_min.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bounds.p_max.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bounds.p_max.y, 1.0, epsilon = 1e-12);
    }
}
