// Copyright @yucwang 2023

use crate::core::error::{ConfigError, ConfigResult};
use crate::core::interaction::{sort_by_distance, Intersection};
use crate::math::bounds::Bounds2f;
use crate::math::constants::{Float, Vector2f, EPSILON};
use crate::math::frame::{cross, perpendicular, ray_segment_distance, segment_intersection};
use crate::math::ray::Ray2f;
use crate::math::transform::Transform2;

/// Simple closed polygon given by its vertex loop. Either winding order is
/// accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vector2f>,
    reference_point_index: usize,
}

impl Polygon {
    pub fn new(vertices: Vec<Vector2f>, reference_point_index: usize) -> ConfigResult<Self> {
        let n = vertices.len();
        if n < 3 {
            return Err(ConfigError::TooFewVertices(n));
        }
        if reference_point_index >= n {
            return Err(ConfigError::ReferencePointOutOfRange { index: reference_point_index, len: n });
        }
        if vertices.iter().any(|v| !(v.x.is_finite() && v.y.is_finite())) {
            return Err(ConfigError::NonFiniteCoordinate);
        }

        let polygon = Self { vertices, reference_point_index };
        if polygon.signed_area().abs() <= EPSILON * EPSILON {
            return Err(ConfigError::ZeroAreaPolygon);
        }
        if let Some((i, j)) = polygon.first_crossing() {
            return Err(ConfigError::SelfIntersectingPolygon(i, j));
        }
        Ok(polygon)
    }

    pub fn vertices(&self) -> &[Vector2f] {
        &self.vertices
    }

    pub fn reference_point_index(&self) -> usize {
        self.reference_point_index
    }

    pub fn edges(&self) -> impl Iterator<Item = (Vector2f, Vector2f)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Shoelace area; positive for counter-clockwise loops.
    pub fn signed_area(&self) -> Float {
        0.5 * self.edges().map(|(a, b)| cross(&a, &b)).sum::<Float>()
    }

    /// Average of the corner points, used as the rotation pivot.
    pub fn centroid(&self) -> Vector2f {
        let sum = self.vertices.iter().fold(Vector2f::zeros(), |acc, v| acc + v);
        sum / self.vertices.len() as Float
    }

    pub fn rotation_center(&self) -> Vector2f {
        self.centroid()
    }

    pub fn reference_point(&self) -> Vector2f {
        self.vertices[self.reference_point_index]
    }

    /// Rigid motions keep the polygon simple, so no re-validation.
    pub fn transformed(&self, t: &Transform2) -> Self {
        Self { vertices: self.vertices.iter().map(|v| t.apply_point(v)).collect(),
               reference_point_index: self.reference_point_index }
    }

    pub fn translated(&self, dx: Float, dy: Float) -> Self {
        self.transformed(&Transform2::translation(dx, dy))
    }

    pub fn rotated(&self, angle: Float, pivot: &Vector2f) -> Self {
        self.transformed(&Transform2::rotation_about(angle, pivot))
    }

    pub fn bounds(&self) -> Bounds2f {
        let mut bounds = Bounds2f::default();
        for v in &self.vertices {
            bounds.expand_by_point(v);
        }
        bounds
    }

    /// Even-odd crossing test.
    pub fn contains_point(&self, p: &Vector2f) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Hits with every edge, nearest first. A ray through a vertex reports
    /// both adjacent edges.
    pub fn ray_intersections(&self, ray: &Ray2f) -> Vec<Intersection> {
        let o = ray.origin();
        let d = ray.dir();
        let mut hits = Vec::new();
        for (a, b) in self.edges() {
            if let Some(t) = ray_segment_distance(&o, &d, &a, &b) {
                hits.push(Intersection::facing(ray, t, perpendicular(&(b - a))));
            }
        }
        sort_by_distance(&mut hits);
        hits
    }

    fn first_crossing(&self) -> Option<(usize, usize)> {
        let n = self.vertices.len();
        for i in 0..n {
            for j in (i + 1)..n {
                // Adjacent edges share a vertex.
                if j == i + 1 || (i == 0 && j == n - 1) {
                    continue;
                }
                let (a0, a1) = (self.vertices[i], self.vertices[(i + 1) % n]);
                let (b0, b1) = (self.vertices[j], self.vertices[(j + 1) % n]);
                if segment_intersection(&a0, &a1, &b0, &b1).is_some() {
                    return Some((i, j));
                }
            }
        }
        None
    }
}
