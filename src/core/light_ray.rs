// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f};
use crate::math::frame::distance_to_segment;
use crate::math::ray::Ray2f;
use crate::math::spectrum::Color;

/// One straight, finished segment of a traced beam.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRay {
    pub tail: Vector2f,
    pub tip: Vector2f,
    pub direction: Vector2f,
    /// Vacuum wavelength in nm.
    pub wavelength: Float,
    /// Fraction of the laser power, in `[0, 1]`.
    pub power: Float,
    pub color: Color,
    /// Phase at the tail in radians, only tracked in wave view.
    pub phase: Option<Float>,
    /// Index of refraction of the medium the segment runs through.
    pub medium_index: Float,
    /// Number of boundary events between the laser and this segment.
    pub depth: u32,
}

impl LightRay {
    pub fn length(&self) -> Float {
        (self.tip - self.tail).norm()
    }

    pub fn wavelength_in_medium(&self) -> Float {
        self.wavelength / self.medium_index
    }

    pub fn to_ray(&self) -> Ray2f {
        Ray2f::new(self.tail, self.direction, Some(0.0), Some(self.length()))
    }

    /// Distance from `p` to the segment, not to the infinite line.
    pub fn distance_to_point(&self, p: &Vector2f) -> Float {
        distance_to_segment(p, &self.tail, &self.tip)
    }

    pub fn is_hit_by_probe(&self, position: &Vector2f, diameter: Float) -> bool {
        self.distance_to_point(position) <= 0.5 * diameter
    }

    /// True if the segment was split off at a boundary lying within
    /// `diameter / 2` of `position`. Its tail is then its parent's tip.
    pub fn leaves_junction_within(&self, position: &Vector2f, diameter: Float) -> bool {
        self.depth > 0 && (self.tail - position).norm() <= 0.5 * diameter
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    pub(crate) fn segment(tail: Vector2f, tip: Vector2f, power: Float) -> LightRay {
        LightRay {
            tail,
            tip,
            direction: (tip - tail).normalize(),
            wavelength: 650.0,
            power,
            color: Color::from_wavelength(650.0),
            phase: None,
            medium_index: 1.0,
            depth: 0,
        }
    }

    #[test]
    fn test_geometry() {
        let ray = segment(Vector2f::new(0.0, 0.0), Vector2f::new(3.0, 4.0), 0.5);
        assert_abs_diff_eq!(ray.length(), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ray.to_ray().at(5.0).x, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ray.distance_to_point(&Vector2f::new(6.0, 8.0)), 5.0, epsilon = 1e-12);
        assert!(ray.is_hit_by_probe(&Vector2f::new(1.5, 2.0), 0.01));
        assert!(!ray.is_hit_by_probe(&Vector2f::new(6.0, 8.0), 0.01));
    }

    #[test]
    fn test_wavelength_in_medium() {
        let mut ray = segment(Vector2f::zeros(), Vector2f::new(1.0, 0.0), 1.0);
        ray.medium_index = 1.3;
        assert_abs_diff_eq!(ray.wavelength_in_medium(), 500.0, epsilon = 1e-9);
    }
}
