// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector2f, FLOAT_MAX, FLOAT_MIN};
use super::ray::Ray2f;

/// Axis-aligned box in the model plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds2f {
    pub p_min: Vector2f,
    pub p_max: Vector2f
}

impl Default for Bounds2f {
    fn default() -> Self {
        Self { p_min: Vector2f::new(FLOAT_MAX, FLOAT_MAX),
               p_max: Vector2f::new(FLOAT_MIN, FLOAT_MIN) }
    }
}

impl Bounds2f {
    pub fn new(p_min: Vector2f, p_max: Vector2f) -> Self {
        let mut min = Vector2f::zeros();
        let mut max = Vector2f::zeros();
        for idx in 0..2 {
            min[idx] = p_min[idx].min(p_max[idx]);
            max[idx] = p_max[idx].max(p_min[idx]);
        }
        Self { p_min: min, p_max: max }
    }

    pub fn centered(center: Vector2f, half_width: Float, half_height: Float) -> Self {
        let half = Vector2f::new(half_width.abs(), half_height.abs());
        Self::new(center - half, center + half)
    }

    pub fn center(&self) -> Vector2f {
        0.5 * self.p_min + 0.5 * self.p_max
    }

    pub fn diagonal(&self) -> Vector2f {
        self.p_max - self.p_min
    }

    pub fn expand_by_point(&mut self, p: &Vector2f) {
        for idx in 0..2 {
            self.p_min[idx] = self.p_min[idx].min(p[idx]);
            self.p_max[idx] = self.p_max[idx].max(p[idx]);
        }
    }

    pub fn contains(&self, p: &Vector2f) -> bool {
        (0..2).all(|idx| p[idx] >= self.p_min[idx] && p[idx] <= self.p_max[idx])
    }

    /// Distance along `ray` at which it leaves the box. `None` when the
    /// origin is not inside the box.
    pub fn exit_distance(&self, ray: &Ray2f) -> Option<Float> {
        if !self.is_valid() {
            return None;
        }

        let o = ray.origin();
        if !self.contains(&o) {
            return None;
        }

        let d = ray.dir();
        let mut t_max = FLOAT_MAX;
        for idx in 0..2 {
            let dir = d[idx];
            if dir.abs() < 1e-12 {
                continue;
            }

            let inv = 1.0 / dir;
            let t0 = (self.p_min[idx] - o[idx]) * inv;
            let t1 = (self.p_max[idx] - o[idx]) * inv;
            t_max = t_max.min(t0.max(t1));
        }

        Some(t_max.max(0.0))
    }

    pub fn is_valid(&self) -> bool {
        (0..2).all(|idx| self.p_min[idx].is_finite()
                         && self.p_max[idx].is_finite()
                         && self.p_min[idx] < self.p_max[idx])
    }
}

/* Test for Bounds2f */
