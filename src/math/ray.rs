// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector2f, FLOAT_MAX};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray2f {
    origin: Vector2f,
    dir: Vector2f,
    pub min_t: Float,
    pub max_t: Float
}

impl Ray2f {
    pub fn new(o: Vector2f, d: Vector2f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        Self { origin: o, dir: d.normalize(),
               min_t: min_t.unwrap_or(0.0),
               max_t: max_t.unwrap_or(FLOAT_MAX)}
    }

    pub fn origin(&self) -> Vector2f {
        self.origin
    }

    pub fn dir(&self) -> Vector2f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector2f {
        self.origin + self.dir * t
    }

    pub fn test_segment(&self, t: Float) -> bool {
        t >= self.min_t && t <= self.max_t
    }

    /// Signed distance along the ray to the projection of `p`.
    pub fn projection(&self, p: &Vector2f) -> Float {
        (p - self.origin).dot(&self.dir)
    }
}

/* Tests for Ray */
