// Copyright @yucwang 2026

use crate::core::error::{ConfigError, ConfigResult};
use crate::core::light_ray::LightRay;
use crate::core::reading::Reading;
use crate::core::sensor::Sensor;
use crate::math::constants::{Float, Vector2f};

/// Circular probe that reports how much traced power passes through it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IntensityMeter {
    position: Vector2f,
    diameter: Float,
}

impl IntensityMeter {
    pub fn new(position: Vector2f, diameter: Float) -> ConfigResult<Self> {
        if !(diameter.is_finite() && diameter > 0.0) {
            return Err(ConfigError::InvalidProbeDiameter(diameter));
        }
        if !(position.x.is_finite() && position.y.is_finite()) {
            return Err(ConfigError::NonFiniteCoordinate);
        }
        Ok(Self { position, diameter })
    }

    pub fn position(&self) -> Vector2f {
        self.position
    }

    pub fn diameter(&self) -> Float {
        self.diameter
    }

    pub fn with_position(&self, position: Vector2f) -> ConfigResult<Self> {
        Self::new(position, self.diameter)
    }

    pub fn translated(&self, dx: Float, dy: Float) -> ConfigResult<Self> {
        self.with_position(self.position + Vector2f::new(dx, dy))
    }
}

impl Sensor for IntensityMeter {
    fn sample(&self, rays: &[LightRay]) -> Reading {
        sample(rays, &self.position, self.diameter)
    }

    fn describe(&self) -> String {
        format!("IntensityMeter: position = ({}, {}), diameter = {}",
                self.position.x, self.position.y, self.diameter)
    }
}

/// Sums the power of every segment passing within `diameter / 2` of
/// `position`. The sum is capped at 1.
///
/// A split segment starts where its parent ended. When that junction lies
/// inside the disk the parent already delivered the power, so the children
/// leaving it are not counted again.
pub fn sample(rays: &[LightRay], position: &Vector2f, diameter: Float) -> Reading {
    let mut hit = false;
    let mut total = 0.0;
    for ray in rays.iter().filter(|ray| ray.is_hit_by_probe(position, diameter)) {
        hit = true;
        if !ray.leaves_junction_within(position, diameter) {
            total += ray.power;
        }
    }

    if hit {
        Reading::hit(total)
    } else {
        Reading::Miss
    }
}
