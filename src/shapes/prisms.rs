// Copyright @yucwang 2026

use crate::core::error::{ConfigError, ConfigResult};
use crate::core::shape::Shape;
use crate::math::constants::{Float, Vector2f, PI};
use crate::shapes::circle::Circle;
use crate::shapes::polygon::Polygon;
use crate::shapes::semicircle::SemiCircle;

/// Prism outlines offered by the prism toolbox.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrismKind {
    Triangle,
    Trapezoid,
    Square,
    SemiCircle,
    Circle,
}

impl PrismKind {
    pub const ALL: [PrismKind; 5] = [PrismKind::Triangle, PrismKind::Trapezoid, PrismKind::Square,
                                     PrismKind::SemiCircle, PrismKind::Circle];

    pub fn name(&self) -> &'static str {
        match self {
            PrismKind::Triangle => "triangle",
            PrismKind::Trapezoid => "trapezoid",
            PrismKind::Square => "square",
            PrismKind::SemiCircle => "semicircle",
            PrismKind::Circle => "circle",
        }
    }

    pub fn from_name(name: &str) -> Option<PrismKind> {
        PrismKind::ALL.iter().copied().find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Builds the outline centred on `center` with characteristic width
    /// `size` (side length, or diameter for the round kinds).
    pub fn build(&self, center: Vector2f, size: Float) -> ConfigResult<Shape> {
        if !(size.is_finite() && size > 0.0) {
            return Err(ConfigError::InvalidPrismSize(size));
        }
        let half = 0.5 * size;
        let shape = match self {
            PrismKind::Triangle => {
                let h = size * (3.0 as Float).sqrt() / 2.0;
                polygon(center, &[(-half, -h / 3.0), (half, -h / 3.0), (0.0, 2.0 * h / 3.0)])?
            }
            PrismKind::Trapezoid => {
                let h = size * (3.0 as Float).sqrt() / 4.0;
                polygon(center, &[(-half, -h / 2.0), (half, -h / 2.0),
                                  (half / 2.0, h / 2.0), (-half / 2.0, h / 2.0)])?
            }
            PrismKind::Square => {
                polygon(center, &[(-half, -half), (half, -half), (half, half), (-half, half)])?
            }
            PrismKind::SemiCircle => SemiCircle::new(center, half, PI / 2.0)?.into(),
            PrismKind::Circle => Circle::new(center, half)?.into(),
        };
        Ok(shape)
    }
}

fn polygon(center: Vector2f, offsets: &[(Float, Float)]) -> ConfigResult<Shape> {
    let vertices = offsets.iter().map(|(x, y)| center + Vector2f::new(*x, *y)).collect();
    Ok(Polygon::new(vertices, 0)?.into())
}
