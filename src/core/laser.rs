// Copyright @yucwang 2026

use crate::core::error::{ConfigError, ConfigResult};
use crate::core::medium::{is_visible_wavelength, WAVELENGTH_RED};
use crate::math::constants::{Float, Vector2f};
use crate::math::frame::from_angle;
use crate::math::spectrum::Color;

/// Wavelengths sampled to stand in for white light.
pub const WHITE_LIGHT_WAVELENGTHS: [Float; 7] = [400.0, 450.0, 500.0, 550.0, 600.0, 650.0, 700.0];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorMode {
    Monochromatic,
    White,
}

/// How the beam is drawn. Wave view needs ray phases.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LaserView {
    Ray,
    Wave,
}

/// One wavelength component the laser emits.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Emission {
    pub wavelength: Float,
    pub power: Float,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Laser {
    position: Vector2f,
    angle: Float,
    wavelength: Float,
    color_mode: ColorMode,
    view: LaserView,
    on: bool,
    power: Float,
}

impl Default for Laser {
    fn default() -> Self {
        Self {
            position: Vector2f::zeros(),
            angle: 0.0,
            wavelength: WAVELENGTH_RED,
            color_mode: ColorMode::Monochromatic,
            view: LaserView::Ray,
            on: true,
            power: 1.0,
        }
    }
}

impl Laser {
    /// A switched-on monochromatic laser at `position` emitting along
    /// `angle` (radians, counter-clockwise from +x).
    pub fn new(position: Vector2f, angle: Float, wavelength: Float) -> ConfigResult<Self> {
        Laser::default()
            .with_position(position)?
            .with_angle(angle)?
            .with_wavelength(wavelength)
    }

    pub fn position(&self) -> Vector2f {
        self.position
    }

    pub fn angle(&self) -> Float {
        self.angle
    }

    pub fn direction(&self) -> Vector2f {
        from_angle(self.angle)
    }

    pub fn wavelength(&self) -> Float {
        self.wavelength
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn view(&self) -> LaserView {
        self.view
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn power(&self) -> Float {
        self.power
    }

    pub fn with_position(&self, position: Vector2f) -> ConfigResult<Self> {
        if !(position.x.is_finite() && position.y.is_finite()) {
            return Err(ConfigError::NonFiniteCoordinate);
        }
        Ok(Self { position, ..self.clone() })
    }

    pub fn with_angle(&self, angle: Float) -> ConfigResult<Self> {
        if !angle.is_finite() {
            return Err(ConfigError::NonFiniteCoordinate);
        }
        Ok(Self { angle, ..self.clone() })
    }

    pub fn with_wavelength(&self, wavelength: Float) -> ConfigResult<Self> {
        if !is_visible_wavelength(wavelength) {
            return Err(ConfigError::WavelengthOutOfRange(wavelength));
        }
        Ok(Self { wavelength, ..self.clone() })
    }

    pub fn with_power(&self, power: Float) -> ConfigResult<Self> {
        if !(power > 0.0 && power <= 1.0) {
            return Err(ConfigError::InvalidLaserPower(power));
        }
        Ok(Self { power, ..self.clone() })
    }

    pub fn with_color_mode(&self, color_mode: ColorMode) -> Self {
        Self { color_mode, ..self.clone() }
    }

    pub fn with_view(&self, view: LaserView) -> Self {
        Self { view, ..self.clone() }
    }

    pub fn switched(&self, on: bool) -> Self {
        Self { on, ..self.clone() }
    }

    /// Wavelength components to trace. White light is split evenly over
    /// `WHITE_LIGHT_WAVELENGTHS` so the bundle carries the laser power.
    pub fn emissions(&self) -> Vec<Emission> {
        match self.color_mode {
            ColorMode::Monochromatic => vec![Emission {
                wavelength: self.wavelength,
                power: self.power,
                color: Color::from_wavelength(self.wavelength),
            }],
            ColorMode::White => {
                let share = self.power / WHITE_LIGHT_WAVELENGTHS.len() as Float;
                WHITE_LIGHT_WAVELENGTHS
                    .iter()
                    .map(|&wavelength| Emission {
                        wavelength,
                        power: share,
                        color: Color::from_wavelength(wavelength),
                    })
                    .collect()
            }
        }
    }
}
