// Copyright 2020 @TwoCookingMice

use super::constants::Float;

/// Display colour of a ray, channels in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: Float,
    pub g: Float,
    pub b: Float,
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Color {
    pub fn new(r: Float, g: Float, b: Float) -> Self {
        Self { r, g, b }
    }

    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    /// Approximate colour of monochromatic light with the given vacuum
    /// wavelength. Outside 380-780 nm the result is black.
    pub fn from_wavelength(wavelength_nm: Float) -> Self {
        let w = wavelength_nm;
        let (r, g, b) = if (380.0..440.0).contains(&w) {
            (-(w - 440.0) / (440.0 - 380.0), 0.0, 1.0)
        } else if (440.0..490.0).contains(&w) {
            (0.0, (w - 440.0) / (490.0 - 440.0), 1.0)
        } else if (490.0..510.0).contains(&w) {
            (0.0, 1.0, -(w - 510.0) / (510.0 - 490.0))
        } else if (510.0..580.0).contains(&w) {
            ((w - 510.0) / (580.0 - 510.0), 1.0, 0.0)
        } else if (580.0..645.0).contains(&w) {
            (1.0, -(w - 645.0) / (645.0 - 580.0), 0.0)
        } else if (645.0..=780.0).contains(&w) {
            (1.0, 0.0, 0.0)
        } else {
            (0.0, 0.0, 0.0)
        };

        // Eye sensitivity drops off at both ends of the spectrum.
        let factor = if (380.0..420.0).contains(&w) {
            0.3 + 0.7 * (w - 380.0) / (420.0 - 380.0)
        } else if (420.0..=700.0).contains(&w) {
            1.0
        } else if w > 700.0 && w <= 780.0 {
            0.3 + 0.7 * (780.0 - w) / (780.0 - 700.0)
        } else {
            0.0
        };

        Self::new(r * factor, g * factor, b * factor)
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        let quantize = |v: Float| (v.max(0.0).min(1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}
