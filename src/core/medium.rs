// Copyright @yucwang 2026

use crate::core::error::{ConfigError, ConfigResult};
use crate::math::constants::Float;

/// Reference wavelength at which a medium's nominal index is quoted.
pub const WAVELENGTH_RED: Float = 650.0;
pub const MIN_WAVELENGTH: Float = 380.0;
pub const MAX_WAVELENGTH: Float = 700.0;

// Cauchy B coefficient (nm^2) of a crown glass with n = 1.5 at 650 nm.
const GLASS_CAUCHY_B: Float = 4200.0;
const GLASS_INDEX_FOR_RED: Float = 1.5;

pub fn is_visible_wavelength(wavelength_nm: Float) -> bool {
    (MIN_WAVELENGTH..=MAX_WAVELENGTH).contains(&wavelength_nm)
}

/// Two-term Cauchy dispersion `n(λ) = A + B / λ²`, pinned so that
/// `n(WAVELENGTH_RED)` is the quoted index. `B` scales with `n - 1`, so
/// vacuum does not disperse.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DispersionFunction {
    index_for_red: Float,
    cauchy_a: Float,
    cauchy_b: Float,
}

impl DispersionFunction {
    pub fn new(index_for_red: Float) -> Self {
        let cauchy_b = GLASS_CAUCHY_B * (index_for_red - 1.0) / (GLASS_INDEX_FOR_RED - 1.0);
        let cauchy_a = index_for_red - cauchy_b / (WAVELENGTH_RED * WAVELENGTH_RED);
        Self { index_for_red, cauchy_a, cauchy_b }
    }

    pub fn index_of_refraction(&self, wavelength_nm: Float) -> Float {
        let n = self.cauchy_a + self.cauchy_b / (wavelength_nm * wavelength_nm);
        n.max(1.0)
    }

    pub fn index_for_red(&self) -> Float {
        self.index_for_red
    }
}

/// Immutable bulk material. Adjusting a medium produces a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Medium {
    name: String,
    dispersion: DispersionFunction,
    mystery: bool,
    custom: bool,
}

impl Medium {
    pub fn new(name: &str, index_for_red: Float, mystery: bool, custom: bool) -> ConfigResult<Self> {
        if !index_for_red.is_finite() || index_for_red < 1.0 {
            return Err(ConfigError::NonPhysicalIndex(index_for_red));
        }
        Ok(Self {
            name: name.to_string(),
            dispersion: DispersionFunction::new(index_for_red),
            mystery,
            custom,
        })
    }

    /// User-tuned medium with the given index for red light.
    pub fn custom(index_for_red: Float) -> ConfigResult<Self> {
        Self::new("Custom", index_for_red, false, true)
    }

    pub fn vacuum() -> Self {
        Self { name: String::from("Vacuum"), dispersion: DispersionFunction::new(1.0),
               mystery: false, custom: false }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_mystery(&self) -> bool {
        self.mystery
    }

    pub fn is_custom(&self) -> bool {
        self.custom
    }

    pub fn dispersion(&self) -> &DispersionFunction {
        &self.dispersion
    }

    pub fn index_of_refraction(&self, wavelength_nm: Float) -> Float {
        self.dispersion.index_of_refraction(wavelength_nm)
    }

    /// The only property a mystery medium discloses.
    pub fn index_of_refraction_for_red_light(&self) -> Float {
        self.dispersion.index_of_refraction(WAVELENGTH_RED)
    }

    /// A custom copy of this medium with a different index. The receiver is
    /// left untouched.
    pub fn with_index_for_red(&self, index_for_red: Float) -> ConfigResult<Self> {
        let medium = Self::custom(index_for_red)?;
        if !self.custom {
            log::debug!("Medium {} replaced by custom index {}.", self.name, index_for_red);
        }
        Ok(medium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_calibrated_at_red() {
        for n in [1.0, 1.000293, 1.333, 1.5, 2.419] {
            let medium = Medium::new("m", n, false, false).unwrap();
            assert_abs_diff_eq!(medium.index_of_refraction_for_red_light(), n, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_normal_dispersion() {
        let glass = Medium::new("Glass", 1.5, false, false).unwrap();
        let blue = glass.index_of_refraction(400.0);
        let red = glass.index_of_refraction(700.0);
        assert!(blue > glass.index_of_refraction_for_red_light());
        assert!(red < glass.index_of_refraction_for_red_light());
        // Roughly BK7: about 0.016 spread across the visible range.
        assert!(blue - red > 0.01 && blue - red < 0.03);
    }

    #[test]
    fn test_never_below_one() {
        let vacuum = Medium::vacuum();
        for w in [380.0, 500.0, 700.0] {
            assert_eq!(vacuum.index_of_refraction(w), 1.0);
        }
        let air = Medium::new("Air", 1.000293, false, false).unwrap();
        assert!(air.index_of_refraction(700.0) >= 1.0);
    }

    #[test]
    fn test_rejects_non_physical_index() {
        assert_eq!(Medium::custom(0.9), Err(ConfigError::NonPhysicalIndex(0.9)));
        assert!(Medium::custom(Float::NAN).is_err());
    }

    #[test]
    fn test_copy_on_change() {
        let water = Medium::new("Water", 1.333, false, false).unwrap();
        let tuned = water.with_index_for_red(1.4).unwrap();
        assert_eq!(water.index_of_refraction_for_red_light(), 1.333);
        assert_abs_diff_eq!(tuned.index_of_refraction_for_red_light(), 1.4, epsilon = 1e-12);
        assert!(tuned.is_custom());
        assert!(!water.is_custom());
    }

    #[test]
    fn test_visible_range() {
        assert!(is_visible_wavelength(WAVELENGTH_RED));
        assert!(!is_visible_wavelength(800.0));
    }
}
