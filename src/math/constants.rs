/* Copyright 2020 @Yuchen Wong */

pub type Float = f64;

pub type Vector2f = nalgebra::Vector2<Float>;
pub type Rotation2f = nalgebra::Rotation2<Float>;

// Geometric tolerance in model units (micrometres).
pub const EPSILON: Float = 1e-7;
// Step past a boundary crossing at which the medium beyond it is sampled.
pub const MEDIUM_PROBE_OFFSET: Float = 1e-5;

pub const PI: Float = std::f64::consts::PI;
pub const TWO_PI: Float = 2.0 * std::f64::consts::PI;

pub const FLOAT_MAX: Float = Float::MAX;
pub const FLOAT_MIN: Float = Float::MIN;

// Model lengths are micrometres, wavelengths are nanometres.
pub const NANOMETERS_PER_UNIT: Float = 1000.0;
