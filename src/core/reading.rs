// Copyright @yucwang 2026

use std::fmt;

use crate::math::constants::Float;

/// Result of sampling traced light at a probe.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Reading {
    /// Fraction of the laser power reaching the probe, in `[0, 1]`.
    Hit(Float),
    Miss,
}

impl Reading {
    /// Shown in place of a number when no light reaches the probe.
    pub const MISS_STRING: &'static str = "\u{2014}";

    /// Clamps `value` into `[0, 1]`.
    pub fn hit(value: Float) -> Self {
        Reading::Hit(value.clamp(0.0, 1.0))
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Reading::Hit(_))
    }

    pub fn value(&self) -> Option<Float> {
        match self {
            Reading::Hit(value) => Some(*value),
            Reading::Miss => None,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Hit(value) => write!(f, "{:.2}%", value * 100.0),
            Reading::Miss => f.write_str(Self::MISS_STRING),
        }
    }
}
