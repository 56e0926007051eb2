// Copyright @yucwang 2026

use crate::core::error::ConfigResult;
use crate::core::medium::Medium;
use crate::math::constants::Float;

/// Allowed range of the custom medium index slider.
pub const CUSTOM_INDEX_RANGE: (Float, Float) = (1.0, 1.6);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MediumPreset {
    pub name: &'static str,
    pub index_for_red: Float,
    pub mystery: bool,
    pub custom: bool,
}

impl MediumPreset {
    pub fn to_medium(&self) -> ConfigResult<Medium> {
        Medium::new(self.name, self.index_for_red, self.mystery, self.custom)
    }
}

pub const VACUUM: MediumPreset = MediumPreset { name: "Vacuum", index_for_red: 1.0, mystery: false, custom: false };
pub const AIR: MediumPreset = MediumPreset { name: "Air", index_for_red: 1.000293, mystery: false, custom: false };
pub const WATER: MediumPreset = MediumPreset { name: "Water", index_for_red: 1.333, mystery: false, custom: false };
pub const GLASS: MediumPreset = MediumPreset { name: "Glass", index_for_red: 1.5, mystery: false, custom: false };
pub const DIAMOND: MediumPreset = MediumPreset { name: "Diamond", index_for_red: 2.419, mystery: false, custom: false };
pub const MYSTERY_A: MediumPreset = MediumPreset { name: "Mystery A", index_for_red: 1.8, mystery: true, custom: false };
pub const MYSTERY_B: MediumPreset = MediumPreset { name: "Mystery B", index_for_red: 1.4, mystery: true, custom: false };
pub const CUSTOM: MediumPreset = MediumPreset { name: "Custom", index_for_red: 1.2, mystery: false, custom: true };

pub static MEDIUM_PRESETS: [MediumPreset; 8] = [VACUUM, AIR, WATER, GLASS, DIAMOND, MYSTERY_A, MYSTERY_B, CUSTOM];

/// Case-insensitive lookup; spaces, dashes and underscores are ignored so
/// `mystery_a` finds "Mystery A".
pub fn find_preset(name: &str) -> Option<&'static MediumPreset> {
    let key = normalize(name);
    MEDIUM_PRESETS.iter().find(|preset| normalize(preset.name) == key)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_physical() {
        for preset in MEDIUM_PRESETS.iter() {
            let medium = preset.to_medium().unwrap();
            assert_eq!(medium.name(), preset.name);
            assert!(medium.index_of_refraction_for_red_light() >= 1.0);
            assert_eq!(medium.is_mystery(), preset.mystery);
        }
    }

    #[test]
    fn test_find_preset() {
        assert_eq!(find_preset("water"), Some(&WATER));
        assert_eq!(find_preset("MYSTERY_A"), Some(&MYSTERY_A));
        assert_eq!(find_preset("mystery-b").map(|p| p.index_for_red), Some(1.4));
        assert!(find_preset("unobtainium").is_none());
    }
}
