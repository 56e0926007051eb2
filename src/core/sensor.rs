// Copyright @yucwang 2026

use crate::core::light_ray::LightRay;
use crate::core::reading::Reading;

pub trait Sensor: Sync {
    fn sample(&self, rays: &[LightRay]) -> Reading;
    fn describe(&self) -> String {
        String::from("Sensor")
    }
}
