// Copyright @yucwang 2026

use crate::core::laser::Laser;
use crate::core::light_ray::LightRay;
use crate::core::scene::Scene;

pub trait Tracer: Sync {
    /// Every segment of the beam tree the laser produces in `scene`. Always
    /// finite; an empty result means nothing was emitted.
    fn trace(&self, scene: &Scene, laser: &Laser) -> Vec<LightRay>;
    fn max_depth(&self) -> u32;
    fn describe(&self) -> String {
        String::from("Tracer")
    }
}
