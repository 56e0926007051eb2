// Copyright @yucwang 2026

use std::collections::VecDeque;

use crate::core::error::{ConfigError, ConfigResult};
use crate::core::interaction::Intersection;
use crate::core::laser::{Emission, Laser, LaserView};
use crate::core::light_ray::LightRay;
use crate::core::scene::{MediumRef, Scene};
use crate::core::tracer::Tracer;
use crate::math::constants::{Float, Vector2f, EPSILON, MEDIUM_PROBE_OFFSET, NANOMETERS_PER_UNIT, TWO_PI};
use crate::math::ray::Ray2f;
use crate::optics::fresnel::{scatter, Scattering};

pub const DEFAULT_MAX_DEPTH: u32 = 50;
pub const DEFAULT_POWER_CUTOFF: Float = 1e-3;

/// Follows a beam through the scene, splitting it at every boundary into a
/// reflected and a transmitted part by Snell's law and the Fresnel
/// equations.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RefractionTracer {
    max_depth: u32,
    power_cutoff: Float,
}

impl Default for RefractionTracer {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH, power_cutoff: DEFAULT_POWER_CUTOFF }
    }
}

/// Beam waiting to be followed from `origin`.
struct PendingRay {
    origin: Vector2f,
    direction: Vector2f,
    power: Float,
    phase: Option<Float>,
    depth: u32,
    medium: MediumRef,
}

impl RefractionTracer {
    /// `power_cutoff` is relative to the laser power; weaker beams are
    /// dropped.
    pub fn new(max_depth: u32, power_cutoff: Float) -> ConfigResult<Self> {
        if !(0.0..1.0).contains(&power_cutoff) {
            return Err(ConfigError::InvalidPowerCutoff(power_cutoff));
        }
        Ok(Self { max_depth, power_cutoff })
    }

    pub fn power_cutoff(&self) -> Float {
        self.power_cutoff
    }

    pub fn with_max_depth(&self, max_depth: u32) -> Self {
        Self { max_depth, ..*self }
    }

    fn trace_emission(&self, scene: &Scene, laser: &Laser, emission: &Emission, rays: &mut Vec<LightRay>) {
        let wavelength = emission.wavelength;
        let cutoff = self.power_cutoff * laser.power();
        let mut queue = VecDeque::new();
        queue.push_back(PendingRay {
            origin: laser.position(),
            direction: laser.direction(),
            power: emission.power,
            phase: match laser.view() {
                LaserView::Wave => Some(0.0),
                LaserView::Ray => None,
            },
            depth: 0,
            medium: scene.medium_at(&laser.position()),
        });

        while let Some(pending) = queue.pop_front() {
            if !(pending.power > 0.0 && pending.power >= cutoff) {
                continue;
            }

            let unbounded = Ray2f::new(pending.origin, pending.direction, Some(EPSILON), None);
            let exit = match scene.bounds().exit_distance(&unbounded) {
                Some(t) if t > EPSILON => t,
                _ => {
                    log::debug!("Dropping beam at ({:.4}, {:.4}) outside the scene bounds.",
                                pending.origin.x, pending.origin.y);
                    continue;
                }
            };
            let ray = Ray2f::new(pending.origin, pending.direction, Some(EPSILON), Some(exit));
            let n1 = scene.medium(pending.medium).index_of_refraction(wavelength);
            let segment = |tip: Vector2f| LightRay {
                tail: pending.origin,
                tip,
                direction: ray.dir(),
                wavelength,
                power: pending.power,
                color: emission.color,
                phase: pending.phase,
                medium_index: n1,
                depth: pending.depth,
            };

            let (prism_idx, hit) = match scene.nearest_intersection(&ray) {
                Some(found) => found,
                None => {
                    rays.push(segment(ray.at(exit)));
                    continue;
                }
            };
            rays.push(segment(hit.point()));

            if pending.depth >= self.max_depth {
                continue;
            }

            let across = medium_across(scene, &hit, &ray.dir());
            let n2 = scene.medium(across).index_of_refraction(wavelength);
            let phase = pending.phase.map(|p| advance_phase(p, n1, hit.t(), wavelength));
            let child = |direction: Vector2f, power: Float, medium: MediumRef| PendingRay {
                origin: hit.point(),
                direction,
                power,
                phase,
                depth: pending.depth + 1,
                medium,
            };

            match scatter(&ray.dir(), &hit.normal(), n1, n2) {
                Scattering::TotalInternalReflection { reflected } => {
                    log::debug!("Total internal reflection at prism {} (n1 = {:.4}, n2 = {:.4}).",
                                prism_idx, n1, n2);
                    queue.push_back(child(reflected, pending.power, pending.medium));
                }
                Scattering::Split { reflected, transmitted, reflectance } => {
                    queue.push_back(child(reflected, pending.power * reflectance, pending.medium));
                    queue.push_back(child(transmitted, pending.power * (1.0 - reflectance), across));
                }
            }
        }
    }
}

/// Medium the ray enters at `hit`, sampled just past the crossing along the
/// ray. At a vertex or a tangent point the surface normal belongs to only one
/// of the boundaries meeting there, so stepping against it can land on a
/// neighbouring edge.
fn medium_across(scene: &Scene, hit: &Intersection, dir: &Vector2f) -> MediumRef {
    scene.medium_at(&(hit.point() + dir * MEDIUM_PROBE_OFFSET))
}

/// Phase after travelling `distance` model units through index `n`.
fn advance_phase(phase: Float, n: Float, distance: Float, wavelength_nm: Float) -> Float {
    let wavelength = wavelength_nm / NANOMETERS_PER_UNIT;
    (phase + TWO_PI * n * distance / wavelength).rem_euclid(TWO_PI)
}

impl Tracer for RefractionTracer {
    fn trace(&self, scene: &Scene, laser: &Laser) -> Vec<LightRay> {
        let mut rays = Vec::new();
        if !laser.is_on() {
            return rays;
        }

        for emission in laser.emissions() {
            self.trace_emission(scene, laser, &emission, &mut rays);
        }
        log::debug!("Traced {} segments through {} prisms.", rays.len(), scene.len());
        rays
    }

    fn max_depth(&self) -> u32 {
        self.max_depth
    }

    fn describe(&self) -> String {
        format!("RefractionTracer: max_depth = {}, power_cutoff = {}", self.max_depth, self.power_cutoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::laser::ColorMode;
    use crate::core::medium::Medium;
    use crate::core::scene::Prism;
    use crate::core::shape::Shape;
    use crate::math::bounds::Bounds2f;
    use crate::math::constants::PI;
    use crate::media::presets::{GLASS, VACUUM};
    use crate::optics::fresnel::reflectance_unpolarized;
    use crate::shapes::circle::Circle;
    use crate::shapes::polygon::Polygon;
    use crate::shapes::semicircle::SemiCircle;
    use approx::assert_abs_diff_eq;

    fn rectangle(x0: Float, y0: Float, x1: Float, y1: Float) -> Shape {
        Polygon::new(vec![Vector2f::new(x0, y0), Vector2f::new(x1, y0),
                          Vector2f::new(x1, y1), Vector2f::new(x0, y1)], 0).unwrap().into()
    }

    fn empty_scene(environment: Medium) -> Scene {
        Scene::new(environment, Bounds2f::centered(Vector2f::zeros(), 20.0, 20.0)).unwrap()
    }

    // Vacuum on the left, glass slab for 0 <= x <= 2.
    fn slab_scene() -> Scene {
        empty_scene(VACUUM.to_medium().unwrap())
            .with_prism(Prism::new(rectangle(0.0, -10.0, 2.0, 10.0), GLASS.to_medium().unwrap()))
    }

    fn laser_towards_origin(from: Vector2f) -> Laser {
        let d = -from;
        Laser::new(from, d.y.atan2(d.x), 650.0).unwrap()
    }

    fn lossless() -> RefractionTracer {
        RefractionTracer::new(DEFAULT_MAX_DEPTH, 0.0).unwrap()
    }

    fn at_depth(rays: &[LightRay], depth: u32) -> Vec<&LightRay> {
        rays.iter().filter(|r| r.depth == depth).collect()
    }

    fn angle_from_x_axis(d: &Vector2f) -> Float {
        d.y.abs().atan2(d.x.abs())
    }

    #[test]
    fn test_rejects_bad_cutoff() {
        assert!(RefractionTracer::new(10, 1.5).is_err());
        assert!(RefractionTracer::new(10, -0.1).is_err());
        assert_eq!(RefractionTracer::default().max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_laser_off_emits_nothing() {
        let laser = Laser::default().switched(false);
        assert!(RefractionTracer::default().trace(&slab_scene(), &laser).is_empty());
    }

    #[test]
    fn test_free_beam_runs_to_bounds() {
        let scene = empty_scene(VACUUM.to_medium().unwrap());
        let rays = RefractionTracer::default().trace(&scene, &Laser::default());
        assert_eq!(rays.len(), 1);
        assert_abs_diff_eq!(rays[0].tip.x, 20.0, epsilon = 1e-9);
        assert_eq!(rays[0].power, 1.0);
        assert_eq!(rays[0].phase, None);
    }

    #[test]
    fn test_laser_outside_bounds_emits_nothing() {
        let scene = empty_scene(VACUUM.to_medium().unwrap());
        let laser = Laser::new(Vector2f::new(50.0, 0.0), 0.0, 650.0).unwrap();
        assert!(RefractionTracer::default().trace(&scene, &laser).is_empty());
    }

    #[test]
    fn test_normal_incidence_on_slab() {
        let rays = lossless().trace(&slab_scene(), &laser_towards_origin(Vector2f::new(-5.0, 0.0)));
        let children = at_depth(&rays, 1);
        assert_eq!(children.len(), 2);

        let expected_r = (0.5 / 2.5) * (0.5 / 2.5);
        let reflected = children.iter().find(|r| r.direction.x < 0.0).unwrap();
        let transmitted = children.iter().find(|r| r.direction.x > 0.0).unwrap();
        assert_abs_diff_eq!(reflected.power, expected_r, epsilon = 1e-9);
        assert_abs_diff_eq!(transmitted.power, 1.0 - expected_r, epsilon = 1e-9);
        assert_abs_diff_eq!(transmitted.direction.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(transmitted.medium_index, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(reflected.medium_index, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(transmitted.tail.x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_air_to_glass_at_30_degrees() {
        let theta = (30.0 as Float).to_radians();
        let from = Vector2f::new(-5.0 * theta.cos(), 5.0 * theta.sin());
        let rays = lossless().trace(&slab_scene(), &laser_towards_origin(from));
        let transmitted = at_depth(&rays, 1).into_iter().find(|r| r.direction.x > 0.0).unwrap();
        assert_abs_diff_eq!(angle_from_x_axis(&transmitted.direction).to_degrees(), 19.47, epsilon = 0.01);
        assert_abs_diff_eq!(transmitted.power, 1.0 - 0.0415, epsilon = 5e-4);
    }

    #[test]
    fn test_total_internal_reflection_leaves_no_transmitted_beam() {
        let water = Medium::new("Water", 1.333, false, false).unwrap();
        let scene = empty_scene(Medium::vacuum())
            .with_prism(Prism::new(rectangle(-10.0, -10.0, 10.0, 0.0), water));
        // 50 degrees from the normal of the top face, starting inside the water.
        let laser = Laser::new(Vector2f::new(0.0, -2.0), (40.0 as Float).to_radians(), 650.0).unwrap();
        let rays = lossless().trace(&scene, &laser);

        let children = at_depth(&rays, 1);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].power, 1.0);
        assert!(children[0].direction.y < 0.0);
        assert_abs_diff_eq!(children[0].medium_index, 1.333, epsilon = 1e-12);
    }

    #[test]
    fn test_power_never_grows_between_generations() {
        let scene = slab_scene()
            .with_prism(Prism::new(Circle::new(Vector2f::new(6.0, 1.0), 2.0).unwrap().into(),
                                   Medium::new("Diamond", 2.419, false, false).unwrap()));
        let laser = laser_towards_origin(Vector2f::new(-5.0, 3.0));
        let tracer = lossless().with_max_depth(12);
        let rays = tracer.trace(&scene, &laser);

        for depth in 0..=12 {
            let total: Float = at_depth(&rays, depth).iter().map(|r| r.power).sum();
            assert!(total <= 1.0 + 1e-9, "depth {} carries {}", depth, total);
        }
        // Nothing is lost at the first boundary.
        let first: Float = at_depth(&rays, 1).iter().map(|r| r.power).sum();
        assert_abs_diff_eq!(first, 1.0, epsilon = 1e-12);
        assert!(rays.iter().all(|r| r.depth <= 12));
        assert!(rays.iter().all(|r| (0.0..=1.0).contains(&r.power)));
    }

    #[test]
    fn test_parallel_slab_restores_direction() {
        let laser = laser_towards_origin(Vector2f::new(-4.0, 3.0));
        let rays = lossless().trace(&slab_scene(), &laser);
        let exiting = rays.iter()
            .find(|r| r.depth == 2 && r.direction.x > 0.0 && (r.tail.x - 2.0).abs() < 1e-6)
            .unwrap();
        assert_abs_diff_eq!(exiting.direction.x, laser.direction().x, epsilon = 1e-9);
        assert_abs_diff_eq!(exiting.direction.y, laser.direction().y, epsilon = 1e-9);
        assert_abs_diff_eq!(exiting.medium_index, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_depth_budget_bounds_trapped_light() {
        // Shallow entry into a dense disk keeps light bouncing inside.
        let scene = empty_scene(VACUUM.to_medium().unwrap())
            .with_prism(Prism::new(Circle::new(Vector2f::zeros(), 5.0).unwrap().into(),
                                   Medium::new("Dense", 2.419, false, false).unwrap()));
        let laser = Laser::new(Vector2f::new(-10.0, 4.9), 0.0, 650.0).unwrap();
        let tracer = RefractionTracer::new(6, 0.0).unwrap();
        let rays = tracer.trace(&scene, &laser);
        assert!(!rays.is_empty());
        assert!(rays.iter().all(|r| r.depth <= 6));
        assert!(rays.len() < 1 << 8);
    }

    #[test]
    fn test_power_cutoff_prunes_weak_beams() {
        let laser = laser_towards_origin(Vector2f::new(-5.0, 0.0));
        let pruned = RefractionTracer::new(DEFAULT_MAX_DEPTH, 0.05).unwrap().trace(&slab_scene(), &laser);
        // The 4% reflection is below the cutoff.
        assert!(pruned.iter().all(|r| r.power >= 0.05));
        assert!(pruned.iter().all(|r| r.direction.x > 0.0));
    }

    #[test]
    fn test_trace_is_deterministic() {
        let scene = slab_scene();
        let laser = laser_towards_origin(Vector2f::new(-3.0, 2.0)).with_color_mode(ColorMode::White);
        let tracer = RefractionTracer::default();
        assert_eq!(tracer.trace(&scene, &laser), tracer.trace(&scene, &laser));
    }

    #[test]
    fn test_white_light_disperses() {
        let theta = (30.0 as Float).to_radians();
        let from = Vector2f::new(-5.0 * theta.cos(), 5.0 * theta.sin());
        let laser = laser_towards_origin(from).with_color_mode(ColorMode::White);
        let rays = lossless().trace(&slab_scene(), &laser);

        let sources = at_depth(&rays, 0);
        assert_eq!(sources.len(), 7);
        let total: Float = sources.iter().map(|r| r.power).sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);

        let refracted = |wavelength: Float| {
            at_depth(&rays, 1).into_iter()
                .find(|r| r.wavelength == wavelength && r.direction.x > 0.0)
                .map(|r| angle_from_x_axis(&r.direction))
                .unwrap()
        };
        // Blue light bends more than red.
        assert!(refracted(400.0) < refracted(700.0));
    }

    #[test]
    fn test_wave_view_tracks_phase() {
        let laser = laser_towards_origin(Vector2f::new(-5.0, 0.0)).with_view(LaserView::Wave);
        let rays = lossless().trace(&slab_scene(), &laser);
        assert_eq!(rays[0].phase, Some(0.0));
        let expected = advance_phase(0.0, 1.0, 5.0, 650.0);
        for child in at_depth(&rays, 1) {
            assert_abs_diff_eq!(child.phase.unwrap(), expected, epsilon = 1e-6);
        }
        assert!(rays.iter().all(|r| r.phase.map_or(false, |p| (0.0..TWO_PI).contains(&p))));
    }

    fn glass_scene(shape: Shape) -> Scene {
        empty_scene(VACUUM.to_medium().unwrap()).with_prism(Prism::new(shape, GLASS.to_medium().unwrap()))
    }

    // A single crossing at 45 degrees: one reflected and one transmitted child.
    fn assert_single_crossing_at_45(scene: &Scene, rays: &[LightRay], junction: Vector2f) {
        let r = reflectance_unpolarized((PI / 4.0).cos(), 1.0, 1.5);
        let children = at_depth(rays, 1);
        assert_eq!(children.len(), 2);
        for child in &children {
            assert_abs_diff_eq!((child.tail - junction).norm(), 0.0, epsilon = 1e-9);
        }
        let inside = children.iter().find(|c| c.medium_index > 1.0).unwrap();
        let outside = children.iter().find(|c| c.medium_index == 1.0).unwrap();
        assert_abs_diff_eq!(inside.medium_index, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(inside.power, 1.0 - r, epsilon = 1e-9);
        assert_abs_diff_eq!(outside.power, r, epsilon = 1e-9);
        assert!(scene.prisms()[0].shape.contains_point(&(0.5 * (inside.tail + inside.tip))));
    }

    #[test]
    fn test_entering_through_polygon_vertex() {
        let scene = glass_scene(rectangle(0.0, 0.0, 2.0, 2.0));
        let laser = Laser::new(Vector2f::new(-1.0, -1.0), PI / 4.0, 650.0).unwrap();
        let rays = lossless().trace(&scene, &laser);

        assert_abs_diff_eq!(rays[0].tip.norm(), 0.0, epsilon = 1e-9);
        assert_single_crossing_at_45(&scene, &rays, Vector2f::zeros());
    }

    #[test]
    fn test_entering_through_semicircle_chord_end() {
        let scene = glass_scene(SemiCircle::new(Vector2f::zeros(), 2.0, PI / 2.0).unwrap().into());
        let laser = Laser::new(Vector2f::new(4.0, -2.0), 0.75 * PI, 650.0).unwrap();
        let rays = lossless().trace(&scene, &laser);

        assert_single_crossing_at_45(&scene, &rays, Vector2f::new(2.0, 0.0));
    }

    #[test]
    fn test_grazing_a_polygon_corner_passes_by() {
        let scene = glass_scene(rectangle(0.0, 0.0, 2.0, 2.0));
        let laser = Laser::new(Vector2f::new(-1.0, 1.0), -PI / 4.0, 650.0).unwrap();
        let rays = lossless().trace(&scene, &laser);

        assert!(rays.iter().all(|r| r.medium_index == 1.0));
        assert!(rays.iter().all(|r| r.power == 1.0));
        assert!(rays.iter().all(|r| (r.direction - laser.direction()).norm() < 1e-12));
        let last = rays.last().unwrap();
        assert_abs_diff_eq!(last.tip.y, -20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tangent_ray_passes_circle_untouched() {
        let scene = glass_scene(Circle::new(Vector2f::zeros(), 2.0).unwrap().into());
        let laser = Laser::new(Vector2f::new(-5.0, 2.0), 0.0, 650.0).unwrap();
        let rays = lossless().trace(&scene, &laser);

        assert!(rays.iter().all(|r| r.medium_index == 1.0));
        assert!(rays.iter().all(|r| r.power == 1.0));
        assert!(rays.iter().all(|r| r.direction == Vector2f::new(1.0, 0.0)));
        let last = rays.last().unwrap();
        assert_abs_diff_eq!(last.tip.x, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(last.tip.y, 2.0, epsilon = 1e-12);
    }
}
