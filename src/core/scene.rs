// Copyright @yucwang 2026

use crate::core::error::{ConfigError, ConfigResult};
use crate::core::interaction::Intersection;
use crate::core::medium::Medium;
use crate::core::shape::Shape;
use crate::math::bounds::Bounds2f;
use crate::math::constants::{Vector2f, EPSILON};
use crate::math::ray::Ray2f;

/// A solid piece of material placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Prism {
    pub shape: Shape,
    pub medium: Medium,
    pub name: Option<String>,
}

impl Prism {
    pub fn new(shape: Shape, medium: Medium) -> Self {
        Self { shape, medium, name: None }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.shape.kind_name())
    }
}

/// Which medium a point of the plane belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediumRef {
    Environment,
    Prism(usize),
}

/// Immutable snapshot of everything the tracer reads. Edits produce a new
/// scene value.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    environment: Medium,
    prisms: Vec<Prism>,
    bounds: Bounds2f,
}

impl Scene {
    pub fn new(environment: Medium, bounds: Bounds2f) -> ConfigResult<Self> {
        if !bounds.is_valid() {
            return Err(ConfigError::InvalidBounds);
        }
        Ok(Self { environment, prisms: Vec::new(), bounds })
    }

    pub fn with_prism(mut self, prism: Prism) -> Self {
        self.add_prism(prism);
        self
    }

    pub fn add_prism(&mut self, prism: Prism) {
        if !self.bounds.contains(&prism.shape.rotation_center()) {
            log::warn!("Prism {} lies outside the scene bounds.", prism.label());
        }
        self.prisms.push(prism);
    }

    /// Copy of the scene with prism `idx` swapped for `prism`.
    pub fn replacing_prism(&self, idx: usize, prism: Prism) -> Option<Self> {
        if idx >= self.prisms.len() {
            return None;
        }
        let mut scene = self.clone();
        scene.prisms[idx] = prism;
        Some(scene)
    }

    pub fn with_environment(&self, environment: Medium) -> Self {
        Self { environment, ..self.clone() }
    }

    pub fn environment(&self) -> &Medium {
        &self.environment
    }

    pub fn prisms(&self) -> &[Prism] {
        &self.prisms
    }

    pub fn bounds(&self) -> &Bounds2f {
        &self.bounds
    }

    pub fn len(&self) -> usize {
        self.prisms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prisms.is_empty()
    }

    /// The first prism in list order containing `p`, else the environment.
    pub fn medium_at(&self, p: &Vector2f) -> MediumRef {
        self.prisms
            .iter()
            .position(|prism| prism.shape.contains_point(p))
            .map(MediumRef::Prism)
            .unwrap_or(MediumRef::Environment)
    }

    pub fn medium(&self, medium_ref: MediumRef) -> &Medium {
        match medium_ref {
            MediumRef::Environment => &self.environment,
            MediumRef::Prism(idx) => self.prisms.get(idx).map(|p| &p.medium).unwrap_or(&self.environment),
        }
    }

    /// Nearest boundary crossing within `[ray.min_t, ray.max_t]`. Crossings
    /// closer together than `EPSILON` count as one; the prism listed first
    /// wins such ties.
    pub fn nearest_intersection(&self, ray: &Ray2f) -> Option<(usize, Intersection)> {
        let mut best: Option<(usize, Intersection)> = None;
        for (idx, prism) in self.prisms.iter().enumerate() {
            let hit = prism.shape
                .intersections(ray)
                .into_iter()
                .find(|hit| ray.test_segment(hit.t()));
            if let Some(hit) = hit {
                let closer = match &best {
                    None => true,
                    Some((_, current)) => hit.t() < current.t() - EPSILON,
                };
                if closer {
                    best = Some((idx, hit));
                }
            }
        }
        best
    }
}
