// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Rotation2f, Vector2f};

/// Rigid motion of the model plane: rotate, then translate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2 {
    rotation: Rotation2f,
    translation: Vector2f,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self { rotation: Rotation2f::identity(),
               translation: Vector2f::zeros() }
    }
}

impl Transform2 {
    pub fn new(angle: Float, translation: Vector2f) -> Self {
        Self { rotation: Rotation2f::new(angle), translation }
    }

    pub fn translation(dx: Float, dy: Float) -> Self {
        Self::new(0.0, Vector2f::new(dx, dy))
    }

    // R(p - c) + c == Rp + (c - Rc)
    pub fn rotation_about(angle: Float, pivot: &Vector2f) -> Self {
        let rotation = Rotation2f::new(angle);
        Self { rotation, translation: *pivot - rotation * *pivot }
    }

    pub fn angle(&self) -> Float {
        self.rotation.angle()
    }

    pub fn apply_point(&self, p: &Vector2f) -> Vector2f {
        self.rotation * *p + self.translation
    }

    /// `self` applied after `first`.
    pub fn compose(&self, first: &Transform2) -> Self {
        Self { rotation: self.rotation * first.rotation,
               translation: self.rotation * first.translation + self.translation }
    }
}
