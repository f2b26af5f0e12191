use crate::controller::ActorController;
use bevy::prelude::*;

/// Collider component - axis-aligned bounding box
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    pub width: f32,
    pub height: f32,
}

impl Collider {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Half-width and half-height
    pub fn extents(&self) -> Vec2 {
        Vec2::new(self.width, self.height) / 2.0
    }
}

/// Player marker component
#[derive(Component)]
pub struct Player;

/// Marker for static level solids
#[derive(Component)]
pub struct LevelSolid;

/// Locomotion component - the actor controller driven each fixed tick
#[derive(Component, Deref, DerefMut)]
pub struct Locomotion(pub ActorController);
