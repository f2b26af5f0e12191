use crate::error::ControllerError;
use bevy::prelude::Vec2;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HORIZONTAL_SPEED: f32 = 7.0;
pub const DEFAULT_HORIZONTAL_RESISTANCE: f32 = 0.02;
pub const DEFAULT_LOW_JUMP_SPEED: f32 = 10.0;
pub const DEFAULT_HIGH_JUMP_SPEED: f32 = 15.0;
pub const DEFAULT_GRAVITY_MULTIPLIER: f32 = 2.0;
pub const DEFAULT_WALL_SLIDE_SPEED: f32 = -2.0;
pub const DEFAULT_WALL_STICK_TRANSITION_DELAY: f32 = 0.2;
pub const DEFAULT_MAX_AVAILABLE_JUMPS: u32 = 2;

/// World gravity, world units per second squared
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, -9.81);

/// Collision layer bitmask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const NONE: LayerMask = LayerMask(0);

    pub fn layer(index: u32) -> Self {
        LayerMask(1 << index)
    }

    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::ALL
    }
}

/// One collision mask per probe direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerMaskGroup {
    pub left: LayerMask,
    pub right: LayerMask,
    pub top: LayerMask,
    pub bottom: LayerMask,
}

/// Movement tuning for one actor, read-only while the simulation runs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub horizontal_speed: f32,
    pub horizontal_resistance: f32,
    pub low_jump_speed: f32,
    pub high_jump_speed: f32,
    pub gravity_multiplier: f32,
    pub wall_slide_speed: f32,
    pub wall_stick_transition_delay: f32,
    pub max_available_jumps: u32,
    pub layer_mask: LayerMaskGroup,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            horizontal_speed: DEFAULT_HORIZONTAL_SPEED,
            horizontal_resistance: DEFAULT_HORIZONTAL_RESISTANCE,
            low_jump_speed: DEFAULT_LOW_JUMP_SPEED,
            high_jump_speed: DEFAULT_HIGH_JUMP_SPEED,
            gravity_multiplier: DEFAULT_GRAVITY_MULTIPLIER,
            wall_slide_speed: DEFAULT_WALL_SLIDE_SPEED,
            wall_stick_transition_delay: DEFAULT_WALL_STICK_TRANSITION_DELAY,
            max_available_jumps: DEFAULT_MAX_AVAILABLE_JUMPS,
            layer_mask: LayerMaskGroup::default(),
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), ControllerError> {
        let values = [
            ("horizontal_speed", self.horizontal_speed),
            ("horizontal_resistance", self.horizontal_resistance),
            ("low_jump_speed", self.low_jump_speed),
            ("high_jump_speed", self.high_jump_speed),
            ("gravity_multiplier", self.gravity_multiplier),
            ("wall_slide_speed", self.wall_slide_speed),
            ("wall_stick_transition_delay", self.wall_stick_transition_delay),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(ControllerError::InvalidConfig(format!(
                    "{} must be finite",
                    name
                )));
            }
        }

        if self.horizontal_speed <= 0.0 {
            return Err(ControllerError::InvalidConfig(
                "horizontal_speed must be positive".to_string(),
            ));
        }

        if self.horizontal_resistance < 0.0 {
            return Err(ControllerError::InvalidConfig(
                "horizontal_resistance cannot be negative".to_string(),
            ));
        }

        if self.wall_slide_speed > 0.0 {
            return Err(ControllerError::InvalidConfig(
                "wall_slide_speed must point downward".to_string(),
            ));
        }

        if self.wall_stick_transition_delay < 0.0 {
            return Err(ControllerError::InvalidConfig(
                "wall_stick_transition_delay cannot be negative".to_string(),
            ));
        }

        Ok(())
    }
}
