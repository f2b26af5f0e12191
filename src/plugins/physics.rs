use crate::config::DEFAULT_GRAVITY;
use bevy::prelude::*;

/// Physics rate of the host, 50 ticks per second
pub const FIXED_TIMESTEP: f32 = 1.0 / 50.0;

/// World gravity applied by falling actors
#[derive(Resource, Clone, Copy, Debug, PartialEq, Deref)]
pub struct Gravity(pub Vec2);

impl Default for Gravity {
    fn default() -> Self {
        Self(DEFAULT_GRAVITY)
    }
}

/// Plugin for the fixed timestep and world gravity
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_seconds(FIXED_TIMESTEP as f64));
        app.init_resource::<Gravity>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_plugin_inserts_resources() {
        let mut app = App::new();
        app.add_plugins(PhysicsPlugin);

        let gravity = app.world.resource::<Gravity>();
        assert_eq!(gravity.0, Vec2::new(0.0, -9.81));

        let fixed = app.world.resource::<Time<Fixed>>();
        assert!((fixed.timestep().as_secs_f32() - FIXED_TIMESTEP).abs() < 1e-6);
    }
}
