use bevy::prelude::*;
use platformer_controller_2d::plugins::{
    CameraPlugin, DebugDrawPlugin, LevelPlugin, PhysicsPlugin, PlayerPlugin,
};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(PhysicsPlugin)
        .add_plugins(PlayerPlugin)
        .add_plugins(LevelPlugin::default())
        .add_plugins(CameraPlugin)
        .add_plugins(DebugDrawPlugin)
        .run();
}
