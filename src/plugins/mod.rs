pub mod camera;
pub mod debug;
pub mod level;
pub mod physics;
pub mod player;

pub use camera::CameraPlugin;
pub use debug::DebugDrawPlugin;
pub use level::LevelPlugin;
pub use physics::PhysicsPlugin;
pub use player::PlayerPlugin;
