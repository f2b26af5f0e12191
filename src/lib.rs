pub mod bounds;
pub mod components;
pub mod config;
pub mod controller;
pub mod enums;
pub mod error;
pub mod geometry;
pub mod kinematics;
pub mod level;
pub mod machine;
pub mod notify;
pub mod numeric;
pub mod plugins;

pub use bounds::{calculate_movement_bounds, BoxCastHit, MovementBounds, WorldQuery};
pub use components::*;
pub use config::{ControllerConfig, LayerMask, LayerMaskGroup};
pub use controller::{
    ActorController, ActorControllerBuilder, ActorTransform, AxisHandle, InputSource,
};
pub use enums::*;
pub use error::ControllerError;
pub use level::LevelData;
pub use notify::{Notifier, StateEvent, SubscriptionId};
