use crate::enums::LocomotionState;

/// Controller setup errors
///
/// These are raised once while an actor is being assembled. A tick never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerError {
    MissingWorldQuery,
    MissingInputSource,
    InvalidExtents(f32, f32),
    InvalidConfig(String),
    NoLoopEvent(LocomotionState),
}

impl std::fmt::Display for ControllerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerError::MissingWorldQuery => {
                write!(f, "Controller requires a world query for box casts")
            }
            ControllerError::MissingInputSource => {
                write!(f, "Controller requires a horizontal input source")
            }
            ControllerError::InvalidExtents(x, y) => {
                write!(f, "Box extents must be positive and finite, got ({}, {})", x, y)
            }
            ControllerError::InvalidConfig(msg) => write!(f, "Invalid controller config: {}", msg),
            ControllerError::NoLoopEvent(state) => {
                write!(f, "State {:?} has no loop event", state)
            }
        }
    }
}

impl std::error::Error for ControllerError {}
