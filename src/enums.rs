
/// Locomotion state - exactly one is active per actor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LocomotionState {
    #[default]
    Idle,
    Walking,
    Running,
    Falling,
    Jumping,
    WallSlide,
    WallStick,
    WallJump,
    WallDismount,
}

impl LocomotionState {
    pub const ALL: [LocomotionState; 9] = [
        LocomotionState::Idle,
        LocomotionState::Walking,
        LocomotionState::Running,
        LocomotionState::Falling,
        LocomotionState::Jumping,
        LocomotionState::WallSlide,
        LocomotionState::WallStick,
        LocomotionState::WallJump,
        LocomotionState::WallDismount,
    ];

    /// WallJump and WallDismount only ever announce that they were entered.
    pub fn has_loop_event(self) -> bool {
        !matches!(
            self,
            LocomotionState::WallJump | LocomotionState::WallDismount
        )
    }
}

/// Notification phase - fired once on entry, or once per tick while active
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Switch,
    Loop,
}

/// Axis direction of a box cast
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastDirection {
    Left,
    Right,
    Up,
    Down,
}

impl CastDirection {
    pub fn is_horizontal(self) -> bool {
        matches!(self, CastDirection::Left | CastDirection::Right)
    }
}
