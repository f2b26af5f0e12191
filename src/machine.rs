//! Locomotion state machine.
//!
//! The machine never invokes listeners itself. Switching states and running a
//! state's loop both return a list of [`Effect`]s, and the caller decides when
//! to apply them. Kinematic changes made inside a loop are written straight to
//! the [`Body`]; only entry kinematics travel as effects.

use crate::bounds::MovementBounds;
use crate::config::ControllerConfig;
use crate::enums::LocomotionState;
use crate::kinematics::{apply_gravity, move_step, update_horizontal_velocity};
use crate::notify::StateEvent;
use crate::numeric::nearly_equal;
use bevy::prelude::*;

/// Kinematic state of the actor's box
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Half-width and half-height of the box
    pub extents: Vec2,
}

impl Body {
    pub fn new(position: Vec2, extents: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            extents,
        }
    }

    /// Apply kinematic effects in order and return the notifications among them.
    pub fn apply_effects(&mut self, effects: &[Effect]) -> Vec<StateEvent> {
        let mut events = Vec::new();
        for effect in effects {
            match effect {
                Effect::ResetVerticalVelocity => self.velocity.y = 0.0,
                Effect::Notify(event) => events.push(*event),
            }
        }
        events
    }
}

/// Per-tick inputs to a state's loop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickContext {
    /// Horizontal input axis, roughly in [-1, 1]
    pub input_horizontal: f32,
    pub dt: f32,
    /// Signed world gravity along y
    pub gravity_y: f32,
}

/// Deferred outcome of a switch or a loop
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    ResetVerticalVelocity,
    Notify(StateEvent),
}

/// Not resting on the floor: no floor in range, or not sitting exactly on it.
pub fn is_falling(bounds: &MovementBounds, body: &Body) -> bool {
    !bounds.has_floor()
        || !nearly_equal(body.position.y, bounds.bottom + body.extents.y)
}

/// Resting exactly on the floor bound.
pub fn is_idle(bounds: &MovementBounds, body: &Body) -> bool {
    nearly_equal(body.position.y, bounds.bottom + body.extents.y)
}

/// Horizontal input points toward an open side, or one the box has already reached.
pub fn is_running(bounds: &MovementBounds, body: &Body, input_horizontal: f32) -> bool {
    let x = body.position.x;
    let half_width = body.extents.x;

    (input_horizontal > 0.0
        && (bounds.right == f32::INFINITY || x > bounds.right - half_width))
        || (input_horizontal < 0.0
            && (bounds.left == f32::NEG_INFINITY || x < bounds.left + half_width))
}

#[derive(Clone, Debug, PartialEq)]
pub struct LocomotionMachine {
    state: LocomotionState,
    previous: LocomotionState,
    elapsed: f32,
}

impl Default for LocomotionMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl LocomotionMachine {
    /// A machine starts Idle without firing IdleSwitch.
    pub fn new() -> Self {
        Self {
            state: LocomotionState::Idle,
            previous: LocomotionState::Idle,
            elapsed: 0.0,
        }
    }

    pub fn current(&self) -> LocomotionState {
        self.state
    }

    /// State active before the most recent switch
    pub fn previous(&self) -> LocomotionState {
        self.previous
    }

    /// Seconds of loop time spent in the current state
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Switch to `next`. Assigning the current state is a no-op and returns no effects.
    pub fn transition_to(&mut self, next: LocomotionState) -> Vec<Effect> {
        if self.state == next {
            return Vec::new();
        }

        debug!("Switched from state {:?} to {:?}.", self.state, next);

        self.previous = self.state;
        self.state = next;
        self.elapsed = 0.0;

        match next {
            LocomotionState::Idle => vec![
                Effect::ResetVerticalVelocity,
                Effect::Notify(StateEvent::switch(next)),
            ],
            _ => vec![Effect::Notify(StateEvent::switch(next))],
        }
    }

    /// Run the active state's loop for one tick.
    ///
    /// `probe` returns the movement bounds for a box centered at the given position.
    pub fn step<P>(
        &mut self,
        body: &mut Body,
        config: &ControllerConfig,
        ctx: &TickContext,
        mut probe: P,
    ) -> Vec<Effect>
    where
        P: FnMut(Vec2) -> MovementBounds,
    {
        self.elapsed += ctx.dt;

        match self.state {
            LocomotionState::Idle => {
                let bounds = probe(body.position);

                if is_falling(&bounds, body) {
                    return self.transition_to(LocomotionState::Falling);
                }

                if is_running(&bounds, body, ctx.input_horizontal) {
                    return self.transition_to(LocomotionState::Running);
                }

                self.loop_event()
            }
            LocomotionState::Running => {
                steer(body, config, ctx);

                let bounds = probe(body.position);
                body.position =
                    move_step(body.position, body.velocity, body.extents, &bounds, ctx.dt);

                if is_falling(&bounds, body) {
                    return self.transition_to(LocomotionState::Falling);
                }

                self.loop_event()
            }
            LocomotionState::Falling => {
                steer(body, config, ctx);
                body.velocity.y = apply_gravity(
                    body.velocity.y,
                    ctx.gravity_y,
                    config.gravity_multiplier,
                    ctx.dt,
                );

                let bounds = probe(body.position);
                body.position =
                    move_step(body.position, body.velocity, body.extents, &bounds, ctx.dt);

                if is_idle(&bounds, body) {
                    return self.transition_to(LocomotionState::Idle);
                }

                self.loop_event()
            }
            // TODO: wire WallStick entry to wall_stick_transition_delay once wall contact
            // transitions exist; until then these states only report that they are active.
            LocomotionState::Walking
            | LocomotionState::Jumping
            | LocomotionState::WallSlide
            | LocomotionState::WallStick => self.loop_event(),
            LocomotionState::WallJump | LocomotionState::WallDismount => Vec::new(),
        }
    }

    fn loop_event(&self) -> Vec<Effect> {
        vec![Effect::Notify(StateEvent::looped(self.state))]
    }
}

fn steer(body: &mut Body, config: &ControllerConfig, ctx: &TickContext) {
    body.velocity.x = update_horizontal_velocity(
        body.velocity.x,
        ctx.input_horizontal,
        config.horizontal_speed,
        config.horizontal_resistance,
        ctx.dt,
    );
}
