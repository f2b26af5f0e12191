//! Actor facade: owns the body, configuration and state machine of one actor and
//! drives them once per fixed tick.

use crate::bounds::{MovementBounds, WorldQuery, calculate_movement_bounds};
use crate::config::{ControllerConfig, DEFAULT_GRAVITY};
use crate::enums::LocomotionState;
use crate::error::ControllerError;
use crate::machine::{Body, LocomotionMachine, TickContext};
use crate::notify::{Notifier, StateEvent, SubscriptionId};
use bevy::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Polled horizontal input axis
pub trait InputSource {
    /// Current level of the axis, roughly in [-1, 1]
    fn horizontal(&self) -> f32;
}

impl InputSource for f32 {
    fn horizontal(&self) -> f32 {
        *self
    }
}

/// Input axis shared between the code that polls the device and the controller
#[derive(Clone, Debug, Default)]
pub struct AxisHandle(Arc<AtomicU32>);

impl AxisHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }
}

impl InputSource for AxisHandle {
    fn horizontal(&self) -> f32 {
        self.get()
    }
}

/// World-space 2D position owned by the host
pub trait ActorTransform {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
}

impl ActorTransform for Transform {
    fn position(&self) -> Vec2 {
        self.translation.truncate()
    }

    /// Keeps the z layer untouched
    fn set_position(&mut self, position: Vec2) {
        self.translation.x = position.x;
        self.translation.y = position.y;
    }
}

impl ActorTransform for Vec2 {
    fn position(&self) -> Vec2 {
        *self
    }

    fn set_position(&mut self, position: Vec2) {
        *self = position;
    }
}

/// Marker points for debug drawing
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugMarkers {
    /// Midpoints of the left, right, top and bottom box edges
    pub edges: [Vec2; 4],
    /// Markers on the bottom, top, left and right bounds, level with the actor
    pub bounds: [Vec2; 4],
}

impl DebugMarkers {
    pub const EDGE_RADIUS: f32 = 0.2;
    pub const BOUND_RADIUS: f32 = 1.0;

    pub fn new(position: Vec2, extents: Vec2, bounds: &MovementBounds) -> Self {
        Self {
            edges: [
                Vec2::new(position.x - extents.x, position.y),
                Vec2::new(position.x + extents.x, position.y),
                Vec2::new(position.x, position.y + extents.y),
                Vec2::new(position.x, position.y - extents.y),
            ],
            bounds: [
                Vec2::new(position.x, bounds.bottom),
                Vec2::new(position.x, bounds.top),
                Vec2::new(bounds.left, position.y),
                Vec2::new(bounds.right, position.y),
            ],
        }
    }

    /// Bound markers on sides with an obstruction in range
    pub fn finite_bounds(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.bounds.iter().copied().filter(|p| p.is_finite())
    }
}

type SharedWorld = Box<dyn WorldQuery + Send + Sync>;
type SharedInput = Box<dyn InputSource + Send + Sync>;

pub struct ActorController {
    config: ControllerConfig,
    body: Body,
    gravity: Vec2,
    machine: LocomotionMachine,
    notifier: Notifier,
    world: SharedWorld,
    input: SharedInput,
}

impl ActorController {
    pub fn builder() -> ActorControllerBuilder {
        ActorControllerBuilder::default()
    }

    pub fn state(&self) -> LocomotionState {
        self.machine.current()
    }

    /// Position as of the end of the last tick
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn extents(&self) -> Vec2 {
        self.body.extents
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn subscribe(
        &mut self,
        event: StateEvent,
        handler: impl FnMut() + Send + Sync + 'static,
    ) -> Result<SubscriptionId, ControllerError> {
        self.notifier.subscribe(event, handler)
    }

    pub fn subscribe_all(
        &mut self,
        listener: impl FnMut(StateEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.notifier.subscribe_all(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Advance one fixed tick.
    ///
    /// Reads the position from `transform`, runs the active state's loop and writes
    /// the position back. Listeners are notified only after the write-back. Returns
    /// the events fired during the tick.
    pub fn fixed_tick(&mut self, transform: &mut dyn ActorTransform, dt: f32) -> Vec<StateEvent> {
        self.body.position = transform.position();

        let ctx = TickContext {
            input_horizontal: self.input.horizontal(),
            dt,
            gravity_y: self.gravity.y,
        };

        let world = &self.world;
        let extents = self.body.extents;
        let masks = self.config.layer_mask;
        let effects = self.machine.step(&mut self.body, &self.config, &ctx, |position| {
            calculate_movement_bounds(&**world, position, extents, &masks)
        });

        let events = self.body.apply_effects(&effects);
        transform.set_position(self.body.position);

        for event in &events {
            self.notifier.dispatch(*event);
        }
        events
    }

    /// Switch state from outside the tick loop. The switch event fires before this returns.
    pub fn transition_to(&mut self, next: LocomotionState) -> Vec<StateEvent> {
        let effects = self.machine.transition_to(next);
        let events = self.body.apply_effects(&effects);
        for event in &events {
            self.notifier.dispatch(*event);
        }
        events
    }

    /// Movement bounds for the actor box centered at `position`
    fn bounds_at(&self, position: Vec2) -> MovementBounds {
        calculate_movement_bounds(
            &*self.world,
            position,
            self.body.extents,
            &self.config.layer_mask,
        )
    }

    /// Debug markers for an actor at `position`. Recomputes bounds; simulation state is untouched.
    pub fn debug_markers(&self, position: Vec2) -> DebugMarkers {
        DebugMarkers::new(position, self.body.extents, &self.bounds_at(position))
    }
}

impl std::fmt::Debug for ActorController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorController")
            .field("state", &self.machine.current())
            .field("body", &self.body)
            .field("config", &self.config)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

/// Assembles an [`ActorController`]; missing collaborators are reported by `build`.
pub struct ActorControllerBuilder {
    config: ControllerConfig,
    position: Vec2,
    extents: Vec2,
    gravity: Vec2,
    world: Option<SharedWorld>,
    input: Option<SharedInput>,
}

impl Default for ActorControllerBuilder {
    fn default() -> Self {
        Self {
            config: ControllerConfig::default(),
            position: Vec2::ZERO,
            extents: Vec2::splat(0.5),
            gravity: DEFAULT_GRAVITY,
            world: None,
            input: None,
        }
    }
}

impl ActorControllerBuilder {
    pub fn config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Half-width and half-height of the actor box
    pub fn extents(mut self, extents: Vec2) -> Self {
        self.extents = extents;
        self
    }

    pub fn gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn world(mut self, world: impl WorldQuery + Send + Sync + 'static) -> Self {
        self.world = Some(Box::new(world));
        self
    }

    pub fn input(mut self, input: impl InputSource + Send + Sync + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    pub fn build(self) -> Result<ActorController, ControllerError> {
        let world = self.world.ok_or(ControllerError::MissingWorldQuery)?;
        let input = self.input.ok_or(ControllerError::MissingInputSource)?;

        let extents = self.extents;
        if !(extents.is_finite() && extents.x > 0.0 && extents.y > 0.0) {
            return Err(ControllerError::InvalidExtents(extents.x, extents.y));
        }

        self.config.validate()?;

        if !self.gravity.is_finite() {
            return Err(ControllerError::InvalidConfig(
                "gravity must be finite".to_string(),
            ));
        }

        Ok(ActorController {
            config: self.config,
            body: Body::new(self.position, extents),
            gravity: self.gravity,
            machine: LocomotionMachine::new(),
            notifier: Notifier::new(),
            world,
            input,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayerMask;
    use crate::geometry::{SolidBox, StaticGeometry};
    use std::sync::Mutex;

    const DT: f32 = 1.0 / 50.0;

    fn ground() -> StaticGeometry {
        StaticGeometry::new(vec![SolidBox {
            min: Vec2::new(-50.0, -1.0),
            max: Vec2::new(50.0, 0.0),
            layers: LayerMask::layer(0),
        }])
    }

    fn controller(world: StaticGeometry, input: impl InputSource + Send + Sync + 'static) -> ActorController {
        ActorController::builder()
            .world(world)
            .input(input)
            .extents(Vec2::splat(0.5))
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_requires_world_query() {
        let result = ActorController::builder().input(0.0).build();
        assert!(matches!(result, Err(ControllerError::MissingWorldQuery)));
    }

    #[test]
    fn test_build_requires_input_source() {
        let result = ActorController::builder().world(ground()).build();
        assert!(matches!(result, Err(ControllerError::MissingInputSource)));
    }

    #[test]
    fn test_build_rejects_degenerate_extents() {
        let result = ActorController::builder()
            .world(ground())
            .input(0.0)
            .extents(Vec2::new(0.0, 0.5))
            .build();
        assert!(matches!(result, Err(ControllerError::InvalidExtents(_, _))));
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = ControllerConfig {
            horizontal_speed: -1.0,
            ..ControllerConfig::default()
        };
        let result = ActorController::builder()
            .world(ground())
            .input(0.0)
            .config(config)
            .build();
        assert!(matches!(result, Err(ControllerError::InvalidConfig(_))));
    }

    #[test]
    fn test_resting_actor_stays_idle() {
        let mut actor = controller(ground(), 0.0);
        let fired = Arc::new(Mutex::new(0));
        let counter = fired.clone();
        actor
            .subscribe(StateEvent::looped(LocomotionState::Idle), move || {
                *counter.lock().unwrap() += 1
            })
            .unwrap();

        let mut transform = Transform::from_xyz(0.0, 0.5, 3.0);
        let events = actor.fixed_tick(&mut transform, DT);

        assert_eq!(events, vec![StateEvent::looped(LocomotionState::Idle)]);
        assert_eq!(*fired.lock().unwrap(), 1);
        assert_eq!(actor.state(), LocomotionState::Idle);
        assert_eq!(actor.velocity(), Vec2::ZERO);
        assert_eq!(transform.translation, Vec3::new(0.0, 0.5, 3.0));
    }

    #[test]
    fn test_fall_land_and_run() {
        let axis = AxisHandle::new();
        let mut actor = controller(ground(), axis.clone());
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        actor.subscribe_all(move |event| {
            if event.phase == crate::enums::Phase::Switch {
                sink.lock().unwrap().push(event.state);
            }
        });

        let mut position = Vec2::new(0.0, 3.0);
        for _ in 0..200 {
            actor.fixed_tick(&mut position, DT);
            if actor.state() == LocomotionState::Idle && !log.lock().unwrap().is_empty() {
                break;
            }
        }

        assert_eq!(
            *log.lock().unwrap(),
            vec![LocomotionState::Falling, LocomotionState::Idle]
        );
        assert_eq!(position.y, 0.5);
        assert_eq!(actor.position(), position);
        assert_eq!(actor.velocity().y, 0.0);

        axis.set(1.0);
        actor.fixed_tick(&mut position, DT);
        assert_eq!(actor.state(), LocomotionState::Running);

        for _ in 0..10 {
            actor.fixed_tick(&mut position, DT);
        }
        assert!(position.x > 0.0);
        assert!(actor.velocity().x > 0.0);
        assert_eq!(position.y, 0.5);
        assert_eq!(actor.state(), LocomotionState::Running);
    }

    #[test]
    fn test_running_stops_at_wall() {
        let mut world = ground();
        world.push(SolidBox {
            min: Vec2::new(2.0, 0.0),
            max: Vec2::new(3.0, 5.0),
            layers: LayerMask::layer(0),
        });
        let mut actor = controller(world, 1.0);
        actor.transition_to(LocomotionState::Running);

        let mut position = Vec2::new(0.0, 0.5);
        for _ in 0..100 {
            actor.fixed_tick(&mut position, DT);
        }

        assert_eq!(position.x, 1.5);
        assert_eq!(actor.state(), LocomotionState::Running);
    }

    #[test]
    fn test_lands_and_rests_on_raised_floor() {
        let floor = StaticGeometry::new(vec![SolidBox {
            min: Vec2::new(-50.0, -1.0),
            max: Vec2::new(50.0, 0.15),
            layers: LayerMask::layer(0),
        }]);
        let mut actor = controller(floor, 0.0);
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        actor.subscribe_all(move |event| {
            if event.phase == crate::enums::Phase::Switch {
                sink.lock().unwrap().push(event.state);
            }
        });

        let mut position = Vec2::new(0.0, 2.0);
        for _ in 0..300 {
            actor.fixed_tick(&mut position, DT);
        }

        assert_eq!(
            *log.lock().unwrap(),
            vec![LocomotionState::Falling, LocomotionState::Idle]
        );
        assert_eq!(actor.state(), LocomotionState::Idle);
        assert!((position.y - 0.65).abs() < 1e-5);
    }

    #[test]
    fn test_running_stops_at_wall_with_inexact_face() {
        let mut world = ground();
        world.push(SolidBox {
            min: Vec2::new(1.3, 0.0),
            max: Vec2::new(2.3, 5.0),
            layers: LayerMask::layer(0),
        });
        let mut actor = controller(world, 1.0);
        actor.transition_to(LocomotionState::Running);

        let mut position = Vec2::new(0.0, 0.5);
        for _ in 0..200 {
            actor.fixed_tick(&mut position, DT);
        }

        assert!((position.x - 0.8).abs() < 1e-5);
        assert_eq!(actor.state(), LocomotionState::Running);
    }

    #[test]
    fn test_external_transition_fires_before_returning() {
        let mut actor = controller(ground(), 0.0);
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = fired.clone();
        actor
            .subscribe(StateEvent::switch(LocomotionState::WallJump), move || {
                sink.lock().unwrap().push("wall jump")
            })
            .unwrap();

        assert!(actor.transition_to(LocomotionState::Idle).is_empty());
        let events = actor.transition_to(LocomotionState::WallJump);

        assert_eq!(events, vec![StateEvent::switch(LocomotionState::WallJump)]);
        assert_eq!(*fired.lock().unwrap(), vec!["wall jump"]);

        // No loop body: ticking fires nothing
        let mut position = Vec2::new(0.0, 0.5);
        assert!(actor.fixed_tick(&mut position, DT).is_empty());
    }

    #[test]
    fn test_debug_markers() {
        let actor = controller(ground(), 0.0);
        let markers = actor.debug_markers(Vec2::new(1.0, 0.5));

        assert_eq!(markers.edges[0], Vec2::new(0.5, 0.5));
        assert_eq!(markers.edges[1], Vec2::new(1.5, 0.5));
        assert_eq!(markers.edges[2], Vec2::new(1.0, 1.0));
        assert_eq!(markers.edges[3], Vec2::new(1.0, 0.0));
        assert_eq!(markers.bounds[0], Vec2::new(1.0, 0.0));
        assert_eq!(markers.finite_bounds().count(), 1);
    }

    #[test]
    fn test_axis_handle_shares_value() {
        let axis = AxisHandle::new();
        let reader = axis.clone();
        assert_eq!(reader.horizontal(), 0.0);
        axis.set(-0.75);
        assert_eq!(reader.horizontal(), -0.75);
    }
}
