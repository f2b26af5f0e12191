use crate::components::{Locomotion, Player};
use crate::controller::AxisHandle;
use crate::enums::Phase;
use crate::notify::StateEvent;
use bevy::prelude::*;

/// Horizontal axis fed by the keyboard and read by player controllers
#[derive(Resource, Clone, Debug, Default, Deref)]
pub struct PlayerAxis(pub AxisHandle);

/// Locomotion notification forwarded into the ECS
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct LocomotionEvent {
    pub entity: Entity,
    pub event: StateEvent,
}

/// Plugin for player input and locomotion ticks
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerAxis>()
            .add_event::<LocomotionEvent>()
            .add_systems(Update, (process_input_system, log_player_switches))
            .add_systems(FixedUpdate, locomotion_tick_system);
    }
}

/// Level of the horizontal axis for the given key states
pub fn axis_from_keys(left: bool, right: bool) -> f32 {
    match (left, right) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

/// Process keyboard input and publish it on the shared axis
fn process_input_system(keyboard: Option<Res<Input<KeyCode>>>, axis: Res<PlayerAxis>) {
    let Some(keyboard) = keyboard else {
        return;
    };

    let left = keyboard.pressed(KeyCode::Left) || keyboard.pressed(KeyCode::A);
    let right = keyboard.pressed(KeyCode::Right) || keyboard.pressed(KeyCode::D);
    axis.set(axis_from_keys(left, right));
}

/// Advance every locomotion controller by one fixed tick
pub fn locomotion_tick_system(
    time: Res<Time<Fixed>>,
    mut query: Query<(Entity, &mut Locomotion, &mut Transform)>,
    mut events: EventWriter<LocomotionEvent>,
) {
    let delta_time = time.delta_seconds();

    for (entity, mut locomotion, mut transform) in query.iter_mut() {
        let fired = locomotion.fixed_tick(&mut *transform, delta_time);
        events.send_batch(
            fired
                .into_iter()
                .map(|event| LocomotionEvent { entity, event }),
        );
    }
}

/// Log player state switches
pub fn log_player_switches(
    mut events: EventReader<LocomotionEvent>,
    players: Query<(), With<Player>>,
) {
    for LocomotionEvent { entity, event } in events.read() {
        if event.phase == Phase::Switch && players.contains(*entity) {
            info!("Player entered {:?}", event.state);
        }
    }
}
