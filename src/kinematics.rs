use crate::bounds::MovementBounds;
use bevy::prelude::Vec2;

/// Integrate `velocity` over `dt` and clamp the result so the box stays inside `bounds`.
///
/// An inverted range (box wider than the gap) is not special-cased: the lower
/// limit is checked first, then the upper one.
pub fn move_step(
    position: Vec2,
    velocity: Vec2,
    extents: Vec2,
    bounds: &MovementBounds,
    dt: f32,
) -> Vec2 {
    let next = position + velocity * dt;

    Vec2::new(
        clamp(
            next.x,
            bounds.left + extents.x,
            bounds.right - extents.x,
        ),
        clamp(
            next.y,
            bounds.bottom + extents.y,
            bounds.top - extents.y,
        ),
    )
}

/// Clamp that tolerates `min > max`, unlike `f32::clamp`
fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Unclamped linear interpolation; `t` outside [0, 1] extrapolates.
pub fn lerp_unclamped(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Horizontal velocity for the next tick.
///
/// With input held the velocity approaches `input * speed` by a factor of
/// `speed * dt`. Without input it loses `resistance` per tick and stops at zero.
pub fn update_horizontal_velocity(
    velocity_x: f32,
    input: f32,
    speed: f32,
    resistance: f32,
    dt: f32,
) -> f32 {
    if input.abs() > 0.0 {
        lerp_unclamped(velocity_x, input * speed, speed * dt)
    } else if velocity_x > 0.0 {
        (velocity_x - resistance).max(0.0)
    } else if velocity_x < 0.0 {
        (velocity_x + resistance).min(0.0)
    } else {
        velocity_x
    }
}

/// Vertical velocity after one tick of scaled gravity
pub fn apply_gravity(velocity_y: f32, gravity_y: f32, multiplier: f32, dt: f32) -> f32 {
    velocity_y + gravity_y * multiplier * dt
}
