//! Movement bounds derived from four directional box casts.
//!
//! Each side of the actor is probed independently with its own collision mask.
//! A side with nothing in range, or whose only hit already overlaps the actor,
//! stays open (signed infinity) instead of producing an error.

use crate::config::{LayerMask, LayerMaskGroup};
use crate::enums::CastDirection;
use crate::numeric::nearly_equal;
use bevy::prelude::Vec2;
use std::sync::Arc;

/// Probe distance of every box cast, in world units
pub const PROBE_DISTANCE: f32 = 1.0;

/// Nearest obstruction reported by a box cast
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxCastHit {
    pub point: Vec2,
    pub distance: f32,
}

/// Collision queries the controller needs from the host world.
pub trait WorldQuery {
    /// Sweep a box of `size` centered on `origin` along `direction` for at most
    /// `max_distance`, considering only colliders on `mask`.
    fn box_cast(
        &self,
        origin: Vec2,
        size: Vec2,
        direction: CastDirection,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<BoxCastHit>;
}

impl<T: WorldQuery + ?Sized> WorldQuery for Arc<T> {
    fn box_cast(
        &self,
        origin: Vec2,
        size: Vec2,
        direction: CastDirection,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<BoxCastHit> {
        (**self).box_cast(origin, size, direction, max_distance, mask)
    }
}

impl<T: WorldQuery + ?Sized> WorldQuery for Box<T> {
    fn box_cast(
        &self,
        origin: Vec2,
        size: Vec2,
        direction: CastDirection,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<BoxCastHit> {
        (**self).box_cast(origin, size, direction, max_distance, mask)
    }
}

/// World-space lines constraining the actor box on each side
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl MovementBounds {
    /// No obstruction on any side
    pub const OPEN: MovementBounds = MovementBounds {
        left: f32::NEG_INFINITY,
        right: f32::INFINITY,
        top: f32::INFINITY,
        bottom: f32::NEG_INFINITY,
    };

    pub fn has_floor(&self) -> bool {
        self.bottom.is_finite()
    }
}

impl Default for MovementBounds {
    fn default() -> Self {
        MovementBounds::OPEN
    }
}

/// Probe all four sides of the box at `position` and build its movement bounds.
pub fn calculate_movement_bounds<W: WorldQuery + ?Sized>(
    world: &W,
    position: Vec2,
    extents: Vec2,
    masks: &LayerMaskGroup,
) -> MovementBounds {
    let size = extents * 2.0;
    let min = position - extents;
    let max = position + extents;

    let cast = |direction: CastDirection, mask: LayerMask| {
        world.box_cast(position, size, direction, PROBE_DISTANCE, mask)
    };

    MovementBounds {
        left: cast(CastDirection::Left, masks.left)
            .map(|hit| hit.point.x)
            .filter(|&x| is_beyond(min.x, x, -1.0))
            .unwrap_or(f32::NEG_INFINITY),
        right: cast(CastDirection::Right, masks.right)
            .map(|hit| hit.point.x)
            .filter(|&x| is_beyond(max.x, x, 1.0))
            .unwrap_or(f32::INFINITY),
        top: cast(CastDirection::Up, masks.top)
            .map(|hit| hit.point.y)
            .filter(|&y| is_beyond(max.y, y, 1.0))
            .unwrap_or(f32::INFINITY),
        bottom: cast(CastDirection::Down, masks.bottom)
            .map(|hit| hit.point.y)
            .filter(|&y| is_beyond(min.y, y, -1.0))
            .unwrap_or(f32::NEG_INFINITY),
    }
}

/// True when `hit` lies outside the box edge `edge` on the side given by `sign`.
/// A hit on the edge itself is a touching contact and counts as outside.
fn is_beyond(edge: f32, hit: f32, sign: f32) -> bool {
    (hit - edge) * sign > 0.0 || nearly_equal(hit, edge)
}
