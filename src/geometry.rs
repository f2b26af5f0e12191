use crate::bounds::{BoxCastHit, WorldQuery};
use crate::config::LayerMask;
use crate::enums::CastDirection;
use crate::numeric::NEARLY_EQUAL_EPSILON;
use bevy::prelude::*;

/// Static solid box in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidBox {
    pub min: Vec2,
    pub max: Vec2,
    pub layers: LayerMask,
}

impl SolidBox {
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// World query over a fixed set of axis-aligned solids
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticGeometry {
    solids: Vec<SolidBox>,
}

impl StaticGeometry {
    pub fn new(solids: Vec<SolidBox>) -> Self {
        Self { solids }
    }

    pub fn push(&mut self, solid: SolidBox) {
        self.solids.push(solid);
    }

    pub fn solids(&self) -> &[SolidBox] {
        &self.solids
    }
}

impl WorldQuery for StaticGeometry {
    fn box_cast(
        &self,
        origin: Vec2,
        size: Vec2,
        direction: CastDirection,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<BoxCastHit> {
        let half = size / 2.0;
        let min = origin - half;
        let max = origin + half;

        let mut nearest: Option<BoxCastHit> = None;

        for solid in self.solids.iter().filter(|s| s.layers.intersects(mask)) {
            // The solid must overlap the swept box across the cast axis
            let (span_min, span_max, solid_min, solid_max) = if direction.is_horizontal() {
                (min.y, max.y, solid.min.y, solid.max.y)
            } else {
                (min.x, max.x, solid.min.x, solid.max.x)
            };
            if penetration(span_min, span_max, solid_min, solid_max) <= NEARLY_EQUAL_EPSILON {
                continue;
            }

            // Faces within epsilon of each other are touching, not overlapping
            let overlapping = penetration(min.x, max.x, solid.min.x, solid.max.x)
                > NEARLY_EQUAL_EPSILON
                && penetration(min.y, max.y, solid.min.y, solid.max.y) > NEARLY_EQUAL_EPSILON;

            let hit = if overlapping {
                BoxCastHit {
                    point: origin,
                    distance: 0.0,
                }
            } else {
                let contact_mid = (span_min.max(solid_min) + span_max.min(solid_max)) / 2.0;
                let (gap, point) = match direction {
                    CastDirection::Left => (min.x - solid.max.x, Vec2::new(solid.max.x, contact_mid)),
                    CastDirection::Right => (solid.min.x - max.x, Vec2::new(solid.min.x, contact_mid)),
                    CastDirection::Up => (solid.min.y - max.y, Vec2::new(contact_mid, solid.min.y)),
                    CastDirection::Down => (min.y - solid.max.y, Vec2::new(contact_mid, solid.max.y)),
                };
                if gap < -NEARLY_EQUAL_EPSILON || gap > max_distance {
                    continue;
                }
                BoxCastHit {
                    point,
                    distance: gap.max(0.0),
                }
            };

            if nearest.map_or(true, |n| hit.distance < n.distance) {
                nearest = Some(hit);
            }
        }

        nearest
    }
}

/// Length of the overlap between two intervals, negative when they are apart
fn penetration(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> f32 {
    a_max.min(b_max) - a_min.max(b_min)
}
