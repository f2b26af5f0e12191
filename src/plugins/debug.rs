use crate::components::Locomotion;
use crate::controller::DebugMarkers;
use bevy::prelude::*;

const EDGE_COLOR: Color = Color::YELLOW;
const BOUND_COLOR: Color = Color::RED;

/// Draws edge and bound markers for every locomotion controller
pub struct DebugDrawPlugin;

impl Plugin for DebugDrawPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, draw_debug_markers);
    }
}

/// Circles to draw for one set of markers
pub fn marker_circles(markers: &DebugMarkers) -> Vec<(Vec2, f32, Color)> {
    let edges = markers
        .edges
        .iter()
        .map(|&p| (p, DebugMarkers::EDGE_RADIUS, EDGE_COLOR));
    let bounds = markers
        .finite_bounds()
        .map(|p| (p, DebugMarkers::BOUND_RADIUS, BOUND_COLOR));
    edges.chain(bounds).collect()
}

fn draw_debug_markers(mut gizmos: Gizmos, query: Query<(&Locomotion, &Transform)>) {
    for (locomotion, transform) in query.iter() {
        let markers = locomotion.debug_markers(transform.translation.truncate());
        for (center, radius, color) in marker_circles(&markers) {
            gizmos.circle_2d(center, radius, color);
        }
    }
}
