use crate::components::Player;
use crate::geometry::StaticGeometry;
use crate::plugins::level::SceneGeometry;
use bevy::prelude::*;

/// Camera follow speed constant - interpolation factor
const CAMERA_FOLLOW_SPEED: f32 = 3.0;

/// Visible area in world units
const TARGET_VIEWPORT_WIDTH: f32 = 32.0;
const TARGET_VIEWPORT_HEIGHT: f32 = 18.0;

/// Window size assumed when no window exists
const FALLBACK_WINDOW_WIDTH: f32 = 1280.0;
const FALLBACK_WINDOW_HEIGHT: f32 = 720.0;

/// Camera plugin - follows the player inside the scene extent
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(PostUpdate, (camera_follow_system, update_camera_projection));
    }
}

/// Camera target component - marks the camera entity
#[derive(Component)]
pub struct GameCamera;

fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2dBundle::default(), GameCamera));
}

/// Bounding rectangle of every solid in the scene
pub fn scene_extent(geometry: &StaticGeometry) -> Option<Rect> {
    geometry
        .solids()
        .iter()
        .map(|solid| Rect::from_corners(solid.min, solid.max))
        .reduce(|a, b| a.union(b))
}

/// Keep the camera center where the viewport stays inside the extent
fn constrain_axis(value: f32, min: f32, max: f32, half_viewport: f32) -> f32 {
    if max - min > half_viewport * 2.0 {
        value.clamp(min + half_viewport, max - half_viewport)
    } else {
        (min + max) / 2.0
    }
}

fn camera_follow_system(
    time: Res<Time>,
    geometry: Option<Res<SceneGeometry>>,
    player_query: Query<&Transform, (With<Player>, Without<GameCamera>)>,
    mut camera_query: Query<&mut Transform, With<GameCamera>>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };

    let Ok(mut camera_transform) = camera_query.get_single_mut() else {
        return;
    };

    // Smooth interpolation with lag
    let delta = time.delta_seconds();
    let lerp_factor = 1.0 - (-CAMERA_FOLLOW_SPEED * delta).exp();

    let current = camera_transform.translation.truncate();
    let mut next = current + (player.translation.truncate() - current) * lerp_factor;

    // Keep the view inside the level when it is known
    if let Some(extent) = geometry.as_deref().and_then(|g| scene_extent(g)) {
        next.x = constrain_axis(
            next.x,
            extent.min.x,
            extent.max.x,
            TARGET_VIEWPORT_WIDTH / 2.0,
        );
        next.y = constrain_axis(
            next.y,
            extent.min.y,
            extent.max.y,
            TARGET_VIEWPORT_HEIGHT / 2.0,
        );
    }

    camera_transform.translation.x = next.x;
    camera_transform.translation.y = next.y;
}

/// World units per pixel so the target area always fits the window
pub fn projection_scale(window_width: f32, window_height: f32) -> f32 {
    let scale_x = TARGET_VIEWPORT_WIDTH / window_width;
    let scale_y = TARGET_VIEWPORT_HEIGHT / window_height;
    scale_x.max(scale_y)
}

fn update_camera_projection(
    windows: Query<&Window>,
    mut camera_query: Query<&mut OrthographicProjection, With<GameCamera>>,
) {
    let Ok(mut projection) = camera_query.get_single_mut() else {
        return;
    };

    // Use the fallback size if no window exists yet
    let (window_width, window_height) = windows
        .iter()
        .next()
        .map(|win| (win.width(), win.height()))
        .filter(|(w, h)| *w > 0.0 && *h > 0.0)
        .unwrap_or((FALLBACK_WINDOW_WIDTH, FALLBACK_WINDOW_HEIGHT));

    projection.scale = projection_scale(window_width, window_height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayerMask;
    use crate::geometry::SolidBox;
    use std::sync::Arc;

    fn camera_position(app: &mut App) -> Vec2 {
        let mut camera_query = app.world.query_filtered::<&Transform, With<GameCamera>>();
        camera_query
            .iter(&app.world)
            .next()
            .unwrap()
            .translation
            .truncate()
    }

    fn wide_scene() -> SceneGeometry {
        SceneGeometry(Arc::new(StaticGeometry::new(vec![
            SolidBox {
                min: Vec2::new(0.0, -1.0),
                max: Vec2::new(100.0, 0.0),
                layers: LayerMask::ALL,
            },
            SolidBox {
                min: Vec2::new(0.0, 0.0),
                max: Vec2::new(1.0, 40.0),
                layers: LayerMask::ALL,
            },
        ])))
    }

    #[test]
    fn test_camera_plugin_builds() {
        let mut app = App::new();
        app.add_plugins(CameraPlugin);
    }

    #[test]
    fn test_scene_extent() {
        let scene = wide_scene();
        let extent = scene_extent(&scene).unwrap();
        assert_eq!(extent.min, Vec2::new(0.0, -1.0));
        assert_eq!(extent.max, Vec2::new(100.0, 40.0));

        assert!(scene_extent(&StaticGeometry::default()).is_none());
    }

    #[test]
    fn test_constrain_axis() {
        assert_eq!(constrain_axis(-5.0, 0.0, 100.0, 16.0), 16.0);
        assert_eq!(constrain_axis(50.0, 0.0, 100.0, 16.0), 50.0);
        assert_eq!(constrain_axis(99.0, 0.0, 100.0, 16.0), 84.0);
        // Narrow extents are centered
        assert_eq!(constrain_axis(3.0, 0.0, 10.0, 16.0), 5.0);
    }

    #[test]
    fn test_projection_scale() {
        assert!((projection_scale(1280.0, 720.0) - 0.025).abs() < 1e-6);
        // Tall windows are limited by width
        assert!((projection_scale(640.0, 720.0) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_camera_follow_interpolation() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(CameraPlugin);

        app.world
            .spawn((Player, Transform::from_xyz(20.0, 10.0, 1.0)));

        app.update();
        let initial = camera_position(&mut app);

        for _ in 0..10 {
            app.update();
        }

        let target = Vec2::new(20.0, 10.0);
        let moved = camera_position(&mut app);
        assert!(
            moved.distance(target) < initial.distance(target),
            "Camera should move closer to player over time"
        );
    }

    #[test]
    fn test_camera_constrained_to_scene() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(CameraPlugin);
        app.insert_resource(wide_scene());

        app.world
            .spawn((Player, Transform::from_xyz(-30.0, 20.0, 1.0)));

        for _ in 0..20 {
            app.update();
        }

        let position = camera_position(&mut app);
        assert!(
            position.x >= 16.0 - 1e-4,
            "Camera X should stay inside the scene, got {}",
            position.x
        );
    }

    #[test]
    fn test_projection_uses_fallback_without_window() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(CameraPlugin);

        app.update();

        let mut camera_query = app
            .world
            .query_filtered::<&OrthographicProjection, With<GameCamera>>();
        let projection = camera_query.iter(&app.world).next().unwrap();
        assert!((projection.scale - 0.025).abs() < 1e-6);
    }
}
