use crate::components::{Collider, LevelSolid, Locomotion, Player};
use crate::controller::ActorController;
use crate::error::ControllerError;
use crate::geometry::StaticGeometry;
use crate::level::LevelData;
use crate::plugins::physics::Gravity;
use crate::plugins::player::PlayerAxis;
use bevy::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Resource to track current level
#[derive(Resource, Clone, Debug)]
pub struct CurrentLevel {
    pub level_id: String,
    pub level_data: LevelData,
}

/// Static geometry shared between the level and every actor controller
#[derive(Resource, Clone, Debug, Default, Deref)]
pub struct SceneGeometry(pub Arc<StaticGeometry>);

/// Plugin for level loading and actor spawning
pub struct LevelPlugin {
    pub path: String,
}

impl Default for LevelPlugin {
    fn default() -> Self {
        Self {
            path: "assets/levels/level_01.json".to_string(),
        }
    }
}

#[derive(Resource, Clone, Debug)]
struct LevelPath(String);

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(LevelPath(self.path.clone()))
            .init_resource::<PlayerAxis>()
            .init_resource::<Gravity>()
            .add_systems(Startup, setup_level);
    }
}

/// Load level from JSON file
pub fn load_level_from_file(path: &str) -> Result<LevelData, LevelLoadError> {
    // Check if file exists
    if !Path::new(path).exists() {
        return Err(LevelLoadError::FileNotFound(path.to_string()));
    }

    // Read and parse
    let contents = fs::read_to_string(path)
        .map_err(|e| LevelLoadError::IoError(path.to_string(), e.to_string()))?;

    let level_data: LevelData = serde_json::from_str(&contents)
        .map_err(|e| LevelLoadError::ParseError(path.to_string(), e.to_string()))?;

    validate_level_data(&level_data)?;

    Ok(level_data)
}

/// Validate level data for required fields and valid values
fn validate_level_data(level: &LevelData) -> Result<(), LevelLoadError> {
    if level.id.is_empty() {
        return Err(LevelLoadError::ValidationError(
            "Level ID cannot be empty".to_string(),
        ));
    }

    if !(level.actor.width > 0.0 && level.actor.height > 0.0) {
        return Err(LevelLoadError::ValidationError(
            "Actor size must be positive".to_string(),
        ));
    }

    if let Err(e) = level.actor.controller.validate() {
        return Err(LevelLoadError::ValidationError(e.to_string()));
    }

    // Every solid needs a positive area
    for (i, geo) in level.geometry.iter().enumerate() {
        if !(geo.width > 0.0 && geo.height > 0.0) {
            return Err(LevelLoadError::ValidationError(format!(
                "Geometry {} has invalid dimensions",
                i
            )));
        }
    }

    Ok(())
}

/// Build the player controller for a level
pub fn build_player_controller(
    level: &LevelData,
    geometry: Arc<StaticGeometry>,
    axis: &PlayerAxis,
    gravity: &Gravity,
) -> Result<ActorController, ControllerError> {
    let collider = Collider::new(level.actor.width, level.actor.height);

    ActorController::builder()
        .config(level.actor.controller.clone())
        .position(Vec2::new(level.spawn_point.x, level.spawn_point.y))
        .extents(collider.extents())
        .gravity(gravity.0)
        .world(geometry)
        .input(axis.0.clone())
        .build()
}

/// Spawn level entities from level data
pub fn spawn_level_entities(
    commands: &mut Commands,
    level: &LevelData,
    axis: &PlayerAxis,
    gravity: &Gravity,
) -> Result<Entity, ControllerError> {
    let geometry = Arc::new(level.static_geometry());

    // Placeholder sprites for the solids
    for solid in geometry.solids() {
        commands.spawn((
            LevelSolid,
            SpriteBundle {
                sprite: Sprite {
                    color: Color::DARK_GRAY,
                    custom_size: Some(solid.size()),
                    ..default()
                },
                transform: Transform::from_translation(solid.center().extend(0.0)),
                ..default()
            },
        ));
    }

    // Player shares the geometry and the keyboard axis
    let controller = build_player_controller(level, geometry.clone(), axis, gravity)?;
    let collider = Collider::new(level.actor.width, level.actor.height);

    let player = commands
        .spawn((
            Player,
            collider,
            Locomotion(controller),
            SpriteBundle {
                sprite: Sprite {
                    color: Color::ORANGE,
                    custom_size: Some(Vec2::new(collider.width, collider.height)),
                    ..default()
                },
                transform: Transform::from_xyz(level.spawn_point.x, level.spawn_point.y, 1.0),
                ..default()
            },
        ))
        .id();

    commands.insert_resource(SceneGeometry(geometry));
    commands.insert_resource(CurrentLevel {
        level_id: level.id.clone(),
        level_data: level.clone(),
    });

    Ok(player)
}

/// Load the configured level, falling back to the built-in scene
fn setup_level(
    mut commands: Commands,
    path: Res<LevelPath>,
    axis: Res<PlayerAxis>,
    gravity: Res<Gravity>,
) {
    let level = match load_level_from_file(&path.0) {
        Ok(level) => {
            info!("Loaded level: {}", level.id);
            level
        }
        Err(e) => {
            error!("Failed to load level {}: {}", path.0, e);
            warn!("Using built-in default scene");
            LevelData::default_scene()
        }
    };

    if let Err(e) = spawn_level_entities(&mut commands, &level, &axis, &gravity) {
        error!("Failed to spawn player for level {}: {}", level.id, e);
    }
}

/// Level loading errors
#[derive(Debug, Clone, PartialEq)]
pub enum LevelLoadError {
    FileNotFound(String),
    IoError(String, String),
    ParseError(String, String),
    ValidationError(String),
}

impl std::fmt::Display for LevelLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelLoadError::FileNotFound(path) => write!(f, "Level file not found: {}", path),
            LevelLoadError::IoError(path, err) => {
                write!(f, "IO error reading level file {}: {}", path, err)
            }
            LevelLoadError::ParseError(path, err) => {
                write!(f, "Failed to parse level file {}: {}", path, err)
            }
            LevelLoadError::ValidationError(msg) => write!(f, "Level validation error: {}", msg),
        }
    }
}

impl std::error::Error for LevelLoadError {}
