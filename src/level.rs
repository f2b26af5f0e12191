use crate::config::{ControllerConfig, LayerMask};
use crate::geometry::{SolidBox, StaticGeometry};
use bevy::prelude::Vec2;
use serde::{Deserialize, Serialize};

/// Level data structure matching JSON format
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub id: String,
    pub spawn_point: SpawnPoint,
    pub actor: ActorData,
    pub geometry: Vec<GeometryData>,
}

/// Spawn point data
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

/// Actor box size and tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorData {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub controller: ControllerConfig,
}

/// Solid box in world units, positioned by its lower-left corner
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryData {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub layers: LayerMask,
}

impl GeometryData {
    pub fn to_solid(&self) -> SolidBox {
        SolidBox {
            min: Vec2::new(self.x, self.y),
            max: Vec2::new(self.x + self.width, self.y + self.height),
            layers: self.layers,
        }
    }
}

impl LevelData {
    pub fn static_geometry(&self) -> StaticGeometry {
        StaticGeometry::new(self.geometry.iter().map(GeometryData::to_solid).collect())
    }

    /// Built-in scene: a floor, a step and a wall on each side
    pub fn default_scene() -> Self {
        let solid = |x: f32, y: f32, width: f32, height: f32| GeometryData {
            x,
            y,
            width,
            height,
            layers: LayerMask::layer(0),
        };

        LevelData {
            id: "default".to_string(),
            spawn_point: SpawnPoint { x: 0.0, y: 4.0 },
            actor: ActorData {
                width: 1.0,
                height: 1.0,
                controller: ControllerConfig::default(),
            },
            geometry: vec![
                solid(-20.0, -1.0, 40.0, 1.0),
                solid(4.0, 0.0, 4.0, 1.5),
                solid(-21.0, -1.0, 1.0, 12.0),
                solid(20.0, -1.0, 1.0, 12.0),
            ],
        }
    }
}
