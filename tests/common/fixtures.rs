//! Test fixtures: scenes, room sources and a scratch directory.

use std::path::PathBuf;

use lumen_core::{DVec3, EfficacyPreset, Face, LuxTarget, MaterialGraph, Mesh, RoomCatalog};
use lumenkit::assets::AssetLoader;
use lumenkit::models::{Scene, SceneFormat, SceneObject};
use lumenkit::services::{ApplyOptions, AreaSource, HeightSource, RoomEstimator};
use tempfile::TempDir;

/// Object and material names used by the sample living room
pub mod names {
    pub const PANEL: &str = "CeilingPanel";
    pub const PANEL_MATERIAL: &str = "PanelGlow";
    pub const FLOOR: &str = "Floor";
    pub const WALL: &str = "Wall";
}

/// Embedded sample scene, parsed
pub fn living_room() -> Scene {
    let bytes = AssetLoader::read_sample_scene("living_room.yaml").expect("sample scene embedded");
    let content = std::str::from_utf8(&bytes).expect("sample scene is utf-8");
    Scene::parse(content, SceneFormat::Yaml).expect("sample scene parses")
}

/// Estimator over the built-in room table
pub fn builtin_estimator() -> RoomEstimator {
    RoomEstimator::new(RoomCatalog::builtin().clone())
}

/// Apply options for the sample panel, geometry taken from the scene
pub fn panel_options(room_type: &str) -> ApplyOptions {
    ApplyOptions {
        object: names::PANEL.to_string(),
        room_type: room_type.to_string(),
        area: AreaSource::Objects(vec![names::FLOOR.to_string()]),
        height: HeightSource::Object(names::WALL.to_string()),
        target: LuxTarget::Avg,
        efficacy: EfficacyPreset::StandardLed,
        lights: 1,
        make_lamp: false,
    }
}

/// A flat square light of `side` meters using a fresh lamp material
pub fn square_lamp(name: &str, material: &str, side: f64) -> (SceneObject, MaterialGraph) {
    let half = side / 2.0;
    let mut object = SceneObject::new(name);
    object.material_slots = vec![material.to_string()];
    object.mesh = Some(Mesh::new(
        vec![
            DVec3::new(-half, -half, 0.0),
            DVec3::new(half, -half, 0.0),
            DVec3::new(half, half, 0.0),
            DVec3::new(-half, half, 0.0),
        ],
        vec![Face::new(vec![0, 1, 2, 3], 0)],
    ));
    (object, MaterialGraph::lamp(material))
}

/// Scratch directory plus helpers to place scene files in it
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.path().join(file)
    }

    /// Save `scene` under `file` and return its path
    pub fn write_scene(&self, file: &str, scene: &Scene) -> PathBuf {
        let path = self.path(file);
        scene.save(&path).expect("save scene");
        path
    }
}
