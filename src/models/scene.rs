//! Scene document: the objects and materials a lighting run reads and writes.
//!
//! Stored as YAML or JSON, picked by file extension.

use std::path::Path;

use glam::DVec3;
use lumen_core::{MaterialGraph, Mesh};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFormat {
    Yaml,
    Json,
}

impl SceneFormat {
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(SceneFormat::Yaml),
            Some("json") => Ok(SceneFormat::Json),
            _ => Err(AppError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub materials: Vec<MaterialGraph>,
}

/// Object placed in the scene. Mesh vertices are in object space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,

    #[serde(default)]
    pub location: DVec3,

    #[serde(default = "unit_scale")]
    pub scale: DVec3,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<Mesh>,

    /// Material names, indexed by slot
    #[serde(default)]
    pub material_slots: Vec<String>,

    #[serde(default)]
    pub active_material: usize,
}

fn unit_scale() -> DVec3 {
    DVec3::ONE
}

impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: DVec3::ZERO,
            scale: unit_scale(),
            mesh: None,
            material_slots: Vec::new(),
            active_material: 0,
        }
    }

    /// Mesh in world space (scale, then location)
    pub fn world_mesh(&self) -> Result<Mesh, AppError> {
        let mesh = self.mesh()?;
        let scaled = Mesh::new(
            mesh.vertices.iter().map(|v| *v * self.scale).collect(),
            mesh.faces.clone(),
        );
        Ok(scaled.translated(self.location))
    }

    pub fn world_vertices(&self) -> Result<Vec<DVec3>, AppError> {
        Ok(self.world_mesh()?.vertices)
    }

    pub fn mesh(&self) -> Result<&Mesh, AppError> {
        self.mesh
            .as_ref()
            .ok_or_else(|| AppError::NotAMesh(self.name.clone()))
    }

    pub fn has_unit_scale(&self) -> bool {
        self.scale.abs_diff_eq(DVec3::ONE, 1e-9)
    }

    pub fn active_material_name(&self) -> Result<&str, AppError> {
        self.material_slots
            .get(self.active_material)
            .map(String::as_str)
            .ok_or_else(|| AppError::MissingMaterialSlot {
                object: self.name.clone(),
                slot: self.active_material,
            })
    }
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let format = SceneFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let scene = Self::parse(&content, format)?;
        tracing::debug!(
            path = %path.display(),
            objects = scene.objects.len(),
            materials = scene.materials.len(),
            "Loaded scene"
        );
        Ok(scene)
    }

    pub fn parse(content: &str, format: SceneFormat) -> Result<Self, AppError> {
        Ok(match format {
            SceneFormat::Yaml => serde_yaml::from_str(content)?,
            SceneFormat::Json => serde_json::from_str(content)?,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let content = match SceneFormat::from_path(path)? {
            SceneFormat::Yaml => serde_yaml::to_string(self)?,
            SceneFormat::Json => serde_json::to_string_pretty(self)?,
        };
        std::fs::write(path, content)?;
        tracing::debug!(path = %path.display(), "Saved scene");
        Ok(())
    }

    pub fn object(&self, name: &str) -> Result<&SceneObject, AppError> {
        self.objects
            .iter()
            .find(|o| o.name == name)
            .ok_or_else(|| AppError::ObjectNotFound(name.to_string()))
    }

    pub fn material(&self, name: &str) -> Result<&MaterialGraph, AppError> {
        self.materials
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| AppError::MaterialNotFound(name.to_string()))
    }

    pub fn material_mut(&mut self, name: &str) -> Result<&mut MaterialGraph, AppError> {
        self.materials
            .iter_mut()
            .find(|m| m.name == name)
            .ok_or_else(|| AppError::MaterialNotFound(name.to_string()))
    }
}
