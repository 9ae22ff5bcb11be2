use lumen_core::{surface_area, EfficacyPreset, EmissionResult, LightingRequest};

use crate::error::AppError;
use crate::models::Scene;

/// Where the emitting area per light comes from
#[derive(Debug, Clone, PartialEq)]
pub enum EmitterArea {
    /// Square meters, entered by hand
    Manual(f64),
    /// Faces of an object that use its active material
    FromMaterial { object: String },
}

/// Emitting area and material of an object's active material slot.
///
/// The mesh is measured in object space. An unapplied object scale makes the
/// result wrong by that scale; this is logged, not corrected.
pub fn material_area(scene: &Scene, object_name: &str) -> Result<(f64, String), AppError> {
    let object = scene.object(object_name)?;
    let mesh = object.mesh()?;
    let material = object.active_material_name()?.to_string();

    if !object.has_unit_scale() {
        tracing::warn!(
            object = %object_name,
            scale = ?object.scale,
            "Object scale is not applied, emitting area will be off by that factor"
        );
    }

    let area = surface_area(mesh, object.active_material)?;
    tracing::debug!(object = %object_name, material = %material, area, "Measured emitting area");
    Ok((area, material))
}

pub fn resolve_area(source: &EmitterArea, scene: &Scene) -> Result<f64, AppError> {
    match source {
        EmitterArea::Manual(area) => Ok(*area),
        EmitterArea::FromMaterial { object } => Ok(material_area(scene, object)?.0),
    }
}

/// Emission strength for `lumens` spread over `lights` emitters of `area` each.
pub fn compute_strength(
    lumens: f64,
    efficacy: EfficacyPreset,
    area: f64,
    lights: u32,
) -> Result<EmissionResult, AppError> {
    let result = LightingRequest::new(lumens, efficacy.efficacy(), area, lights).compute()?;
    tracing::info!(
        lumens,
        efficacy = efficacy.efficacy(),
        area,
        lights,
        strength = result.strength_watts,
        "Computed emission strength"
    );
    Ok(result)
}
