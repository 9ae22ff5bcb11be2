//! Full lighting run on one object: recommend, compute, write back.

use lumen_core::{
    apply_strength, apply_temperature, EfficacyPreset, EmissionResult, LuxTarget,
    RoomRecommendation,
};

use super::emission::{compute_strength, material_area};
use super::room_estimator::{AreaSource, HeightSource, RoomEstimator};
use crate::error::AppError;
use crate::models::Scene;

/// Inputs of an apply run
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Emitting object; its active material receives the result
    pub object: String,
    pub room_type: String,
    pub area: AreaSource,
    pub height: HeightSource,
    pub target: LuxTarget,
    pub efficacy: EfficacyPreset,
    pub lights: u32,
    /// Rebuild the material as a glass-bulb lamp before writing
    pub make_lamp: bool,
}

/// What an apply run computed and wrote
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyReport {
    pub material: String,
    pub recommendation: RoomRecommendation,
    pub lumens: f64,
    pub kelvin: f64,
    pub emitter_area: f64,
    pub strength: EmissionResult,
}

/// Run the whole workflow against `scene`.
///
/// Everything is computed before the material is touched, and both writes go
/// to a copy of the graph that replaces the original only when both succeed.
/// On error the scene is unchanged.
pub fn apply_lighting(
    scene: &mut Scene,
    estimator: &RoomEstimator,
    options: &ApplyOptions,
) -> Result<ApplyReport, AppError> {
    let (emitter_area, material_name) = material_area(scene, &options.object)?;

    let geometry = estimator.estimate_geometry(&options.area, &options.height, scene)?;
    let recommendation = estimator.recommend(&options.room_type, &geometry)?;
    let lumens = recommendation.lumens(options.target);
    let kelvin = recommendation.kelvin(options.target);

    let strength = compute_strength(lumens, options.efficacy, emitter_area, options.lights)?;

    let mut graph = scene.material(&material_name)?.clone();
    if options.make_lamp {
        graph.convert_to_lamp();
    }
    apply_strength(&mut graph, &strength)?;
    apply_temperature(&mut graph, kelvin)?;
    *scene.material_mut(&material_name)? = graph;

    tracing::info!(
        object = %options.object,
        material = %material_name,
        target = %options.target,
        strength = strength.strength_watts,
        kelvin,
        "Applied lighting"
    );

    Ok(ApplyReport {
        material: material_name,
        recommendation,
        lumens,
        kelvin,
        emitter_area,
        strength,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetLoader;
    use crate::models::SceneFormat;
    use lumen_core::{emission_strength_of, temperature_of, CalcError, NodeKind, RoomCatalog};

    fn sample() -> Scene {
        let bytes = AssetLoader::read_sample_scene("living_room.yaml").unwrap();
        Scene::parse(std::str::from_utf8(&bytes).unwrap(), SceneFormat::Yaml).unwrap()
    }

    fn options() -> ApplyOptions {
        ApplyOptions {
            object: "CeilingPanel".to_string(),
            room_type: "office".to_string(),
            area: AreaSource::Manual(20.0),
            height: HeightSource::Manual(2.7),
            target: LuxTarget::Avg,
            efficacy: EfficacyPreset::Custom(80.0),
            lights: 4,
            make_lamp: false,
        }
    }

    fn estimator() -> RoomEstimator {
        RoomEstimator::new(RoomCatalog::builtin().clone())
    }

    #[test]
    fn test_apply_writes_strength_and_temperature() {
        let mut scene = sample();
        let report = apply_lighting(&mut scene, &estimator(), &options()).unwrap();

        // 8000 lm / 80 lm/W = 100 W over 4 panels of 0.25 m^2
        assert_eq!(report.lumens, 8000.0);
        assert_eq!(report.emitter_area, 0.25);
        assert_eq!(report.strength.strength_watts, 100.0);
        assert_eq!(report.kelvin, 4500.0);

        let material = scene.material("PanelGlow").unwrap();
        assert_eq!(emission_strength_of(material), Some(100.0));
        assert_eq!(temperature_of(material), Some(4500.0));
    }

    #[test]
    fn test_apply_make_lamp() {
        let mut scene = sample();
        let options = ApplyOptions {
            make_lamp: true,
            ..options()
        };
        apply_lighting(&mut scene, &estimator(), &options).unwrap();

        let material = scene.material("PanelGlow").unwrap();
        assert_eq!(
            material.surface_shader().unwrap().kind,
            NodeKind::PrincipledBsdf
        );
        assert_eq!(emission_strength_of(material), Some(100.0));
        assert_eq!(temperature_of(material), Some(4500.0));
    }

    #[test]
    fn test_apply_failure_leaves_scene_untouched() {
        let mut scene = sample();
        scene
            .material_mut("PanelGlow")
            .unwrap()
            .links
            .retain(|l| l.to_socket != "Color");
        let before = scene.clone();

        let error = apply_lighting(&mut scene, &estimator(), &options()).unwrap_err();
        assert!(matches!(
            error,
            AppError::Calc(CalcError::MissingEmissionNode(_))
        ));
        assert_eq!(scene, before);
    }

    #[test]
    fn test_apply_degenerate_room() {
        let mut scene = sample();
        let options = ApplyOptions {
            area: AreaSource::Manual(0.0),
            ..options()
        };
        let error = apply_lighting(&mut scene, &estimator(), &options).unwrap_err();
        assert!(error.needs_manual_entry());
        assert_eq!(scene, sample());
    }

    #[test]
    fn test_apply_min_target() {
        let mut scene = sample();
        let options = ApplyOptions {
            target: LuxTarget::Min,
            ..options()
        };
        let report = apply_lighting(&mut scene, &estimator(), &options).unwrap();
        assert_eq!(report.lumens, 6000.0);
        assert_eq!(report.kelvin, 4000.0);
    }
}
