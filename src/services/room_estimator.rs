use glam::{DVec2, DVec3};
use lumen_core::{
    floor_area, projected_floor_area, room_height, vertical_extent, RoomCatalog,
    RoomGeometry, RoomRecommendation,
};

use crate::error::AppError;
use crate::models::Scene;

/// Where the floor area comes from
#[derive(Debug, Clone, PartialEq)]
pub enum AreaSource {
    /// Square meters, entered by hand
    Manual(f64),
    /// Two opposite floor corners
    Corners(DVec2, DVec2),
    /// Vertices of the named scene objects (typically the walls or floor),
    /// projected onto their dominant plane
    Objects(Vec<String>),
}

/// Where the ceiling height comes from
#[derive(Debug, Clone, PartialEq)]
pub enum HeightSource {
    /// Meters, entered by hand
    Manual(f64),
    /// Floor and ceiling elevations
    Elevations { floor_z: f64, ceiling_z: f64 },
    /// Vertical extent of a scene object
    Object(String),
}

/// Turns scene references into room geometry and lighting recommendations
pub struct RoomEstimator {
    catalog: RoomCatalog,
}

impl RoomEstimator {
    pub fn new(catalog: RoomCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RoomCatalog {
        &self.catalog
    }

    pub fn floor_area(&self, source: &AreaSource, scene: &Scene) -> Result<f64, AppError> {
        let area = match source {
            AreaSource::Manual(area) => *area,
            AreaSource::Corners(a, b) => floor_area(*a, *b),
            AreaSource::Objects(names) => {
                let points = collect_world_points(scene, names)?;
                projected_floor_area(&points)
            }
        };
        tracing::debug!(?source, area, "Estimated floor area");
        Ok(area)
    }

    pub fn ceiling_height(&self, source: &HeightSource, scene: &Scene) -> Result<f64, AppError> {
        let height = match source {
            HeightSource::Manual(height) => *height,
            HeightSource::Elevations { floor_z, ceiling_z } => room_height(*floor_z, *ceiling_z),
            HeightSource::Object(name) => {
                let object = scene.object(name)?;
                vertical_extent(&object.world_vertices()?)
            }
        };
        tracing::debug!(?source, height, "Estimated ceiling height");
        Ok(height)
    }

    /// Current geometry of the room.
    ///
    /// Recomputed on every call; a zero result is returned as is and only
    /// rejected by [`RoomEstimator::recommend`].
    pub fn estimate_geometry(
        &self,
        area: &AreaSource,
        height: &HeightSource,
        scene: &Scene,
    ) -> Result<RoomGeometry, AppError> {
        if let (
            AreaSource::Corners(corner_a, corner_b),
            HeightSource::Elevations { floor_z, ceiling_z },
        ) = (area, height)
        {
            let geometry = RoomGeometry::from_corners(*corner_a, *corner_b, *floor_z, *ceiling_z);
            tracing::debug!(?geometry, "Room geometry from reference positions");
            return Ok(geometry);
        }
        Ok(RoomGeometry::new(
            self.floor_area(area, scene)?,
            self.ceiling_height(height, scene)?,
        ))
    }

    /// Lumens and Kelvin for `room_type` in a room of the given geometry.
    pub fn recommend(
        &self,
        room_type: &str,
        geometry: &RoomGeometry,
    ) -> Result<RoomRecommendation, AppError> {
        let entry = self.catalog.lookup(room_type)?;
        let recommendation = RoomRecommendation::compute(entry, geometry).inspect_err(|e| {
            tracing::warn!(room = %room_type, error = %e, "Cannot estimate, manual entry required");
        })?;

        tracing::info!(
            room = %room_type,
            area = geometry.floor_area,
            height = geometry.ceiling_height,
            lumens = recommendation.lumens[1],
            kelvin = recommendation.kelvin[1],
            "Room recommendation"
        );
        Ok(recommendation)
    }
}

fn collect_world_points(scene: &Scene, names: &[String]) -> Result<Vec<DVec3>, AppError> {
    let mut points = Vec::new();
    for name in names {
        let object = scene.object(name)?;
        if !object.has_unit_scale() {
            tracing::warn!(object = %name, scale = ?object.scale, "Object has unapplied scale");
        }
        points.extend(object.world_vertices()?);
    }
    Ok(points)
}
