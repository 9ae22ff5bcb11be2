//! Geometry Estimator: floor area and ceiling height from reference positions.
//!
//! All functions are pure and order-independent in their arguments. Degenerate
//! input (coincident corners, flat point clouds) yields zero rather than an
//! error; [`RoomGeometry::validate`] is where the caller decides whether zero
//! is acceptable.

mod projection;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

pub use projection::projected_floor_area;

/// Floor area spanned by two opposite corners of an axis-aligned floor plan.
pub fn floor_area(corner_a: DVec2, corner_b: DVec2) -> f64 {
    ((corner_a.x - corner_b.x) * (corner_a.y - corner_b.y)).abs()
}

/// Distance between a floor and a ceiling elevation.
pub fn room_height(floor_z: f64, ceiling_z: f64) -> f64 {
    (ceiling_z - floor_z).abs()
}

/// Z extent of a point cloud, e.g. the world-space vertices of a wall.
///
/// Returns 0 for an empty cloud.
pub fn vertical_extent(points: &[DVec3]) -> f64 {
    let mut iter = points.iter().map(|p| p.z);
    let Some(first) = iter.next() else {
        return 0.0;
    };
    let (min, max) = iter.fold((first, first), |(lo, hi), z| (lo.min(z), hi.max(z)));
    max - min
}

/// Floor area and ceiling height of a room.
///
/// Recomputed on demand from whatever the reference positions are now; never
/// cached across calculations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoomGeometry {
    /// Square meters
    pub floor_area: f64,
    /// Meters
    pub ceiling_height: f64,
}

impl RoomGeometry {
    pub fn new(floor_area: f64, ceiling_height: f64) -> Self {
        Self {
            floor_area,
            ceiling_height,
        }
    }

    /// Derive geometry from two floor corners and the floor / ceiling elevations.
    pub fn from_corners(corner_a: DVec2, corner_b: DVec2, floor_z: f64, ceiling_z: f64) -> Self {
        Self {
            floor_area: floor_area(corner_a, corner_b),
            ceiling_height: room_height(floor_z, ceiling_z),
        }
    }

    /// Reject zero (or non-finite) area or height.
    ///
    /// A failure here means "cannot estimate, require manual entry"; it is not
    /// a hard error for the rest of the workflow.
    pub fn validate(&self) -> Result<()> {
        if !self.floor_area.is_finite() || self.floor_area <= 0.0 {
            return Err(CalcError::DegenerateGeometry(format!(
                "floor area is {}",
                self.floor_area
            )));
        }
        if !self.ceiling_height.is_finite() || self.ceiling_height <= 0.0 {
            return Err(CalcError::DegenerateGeometry(format!(
                "ceiling height is {}",
                self.ceiling_height
            )));
        }
        Ok(())
    }
}
