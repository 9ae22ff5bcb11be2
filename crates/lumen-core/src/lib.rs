//! lumen-core: emission strength and room lighting calculations
//!
//! Pure calculations for turning real-world lighting figures into emission
//! shader values, plus the two writers that put those values into a material.
//!
//! # Quick Start
//!
//! ```
//! use lumen_core::{lookup, LightingRequest, LuxTarget, RoomGeometry, RoomRecommendation};
//!
//! let office = lookup("office").unwrap();
//! let rec = RoomRecommendation::compute(office, &RoomGeometry::new(20.0, 2.7)).unwrap();
//! assert_eq!(rec.lumens(LuxTarget::Avg), 8000.0);
//!
//! let req = LightingRequest::new(rec.lumens(LuxTarget::Avg), 300.0, 0.5, 4);
//! let strength = req.compute().unwrap().strength_watts;
//! assert!((strength - 13.333).abs() < 1e-3);
//! ```
//!
//! # Components
//!
//! - [`room`]: the Room Lighting Table, lux and Kelvin per room type
//! - [`geometry`]: floor area and ceiling height from reference positions
//! - [`mesh`]: emitting surface area of the faces using a material
//! - [`lighting`]: recommended lumens and the emission strength formula
//! - [`shader`]: material graph, Kelvin applier and strength writer
//!
//! # Units
//!
//! Lumens (lm) for flux, lux (lm/m^2) for illuminance, lm/W for efficacy,
//! meters and square meters for geometry, Kelvin for color temperature.
//! Emission strength comes out in W/m^2.
//!
//! # Scale
//!
//! Mesh areas are computed from vertex positions as given. Objects must have
//! their scale applied (unit scale) for [`surface_area`] to return real
//! square meters.

pub mod error;
pub mod geometry;
pub mod lighting;
pub mod mesh;
pub mod room;
pub mod shader;


pub use error::{CalcError, Result};
pub use geometry::{
    floor_area, projected_floor_area, room_height, vertical_extent, RoomGeometry,
};
pub use lighting::{
    emission_strength, height_factor, recommended_lumens, EfficacyPreset, EmissionResult,
    LightingRequest, LuxTarget, RoomRecommendation,
};
pub use mesh::{polygon_area, surface_area, Face, Mesh};
pub use room::{lookup, RoomCatalog, RoomTypeEntry};
pub use shader::{
    apply_strength, apply_temperature, blackbody_to_hex, blackbody_to_rgb, emission_strength_of,
    socket, temperature_of, MaterialGraph, NodeKind, SocketValue, LAMP_KELVIN,
};

// Re-exported so callers can build points without naming glam themselves
pub use glam::{DVec2, DVec3};
