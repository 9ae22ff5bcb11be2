//! Surface Area Accumulator: emitting area of the faces that use a material.
//!
//! Areas are taken from the vertex positions exactly as given. The mesh is
//! expected to have its object scale applied (unit scale); with an unapplied
//! scale the result is only correct up to that scale factor. This is a
//! precondition, not something corrected here.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

/// One polygon: a ring of vertex indices and the material slot it uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub vertices: Vec<u32>,
    #[serde(default)]
    pub material: usize,
}

impl Face {
    pub fn new(vertices: Vec<u32>, material: usize) -> Self {
        Self {
            vertices,
            material,
        }
    }
}

/// Polygon mesh as plain vertex and face lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<DVec3>,
    #[serde(default)]
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<DVec3>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Check that every face index refers to an existing vertex.
    pub fn validate(&self) -> Result<()> {
        let count = self.vertices.len();
        for (face_index, face) in self.faces.iter().enumerate() {
            if let Some(&bad) = face.vertices.iter().find(|&&i| i as usize >= count) {
                return Err(CalcError::InvalidMesh(format!(
                    "face {face_index} references vertex {bad} but mesh has {count} vertices"
                )));
            }
        }
        Ok(())
    }

    /// Same mesh with every vertex moved by `offset`.
    pub fn translated(&self, offset: DVec3) -> Self {
        Self {
            vertices: self.vertices.iter().map(|v| *v + offset).collect(),
            faces: self.faces.clone(),
        }
    }

    fn face_area(&self, face: &Face) -> f64 {
        let ring: Vec<DVec3> = face
            .vertices
            .iter()
            .map(|&i| self.vertices[i as usize])
            .collect();
        polygon_area(&ring)
    }
}

/// Planar area of a closed polygon ring in 3D.
///
/// Uses Newell's method, so the ring may sit in any plane and may be concave.
/// Rings with fewer than three vertices have no area.
pub fn polygon_area(ring: &[DVec3]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let normal: DVec3 = ring
        .iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.cross(*b))
        .sum();
    normal.length() * 0.5
}

/// Total area of the faces of `mesh` assigned to `material_slot`.
///
/// Returns exactly 0 when no face uses the slot.
pub fn surface_area(mesh: &Mesh, material_slot: usize) -> Result<f64> {
    mesh.validate()?;
    Ok(mesh
        .faces
        .iter()
        .filter(|f| f.material == material_slot)
        .map(|f| mesh.face_area(f))
        .sum())
}
