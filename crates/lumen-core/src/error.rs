//! Error type shared by every calculation in the crate.

use thiserror::Error;

/// Errors produced by the lighting calculations and graph writers.
///
/// Every variant is a deterministic function of the inputs: retrying with
/// the same arguments fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Room-type identifier is not present in the catalog
    #[error("Unknown room type: {0}")]
    UnknownRoomType(String),

    /// Non-positive or non-finite input to a calculation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Zero floor area or zero height; the caller must fall back to manual entry
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Material graph lacks the emission wiring the writer expects
    #[error("Material '{0}' has no emission node")]
    MissingEmissionNode(String),

    /// Catalog entry violates the lux or Kelvin ordering
    #[error("Invalid room entry '{id}': {reason}")]
    InvalidRoomEntry { id: String, reason: String },

    /// Mesh face references a vertex that does not exist
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),
}

pub type Result<T> = std::result::Result<T, CalcError>;
