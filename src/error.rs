use lumen_core::CalcError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Calculation error: {0}")]
    Calc(#[from] CalcError),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Object '{0}' has no mesh")]
    NotAMesh(String),

    #[error("Object '{object}' has no material in slot {slot}")]
    MissingMaterialSlot { object: String, slot: usize },

    #[error("Material not found: {0}")]
    MaterialNotFound(String),

    #[error("Unsupported scene format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// True when the failure means "estimate impossible, enter the value by hand"
    pub fn needs_manual_entry(&self) -> bool {
        matches!(self, AppError::Calc(CalcError::DegenerateGeometry(_)))
    }
}
