pub mod emission;
pub mod room_estimator;
pub mod workflow;

pub use emission::{compute_strength, material_area, resolve_area, EmitterArea};
pub use room_estimator::{AreaSource, HeightSource, RoomEstimator};
pub use workflow::{apply_lighting, ApplyOptions, ApplyReport};
