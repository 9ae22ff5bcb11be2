pub mod config;
pub mod scene;

pub use config::{AppConfig, Defaults, RoomConfig};
pub use scene::{Scene, SceneFormat, SceneObject};
