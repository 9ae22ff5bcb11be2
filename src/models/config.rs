use crate::assets::AssetLoader;
use lumen_core::{CalcError, EfficacyPreset, LuxTarget, RoomCatalog, RoomTypeEntry};
use serde::Deserialize;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Values used when a command does not supply its own
    #[serde(default)]
    pub defaults: Defaults,

    /// Extra room types (or overrides of built-in ones)
    #[serde(default)]
    pub rooms: Vec<RoomConfig>,
}

/// Fallback inputs for the calculator
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Defaults {
    #[serde(default = "default_lumens")]
    pub lumens: f64,

    #[serde(default)]
    pub efficacy: EfficacyPreset,

    /// Emitting area per light (m^2)
    #[serde(default = "default_area")]
    pub area: f64,

    #[serde(default = "default_lights")]
    pub lights: u32,

    #[serde(default = "default_room_type")]
    pub room_type: String,

    /// Floor area for manual room entry (m^2)
    #[serde(default = "default_room_area")]
    pub room_area: f64,

    /// Ceiling height for manual room entry (m)
    #[serde(default = "default_room_height")]
    pub room_height: f64,

    #[serde(default)]
    pub target: LuxTarget,
}

fn default_lumens() -> f64 {
    850.0
}

fn default_area() -> f64 {
    0.02
}

fn default_lights() -> u32 {
    1
}

fn default_room_type() -> String {
    "living_gen".to_string()
}

fn default_room_area() -> f64 {
    20.0
}

fn default_room_height() -> f64 {
    2.7
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            lumens: default_lumens(),
            efficacy: EfficacyPreset::default(),
            area: default_area(),
            lights: default_lights(),
            room_type: default_room_type(),
            room_area: default_room_area(),
            room_height: default_room_height(),
            target: LuxTarget::default(),
        }
    }
}

/// A room type as written in config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct RoomConfig {
    pub id: String,

    /// Display name; defaults to the id
    #[serde(default)]
    pub label: Option<String>,

    /// [min, avg, max] lux
    pub lux: [f64; 3],

    /// [min, recommended, max] Kelvin
    pub kelvin: [f64; 3],
}

impl RoomConfig {
    pub fn to_entry(&self) -> Result<RoomTypeEntry, CalcError> {
        let label = self.label.clone().unwrap_or_else(|| self.id.clone());
        RoomTypeEntry::new(self.id.clone(), label, self.lux, self.kelvin)
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        rooms = config.rooms.len(),
                        room_type = %config.defaults.room_type,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Built-in room catalog extended with the configured rooms.
    pub fn catalog(&self) -> Result<RoomCatalog, CalcError> {
        let extra = self
            .rooms
            .iter()
            .map(RoomConfig::to_entry)
            .collect::<Result<Vec<_>, _>>()?;
        RoomCatalog::builtin().with_overrides(extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(config.rooms.is_empty());
        assert_eq!(config.defaults.lumens, 850.0);
        assert_eq!(config.defaults.efficacy, EfficacyPreset::StandardLed);
        assert_eq!(config.defaults.area, 0.02);
        assert_eq!(config.defaults.lights, 1);
        assert_eq!(config.defaults.room_type, "living_gen");
        assert_eq!(config.defaults.room_area, 20.0);
        assert_eq!(config.defaults.room_height, 2.7);
        assert_eq!(config.defaults.target, LuxTarget::Avg);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
defaults:
  lumens: 1200
  efficacy: 90
  lights: 4
  target: max
rooms:
  - id: sauna
    lux: [50, 100, 150]
    kelvin: [2000, 2200, 2700]
"#;

        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.defaults.lumens, 1200.0);
        assert_eq!(config.defaults.efficacy, EfficacyPreset::Custom(90.0));
        assert_eq!(config.defaults.lights, 4);
        assert_eq!(config.defaults.target, LuxTarget::Max);
        // unspecified fields keep their defaults
        assert_eq!(config.defaults.room_height, 2.7);

        let catalog = config.catalog().unwrap();
        let sauna = catalog.lookup("sauna").unwrap();
        assert_eq!(sauna.label, "sauna");
        assert_eq!(sauna.recommended_kelvin, 2200.0);
        assert!(catalog.contains("office"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.defaults, Defaults::default());
        assert_eq!(config.catalog().unwrap().len(), 16);
    }

    #[test]
    fn test_invalid_room_rejected_by_catalog() {
        let yaml = r#"
rooms:
  - id: broken
    lux: [500, 100, 50]
    kelvin: [3000, 3000, 3000]
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            config.catalog(),
            Err(CalcError::InvalidRoomEntry { .. })
        ));
    }

    #[test]
    fn test_embedded_config_parses() {
        let config = AppConfig::load_from_assets(&AssetLoader::new(None, None));
        assert_eq!(config.defaults.room_type, "living_gen");
        let catalog = config.catalog().unwrap();
        assert!(catalog.contains("garage"));
        assert_eq!(catalog.len(), 17);
    }
}
