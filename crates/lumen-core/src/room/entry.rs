use crate::error::{CalcError, Result};
use crate::lighting::LuxTarget;

/// Lowest color temperature a catalog entry may recommend.
pub const MIN_ROOM_KELVIN: f64 = 1000.0;
/// Highest color temperature a catalog entry may recommend.
pub const MAX_ROOM_KELVIN: f64 = 10000.0;

/// Lighting recommendation for one room type.
///
/// Lux values follow EN 12464-1 style guidance for residential spaces. The
/// Kelvin range brackets the recommended temperature; `recommended_kelvin` is
/// what a single "apply" uses.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomTypeEntry {
    pub id: String,
    /// Human-readable name, e.g. "Kitchen - General"
    pub label: String,
    pub min_lux: f64,
    pub avg_lux: f64,
    pub max_lux: f64,
    pub recommended_kelvin: f64,
    pub min_kelvin: f64,
    pub max_kelvin: f64,
}

impl RoomTypeEntry {
    /// Build an entry from lux and Kelvin triples, checking the ordering invariants.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        lux: [f64; 3],
        kelvin: [f64; 3],
    ) -> Result<Self> {
        let entry = Self {
            id: id.into(),
            label: label.into(),
            min_lux: lux[0],
            avg_lux: lux[1],
            max_lux: lux[2],
            min_kelvin: kelvin[0],
            recommended_kelvin: kelvin[1],
            max_kelvin: kelvin[2],
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Check `0 < min <= avg <= max` for lux and the 1000..=10000 K window.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| CalcError::InvalidRoomEntry {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("empty id"));
        }

        let lux = [self.min_lux, self.avg_lux, self.max_lux];
        if lux.iter().any(|v| !v.is_finite()) {
            return Err(invalid("lux values must be finite"));
        }
        if self.min_lux <= 0.0 {
            return Err(invalid("min lux must be positive"));
        }
        if self.min_lux > self.avg_lux || self.avg_lux > self.max_lux {
            return Err(invalid("lux values must satisfy min <= avg <= max"));
        }

        let kelvin = [self.min_kelvin, self.recommended_kelvin, self.max_kelvin];
        if kelvin
            .iter()
            .any(|k| !(MIN_ROOM_KELVIN..=MAX_ROOM_KELVIN).contains(k))
        {
            return Err(invalid("Kelvin values must lie within 1000..=10000"));
        }
        if self.min_kelvin > self.recommended_kelvin || self.recommended_kelvin > self.max_kelvin
        {
            return Err(invalid("Kelvin values must satisfy min <= recommended <= max"));
        }

        Ok(())
    }

    /// Illuminance for the chosen target
    pub fn lux(&self, which: LuxTarget) -> f64 {
        match which {
            LuxTarget::Min => self.min_lux,
            LuxTarget::Avg => self.avg_lux,
            LuxTarget::Max => self.max_lux,
        }
    }

    /// Color temperature for the chosen target
    pub fn kelvin(&self, which: LuxTarget) -> f64 {
        match which {
            LuxTarget::Min => self.min_kelvin,
            LuxTarget::Avg => self.recommended_kelvin,
            LuxTarget::Max => self.max_kelvin,
        }
    }
}
