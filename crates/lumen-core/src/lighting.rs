//! Lighting Calculator: room lumens from lux, emission strength from lumens.
//!
//! The governing formula is
//!
//! ```text
//! strength = (lumens / efficacy) / (area * light_count)
//! ```
//!
//! Luminous flux divided by luminous efficacy gives the radiant power in
//! watts; spreading that power uniformly over every emitting surface gives the
//! power density the shader's emission strength expects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};
use crate::geometry::RoomGeometry;
use crate::room::RoomTypeEntry;

/// Meters to feet, as used by the ceiling-height correction
const FEET_PER_METER: f64 = 3.28;
/// Ceilings up to this height (in feet) need no extra light
const BASE_CEILING_FEET: f64 = 10.0;
/// Extra light per foot of ceiling above the base height
const EXTRA_PER_FOOT: f64 = 0.05;

/// Which end of a room's recommended range to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LuxTarget {
    Min,
    #[default]
    Avg,
    Max,
}

impl LuxTarget {
    pub const ALL: [LuxTarget; 3] = [LuxTarget::Min, LuxTarget::Avg, LuxTarget::Max];

    fn index(self) -> usize {
        match self {
            LuxTarget::Min => 0,
            LuxTarget::Avg => 1,
            LuxTarget::Max => 2,
        }
    }
}

impl fmt::Display for LuxTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LuxTarget::Min => "min",
            LuxTarget::Avg => "avg",
            LuxTarget::Max => "max",
        };
        f.pad(name)
    }
}

impl FromStr for LuxTarget {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" => Ok(LuxTarget::Min),
            "avg" | "average" => Ok(LuxTarget::Avg),
            "max" => Ok(LuxTarget::Max),
            other => Err(CalcError::InvalidInput(format!(
                "unknown target '{other}' (expected min, avg or max)"
            ))),
        }
    }
}

/// Total lumens needed to light `area` square meters at the chosen lux level.
///
/// Monotonic in `area`; zero area gives zero lumens.
pub fn recommended_lumens(entry: &RoomTypeEntry, area: f64, which: LuxTarget) -> f64 {
    entry.lux(which) * area
}

/// Lumen multiplier for tall rooms: 5% extra per foot of ceiling above 10 ft.
pub fn height_factor(ceiling_height_m: f64) -> f64 {
    1.0 + EXTRA_PER_FOOT * (ceiling_height_m * FEET_PER_METER - BASE_CEILING_FEET).max(0.0)
}

/// Inputs to one emission-strength calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingRequest {
    /// Total luminous flux across all lights (lm)
    pub lumens: f64,
    /// Luminous efficacy (lm/W)
    pub luminous_efficacy: f64,
    /// Emitting area of one light (m^2)
    pub area: f64,
    /// Number of identical lights sharing the flux
    pub light_count: u32,
}

impl LightingRequest {
    pub fn new(lumens: f64, luminous_efficacy: f64, area: f64, light_count: u32) -> Self {
        Self {
            lumens,
            luminous_efficacy,
            area,
            light_count,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.area.is_finite() || self.area <= 0.0 {
            return Err(CalcError::InvalidInput(format!(
                "area must be positive, got {}",
                self.area
            )));
        }
        if !self.luminous_efficacy.is_finite() || self.luminous_efficacy <= 0.0 {
            return Err(CalcError::InvalidInput(format!(
                "luminous efficacy must be positive, got {}",
                self.luminous_efficacy
            )));
        }
        if self.light_count == 0 {
            return Err(CalcError::InvalidInput(
                "light count must be at least 1".to_string(),
            ));
        }
        if !self.lumens.is_finite() || self.lumens < 0.0 {
            return Err(CalcError::InvalidInput(format!(
                "lumens must be zero or positive, got {}",
                self.lumens
            )));
        }
        Ok(())
    }

    pub fn compute(&self) -> Result<EmissionResult> {
        emission_strength(self).map(|strength_watts| EmissionResult { strength_watts })
    }
}

/// Emission strength (W/m^2) for a request.
///
/// Zero lumens is "light off" and yields 0, not an error.
pub fn emission_strength(req: &LightingRequest) -> Result<f64> {
    req.validate()?;
    let radiant_power = req.lumens / req.luminous_efficacy;
    let strength = radiant_power / (req.area * f64::from(req.light_count));
    if !strength.is_finite() {
        return Err(CalcError::InvalidInput(format!(
            "emission strength overflows for {} lm at {} lm/W over {} m^2",
            req.lumens, req.luminous_efficacy, req.area
        )));
    }
    Ok(strength)
}

/// The value written into a material's emission-strength input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionResult {
    pub strength_watts: f64,
}

/// Lumen and color-temperature recommendation for one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecommendation {
    pub room_type: String,
    pub floor_area: f64,
    pub ceiling_height: f64,
    pub height_factor: f64,
    /// Min / avg / max lumens, height correction included
    pub lumens: [f64; 3],
    /// Min / recommended / max Kelvin
    pub kelvin: [f64; 3],
}

impl RoomRecommendation {
    /// Recommend lumens and Kelvin for `entry` in a room of the given geometry.
    ///
    /// Fails with `DegenerateGeometry` for zero floor area or height.
    pub fn compute(entry: &RoomTypeEntry, geometry: &RoomGeometry) -> Result<Self> {
        geometry.validate()?;
        let factor = height_factor(geometry.ceiling_height);
        let lumens =
            LuxTarget::ALL.map(|t| recommended_lumens(entry, geometry.floor_area, t) * factor);

        Ok(Self {
            room_type: entry.id.clone(),
            floor_area: geometry.floor_area,
            ceiling_height: geometry.ceiling_height,
            height_factor: factor,
            lumens,
            kelvin: LuxTarget::ALL.map(|t| entry.kelvin(t)),
        })
    }

    pub fn lumens(&self, which: LuxTarget) -> f64 {
        self.lumens[which.index()]
    }

    pub fn kelvin(&self, which: LuxTarget) -> f64 {
        self.kelvin[which.index()]
    }
}

/// Named luminous-efficacy presets.
///
/// The lower presets are not real lamp efficacies; they trade physical
/// accuracy for a brighter render at default exposure.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EfficacyPreset {
    /// White LED / standard, 300 lm/W
    #[default]
    StandardLed,
    /// Warm incandescent, 250 lm/W
    WarmIncandescent,
    /// Theoretical maximum for 555 nm green, 683 lm/W
    IdealGreen,
    /// Higher exposure, natural look, 150 lm/W
    NaturalLook,
    /// Higher exposure, bright room, 100 lm/W
    BrightRoom,
    /// Higher exposure, very bright, 50 lm/W
    VeryBright,
    Custom(f64),
}

impl EfficacyPreset {
    pub const NAMED: [EfficacyPreset; 6] = [
        EfficacyPreset::StandardLed,
        EfficacyPreset::WarmIncandescent,
        EfficacyPreset::IdealGreen,
        EfficacyPreset::NaturalLook,
        EfficacyPreset::BrightRoom,
        EfficacyPreset::VeryBright,
    ];

    /// Luminous efficacy in lm/W
    pub fn efficacy(&self) -> f64 {
        match self {
            EfficacyPreset::StandardLed => 300.0,
            EfficacyPreset::WarmIncandescent => 250.0,
            EfficacyPreset::IdealGreen => 683.0,
            EfficacyPreset::NaturalLook => 150.0,
            EfficacyPreset::BrightRoom => 100.0,
            EfficacyPreset::VeryBright => 50.0,
            EfficacyPreset::Custom(value) => *value,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            EfficacyPreset::StandardLed => "led",
            EfficacyPreset::WarmIncandescent => "incandescent",
            EfficacyPreset::IdealGreen => "ideal-green",
            EfficacyPreset::NaturalLook => "natural",
            EfficacyPreset::BrightRoom => "bright",
            EfficacyPreset::VeryBright => "very-bright",
            EfficacyPreset::Custom(_) => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EfficacyPreset::StandardLed => "White LED / Standard",
            EfficacyPreset::WarmIncandescent => "Warm Incandescent",
            EfficacyPreset::IdealGreen => "Ideal Green",
            EfficacyPreset::NaturalLook => "Simulate Higher Exposure - Natural Look",
            EfficacyPreset::BrightRoom => "Simulate Higher Exposure - Bright Room",
            EfficacyPreset::VeryBright => "Simulate Higher Exposure - Very Bright",
            EfficacyPreset::Custom(_) => "Custom",
        }
    }
}

impl fmt::Display for EfficacyPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EfficacyPreset::Custom(value) => write!(f, "{value}"),
            named => f.write_str(named.key()),
        }
    }
}

impl FromStr for EfficacyPreset {
    type Err = CalcError;

    /// Accepts a preset key (`led`, `bright`, ...) or a number in lm/W.
    ///
    /// Numbers matching a named preset resolve to that preset.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(named) = Self::NAMED
            .iter()
            .find(|p| p.key().eq_ignore_ascii_case(s))
        {
            return Ok(*named);
        }

        let value: f64 = s.parse().map_err(|_| {
            CalcError::InvalidInput(format!("unknown efficacy preset '{s}'"))
        })?;
        if !value.is_finite() || value <= 0.0 {
            return Err(CalcError::InvalidInput(format!(
                "luminous efficacy must be positive, got {value}"
            )));
        }
        Ok(Self::NAMED
            .iter()
            .copied()
            .find(|p| p.efficacy() == value)
            .unwrap_or(EfficacyPreset::Custom(value)))
    }
}

impl Serialize for EfficacyPreset {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EfficacyPreset {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => n.to_string(),
            Raw::Text(s) => s,
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry() -> RoomTypeEntry {
        RoomTypeEntry::new(
            "test",
            "Test",
            [150.0, 300.0, 500.0],
            [2700.0, 3000.0, 3500.0],
        )
        .unwrap()
    }

    #[test]
    fn test_recommended_lumens_avg() {
        assert_eq!(recommended_lumens(&entry(), 20.0, LuxTarget::Avg), 6000.0);
    }

    #[test]
    fn test_recommended_lumens_zero_area() {
        assert_eq!(recommended_lumens(&entry(), 0.0, LuxTarget::Max), 0.0);
    }

    #[test]
    fn test_emission_strength_single_light() {
        let req = LightingRequest::new(6000.0, 80.0, 20.0, 1);
        assert_eq!(emission_strength(&req).unwrap(), 3.75);
    }

    #[test]
    fn test_emission_strength_two_lights() {
        let req = LightingRequest::new(6000.0, 80.0, 20.0, 2);
        assert_eq!(emission_strength(&req).unwrap(), 1.875);
    }

    #[test]
    fn test_emission_strength_zero_lumens_is_off() {
        let req = LightingRequest::new(0.0, 80.0, 20.0, 1);
        assert_eq!(emission_strength(&req).unwrap(), 0.0);
    }

    #[test]
    fn test_emission_strength_rejects_bad_inputs() {
        let cases = [
            LightingRequest::new(6000.0, 80.0, 0.0, 1),
            LightingRequest::new(6000.0, 80.0, -1.0, 1),
            LightingRequest::new(6000.0, 0.0, 20.0, 1),
            LightingRequest::new(6000.0, 80.0, 20.0, 0),
            LightingRequest::new(-5.0, 80.0, 20.0, 1),
            LightingRequest::new(f64::NAN, 80.0, 20.0, 1),
        ];
        for req in cases {
            assert!(
                matches!(emission_strength(&req), Err(CalcError::InvalidInput(_))),
                "expected InvalidInput for {req:?}"
            );
        }
    }

    #[test]
    fn test_emission_strength_rejects_overflow() {
        let req = LightingRequest::new(f64::MAX, 1e-300, 1e-300, 1);
        assert!(req.validate().is_ok());
        assert!(matches!(
            emission_strength(&req),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(req.compute().is_err());
    }

    #[test]
    fn test_request_compute_wraps_result() {
        let result = LightingRequest::new(850.0, 300.0, 0.02, 1).compute().unwrap();
        assert!((result.strength_watts - 141.666_666_666).abs() < 1e-6);
    }

    #[test]
    fn test_height_factor() {
        assert_eq!(height_factor(2.7), 1.0);
        assert_eq!(height_factor(0.0), 1.0);
        // 5 m is 16.4 ft, 6.4 ft above the base
        assert!((height_factor(5.0) - 1.32).abs() < 1e-9);
    }

    #[test]
    fn test_room_recommendation() {
        let rec = RoomRecommendation::compute(&entry(), &RoomGeometry::new(20.0, 2.5)).unwrap();
        assert_eq!(rec.lumens, [3000.0, 6000.0, 10000.0]);
        assert_eq!(rec.kelvin(LuxTarget::Avg), 3000.0);
        assert_eq!(rec.lumens(LuxTarget::Max), 10000.0);
        assert_eq!(rec.height_factor, 1.0);
    }

    #[test]
    fn test_room_recommendation_tall_ceiling() {
        let rec = RoomRecommendation::compute(&entry(), &RoomGeometry::new(10.0, 5.0)).unwrap();
        assert!((rec.lumens(LuxTarget::Avg) - 3000.0 * 1.32).abs() < 1e-6);
    }

    #[test]
    fn test_room_recommendation_degenerate() {
        let result = RoomRecommendation::compute(&entry(), &RoomGeometry::new(0.0, 2.5));
        assert!(matches!(result, Err(CalcError::DegenerateGeometry(_))));
    }

    #[test]
    fn test_lux_target_parse() {
        assert_eq!("MIN".parse::<LuxTarget>().unwrap(), LuxTarget::Min);
        assert_eq!("average".parse::<LuxTarget>().unwrap(), LuxTarget::Avg);
        assert!("middle".parse::<LuxTarget>().is_err());
        assert_eq!(LuxTarget::Max.to_string(), "max");
    }

    #[test]
    fn test_efficacy_preset_parse() {
        assert_eq!(
            "led".parse::<EfficacyPreset>().unwrap(),
            EfficacyPreset::StandardLed
        );
        assert_eq!(
            "683".parse::<EfficacyPreset>().unwrap(),
            EfficacyPreset::IdealGreen
        );
        assert_eq!(
            "80".parse::<EfficacyPreset>().unwrap(),
            EfficacyPreset::Custom(80.0)
        );
        assert!("0".parse::<EfficacyPreset>().is_err());
        assert!("plasma".parse::<EfficacyPreset>().is_err());
    }

    #[test]
    fn test_efficacy_preset_serde() {
        let preset: EfficacyPreset = serde_json::from_str("\"bright\"").unwrap();
        assert_eq!(preset.efficacy(), 100.0);

        let preset: EfficacyPreset = serde_json::from_str("95").unwrap();
        assert_eq!(preset, EfficacyPreset::Custom(95.0));

        assert_eq!(
            serde_json::to_string(&EfficacyPreset::WarmIncandescent).unwrap(),
            "\"incandescent\""
        );
    }
}
