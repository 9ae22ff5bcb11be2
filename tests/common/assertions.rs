//! Assertion helpers for tests.

use lumen_core::{emission_strength_of, temperature_of, MaterialGraph};

/// Assert two floats agree to a relative tolerance
pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "Expected {expected}, got {actual}"
    );
}

/// Assert a material's surface shader emits with the given strength and temperature
pub fn assert_emits(material: &MaterialGraph, strength: f64, kelvin: f64) {
    let actual_strength = emission_strength_of(material)
        .unwrap_or_else(|| panic!("Material '{}' has no emission strength", material.name));
    assert_close(actual_strength, strength);

    let actual_kelvin = temperature_of(material)
        .unwrap_or_else(|| panic!("Material '{}' has no blackbody temperature", material.name));
    assert_close(actual_kelvin, kelvin);
}
