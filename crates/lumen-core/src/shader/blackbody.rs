//! Approximate display color of a blackbody at a given temperature.
//!
//! Tanner Helland's curve fit of the Planckian locus. Good enough to preview
//! what a Kelvin value will look like; the renderer's blackbody node does the
//! real conversion.

/// sRGB color (0..=1 per channel) of a blackbody at `kelvin`.
///
/// Temperatures are clamped to 1000..=40000 K.
#[allow(clippy::excessive_precision)]
pub fn blackbody_to_rgb(kelvin: f64) -> [f64; 3] {
    let temp = (kelvin / 100.0).clamp(10.0, 400.0);

    let (r, g, b) = if temp <= 66.0 {
        let g = 99.4708025861 * temp.ln() - 161.1195681661;
        let b = if temp <= 19.0 {
            0.0
        } else {
            138.5177312231 * (temp - 10.0).ln() - 305.0447927307
        };
        (255.0, g, b)
    } else {
        let r = 329.698727446 * (temp - 60.0).powf(-0.1332047592);
        let g = 288.1221695283 * (temp - 60.0).powf(-0.0755148492);
        (r, g, 255.0)
    };

    [r, g, b].map(|c| c.clamp(0.0, 255.0) / 255.0)
}

/// `#rrggbb` form of [`blackbody_to_rgb`]
pub fn blackbody_to_hex(kelvin: f64) -> String {
    let [r, g, b] = blackbody_to_rgb(kelvin).map(|c| (c * 255.0).round() as u8);
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warm_light_has_no_blue() {
        let [r, g, b] = blackbody_to_rgb(1000.0);
        assert_eq!(r, 1.0);
        assert!(g < 0.5);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn test_cool_light_is_blue_dominant() {
        let [r, _, b] = blackbody_to_rgb(10000.0);
        assert_eq!(b, 1.0);
        assert!(r < b);
    }

    #[test]
    fn test_warmer_is_redder() {
        let warm = blackbody_to_rgb(2700.0);
        let cool = blackbody_to_rgb(5000.0);
        assert!(warm[2] < cool[2]);
    }

    #[test]
    fn test_daylight_is_near_white() {
        let [r, g, b] = blackbody_to_rgb(6600.0);
        assert!(r > 0.95 && g > 0.95 && b > 0.95);
    }

    #[test]
    fn test_hex_format() {
        let hex = blackbody_to_hex(3000.0);
        assert_eq!(hex.len(), 7);
        assert!(hex.starts_with("#ff"));
        assert_eq!(blackbody_to_hex(1000.0).get(5..), Some("00"));
    }
}
