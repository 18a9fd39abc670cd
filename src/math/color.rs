//! Linear RGB colors
//!
//! Hex colors are authored in sRGB and stored linear; the fragment
//! shaders encode back to sRGB on output.

use serde::{Deserialize, Serialize};

/// Linear RGB color, components nominally in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "[f32; 3]")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a 0xRRGGBB sRGB value
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_hex)
    }

    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    pub fn scale(&self, s: f32) -> Self {
        Self {
            r: self.r * s,
            g: self.g * s,
            b: self.b * s,
        }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Color> for [f32; 3] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

/// Config representation: either a hex string or linear floats
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Linear([f32; 3]),
}

impl TryFrom<ColorRepr> for Color {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(s) => Color::parse_hex(&s).ok_or_else(|| format!("invalid hex color '{}'", s)),
            ColorRepr::Linear([r, g, b]) => Ok(Color::new(r, g, b)),
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_extremes() {
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
        assert_eq!(Color::from_hex(0x000000), Color::BLACK);
    }

    #[test]
    fn test_from_hex_is_linear() {
        // sRGB mid grey is ~0.214 in linear space
        let grey = Color::from_hex(0x808080);
        assert!((grey.r - 0.2158).abs() < 0.001);
        assert_eq!(grey.r, grey.g);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse_hex("#ff0000"), Some(Color::new(1.0, 0.0, 0.0)));
        assert_eq!(Color::parse_hex("0000ff"), Some(Color::new(0.0, 0.0, 1.0)));
        assert_eq!(Color::parse_hex("#fff"), None);
        assert_eq!(Color::parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_lerp_and_scale() {
        let gold = Color::new(1.0, 0.8, 0.0);
        let mid = gold.lerp(&Color::WHITE, 0.5);
        assert!((mid.g - 0.9).abs() < 0.0001);
        assert!((mid.b - 0.5).abs() < 0.0001);

        let dark = gold.scale(0.7);
        assert!((dark.r - 0.7).abs() < 0.0001);
    }

    #[test]
    fn test_deserialize_both_forms() {
        let hex: Color = serde_yaml::from_str("\"#ffffff\"").unwrap();
        assert_eq!(hex, Color::WHITE);

        let linear: Color = serde_yaml::from_str("[1.0, 0.3, 0.2]").unwrap();
        assert_eq!(linear, Color::new(1.0, 0.3, 0.2));

        assert!(serde_yaml::from_str::<Color>("\"#nothex\"").is_err());
    }
}
