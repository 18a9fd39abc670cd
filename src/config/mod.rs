//! Scene configuration
//!
//! Every generator and the animation driver read an immutable
//! [`SceneConfig`]. Defaults reproduce the stock scene; a YAML document
//! may override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::Easing;
use crate::math::Color;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Parse(String),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Complete scene configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub tree: TreeConfig,
    pub trunk: TrunkConfig,
    pub text: TextConfig,
    pub animation: AnimationConfig,
    pub backdrop: BackdropConfig,
    pub clock: ClockConfig,
    /// Seed for all procedural generation; random when absent
    pub seed: Option<u64>,
    /// One of error, warn, info, debug, trace
    pub log_level: Option<String>,
}

/// Foliage cone and its palette
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub height: f32,
    pub radius: f32,
    pub particle_count: usize,
    pub auto_rotate_speed: f32,
    pub leaf_color: Color,
    pub leaf_color_bright: Color,
    pub ornament_colors: Vec<Color>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            height: 80.0,
            radius: 30.0,
            particle_count: 15000,
            auto_rotate_speed: 0.0,
            leaf_color: Color::from_hex(0x2d5a27),
            leaf_color_bright: Color::from_hex(0x4ca64c),
            ornament_colors: vec![
                Color::from_hex(0xff0000), // red
                Color::from_hex(0xffd700), // gold
                Color::from_hex(0xffffff), // white
                Color::from_hex(0x0000ff), // blue
            ],
        }
    }
}

impl TreeConfig {
    /// Foliage cone radius at a height ratio in [0, 1]
    pub fn radius_at(&self, height_ratio: f32) -> f32 {
        self.radius * (1.0 - height_ratio)
    }
}

/// Trunk, roots and internal branch lines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrunkConfig {
    pub height: f32,
    pub radius: f32,
    pub line_count: usize,
    pub segments: usize,
    /// Fraction of the tree height the internal branches reach at most
    pub branch_height_ratio: f32,
    pub root_color: Color,
    pub trunk_color: Color,
    pub branch_color: Color,
}

impl Default for TrunkConfig {
    fn default() -> Self {
        Self {
            height: 25.0,
            radius: 3.0,
            line_count: 300,
            segments: 40,
            branch_height_ratio: 0.8,
            root_color: Color::from_hex(0x2a1505),
            trunk_color: Color::from_hex(0x8b4513),
            branch_color: Color::from_hex(0x5c4033),
        }
    }
}

/// Glyph cloud text and its rasterization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub text: String,
    pub font: String,
    pub fallback_font: String,
    pub color: Color,
    /// World units per bitmap pixel
    pub size: f32,
    /// World-space vertical offset of the text block
    pub y: f32,
    pub brightness: f32,
    pub saturation: f32,
    pub twinkle_speed: f32,
    pub glow_intensity: f32,
    pub font_px: f32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub sample_stride: usize,
    pub threshold: u8,
    /// Half-extent of the cube scattered start positions are drawn from
    pub scatter_extent: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            text: "MERRY CHRISTMAS\n Yuki 宝宝".to_string(),
            font: "MengquRuantang, sans-serif".to_string(),
            fallback_font: "sans-serif".to_string(),
            color: Color::new(1.0, 0.3, 0.2),
            size: 0.15,
            y: 40.0,
            brightness: 1.0,
            saturation: 2.0,
            twinkle_speed: 5.0,
            glow_intensity: 0.3,
            font_px: 80.0,
            canvas_width: 1000,
            canvas_height: 300,
            sample_stride: 2,
            threshold: 128,
            scatter_extent: 100.0,
        }
    }
}

impl TextConfig {
    /// CSS font shorthand for a family at the configured pixel size
    pub fn font_descriptor(&self, family: &str) -> String {
        format!("bold {}px {}", self.font_px, family)
    }
}

/// Timing for the text convergence and the perpetual motions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Seconds after scene start before the text starts converging
    pub text_delay: f32,
    /// Seconds the convergence takes
    pub text_duration: f32,
    pub text_easing: Easing,
    /// Snow fall per frame tick
    pub snow_fall: f32,
    pub snow_sway: f32,
    /// Radians per second
    pub spiral_rotation_speed: f32,
    pub cloud_rotation_speed: f32,
    pub sky_rotation_speed: f32,
    pub star_pulse_speed: f32,
    pub star_pulse_amplitude: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            text_delay: 1.5,
            text_duration: 3.0,
            text_easing: Easing::EaseOutCubic,
            snow_fall: 0.05,
            snow_sway: 0.005,
            spiral_rotation_speed: 0.05,
            cloud_rotation_speed: 0.02,
            sky_rotation_speed: 0.01,
            star_pulse_speed: 3.0,
            star_pulse_amplitude: 0.05,
        }
    }
}

/// Snow, galaxies and sky sphere
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub snow_count: usize,
    /// Snow occupies the cube [-extent, extent]^3
    pub snow_extent: f32,
    pub spiral_count: usize,
    pub spiral_radius: f32,
    pub spiral_arms: usize,
    pub spiral_inner_color: Color,
    pub spiral_outer_color: Color,
    pub cloud_count: usize,
    pub cloud_radius: f32,
    pub cloud_inner_color: Color,
    pub cloud_outer_color: Color,
    pub sky_radius: f32,
    pub sky_segments: usize,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            snow_count: 5000,
            snow_extent: 100.0,
            spiral_count: 20000,
            spiral_radius: 150.0,
            spiral_arms: 5,
            spiral_inner_color: Color::from_hex(0xe0f7fa),
            spiral_outer_color: Color::from_hex(0x0288d1),
            cloud_count: 1_000_000,
            cloud_radius: 350.0,
            cloud_inner_color: Color::from_hex(0xff6030),
            cloud_outer_color: Color::from_hex(0x1b3984),
            sky_radius: 400.0,
            sky_segments: 64,
        }
    }
}

/// Wall clock readout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub element_id: String,
    pub time_zone: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            element_id: "clock".to_string(),
            time_zone: "America/New_York".to_string(),
        }
    }
}

impl SceneConfig {
    /// Parse from YAML and validate
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_yaml::from_str(yaml)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason: format!("must be positive, got {}", value) })
            }
        }

        positive("tree.height", self.tree.height)?;
        positive("tree.radius", self.tree.radius)?;
        positive("trunk.height", self.trunk.height)?;
        positive("text.font_px", self.text.font_px)?;
        positive("animation.text_duration", self.animation.text_duration)?;

        if self.tree.particle_count == 0 {
            return Err(ConfigError::Invalid { field: "tree.particle_count", reason: "must be at least 1".into() });
        }
        if self.tree.ornament_colors.is_empty() {
            return Err(ConfigError::Invalid { field: "tree.ornament_colors", reason: "palette is empty".into() });
        }
        if self.trunk.segments == 0 {
            return Err(ConfigError::Invalid { field: "trunk.segments", reason: "must be at least 1".into() });
        }
        if self.text.sample_stride == 0 {
            return Err(ConfigError::Invalid { field: "text.sample_stride", reason: "must be at least 1".into() });
        }
        if self.text.canvas_width == 0 || self.text.canvas_height == 0 {
            return Err(ConfigError::Invalid { field: "text.canvas_width", reason: "canvas must not be empty".into() });
        }
        if self.clock.time_zone.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "clock.time_zone", reason: "must not be empty".into() });
        }
        if self.clock.element_id.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "clock.element_id", reason: "must not be empty".into() });
        }
        if self.backdrop.sky_segments < 3 {
            return Err(ConfigError::Invalid { field: "backdrop.sky_segments", reason: "need at least 3".into() });
        }

        Ok(())
    }

    /// Requested log level, if one was configured and recognised
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        self.log_level.as_deref().and_then(|s| s.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_scene() {
        let config = SceneConfig::default();
        assert_eq!(config.tree.height, 80.0);
        assert_eq!(config.tree.radius, 30.0);
        assert_eq!(config.tree.particle_count, 15000);
        assert_eq!(config.tree.ornament_colors.len(), 4);
        assert_eq!(config.trunk.line_count, 300);
        assert_eq!(config.trunk.segments, 40);
        assert_eq!(config.text.canvas_width, 1000);
        assert_eq!(config.text.canvas_height, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let yaml = r##"
tree:
  height: 60
  particle_count: 100
text:
  text: "HELLO"
  color: "#ffffff"
seed: 7
"##;
        let config = SceneConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.tree.height, 60.0);
        assert_eq!(config.tree.radius, 30.0);
        assert_eq!(config.tree.particle_count, 100);
        assert_eq!(config.text.text, "HELLO");
        assert_eq!(config.text.color, Color::WHITE);
        assert_eq!(config.text.y, 40.0);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_easing_override() {
        let config = SceneConfig::from_yaml("animation:\n  text_easing: linear\n").unwrap();
        assert_eq!(config.animation.text_easing, Easing::Linear);
        assert_eq!(SceneConfig::default().animation.text_easing, Easing::EaseOutCubic);
    }

    #[test]
    fn test_clock_override() {
        let config = SceneConfig::from_yaml("clock:\n  time_zone: Asia/Tokyo\n").unwrap();
        assert_eq!(config.clock.time_zone, "Asia/Tokyo");
        assert_eq!(config.clock.element_id, "clock");
        assert_eq!(SceneConfig::default().clock.time_zone, "America/New_York");

        assert!(SceneConfig::from_yaml("clock:\n  time_zone: \"\"\n").is_err());
    }

    #[test]
    fn test_parse_error() {
        let err = SceneConfig::from_yaml("tree: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let err = SceneConfig::from_yaml("tree:\n  height: -5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "tree.height", .. }));

        let err = SceneConfig::from_yaml("tree:\n  ornament_colors: []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "tree.ornament_colors", .. }));

        let err = SceneConfig::from_yaml("text:\n  sample_stride: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "text.sample_stride", .. }));
    }

    #[test]
    fn test_radius_at() {
        let tree = TreeConfig::default();
        assert_eq!(tree.radius_at(0.0), 30.0);
        assert_eq!(tree.radius_at(1.0), 0.0);
        assert!((tree.radius_at(0.5) - 15.0).abs() < 0.0001);
    }

    #[test]
    fn test_font_descriptor() {
        let text = TextConfig::default();
        assert_eq!(text.font_descriptor("serif"), "bold 80px serif");
    }

    #[test]
    fn test_log_level() {
        let mut config = SceneConfig::default();
        assert_eq!(config.log_level(), None);
        config.log_level = Some("debug".to_string());
        assert_eq!(config.log_level(), Some(log::LevelFilter::Debug));
    }
}
