//! Scene configuration.

use crate::mesh::{ParticleParams, RibbonParams};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum number of user float controls forwarded to the shaders.
pub const MAX_CONTROLS: usize = 12;

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Resolution must be non-zero, got {width}x{height}")]
    Resolution { width: u32, height: u32 },
    #[error("Ribbon slices must be non-zero, got {slice_x}x{slice_y}")]
    RibbonSlices { slice_x: u32, slice_y: u32 },
    #[error("At most {max} controls are supported, got {0}", max = MAX_CONTROLS)]
    TooManyControls(usize),
    #[error("Frame rate must be non-zero")]
    Fps,
}

/// Full scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,
    pub ribbons: RibbonParams,
    pub particles: ParticleParams,
    /// Clear color of the first pass texture, as `[r, g, b]` or `"#rrggbb"`.
    #[serde(deserialize_with = "deserialize_color")]
    pub clear_color: [f32; 3],
    /// Run the one-time first pass target check.
    pub development: bool,
    /// User float uniforms, appended after time and resolution.
    pub controls: Vec<f32>,
    /// Frames per second used when exporting sequences.
    pub fps: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            ribbons: RibbonParams::default(),
            particles: ParticleParams::default(),
            clear_color: [0.0, 0.0, 0.0],
            development: cfg!(debug_assertions),
            controls: Vec::new(),
            fps: 60,
        }
    }
}

impl SceneConfig {
    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Load a configuration file, falling back to defaults when it does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No scene config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Check the values a renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Resolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.ribbons.slice_x == 0 || self.ribbons.slice_y == 0 {
            return Err(ConfigError::RibbonSlices {
                slice_x: self.ribbons.slice_x,
                slice_y: self.ribbons.slice_y,
            });
        }
        if self.controls.len() > MAX_CONTROLS {
            return Err(ConfigError::TooManyControls(self.controls.len()));
        }
        if self.fps == 0 {
            return Err(ConfigError::Fps);
        }
        Ok(())
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorValue {
    Rgb([f32; 3]),
    Hex(String),
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<[f32; 3], D::Error>
where
    D: serde::Deserializer<'de>,
{
    match ColorValue::deserialize(deserializer)? {
        ColorValue::Rgb(rgb) => Ok(rgb),
        ColorValue::Hex(hex) => parse_hex_color(&hex).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid color {hex:?}, expected \"#rrggbb\""))
        }),
    }
}

/// Parse `#rrggbb` (or `#rrggbbaa`, alpha ignored) into RGB floats in `[0, 1]`.
fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let mut rgb = [0.0; 3];
    for (channel, value) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&digits[channel * 2..channel * 2 + 2], 16).ok()?;
        *value = byte as f32 / 255.0;
    }
    Some(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SceneConfig::default();
        assert_eq!(config.width, 1920);
        assert_eq!(config.height, 1080);
        assert_eq!(config.ribbons.slice_x, 1000);
        assert_eq!(config.particles.count, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SceneConfig::from_json_str(
            r#"{ "width": 640, "height": 360, "ribbons": { "count": 3 } }"#,
        )
        .unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.ribbons.count, 3);
        assert_eq!(config.ribbons.slice_x, 1000);
        assert_eq!(config.particles.count, 200);
    }

    #[test]
    fn test_kebab_case_keys() {
        let config =
            SceneConfig::from_json_str(r#"{ "clear-color": [0.5, 0.25, 1.0], "ribbons": { "slice-x": 8 } }"#)
                .unwrap();
        assert_eq!(config.clear_color, [0.5, 0.25, 1.0]);
        assert_eq!(config.ribbons.slice_x, 8);
    }

    #[test]
    fn test_rejects_zero_resolution() {
        let err = SceneConfig::from_json_str(r#"{ "width": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Resolution { width: 0, .. }));
    }

    #[test]
    fn test_rejects_zero_slices() {
        let config = SceneConfig {
            ribbons: RibbonParams {
                slice_y: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RibbonSlices { slice_y: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_too_many_controls() {
        let config = SceneConfig {
            controls: vec![0.0; MAX_CONTROLS + 1],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyControls(13))
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            SceneConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#00ff88"), Some([0.0, 1.0, 136.0 / 255.0]));
        assert_eq!(parse_hex_color("ffffff"), Some([1.0, 1.0, 1.0]));
        assert_eq!(parse_hex_color("#00000000"), Some([0.0, 0.0, 0.0]));
        assert_eq!(parse_hex_color("invalid"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
        assert_eq!(parse_hex_color("+fffff"), None);
    }

    #[test]
    fn test_clear_color_accepts_hex() {
        let config = SceneConfig::from_json_str(r##"{ "clear-color": "#ff0080" }"##).unwrap();
        assert_eq!(config.clear_color, [1.0, 0.0, 128.0 / 255.0]);
    }

    #[test]
    fn test_clear_color_rejects_bad_hex() {
        let err = SceneConfig::from_json_str(r#"{ "clear-color": "red" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SceneConfig {
            width: 320,
            controls: vec![0.5, 2.0],
            ..Default::default()
        };
        let parsed = SceneConfig::from_json_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
