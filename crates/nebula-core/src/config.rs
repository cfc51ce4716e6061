//! Settings document: everything a user can tune, in one serde tree.
//!
//! Every struct is `#[serde(default)]`, so a partial document only overrides
//! the fields it names.

use crate::camera::CameraSettings;
use crate::error::ConfigError;
use crate::field::ParticleGridSpec;
use crate::params::AnimationParameters;
use crate::pointer::PointerSettings;
use serde::{Deserialize, Serialize};

/// Knobs of the post-processing chain. The core only stores them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostSettings {
    pub enabled: bool,
    pub bloom_strength: f32,
    pub bloom_radius: f32,
    pub bloom_threshold: f32,
    pub afterimage_damp: f32,
}

impl Default for PostSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            bloom_strength: 2.0,
            bloom_radius: 0.8,
            bloom_threshold: 0.0,
            afterimage_damp: 0.88,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NebulaConfig {
    pub grid: ParticleGridSpec,
    pub animation: AnimationParameters,
    pub pointer: PointerSettings,
    pub post: PostSettings,
    pub camera: CameraSettings,
}

impl NebulaConfig {
    /// Defaults tuned for phones and tablets: smaller grid, same look.
    pub fn mobile() -> Self {
        Self {
            grid: ParticleGridSpec::mobile(),
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(ConfigError::Parse)
    }

    /// Overlays a partial document on top of `self`.
    pub fn merged_with_json(&self, text: &str) -> Result<Self, ConfigError> {
        let mut base = serde_json::to_value(self).map_err(ConfigError::Serialize)?;
        let patch: serde_json::Value = serde_json::from_str(text).map_err(ConfigError::Parse)?;
        merge_values(&mut base, patch);
        serde_json::from_value(base).map_err(ConfigError::Parse)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)
    }
}

fn merge_values(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::AnimationMode;

    #[test]
    fn partial_document_keeps_defaults() {
        let cfg = NebulaConfig::from_json(
            r#"{ "animation": { "mode": "curl_noise", "curl": { "curl_strength": 4.0 } } }"#,
        )
        .unwrap();
        assert_eq!(cfg.animation.mode, AnimationMode::CurlNoise);
        assert_eq!(cfg.animation.curl.curl_strength, 4.0);
        assert_eq!(cfg.animation.curl.noise_scale, 0.15);
        assert_eq!(cfg.grid, ParticleGridSpec::default());
        assert_eq!(cfg.post.afterimage_damp, 0.88);
    }

    #[test]
    fn export_round_trips() {
        let mut cfg = NebulaConfig::mobile();
        cfg.post.bloom_strength = 1.25;
        let text = cfg.to_json_pretty().unwrap();
        assert!(text.contains("\"bloom_strength\": 1.25"));
        assert_eq!(NebulaConfig::from_json(&text).unwrap(), cfg);
    }

    #[test]
    fn merge_respects_base() {
        let base = NebulaConfig::mobile();
        let merged = base
            .merged_with_json(r#"{ "grid": { "width": 80.0 } }"#)
            .unwrap();
        assert_eq!(merged.grid.width, 80.0);
        assert_eq!(merged.grid.resolution_x, 200);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = NebulaConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
