//! Tunables for the rebuild passes.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Maximum size of the world along any axis.
pub const WORLD_MAX: f32 = 524_288.0;

/// Half the maximum size of the world.
pub const HALF_WORLD_MAX: f32 = 262_144.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebuildConfig {
    /// Half-extent of the quads standing in for infinite partition planes.
    pub world_max: f32,
    /// Half-extent of the cube the bounds pass starts from.
    pub bounds_extent: f32,
    /// Split threshold when filtering polygons through the tree.
    pub precise_epsilon: f32,
    /// Split threshold when cutting hull faces.
    pub coarse_epsilon: f32,
}

impl Default for RebuildConfig {
    fn default() -> Self {
        Self {
            world_max: WORLD_MAX,
            bounds_extent: HALF_WORLD_MAX,
            precise_epsilon: 0.01,
            coarse_epsilon: 0.25,
        }
    }
}

impl RebuildConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RebuildConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("world_max", self.world_max),
            ("bounds_extent", self.bounds_extent),
            ("precise_epsilon", self.precise_epsilon),
            ("coarse_epsilon", self.coarse_epsilon),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = RebuildConfig::from_json_str(r#"{ "world_max": 4096.0 }"#).unwrap();
        assert_eq!(config.world_max, 4096.0);
        assert_eq!(config.bounds_extent, HALF_WORLD_MAX);
        assert_eq!(config.precise_epsilon, 0.01);
    }

    #[test]
    fn rejects_non_positive_values() {
        let err = RebuildConfig::from_json_str(r#"{ "coarse_epsilon": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "coarse_epsilon", .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            RebuildConfig::from_json_str("{ world_max: }"),
            Err(ConfigError::Parse(_))
        ));
    }
}
