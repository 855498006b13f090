//! Host-tunable constants for the viewport and crop editor.
//!
//! Defaults match the values in [`crate::consts`]. A host can override them
//! from environment variables ([`CropConfig::from_env`]) or from a JSON blob
//! ([`CropConfig::from_json`]); both paths validate before returning.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::consts::{
    DEFAULT_CORNER_HIT_DP, DEFAULT_EDGE_HIT_DP, DEFAULT_MAX_SCALE, DEFAULT_MIN_CROP_SIZE_PX, DEFAULT_MIN_SCALE,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be finite and positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("min_scale ({min}) must be below max_scale ({max})")]
    ScaleRange { min: f64, max: f64 },
    #[error("cannot parse {var}={value:?} as a number")]
    EnvParse { var: &'static str, value: String },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Lower bound of the user zoom relative to the fit scale.
    pub min_scale: f64,
    /// Upper bound of the user zoom relative to the fit scale.
    pub max_scale: f64,
    /// Minimum crop rectangle side, in screen pixels.
    pub min_crop_size: f64,
    /// Edge touch zone, in density-independent pixels.
    pub edge_hit_dp: f64,
    /// Corner touch zone, in density-independent pixels.
    pub corner_hit_dp: f64,
    /// Screen pixels per density-independent pixel.
    pub density: f64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            min_crop_size: DEFAULT_MIN_CROP_SIZE_PX,
            edge_hit_dp: DEFAULT_EDGE_HIT_DP,
            corner_hit_dp: DEFAULT_CORNER_HIT_DP,
            density: 1.0,
        }
    }
}

impl CropConfig {
    /// Build config from environment variables, falling back to defaults for unset ones.
    ///
    /// - `CROP_MIN_SCALE`, `CROP_MAX_SCALE`
    /// - `CROP_MIN_SIZE` (screen pixels)
    /// - `CROP_EDGE_HIT_DP`, `CROP_CORNER_HIT_DP`
    /// - `CROP_DENSITY`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but not a number, or when
    /// the resulting config fails [`CropConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            min_scale: env_parse_f64("CROP_MIN_SCALE", defaults.min_scale)?,
            max_scale: env_parse_f64("CROP_MAX_SCALE", defaults.max_scale)?,
            min_crop_size: env_parse_f64("CROP_MIN_SIZE", defaults.min_crop_size)?,
            edge_hit_dp: env_parse_f64("CROP_EDGE_HIT_DP", defaults.edge_hit_dp)?,
            corner_hit_dp: env_parse_f64("CROP_CORNER_HIT_DP", defaults.corner_hit_dp)?,
            density: env_parse_f64("CROP_DENSITY", defaults.density)?,
        };
        config.validate()?;
        info!(
            min_scale = config.min_scale,
            max_scale = config.max_scale,
            min_crop_size = config.min_crop_size,
            density = config.density,
            "crop config loaded from env"
        );
        Ok(config)
    }

    /// Parse a JSON object; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input, or a validation error.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable by the viewport and editor.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("min_crop_size", self.min_crop_size),
            ("edge_hit_dp", self.edge_hit_dp),
            ("corner_hit_dp", self.corner_hit_dp),
            ("density", self.density),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.min_scale >= self.max_scale {
            return Err(ConfigError::ScaleRange { min: self.min_scale, max: self.max_scale });
        }
        Ok(())
    }

    /// Edge touch zone in screen pixels.
    #[must_use]
    pub fn edge_hit_px(&self) -> f64 {
        self.edge_hit_dp * self.density
    }

    /// Corner touch zone in screen pixels.
    #[must_use]
    pub fn corner_hit_px(&self) -> f64 {
        self.corner_hit_dp * self.density
    }
}

fn env_parse_f64(var: &'static str, default: f64) -> Result<f64, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::EnvParse { var, value: raw.clone() }),
        Err(_) => Ok(default),
    }
}
