//! Carousel tunables.
//!
//! A [`CarouselConfig`] is validated once when it is built and is never
//! mutated afterwards. It can come from the built-in defaults, a TOML file,
//! or explicit values.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("min_scale ({min}) must be positive and below max_scale ({max})")]
    InvalidRange { min: f64, max: f64 },
    #[error("scroll_sensitivity must be positive, got {0}")]
    NonPositiveSensitivity(f64),
    #[error("scale range [{min}, {max}] must contain the reset scale 1.0")]
    ResetOutOfRange { min: f64, max: f64 },
    #[error("switch_threshold ({threshold}) must be above 1.0 and at most max_scale ({max})")]
    ThresholdOutOfRange { threshold: f64, max: f64 },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Zoom and switching parameters of a carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    min_scale: f64,
    max_scale: f64,
    scroll_sensitivity: f64,
    switch_threshold: f64,
}

/// On-disk form, every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    min_scale: Option<f64>,
    max_scale: Option<f64>,
    scroll_sensitivity: Option<f64>,
    switch_threshold: Option<f64>,
}

impl CarouselConfig {
    pub fn new(
        min_scale: f64,
        max_scale: f64,
        scroll_sensitivity: f64,
        switch_threshold: f64,
    ) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("min_scale", min_scale),
            ("max_scale", max_scale),
            ("scroll_sensitivity", scroll_sensitivity),
            ("switch_threshold", switch_threshold),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        if min_scale <= 0.0 || min_scale >= max_scale {
            return Err(ConfigError::InvalidRange { min: min_scale, max: max_scale });
        }
        if scroll_sensitivity <= 0.0 {
            return Err(ConfigError::NonPositiveSensitivity(scroll_sensitivity));
        }
        if !(min_scale..=max_scale).contains(&RESET_SCALE) {
            return Err(ConfigError::ResetOutOfRange { min: min_scale, max: max_scale });
        }
        // Zoom-in must be able to reach the threshold from a freshly reset slide
        if switch_threshold <= RESET_SCALE || switch_threshold > max_scale {
            return Err(ConfigError::ThresholdOutOfRange {
                threshold: switch_threshold,
                max: max_scale,
            });
        }

        Ok(Self {
            min_scale,
            max_scale,
            scroll_sensitivity,
            switch_threshold,
        })
    }

    /// Loads a TOML file. Keys that are absent keep their default value.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        Self::default().with_overrides(
            file.min_scale,
            file.max_scale,
            file.scroll_sensitivity,
            file.switch_threshold,
        )
    }

    /// Builds a new config from this one, replacing the given values.
    pub fn with_overrides(
        self,
        min_scale: Option<f64>,
        max_scale: Option<f64>,
        scroll_sensitivity: Option<f64>,
        switch_threshold: Option<f64>,
    ) -> Result<Self, ConfigError> {
        Self::new(
            min_scale.unwrap_or(self.min_scale),
            max_scale.unwrap_or(self.max_scale),
            scroll_sensitivity.unwrap_or(self.scroll_sensitivity),
            switch_threshold.unwrap_or(self.switch_threshold),
        )
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    pub fn scroll_sensitivity(&self) -> f64 {
        self.scroll_sensitivity
    }

    pub fn switch_threshold(&self) -> f64 {
        self.switch_threshold
    }

    /// Clamps a scale into `[min_scale, max_scale]`.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Linear opacity for a scale, `MIN_OPACITY` at min scale up to `MAX_OPACITY` at max scale.
    pub fn opacity_for(&self, scale: f64) -> f64 {
        let normalized = (scale - self.min_scale) / (self.max_scale - self.min_scale);
        MIN_OPACITY + (MAX_OPACITY - MIN_OPACITY) * normalized
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            scroll_sensitivity: DEFAULT_SCROLL_SENSITIVITY,
            switch_threshold: DEFAULT_SWITCH_THRESHOLD,
        }
    }
}
