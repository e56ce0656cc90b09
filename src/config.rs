use serde::Deserialize;
use thiserror::Error;

use crate::content::Content;

/// Geometry and timing constants shared by the presenter and its engines.
///
/// Every field has a default so `content/motion.json` only needs the values
/// it wants to override.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Pointer effects are disabled at or below this viewport width.
    pub mobile_breakpoint: f64,
    /// Used when the navbar has not been measured.
    pub header_fallback_height: f64,
    /// Extra gap left above a section after navigating to it.
    pub nav_margin: f64,
    /// Added to the scroll position to find the "current" section.
    pub nav_reference_offset: f64,
    pub navbar_scrolled_after: f64,
    pub scroll_top_after: f64,
    /// How long past the loader's expected duration before the content gate is forced open.
    pub loader_grace_ms: f64,
    pub handoff_delay_ms: f64,
    pub notification_hold_ms: f64,
    pub form_delay_ms: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
            header_fallback_height: 80.0,
            nav_margin: 10.0,
            nav_reference_offset: 100.0,
            navbar_scrolled_after: 50.0,
            scroll_top_after: 200.0,
            loader_grace_ms: 5000.0,
            handoff_delay_ms: 100.0,
            notification_hold_ms: 3000.0,
            form_delay_ms: 2000.0,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Motion config not found")]
    NotFound,
    #[error("Couldn't parse motion config: {0}")]
    ParseError(String),
    #[error("Invalid motion config: {0}")]
    Invalid(&'static str),
}

impl MotionConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `motion.json` from the embedded content folder.
    pub fn load() -> Result<Self, ConfigError> {
        let file = Content::get("motion.json").ok_or(ConfigError::NotFound)?;
        let raw = std::str::from_utf8(&file.data)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::from_json(raw)
    }

    /// Like [`MotionConfig::load`] but never fails; problems are logged.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("using default motion config: {e}");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let timings = [
            self.loader_grace_ms,
            self.handoff_delay_ms,
            self.notification_hold_ms,
            self.form_delay_ms,
        ];
        if timings.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(ConfigError::Invalid("timings must be non-negative"));
        }
        if self.mobile_breakpoint < 0.0 || self.header_fallback_height < 0.0 {
            return Err(ConfigError::Invalid("lengths must be non-negative"));
        }
        Ok(())
    }
}
