//! Plugin configuration parameters
//!
//! All tunable parameters for the ADR plugin process.
//! Values are loaded from an optional JSON file; anything omitted keeps
//! its default.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound for `max_frame_size` (64 KiB).
pub const FRAME_SIZE_LIMIT: usize = 64 * 1024;

/// Lower bound for `max_frame_size`. Every fixed reply (id, name, a
/// decision, a codec error) fits well inside it.
pub const MIN_FRAME_SIZE: usize = 256;

/// Largest installation margin override accepted, in dB.
pub const MAX_INSTALLATION_MARGIN_DB: f32 = 30.0;

/// Payload encoding used inside plugin frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireFormat {
    #[default]
    Json,
    Postcard,
}

/// Core plugin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    // --- Logging ---
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,

    // --- Wire ---
    /// Encoding of request/response payloads
    pub wire_format: WireFormat,
    /// Largest accepted frame payload in bytes
    pub max_frame_size: usize,

    // --- Algorithm overrides ---
    /// Operator kill-switch: answer every request as if ADR were off
    pub force_adr_disabled: bool,
    /// Replaces the request's installation margin (dB) when set
    pub installation_margin_override: Option<f32>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            wire_format: WireFormat::Json,
            max_frame_size: 4096,
            force_adr_disabled: false,
            installation_margin_override: None,
        }
    }
}

impl PluginConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values instead of clamping them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_FRAME_SIZE..=FRAME_SIZE_LIMIT).contains(&self.max_frame_size) {
            return Err(ConfigError::ValidationFailed("max_frame_size"));
        }
        if let Some(margin) = self.installation_margin_override {
            if !(0.0..=MAX_INSTALLATION_MARGIN_DB).contains(&margin) {
                return Err(ConfigError::ValidationFailed("installation_margin_override"));
            }
        }
        if !matches!(
            self.log_level.as_str(),
            "off" | "error" | "warn" | "info" | "debug" | "trace"
        ) {
            return Err(ConfigError::ValidationFailed("log_level"));
        }
        Ok(())
    }
}
