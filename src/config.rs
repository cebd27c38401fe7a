//! Configuration loading and management.
//!
//! Loads configuration from the embedded config.toml with environment
//! variable overrides.

use serde::Deserialize;
use std::env;

use crate::error::ConfigError;

/// Embedded configuration file content.
const CONFIG_TOML: &str = include_str!("../config.toml");

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct BindingConfig {
    pub toolbar: ToolbarConfig,
    pub host: HostConfig,
    pub fonts: FontConfig,
}

/// Toolbar styling knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolbarConfig {
    /// Icon alpha applied to disabled items.
    pub disabled_icon_alpha: u8,
    /// Opacity factor applied to tinted title text of disabled items.
    pub disabled_text_opacity: f32,
}

/// Capabilities of the host's title renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct HostConfig {
    /// Whether the action bar honors colors carried by styled titles.
    /// Hosts that do not get their item text recolored directly.
    pub styled_title_tint: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontConfig {
    /// Family used when a font request names no family.
    pub default_family: String,
}

impl BindingConfig {
    /// Load configuration from the embedded config.toml with environment
    /// variable overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_toml_str(CONFIG_TOML)?;

        // Embedders targeting hosts whose action bars ignore styled-title
        // colors flip this off so item text is recolored directly.
        if let Ok(value) = env::var("MENUBIND_STYLED_TITLE_TINT") {
            config.host.styled_title_tint = !matches!(value.as_str(), "0" | "false" | "off");
        }

        if let Ok(family) = env::var("MENUBIND_DEFAULT_FONT_FAMILY") {
            config.fonts.default_family = family;
        }

        config.validate()?;

        Ok(config)
    }

    /// Parse a configuration document without applying overrides.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BindingConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Validate that the configured values are usable.
    fn validate(&self) -> Result<(), ConfigError> {
        let opacity = self.toolbar.disabled_text_opacity;
        if !(0.0..=1.0).contains(&opacity) {
            return Err(ConfigError::OpacityOutOfRange(opacity));
        }

        if self.fonts.default_family.trim().is_empty() {
            return Err(ConfigError::EmptyFontFamily);
        }

        Ok(())
    }
}

impl Default for BindingConfig {
    /// The embedded defaults; parsing them is infallible by construction.
    fn default() -> Self {
        Self::from_toml_str(CONFIG_TOML).expect("embedded config.toml must parse")
    }
}
