//! Window configuration
//!
//! Consolidates the parameters used when creating the native window and its
//! OpenGL context. Defaults match the values the engine has always used, so
//! a missing or partial config file degrades to the known-good setup.
//!
//! Supports loading from TOML; every field is optional in the file and falls
//! back to its default.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed as TOML
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config contents are structurally valid but semantically wrong
    #[error("invalid window configuration: {0}")]
    Invalid(String),
}

/// Parameters for the native window and its OpenGL context
///
/// The context is always a double-buffered, forward-compatible core profile;
/// only the version is configurable. Bit depths apply per color channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial window title
    pub title: String,
    /// Initial client-area width in screen coordinates
    pub width: u32,
    /// Initial client-area height in screen coordinates
    pub height: u32,
    /// Whether the user can resize the window
    pub resizable: bool,
    /// Whether the window has decorations (title bar, borders)
    pub decorated: bool,
    /// Refresh rate hint, used in fullscreen modes
    pub refresh_rate: u32,
    /// Bits per color channel (red, green, blue, alpha)
    pub color_bits: u32,
    /// Depth buffer bits
    pub depth_bits: u32,
    /// Stencil buffer bits
    pub stencil_bits: u32,
    /// Minimum OpenGL context version, major component
    pub gl_major: u32,
    /// Minimum OpenGL context version, minor component
    pub gl_minor: u32,
    /// Buffer swap interval; 0 disables vsync
    pub swap_interval: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Vitrine".to_string(),
            width: 1280,
            height: 720,
            resizable: true,
            decorated: true,
            refresh_rate: 60,
            color_bits: 8,
            depth_bits: 24,
            stencil_bits: 8,
            gl_major: 3,
            gl_minor: 3,
            swap_interval: 0,
        }
    }
}

impl WindowConfig {
    /// Load a configuration from a TOML file, validating it
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file, falling back to the defaults
    ///
    /// A missing file is the normal no-config case and is logged at info. A
    /// file that exists but fails to parse or validate is a degradation:
    /// the error is logged as a warning before the defaults apply.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("no window config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("ignoring window config at {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Validate the configuration
    ///
    /// Rejects zero-sized windows and context versions below the 3.3 core
    /// profile baseline the renderer is written against.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if (self.gl_major, self.gl_minor) < (3, 3) {
            return Err(ConfigError::Invalid(format!(
                "OpenGL {}.{} is below the required 3.3 core profile",
                self.gl_major, self.gl_minor
            )));
        }
        Ok(())
    }
}
