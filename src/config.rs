//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/hospital/hospital.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `HOSPITAL_*` prefix
//!
//! The `--style` flag is applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::DEFAULT_ROOT_NAME;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("cannot expand config path {path}: {message}")]
    PathExpansion { path: String, message: String },
}

/// How the menu prints the hospital structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    /// `name (kind)` lines indented two spaces per level
    #[default]
    Indented,
    /// Box-drawing tree
    Tree,
}

impl DisplayStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStyle::Indented => "indented",
            DisplayStyle::Tree => "tree",
        }
    }
}

/// Unified configuration for the hospital menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Name of the root node (default: "Hospital")
    pub hospital_name: String,
    /// Structure display style
    pub display_style: DisplayStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hospital_name: DEFAULT_ROOT_NAME.to_string(),
            display_style: DisplayStyle::default(),
        }
    }
}

/// Get the XDG config directory.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "hospital").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("hospital.toml"))
}

/// Expand `~` and `$VAR` in a user-supplied path.
pub fn expand_path(path: &Path) -> Result<PathBuf, SettingsError> {
    let raw = path.to_string_lossy();
    shellexpand::full(&raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| SettingsError::PathExpansion {
            path: raw.to_string(),
            message: e.to_string(),
        })
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file; unlike the global file it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_layers(
            global_config_path().as_deref(),
            explicit,
            Environment::with_prefix("HOSPITAL"),
        )
    }

    #[instrument(level = "debug", skip(env))]
    fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: Environment,
    ) -> Result<Self, SettingsError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("hospital_name", defaults.hospital_name)
            .map_err(config_err)?
            .set_default("display_style", defaults.display_style.as_str())
            .map_err(config_err)?;

        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(path) = explicit {
            let path = expand_path(path)?;
            debug!("loading config {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder.add_source(env).build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# hospital configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/hospital/hospital.toml
#   Explicit: hospital --config <file>
#   Env:      HOSPITAL_HOSPITAL_NAME, HOSPITAL_DISPLAY_STYLE

# Name of the root node
# hospital_name = "Hospital"

# "indented" (name (kind) lines) or "tree" (box drawing)
# display_style = "indented"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> SettingsError {
    SettingsError::Config {
        message: e.to_string(),
    }
}
