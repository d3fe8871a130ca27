//! # Generator Configuration
//!
//! This module provides [GeneratorConfig], the settings shared by every theme
//! generation entry point: where templates are read from, where generated
//! themes are stored, which attribution they carry and which identity range is
//! drawn from.
//!
//! ## Sources
//!
//! Configuration is layered, later sources override earlier ones:
//!
//! 1. Built-in defaults ([GeneratorConfig::new])
//! 2. The `[generator]` section of settings files, as [GeneratorOverrides]
//! 3. Environment variables ([GeneratorConfig::apply_env])
//! 4. Explicit overrides from the caller (command-line flags)
//!
//! Locating and reading settings files is left to the settings registry of
//! `imtheme-services`.
//!
//! ## Environment Variables
//!
//! - `IMTHEME_THEMES_ROOT`: Folder holding generated themes
//! - `IMTHEME_DARK_TEMPLATE`: Template used for dark themes
//! - `IMTHEME_LIGHT_TEMPLATE`: Template used for light themes
//! - `IMTHEME_LIGHT`: Whether a light sibling is generated (`true`/`false`)
//! - `IMTHEME_AUTHOR`: Attribution written into generated metadata
//!
//! ## Configuration File Format
//!
//! ```toml
//! [generator]
//! themes_root = "./themes"
//! dark_template = "./defaults/template/template.json"
//! light_template = "./defaults/template/template_light.json"
//! light_variant = true
//! author = "imtheme"
//! identity_min = 1000
//! identity_max = 9999
//! ```
//!
//! ```rust
//! use imtheme_theme::config::{GeneratorConfig, GeneratorOverrides};
//!
//! let mut config = GeneratorConfig::new();
//! config.merge(GeneratorOverrides {
//!     identity_min: Some(2000),
//!     light_variant: Some(false),
//!     ..Default::default()
//! });
//!
//! assert_eq!(config.identity_min, 2000);
//! assert_eq!(config.identity_max, 9999);
//! assert!(!config.light_variant);
//! ```

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ThemeError, ThemeResult};
use crate::theme::Variant;

/// Attribution written into generated metadata unless configured otherwise.
pub const DEFAULT_AUTHOR: &str = "imtheme randomizer";

/// Default lowest generated identity.
pub const DEFAULT_IDENTITY_MIN: u32 = 1000;

/// Default highest generated identity.
pub const DEFAULT_IDENTITY_MAX: u32 = 9999;

/// Settings for theme generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Folder holding one sub-folder per generated theme.
    pub themes_root: PathBuf,
    /// Template randomized for dark themes.
    pub dark_template: PathBuf,
    /// Template randomized for light themes.
    pub light_template: PathBuf,
    /// Also generate a light sibling for every dark theme.
    pub light_variant: bool,
    /// Attribution written into generated metadata.
    pub author: String,
    /// Lowest identity the registry draws.
    pub identity_min: u32,
    /// Highest identity the registry draws.
    pub identity_max: u32,
}

/// A partial configuration as read from a file. Unset fields keep the
/// value of the layer below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratorOverrides {
    /// See [GeneratorConfig::themes_root].
    pub themes_root: Option<PathBuf>,
    /// See [GeneratorConfig::dark_template].
    pub dark_template: Option<PathBuf>,
    /// See [GeneratorConfig::light_template].
    pub light_template: Option<PathBuf>,
    /// See [GeneratorConfig::light_variant].
    pub light_variant: Option<bool>,
    /// See [GeneratorConfig::author].
    pub author: Option<String>,
    /// See [GeneratorConfig::identity_min].
    pub identity_min: Option<u32>,
    /// See [GeneratorConfig::identity_max].
    pub identity_max: Option<u32>,
}

impl GeneratorOverrides {
    /// Layer `other` on top: its set fields replace the ones here.
    pub fn merge(&mut self, other: GeneratorOverrides) {
        if other.themes_root.is_some() {
            self.themes_root = other.themes_root;
        }
        if other.dark_template.is_some() {
            self.dark_template = other.dark_template;
        }
        if other.light_template.is_some() {
            self.light_template = other.light_template;
        }
        if other.light_variant.is_some() {
            self.light_variant = other.light_variant;
        }
        if other.author.is_some() {
            self.author = other.author;
        }
        if other.identity_min.is_some() {
            self.identity_min = other.identity_min;
        }
        if other.identity_max.is_some() {
            self.identity_max = other.identity_max;
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with the built-in defaults.
    pub fn new() -> Self {
        Self {
            themes_root: PathBuf::from("./themes"),
            dark_template: PathBuf::from("./defaults/template/template.json"),
            light_template: PathBuf::from("./defaults/template/template_light.json"),
            light_variant: true,
            author: DEFAULT_AUTHOR.to_string(),
            identity_min: DEFAULT_IDENTITY_MIN,
            identity_max: DEFAULT_IDENTITY_MAX,
        }
    }

    /// Apply the set fields of `other` on top of this configuration.
    pub fn merge(&mut self, other: GeneratorOverrides) {
        if let Some(themes_root) = other.themes_root {
            self.themes_root = themes_root;
        }
        if let Some(dark_template) = other.dark_template {
            self.dark_template = dark_template;
        }
        if let Some(light_template) = other.light_template {
            self.light_template = light_template;
        }
        if let Some(light_variant) = other.light_variant {
            self.light_variant = light_variant;
        }
        if let Some(author) = other.author {
            self.author = author;
        }
        if let Some(identity_min) = other.identity_min {
            self.identity_min = identity_min;
        }
        if let Some(identity_max) = other.identity_max {
            self.identity_max = identity_max;
        }
    }

    /// Apply the `IMTHEME_*` environment variables.
    pub fn apply_env(&mut self) {
        let overrides = GeneratorOverrides {
            themes_root: env::var_os("IMTHEME_THEMES_ROOT").map(PathBuf::from),
            dark_template: env::var_os("IMTHEME_DARK_TEMPLATE").map(PathBuf::from),
            light_template: env::var_os("IMTHEME_LIGHT_TEMPLATE").map(PathBuf::from),
            light_variant: env::var("IMTHEME_LIGHT").ok().and_then(|v| parse_flag(&v)),
            author: env::var("IMTHEME_AUTHOR").ok(),
            identity_min: None,
            identity_max: None,
        };
        self.merge(overrides);
    }

    /// The template a theme of the given variant is derived from.
    pub fn template_for(&self, variant: Variant) -> &Path {
        match variant {
            Variant::Dark => &self.dark_template,
            Variant::Light => &self.light_template,
        }
    }

    /// Check that the configuration can be used for generation.
    pub fn validate(&self) -> ThemeResult<()> {
        if self.identity_min > self.identity_max {
            return Err(ThemeError::config(format!(
                "identity range {}..={} is empty",
                self.identity_min, self.identity_max
            )));
        }
        if self.author.trim().is_empty() {
            return Err(ThemeError::config("author must not be empty"));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            log::warn!("Ignoring unrecognized boolean value '{}'", other);
            None
        }
    }
}
