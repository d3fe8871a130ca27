// SPDX-License-Identifier: MIT OR Apache-2.0
use anyhow::Result;
use imtheme_theme::config::{GeneratorConfig, GeneratorOverrides};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use xdg::BaseDirectories;

/// The settings file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General application settings
    #[serde(default)]
    pub general: GeneralSettings,
    /// Theme generation settings
    #[serde(default)]
    pub generator: GeneratorOverrides,
    /// Any other sections are captured here
    #[serde(flatten)]
    pub other: HashMap<String, toml::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralSettings {
    /// Log at debug level unless a log level is given
    pub debug: Option<bool>,
    pub log_level: Option<String>,
}

/// Registry for layered settings.
pub struct SettingsRegistry {
    config: Config,
    pub generator: GeneratorConfig,
}

impl SettingsRegistry {
    /// Create a registry holding only the built-in defaults.
    pub fn with_defaults() -> Self {
        Self {
            config: Config {
                general: GeneralSettings {
                    debug: Some(false),
                    log_level: None,
                },
                generator: GeneratorOverrides::default(),
                other: HashMap::new(),
            },
            generator: GeneratorConfig::new(),
        }
    }

    /// Create a SettingsRegistry and load configuration from standard locations,
    /// then `IMTHEME_CONFIG`, then the `IMTHEME_*` environment variables.
    pub fn new() -> Result<Self> {
        let mut registry = Self::with_defaults();
        registry.load()?;

        if let Ok(path) = env::var("IMTHEME_CONFIG") {
            registry.load_file(Path::new(&path));
        }
        registry.generator.apply_env();

        Ok(registry)
    }

    /// Load configuration from standard locations in precedence order.
    ///
    /// Order (later overrides earlier):
    /// 1. System Data: /usr/share/imtheme/config.toml (and XDG_DATA_DIRS)
    /// 2. System Config: /etc/xdg/imtheme/config.toml (and XDG_CONFIG_DIRS)
    /// 3. User Config: ~/.config/imtheme/config.toml (XDG_CONFIG_HOME)
    pub fn load(&mut self) -> Result<()> {
        let xdg_dirs = BaseDirectories::with_prefix("imtheme")?;
        self.load_config_type(&xdg_dirs, "config.toml");
        Ok(())
    }

    fn load_config_type(&mut self, xdg_dirs: &BaseDirectories, filename: &str) {
        // 1. Load from system data directories
        for path in xdg_dirs.find_data_files(filename).rev() {
            self.load_file(&path);
        }

        // 2. Load from system config directories
        for path in xdg_dirs.find_config_files(filename).rev() {
            self.load_file(&path);
        }

        // 3. Load from user config directory
        if let Some(user_config_path) = xdg_dirs.find_config_file(filename) {
            self.load_file(&user_config_path);
        } else {
            let user_config_path = xdg_dirs.get_config_home().join(filename);
            if user_config_path.exists() {
                self.load_file(&user_config_path);
            }
        }
    }

    fn load_file(&mut self, path: &Path) {
        log::info!("Loading config from: {:?}", path);
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Config>(&content) {
                Ok(loaded_config) => {
                    self.merge(loaded_config);
                },
                Err(e) => {
                    log::error!("Failed to parse config file {:?}: {}", path, e);
                },
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
            },
        }
    }

    /// Merge a loaded config into the current config.
    fn merge(&mut self, other: Config) {
        // General
        if let Some(debug) = other.general.debug {
            self.config.general.debug = Some(debug);
        }
        if other.general.log_level.is_some() {
            self.config.general.log_level = other.general.log_level;
        }

        // Generator
        self.generator.merge(other.generator.clone());
        self.config.generator.merge(other.generator);

        // Other
        self.config.other.extend(other.other);
    }

    /// Get the current configuration.
    pub fn get(&self) -> &Config {
        &self.config
    }

    /// The effective generator configuration.
    pub fn generator(&self) -> &GeneratorConfig {
        &self.generator
    }

    /// Default log filter from the settings files.
    ///
    /// An explicit `log_level` wins; otherwise `debug = true` selects `debug`.
    pub fn log_level(&self) -> Option<&str> {
        match (&self.config.general.log_level, self.config.general.debug) {
            (Some(level), _) => Some(level.as_str()),
            (None, Some(true)) => Some("debug"),
            _ => None,
        }
    }
}
