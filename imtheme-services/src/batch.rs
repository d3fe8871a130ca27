// SPDX-License-Identifier: MIT OR Apache-2.0
//! Batch generation of random themes.
//!
//! Every batch entry draws one identity, randomizes the dark template (and the
//! light template when enabled) under it, and only then writes anything:
//!
//! ```text
//! <themes_root>/random_<id>/random_<id>.json
//! <themes_root>/random_<id>/random_<id>_light.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use imtheme_core::Randomizer;
use imtheme_theme::config::GeneratorConfig;
use imtheme_theme::error::ThemeResult;
use imtheme_theme::id::ThemeIdentity;
use imtheme_theme::store;
use imtheme_theme::theme::{Theme, Variant};
use rand::Rng;

use crate::registry::IdentityRegistry;

/// Where the theme of `identity` and `variant` is stored under `themes_root`.
pub fn theme_path(themes_root: &Path, identity: &ThemeIdentity, variant: Variant) -> PathBuf {
    let stem = identity.folder_name();
    let file = match variant {
        Variant::Dark => format!("{}.json", stem),
        Variant::Light => format!("{}_light.json", stem),
    };
    themes_root.join(&stem).join(file)
}

/// One randomized theme and its destination.
#[derive(Debug, Clone)]
pub struct GeneratedTheme {
    /// The variant the theme was sampled for.
    pub variant: Variant,
    /// The theme itself.
    pub theme: Theme,
    /// Where the theme is persisted.
    pub path: PathBuf,
}

/// The themes generated under one identity.
#[derive(Debug, Clone)]
pub struct GeneratedSet {
    /// The shared identity.
    pub identity: ThemeIdentity,
    /// Dark first, then light if enabled.
    pub themes: Vec<GeneratedTheme>,
}

/// Generates and persists random themes.
pub struct BatchGenerator {
    config: GeneratorConfig,
    randomizer: Randomizer,
    registry: IdentityRegistry,
    dark_template: Theme,
    light_template: Option<Theme>,
}

impl BatchGenerator {
    /// Load the templates and scan the themes root named by `config`.
    pub fn from_config(config: GeneratorConfig) -> ThemeResult<Self> {
        config.validate()?;
        let dark_template = store::load_theme(config.template_for(Variant::Dark))?;
        let light_template = if config.light_variant {
            Some(store::load_theme(config.template_for(Variant::Light))?)
        } else {
            None
        };
        let registry = IdentityRegistry::scan(
            &config.themes_root,
            config.identity_min..=config.identity_max,
        )?;
        Ok(Self::new(config, dark_template, light_template, registry))
    }

    /// Assemble a generator from already loaded parts.
    pub fn new(
        config: GeneratorConfig,
        dark_template: Theme,
        light_template: Option<Theme>,
        registry: IdentityRegistry,
    ) -> Self {
        let randomizer = Randomizer::new().with_author(config.author.clone());
        Self {
            config,
            randomizer,
            registry,
            dark_template,
            light_template,
        }
    }

    /// The identity registry, including identities reserved by this batch.
    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    /// Randomize one set of themes in memory.
    ///
    /// The identity is reserved only once every variant was produced, so a
    /// failed attempt leaves the registry untouched.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ThemeResult<GeneratedSet> {
        let identity = ThemeIdentity::from(self.registry.draw(rng)?);

        let mut templates = vec![(Variant::Dark, &self.dark_template)];
        if let Some(light) = &self.light_template {
            templates.push((Variant::Light, light));
        }

        let mut themes = Vec::with_capacity(templates.len());
        for (variant, template) in templates {
            let theme = self.randomizer.randomize(template, variant, &identity, rng)?;
            themes.push(GeneratedTheme {
                variant,
                theme,
                path: theme_path(&self.config.themes_root, &identity, variant),
            });
        }

        if let Some(id) = identity.as_number() {
            self.registry.reserve(id);
        }
        Ok(GeneratedSet { identity, themes })
    }

    /// Write every theme of a set to its destination.
    ///
    /// Either the whole set lands on disk or none of it does: when one file
    /// fails, the files already written for the set are removed again, and so
    /// is the identity folder if that leaves it empty.
    pub fn persist(&self, set: &GeneratedSet) -> ThemeResult<()> {
        let mut written: Vec<&Path> = Vec::with_capacity(set.themes.len());
        for generated in &set.themes {
            if let Err(err) = store::save_theme(&generated.path, &generated.theme) {
                log::error!("Failed to persist {}: {}", set.identity, err);
                for path in written {
                    if let Err(e) = fs::remove_file(path) {
                        log::warn!("Failed to roll back {:?}: {}", path, e);
                    }
                }
                let folder = self.config.themes_root.join(set.identity.folder_name());
                if fs::remove_dir(&folder).is_ok() {
                    log::debug!("Removed empty folder {:?}", folder);
                }
                return Err(err);
            }
            written.push(&generated.path);
        }
        Ok(())
    }

    /// Generate and persist `count` sets.
    pub fn run<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> ThemeResult<Vec<GeneratedSet>> {
        let mut sets = Vec::with_capacity(count);
        for _ in 0..count {
            let set = self.generate(rng)?;
            self.persist(&set)?;
            log::info!(
                "Generated {} theme(s) for identity {}",
                set.themes.len(),
                set.identity
            );
            sets.push(set);
        }
        Ok(sets)
    }
}
