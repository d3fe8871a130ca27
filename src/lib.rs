#![warn(missing_docs)]

//! Generate random ImGui skin themes that stay true to a dark or light variant.

pub use imtheme_core as core;
pub use imtheme_services as services;
pub use imtheme_theme as theme;

/// A "prelude" for users of imtheme.
///
/// Importing this module brings into scope the most common types
/// needed to randomize, load and store themes.
///
/// ```rust
/// use imtheme::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::randomizer::{Randomizer, SamplingPolicy};
    pub use crate::services::{BatchGenerator, IdentityRegistry, SettingsRegistry};
    pub use crate::theme::color::{Rgba, SlotValue};
    pub use crate::theme::config::GeneratorConfig;
    pub use crate::theme::error::{ThemeError, ThemeResult};
    pub use crate::theme::id::ThemeIdentity;
    pub use crate::theme::store::{load_theme, save_theme};
    pub use crate::theme::theme::{Metadata, Theme, Variant};
}
