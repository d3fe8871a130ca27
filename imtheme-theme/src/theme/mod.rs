//! # Themes
//!
//! A [Theme] is a [Metadata] record plus an appearance payload: an ordered
//! mapping from slot name to [SlotValue]. Theme files look like this:
//!
//! ```json
//! {
//!     "metadata": {
//!         "name": "Random 4821",
//!         "author": "imtheme",
//!         "description": "A randomly generated dark theme with unique color combinations",
//!         "variant": "dark"
//!     },
//!     "imgui": {
//!         "ImGuiCol_WindowBg": { "r": 0.1, "g": 0.1, "b": 0.1, "a": 1.0 },
//!         "ImGuiCol_Text": { "r": 0.9, "g": 0.9, "b": 0.9, "a": 1.0 }
//!     }
//! }
//! ```
//!
//! The slot set of a template is fixed: a theme derived from it carries the
//! same keys in the same order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::color::SlotValue;
use crate::error::{ThemeError, ThemeResult};

mod metadata;

pub use metadata::{Metadata, Variant};

/// The appearance payload: slot name to value, in template order.
pub type Appearance = IndexMap<String, SlotValue>;

/// A theme file: descriptive metadata plus the appearance payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Descriptive record.
    #[serde(default)]
    pub metadata: Metadata,
    /// Slot values.
    #[serde(default)]
    pub imgui: Appearance,
}

impl Theme {
    /// Create a theme from its parts.
    pub fn new(metadata: Metadata, imgui: Appearance) -> Self {
        Self { metadata, imgui }
    }

    /// Parse a theme from JSON text and check that it can serve as a template.
    pub fn from_json_template(json: &str) -> ThemeResult<Self> {
        let theme: Theme = serde_json::from_str(json)
            .map_err(|err| ThemeError::template(err.to_string()))?;
        theme.ensure_template()?;
        Ok(theme)
    }

    /// Fails with [ThemeError::Template] when the appearance payload is empty.
    pub fn ensure_template(&self) -> ThemeResult<()> {
        if self.imgui.is_empty() {
            return Err(ThemeError::template("appearance payload 'imgui' is absent or empty"));
        }
        Ok(())
    }

    /// The declared variant, if any.
    pub fn variant(&self) -> Option<Variant> {
        self.metadata.variant
    }

    /// Iterate over the slot names in payload order.
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.imgui.keys().map(String::as_str)
    }

    /// Returns `true` if both themes define exactly the same slots.
    pub fn same_slots(&self, other: &Theme) -> bool {
        self.imgui.len() == other.imgui.len()
            && self.imgui.keys().all(|key| other.imgui.contains_key(key))
    }
}
