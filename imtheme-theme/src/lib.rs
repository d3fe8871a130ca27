#![warn(missing_docs)]

//! # imtheme Theme Model
//!
//! The data model shared by the imtheme crates: ImGui skin themes made of a
//! metadata record and an appearance payload of RGBA slot values.
//!
//! ## Overview
//!
//! - **[Theme](theme::Theme)**: Metadata plus the ordered slot payload
//! - **[Rgba](color::Rgba)**: Four float channels in `[0.0, 1.0]`
//! - **[SlotClass](slot::SlotClass)**: Surface vs. ordinary slots
//! - **[ThemeIdentity](id::ThemeIdentity)**: The token a generated theme is named after
//! - **[GeneratorConfig](config::GeneratorConfig)**: Paths, attribution and identity range
//! - **[store]**: Loading templates and persisting themes as JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use imtheme_theme::slot::SlotClass;
//! use imtheme_theme::theme::Theme;
//!
//! let template = Theme::from_json_template(r#"{
//!     "imgui": {
//!         "ImGuiCol_WindowBg": {"r": 0.1, "g": 0.1, "b": 0.1, "a": 1.0},
//!         "ImGuiCol_Text": {"r": 0.9, "g": 0.9, "b": 0.9, "a": 1.0}
//!     }
//! }"#).unwrap();
//!
//! let surfaces = template.slots().filter(|s| SlotClass::of(s).is_surface()).count();
//! assert_eq!(surfaces, 1);
//! ```

/// Contains the [color::Rgba] value and channel validation.
pub mod color;
/// Contains the [config::GeneratorConfig] struct for generator configuration.
pub mod config;
/// Contains the [error::ThemeError] taxonomy.
pub mod error;
/// Contains the [id::ThemeIdentity] struct.
pub mod id;
/// Contains the [slot::SlotClass] classification.
pub mod slot;
/// Contains theme file persistence.
pub mod store;
/// Contains the [theme::Theme] struct, its metadata and variants.
pub mod theme;
