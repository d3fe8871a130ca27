//! # Theme Error Types
//!
//! This module provides the error taxonomy shared by every imtheme crate.
//! Each variant maps to one failure class of theme generation, so callers can
//! tell a broken template apart from a sampling bug or an exhausted identity range.

use std::path::PathBuf;
use thiserror::Error;

use crate::color::Channel;

/// Errors that can occur while loading, generating or persisting themes.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// The template could not be read or parsed, or carries no appearance payload.
    #[error("Invalid template{}: {details}", display_path(.path))]
    Template {
        /// The template path, when the template came from a file.
        path: Option<PathBuf>,
        /// Details about what is wrong with the template.
        details: String,
    },

    /// A generated channel escaped the `[0.0, 1.0]` range.
    #[error("Slot '{slot}' {} out of range: {value}", display_channel(.channel))]
    Range {
        /// The slot whose value was being generated.
        slot: String,
        /// The offending channel, `None` for scalar slots.
        channel: Option<Channel>,
        /// The generated value.
        value: f32,
    },

    /// Every identity in the configured range is already taken.
    #[error("No free theme identity left in {min}..={max}")]
    CollisionExhaustion {
        /// Lowest identity of the range.
        min: u32,
        /// Highest identity of the range.
        max: u32,
    },

    /// The generator configuration is not usable.
    #[error("Invalid generator configuration: {details}")]
    Config {
        /// Details about the invalid setting.
        details: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error serializing or deserializing theme data.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" {:?}", path),
        None => String::new(),
    }
}

fn display_channel(channel: &Option<Channel>) -> String {
    match channel {
        Some(channel) => format!("channel {}", channel),
        None => "value".to_string(),
    }
}

impl ThemeError {
    /// Create a template error for an in-memory template.
    pub fn template(details: impl Into<String>) -> Self {
        Self::Template {
            path: None,
            details: details.into(),
        }
    }

    /// Create a template error for a template file.
    pub fn template_file(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::Template {
            path: Some(path.into()),
            details: details.into(),
        }
    }

    /// Create a range error.
    pub fn range(slot: impl Into<String>, channel: Option<Channel>, value: f32) -> Self {
        Self::Range {
            slot: slot.into(),
            channel,
            value,
        }
    }

    /// Create a collision exhaustion error for the given identity range.
    pub fn collision_exhaustion(min: u32, max: u32) -> Self {
        Self::CollisionExhaustion { min, max }
    }

    /// Create a configuration error.
    pub fn config(details: impl Into<String>) -> Self {
        Self::Config {
            details: details.into(),
        }
    }

    /// Attach a file path to a template error that has none yet.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Template { path: None, details } => Self::Template {
                path: Some(path.into()),
                details,
            },
            other => other,
        }
    }
}

impl From<serde_json::Error> for ThemeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
