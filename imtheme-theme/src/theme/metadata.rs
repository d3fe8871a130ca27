use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ThemeError;

/// The dark/light classification of a theme.
///
/// The variant is declared by whoever creates the theme, it is never inferred
/// from the color values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Dark backgrounds, light foregrounds.
    Dark,
    /// Light backgrounds, dark foregrounds.
    Light,
}

impl Default for Variant {
    fn default() -> Self {
        Self::Dark
    }
}

impl Variant {
    /// The lowercase name used in theme files.
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Dark => "dark",
            Variant::Light => "light",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Variant::Dark),
            "light" => Ok(Variant::Light),
            other => Err(ThemeError::config(format!(
                "unknown variant '{}', expected 'dark' or 'light'",
                other
            ))),
        }
    }
}

/// Descriptive record stored next to the appearance payload.
///
/// Template metadata is free-form, so parsing never fails on it. A known field
/// only lands in its typed slot when it has the expected shape; anything else,
/// such as `"variant": "both"` or `"name": 5`, is kept verbatim in `extra`
/// together with unknown fields like `category` or `version`. A hand-written
/// theme therefore survives a load/save cycle unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Author or attribution, markdown links allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    /// Any other descriptive fields.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMetadata {
    Fields(IndexMap<String, Value>),
    Other(Value),
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut extra = match RawMetadata::deserialize(deserializer)? {
            RawMetadata::Fields(fields) => fields,
            RawMetadata::Other(value) => {
                log::debug!("Ignoring non-record metadata: {}", value);
                IndexMap::new()
            },
        };

        let variant = extra
            .get("variant")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Variant>().ok());
        if variant.is_some() {
            extra.shift_remove("variant");
        }

        Ok(Self {
            name: take_string(&mut extra, "name"),
            author: take_string(&mut extra, "author"),
            description: take_string(&mut extra, "description"),
            variant,
            extra,
        })
    }
}

fn take_string(fields: &mut IndexMap<String, Value>, key: &str) -> Option<String> {
    if !fields.get(key).is_some_and(Value::is_string) {
        return None;
    }
    match fields.shift_remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

impl Metadata {
    /// Metadata for a generated theme: exactly name, author, description and variant.
    pub fn generated(
        name: impl Into<String>,
        author: impl Into<String>,
        variant: Variant,
    ) -> Self {
        Self {
            name: Some(name.into()),
            author: Some(author.into()),
            description: Some(format!(
                "A randomly generated {} theme with unique color combinations",
                variant
            )),
            variant: Some(variant),
            extra: IndexMap::new(),
        }
    }
}
