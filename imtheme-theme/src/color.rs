//! RGBA values as stored in theme files.
//!
//! Every channel is a float in `[0.0, 1.0]`. Templates may omit `a`, in which
//! case the value is opaque, and some slots hold a bare number instead of a
//! channel record. Anything else is carried as raw JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ThemeError, ThemeResult};

/// Slack tolerated at the `[0.0, 1.0]` bounds before a value counts as a bug.
pub const CHANNEL_EPSILON: f32 = 1e-6;

/// One of the four channels of an [Rgba] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red.
    R,
    /// Green.
    G,
    /// Blue.
    B,
    /// Alpha (opacity).
    A,
}

impl Channel {
    /// The color channels, in storage order.
    pub const COLOR: [Channel; 3] = [Channel::R, Channel::G, Channel::B];

    /// All channels, in storage order.
    pub const ALL: [Channel; 4] = [Channel::R, Channel::G, Channel::B, Channel::A];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::R => "r",
            Channel::G => "g",
            Channel::B => "b",
            Channel::A => "a",
        };
        f.write_str(name)
    }
}

/// A color with opacity, each channel in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Rgba {
    /// Create a new value from its four channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Read a single channel.
    pub fn get(&self, channel: Channel) -> f32 {
        match channel {
            Channel::R => self.r,
            Channel::G => self.g,
            Channel::B => self.b,
            Channel::A => self.a,
        }
    }

    /// Overwrite a single channel.
    pub fn set(&mut self, channel: Channel, value: f32) {
        match channel {
            Channel::R => self.r = value,
            Channel::G => self.g = value,
            Channel::B => self.b = value,
            Channel::A => self.a = value,
        }
    }

    /// Returns `true` if every channel lies in `[0.0, 1.0]`.
    pub fn in_range(&self) -> bool {
        Channel::ALL
            .iter()
            .all(|&channel| (0.0..=1.0).contains(&self.get(channel)))
    }

    /// Bring every channel into `[0.0, 1.0]`.
    ///
    /// Values within [CHANNEL_EPSILON] of a bound are clamped with a warning.
    /// Anything further out, or NaN, is reported as a [ThemeError::Range].
    pub fn checked(mut self, slot: &str) -> ThemeResult<Self> {
        for channel in Channel::ALL {
            let value = check_channel(slot, Some(channel), self.get(channel))?;
            self.set(channel, value);
        }
        Ok(self)
    }
}

/// Validate one generated value, see [Rgba::checked]. `channel` is `None` for
/// scalar slots.
pub fn check_channel(slot: &str, channel: Option<Channel>, value: f32) -> ThemeResult<f32> {
    if (0.0..=1.0).contains(&value) {
        return Ok(value);
    }
    let label = match channel {
        Some(channel) => format!("channel {}", channel),
        None => "value".to_string(),
    };
    if value.is_finite() && value >= -CHANNEL_EPSILON && value <= 1.0 + CHANNEL_EPSILON {
        log::warn!(
            "Clamping slot '{}' {} from {} into [0, 1]",
            slot,
            label,
            value
        );
        return Ok(value.clamp(0.0, 1.0));
    }
    log::error!(
        "Generated slot '{}' {} is out of range: {}",
        slot,
        label,
        value
    );
    Err(ThemeError::range(slot, channel, value))
}

/// The value stored under one slot of an appearance payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    /// A channel record.
    Color(Rgba),
    /// A bare number.
    Scalar(f32),
    /// Any other JSON value: a string, a flag, a record without `r`/`g`/`b`.
    Other(serde_json::Value),
}

impl SlotValue {
    /// Returns the channel record, if this slot holds one.
    pub fn as_color(&self) -> Option<&Rgba> {
        match self {
            SlotValue::Color(rgba) => Some(rgba),
            SlotValue::Scalar(_) | SlotValue::Other(_) => None,
        }
    }

    /// Returns `true` for a record that is not a channel record.
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, SlotValue::Other(value) if value.is_object())
    }
}

impl From<Rgba> for SlotValue {
    fn from(rgba: Rgba) -> Self {
        SlotValue::Color(rgba)
    }
}
