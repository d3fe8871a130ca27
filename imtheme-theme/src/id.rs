//! # Theme Identities
//!
//! Generated themes are labelled with a caller-supplied identity token. In the
//! default layout the token is a number drawn from a bounded range and doubles
//! as the folder name of the persisted theme (`random_<id>`).
//!
//! ## Usage Examples
//!
//! ```rust
//! use imtheme_theme::id::ThemeIdentity;
//!
//! let numeric = ThemeIdentity::from(4821);
//! assert_eq!(numeric.as_number(), Some(4821));
//! assert_eq!(numeric.folder_name(), "random_4821");
//!
//! let named = ThemeIdentity::new("sunset");
//! assert_eq!(named.to_string(), "sunset");
//! assert_eq!(named.as_number(), None);
//! ```

use std::fmt::{Display, Formatter};

/// Prefix of the folder (and file stem) a generated theme is persisted under.
pub const RANDOM_PREFIX: &str = "random_";

/// The identity token a generated theme is labelled with.
///
/// Identities are compared as strings. Numeric identities are the ones the
/// identity registry draws and tracks for collision avoidance.
#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct ThemeIdentity {
    token: String,
}

impl ThemeIdentity {
    /// Create an identity from any token.
    pub fn new(token: impl ToString) -> Self {
        Self {
            token: token.to_string(),
        }
    }

    /// Returns the token as a number, if it is one.
    pub fn as_number(&self) -> Option<u32> {
        self.token.parse().ok()
    }

    /// The folder and file stem a theme with this identity is stored under.
    pub fn folder_name(&self) -> String {
        format!("{}{}", RANDOM_PREFIX, self.token)
    }

    /// Parse the identity back out of a folder name such as `random_1234`.
    ///
    /// Only numeric suffixes are accepted.
    pub fn from_folder_name(name: &str) -> Option<u32> {
        let digits = name.strip_prefix(RANDOM_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

impl From<u32> for ThemeIdentity {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

impl From<&str> for ThemeIdentity {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl Display for ThemeIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_name_round_trip() {
        let id = ThemeIdentity::from(1002);
        assert_eq!(ThemeIdentity::from_folder_name(&id.folder_name()), Some(1002));
    }

    #[test]
    fn test_from_folder_name_rejects_other_entries() {
        assert_eq!(ThemeIdentity::from_folder_name("cyberpunk"), None);
        assert_eq!(ThemeIdentity::from_folder_name("random_"), None);
        assert_eq!(ThemeIdentity::from_folder_name("random_12a"), None);
        assert_eq!(ThemeIdentity::from_folder_name("random_-5"), None);
        assert_eq!(ThemeIdentity::from_folder_name("random_99999999999"), None);
    }
}
