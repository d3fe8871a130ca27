// SPDX-License-Identifier: MIT OR Apache-2.0
//! Identity registry for generated themes.
//!
//! Generated themes live in `<themes_root>/random_<id>/`. The registry knows
//! which identities are taken and draws new ones by rejection sampling.
//! It is a plain in-memory set: concurrent generators must share one registry
//! behind a lock, or partition the identity range between them.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::ops::RangeInclusive;
use std::path::Path;

use imtheme_theme::error::{ThemeError, ThemeResult};
use imtheme_theme::id::ThemeIdentity;
use rand::Rng;

/// The set of identities already used under a themes root.
#[derive(Debug, Clone)]
pub struct IdentityRegistry {
    range: RangeInclusive<u32>,
    taken: BTreeSet<u32>,
}

impl IdentityRegistry {
    /// An empty registry drawing from `range`.
    pub fn new(range: RangeInclusive<u32>) -> Self {
        Self {
            range,
            taken: BTreeSet::new(),
        }
    }

    /// Scan `themes_root` for `random_<id>` folders.
    ///
    /// A missing themes root yields an empty registry. Entries that are not
    /// folders or do not follow the naming scheme are skipped.
    pub fn scan<P: AsRef<Path>>(themes_root: P, range: RangeInclusive<u32>) -> ThemeResult<Self> {
        let themes_root = themes_root.as_ref();
        let mut registry = Self::new(range);

        let entries = match fs::read_dir(themes_root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("Themes root {:?} does not exist yet", themes_root);
                return Ok(registry);
            }
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            match name.to_str().and_then(ThemeIdentity::from_folder_name) {
                Some(id) => {
                    registry.taken.insert(id);
                }
                None => log::trace!("Skipping {:?} while scanning identities", name),
            }
        }

        log::debug!(
            "Found {} taken identities under {:?}",
            registry.taken.len(),
            themes_root
        );
        Ok(registry)
    }

    /// Mark identities as taken.
    pub fn with_taken(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.taken.extend(ids);
        self
    }

    /// The range identities are drawn from.
    pub fn range(&self) -> &RangeInclusive<u32> {
        &self.range
    }

    /// Returns `true` if `id` is already used.
    pub fn contains(&self, id: u32) -> bool {
        self.taken.contains(&id)
    }

    /// All taken identities, ascending. May include ids outside the range.
    pub fn taken(&self) -> impl Iterator<Item = u32> + '_ {
        self.taken.iter().copied()
    }

    /// How many identities of the range are still free.
    pub fn available(&self) -> u64 {
        let (min, max) = (*self.range.start(), *self.range.end());
        if min > max {
            return 0;
        }
        let size = u64::from(max - min) + 1;
        let used = self.taken.range(self.range.clone()).count() as u64;
        size - used
    }

    /// Draw a random identity that is not taken yet.
    ///
    /// The drawn identity is not reserved; call [IdentityRegistry::reserve]
    /// once the theme using it is committed. Fails with
    /// [ThemeError::CollisionExhaustion] when the range is full.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> ThemeResult<u32> {
        if self.available() == 0 {
            return Err(ThemeError::collision_exhaustion(
                *self.range.start(),
                *self.range.end(),
            ));
        }
        loop {
            let id = rng.gen_range(self.range.clone());
            if !self.taken.contains(&id) {
                log::debug!("Drew identity {}", id);
                return Ok(id);
            }
        }
    }

    /// Mark `id` as taken. Returns `false` if it already was.
    pub fn reserve(&mut self, id: u32) -> bool {
        self.taken.insert(id)
    }

    /// Draw a free identity and reserve it in one step.
    pub fn claim<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ThemeResult<u32> {
        let id = self.draw(rng)?;
        self.reserve(id);
        Ok(id)
    }
}
