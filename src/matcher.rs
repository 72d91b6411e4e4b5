//! Glyph brightness table - picks the character whose ink density best matches a brightness.
//!
//! Raw glyph brightness (ink fraction) is kept per character. Queries run
//! against a min-max normalized snapshot of the whole table, rebuilt lazily
//! after any insert or remove, so the darkest glyph in the set always maps to
//! 0.0 and the brightest to 1.0.

use crate::brightness::glyph_brightness;
use crate::glyph::GlyphRasterizer;
use crate::{PicasciiError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Whether removing a character that is not in the table invalidates the
/// current normalization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovePolicy {
    /// Every remove marks the table dirty, present or not.
    #[default]
    AlwaysInvalidate,
    /// Only removes that actually drop an entry mark the table dirty.
    InvalidateIfPresent,
}

/// Normalized brightness per character, sorted by code point.
///
/// Always holds at least two entries spanning exactly [0, 1].
#[derive(Clone, Debug)]
pub struct NormalizedTable {
    entries: Vec<(char, f64)>,
}

impl NormalizedTable {
    fn build(raw: &HashMap<char, f64>) -> Result<Self> {
        if raw.len() < 2 {
            return Err(PicasciiError::InvalidCharset {
                reason: format!("need at least 2 characters, have {}", raw.len()),
            });
        }

        let (min, max) = raw
            .values()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if max == min {
            return Err(PicasciiError::InvalidCharset {
                reason: format!("all {} characters have the same brightness", raw.len()),
            });
        }

        let mut entries: Vec<(char, f64)> =
            raw.iter().map(|(&c, &v)| (c, (v - min) / (max - min))).collect();
        entries.sort_unstable_by_key(|&(c, _)| c);

        log::debug!("normalized {} glyphs (raw range {min:.4}..{max:.4})", entries.len());
        Ok(Self { entries })
    }

    /// Character with the closest normalized brightness. Ties go to the
    /// lower code point.
    pub fn nearest(&self, brightness: f64) -> char {
        let mut best = self.entries[0].0;
        let mut best_diff = f64::INFINITY;
        // entries are in code-point order, so strict `<` keeps the lowest on ties
        for &(c, value) in &self.entries {
            let diff = (value - brightness).abs();
            if diff < best_diff {
                best_diff = diff;
                best = c;
            }
        }
        best
    }

    pub fn brightness(&self, ch: char) -> Option<f64> {
        self.entries
            .binary_search_by_key(&ch, |&(c, _)| c)
            .ok()
            .map(|i| self.entries[i].1)
    }

    pub fn entries(&self) -> &[(char, f64)] {
        &self.entries
    }
}

#[derive(Clone, Debug)]
enum Normalization {
    Dirty,
    Normalized(NormalizedTable),
}

pub struct GlyphBrightnessTable<R> {
    rasterizer: R,
    raw: HashMap<char, f64>,
    state: Normalization,
    remove_policy: RemovePolicy,
}

impl<R: GlyphRasterizer> GlyphBrightnessTable<R> {
    /// Build a table from `charset`. An empty or degenerate charset is
    /// accepted here and reported on the first query.
    pub fn new(rasterizer: R, charset: impl IntoIterator<Item = char>) -> Self {
        let mut table = Self {
            rasterizer,
            raw: HashMap::new(),
            state: Normalization::Dirty,
            remove_policy: RemovePolicy::default(),
        };
        for ch in charset {
            let value = table.raw_brightness(ch);
            table.raw.insert(ch, value);
        }
        table
    }

    pub fn with_remove_policy(mut self, policy: RemovePolicy) -> Self {
        self.remove_policy = policy;
        self
    }

    pub fn set_remove_policy(&mut self, policy: RemovePolicy) {
        self.remove_policy = policy;
    }

    pub fn remove_policy(&self) -> RemovePolicy {
        self.remove_policy
    }

    fn raw_brightness(&self, ch: char) -> f64 {
        glyph_brightness(&self.rasterizer.rasterize(ch))
    }

    /// Add `ch`, or recompute it if already present.
    pub fn insert(&mut self, ch: char) {
        let value = self.raw_brightness(ch);
        self.raw.insert(ch, value);
        self.state = Normalization::Dirty;
    }

    /// Drop `ch`. Returns whether it was present.
    pub fn remove(&mut self, ch: char) -> bool {
        let removed = self.raw.remove(&ch).is_some();
        if removed || self.remove_policy == RemovePolicy::AlwaysInvalidate {
            self.state = Normalization::Dirty;
        }
        if !removed {
            log::debug!("remove {ch:?}: not in charset");
        }
        removed
    }

    /// Normalize if needed and return the frozen view queries run against.
    pub fn snapshot(&mut self) -> Result<&NormalizedTable> {
        if let Normalization::Dirty = self.state {
            self.state = Normalization::Normalized(NormalizedTable::build(&self.raw)?);
        }
        let Normalization::Normalized(table) = &self.state else {
            unreachable!("state is normalized after a successful build");
        };
        Ok(table)
    }

    /// Character whose normalized brightness is closest to `brightness`.
    pub fn match_brightness(&mut self, brightness: f64) -> Result<char> {
        Ok(self.snapshot()?.nearest(brightness))
    }

    pub fn charset(&self) -> BTreeSet<char> {
        self.raw.keys().copied().collect()
    }

    /// Unnormalized ink fraction of `ch`.
    pub fn raw(&self, ch: char) -> Option<f64> {
        self.raw.get(&ch).copied()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.raw.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn is_normalized(&self) -> bool {
        matches!(self.state, Normalization::Normalized(_))
    }
}
