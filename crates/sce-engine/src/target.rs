// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later AND MIT
//! What a rule looks for: a pattern, optionally narrowed to specific
//! (possibly negative, Python-style) match indices. Ported from the
//! reference `Target` (`rules.py`).

use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use schemars::JsonSchema;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use sce_core::pattern::{Anchor, CatIxMap, Pattern};
use sce_core::word::Word;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, JsonSchema))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Target {
    pub pattern: Pattern,
    #[cfg_attr(feature = "serde", serde(default))]
    pub indices: Vec<i32>,
}

impl Target {
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern, indices: Vec::new() }
    }

    pub fn with_indices(pattern: Pattern, indices: Vec<i32>) -> Self {
        Self { pattern, indices }
    }

    /// Every match of this target's pattern in `word`, anchored at every
    /// start position, excluding a null match at the very start of the
    /// word (`slice(0, 0)` in the reference -- an empty pattern matching
    /// before the first phone is never a usable target).
    ///
    /// If `indices` is non-empty, only those (possibly negative, wrapping
    /// like a Python list index) matches are kept.
    pub fn find(&self, word: &Word) -> Vec<(Range<usize>, CatIxMap)> {
        let mut matches: Vec<(Range<usize>, CatIxMap)> = (0..word.len())
            .filter_map(|start| self.pattern.match_at(word, Anchor::Start(start), None))
            .filter(|m| m.range != (0..0))
            .map(|m| (m.range, m.catixes))
            .collect();

        if self.indices.is_empty() {
            return matches;
        }

        let len = matches.len() as i32;
        self.indices
            .iter()
            .filter(|&&ix| -len <= ix && ix < len)
            .map(|&ix| {
                let real = if ix < 0 { (ix + len) as usize } else { ix as usize };
                matches[real].clone()
            })
            .collect()
    }
}

/// Mirrors `Target.__str__` in `rules.py`: `pattern@i|j` when narrowed to
/// specific indices, else just the pattern.
impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)?;
        if !self.indices.is_empty() {
            let joined = self.indices.iter().map(ToString::to_string).collect::<Vec<_>>().join("|");
            write!(f, "@{joined}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use sce_core::pattern::Element;
    use sce_core::word::GraphemeInventory;

    fn word(s: &str) -> Word {
        Word::parse(s, GraphemeInventory::wildcard(), "").unwrap()
    }

    #[test]
    fn finds_every_non_null_match() {
        let w = word("abab");
        let target = Target::new(Pattern::new(vec![Element::Grapheme("a".into())]));
        let matches = target.find(&w);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].0, 1..2);
        assert_eq!(matches[1].0, 3..4);
    }

    #[test]
    fn indices_select_a_subset_with_negative_wrapping() {
        let w = word("abab");
        let target = Target::with_indices(Pattern::new(vec![Element::Grapheme("a".into())]), vec![-1]);
        let matches = target.find(&w);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].0, 3..4);
    }

    #[test]
    fn out_of_range_indices_are_dropped() {
        let w = word("ab");
        let target = Target::with_indices(Pattern::new(vec![Element::Grapheme("a".into())]), vec![5]);
        assert!(target.find(&w).is_empty());
    }

    #[test]
    fn display_appends_indices_only_when_narrowed() {
        let bare = Target::new(Pattern::new(vec![Element::Grapheme("a".into())]));
        assert_eq!(bare.to_string(), "a");
        let narrowed = Target::with_indices(Pattern::new(vec![Element::Grapheme("a".into())]), vec![0, -1]);
        assert_eq!(narrowed.to_string(), "a@0|-1");
    }
}
