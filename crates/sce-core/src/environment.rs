// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Environments: the conditions and exceptions a matched target is checked
//! against, and the destinations an insertion/copy/move predicate targets.
//!
//! Ported from the reference `Environment` hierarchy (`rules.py`):
//! `LocalEnvironment` (`left_right`), `AdjacencyEnvironment` (`~pattern`,
//! adjacent on either side) and `GlobalEnvironment` (`pattern`, anywhere in
//! the word, or at specific indices).

use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use schemars::JsonSchema;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pattern::{Anchor, CatIxMap, Pattern};
use crate::word::Word;

/// A position- or context-dependent condition, checked against an already-
/// matched target range.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, JsonSchema))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Environment {
    /// `left_right`: the target must be directly preceded by `left` and
    /// followed by `right`.
    Local { left: Pattern, right: Pattern },
    /// `~pattern`: the target must be adjacent to a match of `pattern` on
    /// at least one side.
    Adjacency { pattern: Pattern },
    /// `pattern` or `pattern@i|j`: `pattern` must match somewhere in the
    /// word -- anywhere, or only at the given (possibly negative, wrapping)
    /// indices.
    Global { pattern: Pattern, indices: Vec<i32> },
}

/// Wraps a negative index the way Python's `index + length` does. Stays
/// negative (and so is dropped by callers) if it's still out of range
/// after wrapping once -- no clamping to 0.
fn wrap_index(index: i32, length: usize) -> Option<usize> {
    let wrapped = if index < 0 { index + length as i32 } else { index };
    usize::try_from(wrapped).ok()
}

impl Environment {
    /// Whether this environment holds around `range` in `word`, given the
    /// catixes bound while matching the target.
    pub fn matches(&self, word: &Word, range: &Range<usize>, catixes: &CatIxMap) -> bool {
        match self {
            Environment::Local { left, right } => {
                let target = word.slice(range.clone());
                let left_resolved = left.resolve(target);
                let left_match = left_resolved.match_at(word, Anchor::Stop(range.start), Some(catixes.clone()));
                let next_catixes = left_match.as_ref().map(|m| m.catixes.clone()).unwrap_or_default();
                let right_resolved = right.resolve(target);
                let right_match = right_resolved.match_at(word, Anchor::Start(range.end), Some(next_catixes));
                left_match.is_some() && right_match.is_some()
            }
            Environment::Adjacency { pattern } => {
                let target = word.slice(range.clone());
                let resolved = pattern.resolve(target);
                resolved.match_at(word, Anchor::Stop(range.start), Some(catixes.clone())).is_some()
                    || resolved.match_at(word, Anchor::Start(range.end), Some(catixes.clone())).is_some()
            }
            Environment::Global { pattern, indices } => {
                let target = word.slice(range.clone());
                let resolved = pattern.resolve(target);
                let candidates: Vec<usize> = if indices.is_empty() {
                    (0..word.len()).collect()
                } else {
                    indices.iter().filter_map(|i| wrap_index(*i, word.len())).collect()
                };
                candidates
                    .iter()
                    .any(|&index| resolved.match_at(word, Anchor::Start(index), Some(catixes.clone())).is_some())
            }
        }
    }

    /// Every position (word index 0..=len) where this environment holds,
    /// used to find where an insertion/copy/move predicate may place its
    /// phones.
    ///
    /// `Environment::Global::match_all` deliberately ignores its own
    /// `pattern` -- it only ever yields bare positions, explicit indices if
    /// given, or else `1..len(word)` (note: *not* `0..len(word)`, unlike
    /// `Environment::Global::matches`'s default range; this asymmetry is
    /// carried over from the reference implementation as-is).
    pub fn match_all(&self, word: &Word, range: &Range<usize>, catixes: &CatIxMap) -> Vec<usize> {
        match self {
            Environment::Local { left, right } => {
                let target = word.slice(range.clone());
                let left_resolved = left.resolve(target);
                let right_resolved = right.resolve(target);
                (0..=word.len())
                    .filter(|&index| {
                        let left_match = left_resolved.match_at(word, Anchor::Stop(index), Some(catixes.clone()));
                        let next_catixes = left_match.as_ref().map(|m| m.catixes.clone()).unwrap_or_default();
                        let right_match = right_resolved.match_at(word, Anchor::Start(index), Some(next_catixes));
                        left_match.is_some() && right_match.is_some()
                    })
                    .collect()
            }
            Environment::Adjacency { pattern } => {
                let target = word.slice(range.clone());
                let resolved = pattern.resolve(target);
                (0..=word.len())
                    .filter(|&index| {
                        resolved.match_at(word, Anchor::Stop(index), Some(catixes.clone())).is_some()
                            || resolved.match_at(word, Anchor::Start(index), Some(catixes.clone())).is_some()
                    })
                    .collect()
            }
            Environment::Global { indices, .. } => {
                if indices.is_empty() {
                    (1..word.len()).collect()
                } else {
                    indices.iter().filter_map(|i| wrap_index(*i, word.len())).collect()
                }
            }
        }
    }
}

/// Mirrors `LocalEnvironment.__str__`/`AdjacencyEnvironment.__str__`/
/// `GlobalEnvironment.__str__` in `rules.py`: `left_right`, `~pattern`, and
/// `pattern` or `pattern@i|j` respectively.
impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Local { left, right } => write!(f, "{left}_{right}"),
            Environment::Adjacency { pattern } => write!(f, "~{pattern}"),
            Environment::Global { pattern, indices } => {
                write!(f, "{pattern}")?;
                if !indices.is_empty() {
                    let joined = indices.iter().map(ToString::to_string).collect::<Vec<_>>().join("|");
                    write!(f, "@{joined}")?;
                }
                Ok(())
            }
        }
    }
}

/// Renders a DNF environment-group list the way `Predicate.__str__` does for
/// its `conditions`/`exceptions`: `&`-joined within a group, `, `-joined
/// across groups.
pub fn format_environment_groups(groups: &[Vec<Environment>]) -> String {
    groups
        .iter()
        .map(|group| group.iter().map(ToString::to_string).collect::<Vec<_>>().join(" & "))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A DNF of environments: matches if any inner group's environments all
/// match (AND within a group, OR across groups) -- the shape a rule's
/// `conditions`/`exceptions` take (comma-separated groups of `&`-joined
/// environments).
pub fn match_environments(groups: &[Vec<Environment>], word: &Word, range: &Range<usize>, catixes: &CatIxMap) -> bool {
    groups
        .iter()
        .any(|group| group.iter().all(|environment| environment.matches(word, range, catixes)))
}
