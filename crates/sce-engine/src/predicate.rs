// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later AND MIT
//! Predicates: what happens to a validated target. Ported from the
//! reference `Predicate`/`SubstPredicate`/`InsertPredicate`/
//! `CopyPredicate`/`MovePredicate` (`rules.py`).

use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use schemars::JsonSchema;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use sce_core::environment::{format_environment_groups, match_environments, Environment};
use sce_core::pattern::{CatIxMap, Pattern};
use sce_core::word::{Phone, Word};

/// Renders the trailing ` / conditions ! exceptions` clause shared by every
/// predicate flavour, mirroring `Predicate.__str__`'s base implementation.
fn format_conditions_exceptions(conditions: &[Vec<Environment>], exceptions: &[Vec<Environment>]) -> String {
    let mut out = String::new();
    let conditions = format_environment_groups(conditions);
    if !conditions.is_empty() {
        out.push_str(&format!(" / {conditions}"));
    }
    let exceptions = format_environment_groups(exceptions);
    if !exceptions.is_empty() {
        out.push_str(&format!(" ! {exceptions}"));
    }
    out
}

/// The phone immediately before `start`, wrapping to the word's last phone
/// when `start == 0` -- mirroring Python's `word[start - 1]` negative
/// indexing.
fn phone_before(word: &Word, start: usize) -> Phone {
    if start == 0 {
        word.get(word.len() - 1).cloned().unwrap_or_default()
    } else {
        word.get(start - 1).cloned().unwrap_or_default()
    }
}

/// `> replacement, ...`: substitutes the matched target.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, JsonSchema))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SubstPredicate {
    pub replacements: Vec<Pattern>,
    pub conditions: Vec<Vec<Environment>>,
    pub exceptions: Vec<Vec<Environment>>,
}

impl SubstPredicate {
    fn get_replacement(&self, word: &Word, range: &Range<usize>, catixes: &CatIxMap, index: usize) -> Vec<Phone> {
        let replacement = &self.replacements[index % self.replacements.len()];
        let target = word.slice(range.clone());
        let last = phone_before(word, range.start);
        // An unrepresentable element (an unresolved wildcard, an unbound
        // category subscript) can't occur here for a validated target, so
        // this only errors on a malformed rule definition.
        replacement
            .resolve(target)
            .as_phones(&last, catixes)
            .expect("a substitution replacement must be representable as concrete phones")
    }

    fn get_changes(&self, word: &Word, range: &Range<usize>, catixes: &CatIxMap, index: usize) -> Vec<(Range<usize>, Vec<Phone>)> {
        vec![(range.clone(), self.get_replacement(word, range, catixes, index))]
    }
}

/// Mirrors `SubstPredicate.__str__`: `> replacement, ... / conditions ! exceptions`.
impl fmt::Display for SubstPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let replacements = self.replacements.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        write!(f, "> {replacements}{}", format_conditions_exceptions(&self.conditions, &self.exceptions))
    }
}

/// Whether insertions land by copying the target (`>>`, original kept) or
/// moving it (`->`, original cleared first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, JsonSchema))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum InsertKind {
    Copy,
    Move,
}

/// `>> destination, ...` / `-> destination, ...`: inserts the target's
/// phones (or moves them) to wherever `destinations` resolves.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, JsonSchema))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct InsertPredicate {
    pub kind: InsertKind,
    pub destinations: Vec<Vec<Environment>>,
    pub conditions: Vec<Vec<Environment>>,
    pub exceptions: Vec<Vec<Environment>>,
}

impl InsertPredicate {
    /// The intersection of every destination environment's `match_all`
    /// positions in the AND-group selected by `index`, ascending and
    /// deduplicated -- mirroring the reference's `reduce(and_, ...)` over
    /// per-environment position sets.
    fn get_destinations(&self, word: &Word, range: &Range<usize>, catixes: &CatIxMap, index: usize) -> Vec<usize> {
        let group = &self.destinations[index % self.destinations.len()];
        let mut sets = group.iter().map(|env| env.match_all(word, range, catixes));
        let Some(first) = sets.next() else { return Vec::new() };
        let mut common: std::collections::BTreeSet<usize> = first.into_iter().collect();
        for set in sets {
            let set: std::collections::HashSet<usize> = set.into_iter().collect();
            common.retain(|position| set.contains(position));
        }
        common.into_iter().collect()
    }

    fn get_changes(&self, word: &Word, range: &Range<usize>, catixes: &CatIxMap, index: usize) -> Vec<(Range<usize>, Vec<Phone>)> {
        let target: Vec<Phone> = word.slice(range.clone()).to_vec();
        let mut changes: Vec<(Range<usize>, Vec<Phone>)> = self
            .get_destinations(word, range, catixes, index)
            .into_iter()
            .map(|dest| (dest..dest, target.clone()))
            .collect();
        if self.kind == InsertKind::Move {
            let mut with_clear = vec![(range.clone(), Vec::new())];
            with_clear.append(&mut changes);
            with_clear
        } else {
            changes
        }
    }

    fn verify(&self, old_length: usize, new_length: usize) -> bool {
        match self.kind {
            InsertKind::Copy => true,
            InsertKind::Move => new_length > old_length + 1,
        }
    }
}

/// Mirrors `CopyPredicate.__str__`/`MovePredicate.__str__`, each prefixing
/// `InsertPredicate.__str__`'s destination list with their own operator.
impl fmt::Display for InsertPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let destinations = format_environment_groups(&self.destinations);
        let op = match self.kind {
            InsertKind::Copy => ">>",
            InsertKind::Move => "->",
        };
        write!(f, "{op} {destinations}{}", format_conditions_exceptions(&self.conditions, &self.exceptions))
    }
}

/// What happens to a validated target.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, JsonSchema))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Predicate {
    Subst(SubstPredicate),
    Insert(InsertPredicate),
}

impl Predicate {
    fn conditions(&self) -> &[Vec<Environment>] {
        match self {
            Predicate::Subst(p) => &p.conditions,
            Predicate::Insert(p) => &p.conditions,
        }
    }

    fn exceptions(&self) -> &[Vec<Environment>] {
        match self {
            Predicate::Subst(p) => &p.exceptions,
            Predicate::Insert(p) => &p.exceptions,
        }
    }

    /// Whether this predicate claims a validated target: any exception
    /// group matching rules it out outright; otherwise it's claimed if any
    /// condition group matches, or if there are no conditions at all.
    pub fn matches(&self, word: &Word, range: &Range<usize>, catixes: &CatIxMap) -> bool {
        if match_environments(self.exceptions(), word, range, catixes) {
            return false;
        }
        match_environments(self.conditions(), word, range, catixes) || self.conditions().is_empty()
    }

    pub fn get_changes(&self, word: &Word, range: &Range<usize>, catixes: &CatIxMap, index: usize) -> Vec<(Range<usize>, Vec<Phone>)> {
        match self {
            Predicate::Subst(p) => p.get_changes(word, range, catixes, index),
            Predicate::Insert(p) => p.get_changes(word, range, catixes, index),
        }
    }

    pub fn verify(&self, old_length: usize, new_length: usize) -> bool {
        match self {
            Predicate::Subst(_) => true,
            Predicate::Insert(p) => p.verify(old_length, new_length),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Subst(p) => write!(f, "{p}"),
            Predicate::Insert(p) => write!(f, "{p}"),
        }
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
    fn subst_replaces_with_literal_phones() {
        let w = word("cat");
        let predicate = SubstPredicate {
            replacements: vec![Pattern::new(vec![Element::Grapheme("k".into())])],
            conditions: vec![vec![]],
            exceptions: vec![],
        };
        let changes = predicate.get_changes(&w, &(1..2), &CatIxMap::default(), 0);
        assert_eq!(changes, vec![(1..2, vec!["k".to_string()])]);
    }

    #[test]
    fn subst_ditto_uses_preceding_phone_wrapping_at_start() {
        let w = word("cat");
        let predicate = SubstPredicate {
            replacements: vec![Pattern::new(vec![Element::Ditto])],
            conditions: vec![vec![]],
            exceptions: vec![],
        };
        // range.start == 0 wraps to the word's last phone, the trailing '#'
        let changes = predicate.get_changes(&w, &(0..0), &CatIxMap::default(), 0);
        assert_eq!(changes, vec![(0..0, vec!["#".to_string()])]);
    }

    #[test]
    fn insert_copy_keeps_original_and_adds_destination() {
        let w = word("cat");
        let predicate = InsertPredicate {
            kind: InsertKind::Copy,
            destinations: vec![vec![Environment::Global {
                pattern: Pattern::new(vec![Element::Grapheme("#".into())]),
                indices: vec![],
            }]],
            conditions: vec![vec![]],
            exceptions: vec![],
        };
        let changes = predicate.get_changes(&w, &(1..2), &CatIxMap::default(), 0);
        assert!(changes.iter().any(|(r, _)| r.start == r.end));
    }

    #[test]
    fn insert_move_clears_the_source_range_first() {
        let w = word("cat");
        let predicate = InsertPredicate {
            kind: InsertKind::Move,
            destinations: vec![vec![Environment::Global {
                pattern: Pattern::new(vec![Element::Grapheme("#".into())]),
                indices: vec![],
            }]],
            conditions: vec![vec![]],
            exceptions: vec![],
        };
        let changes = predicate.get_changes(&w, &(1..2), &CatIxMap::default(), 0);
        assert_eq!(changes[0], (1..2, Vec::new()));
    }

    #[test]
    fn display_renders_subst_with_conditions() {
        let predicate = SubstPredicate {
            replacements: vec![Pattern::new(vec![Element::Grapheme("o".into())])],
            conditions: vec![vec![Environment::Local {
                left: Pattern::new(vec![Element::Grapheme("p".into())]),
                right: Pattern::new(vec![]),
            }]],
            exceptions: vec![],
        };
        assert_eq!(predicate.to_string(), "> o / p_");
    }

    #[test]
    fn display_renders_copy_and_move_operators() {
        let base = |kind| InsertPredicate {
            kind,
            destinations: vec![vec![Environment::Global {
                pattern: Pattern::new(vec![Element::Grapheme("#".into())]),
                indices: vec![],
            }]],
            conditions: vec![vec![]],
            exceptions: vec![],
        };
        assert_eq!(base(InsertKind::Copy).to_string(), ">> #");
        assert_eq!(base(InsertKind::Move).to_string(), "-> #");
    }

    #[test]
    fn move_predicate_requires_net_growth() {
        let predicate = InsertPredicate {
            kind: InsertKind::Move,
            destinations: vec![vec![]],
            conditions: vec![vec![]],
            exceptions: vec![],
        };
        assert!(!predicate.verify(5, 6));
        assert!(predicate.verify(5, 7));
    }
}
