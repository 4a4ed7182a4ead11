// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later AND MIT
//! A single rule: find targets, validate them against their predicates'
//! conditions/exceptions, compute the non-overlapping set of edits, and
//! apply them atomically. Ported from the reference `Rule`/`BaseRule`
//! (`rules.py`).

use std::cmp::Reverse;
use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use schemars::JsonSchema;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use sce_core::pattern::CatIxMap;
use sce_core::word::{Phone, Word};
use tracing::debug;

use crate::error::{RuleError, RuleResult};
use crate::flags::Flags;
use crate::predicate::Predicate;
use crate::rng::Rng;
use crate::target::Target;

/// Whether two edit ranges conflict: proper overlap, or -- for two
/// zero-width insertions -- landing at exactly the same position. Two
/// non-empty ranges that merely touch at an endpoint do not overlap.
/// Ported from the reference's `overlaps`.
pub fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    (a.start < b.start && b.start < a.end)
        || (b.start < a.start && a.start < b.end)
        || (a.start == b.start && (a.start == a.end) == (b.start == b.end))
}

/// Behaviour shared by a single [`Rule`] and a [`crate::block::RuleBlock`]:
/// a `chance`-gated, `repeat`-bounded application loop around whatever
/// `apply_once` does. Ported from the reference `BaseRule.__call__`.
pub trait SoundChangeRule {
    fn flags(&self) -> &Flags;
    /// One run of this rule's/block's own logic, with no `chance`/`repeat`
    /// wrapping. A [`RuleBlock`](crate::block::RuleBlock) needs `rng` to
    /// gate its own nested members' `chance` rolls; a plain [`Rule`] has no
    /// internal randomness and ignores it.
    fn apply_once(&self, word: &Word, rng: &mut Rng) -> RuleResult<Word>;

    fn run(&self, word: &Word, rng: &mut Rng) -> RuleResult<Word> {
        if !rng.chance(self.flags().chance) {
            return Err(RuleError::RandomlySkipped);
        }
        let mut word = word.clone();
        for _ in 0..self.flags().repeat {
            let before = word.clone();
            word = self.apply_once(&word, rng)?;
            if word == before {
                break;
            }
        }
        Ok(word)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, JsonSchema))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Rule {
    pub targets: Vec<Target>,
    pub predicates: Vec<Predicate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: Flags,
}

impl Rule {
    pub fn new(targets: Vec<Target>, predicates: Vec<Predicate>, flags: Flags) -> Self {
        Self { targets, predicates, flags }
    }

    /// Checks this rule's own flags are in-domain. Ported from the
    /// reference's `Flags.parse` raising `ValueError` on a malformed flag
    /// clause -- here the clause is never textual, but a deserialized
    /// [`Flags`] value can still be out of range, so callers that load a
    /// [`Rule`] from a structured document should call this before running it.
    pub fn validate(&self) -> crate::error::FlagsResult<()> {
        self.flags.validate()
    }

    fn get_targets(&self, word: &Word) -> RuleResult<Vec<(Range<usize>, CatIxMap, usize)>> {
        debug!("begin finding targets");
        let mut targets: Vec<(Range<usize>, CatIxMap, usize)> = Vec::new();
        for (index, target) in self.targets.iter().enumerate() {
            debug!(%target, "searching for target");
            for (range, catixes) in target.find(word) {
                targets.push((range, catixes, index));
            }
        }
        if targets.is_empty() {
            debug!("no targets found");
            return Err(RuleError::NoTargetsFound);
        }
        if self.flags.rtl {
            debug!("sorting right-to-left");
            targets.sort_by_key(|(range, _, index)| (Reverse(range.end), *index));
        } else {
            debug!("sorting left-to-right");
            targets.sort_by_key(|(range, _, index)| (range.start, *index));
        }
        Ok(targets)
    }

    fn validate_targets(
        &self,
        word: &Word,
        targets: Vec<(Range<usize>, CatIxMap, usize)>,
    ) -> RuleResult<Vec<(Range<usize>, CatIxMap, usize, usize)>> {
        let mut validated: Vec<(Range<usize>, CatIxMap, usize, usize)> = Vec::new();
        for (range, catixes, target_index) in targets {
            if validated.last().is_some_and(|last| overlaps(&range, &last.0)) {
                continue;
            }
            if let Some(pred_index) = self.predicates.iter().position(|p| p.matches(word, &range, &catixes)) {
                validated.push((range, catixes, target_index, pred_index));
            }
        }
        if validated.is_empty() {
            debug!("no targets validated");
            return Err(RuleError::NoTargetsValidated);
        }
        Ok(validated)
    }

    fn get_changes(&self, word: &Word, targets: &[(Range<usize>, CatIxMap, usize, usize)]) -> Vec<(Range<usize>, Vec<Phone>)> {
        let mut changes: Vec<(Range<usize>, Vec<Phone>)> = Vec::new();
        for (range, catixes, index, pindex) in targets {
            let predicate = &self.predicates[*pindex];
            let mut candidate = changes.clone();
            for (change, replacement) in predicate.get_changes(word, range, catixes, *index) {
                if !candidate.iter().any(|(existing, _)| overlaps(&change, existing)) {
                    candidate.push((change, replacement));
                }
            }
            if predicate.verify(changes.len(), candidate.len()) {
                changes = candidate;
            }
        }
        changes
    }

    fn apply_changes(&self, word: &Word, mut changes: Vec<(Range<usize>, Vec<Phone>)>) -> Word {
        changes.sort_by_key(|(range, _)| (Reverse(range.end), Reverse(range.start)));
        let mut word = word.clone();
        for (range, replacement) in changes {
            word = word.replace(range, &replacement);
        }
        word
    }
}

/// Mirrors `Rule.__str__`: `targets predicates flags`, trimmed -- used by
/// the `tracing` instrumentation to log a human-readable rule description.
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let targets = self.targets.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        let predicates = self.predicates.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
        write!(f, "{}", format!("{targets} {predicates} {}", self.flags).trim())
    }
}

impl SoundChangeRule for Rule {
    fn flags(&self) -> &Flags {
        &self.flags
    }

    fn apply_once(&self, word: &Word, _rng: &mut Rng) -> RuleResult<Word> {
        debug!(rule = %self, "this rule");
        let targets = self.get_targets(word)?;
        let validated = self.validate_targets(word, targets)?;
        let changes = self.get_changes(word, &validated);
        let result = self.apply_changes(word, changes);
        tracing::info!(from = %word, rule = %self, to = %result, "applied rule");
        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use sce_core::pattern::{Element, Pattern};
    use sce_core::word::GraphemeInventory;

    fn word(s: &str) -> Word {
        Word::parse(s, GraphemeInventory::wildcard(), "").unwrap()
    }

    fn subst_rule(from: &str, to: &str) -> Rule {
        Rule::new(
            vec![Target::new(Pattern::new(vec![Element::Grapheme(from.into())]))],
            vec![Predicate::Subst(crate::predicate::SubstPredicate {
                replacements: vec![Pattern::new(vec![Element::Grapheme(to.into())])],
                conditions: vec![vec![]],
                exceptions: vec![],
            })],
            Flags::default(),
        )
    }

    #[test]
    fn overlaps_detects_proper_overlap() {
        assert!(overlaps(&(1..4), &(2..5)));
        assert!(!overlaps(&(1..2), &(2..3)));
    }

    #[test]
    fn overlaps_detects_coincident_insertions() {
        assert!(overlaps(&(2..2), &(2..2)));
        assert!(!overlaps(&(2..2), &(2..3)));
    }

    #[test]
    fn substitution_replaces_every_match() {
        let rule = subst_rule("a", "e");
        let mut rng = Rng::from_seed(1);
        let result = rule.apply_once(&word("banana"), &mut rng).unwrap();
        assert_eq!(result.to_string(), "benene");
    }

    #[test]
    fn no_targets_found_is_an_error() {
        let rule = subst_rule("z", "x");
        let mut rng = Rng::from_seed(1);
        assert_eq!(rule.apply_once(&word("cat"), &mut rng), Err(RuleError::NoTargetsFound));
    }

    #[test]
    fn display_renders_targets_predicates_and_flags() {
        let rule = subst_rule("a", "e");
        assert_eq!(rule.to_string(), "a > e");
    }

    #[test]
    fn rtl_flag_changes_target_order_but_not_the_final_result() {
        let mut rule = subst_rule("a", "e");
        rule.flags.rtl = true;
        let mut rng = Rng::from_seed(1);
        let result = rule.apply_once(&word("banana"), &mut rng).unwrap();
        assert_eq!(result.to_string(), "benene");
    }
}
