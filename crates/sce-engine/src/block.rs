// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later AND MIT
//! A named, ordered group of rules (or nested blocks) run together, with
//! `persist` (a rule keeps re-running after the ones that follow it for a
//! further N outer passes), `ditto` (skip/require that the previous member
//! applied), and `stop` (abort the block early) flag interactions. Ported
//! from the reference `RuleBlock` (`rules.py`).

use std::fmt;

#[cfg(feature = "serde")]
use schemars::JsonSchema;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::flags::Flags;
use crate::rng::Rng;
use crate::rule::{Rule, SoundChangeRule};
use crate::error::RuleResult;
use sce_core::word::Word;

/// A block entry: either a leaf rule, or a nested block -- mirroring the
/// reference's polymorphic `rules: list[BaseRule]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, JsonSchema))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum BlockMember {
    Rule(Rule),
    Block(RuleBlock),
}

impl BlockMember {
    fn flags(&self) -> &Flags {
        match self {
            BlockMember::Rule(rule) => &rule.flags,
            BlockMember::Block(block) => &block.flags,
        }
    }

    fn run(&self, word: &Word, rng: &mut Rng) -> RuleResult<Word> {
        match self {
            BlockMember::Rule(rule) => rule.run(word, rng),
            BlockMember::Block(block) => block.run(word, rng),
        }
    }

    fn validate(&self) -> crate::error::FlagsResult<()> {
        match self {
            BlockMember::Rule(rule) => rule.validate(),
            BlockMember::Block(block) => block.validate(),
        }
    }
}

impl fmt::Display for BlockMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockMember::Rule(rule) => write!(f, "{rule}"),
            BlockMember::Block(block) => write!(f, "{block}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, JsonSchema))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RuleBlock {
    pub name: String,
    pub rules: Vec<BlockMember>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: Flags,
}

impl RuleBlock {
    pub fn new(name: impl Into<String>, rules: Vec<BlockMember>, flags: Flags) -> Self {
        Self { name: name.into(), rules, flags }
    }

    /// Checks this block's own flags and every member's (recursively into
    /// nested blocks) are in-domain. A document-sourced ruleset should call
    /// this once after deserializing, the way the reference's `Flags.parse`
    /// rejects an out-of-domain flag value at parse time.
    pub fn validate(&self) -> crate::error::FlagsResult<()> {
        self.flags.validate()?;
        for member in &self.rules {
            member.validate()?;
        }
        Ok(())
    }

    /// Runs every member once, in order, with `cur_rule` running ahead of
    /// whatever earlier members are still persisting. A member's `ditto`
    /// flag gates it on whether the *previous* member in this same pass
    /// applied; `stop` aborts the whole block early. Always returns a
    /// word -- an abort (the reference's `BlockStopped`) is not an error,
    /// just an early return with whatever had already been applied.
    fn run_members(&self, word: &Word, rng: &mut Rng) -> Word {
        let mut word = word.clone();
        let mut applied = false;
        let mut persisting: Vec<(BlockMember, u32)> = Vec::new();

        'outer: for cur_rule in &self.rules {
            let to_run: Vec<&BlockMember> =
                std::iter::once(cur_rule).chain(persisting.iter().map(|(member, _)| member)).collect();

            for member in to_run {
                let flags = member.flags();
                let gated_on_ditto = flags.ditto != 0 && ((flags.ditto != 1) != applied);
                if flags.ditto == 0 || gated_on_ditto {
                    debug!(member = %member, "running block member");
                    match member.run(&word, rng) {
                        Ok(new_word) => {
                            word = new_word;
                            applied = true;
                        }
                        Err(error) => {
                            debug!(%error, "block member did not apply");
                            applied = false;
                        }
                    }
                    if flags.stop != 0 && ((flags.stop != 1) != applied) {
                        break 'outer;
                    }
                }
            }

            persisting.push((cur_rule.clone(), cur_rule.flags().persist));
            // Items with exactly one pass left are dropped rather than
            // decremented to zero and kept -- matching the reference's
            // `if v > 1` filter. Unlike the reference (which unpacks the
            // filtered pairs via `zip(*...)`, raising if the result is
            // empty), emptying out here is a plain, unexceptional case.
            persisting = persisting.into_iter().filter(|(_, v)| *v > 1).map(|(m, v)| (m, v - 1)).collect();
        }

        word
    }
}

/// Mirrors `RuleBlock.__str__`: just `Block {name}`, not its members --
/// the original keeps block logging at the name level and lets its members
/// log their own detail.
impl fmt::Display for RuleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block {}", self.name)
    }
}

impl SoundChangeRule for RuleBlock {
    fn flags(&self) -> &Flags {
        &self.flags
    }

    fn apply_once(&self, word: &Word, rng: &mut Rng) -> RuleResult<Word> {
        Ok(self.run_members(word, rng))
    }
}
