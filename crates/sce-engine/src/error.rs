// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later AND MIT
//! Errors raised while applying a rule or rule block.
//!
//! Ported from the reference's `RuleDidNotApply` hierarchy (`rules.py`):
//! `NoTargetsFound`, `NoTargetsValidated`, and `RuleRandomlySkipped` are all
//! "this rule did not apply to this word" outcomes, distinguished so a
//! caller (or an enclosing block) can log or react to *why*. `BlockStopped`
//! is purely internal control flow within a [`crate::block::RuleBlock`]
//! and never escapes it -- it has no counterpart here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("no targets found")]
    NoTargetsFound,
    #[error("no targets validated")]
    NoTargetsValidated,
    #[error("rule was randomly skipped")]
    RandomlySkipped,
}

pub type RuleResult<T> = std::result::Result<T, RuleError>;

/// Raised by [`crate::flags::Flags::validate`] for an out-of-domain value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagsError {
    #[error("`repeat` must be at least 1, got {0}")]
    NonPositiveRepeat(i64),
    #[error("`persist` must be at least 1, got {0}")]
    NonPositivePersist(i64),
    #[error("ternary flag must be -1, 0, or 1, got {0}")]
    InvalidTernary(i8),
}

pub type FlagsResult<T> = std::result::Result<T, FlagsError>;
