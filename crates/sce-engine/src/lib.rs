// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later AND MIT

/*!
Rule application, built on `sce-core`'s tokeniser and matcher.

A [`rule::Rule`] finds its [`target::Target`]s in a word, validates each
against its [`predicate::Predicate`]s' conditions and exceptions, computes a
non-overlapping set of edits, and applies them atomically. A
[`block::RuleBlock`] runs a named, ordered group of rules (or nested
blocks), honouring `persist`/`ditto`/`stop` flag interactions between
members. Randomness (the `chance` flag) is threaded explicitly through
[`rng::Rng`], never read from global state.
*/

pub mod block;
pub mod error;
pub mod flags;
pub mod predicate;
pub mod rng;
pub mod rule;
pub mod target;

pub use block::{BlockMember, RuleBlock};
pub use error::{FlagsError, RuleError, RuleResult};
pub use flags::Flags;
pub use predicate::{InsertKind, InsertPredicate, Predicate, SubstPredicate};
pub use rng::Rng;
pub use rule::{overlaps, Rule, SoundChangeRule};
pub use target::Target;
