// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for tokenisation, category construction, and pattern
//! validation.
//!
//! Matching *failure* is not an error here -- `Pattern::match_at` returns
//! `Option<Match>`, and a `None` is a normal, expected outcome of a failed
//! match, not something that unwinds through these types.

use thiserror::Error;

/// A character sequence the grapheme inventory could not tokenise.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{character}' at index {index} in {word:?} is not a recognised grapheme (inventory: {graphemes:?})")]
pub struct WordError {
    pub character: char,
    pub index: usize,
    pub word: String,
    pub graphemes: Vec<String>,
}

pub type WordResult<T> = std::result::Result<T, WordError>;

/// Errors raised while constructing or querying a [`crate::Category`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("unknown category name `{0}`")]
    UnknownName(String),
    #[error("`{phone}` is not a member of category {name:?}")]
    NotInCategory { phone: String, name: Option<String> },
    #[error("category subscript {0} has no bound index")]
    UnboundSubscript(i32),
}

pub type CategoryResult<T> = std::result::Result<T, CategoryError>;

/// Errors raised when a [`crate::Pattern`] is malformed for the operation
/// being attempted (construction-time invariants, not match failure).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("a target reference must be resolved against a target before matching")]
    UnresolvedTargetRef,
    #[error("element cannot be rendered to concrete phones")]
    NotRepresentable,
    #[error(transparent)]
    Category(#[from] CategoryError),
}

pub type PatternResult<T> = std::result::Result<T, PatternError>;
