// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later AND MIT

/*!
This crate contains the matching engine for `sce`.

It tokenises words into phones, builds categories from phone sets, and
matches patterns against words -- threading a map of bound category
subscripts through the recursive, backtracking matcher. It does not parse
rule-file text; it consumes already-constructed `Pattern`/`Category` values.
See `sce-engine` for the rule-application layer built on top of this one.
*/

pub mod category;
pub mod environment;
pub mod error;
pub mod pattern;
pub mod word;

pub use category::{Category, CategoryExpr, CategoryStore};
pub use environment::Environment;
pub use error::{CategoryError, PatternError, WordError};
pub use pattern::{Anchor, CatIxMap, Element, Match, Pattern};
pub use word::{GraphemeInventory, Phone, Word};
