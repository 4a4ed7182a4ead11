// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Categories: named (or anonymous) ordered sets of phones, and the
//! set-algebra expression tree used to build them.
//!
//! Ported from the reference `Category`/`Category.parse` (`cats.py`). The
//! *textual* side of `Category.parse` -- splitting a rule-source string on
//! `|`/`+`/`-`/`&`/`,` -- belongs to the external rule-file parser; this
//! module implements only the semantic result, an already-structured
//! [`CategoryExpr`] tree evaluated against a [`CategoryStore`].

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use schemars::JsonSchema;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use sce_utils::FastMap;

use crate::error::{CategoryError, CategoryResult};
use crate::word::Phone;

/// An ordered set of phones, optionally named. Categories are immutable
/// value aggregates; the engine never mutates one in place, only builds new
/// ones via [`CategoryExpr::eval`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, JsonSchema))]
pub struct Category {
    elements: Vec<Phone>,
    name: Option<String>,
}

impl Category {
    pub fn new(elements: Vec<Phone>) -> Self {
        Self { elements, name: None }
    }

    pub fn named(elements: Vec<Phone>, name: impl Into<String>) -> Self {
        Self {
            elements,
            name: Some(name.into()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn elements(&self) -> &[Phone] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Phone> {
        self.elements.get(index)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.elements.iter().any(|e| e == item)
    }

    /// The position of `item` in this category. Errors the way `Category.index`
    /// raises `ValueError` on an absent element.
    pub fn index(&self, item: &str) -> CategoryResult<usize> {
        self.elements
            .iter()
            .position(|e| e == item)
            .ok_or_else(|| CategoryError::NotInCategory {
                phone: item.to_string(),
                name: self.name.clone(),
            })
    }
}

impl Index<usize> for Category {
    type Output = Phone;

    fn index(&self, index: usize) -> &Phone {
        &self.elements[index]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}", self.elements.join(", ")),
        }
    }
}

/// A name table categories are resolved against. Categories are stored by
/// handle (name) rather than embedded by value, so a [`CategoryExpr::Name`]
/// reference always resolves to the current definition.
#[derive(Debug, Clone, Default)]
pub struct CategoryStore {
    by_name: FastMap<String, Category>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: impl Into<String>, category: Category) {
        self.by_name.insert(name.into(), category);
    }

    pub fn get(&self, name: &str) -> CategoryResult<&Category> {
        self.by_name
            .get(name)
            .ok_or_else(|| CategoryError::UnknownName(name.to_string()))
    }
}

/// A structured set-algebra expression over categories, mirroring the
/// precedence `Category.parse` gives its textual operators: union/
/// concatenation (`|`, `+`) binds loosest, then difference (`-`), then
/// intersection (`&`), then a literal comma-separated list, then a bare
/// category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryExpr {
    /// `|` / `+`: concatenates the operands' elements (duplicates kept,
    /// exactly as the reference implementation's `elements.extend` does).
    Union(Vec<CategoryExpr>),
    /// `-`: every element of the first operand not present in any of the
    /// rest.
    Difference(Vec<CategoryExpr>),
    /// `&`: every element of the first operand also present in all of the
    /// rest.
    Intersection(Vec<CategoryExpr>),
    /// `,`-joined bare phones.
    Literal(Vec<Phone>),
    /// A bare name, resolved against the enclosing [`CategoryStore`].
    Name(String),
}

impl CategoryExpr {
    pub fn eval(&self, store: &CategoryStore) -> CategoryResult<Category> {
        match self {
            CategoryExpr::Union(parts) => {
                let mut elements = Vec::new();
                for part in parts {
                    elements.extend(part.eval(store)?.elements);
                }
                Ok(Category::new(elements))
            }
            CategoryExpr::Difference(parts) => {
                let mut parts = parts.iter();
                let first = parts.next().expect("difference has at least one operand");
                let mut elements = first.eval(store)?.elements;
                for part in parts {
                    let subtrahend = part.eval(store)?;
                    elements.retain(|e| !subtrahend.contains(e));
                }
                Ok(Category::new(elements))
            }
            CategoryExpr::Intersection(parts) => {
                let mut parts = parts.iter();
                let first = parts.next().expect("intersection has at least one operand");
                let mut elements = first.eval(store)?.elements;
                for part in parts {
                    let other = part.eval(store)?;
                    elements.retain(|e| other.contains(e));
                }
                Ok(Category::new(elements))
            }
            CategoryExpr::Literal(elements) => Ok(Category::new(elements.clone())),
            CategoryExpr::Name(name) => store.get(name).cloned(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn store_with(vowels: &[&str], front: &[&str]) -> CategoryStore {
        let mut store = CategoryStore::new();
        store.define("V", Category::named(vowels.iter().map(|s| s.to_string()).collect(), "V"));
        store.define("F", Category::named(front.iter().map(|s| s.to_string()).collect(), "F"));
        store
    }

    #[test]
    fn union_concatenates_with_duplicates() {
        let store = store_with(&["a", "e", "i"], &["e", "i"]);
        let expr = CategoryExpr::Union(vec![CategoryExpr::Name("V".into()), CategoryExpr::Name("F".into())]);
        let cat = expr.eval(&store).unwrap();
        assert_eq!(cat.elements(), &["a", "e", "i", "e", "i"]);
    }

    #[test]
    fn difference_removes_elements() {
        let store = store_with(&["a", "e", "i", "o", "u"], &["e", "i"]);
        let expr = CategoryExpr::Difference(vec![CategoryExpr::Name("V".into()), CategoryExpr::Name("F".into())]);
        let cat = expr.eval(&store).unwrap();
        assert_eq!(cat.elements(), &["a", "o", "u"]);
    }

    #[test]
    fn intersection_keeps_common_elements() {
        let store = store_with(&["a", "e", "i", "o", "u"], &["e", "i"]);
        let expr = CategoryExpr::Intersection(vec![CategoryExpr::Name("V".into()), CategoryExpr::Name("F".into())]);
        let cat = expr.eval(&store).unwrap();
        assert_eq!(cat.elements(), &["e", "i"]);
    }

    #[test]
    fn literal_list_is_direct() {
        let store = CategoryStore::new();
        let expr = CategoryExpr::Literal(vec!["p".into(), "t".into(), "k".into()]);
        let cat = expr.eval(&store).unwrap();
        assert_eq!(cat.elements(), &["p", "t", "k"]);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let store = CategoryStore::new();
        let expr = CategoryExpr::Name("X".into());
        assert!(matches!(expr.eval(&store), Err(CategoryError::UnknownName(n)) if n == "X"));
    }

    #[test]
    fn index_of_absent_element_errors() {
        let cat = Category::named(vec!["a".into(), "e".into()], "V");
        assert!(matches!(cat.index("o"), Err(CategoryError::NotInCategory { .. })));
    }
}
