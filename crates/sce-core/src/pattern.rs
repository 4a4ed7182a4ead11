// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The pattern matcher: a closed sum-type [`Element`] tree, matched against
//! a [`crate::Word`] by recursive backtracking, threading a map of bound
//! category subscripts ([`CatIxMap`]) forward through the recursion.
//!
//! Ported from the reference recursive matcher (`patterns.py`). Matching
//! failure is internal control flow here (a private `Result<_, NoMatch>`),
//! never visible past the public, `Option`-returning [`Pattern::match_at`] --
//! mirroring the source's `MatchFailed` exception, which never escapes the
//! equivalent public `Pattern.match`.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

#[cfg(feature = "serde")]
use schemars::JsonSchema;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use sce_utils::FastMap;

use crate::category::Category;
use crate::error::{CategoryError, PatternError, PatternResult};
use crate::word::{Phone, Word, BOUNDARY};

/// Bound category subscripts, threaded through a match attempt. Cheap to
/// clone (typically a handful of entries); every update produces a new
/// map rather than mutating in place, the way the source's
/// `catixes | {...}` always builds a new dict.
pub type CatIxMap = FastMap<i32, usize>;

/// Where a match attempt is anchored: at a fixed start (searching forward)
/// or a fixed stop (searching backward). Exactly one of the two is ever
/// live at a time -- mirroring the source's `(start, stop)` pair where
/// exactly one is non-`None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start(usize),
    Stop(usize),
}

/// A successful match: the matched range and the catixes bound while
/// matching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub range: Range<usize>,
    pub catixes: CatIxMap,
}

/// Internal match failure. Never public -- see the module docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NoMatch;

type StepResult = Result<(usize, CatIxMap), NoMatch>;

fn advance(word_len: usize, length: usize, anchor: Anchor) -> Result<Anchor, NoMatch> {
    match anchor {
        Anchor::Start(start) => {
            if length <= word_len && start <= word_len - length {
                Ok(Anchor::Start(start + length))
            } else {
                Err(NoMatch)
            }
        }
        Anchor::Stop(stop) => {
            if length <= stop && stop <= word_len {
                Ok(Anchor::Stop(stop - length))
            } else {
                Err(NoMatch)
            }
        }
    }
}

fn get_index(word_len: usize, anchor: Anchor) -> Result<usize, NoMatch> {
    let index: isize = match anchor {
        Anchor::Start(start) => start as isize,
        Anchor::Stop(stop) => stop as isize - 1,
    };
    if index >= 0 && (index as usize) < word_len {
        Ok(index as usize)
    } else {
        Err(NoMatch)
    }
}

/// A single element of a [`Pattern`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, JsonSchema))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Element {
    /// A literal phone.
    Grapheme(Phone),
    /// `"` -- repeats the immediately preceding phone; never matches at
    /// index 0.
    Ditto,
    /// `[category]` or `[category]ₙ`. An unbound subscript binds to the
    /// matched phone's index in `category` on first match; a bound one
    /// must agree with the previously bound index.
    CategoryRef {
        category: Arc<Category>,
        subscript: Option<i32>,
    },
    /// `*`/`*?`/`**`/`**?`. Despite the name, this matches *one or more*
    /// phones (see the module docs on `wildcard_branch_match`): it always
    /// consumes at least one unit before the greedy/lazy choice of whether
    /// to consume another kicks in. `extended` allows it to consume the
    /// boundary phone; otherwise the boundary stops it.
    Wildcard { greedy: bool, extended: bool },
    /// `(pattern){n}` -- the inner pattern matched exactly `n` times in
    /// sequence (not greedy/lazy -- a fixed count).
    Repetition { pattern: Box<Pattern>, number: usize },
    /// `(pattern){*}`/`(pattern){*?}` -- one or more full matches of the
    /// inner pattern, with the same greedy/lazy backtracking as `Wildcard`.
    WildcardRepetition { pattern: Box<Pattern>, greedy: bool },
    /// `(pattern)`/`(pattern)?` -- zero or one match of the inner pattern.
    Optional { pattern: Box<Pattern>, greedy: bool },
    /// `%`/`<` -- a reference to the rule's target, resolved away by
    /// [`Pattern::resolve`] before matching ever begins. Encountering one
    /// during a match (i.e. an unresolved pattern) always fails, just as
    /// the source's base `Element.match` always raises `MatchFailed`.
    TargetRef { direction: i8 },
    /// `$` -- a syllable boundary marker. The source defines no match
    /// behaviour for it either; matching one always fails.
    SylBreak,
}

impl Element {
    fn is_branching(&self) -> bool {
        matches!(
            self,
            Element::Wildcard { .. }
                | Element::WildcardRepetition { .. }
                | Element::Optional { .. }
                | Element::Repetition { .. }
        )
    }

    /// Matches a single non-branching element at `anchor`.
    fn match_bare(&self, word: &Word, anchor: Anchor, catixes: CatIxMap) -> StepResult {
        match self {
            Element::Grapheme(grapheme) => {
                let index = get_index(word.len(), anchor)?;
                if word.get(index) == Some(grapheme) {
                    Ok((1, catixes))
                } else {
                    Err(NoMatch)
                }
            }
            Element::Ditto => {
                let index = get_index(word.len(), anchor)?;
                if index > 0 && word.get(index) == word.get(index - 1) {
                    Ok((1, catixes))
                } else {
                    Err(NoMatch)
                }
            }
            Element::CategoryRef { category, subscript } => {
                let index = get_index(word.len(), anchor)?;
                let phone = &word[index];
                match subscript {
                    None => {
                        if category.contains(phone) {
                            Ok((1, catixes))
                        } else {
                            Err(NoMatch)
                        }
                    }
                    Some(sub) => {
                        if let Some(&bound_ix) = catixes.get(sub) {
                            if category.get(bound_ix) == Some(phone) {
                                Ok((1, catixes))
                            } else {
                                Err(NoMatch)
                            }
                        } else if category.contains(phone) {
                            let ix = category.index(phone).map_err(|_: CategoryError| NoMatch)?;
                            let mut next = catixes;
                            next.insert(*sub, ix);
                            Ok((1, next))
                        } else {
                            Err(NoMatch)
                        }
                    }
                }
            }
            Element::SylBreak | Element::TargetRef { .. } => Err(NoMatch),
            Element::Wildcard { .. }
            | Element::Repetition { .. }
            | Element::WildcardRepetition { .. }
            | Element::Optional { .. } => {
                unreachable!("branching elements are dispatched via match_pattern")
            }
        }
    }

    /// Matches a branching element against the sliced-off `rest` of the
    /// enclosing pattern.
    fn match_pattern(&self, rest: &Pattern, word: &Word, anchor: Anchor, catixes: CatIxMap) -> StepResult {
        match self {
            Element::Repetition { pattern, number } => {
                repetition_match_pattern(pattern, *number, rest, word, anchor, catixes)
            }
            Element::WildcardRepetition { pattern, greedy } => {
                wildcard_branch_match(&WildcardKind::Pattern(pattern), *greedy, rest, word, anchor, catixes)
            }
            Element::Wildcard { greedy, extended } => {
                wildcard_branch_match(&WildcardKind::Phone { extended: *extended }, *greedy, rest, word, anchor, catixes)
            }
            Element::Optional { pattern, greedy } => optional_match_pattern(pattern, *greedy, rest, word, anchor, catixes),
            _ => unreachable!("match_pattern is only called on branching elements"),
        }
    }
}

fn wildcard_match_one(word: &Word, anchor: Anchor, extended: bool, catixes: CatIxMap) -> StepResult {
    let index = get_index(word.len(), anchor)?;
    if extended || word[index] != BOUNDARY {
        Ok((1, catixes))
    } else {
        Err(NoMatch)
    }
}

enum WildcardKind<'a> {
    Phone { extended: bool },
    Pattern(&'a Pattern),
}

fn wildcard_unit_match(kind: &WildcardKind<'_>, word: &Word, anchor: Anchor, catixes: CatIxMap) -> StepResult {
    match kind {
        WildcardKind::Phone { extended } => wildcard_match_one(word, anchor, *extended, catixes),
        WildcardKind::Pattern(inner) => inner.match_internal(word, anchor, catixes),
    }
}

/// One-or-more backtracking shared by `Wildcard` and `WildcardRepetition`:
/// consume one unit, then -- at the position just past it -- either try to
/// consume another (recursing) or stop and match `rest`, trying greedy's
/// preferred order first and falling back to the other on failure.
fn wildcard_branch_match(
    kind: &WildcardKind<'_>,
    greedy: bool,
    rest: &Pattern,
    word: &Word,
    anchor: Anchor,
    catixes: CatIxMap,
) -> StepResult {
    let (unit_len, catixes) = wildcard_unit_match(kind, word, anchor, catixes)?;
    let next_anchor = advance(word.len(), unit_len, anchor)?;

    let (extra_len, final_catixes) = if greedy {
        match wildcard_branch_match(kind, greedy, rest, word, next_anchor, catixes.clone()) {
            Ok(result) => result,
            Err(NoMatch) => rest.match_internal(word, next_anchor, catixes)?,
        }
    } else {
        match rest.match_internal(word, next_anchor, catixes.clone()) {
            Ok(result) => result,
            Err(NoMatch) => wildcard_branch_match(kind, greedy, rest, word, next_anchor, catixes)?,
        }
    };
    Ok((unit_len + extra_len, final_catixes))
}

fn repetition_match_pattern(
    inner: &Pattern,
    number: usize,
    rest: &Pattern,
    word: &Word,
    anchor: Anchor,
    mut catixes: CatIxMap,
) -> StepResult {
    let mut length = 0usize;
    for _ in 0..number {
        let next_anchor = advance(word.len(), length, anchor)?;
        let (inner_len, next_catixes) = inner.match_internal(word, next_anchor, catixes)?;
        length += inner_len;
        catixes = next_catixes;
    }
    let next_anchor = advance(word.len(), length, anchor)?;
    let (rest_len, final_catixes) = rest.match_internal(word, next_anchor, catixes)?;
    Ok((length + rest_len, final_catixes))
}

fn optional_match_pattern(
    inner: &Pattern,
    greedy: bool,
    rest: &Pattern,
    word: &Word,
    anchor: Anchor,
    catixes: CatIxMap,
) -> StepResult {
    let try_branch = |catixes: CatIxMap| -> StepResult {
        let (inner_len, catixes) = inner.match_internal(word, anchor, catixes)?;
        let next_anchor = advance(word.len(), inner_len, anchor)?;
        let (rest_len, final_catixes) = rest.match_internal(word, next_anchor, catixes)?;
        Ok((inner_len + rest_len, final_catixes))
    };
    let try_rest = |catixes: CatIxMap| -> StepResult { rest.match_internal(word, anchor, catixes) };

    if greedy {
        match try_branch(catixes.clone()) {
            Ok(result) => Ok(result),
            Err(NoMatch) => try_rest(catixes),
        }
    } else {
        match try_rest(catixes.clone()) {
            Ok(result) => Ok(result),
            Err(NoMatch) => try_branch(catixes),
        }
    }
}

/// An ordered sequence of [`Element`]s, matched as a unit.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, JsonSchema))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Pattern {
    elements: Vec<Element>,
}

impl Pattern {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The recursive matcher core. Walks the elements in the direction
    /// implied by `anchor` (forward from a start, backward from a stop),
    /// re-anchoring past whatever has matched so far at each step. The
    /// first branching element (`Wildcard`/`WildcardRepetition`/
    /// `Optional`/`Repetition`) takes over the remainder of the pattern
    /// and the loop stops, mirroring the source's `break` on
    /// `hasattr(element, 'match_pattern')`.
    fn match_internal(&self, word: &Word, anchor: Anchor, mut catixes: CatIxMap) -> StepResult {
        let n = self.elements.len();
        let order: Vec<usize> = match anchor {
            Anchor::Start(_) => (0..n).collect(),
            Anchor::Stop(_) => (0..n).rev().collect(),
        };

        let mut length = 0usize;
        for i in order {
            let element = &self.elements[i];
            let next_anchor = advance(word.len(), length, anchor)?;
            if element.is_branching() {
                let rest = match anchor {
                    Anchor::Start(_) => Pattern::new(self.elements[i + 1..].to_vec()),
                    Anchor::Stop(_) => Pattern::new(self.elements[..i].to_vec()),
                };
                let (branch_len, next_catixes) = element.match_pattern(&rest, word, next_anchor, catixes)?;
                length += branch_len;
                catixes = next_catixes;
                break;
            }
            let (elem_len, next_catixes) = element.match_bare(word, next_anchor, catixes)?;
            length += elem_len;
            catixes = next_catixes;
        }
        Ok((length, catixes))
    }

    /// Attempts to match this pattern against `word` anchored at `anchor`.
    /// A failed match is a normal, non-exceptional outcome -- `None`, not
    /// an error.
    pub fn match_at(&self, word: &Word, anchor: Anchor, catixes: Option<CatIxMap>) -> Option<Match> {
        let catixes = catixes.unwrap_or_default();
        match self.match_internal(word, anchor, catixes) {
            Ok((length, catixes)) => {
                let range = match anchor {
                    Anchor::Start(start) => start..start + length,
                    Anchor::Stop(stop) => stop.saturating_sub(length)..stop,
                };
                Some(Match { range, catixes })
            }
            Err(NoMatch) => None,
        }
    }

    /// Substitutes every [`Element::TargetRef`] with the target's phones
    /// (forward for `%`, reversed for `<`), recursing into the inner
    /// pattern of `Repetition`/`WildcardRepetition`/`Optional` elements.
    /// Must be applied before a pattern built from rule source is matched.
    pub fn resolve(&self, target: &[Phone]) -> Pattern {
        let mut elements = Vec::with_capacity(self.elements.len());
        for element in &self.elements {
            match element {
                Element::TargetRef { direction } => {
                    if *direction >= 0 {
                        elements.extend(target.iter().cloned().map(Element::Grapheme));
                    } else {
                        elements.extend(target.iter().rev().cloned().map(Element::Grapheme));
                    }
                }
                Element::Repetition { pattern, number } => elements.push(Element::Repetition {
                    pattern: Box::new(pattern.resolve(target)),
                    number: *number,
                }),
                Element::WildcardRepetition { pattern, greedy } => elements.push(Element::WildcardRepetition {
                    pattern: Box::new(pattern.resolve(target)),
                    greedy: *greedy,
                }),
                Element::Optional { pattern, greedy } => elements.push(Element::Optional {
                    pattern: Box::new(pattern.resolve(target)),
                    greedy: *greedy,
                }),
                other => elements.push(other.clone()),
            }
        }
        Pattern::new(elements)
    }

    /// Renders this (already-resolved) pattern to concrete phones, e.g. to
    /// build a substitution's replacement. `last_phone` seeds a leading
    /// [`Element::Ditto`]. Fails if an element can't be rendered: an
    /// unresolved [`Element::TargetRef`], an unbound
    /// [`Element::CategoryRef`] subscript, a [`Element::Wildcard`], or a
    /// [`Element::SylBreak`].
    pub fn as_phones(&self, last_phone: &Phone, catixes: &CatIxMap) -> PatternResult<Vec<Phone>> {
        let mut phones: Vec<Phone> = Vec::new();
        for elem in &self.elements {
            match elem {
                Element::Grapheme(g) => phones.push(g.clone()),
                Element::Ditto => {
                    let prev = phones.last().cloned().unwrap_or_else(|| last_phone.clone());
                    phones.push(prev);
                }
                Element::CategoryRef { category, subscript } => {
                    let sub = subscript.ok_or(PatternError::NotRepresentable)?;
                    let ix = *catixes
                        .get(&sub)
                        .ok_or(PatternError::Category(CategoryError::UnboundSubscript(sub)))?;
                    let phone = category.get(ix).ok_or(PatternError::NotRepresentable)?;
                    phones.push(phone.clone());
                }
                Element::Repetition { pattern, number } => {
                    for _ in 0..*number {
                        let seed = phones.last().cloned().unwrap_or_else(|| last_phone.clone());
                        let mut expanded = pattern.as_phones(&seed, catixes)?;
                        phones.append(&mut expanded);
                    }
                }
                Element::TargetRef { .. } => return Err(PatternError::UnresolvedTargetRef),
                _ => return Err(PatternError::NotRepresentable),
            }
        }
        Ok(phones)
    }
}

const ESCAPES: &str = "+-,>/!()[]{}?*\"\\$%<";

fn to_subscript_digits(n: i32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '0' => '₀',
            '1' => '₁',
            '2' => '₂',
            '3' => '₃',
            '4' => '₄',
            '5' => '₅',
            '6' => '₆',
            '7' => '₇',
            '8' => '₈',
            '9' => '₉',
            '-' => '₋',
            other => other,
        })
        .collect()
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Grapheme(g) => {
                if g.chars().count() == 1 && ESCAPES.contains(g.as_str()) {
                    write!(f, "\\{g}")
                } else {
                    write!(f, "{g}")
                }
            }
            Element::Ditto => write!(f, "\""),
            Element::CategoryRef { category, subscript } => {
                write!(f, "[{category}]")?;
                if let Some(sub) = subscript {
                    write!(f, "{}", to_subscript_digits(*sub))?;
                }
                Ok(())
            }
            Element::Wildcard { greedy, extended } => {
                write!(f, "{}{}", if *extended { "**" } else { "*" }, if *greedy { "" } else { "?" })
            }
            Element::Repetition { pattern, number } => write!(f, "({pattern}){{{number}}}"),
            Element::WildcardRepetition { pattern, greedy } => {
                write!(f, "({pattern}){}", if *greedy { "{*}" } else { "{*?}" })
            }
            Element::Optional { pattern, greedy } => write!(f, "({pattern}){}", if *greedy { "" } else { "?" }),
            Element::TargetRef { direction } => write!(f, "{}", if *direction >= 0 { "%" } else { "<" }),
            Element::SylBreak => write!(f, "$"),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.elements {
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::word::GraphemeInventory;

    fn word(s: &str) -> Word {
        Word::parse(s, GraphemeInventory::wildcard(), "").unwrap()
    }

    #[test]
    fn literal_grapheme_matches_forward() {
        let w = word("cat");
        let pattern = Pattern::new(vec![Element::Grapheme("c".into())]);
        let m = pattern.match_at(&w, Anchor::Start(1), None).unwrap();
        assert_eq!(m.range, 1..2);
    }

    #[test]
    fn anchored_start_and_stop_agree() {
        let w = word("cat");
        let pattern = Pattern::new(vec![Element::Grapheme("a".into())]);
        let forward = pattern.match_at(&w, Anchor::Start(2), None).unwrap();
        let backward = pattern.match_at(&w, Anchor::Stop(3), None).unwrap();
        assert_eq!(forward.range, backward.range);
    }

    #[test]
    fn ditto_never_matches_at_zero() {
        let w = word("a");
        let pattern = Pattern::new(vec![Element::Ditto]);
        assert!(pattern.match_at(&w, Anchor::Start(0), None).is_none());
    }

    #[test]
    fn category_subscript_binds_then_agrees() {
        let cat = Arc::new(Category::named(vec!["p".into(), "t".into(), "k".into()], "C"));
        let w = word("pp");
        let pattern = Pattern::new(vec![
            Element::CategoryRef { category: cat.clone(), subscript: Some(1) },
            Element::CategoryRef { category: cat, subscript: Some(1) },
        ]);
        let m = pattern.match_at(&w, Anchor::Start(1), None).unwrap();
        assert_eq!(m.range, 1..3);
        assert_eq!(m.catixes.get(&1), Some(&0));
    }

    #[test]
    fn category_subscript_disagreement_fails() {
        let cat = Arc::new(Category::named(vec!["p".into(), "t".into()], "C"));
        let w = word("pt");
        let pattern = Pattern::new(vec![
            Element::CategoryRef { category: cat.clone(), subscript: Some(1) },
            Element::CategoryRef { category: cat, subscript: Some(1) },
        ]);
        assert!(pattern.match_at(&w, Anchor::Start(1), None).is_none());
    }

    #[test]
    fn wildcard_requires_at_least_one_phone() {
        let w = word("a");
        // anchored right at the trailing boundary: no phone left to consume
        let pattern = Pattern::new(vec![Element::Wildcard { greedy: true, extended: false }]);
        assert!(pattern.match_at(&w, Anchor::Start(3), None).is_none());
    }

    #[test]
    fn greedy_wildcard_consumes_as_much_as_possible() {
        let w = word("aaa");
        let pattern = Pattern::new(vec![Element::Wildcard { greedy: true, extended: false }]);
        // #aaa# -> word length 5; start at 1 (first 'a'), stop before final '#'
        let m = pattern.match_at(&w, Anchor::Start(1), None).unwrap();
        assert_eq!(m.range, 1..4);
    }

    #[test]
    fn lazy_wildcard_consumes_as_little_as_possible() {
        let w = word("aaa");
        let pattern = Pattern::new(vec![
            Element::Wildcard { greedy: false, extended: false },
            Element::Grapheme("a".into()),
        ]);
        let m = pattern.match_at(&w, Anchor::Start(1), None).unwrap();
        // lazy wildcard takes the single leading 'a', leaving the literal to match the next
        assert_eq!(m.range, 1..3);
    }

    #[test]
    fn extended_wildcard_may_consume_boundary() {
        let w = word("a");
        let pattern = Pattern::new(vec![Element::Wildcard { greedy: true, extended: true }]);
        let m = pattern.match_at(&w, Anchor::Start(0), None).unwrap();
        assert_eq!(m.range, 0..3);
    }

    #[test]
    fn resolve_substitutes_target_ref_forward_and_reversed() {
        let target = vec!["p".to_string(), "t".to_string()];
        let forward = Pattern::new(vec![Element::TargetRef { direction: 1 }]).resolve(&target);
        assert_eq!(forward.elements(), &[Element::Grapheme("p".into()), Element::Grapheme("t".into())]);
        let backward = Pattern::new(vec![Element::TargetRef { direction: -1 }]).resolve(&target);
        assert_eq!(backward.elements(), &[Element::Grapheme("t".into()), Element::Grapheme("p".into())]);
    }

    #[test]
    fn as_phones_renders_ditto_from_previous_emitted_phone() {
        let pattern = Pattern::new(vec![Element::Grapheme("p".into()), Element::Ditto]);
        let phones = pattern.as_phones(&"x".to_string(), &CatIxMap::default()).unwrap();
        assert_eq!(phones, vec!["p".to_string(), "p".to_string()]);
    }

    #[test]
    fn as_phones_uses_last_phone_for_leading_ditto() {
        let pattern = Pattern::new(vec![Element::Ditto]);
        let phones = pattern.as_phones(&"x".to_string(), &CatIxMap::default()).unwrap();
        assert_eq!(phones, vec!["x".to_string()]);
    }

    #[test]
    fn as_phones_rejects_unbound_category_subscript() {
        let cat = Arc::new(Category::named(vec!["p".into()], "C"));
        let pattern = Pattern::new(vec![Element::CategoryRef { category: cat, subscript: Some(1) }]);
        assert!(pattern.as_phones(&"x".to_string(), &CatIxMap::default()).is_err());
    }

    #[test]
    fn as_phones_rejects_unresolved_target_ref() {
        let pattern = Pattern::new(vec![Element::TargetRef { direction: 1 }]);
        assert_eq!(
            pattern.as_phones(&"x".to_string(), &CatIxMap::default()),
            Err(PatternError::UnresolvedTargetRef)
        );
    }
}
