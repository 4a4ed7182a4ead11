// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Grapheme tokenisation and the [`Word`] value type.
//!
//! A [`Word`] is an ordered list of [`Phone`]s framed by a `#` boundary
//! phone at each end, together with the grapheme inventory and separator it
//! was tokenised with (needed to round-trip it back to a string). Ported
//! from the reference tokeniser (`words.py`): greedy longest-match parsing,
//! wildcard-aware `startswith`, and the rolling-ambiguity-window unparser.

use std::fmt;
use std::ops::{Index, Range};

use crate::error::{WordError, WordResult};

/// An opaque phone token. `"#"` is reserved for the word boundary.
pub type Phone = String;

/// The word-boundary phone.
pub const BOUNDARY: &str = "#";

/// An ordered grapheme inventory: pattern strings that may contain `*` as a
/// one-character wildcard. Matching always tries the longest pattern first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GraphemeInventory {
    graphemes: Vec<String>,
}

impl GraphemeInventory {
    pub fn new<I, S>(graphemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            graphemes: graphemes.into_iter().map(Into::into).collect(),
        }
    }

    /// The default inventory: a single wildcard grapheme that matches any
    /// one character, i.e. every character becomes its own phone.
    pub fn wildcard() -> Self {
        Self::new(["*"])
    }

    pub fn as_slice(&self) -> &[String] {
        &self.graphemes
    }

    /// Returns a copy of this inventory with the boundary grapheme `#`
    /// appended, as `Word::parse` stores on the instance for unparsing.
    pub fn with_boundary(&self) -> Self {
        let mut graphemes = self.graphemes.clone();
        graphemes.push(BOUNDARY.to_string());
        Self { graphemes }
    }

    /// Graphemes ordered longest-first, ties broken by original order,
    /// skipping empty entries. Used by the tokeniser.
    fn longest_first(&self) -> Vec<&str> {
        let mut graphs: Vec<&str> = self
            .graphemes
            .iter()
            .map(String::as_str)
            .filter(|g| !g.is_empty())
            .collect();
        graphs.sort_by_key(|g| std::cmp::Reverse(g.chars().count()));
        graphs
    }
}

/// An ordered sequence of phones, boundary-framed, with the grapheme
/// inventory and separator needed to render it back to a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    phones: Vec<Phone>,
    graphemes: GraphemeInventory,
    separator: String,
}

impl Word {
    /// Builds a word directly from already-tokenised phones.
    pub fn from_phones(phones: Vec<Phone>, graphemes: GraphemeInventory, separator: impl Into<String>) -> Self {
        Self {
            phones,
            graphemes,
            separator: separator.into(),
        }
    }

    /// Tokenises `string` into a boundary-framed `Word`.
    ///
    /// Runs of whitespace (including the word's own leading/trailing edges)
    /// become the boundary phone `#`; the rest is tokenised greedily against
    /// `graphemes`, longest grapheme first. The instance's stored inventory
    /// gains an explicit `#` entry (for unparsing); the *tokeniser* itself
    /// only recognises `#` if `graphemes` already matches it (e.g. via a
    /// `*` wildcard entry or an explicit `#`).
    pub fn parse(string: &str, graphemes: GraphemeInventory, separator: impl Into<String>) -> WordResult<Self> {
        let separator = separator.into();
        let framed = whitespace_to_boundary(string);
        let phones = tokenize(&framed, &graphemes, &separator)?;
        Ok(Self {
            phones,
            graphemes: graphemes.with_boundary(),
            separator,
        })
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn graphemes(&self) -> &GraphemeInventory {
        &self.graphemes
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn len(&self) -> usize {
        self.phones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phones.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Phone> {
        self.phones.get(index)
    }

    pub fn slice(&self, range: Range<usize>) -> &[Phone] {
        &self.phones[range]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Phone> {
        self.phones.iter()
    }

    /// Splices `replacement` into `range`, returning the resulting word.
    /// `range.start == range.end` is an insertion; the method never removes
    /// or rewrites phones outside `range`.
    pub fn replace(&self, range: Range<usize>, replacement: &[Phone]) -> Word {
        let mut phones = Vec::with_capacity(self.phones.len() - range.len() + replacement.len());
        phones.extend_from_slice(&self.phones[..range.start]);
        phones.extend_from_slice(replacement);
        phones.extend_from_slice(&self.phones[range.end..]);
        Word {
            phones,
            graphemes: self.graphemes.clone(),
            separator: self.separator.clone(),
        }
    }
}

impl Index<usize> for Word {
    type Output = Phone;

    fn index(&self, index: usize) -> &Phone {
        &self.phones[index]
    }
}

impl<'a> IntoIterator for &'a Word {
    type Item = &'a Phone;
    type IntoIter = std::slice::Iter<'a, Phone>;

    fn into_iter(self) -> Self::IntoIter {
        self.phones.iter()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = unparse(&self.phones, &self.graphemes, &self.separator);
        write!(f, "{}", rendered.replace(BOUNDARY, " ").trim())
    }
}

/// Replaces runs of whitespace -- including one implicitly added at each
/// end -- with the boundary phone, mirroring `re.sub(r'\s+', '#', f' {s} ')`.
fn whitespace_to_boundary(string: &str) -> String {
    let padded = format!(" {string} ");
    let mut out = String::with_capacity(padded.len());
    let mut in_run = false;
    for c in padded.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('#');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Greedy longest-match tokenisation against a grapheme inventory.
pub fn tokenize(string: &str, graphemes: &GraphemeInventory, separator: &str) -> WordResult<Vec<Phone>> {
    let graphs = graphemes.longest_first();
    let mut word = Vec::new();
    let mut rest = lstrip_sep(string, separator);
    while !rest.is_empty() {
        match graphs.iter().find(|g| startswith(rest, g, false)) {
            None => {
                let character = rest.chars().next().expect("rest is non-empty");
                let index = string.chars().count() - rest.chars().count();
                return Err(WordError {
                    character,
                    index,
                    word: string.to_string(),
                    graphemes: graphemes.as_slice().to_vec(),
                });
            }
            Some(&graph) => {
                let glen = graph.chars().count();
                let matched: String = rest.chars().take(glen).collect();
                let matched_len = matched.len();
                word.push(matched);
                rest = lstrip_sep(&rest[matched_len..], separator);
            }
        }
    }
    Ok(word)
}

/// Renders a phone sequence back to a string, inserting `separator` only
/// where adjacent phones would otherwise be ambiguous against the grapheme
/// inventory. Ported from `unparse` in the reference tokeniser.
pub fn unparse(word: &[Phone], graphemes: &GraphemeInventory, separator: &str) -> String {
    let inventory = graphemes.as_slice();
    let mut out = String::new();

    let monograph_only = inventory.iter().all(|g| g.chars().count() <= 1);
    let phones: &[Phone] = if monograph_only {
        out.push_str(&word.concat());
        &[]
    } else {
        word
    };

    let mut ambig: Vec<Phone> = Vec::new();
    for graph in phones {
        if !ambig.is_empty() {
            ambig.push(graph.clone());

            let mut reset_at = None;
            for i in 0..ambig.len() {
                let test: String = ambig[i..].concat();
                let minlength = ambig[i].chars().count();
                if inventory
                    .iter()
                    .any(|g| startswith(&test, g, false) && g.chars().count() > minlength)
                {
                    out.push_str(separator);
                    reset_at = Some(i);
                    break;
                }
            }
            if reset_at.is_some() {
                ambig = vec![graph.clone()];
            }

            let mut shrunk = false;
            for i in 0..ambig.len() {
                let test: String = ambig[i..].concat();
                if inventory.iter().any(|g| startswith(g, &test, true)) {
                    ambig = ambig[i..].to_vec();
                    shrunk = true;
                    break;
                }
            }
            if !shrunk {
                ambig.clear();
            }
        } else if inventory.iter().any(|g| startswith(g, graph, true)) {
            ambig.push(graph.clone());
        }
        out.push_str(graph);
    }

    out.trim_matches(|c: char| separator.contains(c) || c == '#').to_string()
}

/// Strips leading characters that belong to `separator`'s character set. A
/// no-op when `separator` is empty, matching `str.lstrip('')` in Python.
fn lstrip_sep<'a>(string: &'a str, separator: &str) -> &'a str {
    if separator.is_empty() {
        return string;
    }
    string.trim_start_matches(|c| separator.contains(c))
}

/// Wildcard-aware prefix test: `*` in either `string` or `prefix` matches
/// any single character at that position. `strict` additionally rejects an
/// exact-length match (used when testing whether one grapheme is a *proper*
/// prefix of another).
pub fn startswith(string: &str, prefix: &str, strict: bool) -> bool {
    let string_len = string.chars().count();
    let prefix_len = prefix.chars().count();
    if prefix_len > string_len {
        return false;
    }
    if strict && prefix_len == string_len {
        return false;
    }
    if !prefix.contains('*') && !string.contains('*') {
        return string.starts_with(prefix);
    }
    string
        .chars()
        .zip(prefix.chars())
        .all(|(sc, pc)| sc == '*' || pc == '*' || sc == pc)
}

/// Tokenises several strings with the same inventory and separator.
pub fn parse_words<'a, I>(words: I, graphemes: GraphemeInventory, separator: &str) -> WordResult<Vec<Word>>
where
    I: IntoIterator<Item = &'a str>,
{
    words
        .into_iter()
        .map(|w| Word::parse(w, graphemes.clone(), separator))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_simple_word() {
        let word = Word::parse("apple", GraphemeInventory::wildcard(), "").unwrap();
        assert_eq!(word.phones(), &["#", "a", "p", "p", "l", "e", "#"]);
    }

    #[test]
    fn boundary_framing_for_multiple_words() {
        let word = Word::parse("ab cd", GraphemeInventory::wildcard(), "").unwrap();
        assert_eq!(word.phones(), &["#", "a", "b", "#", "c", "d", "#"]);
    }

    #[test]
    fn longest_match_wins() {
        let inventory = GraphemeInventory::new(["t", "ts", "s"]);
        let word = Word::parse("ts", inventory, "").unwrap();
        assert_eq!(word.phones(), &["#", "ts", "#"]);
    }

    #[test]
    fn invalid_character_is_reported() {
        let inventory = GraphemeInventory::new(["a", "b"]);
        let err = Word::parse("abc", inventory, "").unwrap_err();
        assert_eq!(err.character, 'c');
    }

    #[test]
    fn round_trips_through_display() {
        let word = Word::parse("hello world", GraphemeInventory::wildcard(), "").unwrap();
        assert_eq!(word.to_string(), "hello world");
    }

    #[test]
    fn separator_breaks_ambiguous_digraphs() {
        let inventory = GraphemeInventory::new(["t", "s", "ts"]);
        let phones = vec!["#".to_string(), "t".to_string(), "s".to_string(), "#".to_string()];
        let with_boundary = inventory.with_boundary();
        let rendered = unparse(&phones, &with_boundary, ".");
        assert_eq!(rendered, "t.s");
    }

    #[test]
    fn wildcard_startswith_matches_any_char() {
        assert!(startswith("#", "*", false));
        assert!(!startswith("ab", "abc", false));
        assert!(startswith("ab", "ab", false));
        assert!(!startswith("ab", "ab", true));
    }
}
