// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos for Knitli <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later AND MIT
//! End-to-end runs of six representative sound-change scenarios, driven
//! entirely through `sce-engine`/`sce-core` as a caller would use them (no
//! internal APIs).

use std::sync::Arc;

use sce::core::category::Category;
use sce::core::environment::Environment;
use sce::core::pattern::{Element, Pattern};
use sce::core::word::{GraphemeInventory, Word};
use sce::engine::predicate::{Predicate, SubstPredicate};
use sce::engine::rng::Rng;
use sce::engine::rule::{Rule, SoundChangeRule};
use sce::engine::target::Target;
use sce::engine::Flags;

fn word(s: &str) -> Word {
    Word::parse(s, GraphemeInventory::wildcard(), "").unwrap()
}

fn grapheme(s: &str) -> Element {
    Element::Grapheme(s.to_string())
}

/// The "always satisfied" conditions value: one group with no environments
/// to match, so `match_environments` is vacuously true.
fn no_conditions() -> Vec<Vec<Environment>> {
    vec![vec![]]
}

/// The "never triggers" exceptions value: zero groups, so
/// `match_environments` is `false` and no exception ever fires.
fn no_exceptions() -> Vec<Vec<Environment>> {
    vec![]
}

/// Scenario 1: unconditional substitution -- `a > e` applied to `"aba"`.
#[test]
fn simple_substitution() {
    let rule = Rule::new(
        vec![Target::new(Pattern::new(vec![grapheme("a")]))],
        vec![Predicate::Subst(SubstPredicate {
            replacements: vec![Pattern::new(vec![grapheme("e")])],
            conditions: no_conditions(),
            exceptions: no_exceptions(),
        })],
        Flags::default(),
    );
    let mut rng = Rng::from_seed(1);
    let result = rule.run(&word("aba"), &mut rng).unwrap();
    assert_eq!(result.phones(), &["#", "e", "b", "e", "#"]);
    assert_eq!(result.to_string(), "ebe");
}

/// Scenario 2: conditional substitution -- `a > o / p_` applied to `"papa"`.
/// Only an `a` preceded by `p` is replaced.
#[test]
fn conditional_substitution() {
    let rule = Rule::new(
        vec![Target::new(Pattern::new(vec![grapheme("a")]))],
        vec![Predicate::Subst(SubstPredicate {
            replacements: vec![Pattern::new(vec![grapheme("o")])],
            conditions: vec![vec![Environment::Local {
                left: Pattern::new(vec![grapheme("p")]),
                right: Pattern::new(vec![]),
            }]],
            exceptions: no_exceptions(),
        })],
        Flags::default(),
    );
    let mut rng = Rng::from_seed(1);
    let result = rule.run(&word("papa"), &mut rng).unwrap();
    assert_eq!(result.phones(), &["#", "p", "o", "p", "o", "#"]);
    assert_eq!(result.to_string(), "popo");
}

/// Scenario 3: a subscripted category deletes one of two identical vowels
/// -- `[V]1 > / _[V]1` applied to `"maa"`. The target's own subscript binds
/// on the first vowel it matches; the condition requires the *next* phone
/// to be that exact same category member, so only a vowel directly
/// followed by its own twin is deleted.
#[test]
fn category_subscript_deletes_repeated_vowel() {
    let vowels = Arc::new(Category::named(
        vec!["a".into(), "e".into(), "i".into(), "o".into(), "u".into()],
        "V",
    ));
    let target_pattern = Pattern::new(vec![Element::CategoryRef {
        category: vowels.clone(),
        subscript: Some(1),
    }]);
    let rule = Rule::new(
        vec![Target::new(target_pattern)],
        vec![Predicate::Subst(SubstPredicate {
            replacements: vec![Pattern::new(vec![])],
            conditions: vec![vec![Environment::Local {
                left: Pattern::new(vec![]),
                right: Pattern::new(vec![Element::CategoryRef {
                    category: vowels,
                    subscript: Some(1),
                }]),
            }]],
            exceptions: no_exceptions(),
        })],
        Flags::default(),
    );
    let mut rng = Rng::from_seed(1);
    let result = rule.run(&word("maa"), &mut rng).unwrap();
    assert_eq!(result.to_string(), "ma");
}

/// Scenario 4: a lazy wildcard that must still cross intervening phones --
/// `a*?d > X` applied to `"abcd"`.
#[test]
fn lazy_wildcard_crosses_required_phones() {
    let rule = Rule::new(
        vec![Target::new(Pattern::new(vec![
            grapheme("a"),
            Element::Wildcard { greedy: false, extended: false },
            grapheme("d"),
        ]))],
        vec![Predicate::Subst(SubstPredicate {
            replacements: vec![Pattern::new(vec![grapheme("X")])],
            conditions: no_conditions(),
            exceptions: no_exceptions(),
        })],
        Flags::default(),
    );
    let mut rng = Rng::from_seed(1);
    let result = rule.run(&word("abcd"), &mut rng).unwrap();
    assert_eq!(result.to_string(), "X");
}

/// Scenario 5: RTL ordering changes which overlapping match wins --
/// `aa > b` applied to `"aaa"`, with and without the `rtl` flag.
#[test]
fn rtl_flag_changes_overlap_resolution() {
    let base = |rtl: bool| {
        Rule::new(
            vec![Target::new(Pattern::new(vec![grapheme("a"), grapheme("a")]))],
            vec![Predicate::Subst(SubstPredicate {
                replacements: vec![Pattern::new(vec![grapheme("b")])],
                conditions: no_conditions(),
                exceptions: no_exceptions(),
            })],
            Flags { rtl, ..Flags::default() },
        )
    };

    let mut rng = Rng::from_seed(1);
    let ltr_result = base(false).run(&word("aaa"), &mut rng).unwrap();
    assert_eq!(ltr_result.to_string(), "ba");

    let mut rng = Rng::from_seed(1);
    let rtl_result = base(true).run(&word("aaa"), &mut rng).unwrap();
    assert_eq!(rtl_result.to_string(), "ab");
}

/// Scenario 6: block persistence -- `A: a > b persist: 2`, `B: b > c`, run
/// against `"a"`. By the end of the second outer pass, A has run once (on
/// the original `"a"`), B has run once (on A's output `"b"`), and A's
/// replay on B's output `"c"` does not match.
#[test]
fn block_persistence_interleaves_replays() {
    use sce::engine::block::{BlockMember, RuleBlock};

    let rule_a = Rule::new(
        vec![Target::new(Pattern::new(vec![grapheme("a")]))],
        vec![Predicate::Subst(SubstPredicate {
            replacements: vec![Pattern::new(vec![grapheme("b")])],
            conditions: no_conditions(),
            exceptions: no_exceptions(),
        })],
        Flags { persist: 2, ..Flags::default() },
    );
    let rule_b = Rule::new(
        vec![Target::new(Pattern::new(vec![grapheme("b")]))],
        vec![Predicate::Subst(SubstPredicate {
            replacements: vec![Pattern::new(vec![grapheme("c")])],
            conditions: no_conditions(),
            exceptions: no_exceptions(),
        })],
        Flags::default(),
    );
    let block = RuleBlock::new(
        "devoice-then-front",
        vec![BlockMember::Rule(rule_a), BlockMember::Rule(rule_b)],
        Flags::default(),
    );

    let mut rng = Rng::from_seed(1);
    let result = block.run(&word("a"), &mut rng).unwrap();
    assert_eq!(result.to_string(), "c");
}
