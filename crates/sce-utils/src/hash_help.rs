// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Hash map and set aliases used throughout the sce crates.
//!
//! The engine applies rules to one word at a time on a single thread (see the
//! concurrency model in `sce-engine`), so unlike a multi-reader AST cache
//! there's no need for a concurrent map here -- `FastMap`/`FastSet` are plain
//! [`rapidhash::RapidHashMap`]/[`rapidhash::RapidHashSet`] aliases, using
//! [`rapidhash::fast::RandomState`] in place of the default SipHash builder.

use rapidhash::fast::RandomState;

/// A type alias for [`rapidhash::RapidHashMap`].
pub type FastMap<K, V> = rapidhash::RapidHashMap<K, V>;
/// A type alias for [`rapidhash::RapidHashSet`].
pub type FastSet<T> = rapidhash::RapidHashSet<T>;

/// Creates a new `FastMap` with the specified capacity.
#[inline(always)]
#[must_use]
pub fn map_with_capacity<K, V>(capacity: usize) -> FastMap<K, V>
where
    K: std::hash::Hash + Eq,
{
    FastMap::with_capacity_and_hasher(capacity, RandomState::default())
}

/// Creates a new `FastSet` with the specified capacity.
#[inline(always)]
#[must_use]
pub fn set_with_capacity<T>(capacity: usize) -> FastSet<T>
where
    T: std::hash::Hash + Eq,
{
    FastSet::with_capacity_and_hasher(capacity, RandomState::default())
}

/// Returns a new `FastMap` with default values.
#[inline(always)]
#[must_use]
pub fn get_map<K, V>() -> FastMap<K, V> {
    FastMap::default()
}

/// Returns a new `FastSet` with default values.
#[inline(always)]
#[must_use]
pub fn get_set<T>() -> FastSet<T> {
    FastSet::default()
}
