// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later AND MIT
//! Per-rule/per-block behavioural flags.
//!
//! Ported from the reference `Flags` dataclass (`rules.py`). The reference
//! parses these out of a trailing `flag1; flag2: n; !flag3` clause in rule
//! source text; this crate has no rule-source grammar (see the crate's
//! Non-goals), so a [`Flags`] value is built directly (e.g. deserialized
//! from a structured config) and [`Flags::validate`] enforces the same
//! domain constraints `Flags.parse` did.

use std::fmt;

#[cfg(feature = "serde")]
use schemars::JsonSchema;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{FlagsError, FlagsResult};

/// `ignore`, `rtl`: plain booleans. `ditto`, `stop`: ternary (-1 = negated,
/// 0 = unset, 1 = set) -- negating a rule block's own `stop`/`ditto`
/// inverts how it composes with the *enclosing* block's run, which a plain
/// bool can't represent. `repeat`, `persist`: positive counts. `chance`:
/// a 1-100 probability threshold, not clamped at parse time in the
/// reference either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, JsonSchema))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Flags {
    pub ignore: bool,
    pub ditto: i8,
    pub stop: i8,
    pub rtl: bool,
    pub repeat: u32,
    pub persist: u32,
    pub chance: u32,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            ignore: false,
            ditto: 0,
            stop: 0,
            rtl: false,
            repeat: 1,
            persist: 1,
            chance: 100,
        }
    }
}

impl Flags {
    pub fn validate(&self) -> FlagsResult<()> {
        if self.repeat == 0 {
            return Err(FlagsError::NonPositiveRepeat(0));
        }
        if self.persist == 0 {
            return Err(FlagsError::NonPositivePersist(0));
        }
        for ternary in [self.ditto, self.stop] {
            if !(-1..=1).contains(&ternary) {
                return Err(FlagsError::InvalidTernary(ternary));
            }
        }
        Ok(())
    }
}

/// Mirrors `Flags.__str__` in `rules.py`: only flags differing from their
/// default are rendered, `;`-separated, ternaries as `flag`/`!flag`.
impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let defaults = Flags::default();
        let mut parts = Vec::new();
        if self.ignore {
            parts.push("ignore".to_string());
        }
        match self.ditto {
            1 => parts.push("ditto".to_string()),
            -1 => parts.push("!ditto".to_string()),
            _ => {}
        }
        match self.stop {
            1 => parts.push("stop".to_string()),
            -1 => parts.push("!stop".to_string()),
            _ => {}
        }
        if self.rtl {
            parts.push("rtl".to_string());
        }
        if self.repeat != defaults.repeat {
            parts.push(format!("repeat: {}", self.repeat));
        }
        if self.persist != defaults.persist {
            parts.push(format!("persist: {}", self.persist));
        }
        if self.chance != defaults.chance {
            parts.push(format!("chance: {}", self.chance));
        }
        write!(f, "{}", parts.join("; "))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_is_empty_for_default_flags() {
        assert_eq!(Flags::default().to_string(), "");
    }

    #[test]
    fn display_renders_non_default_flags() {
        let flags = Flags { rtl: true, chance: 50, ..Flags::default() };
        assert_eq!(flags.to_string(), "rtl; chance: 50");
    }

    #[test]
    fn display_renders_negated_ternaries() {
        let flags = Flags { ditto: -1, stop: 1, ..Flags::default() };
        assert_eq!(flags.to_string(), "!ditto; stop");
    }

    #[test]
    fn default_matches_reference_defaults() {
        let flags = Flags::default();
        assert_eq!(flags.repeat, 1);
        assert_eq!(flags.persist, 1);
        assert_eq!(flags.chance, 100);
        assert_eq!(flags.ditto, 0);
        assert_eq!(flags.stop, 0);
    }

    #[test]
    fn zero_repeat_is_invalid() {
        let flags = Flags { repeat: 0, ..Flags::default() };
        assert!(flags.validate().is_err());
    }

    #[test]
    fn out_of_range_ternary_is_invalid() {
        let flags = Flags { ditto: 2, ..Flags::default() };
        assert!(flags.validate().is_err());
    }

    #[test]
    fn valid_flags_pass() {
        let flags = Flags { ditto: -1, stop: 1, ..Flags::default() };
        assert!(flags.validate().is_ok());
    }
}
