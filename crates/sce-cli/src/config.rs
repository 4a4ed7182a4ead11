// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later AND MIT
//! The structured ruleset the driver consumes.
//!
//! `sce-core` and `sce-engine` only ever see already-built `Category`,
//! `Pattern`, `Rule`, and `RuleBlock` values; this module is where a
//! JSON/YAML document on disk becomes those values, via `serde` rather
//! than a bespoke rule-file parser.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use sce_core::word::GraphemeInventory;
use sce_engine::RuleBlock;

use crate::error::{CliError, CliResult};

/// A complete, already-structured sound-change ruleset: the grapheme
/// inventory and separator `sce_core::Word::parse` tokenises with, the
/// ordered rule blocks to run, and an optional RNG seed so the same
/// ruleset and seed always produce the same output for the `chance`
/// flag.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ruleset {
    /// Grapheme inventory entries, longest-match-first at tokenisation time.
    /// Defaults to the "every character is its own phone" wildcard
    /// inventory when omitted.
    #[serde(default = "default_graphemes")]
    pub graphemes: Vec<String>,
    /// Disambiguation separator inserted by `Word`'s `Display` impl and
    /// consumed (stripped) during tokenisation.
    #[serde(default)]
    pub separator: String,
    /// The rule blocks to run, in order, against every input word.
    pub blocks: Vec<RuleBlock>,
    /// Seed for the injected, per-run RNG backing the `chance` flag. Two
    /// runs with the same seed and ruleset produce identical output.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_graphemes() -> Vec<String> {
    vec!["*".to_string()]
}

impl Ruleset {
    pub fn grapheme_inventory(&self) -> GraphemeInventory {
        GraphemeInventory::new(self.graphemes.clone())
    }

    /// Loads a ruleset from a JSON or YAML file, dispatching on extension.
    /// An unrecognised extension is treated as JSON.
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text, path.extension().and_then(|ext| ext.to_str()).unwrap_or("json"))
    }

    pub fn parse(text: &str, extension: &str) -> CliResult<Self> {
        let ruleset: Self = match extension {
            "yaml" | "yml" => serde_yaml::from_str(text).map_err(CliError::from)?,
            _ => serde_json::from_str(text).map_err(CliError::from)?,
        };
        for block in &ruleset.blocks {
            block.validate()?;
        }
        Ok(ruleset)
    }
}
