// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: AGPL-3.0-or-later AND MIT
//! Errors at the driver boundary: reading/parsing a ruleset file and
//! tokenising the words it's applied to. Rule *non*-application
//! (`NoTargetsFound` and friends) is not an error here -- it's caught at
//! the `RuleBlock` boundary, same as everywhere else in the engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("failed to read ruleset file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("failed to parse ruleset as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse ruleset as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to tokenise word: {0}")]
    Word(#[from] sce_core::error::WordError),
    #[error("invalid flags in ruleset: {0}")]
    Flags(#[from] sce_engine::FlagsError),
}

pub type CliResult<T> = std::result::Result<T, CliError>;
