//! sce - A sound-change engine: tokenisation, pattern matching, and rule
//! application for phonological transformation.
//!
//! This is the thin root crate; it re-exports the component crates.

pub use sce_core as core;
pub use sce_engine as engine;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
