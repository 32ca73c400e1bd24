//! Per-state records and the directory that holds them
//!
//! This module defines the typed output of a build:
//! - `State`: one validated record per state
//! - `StateDirectory`: normalized name → `State`
//! - `AbbreviationTable`: normalized name → two-letter code

mod abbreviations;
mod directory;
mod record;

pub use abbreviations::AbbreviationTable;
pub use directory::StateDirectory;
pub use record::State;

/// Lowercases a state name and collapses runs of whitespace to one space
///
/// This is the key form used by the directory and the abbreviation table.
pub fn canonical_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turns a canonical name into its fragment form (`new york` → `new-york`)
pub fn slug(name: &str) -> String {
    name.replace(' ', "-")
}
