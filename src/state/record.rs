use crate::state::AbbreviationTable;
use crate::VoteError;
use serde::Serialize;
use std::fmt;

/// A validated per-state record
///
/// Built once per state during a directory build and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct State {
    name: String,
    state_url: String,
    covid_url: String,
    election_url: String,
    abbreviation: String,
}

impl State {
    /// Creates a record, resolving the abbreviation from `abbreviations`
    ///
    /// # Errors
    ///
    /// `VoteError::UnknownState` if `name` is not in the table.
    pub fn new(
        name: impl Into<String>,
        state_url: impl Into<String>,
        covid_url: impl Into<String>,
        election_url: impl Into<String>,
        abbreviations: &AbbreviationTable,
    ) -> Result<Self, VoteError> {
        let name = name.into();
        let abbreviation = abbreviations
            .lookup(&name)
            .ok_or_else(|| VoteError::UnknownState { name: name.clone() })?
            .to_string();

        Ok(Self {
            name,
            state_url: state_url.into(),
            covid_url: covid_url.into(),
            election_url: election_url.into(),
            abbreviation,
        })
    }

    /// Canonical lowercase name, e.g. `new york`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The state's page on the source site
    pub fn state_url(&self) -> &str {
        &self.state_url
    }

    /// The state's section of the COVID-19 page
    pub fn covid_url(&self) -> &str {
        &self.covid_url
    }

    /// The state election authority's own site
    pub fn election_url(&self) -> &str {
        &self.election_url
    }

    /// Two-letter postal code
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "==================")?;
        writeln!(f, "{}", self.state_url)?;
        writeln!(f, "{}", self.covid_url)?;
        write!(f, "{}", self.election_url)
    }
}
