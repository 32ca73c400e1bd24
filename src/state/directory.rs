use crate::state::{canonical_name, State};
use serde::Serialize;
use std::collections::HashMap;

/// All states from one build, keyed by canonical name
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct StateDirectory {
    states: HashMap<String, State>,
}

impl StateDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record under its own name, returning any record it replaced
    pub fn insert(&mut self, state: State) -> Option<State> {
        self.states.insert(state.name().to_string(), state)
    }

    /// Exact lookup by canonical name
    pub fn get(&self, name: &str) -> Option<&State> {
        self.states.get(name)
    }

    /// Lookup that tolerates case and spacing differences in user input
    pub fn find(&self, query: &str) -> Option<&State> {
        self.states.get(&canonical_name(query))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Names in alphabetical order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.states.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Records in alphabetical order of name
    pub fn sorted(&self) -> Vec<&State> {
        let mut states: Vec<&State> = self.states.values().collect();
        states.sort_by(|a, b| a.name().cmp(b.name()));
        states
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &State)> {
        self.states.iter().map(|(k, v)| (k.as_str(), v))
    }
}
