//! Per-invocation state.
//!
//! A fresh `InvocationState` is built for every dispatch attempt (including
//! the retry after re-login) and dropped when the attempt ends.

use std::collections::BTreeMap;

/// Parsed options keyed by semantic name. Switches store `"true"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options(BTreeMap<String, String>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value; a repeated option keeps the last one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.get(name) == Some("true")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Default)]
pub struct InvocationState {
    /// Canonical name of the command being run
    pub command: String,
    /// Positional args, invalid tokens appended at the end
    pub args: Vec<String>,
    pub options: Options,
    pub invalid_arguments: Vec<String>,
    pub warnings: Vec<String>,
}

impl InvocationState {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            ..Default::default()
        }
    }
}
