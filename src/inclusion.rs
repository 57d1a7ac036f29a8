//! Inclusion rules for nodes and file entries.
//! Two independent gates: the optional+id toggle and the `only_if` equality predicate.

use crate::error::{Error, Result};
use crate::variables::Variables;
use std::collections::HashSet;

/// Set of component ids switched on for this run.
pub type EnabledIds = HashSet<String>;

/// Returns whether an entry with the given `optional` flag and `id` is included.
///
/// Entries are included unconditionally unless they are optional *and* carry
/// an id, in which case the id must be enabled.
pub fn should_include(optional: bool, id: Option<&str>, enabled: &EnabledIds) -> bool {
    match id {
        Some(id) if optional => enabled.contains(id),
        _ => true,
    }
}

/// A parsed `only_if: "key=value"` predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub key: String,
    pub value: String,
}

impl Condition {
    /// Parses a `key=value` predicate, splitting on the first `=`.
    ///
    /// # Errors
    /// * `Error::ConditionSyntaxError` if the predicate has no `=`
    pub fn parse(predicate: &str) -> Result<Self> {
        let (key, value) = predicate
            .split_once('=')
            .ok_or_else(|| Error::ConditionSyntaxError { predicate: predicate.to_string() })?;
        Ok(Self { key: key.trim().to_string(), value: value.trim().to_string() })
    }

    /// True when the variable bound to `key` equals `value` exactly.
    /// A missing key compares as the empty string.
    pub fn holds(&self, vars: &Variables) -> bool {
        vars.get(&self.key).unwrap_or_default() == self.value
    }
}

/// Evaluates an optional `only_if` predicate. Absence always passes.
pub fn condition_passes(only_if: Option<&str>, vars: &Variables) -> Result<bool> {
    match only_if {
        None => Ok(true),
        Some(predicate) => Ok(Condition::parse(predicate)?.holds(vars)),
    }
}
