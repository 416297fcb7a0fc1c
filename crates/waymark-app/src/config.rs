//! Navigator configuration
//!
//! Layering order: defaults, then a TOML file, then `WAYMARK_*` environment
//! variables, then `validate`.
//!
//! ```toml
//! start_destination = "home"
//! start_args = '{"tab":"feed"}'
//! scope_strategy = "per_destination"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use waymark_core::{BackStackEntry, NavError, NavResult, ScopeStrategy};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "WAYMARK_";

/// Settings used to build a [`crate::Navigator`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Destination seeded when there is no usable state
    pub start_destination: String,
    /// Encoded arguments for the start destination
    pub start_args: Option<String>,
    /// How new entries get their scope id
    pub scope_strategy: ScopeStrategy,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            start_destination: "home".to_string(),
            start_args: None,
            scope_strategy: ScopeStrategy::default(),
        }
    }
}

impl NavigatorConfig {
    /// Parse TOML text on top of the defaults.
    pub fn from_toml_str(content: &str) -> NavResult<Self> {
        toml::from_str(content)
            .map_err(|e| NavError::config(format!("Invalid navigator config: {e}")))
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> NavResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NavError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `WAYMARK_*` overrides from the process environment.
    pub fn merge_with_env(&mut self) -> NavResult<()> {
        self.merge_with_vars(std::env::vars())
    }

    /// Apply overrides from `(name, value)` pairs, ignoring names without the prefix.
    pub fn merge_with_vars<I, K, V>(&mut self, vars: I) -> NavResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match name {
                "START_DESTINATION" => self.start_destination = value.into(),
                "START_ARGS" => {
                    let value = value.into();
                    self.start_args = (!value.is_empty()).then_some(value);
                }
                "SCOPE_STRATEGY" => self.scope_strategy = parse_strategy(&value.into())?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> NavResult<()> {
        if self.start_destination.trim().is_empty() {
            return Err(NavError::config("start_destination must not be empty"));
        }
        Ok(())
    }

    /// New entry for `destination_id` using the configured scope strategy.
    pub fn entry(&self, destination_id: &str) -> BackStackEntry {
        BackStackEntry::with_scope(destination_id, self.scope_strategy.scope_for(destination_id))
    }

    /// Entry seeded as the root when no state exists.
    pub fn start_entry(&self) -> BackStackEntry {
        let entry = self.entry(&self.start_destination);
        match &self.start_args {
            Some(args) => entry.with_args(args.clone()),
            None => entry,
        }
    }
}

fn parse_strategy(raw: &str) -> NavResult<ScopeStrategy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "per_entry" => Ok(ScopeStrategy::PerEntry),
        "per_destination" => Ok(ScopeStrategy::PerDestination),
        other => Err(NavError::config(format!("Unknown scope strategy '{other}'"))),
    }
}
