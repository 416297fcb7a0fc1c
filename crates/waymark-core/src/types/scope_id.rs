//! Scope identifiers
//!
//! A scope id ties lifecycle-scoped instances to back-stack membership. Two
//! flavours exist: ids derived from the destination (shared by every
//! navigation to that destination) and random ids (one per navigation).

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const SCOPE_PREFIX: &str = "entry:";

/// Opaque identifier of a navigation scope.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationScopeId(String);

impl NavigationScopeId {
    /// Wrap an already formatted scope id (e.g. one read back from storage).
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Deterministic id shared by every entry of `destination_id`.
    pub fn for_destination(destination_id: &str) -> Self {
        Self(format!("{SCOPE_PREFIX}{destination_id}"))
    }

    /// Fresh random id, unique to one navigation.
    pub fn random() -> Self {
        Self(format!("{SCOPE_PREFIX}{}", Uuid::new_v4()))
    }

    /// Get the raw string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NavigationScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NavigationScopeId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// How new entries pick their scope id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeStrategy {
    /// Every navigation gets its own random scope
    #[default]
    PerEntry,
    /// Entries of the same destination share one scope
    PerDestination,
}

impl ScopeStrategy {
    /// Produce a scope id for an entry of `destination_id`.
    pub fn scope_for(&self, destination_id: &str) -> NavigationScopeId {
        match self {
            ScopeStrategy::PerEntry => NavigationScopeId::random(),
            ScopeStrategy::PerDestination => NavigationScopeId::for_destination(destination_id),
        }
    }
}
