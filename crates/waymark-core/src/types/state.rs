//! Navigation state snapshot

use super::entry::BackStackEntry;
use super::scope_id::NavigationScopeId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Immutable back stack. The last entry is the active screen.
///
/// A state produced by `NavigationState::new` always holds at least one
/// entry. The only empty state is the placeholder returned when persisted
/// state cannot be read, which the host replaces with a fresh start entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    /// Entries from root (index 0) to top
    #[serde(default)]
    pub back_stack: Vec<BackStackEntry>,
}

impl NavigationState {
    /// Create a state holding only `root`.
    pub fn new(root: BackStackEntry) -> Self {
        Self {
            back_stack: vec![root],
        }
    }

    /// Build a state from a full stack, root first.
    pub fn from_entries(back_stack: Vec<BackStackEntry>) -> Self {
        Self { back_stack }
    }

    /// Empty placeholder used when persisted state is unreadable.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Active entry, if any.
    pub fn top(&self) -> Option<&BackStackEntry> {
        self.back_stack.last()
    }

    /// Bottom-most entry, if any.
    pub fn root(&self) -> Option<&BackStackEntry> {
        self.back_stack.first()
    }

    /// Number of entries on the stack.
    pub fn len(&self) -> usize {
        self.back_stack.len()
    }

    /// True for the unreadable-state placeholder.
    pub fn is_empty(&self) -> bool {
        self.back_stack.is_empty()
    }

    /// Whether a pop would change anything.
    pub fn can_go_back(&self) -> bool {
        self.back_stack.len() > 1
    }

    /// Whether any entry of `destination_id` is on the stack.
    pub fn contains_destination(&self, destination_id: &str) -> bool {
        self.back_stack
            .iter()
            .any(|entry| entry.destination_id == destination_id)
    }

    /// Whether any entry references `scope_id`.
    pub fn references_scope(&self, scope_id: &NavigationScopeId) -> bool {
        self.back_stack.iter().any(|entry| &entry.scope_id == scope_id)
    }

    /// Scope ids referenced by at least one entry.
    pub fn scope_ids(&self) -> HashSet<&NavigationScopeId> {
        self.back_stack.iter().map(|entry| &entry.scope_id).collect()
    }

    /// Scopes referenced by `self` that are no longer referenced by `next`.
    pub fn released_scopes(&self, next: &NavigationState) -> Vec<NavigationScopeId> {
        let retained = next.scope_ids();
        let mut released: Vec<NavigationScopeId> = Vec::new();
        for entry in &self.back_stack {
            if !retained.contains(&entry.scope_id) && !released.contains(&entry.scope_id) {
                released.push(entry.scope_id.clone());
            }
        }
        released
    }
}
