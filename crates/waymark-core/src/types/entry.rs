//! Back-stack entries

use super::scope_id::NavigationScopeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Payload delivered to an entry when a screen above it pops with a result.
///
/// Kept as untyped JSON; decoding is up to the destination that asked for it.
pub type ResultPayload = serde_json::Value;

/// One record on the back stack.
///
/// Entries are value objects. Every "change" returns a new entry, the
/// original is never touched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackStackEntry {
    /// Stable destination identifier (persisted, so never rename one)
    pub destination_id: String,
    /// Opaque encoded arguments owned by the destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
    /// Scope whose instances live as long as this entry is on the stack
    pub scope_id: NavigationScopeId,
    /// Result key this entry waits on when it is popped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_result_key: Option<String>,
    /// Results delivered to this entry, keyed by result key
    #[serde(default)]
    pub results: BTreeMap<String, ResultPayload>,
}

impl BackStackEntry {
    /// Create an entry with a fresh random scope.
    pub fn new(destination_id: impl Into<String>) -> Self {
        Self::with_scope(destination_id, NavigationScopeId::random())
    }

    /// Create an entry whose scope is shared with other entries of the same destination.
    pub fn shared(destination_id: impl Into<String>) -> Self {
        let destination_id = destination_id.into();
        let scope_id = NavigationScopeId::for_destination(&destination_id);
        Self::with_scope(destination_id, scope_id)
    }

    /// Create an entry with an explicit scope id.
    pub fn with_scope(destination_id: impl Into<String>, scope_id: NavigationScopeId) -> Self {
        Self {
            destination_id: destination_id.into(),
            args: None,
            scope_id,
            pending_result_key: None,
            results: BTreeMap::new(),
        }
    }

    /// Copy with encoded arguments attached.
    #[must_use]
    pub fn with_args(mut self, args: impl Into<String>) -> Self {
        self.args = Some(args.into());
        self
    }

    /// Copy that expects a result under `key` once it is popped.
    #[must_use]
    pub fn expecting_result(mut self, key: impl Into<String>) -> Self {
        self.pending_result_key = Some(key.into());
        self
    }

    /// Copy with `payload` stored under `key`, replacing any earlier value.
    #[must_use]
    pub fn with_result(&self, key: impl Into<String>, payload: ResultPayload) -> Self {
        let mut results = self.results.clone();
        results.insert(key.into(), payload);
        Self {
            results,
            ..self.clone()
        }
    }

    /// Look up a delivered result.
    pub fn result(&self, key: &str) -> Option<&ResultPayload> {
        self.results.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_result_copies() {
        let original = BackStackEntry::shared("home");
        let updated = original.with_result("pick", json!(7));

        assert!(original.results.is_empty());
        assert_eq!(updated.result("pick"), Some(&json!(7)));
        assert_eq!(updated.scope_id, original.scope_id);
    }

    #[test]
    fn test_with_result_overwrites_key() {
        let entry = BackStackEntry::shared("home")
            .with_result("pick", json!("a"))
            .with_result("other", json!(true))
            .with_result("pick", json!("b"));

        assert_eq!(entry.results.len(), 2);
        assert_eq!(entry.result("pick"), Some(&json!("b")));
    }

    #[test]
    fn test_serialized_field_names() {
        let entry = BackStackEntry::shared("details")
            .with_args("{\"id\":3}")
            .expecting_result("color");
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["destinationId"], "details");
        assert_eq!(value["scopeId"], "entry:details");
        assert_eq!(value["pendingResultKey"], "color");
        assert_eq!(value["args"], "{\"id\":3}");
    }
}
