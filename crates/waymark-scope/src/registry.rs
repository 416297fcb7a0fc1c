//! Scope registry with copy-on-write publication.
//!
//! # Concurrency & ordering
//!
//! * Readers load the current `Arc<HashMap>` snapshot through `ArcSwap` and
//!   never block.
//! * Writers are serialized by a `parking_lot::Mutex`, build a replacement map
//!   and publish it with a single store. A reader sees either the whole old
//!   map or the whole new one.
//! * Scope cleanup runs after the writer lock is released.

use crate::scope::NavigationScope;
use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use waymark_core::NavigationScopeId;

type ScopeMap = HashMap<NavigationScopeId, Arc<NavigationScope>>;

static GLOBAL: Lazy<Arc<ScopeRegistry>> = Lazy::new(|| Arc::new(ScopeRegistry::new()));

/// Mapping from scope id to live scope.
pub struct ScopeRegistry {
    scopes: ArcSwap<ScopeMap>,
    write_lock: Mutex<()>,
}

impl Default for ScopeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeRegistry {
    /// Create an empty, independent registry
    pub fn new() -> Self {
        Self {
            scopes: ArcSwap::from_pointee(HashMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Process-wide registry shared by navigators that are not given their own.
    pub fn global() -> Arc<ScopeRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// Existing scope for `id`, or a new empty one stored atomically.
    pub fn get_or_create_scope(&self, id: &NavigationScopeId) -> Arc<NavigationScope> {
        if let Some(scope) = self.scopes.load().get(id) {
            return Arc::clone(scope);
        }

        let _guard = self.write_lock.lock();
        let current = self.scopes.load_full();
        if let Some(scope) = current.get(id) {
            return Arc::clone(scope);
        }

        let scope = Arc::new(NavigationScope::new(id.clone()));
        let mut next = ScopeMap::clone(&current);
        next.insert(id.clone(), Arc::clone(&scope));
        self.scopes.store(Arc::new(next));

        tracing::trace!(scope = %id, "Created navigation scope");
        scope
    }

    /// Scope for `id` if one exists.
    pub fn get(&self, id: &NavigationScopeId) -> Option<Arc<NavigationScope>> {
        self.scopes.load().get(id).cloned()
    }

    /// Check if a scope exists for `id`
    pub fn contains(&self, id: &NavigationScopeId) -> bool {
        self.scopes.load().contains_key(id)
    }

    /// Number of live scopes
    pub fn len(&self) -> usize {
        self.scopes.load().len()
    }

    /// Check if no scope is live
    pub fn is_empty(&self) -> bool {
        self.scopes.load().is_empty()
    }

    /// Ids of all live scopes
    pub fn scope_ids(&self) -> Vec<NavigationScopeId> {
        self.scopes.load().keys().cloned().collect()
    }

    /// Remove the scope for `id` and run its cleanups.
    ///
    /// Returns `false` when no scope existed.
    pub fn clear_scope(&self, id: &NavigationScopeId) -> bool {
        let removed = {
            let _guard = self.write_lock.lock();
            let current = self.scopes.load_full();
            if !current.contains_key(id) {
                return false;
            }
            let mut next = ScopeMap::clone(&current);
            let removed = next.remove(id);
            self.scopes.store(Arc::new(next));
            removed
        };

        match removed {
            Some(scope) => {
                tracing::trace!(scope = %id, "Clearing navigation scope");
                scope.clear();
                true
            }
            None => false,
        }
    }

    /// Remove and clean up every scope.
    pub fn clear_all(&self) {
        let drained = {
            let _guard = self.write_lock.lock();
            self.scopes.swap(Arc::new(HashMap::new()))
        };

        tracing::debug!(scopes = drained.len(), "Clearing all navigation scopes");
        for scope in drained.values() {
            scope.clear();
        }
    }
}

impl fmt::Debug for ScopeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeRegistry")
            .field("scopes", &self.len())
            .finish()
    }
}
