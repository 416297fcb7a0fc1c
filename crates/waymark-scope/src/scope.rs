//! A single navigation scope
//!
//! Holds type-erased instances keyed by string plus the cleanup callbacks
//! registered for them. Reads go through an `ArcSwap` snapshot and never
//! block; inserts and `clear` take a short writer lock. Factories and
//! cleanup callbacks always run outside that lock, so they may freely touch
//! this scope or the registry.

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use waymark_core::{NavError, NavResult, NavigationScopeId};

type Instance = Arc<dyn Any + Send + Sync>;
type Cleanup = Box<dyn FnOnce() + Send>;

/// Registered cleanups, in registration order, one per key.
#[derive(Default)]
struct Cleanups {
    entries: Vec<(String, Cleanup)>,
}

/// Lifecycle-scoped instance container.
pub struct NavigationScope {
    id: NavigationScopeId,
    instances: ArcSwap<HashMap<String, Instance>>,
    cleanups: Mutex<Cleanups>,
}

impl NavigationScope {
    /// Create an empty scope
    pub fn new(id: NavigationScopeId) -> Self {
        Self {
            id,
            instances: ArcSwap::from_pointee(HashMap::new()),
            cleanups: Mutex::new(Cleanups::default()),
        }
    }

    /// Scope identifier
    pub fn id(&self) -> &NavigationScopeId {
        &self.id
    }

    /// Return the instance stored at `key`, creating it with `factory` if absent.
    ///
    /// `on_cleared` is registered only when this call stores a new instance,
    /// so calling this repeatedly for one key registers exactly one cleanup.
    /// If two callers race on the same key, the first stored instance wins and
    /// the loser's value is dropped without its cleanup ever being registered.
    pub fn get_or_create<T, F, C>(&self, key: &str, factory: F, on_cleared: C) -> NavResult<Arc<T>>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
        C: FnOnce(&T) + Send + 'static,
    {
        if let Some(existing) = self.get::<T>(key)? {
            return Ok(existing);
        }

        let created = Arc::new(factory());

        let mut cleanups = self.cleanups.lock();
        let current = self.instances.load_full();
        if let Some(existing) = current.get(key) {
            return downcast(key, Arc::clone(existing));
        }

        let mut next = HashMap::clone(&current);
        next.insert(key.to_string(), Arc::clone(&created) as Instance);
        self.instances.store(Arc::new(next));

        let held = Arc::clone(&created);
        cleanups
            .entries
            .push((key.to_string(), Box::new(move || on_cleared(&held))));
        drop(cleanups);

        tracing::trace!(scope = %self.id, key, "Created scoped instance");
        Ok(created)
    }

    /// Look up an existing instance without creating one.
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> NavResult<Option<Arc<T>>> {
        match self.instances.load().get(key) {
            Some(instance) => downcast(key, Arc::clone(instance)).map(Some),
            None => Ok(None),
        }
    }

    /// Check if an instance is stored at `key`
    pub fn contains(&self, key: &str) -> bool {
        self.instances.load().contains_key(key)
    }

    /// Number of stored instances
    pub fn len(&self) -> usize {
        self.instances.load().len()
    }

    /// Check if the scope holds no instances
    pub fn is_empty(&self) -> bool {
        self.instances.load().is_empty()
    }

    /// Run every registered cleanup once, in registration order, then drop all instances.
    ///
    /// A second `clear` finds nothing registered and does nothing. The
    /// registry forgets a scope before clearing it, so instances stored later
    /// through a retained handle are never cleaned up; look scopes up per use.
    pub fn clear(&self) {
        let drained = {
            let mut cleanups = self.cleanups.lock();
            self.instances.store(Arc::new(HashMap::new()));
            std::mem::take(&mut cleanups.entries)
        };

        if !drained.is_empty() {
            tracing::trace!(scope = %self.id, cleanups = drained.len(), "Clearing scope");
        }
        for (_key, cleanup) in drained {
            cleanup();
        }
    }
}

fn downcast<T: Any + Send + Sync>(key: &str, instance: Instance) -> NavResult<Arc<T>> {
    instance
        .downcast::<T>()
        .map_err(|_| NavError::scope_type_mismatch(key, type_name::<T>()))
}

impl fmt::Debug for NavigationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.instances.load().keys().cloned().collect();
        f.debug_struct("NavigationScope")
            .field("id", &self.id)
            .field("keys", &keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scope() -> NavigationScope {
        NavigationScope::new(NavigationScopeId::for_destination("details"))
    }

    #[test]
    fn test_get_or_create_reuses_instance() {
        let scope = scope();
        let made = AtomicUsize::new(0);

        let a = scope
            .get_or_create(
                "counter",
                || {
                    made.fetch_add(1, Ordering::SeqCst);
                    5u32
                },
                |_| {},
            )
            .unwrap();
        let b = scope
            .get_or_create(
                "counter",
                || {
                    made.fetch_add(1, Ordering::SeqCst);
                    9u32
                },
                |_| {},
            )
            .unwrap();

        assert_eq!(*a, 5);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(made.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cleanup_registered_once_per_key() {
        let scope = scope();
        let cleared = Arc::new(AtomicUsize::new(0));

        for _ in 0..5 {
            let cleared = cleared.clone();
            scope
                .get_or_create("vm", || String::from("state"), move |_| {
                    cleared.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
        }

        scope.clear();
        assert_eq!(cleared.load(Ordering::SeqCst), 1);
        assert!(scope.is_empty());

        scope.clear();
        assert_eq!(cleared.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cleanup_order_and_value() {
        let scope = scope();
        let log = Arc::new(Mutex::new(Vec::new()));

        for (key, value) in [("first", 1u8), ("second", 2u8), ("third", 3u8)] {
            let log = log.clone();
            scope
                .get_or_create(key, move || value, move |v: &u8| log.lock().push(*v))
                .unwrap();
        }

        scope.clear();
        assert_eq!(*log.lock(), vec![1, 2, 3]);
    }

    #[test]
    fn test_type_mismatch() {
        let scope = scope();
        scope.get_or_create("vm", || 1u32, |_| {}).unwrap();

        let err = scope.get_or_create("vm", || "nope", |_| {}).unwrap_err();
        assert!(matches!(err, NavError::ScopeTypeMismatch { .. }));
        assert!(scope.get::<String>("vm").is_err());
        assert_eq!(scope.get::<u32>("vm").unwrap().as_deref(), Some(&1));
    }

    #[test]
    fn test_factory_may_reenter_scope() {
        let scope = scope();
        let outer = scope
            .get_or_create(
                "outer",
                || {
                    let inner = scope.get_or_create("inner", || 2u32, |_| {}).unwrap();
                    *inner * 10
                },
                |_| {},
            )
            .unwrap();

        assert_eq!(*outer, 20);
        assert_eq!(scope.len(), 2);
    }
}
