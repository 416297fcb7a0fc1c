//! StateCell<T> - A published value with change notifications
//!
//! The navigator publishes every new `NavigationState` through a
//! `StateCell`. Readers load an `Arc` snapshot without taking a lock; the
//! single writer swaps in a whole new snapshot and bumps the version.
//!
//! # Example
//!
//! ```rust,ignore
//! let cell = StateCell::new(0);
//! let mut sub = cell.subscribe();
//!
//! cell.set(1);
//! assert_eq!(*cell.get(), 1);
//! assert_eq!(sub.poll().as_deref(), Some(&1));
//! assert_eq!(sub.poll(), None);
//! ```

use arc_swap::ArcSwap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

struct StateCellInner<T> {
    value: ArcSwap<T>,
    /// Incremented on each publish.
    version: AtomicU64,
}

/// Lock-free published snapshot.
///
/// Cloning a `StateCell` shares the underlying value.
pub struct StateCell<T> {
    inner: Arc<StateCellInner<T>>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + Sync + 'static> StateCell<T> {
    /// Create a cell holding `value` at version 0.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(StateCellInner {
                value: ArcSwap::from_pointee(value),
                version: AtomicU64::new(0),
            }),
        }
    }

    /// Current snapshot.
    pub fn get(&self) -> Arc<T> {
        self.inner.value.load_full()
    }

    /// Number of publishes so far.
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Acquire)
    }

    /// Publish a new value.
    pub fn set(&self, value: T) {
        self.set_arc(Arc::new(value));
    }

    /// Publish an already shared snapshot.
    pub fn set_arc(&self, value: Arc<T>) {
        self.inner.value.store(value);
        self.inner.version.fetch_add(1, Ordering::Release);
    }

    /// Subscribe to changes published after this call.
    pub fn subscribe(&self) -> StateSubscription<T> {
        StateSubscription {
            source: Arc::clone(&self.inner),
            last_version: self.inner.version.load(Ordering::Acquire),
        }
    }
}

impl<T: fmt::Debug + Send + Sync + 'static> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("value", &self.get())
            .field("version", &self.version())
            .finish()
    }
}

/// Poll-based subscription to a [`StateCell`].
///
/// Runtime agnostic: a render loop polls once per frame, an async adapter can
/// poll from a task.
pub struct StateSubscription<T> {
    source: Arc<StateCellInner<T>>,
    last_version: u64,
}

impl<T: Send + Sync + 'static> StateSubscription<T> {
    /// Check if the cell was published since the last poll.
    pub fn has_changed(&self) -> bool {
        self.source.version.load(Ordering::Acquire) > self.last_version
    }

    /// Latest snapshot if anything was published since the last poll.
    pub fn poll(&mut self) -> Option<Arc<T>> {
        let current_version = self.source.version.load(Ordering::Acquire);
        if current_version > self.last_version {
            self.last_version = current_version;
            Some(self.source.value.load_full())
        } else {
            None
        }
    }

    /// Current snapshot regardless of whether it changed.
    pub fn get(&self) -> Arc<T> {
        self.source.value.load_full()
    }

    /// Last version this subscription observed.
    pub fn last_observed_version(&self) -> u64 {
        self.last_version
    }
}
