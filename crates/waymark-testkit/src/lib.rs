//! # Waymark Testkit
//!
//! Shared helpers for the workspace's integration tests:
//!
//! - Fixtures: [`entry`], [`fresh`], [`stack_of`], [`destination_ids`]
//! - Deep links: [`RecordingHandler`] counts how often it resolves
//! - Scopes: [`CleanupCounter`] counts cleanup invocations
//! - Property testing: [`strategies`]
//! - Logging: [`init_tracing`]

#![allow(clippy::unwrap_used, clippy::expect_used)]

pub mod strategies;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use tracing_subscriber::EnvFilter;
use waymark_core::{
    BackStackEntry, DeepLinkHandler, NavigationCommand, NavigationScopeId, NavigationState,
};
use waymark_scope::ScopeRegistry;

// ============================================================================
// Logging
// ============================================================================

static TRACING: Once = Once::new();

/// Install a test-friendly fmt subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `warn` so passing runs stay quiet.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(false)
            .try_init();
    });
}

// ============================================================================
// Fixtures
// ============================================================================

/// Entry with the deterministic per-destination scope.
pub fn entry(destination_id: &str) -> BackStackEntry {
    BackStackEntry::shared(destination_id)
}

/// Entry with a random scope of its own.
pub fn fresh(destination_id: &str) -> BackStackEntry {
    BackStackEntry::new(destination_id)
}

/// State holding `ids` (root first) with per-destination scopes.
pub fn stack_of(ids: &[&str]) -> NavigationState {
    NavigationState::from_entries(ids.iter().map(|id| entry(id)).collect())
}

/// Destination ids of `state`, root first.
pub fn destination_ids(state: &NavigationState) -> Vec<String> {
    state
        .back_stack
        .iter()
        .map(|entry| entry.destination_id.clone())
        .collect()
}

// ============================================================================
// Deep links
// ============================================================================

/// Deep-link handler matching a URI prefix and recording `resolve` calls.
#[derive(Clone, Debug)]
pub struct RecordingHandler {
    prefix: String,
    commands: Vec<NavigationCommand>,
    calls: Arc<AtomicUsize>,
}

impl RecordingHandler {
    /// Match URIs starting with `prefix`, answering with `commands`.
    pub fn new(prefix: impl Into<String>, commands: Vec<NavigationCommand>) -> Self {
        Self {
            prefix: prefix.into(),
            commands,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared call counter; clone it before handing the handler away.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl DeepLinkHandler for RecordingHandler {
    fn matches(&self, uri: &str) -> bool {
        uri.starts_with(&self.prefix)
    }

    fn resolve(&self, _uri: &str) -> Vec<NavigationCommand> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.commands.clone()
    }
}

// ============================================================================
// Scopes
// ============================================================================

/// Counts cleanup callbacks.
#[derive(Clone, Debug, Default)]
pub struct CleanupCounter {
    count: Arc<AtomicUsize>,
}

impl CleanupCounter {
    /// Create a counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Cleanup callback that bumps this counter.
    pub fn hook<T: 'static>(&self) -> impl FnOnce(&T) + Send + 'static {
        let count = Arc::clone(&self.count);
        move |_: &T| {
            count.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Number of cleanups run so far
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

/// Store a `String` under `key` in the scope for `scope_id`, counting its cleanup.
pub fn fill_scope(
    registry: &ScopeRegistry,
    scope_id: &NavigationScopeId,
    key: &str,
    counter: &CleanupCounter,
) -> Arc<String> {
    registry
        .get_or_create_scope(scope_id)
        .get_or_create(key, || format!("{scope_id}/{key}"), counter.hook())
        .expect("fixture scope holds a String")
}
