//! # Navigator
//!
//! The facade the render layer talks to. Every mutating call runs the same
//! pipeline:
//! ```text
//! old state → reduce → scope diff (old − new) → clear_scope → publish
//! ```
//! Scope cleanup happens synchronously inside the transition that removed
//! the last entry referencing the scope, never later.
//!
//! `dispatch` is meant for one logical owner. Reads (`state`, `subscribe`,
//! scope lookups) are lock-free and may run on any thread, but two threads
//! dispatching at once can lose an update.

use crate::config::NavigatorConfig;
use crate::reactive::{StateCell, StateSubscription};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use waymark_core::{
    reduce, BackStackEntry, DeepLinkHandler, DeepLinkManager, NavDirection, NavResult,
    NavigateOptions, NavigationCommand, NavigationScopeId, NavigationState, ResultPayload,
};
use waymark_scope::{NavigationScope, ScopeRegistry};

/// Outcome of one dispatched command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// State before the command
    pub previous: Arc<NavigationState>,
    /// State after the command (already published)
    pub current: Arc<NavigationState>,
    /// Push if the stack grew, Pop otherwise
    pub direction: NavDirection,
    /// Scopes cleared because no entry references them anymore
    pub released_scopes: Vec<NavigationScopeId>,
}

impl Transition {
    /// Check if the command changed the stack
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Back-stack controller wiring the reducer, scope registry and deep links together.
pub struct Navigator {
    state: StateCell<NavigationState>,
    forward: AtomicBool,
    scopes: Arc<ScopeRegistry>,
    deep_links: DeepLinkManager,
    config: NavigatorConfig,
}

impl Navigator {
    /// Create a navigator over `initial`, using the process-wide scope registry.
    pub fn new(initial: NavigationState) -> Self {
        Self {
            state: StateCell::new(initial),
            forward: AtomicBool::new(true),
            scopes: ScopeRegistry::global(),
            deep_links: DeepLinkManager::new(),
            config: NavigatorConfig::default(),
        }
    }

    /// Create a navigator seeded with the configured start destination.
    pub fn from_config(config: NavigatorConfig) -> NavResult<Self> {
        config.validate()?;
        let initial = NavigationState::new(config.start_entry());
        Ok(Self::new(initial).with_config(config))
    }

    /// Restore persisted state, falling back to the start destination.
    ///
    /// Corrupt input and a restored-but-empty stack both end up as a fresh
    /// stack holding only the configured start entry.
    pub fn restore_or_start(raw: &str, config: NavigatorConfig) -> NavResult<Self> {
        config.validate()?;
        let restored = NavigationState::restore(raw);
        let initial = if restored.is_empty() {
            tracing::info!(
                start = %config.start_destination,
                "No usable navigation state, starting fresh"
            );
            NavigationState::new(config.start_entry())
        } else {
            restored
        };
        Ok(Self::new(initial).with_config(config))
    }

    /// Use a dedicated scope registry instead of the global one.
    #[must_use]
    pub fn with_registry(mut self, scopes: Arc<ScopeRegistry>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Replace the deep-link handlers.
    #[must_use]
    pub fn with_deep_links(mut self, deep_links: DeepLinkManager) -> Self {
        self.deep_links = deep_links;
        self
    }

    /// Replace the configuration used by [`Navigator::entry`].
    #[must_use]
    pub fn with_config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a deep-link handler after the existing ones.
    pub fn register_deep_link(&mut self, handler: impl DeepLinkHandler + 'static) {
        self.deep_links.register(handler);
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Current published state.
    pub fn state(&self) -> Arc<NavigationState> {
        self.state.get()
    }

    /// Subscribe to published states.
    pub fn subscribe(&self) -> StateSubscription<NavigationState> {
        self.state.subscribe()
    }

    /// Active entry.
    pub fn current_entry(&self) -> Option<BackStackEntry> {
        self.state.get().top().cloned()
    }

    /// Whether a pop would change anything.
    pub fn can_go_back(&self) -> bool {
        self.state.get().can_go_back()
    }

    /// Direction of the last transition that changed the stack.
    pub fn direction(&self) -> NavDirection {
        if self.forward.load(Ordering::Acquire) {
            NavDirection::Push
        } else {
            NavDirection::Pop
        }
    }

    /// Scope registry backing this navigator.
    pub fn registry(&self) -> &Arc<ScopeRegistry> {
        &self.scopes
    }

    /// Scope of `entry`, created on first use.
    ///
    /// `None` once no entry on the current stack references the scope, so a
    /// render pass for an outgoing screen cannot resurrect a scope that
    /// nothing would clear again.
    pub fn scope_for(&self, entry: &BackStackEntry) -> Option<Arc<NavigationScope>> {
        if !self.state.get().references_scope(&entry.scope_id) {
            tracing::trace!(scope = %entry.scope_id, "Scope lookup for an entry off the stack");
            return None;
        }
        Some(self.scopes.get_or_create_scope(&entry.scope_id))
    }

    /// Scope of the active entry.
    pub fn current_scope(&self) -> Option<Arc<NavigationScope>> {
        let state = self.state.get();
        let top = state.top()?;
        Some(self.scopes.get_or_create_scope(&top.scope_id))
    }

    /// Deep-link handlers registered on this navigator.
    pub fn deep_links(&self) -> &DeepLinkManager {
        &self.deep_links
    }

    /// Active configuration.
    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// New entry for `destination_id` using the configured scope strategy.
    pub fn entry(&self, destination_id: &str) -> BackStackEntry {
        self.config.entry(destination_id)
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Reduce `command`, release orphaned scopes, publish the result.
    pub fn dispatch(&self, command: NavigationCommand) -> Transition {
        let previous = self.state.get();
        let next = reduce(&previous, &command);

        if next == *previous {
            tracing::trace!(command = command.kind(), "Navigation command was a no-op");
            return Transition {
                direction: NavDirection::between(&previous, &previous),
                current: Arc::clone(&previous),
                previous,
                released_scopes: Vec::new(),
            };
        }

        let released_scopes = previous.released_scopes(&next);
        for scope_id in &released_scopes {
            self.scopes.clear_scope(scope_id);
        }

        let direction = NavDirection::between(&previous, &next);
        let current = Arc::new(next);
        self.forward.store(direction.is_forward(), Ordering::Release);
        self.state.set_arc(Arc::clone(&current));

        tracing::debug!(
            command = command.kind(),
            depth = current.len(),
            top = current.top().map(|e| e.destination_id.as_str()).unwrap_or_default(),
            ?direction,
            released = released_scopes.len(),
            "Navigation transition"
        );

        Transition {
            previous,
            current,
            direction,
            released_scopes,
        }
    }

    /// Push `entry`.
    pub fn navigate(&self, entry: BackStackEntry) -> Transition {
        self.dispatch(NavigationCommand::navigate(entry))
    }

    /// Push `entry` with explicit options.
    pub fn navigate_with(&self, entry: BackStackEntry, options: NavigateOptions) -> Transition {
        self.dispatch(NavigationCommand::navigate_with(entry, options))
    }

    /// Pop the top entry.
    pub fn pop(&self) -> Transition {
        self.dispatch(NavigationCommand::pop())
    }

    /// Pop the top entry, delivering `result` to the entry underneath.
    pub fn pop_with_result(&self, result: ResultPayload) -> Transition {
        self.dispatch(NavigationCommand::pop_with_result(result))
    }

    /// Pop `count` entries, never the root.
    pub fn pop_count(&self, count: usize) -> Transition {
        self.dispatch(NavigationCommand::pop_count(count))
    }

    /// Pop until `destination_id` is on top; no-op if it is not on the stack.
    pub fn pop_until(&self, destination_id: &str) -> Transition {
        self.dispatch(NavigationCommand::pop_until(destination_id))
    }

    /// Replace the whole stack with `entry`.
    pub fn replace_root(&self, entry: BackStackEntry) -> Transition {
        self.dispatch(NavigationCommand::replace_root(entry))
    }

    /// Pop if possible, otherwise call `on_failure` (e.g. to close the app).
    ///
    /// Returns whether a pop happened.
    pub fn pop_if_can<F: FnOnce()>(&self, on_failure: F) -> bool {
        if self.can_go_back() {
            self.pop();
            true
        } else {
            on_failure();
            false
        }
    }

    /// Dispatch `commands` one after another.
    pub fn run_nav_commands<I>(&self, commands: I) -> Vec<Transition>
    where
        I: IntoIterator<Item = NavigationCommand>,
    {
        commands
            .into_iter()
            .map(|command| self.dispatch(command))
            .collect()
    }

    /// Resolve `uri` with this navigator's handlers and run the result.
    ///
    /// Returns `false` when no handler recognizes the URI.
    pub fn apply_deep_link(&self, uri: &str) -> bool {
        self.apply_deep_link_with(uri, &self.deep_links)
    }

    /// Resolve `uri` with `handlers` instead of the registered ones.
    pub fn apply_deep_link_with(&self, uri: &str, handlers: &DeepLinkManager) -> bool {
        match handlers.resolve(uri) {
            Some(commands) => {
                tracing::debug!(uri, commands = commands.len(), "Applying deep link");
                self.run_nav_commands(commands);
                true
            }
            None => {
                tracing::debug!(uri, "No deep-link handler matched");
                false
            }
        }
    }

    /// Encode the current state for persistence.
    pub fn save(&self) -> NavResult<String> {
        self.state.get().to_json()
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("state", &self.state)
            .field("direction", &self.direction())
            .field("scopes", &self.scopes)
            .field("deep_links", &self.deep_links)
            .finish()
    }
}
