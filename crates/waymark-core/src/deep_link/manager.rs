//! Handler lookup and command folding

use crate::reducer::reduce;
use crate::types::{NavigationCommand, NavigationState};
use std::fmt;
use std::sync::Arc;

/// Recognizes a family of URIs and translates them into commands.
pub trait DeepLinkHandler: Send + Sync {
    /// Cheap, side-effect free check.
    fn matches(&self, uri: &str) -> bool;

    /// Commands reaching the linked screen from an unknown starting state.
    ///
    /// Only called after `matches` returned true for the same `uri`. Usually
    /// a `ReplaceRoot` followed by one or more `Navigate`s.
    fn resolve(&self, uri: &str) -> Vec<NavigationCommand>;
}

/// Ordered list of deep-link handlers.
#[derive(Clone, Default)]
pub struct DeepLinkManager {
    handlers: Vec<Arc<dyn DeepLinkHandler>>,
}

impl DeepLinkManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler after all existing ones.
    pub fn register(&mut self, handler: impl DeepLinkHandler + 'static) {
        self.handlers.push(Arc::new(handler));
    }

    /// Register an already shared handler.
    pub fn register_shared(&mut self, handler: Arc<dyn DeepLinkHandler>) {
        self.handlers.push(handler);
    }

    /// Builder form of [`DeepLinkManager::register`].
    #[must_use]
    pub fn with_handler(mut self, handler: impl DeepLinkHandler + 'static) -> Self {
        self.register(handler);
        self
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handler is registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Resolve `uri` with the first handler that matches it.
    ///
    /// `None` means no handler recognized the URI. `Some(vec![])` means it was
    /// recognized and intentionally maps to nothing.
    pub fn resolve(&self, uri: &str) -> Option<Vec<NavigationCommand>> {
        self.handlers
            .iter()
            .find(|handler| handler.matches(uri))
            .map(|handler| handler.resolve(uri))
    }
}

impl fmt::Debug for DeepLinkManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepLinkManager")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Fold `commands` over the standard reducer.
pub fn apply_deep_link(state: &NavigationState, commands: &[NavigationCommand]) -> NavigationState {
    apply_commands_with(state, commands, reduce)
}

/// Fold `commands` over `reducer`, each output feeding the next command.
pub fn apply_commands_with<F>(
    state: &NavigationState,
    commands: &[NavigationCommand],
    reducer: F,
) -> NavigationState
where
    F: Fn(&NavigationState, &NavigationCommand) -> NavigationState,
{
    commands
        .iter()
        .fold(state.clone(), |current, command| reducer(&current, command))
}
