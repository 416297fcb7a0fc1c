//! Waymark Core - Navigation State Engine
//!
//! Pure building blocks for a declarative UI navigation stack. Nothing in
//! this crate blocks, performs I/O, or holds global state.
//!
//! # Pipeline
//!
//! ```text
//! NavigationCommand ─┐
//!                    ├─ reduce ─→ NavigationState ─→ NavDirection
//! NavigationState ───┘
//!
//! uri ─→ DeepLinkManager ─→ [NavigationCommand] ─→ fold(reduce)
//! ```
//!
//! # Invariants
//! - A state built with `NavigationState::new` is never empty; pops clamp at the root
//! - Missing `pop_up_to` / `pop_until` targets are no-ops, never errors
//! - Results are delivered only by single pops
//! - Entries are immutable values; every change is a copy

#![forbid(unsafe_code)]

/// Back-stack data model
pub mod types;

/// Pure `(state, command) -> state` reducer
pub mod reducer;

/// URI to command resolution
pub mod deep_link;

/// Push/pop direction for the render layer
pub mod direction;

/// Unified error handling
pub mod errors;

/// Persisted JSON layout
mod persistence;

pub use deep_link::{
    apply_commands_with, apply_deep_link, DeepLinkHandler, DeepLinkManager, PatternHandler,
    RouteParams, RoutePattern,
};
pub use direction::NavDirection;
pub use errors::{NavError, Result as NavResult};
pub use reducer::reduce;
pub use types::{
    BackStackEntry, NavigateOptions, NavigationCommand, NavigationScopeId, NavigationState,
    ResultPayload, ScopeStrategy,
};
