//! # Back-Stack Data Model
//!
//! - [`BackStackEntry`]: one screen on the stack, with its scope and results
//! - [`NavigationState`]: the immutable stack itself
//! - [`NavigationCommand`]: closed set of changes the reducer applies
//! - [`NavigationScopeId`]: key tying scoped instances to stack membership

mod command;
mod entry;
mod scope_id;
mod state;

pub use command::{NavigateOptions, NavigationCommand};
pub use entry::{BackStackEntry, ResultPayload};
pub use scope_id::{NavigationScopeId, ScopeStrategy};
pub use state::NavigationState;
