//! # Waymark Scope
//!
//! ViewModel-style instance storage whose lifetime follows back-stack
//! membership rather than any UI component.
//!
//! The render layer calls
//! `registry.get_or_create_scope(&entry.scope_id).get_or_create(key, factory, on_cleared)`
//! on every pass; memoizing the returned `Arc` across passes is its own
//! business. The navigator calls [`ScopeRegistry::clear_scope`] once an id
//! disappears from the back stack.

#![forbid(unsafe_code)]

mod registry;
mod scope;

pub use registry::ScopeRegistry;
pub use scope::NavigationScope;
