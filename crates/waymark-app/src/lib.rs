//! # Waymark App
//!
//! The layer a UI shell embeds:
//!
//! - [`Navigator`]: dispatches commands, releases scopes, publishes state
//! - [`GraphRouter`]: maps the active entry to a render-layer destination
//! - [`NavigatorConfig`]: start destination and scope strategy
//! - [`event_channel`]: FIFO queue for back presses and deep links
//! - [`StateCell`]: lock-free published state with poll subscriptions
//!
//! ```rust,ignore
//! let nav = Navigator::from_config(NavigatorConfig::default())?;
//! nav.navigate(nav.entry("details"));
//!
//! let route = router.resolve_or_abort(&nav.current_entry().unwrap());
//! let vm = nav.current_scope().unwrap().get_or_create("vm", DetailsVm::new, DetailsVm::close)?;
//! ```

#![forbid(unsafe_code)]

/// Typed JSON helpers for args and results
pub mod args;

/// Navigator configuration
pub mod config;

/// Back press / deep link event queue
pub mod events;

/// The navigator facade
pub mod navigator;

/// Published state cell
pub mod reactive;

/// Entry → destination routing
pub mod router;

pub use config::NavigatorConfig;
pub use events::{event_channel, NavEvent, NavEventReceiver, NavEventSender};
pub use navigator::{Navigator, Transition};
pub use reactive::{StateCell, StateSubscription};
pub use router::{GraphRouter, NavGraph, ResolvedRoute, TableGraph};

pub use waymark_core;
pub use waymark_scope;
