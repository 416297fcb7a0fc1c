//! # Deep-Link Resolution
//!
//! Turns an opaque URI into the commands that bring the back stack into the
//! linked state:
//! ```text
//! uri → DeepLinkManager (first match wins) → [NavigationCommand] → fold(reduce)
//! ```
//!
//! Deep links go through the ordinary reducer. There is no separate mutation
//! path, so every reducer invariant holds for linked states too.

mod manager;
mod pattern;

pub use manager::{apply_commands_with, apply_deep_link, DeepLinkHandler, DeepLinkManager};
pub use pattern::{PatternHandler, RouteParams, RoutePattern};
