//! Navigation commands
//!
//! Commands describe a change to the back stack. They carry no behaviour;
//! `crate::reducer::reduce` gives them meaning.

use super::entry::{BackStackEntry, ResultPayload};
use serde::{Deserialize, Serialize};

/// Every change the reducer knows how to apply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavigationCommand {
    /// Push an entry, optionally trimming or clearing the stack first
    Navigate {
        /// Entry to put on top
        entry: BackStackEntry,
        /// Drop the whole stack before pushing
        clear_back_stack: bool,
        /// Trim back to the last entry with this destination id before pushing
        pop_up_to: Option<String>,
        /// Also remove the `pop_up_to` target itself
        pop_up_to_inclusive: bool,
        /// Move an existing entry of the same destination instead of duplicating it
        reuse_if_exists: bool,
    },
    /// Remove entries from the top
    Pop {
        /// Result handed to the entry underneath (single pops only)
        result: Option<ResultPayload>,
        /// Number of entries to remove
        count: usize,
        /// Pop until this destination is on top
        pop_until: Option<String>,
    },
    /// Throw the stack away and start again from `entry`
    ReplaceRoot {
        /// New root entry
        entry: BackStackEntry,
    },
}

/// Flags for `NavigationCommand::Navigate`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigateOptions {
    /// Drop the whole stack before pushing
    pub clear_back_stack: bool,
    /// Trim back to this destination before pushing
    pub pop_up_to: Option<String>,
    /// Also remove the `pop_up_to` target
    pub pop_up_to_inclusive: bool,
    /// Relocate an existing entry of the same destination
    pub reuse_if_exists: bool,
}

impl NavigateOptions {
    /// Clear the stack before pushing.
    #[must_use]
    pub fn clearing() -> Self {
        Self {
            clear_back_stack: true,
            ..Self::default()
        }
    }

    /// Trim back to `destination_id` before pushing.
    #[must_use]
    pub fn pop_up_to(destination_id: impl Into<String>, inclusive: bool) -> Self {
        Self {
            pop_up_to: Some(destination_id.into()),
            pop_up_to_inclusive: inclusive,
            ..Self::default()
        }
    }

    /// Relocate an existing entry instead of duplicating it.
    #[must_use]
    pub fn reusing(mut self) -> Self {
        self.reuse_if_exists = true;
        self
    }
}

impl NavigationCommand {
    /// Plain push.
    pub fn navigate(entry: BackStackEntry) -> Self {
        Self::navigate_with(entry, NavigateOptions::default())
    }

    /// Push with explicit options.
    pub fn navigate_with(entry: BackStackEntry, options: NavigateOptions) -> Self {
        Self::Navigate {
            entry,
            clear_back_stack: options.clear_back_stack,
            pop_up_to: options.pop_up_to,
            pop_up_to_inclusive: options.pop_up_to_inclusive,
            reuse_if_exists: options.reuse_if_exists,
        }
    }

    /// Pop the top entry.
    pub fn pop() -> Self {
        Self::Pop {
            result: None,
            count: 1,
            pop_until: None,
        }
    }

    /// Pop the top entry and hand `result` to the entry underneath.
    pub fn pop_with_result(result: ResultPayload) -> Self {
        Self::Pop {
            result: Some(result),
            count: 1,
            pop_until: None,
        }
    }

    /// Pop `count` entries (never the root).
    pub fn pop_count(count: usize) -> Self {
        Self::Pop {
            result: None,
            count,
            pop_until: None,
        }
    }

    /// Pop until `destination_id` is on top.
    pub fn pop_until(destination_id: impl Into<String>) -> Self {
        Self::Pop {
            result: None,
            count: 1,
            pop_until: Some(destination_id.into()),
        }
    }

    /// Replace the whole stack with `entry`.
    pub fn replace_root(entry: BackStackEntry) -> Self {
        Self::ReplaceRoot { entry }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NavigationCommand::Navigate { .. } => "navigate",
            NavigationCommand::Pop { .. } => "pop",
            NavigationCommand::ReplaceRoot { .. } => "replace_root",
        }
    }
}
