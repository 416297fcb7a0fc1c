//! Transition direction handed to the render layer.

use crate::types::NavigationState;
use serde::{Deserialize, Serialize};

/// Which way the stack moved, used to pick forward or backward transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavDirection {
    /// The stack grew
    #[default]
    Push,
    /// The stack shrank or kept its size
    Pop,
}

impl NavDirection {
    /// Structural comparison of two stacks: `Push` iff `next` is longer.
    pub fn between(previous: &NavigationState, next: &NavigationState) -> Self {
        if next.len() > previous.len() {
            NavDirection::Push
        } else {
            NavDirection::Pop
        }
    }

    /// Check if this is a forward move
    pub fn is_forward(&self) -> bool {
        matches!(self, NavDirection::Push)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BackStackEntry;

    #[test]
    fn test_direction() {
        let one = NavigationState::new(BackStackEntry::shared("home"));
        let two = NavigationState::from_entries(vec![
            BackStackEntry::shared("home"),
            BackStackEntry::shared("details"),
        ]);
        let replaced = NavigationState::new(BackStackEntry::shared("login"));

        assert_eq!(NavDirection::between(&one, &two), NavDirection::Push);
        assert_eq!(NavDirection::between(&two, &one), NavDirection::Pop);
        // Same length counts as a pop: replace-root style swaps animate backwards.
        assert_eq!(NavDirection::between(&one, &replaced), NavDirection::Pop);
    }
}
