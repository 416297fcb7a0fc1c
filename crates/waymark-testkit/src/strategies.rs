//! Proptest strategies for back stacks and commands.

use proptest::prelude::*;
use waymark_core::{BackStackEntry, NavigateOptions, NavigationCommand, NavigationState};

/// Small fixed destination alphabet so generated stacks contain duplicates.
pub const DESTINATIONS: &[&str] = &["home", "details", "profile", "settings", "search", "about"];

/// One destination id from [`DESTINATIONS`].
pub fn destination() -> impl Strategy<Value = String> {
    prop::sample::select(DESTINATIONS).prop_map(str::to_string)
}

/// Entry with either a shared or a random scope.
pub fn back_stack_entry() -> impl Strategy<Value = BackStackEntry> {
    (destination(), any::<bool>()).prop_map(|(id, shared)| {
        if shared {
            BackStackEntry::shared(id)
        } else {
            BackStackEntry::new(id)
        }
    })
}

/// Non-empty state of up to `max_len` entries.
pub fn navigation_state(max_len: usize) -> impl Strategy<Value = NavigationState> {
    prop::collection::vec(back_stack_entry(), 1..=max_len.max(1))
        .prop_map(NavigationState::from_entries)
}

/// Any navigation command over [`DESTINATIONS`].
pub fn command() -> impl Strategy<Value = NavigationCommand> {
    prop_oneof![
        back_stack_entry().prop_map(NavigationCommand::navigate),
        (back_stack_entry(), destination(), any::<bool>()).prop_map(|(entry, target, inclusive)| {
            NavigationCommand::navigate_with(entry, NavigateOptions::pop_up_to(target, inclusive))
        }),
        back_stack_entry().prop_map(|entry| {
            NavigationCommand::navigate_with(entry, NavigateOptions::default().reusing())
        }),
        back_stack_entry().prop_map(|entry| {
            NavigationCommand::navigate_with(entry, NavigateOptions::clearing())
        }),
        Just(NavigationCommand::pop()),
        (2usize..6).prop_map(NavigationCommand::pop_count),
        destination().prop_map(NavigationCommand::pop_until),
        back_stack_entry().prop_map(NavigationCommand::replace_root),
    ]
}
