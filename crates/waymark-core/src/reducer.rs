//! # Navigation Reducer
//!
//! Applies a [`NavigationCommand`] to a [`NavigationState`]:
//! ```text
//! (state, command) → state
//! ```
//!
//! The reducer is pure. Every "target not found" case (a `pop_up_to` or
//! `pop_until` destination that is not on the stack, over-popping, popping
//! the root) falls back to a no-op so stale deep links and platform back
//! presses can never leave the stack in a broken shape.

use crate::types::{BackStackEntry, NavigationCommand, NavigationState, ResultPayload};

/// Apply `command` to `state`, returning the next state.
pub fn reduce(state: &NavigationState, command: &NavigationCommand) -> NavigationState {
    match command {
        NavigationCommand::Navigate {
            entry,
            clear_back_stack,
            pop_up_to,
            pop_up_to_inclusive,
            reuse_if_exists,
        } => {
            let base = if *clear_back_stack {
                Vec::new()
            } else if let Some(target) = pop_up_to {
                pop_up_to_destination(&state.back_stack, target, *pop_up_to_inclusive)
            } else {
                state.back_stack.clone()
            };
            NavigationState::from_entries(push_entry(base, entry, *reuse_if_exists))
        }
        NavigationCommand::Pop {
            result,
            count,
            pop_until,
        } => pop(state, result.as_ref(), *count, pop_until.as_deref()),
        NavigationCommand::ReplaceRoot { entry } => NavigationState::new(entry.clone()),
    }
}

/// Index of the last entry (searching from the top) for `destination_id`.
fn last_index_of(stack: &[BackStackEntry], destination_id: &str) -> Option<usize> {
    stack
        .iter()
        .rposition(|entry| entry.destination_id == destination_id)
}

fn pop_up_to_destination(
    stack: &[BackStackEntry],
    destination_id: &str,
    inclusive: bool,
) -> Vec<BackStackEntry> {
    match last_index_of(stack, destination_id) {
        Some(index) if inclusive => stack[..index].to_vec(),
        Some(index) => stack[..=index].to_vec(),
        None => stack.to_vec(),
    }
}

fn push_entry(
    mut base: Vec<BackStackEntry>,
    entry: &BackStackEntry,
    reuse_if_exists: bool,
) -> Vec<BackStackEntry> {
    if reuse_if_exists {
        if let Some(index) = last_index_of(&base, &entry.destination_id) {
            base.remove(index);
        }
    }
    base.push(entry.clone());
    base
}

fn pop(
    state: &NavigationState,
    result: Option<&ResultPayload>,
    count: usize,
    pop_until: Option<&str>,
) -> NavigationState {
    let stack = &state.back_stack;
    if stack.len() <= 1 {
        return state.clone();
    }

    let keep = if count > 1 {
        stack.len() - count.min(stack.len() - 1)
    } else if let Some(target) = pop_until {
        match last_index_of(stack, target) {
            Some(index) => index + 1,
            None => return state.clone(),
        }
    } else {
        stack.len() - 1
    };

    let mut next = stack[..keep].to_vec();

    // Only a plain single pop hands its result down. Multi-pops and
    // pop_until drop the result.
    if count == 1 && pop_until.is_none() {
        if let (Some(payload), Some(popped)) = (result, stack.last()) {
            deliver_result(&mut next, popped, payload);
        }
    }

    NavigationState::from_entries(next)
}

fn deliver_result(next: &mut [BackStackEntry], popped: &BackStackEntry, payload: &ResultPayload) {
    let Some(key) = popped.pending_result_key.as_deref() else {
        return;
    };
    if let Some(top) = next.last_mut() {
        *top = top.with_result(key, payload.clone());
    }
}
