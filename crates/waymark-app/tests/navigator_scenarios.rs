#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]
//! # Navigator Scenarios
//!
//! End-to-end behaviour of the navigator facade: stack changes, scope
//! lifecycle, deep links and routing, driven the way a render layer would.

use proptest::prelude::*;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use waymark_app::{GraphRouter, Navigator, TableGraph};
use waymark_core::{
    BackStackEntry, DeepLinkManager, NavDirection, NavigateOptions, NavigationCommand,
    NavigationState, PatternHandler,
};
use waymark_scope::ScopeRegistry;
use waymark_testkit::{
    destination_ids, entry, fill_scope, fresh, init_tracing, stack_of, strategies,
    CleanupCounter, RecordingHandler,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn navigator_over(state: NavigationState) -> Navigator {
    init_tracing();
    Navigator::new(state).with_registry(Arc::new(ScopeRegistry::new()))
}

fn ids(nav: &Navigator) -> Vec<String> {
    destination_ids(&nav.state())
}

// ============================================================================
// Stack scenarios
// ============================================================================

#[test]
fn push_three_then_pop_two() {
    let nav = navigator_over(stack_of(&["home"]));
    nav.navigate(entry("details"));
    nav.navigate(entry("profile"));
    nav.navigate(entry("settings"));
    assert_eq!(nav.state().len(), 4);

    let t = nav.pop_count(2);
    assert_eq!(ids(&nav), vec!["home", "details"]);
    assert_eq!(t.direction, NavDirection::Pop);
    assert_eq!(nav.current_entry().unwrap().destination_id, "details");
}

#[test]
fn pop_up_to_inclusive_then_push() {
    let nav = navigator_over(stack_of(&["home", "details", "profile", "settings"]));
    nav.navigate_with(entry("profile"), NavigateOptions::pop_up_to("details", true));
    assert_eq!(ids(&nav), vec!["home", "profile"]);
}

#[test]
fn root_pops_are_noops() {
    let nav = navigator_over(stack_of(&["home"]));
    assert!(!nav.pop().changed());
    assert!(!nav.pop_count(5).changed());
    assert_eq!(ids(&nav), vec!["home"]);
}

#[test]
fn result_delivery_only_on_single_pop() {
    let nav = navigator_over(stack_of(&["home", "details"]));
    nav.navigate(entry("picker").expecting_result("k"));
    nav.pop_with_result(json!({"color": "red"}));
    assert_eq!(
        nav.current_entry().unwrap().result("k"),
        Some(&json!({"color": "red"}))
    );

    let nav = navigator_over(stack_of(&["home", "details"]));
    nav.navigate(entry("picker").expecting_result("k"));
    nav.dispatch(NavigationCommand::Pop {
        result: Some(json!("R")),
        count: 2,
        pop_until: None,
    });
    assert_eq!(ids(&nav), vec!["home"]);
    assert!(nav.current_entry().unwrap().results.is_empty());
}

#[test]
fn run_nav_commands_in_order() {
    let nav = navigator_over(stack_of(&["home"]));
    let transitions = nav.run_nav_commands(vec![
        NavigationCommand::navigate(entry("a")),
        NavigationCommand::navigate(entry("b")),
        NavigationCommand::pop(),
        NavigationCommand::navigate(entry("c")),
    ]);

    assert_eq!(transitions.len(), 4);
    assert_eq!(ids(&nav), vec!["home", "a", "c"]);
}

// ============================================================================
// Scope lifecycle
// ============================================================================

#[test]
fn scope_cleared_exactly_once_on_pop() {
    let nav = navigator_over(stack_of(&["home"]));
    let details = fresh("details");
    nav.navigate(details.clone());

    let counter = CleanupCounter::new();
    for _ in 0..4 {
        fill_scope(nav.registry(), &details.scope_id, "vm", &counter);
    }

    nav.pop();
    assert_eq!(counter.count(), 1);

    nav.pop();
    assert_eq!(counter.count(), 1);
}

#[test]
fn reuse_keeps_shared_scope_alive() {
    let nav = navigator_over(stack_of(&["home", "list", "details"]));
    let counter = CleanupCounter::new();
    fill_scope(nav.registry(), &entry("list").scope_id, "vm", &counter);

    nav.navigate_with(entry("list"), NavigateOptions::default().reusing());
    assert_eq!(ids(&nav), vec!["home", "details", "list"]);
    assert_eq!(counter.count(), 0);
}

#[test]
fn clear_back_stack_releases_all_old_scopes() {
    let nav = navigator_over(stack_of(&["home", "details", "profile"]));
    let counter = CleanupCounter::new();
    for id in ["home", "details", "profile"] {
        fill_scope(nav.registry(), &entry(id).scope_id, "vm", &counter);
    }

    let t = nav.navigate_with(fresh("login"), NavigateOptions::clearing());
    assert_eq!(t.released_scopes.len(), 3);
    assert_eq!(counter.count(), 3);
    assert!(nav.registry().is_empty());
}

proptest! {
    /// Property: after any command sequence, the registry holds only scopes referenced by the stack
    #[test]
    fn prop_registry_tracks_back_stack(
        start in strategies::navigation_state(5),
        commands in prop::collection::vec(strategies::command(), 1..20),
    ) {
        let nav = navigator_over(start);
        let counter = CleanupCounter::new();

        for command in commands {
            for e in nav.state().back_stack.iter() {
                fill_scope(nav.registry(), &e.scope_id, "vm", &counter);
            }
            nav.dispatch(command);

            let state = nav.state();
            let live = state.scope_ids();
            for id in nav.registry().scope_ids() {
                prop_assert!(live.contains(&id));
            }
        }
    }
}

// ============================================================================
// Deep links
// ============================================================================

#[test]
fn deep_link_first_registered_handler_wins() {
    let first = RecordingHandler::new(
        "app://",
        vec![
            NavigationCommand::replace_root(entry("home")),
            NavigationCommand::navigate(entry("details")),
        ],
    );
    let second = RecordingHandler::new("app://profile", vec![NavigationCommand::navigate(entry("profile"))]);
    let (first_calls, second_calls) = (first.calls(), second.calls());

    let mut nav = navigator_over(stack_of(&["settings"]));
    nav.register_deep_link(first);
    nav.register_deep_link(second);

    assert!(nav.apply_deep_link("app://profile/3"));
    assert_eq!(ids(&nav), vec!["home", "details"]);
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn deep_link_miss_leaves_state() {
    let nav = navigator_over(stack_of(&["home", "details"]));
    let before = nav.state();
    assert!(!nav.apply_deep_link("https://example.com"));
    assert_eq!(nav.state(), before);
}

#[test]
fn deep_link_recognized_noop_succeeds() {
    let nav = navigator_over(stack_of(&["home"]));
    let handlers = DeepLinkManager::new().with_handler(RecordingHandler::new("app://noop", Vec::new()));
    assert!(nav.apply_deep_link_with("app://noop", &handlers));
    assert_eq!(ids(&nav), vec!["home"]);
}

#[test]
fn deep_link_pattern_builds_stack_and_releases_scopes() {
    let handlers = DeepLinkManager::new().with_handler(PatternHandler::new(
        "myapp://orders/{id}",
        |params| {
            let args = format!("{{\"order\":\"{}\"}}", params.get("id").unwrap_or_default());
            vec![
                NavigationCommand::replace_root(BackStackEntry::shared("home")),
                NavigationCommand::navigate(BackStackEntry::shared("orders")),
                NavigationCommand::navigate(BackStackEntry::new("order").with_args(args)),
            ]
        },
    ));

    let nav = navigator_over(stack_of(&["settings", "about"])).with_deep_links(handlers);
    let counter = CleanupCounter::new();
    fill_scope(nav.registry(), &entry("about").scope_id, "vm", &counter);

    assert!(nav.apply_deep_link("myapp://orders/991"));
    assert_eq!(ids(&nav), vec!["home", "orders", "order"]);
    assert_eq!(
        nav.current_entry().unwrap().args.as_deref(),
        Some("{\"order\":\"991\"}")
    );
    assert_eq!(counter.count(), 1);
}

// ============================================================================
// Routing
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
enum Screen {
    Home,
    Details,
}

#[test]
fn router_follows_navigation() {
    let router = GraphRouter::new().with_graph(
        TableGraph::new("main")
            .route("home", |_| Screen::Home)
            .route("details", |_| Screen::Details),
    );
    let nav = navigator_over(stack_of(&["home"]));

    let route = router.resolve_or_abort(&nav.current_entry().unwrap());
    assert_eq!(route.destination, Screen::Home);

    nav.navigate(entry("details"));
    let route = router.resolve_top(&nav.state()).unwrap().unwrap();
    assert_eq!(route.destination, Screen::Details);

    nav.navigate(entry("unregistered"));
    assert!(router.resolve_top(&nav.state()).unwrap().is_err());
}
