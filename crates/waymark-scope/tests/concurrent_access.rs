#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]
//! Concurrent access to the scope registry from several render threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use waymark_core::NavigationScopeId;
use waymark_scope::ScopeRegistry;

#[test]
fn concurrent_get_or_create_yields_one_scope() {
    let registry = Arc::new(ScopeRegistry::new());
    let id = NavigationScopeId::for_destination("feed");
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let id = id.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.get_or_create_scope(&id)
            })
        })
        .collect();

    let scopes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for scope in &scopes[1..] {
        assert!(Arc::ptr_eq(&scopes[0], scope));
    }
    assert_eq!(registry.len(), 1);
}

#[test]
fn concurrent_instances_register_one_cleanup() {
    let registry = Arc::new(ScopeRegistry::new());
    let id = NavigationScopeId::random();
    let cleared = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let id = id.clone();
            let cleared = Arc::clone(&cleared);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry
                    .get_or_create_scope(&id)
                    .get_or_create("vm", move || i, move |_| {
                        cleared.fetch_add(1, Ordering::SeqCst);
                    })
                    .unwrap()
            })
        })
        .collect();

    let values: Vec<Arc<i32>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for value in &values[1..] {
        assert!(Arc::ptr_eq(&values[0], value));
    }

    registry.clear_scope(&id);
    assert_eq!(cleared.load(Ordering::SeqCst), 1);
}

#[test]
fn readers_see_whole_snapshots_while_writers_churn() {
    let registry = Arc::new(ScopeRegistry::new());
    let stable = NavigationScopeId::for_destination("home");
    registry.get_or_create_scope(&stable);

    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for round in 0..200 {
                let id = NavigationScopeId::new(format!("entry:tmp-{round}"));
                registry.get_or_create_scope(&id);
                registry.clear_scope(&id);
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let stable = stable.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    assert!(registry.contains(&stable));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(registry.len(), 1);
}
