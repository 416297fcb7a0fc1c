//! # Graph Router
//!
//! Maps a back-stack entry to the render layer's destination object. Graphs
//! are tried in registration order and the first one that claims the
//! destination id wins.
//!
//! A destination id no graph resolves means something was dispatched that
//! was never registered. That is a configuration bug, so it is logged at
//! `error` and surfaced, never rendered as an empty screen.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use waymark_core::{BackStackEntry, NavError, NavResult, NavigationState};

/// A group of destinations owned by one feature of the render layer.
pub trait NavGraph: Send + Sync {
    /// Destination object handed to the renderer
    type Destination;

    /// Name used in logs and resolved routes.
    fn name(&self) -> &str;

    /// Whether this graph owns `destination_id`.
    fn can_resolve(&self, destination_id: &str) -> bool;

    /// Build the destination. Only called after `can_resolve` returned true.
    fn resolve_destination(&self, destination_id: &str, args: Option<&str>) -> Self::Destination;
}

/// Destination resolved for one entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRoute<D> {
    /// Name of the graph that owns the destination
    pub graph: String,
    /// Destination object built by the graph
    pub destination: D,
}

/// Ordered routing table of graphs.
pub struct GraphRouter<D> {
    graphs: Vec<Box<dyn NavGraph<Destination = D>>>,
}

impl<D: 'static> Default for GraphRouter<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: 'static> GraphRouter<D> {
    /// Create an empty router
    pub fn new() -> Self {
        Self { graphs: Vec::new() }
    }

    /// Register a graph after all existing ones.
    pub fn register(&mut self, graph: impl NavGraph<Destination = D> + 'static) {
        self.graphs.push(Box::new(graph));
    }

    /// Builder form of [`GraphRouter::register`].
    #[must_use]
    pub fn with_graph(mut self, graph: impl NavGraph<Destination = D> + 'static) -> Self {
        self.register(graph);
        self
    }

    /// Number of registered graphs
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// Check if no graph is registered
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// First graph claiming `destination_id`.
    pub fn graph_for(&self, destination_id: &str) -> Option<&dyn NavGraph<Destination = D>> {
        self.graphs
            .iter()
            .find(|graph| graph.can_resolve(destination_id))
            .map(|graph| graph.as_ref())
    }

    /// Resolve `entry` to its owning graph and destination.
    pub fn resolve(&self, entry: &BackStackEntry) -> NavResult<ResolvedRoute<D>> {
        let Some(graph) = self.graph_for(&entry.destination_id) else {
            tracing::error!(
                destination = %entry.destination_id,
                graphs = self.graphs.len(),
                "No navigation graph resolves destination"
            );
            return Err(NavError::unresolved(entry.destination_id.as_str()));
        };

        Ok(ResolvedRoute {
            graph: graph.name().to_string(),
            destination: graph.resolve_destination(&entry.destination_id, entry.args.as_deref()),
        })
    }

    /// Resolve the active entry of `state`; `None` for the empty placeholder.
    pub fn resolve_top(&self, state: &NavigationState) -> Option<NavResult<ResolvedRoute<D>>> {
        state.top().map(|entry| self.resolve(entry))
    }

    /// Resolve `entry`, aborting the render pass if no graph owns it.
    ///
    /// # Panics
    ///
    /// Panics when the destination was never registered with any graph.
    pub fn resolve_or_abort(&self, entry: &BackStackEntry) -> ResolvedRoute<D> {
        match self.resolve(entry) {
            Ok(route) => route,
            Err(err) => panic!("navigation configuration error: {err}"),
        }
    }
}

impl<D> fmt::Debug for GraphRouter<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.graphs.iter().map(|graph| graph.name()).collect();
        f.debug_struct("GraphRouter").field("graphs", &names).finish()
    }
}

type DestinationFactory<D> = Arc<dyn Fn(Option<&str>) -> D + Send + Sync>;

/// Graph backed by a table of destination factories.
pub struct TableGraph<D> {
    name: String,
    routes: HashMap<String, DestinationFactory<D>>,
}

impl<D> TableGraph<D> {
    /// Create an empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            routes: HashMap::new(),
        }
    }

    /// Add a destination built from its encoded args.
    #[must_use]
    pub fn route<F>(mut self, destination_id: impl Into<String>, factory: F) -> Self
    where
        F: Fn(Option<&str>) -> D + Send + Sync + 'static,
    {
        self.routes.insert(destination_id.into(), Arc::new(factory));
        self
    }
}

impl<D> NavGraph for TableGraph<D> {
    type Destination = D;

    fn name(&self) -> &str {
        &self.name
    }

    fn can_resolve(&self, destination_id: &str) -> bool {
        self.routes.contains_key(destination_id)
    }

    fn resolve_destination(&self, destination_id: &str, args: Option<&str>) -> D {
        // can_resolve guards every call made by GraphRouter
        match self.routes.get(destination_id) {
            Some(factory) => factory(args),
            None => panic!(
                "graph '{}' asked to resolve unknown destination '{destination_id}'",
                self.name
            ),
        }
    }
}

impl<D> fmt::Debug for TableGraph<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut routes: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        routes.sort_unstable();
        f.debug_struct("TableGraph")
            .field("name", &self.name)
            .field("routes", &routes)
            .finish()
    }
}
