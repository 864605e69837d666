// SPDX-License-Identifier: MIT OR Apache-2.0
//! The graph manager: owner of every block and edge.
//!
//! All mutation goes through [`GraphManager`]. Blocks and edges live in
//! id-addressed arenas; adjacency lists and edge endpoints hold ids, never
//! references, so the block/edge/block back-reference cycle never turns
//! into an ownership cycle.

use crate::block::{derive_connectors, BlockId, BlockInstance};
use crate::connector::ConnectorId;
use crate::edge::{Edge, EdgeId, Endpoint};
use crate::error::GraphError;
use crate::hooks::{HistoryHook, LayoutHook};
use crate::params::{JsonParameters, ParameterMap, ParameterStore};
use crate::schema::{BlockSchema, SchemaRegistry};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Options controlling edge validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphOptions {
    /// Allow linking two connectors of the same category. Off by default:
    /// an edge must pair an input side with an output side.
    #[serde(default)]
    pub allow_input_links: bool,
}

/// Owner of all block instances and edges.
///
/// An explicit, constructible object: id counters, arenas and the schema
/// registry are per-instance state, so independent graphs coexist freely.
/// The manager is single-writer; a concurrent host must wrap every call in
/// a mutual-exclusion section scoped to the whole manager.
pub struct GraphManager {
    schemas: SchemaRegistry,
    blocks: IndexMap<BlockId, BlockInstance>,
    edges: IndexMap<EdgeId, Edge>,
    next_block_id: u64,
    next_edge_id: u64,
    options: GraphOptions,
    params: Arc<dyn ParameterStore>,
    history: Option<Box<dyn HistoryHook>>,
    layout: Option<Box<dyn LayoutHook>>,
}

impl GraphManager {
    /// An empty graph with the plain-JSON parameter provider.
    pub fn new() -> Self {
        Self {
            schemas: SchemaRegistry::new(),
            blocks: IndexMap::new(),
            edges: IndexMap::new(),
            next_block_id: 1,
            next_edge_id: 1,
            options: GraphOptions::default(),
            params: Arc::new(JsonParameters),
            history: None,
            layout: None,
        }
    }

    /// An empty graph with the given options.
    pub fn with_options(options: GraphOptions) -> Self {
        Self {
            options,
            ..Self::new()
        }
    }

    /// An empty graph over an already-built schema registry.
    pub fn with_registry(schemas: SchemaRegistry) -> Self {
        Self {
            schemas,
            ..Self::new()
        }
    }

    /// Current options.
    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Mutable options.
    pub fn options_mut(&mut self) -> &mut GraphOptions {
        &mut self.options
    }

    /// Install a parameter provider, replacing the default.
    pub fn set_parameter_store(&mut self, store: Arc<dyn ParameterStore>) {
        self.params = store;
    }

    pub(crate) fn parameter_store(&self) -> &dyn ParameterStore {
        self.params.as_ref()
    }

    /// Install the undo-history checkpoint hook.
    pub fn set_history_hook(&mut self, hook: Box<dyn HistoryHook>) {
        self.history = Some(hook);
    }

    /// Install the layout-dirty hook.
    pub fn set_layout_hook(&mut self, hook: Box<dyn LayoutHook>) {
        self.layout = Some(hook);
    }

    // ── Schemas ─────────────────────────────────────────────────────

    /// Register a block type; re-registering a `(name, module)` key
    /// replaces the previous schema.
    pub fn register_schema(&mut self, schema: BlockSchema) -> Result<(), GraphError> {
        debug!(name = %schema.name, module = ?schema.module, "schema registered");
        self.schemas.register(schema)
    }

    /// Look up a registered block type.
    pub fn schema(
        &self,
        name: &str,
        module: Option<&str>,
    ) -> Result<Arc<BlockSchema>, GraphError> {
        self.schemas.lookup(name, module)
    }

    /// The schema registry.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.schemas
    }

    // ── Blocks ──────────────────────────────────────────────────────

    /// Create a block of the given type with its default parameters.
    ///
    /// Allocates the next block id; the counter only increases, so ids are
    /// never reused even after deletion.
    pub fn add_block(
        &mut self,
        name: &str,
        module: Option<&str>,
    ) -> Result<BlockId, GraphError> {
        let schema = self.schemas.lookup(name, module)?;
        let parameters = self.params.defaults(&schema);
        let id = BlockId(self.next_block_id);
        let block = BlockInstance::new(id, schema, parameters, self.params.as_ref())?;
        self.next_block_id += 1;
        self.blocks.insert(id, block);
        debug!(%id, ty = name, "block added");
        Ok(id)
    }

    /// Remove a block, cascading removal of every edge that touches it.
    ///
    /// Touching edges are found by scanning the edge arena, not by
    /// trusting the block's adjacency, so removal restores consistency
    /// even if adjacency were stale.
    pub fn remove_block(&mut self, id: BlockId) -> Result<(), GraphError> {
        if !self.blocks.contains_key(&id) {
            return Err(GraphError::BlockNotFound(id));
        }

        let touching: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|edge| edge.touches(id))
            .map(Edge::id)
            .collect();
        for edge_id in touching {
            self.remove_edge(edge_id)?;
        }

        self.blocks.shift_remove(&id);
        debug!(%id, "block removed");
        Ok(())
    }

    /// A block by id.
    pub fn block(&self, id: BlockId) -> Option<&BlockInstance> {
        self.blocks.get(&id)
    }

    /// A mutable block by id (position, mostly; parameters go through
    /// [`update_parameters`](Self::update_parameters)).
    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut BlockInstance> {
        self.blocks.get_mut(&id)
    }

    /// All blocks, creation order.
    pub fn blocks(&self) -> impl Iterator<Item = &BlockInstance> {
        self.blocks.values()
    }

    /// All block ids, creation order.
    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.blocks.keys().copied()
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Replace a block's parameters.
    ///
    /// The connector set for the new values is derived first, so a
    /// resolution failure leaves the graph untouched. On success the
    /// history hook checkpoints, the parameters and connectors are
    /// swapped in, and any adjacency entry whose connector disappeared
    /// has its edges removed; the layout hook fires if anything was
    /// pruned.
    pub fn update_parameters(
        &mut self,
        id: BlockId,
        parameters: ParameterMap,
    ) -> Result<(), GraphError> {
        let schema = {
            let block = self.blocks.get(&id).ok_or(GraphError::BlockNotFound(id))?;
            Arc::clone(block.schema())
        };
        let connectors = derive_connectors(&schema, &parameters, self.params.as_ref())?;

        if let Some(history) = self.history.as_mut() {
            history.save();
        }

        let Some(block) = self.blocks.get_mut(&id) else {
            return Err(GraphError::BlockNotFound(id));
        };
        let stale = block.replace_parameters(parameters, connectors);
        let pruned = !stale.is_empty();

        for edge_id in stale {
            trace!(%id, edge = %edge_id, "pruning edge from stale connector");
            self.remove_edge(edge_id)?;
        }

        if pruned {
            if let Some(layout) = self.layout.as_mut() {
                layout.layout_changed();
            }
        }
        Ok(())
    }

    // ── Edges ───────────────────────────────────────────────────────

    /// Create a validated edge from `(a, conn_a)` to `(b, conn_b)`.
    ///
    /// The first endpoint is always the traversal source, regardless of
    /// the connectors' input/output categories; only argument order fixes
    /// direction.
    ///
    /// Fails with [`GraphError::SelfLoopRejected`] when `a == b`,
    /// [`GraphError::InvalidPortPairing`] when both connectors share a
    /// category (unless [`GraphOptions::allow_input_links`] is set), and
    /// [`GraphError::CardinalityExceeded`] when either endpoint is full.
    pub fn add_edge(
        &mut self,
        a: BlockId,
        conn_a: ConnectorId,
        b: BlockId,
        conn_b: ConnectorId,
    ) -> Result<EdgeId, GraphError> {
        let id = EdgeId(self.next_edge_id);
        self.insert_edge(id, a, conn_a, b, conn_b)?;
        self.next_edge_id += 1;
        Ok(id)
    }

    /// Shared validated insertion path for interactive and imported
    /// edges: imported edges pass their persisted id, so both go through
    /// identical checks.
    pub(crate) fn insert_edge(
        &mut self,
        id: EdgeId,
        a: BlockId,
        conn_a: ConnectorId,
        b: BlockId,
        conn_b: ConnectorId,
    ) -> Result<(), GraphError> {
        if a == b {
            return Err(GraphError::SelfLoopRejected(a));
        }

        {
            let block_a = self.blocks.get(&a).ok_or(GraphError::BlockNotFound(a))?;
            let block_b = self.blocks.get(&b).ok_or(GraphError::BlockNotFound(b))?;

            if conn_a.category() == conn_b.category() && !self.options.allow_input_links {
                return Err(GraphError::InvalidPortPairing(conn_a.category()));
            }

            block_a.check_attach(&conn_a)?;
            block_b.check_attach(&conn_b)?;
        }

        if let Some(block) = self.blocks.get_mut(&a) {
            block.attach(conn_a.clone(), id);
        }
        if let Some(block) = self.blocks.get_mut(&b) {
            block.attach(conn_b.clone(), id);
        }

        debug!(edge = %id, from = %a, to = %b, "edge added");
        self.edges.insert(
            id,
            Edge::new(
                id,
                Endpoint {
                    block: a,
                    connector: conn_a,
                },
                Endpoint {
                    block: b,
                    connector: conn_b,
                },
            ),
        );
        Ok(())
    }

    /// Remove an edge: detach it from both endpoints' adjacency, then
    /// delete it from the arena.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<(), GraphError> {
        let edge = self
            .edges
            .shift_remove(&id)
            .ok_or(GraphError::EdgeNotFound(id))?;

        for endpoint in edge.endpoints() {
            if let Some(block) = self.blocks.get_mut(&endpoint.block) {
                block.detach(&endpoint.connector, id);
            }
        }
        debug!(edge = %id, "edge removed");
        Ok(())
    }

    /// An edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// All edges, creation order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Set or clear an edge's display label.
    pub fn set_edge_label(
        &mut self,
        id: EdgeId,
        label: Option<String>,
    ) -> Result<(), GraphError> {
        let edge = self.edges.get_mut(&id).ok_or(GraphError::EdgeNotFound(id))?;
        edge.set_label(label);
        Ok(())
    }

    /// Whether an edge is excluded from loop analysis: true iff either
    /// endpoint block's schema is loopable.
    pub fn edge_is_loopable(&self, edge: &Edge) -> bool {
        edge.endpoints()
            .iter()
            .any(|endpoint| {
                self.blocks
                    .get(&endpoint.block)
                    .is_some_and(BlockInstance::is_loopable)
            })
    }

    // ── Traversal ───────────────────────────────────────────────────

    /// Every block reachable from `start` by following edges away from
    /// their source endpoint, skipping loopable edges. Discovery order;
    /// always includes `start` itself.
    ///
    /// Callers use this to forbid cycles when finishing a link, or to
    /// scope partial execution to a subgraph.
    pub fn successor_ids(&self, start: BlockId) -> Result<Vec<BlockId>, GraphError> {
        if !self.blocks.contains_key(&start) {
            return Err(GraphError::BlockNotFound(start));
        }

        let mut visited: HashSet<BlockId> = HashSet::new();
        visited.insert(start);
        let mut ids = vec![start];
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            let Some(block) = self.blocks.get(&current) else {
                continue;
            };
            for (_, edges) in block.adjacency() {
                for edge_id in edges {
                    let Some(edge) = self.edges.get(edge_id) else {
                        continue;
                    };
                    if self.edge_is_loopable(edge) {
                        continue;
                    }
                    if edge.source().block != current {
                        continue;
                    }
                    let target = edge.destination().block;
                    if visited.insert(target) {
                        stack.push(target);
                        ids.push(target);
                    }
                }
            }
        }

        Ok(ids)
    }

    // ── Bulk state ──────────────────────────────────────────────────

    /// Remove every block and edge. Id counters are kept, so ids are
    /// still never reused within this manager's lifetime.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.edges.clear();
        debug!("graph cleared");
    }

    /// A scratch manager sharing this one's schemas, options and
    /// parameter provider, used to stage an all-or-nothing import.
    pub(crate) fn staging(&self) -> GraphManager {
        GraphManager {
            schemas: self.schemas.clone(),
            blocks: IndexMap::new(),
            edges: IndexMap::new(),
            next_block_id: 1,
            next_edge_id: 1,
            options: self.options.clone(),
            params: Arc::clone(&self.params),
            history: None,
            layout: None,
        }
    }

    /// Adopt a fully staged import, replacing the live arenas and
    /// counters.
    pub(crate) fn adopt(&mut self, staged: GraphManager) {
        self.blocks = staged.blocks;
        self.edges = staged.edges;
        self.next_block_id = staged.next_block_id;
        self.next_edge_id = staged.next_edge_id;
    }

    /// Insert a reconstructed block under its persisted id.
    pub(crate) fn insert_block_with_id(
        &mut self,
        id: BlockId,
        schema: Arc<BlockSchema>,
        parameters: ParameterMap,
        position: [f64; 2],
    ) -> Result<(), GraphError> {
        if self.blocks.contains_key(&id) {
            return Err(GraphError::ImportMalformed(format!(
                "duplicate block id {id}"
            )));
        }
        let mut block = BlockInstance::new(id, schema, parameters, self.params.as_ref())?;
        block.position = position;
        self.blocks.insert(id, block);
        self.next_block_id = self.next_block_id.max(id.0 + 1);
        Ok(())
    }

    /// Insert a reconstructed edge under its persisted id, through the
    /// normal validation path.
    pub(crate) fn insert_edge_with_id(
        &mut self,
        id: EdgeId,
        a: BlockId,
        conn_a: ConnectorId,
        b: BlockId,
        conn_b: ConnectorId,
    ) -> Result<(), GraphError> {
        if self.edges.contains_key(&id) {
            return Err(GraphError::ImportMalformed(format!(
                "duplicate edge id {id}"
            )));
        }
        self.insert_edge(id, a, conn_a, b, conn_b)?;
        self.next_edge_id = self.next_edge_id.max(id.0 + 1);
        Ok(())
    }
}

impl Default for GraphManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GraphManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphManager")
            .field("schemas", &self.schemas.len())
            .field("blocks", &self.blocks.len())
            .field("edges", &self.edges.len())
            .field("next_block_id", &self.next_block_id)
            .field("next_edge_id", &self.next_edge_id)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::ConnectorCategory;
    use crate::schema::{LengthSpec, PortTemplate};
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingHook(Rc<Cell<usize>>);

    impl HistoryHook for CountingHook {
        fn save(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    impl LayoutHook for CountingHook {
        fn layout_changed(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    /// A registry of small test types: a pure source, a pure sink, a
    /// relay, a loopable relay and a variadic-input sum.
    fn manager() -> GraphManager {
        let mut graph = GraphManager::new();
        graph
            .register_schema(BlockSchema::new("source").output(PortTemplate::new("out")))
            .unwrap();
        graph
            .register_schema(BlockSchema::new("sink").input(PortTemplate::new("in")))
            .unwrap();
        graph
            .register_schema(
                BlockSchema::new("relay")
                    .input(PortTemplate::new("in"))
                    .output(PortTemplate::new("out")),
            )
            .unwrap();
        graph
            .register_schema(
                BlockSchema::new("delay")
                    .loopable()
                    .input(PortTemplate::new("in"))
                    .output(PortTemplate::new("out")),
            )
            .unwrap();
        graph
            .register_schema(
                BlockSchema::new("sum")
                    .parameter(PortTemplate::new("n").with_default(json!(3)))
                    .input(PortTemplate::new("in").variadic(LengthSpec::value_of("n")))
                    .output(PortTemplate::new("out")),
            )
            .unwrap();
        graph
    }

    #[test]
    fn test_block_ids_are_never_reused() {
        let mut graph = manager();
        let a = graph.add_block("source", None).unwrap();
        let b = graph.add_block("sink", None).unwrap();
        assert_eq!((a, b), (BlockId(1), BlockId(2)));

        graph.remove_block(a).unwrap();
        let c = graph.add_block("relay", None).unwrap();
        assert_eq!(c, BlockId(3));

        assert!(matches!(
            graph.add_block("nope", None),
            Err(GraphError::SchemaNotFound { .. })
        ));
    }

    #[test]
    fn test_add_edge_and_cardinality_limit() {
        let mut graph = manager();
        let a = graph.add_block("source", None).unwrap();
        let b = graph.add_block("sink", None).unwrap();

        graph
            .add_edge(a, ConnectorId::output("out"), b, ConnectorId::input("in"))
            .unwrap();
        // The sink input is (0,1): a second edge on it must be refused
        assert!(matches!(
            graph.add_edge(a, ConnectorId::output("out"), b, ConnectorId::input("in")),
            Err(GraphError::CardinalityExceeded { .. })
        ));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut graph = manager();
        let a = graph.add_block("relay", None).unwrap();
        assert!(matches!(
            graph.add_edge(a, ConnectorId::output("out"), a, ConnectorId::input("in")),
            Err(GraphError::SelfLoopRejected(_))
        ));
    }

    #[test]
    fn test_same_category_pairing() {
        let mut graph = manager();
        let a = graph.add_block("sink", None).unwrap();
        let b = graph.add_block("sink", None).unwrap();

        assert!(matches!(
            graph.add_edge(a, ConnectorId::input("in"), b, ConnectorId::input("in")),
            Err(GraphError::InvalidPortPairing(_))
        ));

        graph.options_mut().allow_input_links = true;
        assert!(graph
            .add_edge(a, ConnectorId::input("in"), b, ConnectorId::input("in"))
            .is_ok());
    }

    #[test]
    fn test_unknown_endpoints() {
        let mut graph = manager();
        let a = graph.add_block("source", None).unwrap();

        assert!(matches!(
            graph.add_edge(
                a,
                ConnectorId::output("out"),
                BlockId(99),
                ConnectorId::input("in")
            ),
            Err(GraphError::BlockNotFound(BlockId(99)))
        ));

        let b = graph.add_block("sink", None).unwrap();
        assert!(matches!(
            graph.add_edge(a, ConnectorId::output("oops"), b, ConnectorId::input("in")),
            Err(GraphError::ConnectorNotFound { .. })
        ));
    }

    #[test]
    fn test_remove_block_cascades_edges() {
        let mut graph = manager();
        let a = graph.add_block("source", None).unwrap();
        let b = graph.add_block("sink", None).unwrap();
        let edge = graph
            .add_edge(a, ConnectorId::output("out"), b, ConnectorId::input("in"))
            .unwrap();

        graph.remove_block(a).unwrap();
        assert!(graph.edge(edge).is_none());
        assert_eq!(graph.edge_count(), 0);
        assert!(graph
            .block(b)
            .unwrap()
            .edges_at(&ConnectorId::input("in"))
            .is_empty());

        assert!(matches!(
            graph.remove_block(a),
            Err(GraphError::BlockNotFound(_))
        ));
    }

    #[test]
    fn test_remove_edge_not_found() {
        let mut graph = manager();
        assert!(matches!(
            graph.remove_edge(EdgeId(5)),
            Err(GraphError::EdgeNotFound(_))
        ));
    }

    #[test]
    fn test_successors_follow_direction_and_skip_loopable() {
        let mut graph = manager();
        let a = graph.add_block("relay", None).unwrap();
        let b = graph.add_block("relay", None).unwrap();
        let c = graph.add_block("relay", None).unwrap();
        let d = graph.add_block("delay", None).unwrap();

        graph
            .add_edge(a, ConnectorId::output("out"), b, ConnectorId::input("in"))
            .unwrap();
        graph
            .add_edge(b, ConnectorId::output("out"), c, ConnectorId::input("in"))
            .unwrap();
        // c -> d goes through a loopable block: excluded from traversal
        graph
            .add_edge(c, ConnectorId::output("out"), d, ConnectorId::input("in"))
            .unwrap();

        assert_eq!(
            graph.successor_ids(a).unwrap(),
            vec![a, b, c],
            "loopable edge must not be followed"
        );
        // An isolated block still lists itself
        assert_eq!(graph.successor_ids(d).unwrap(), vec![d]);
        assert!(matches!(
            graph.successor_ids(BlockId(42)),
            Err(GraphError::BlockNotFound(_))
        ));
    }

    #[test]
    fn test_direction_is_argument_order_not_category() {
        let mut graph = manager();
        let a = graph.add_block("relay", None).unwrap();
        let b = graph.add_block("relay", None).unwrap();

        // Input side first: b is still the traversal source
        graph
            .add_edge(b, ConnectorId::input("in"), a, ConnectorId::output("out"))
            .unwrap();

        assert_eq!(graph.successor_ids(b).unwrap(), vec![b, a]);
        assert_eq!(graph.successor_ids(a).unwrap(), vec![a]);
    }

    #[test]
    fn test_update_parameters_prunes_stale_connectors() {
        let mut graph = manager();
        let saves = Rc::new(Cell::new(0));
        let layouts = Rc::new(Cell::new(0));
        graph.set_history_hook(Box::new(CountingHook(Rc::clone(&saves))));
        graph.set_layout_hook(Box::new(CountingHook(Rc::clone(&layouts))));

        let sum = graph.add_block("sum", None).unwrap();
        let src = graph.add_block("source", None).unwrap();
        let kept = graph
            .add_edge(
                src,
                ConnectorId::output("out"),
                sum,
                ConnectorId::indexed(ConnectorCategory::Input, "in", 0),
            )
            .unwrap();
        let pruned = graph
            .add_edge(
                src,
                ConnectorId::output("out"),
                sum,
                ConnectorId::indexed(ConnectorCategory::Input, "in", 2),
            )
            .unwrap();

        let mut params = graph.block(sum).unwrap().parameters().clone();
        params.insert("n".to_string(), json!(1));
        graph.update_parameters(sum, params).unwrap();

        assert_eq!(saves.get(), 1, "history checkpoints once per update");
        assert_eq!(layouts.get(), 1, "layout dirtied by pruning");
        assert!(graph.edge(kept).is_some());
        assert!(graph.edge(pruned).is_none());

        // A second update with no pruning leaves the layout hook alone
        let params = graph.block(sum).unwrap().parameters().clone();
        graph.update_parameters(sum, params).unwrap();
        assert_eq!(saves.get(), 2);
        assert_eq!(layouts.get(), 1);
    }

    #[test]
    fn test_update_parameters_failure_leaves_graph_untouched() {
        let mut graph = manager();
        let saves = Rc::new(Cell::new(0));
        graph.set_history_hook(Box::new(CountingHook(Rc::clone(&saves))));

        let sum = graph.add_block("sum", None).unwrap();
        let before = graph.block(sum).unwrap().parameters().clone();

        let mut params = before.clone();
        params.insert("n".to_string(), json!("three"));
        assert!(matches!(
            graph.update_parameters(sum, params),
            Err(GraphError::LengthResolution { .. })
        ));

        assert_eq!(graph.block(sum).unwrap().parameters(), &before);
        assert_eq!(saves.get(), 0, "no checkpoint on a failed update");
    }

    #[test]
    fn test_edge_labels() {
        let mut graph = manager();
        let a = graph.add_block("source", None).unwrap();
        let b = graph.add_block("sink", None).unwrap();
        let edge = graph
            .add_edge(a, ConnectorId::output("out"), b, ConnectorId::input("in"))
            .unwrap();

        graph
            .set_edge_label(edge, Some("carries samples".to_string()))
            .unwrap();
        assert_eq!(graph.edge(edge).unwrap().label(), Some("carries samples"));
        assert!(graph.set_edge_label(EdgeId(77), None).is_err());
    }

    #[test]
    fn test_clear_keeps_counters() {
        let mut graph = manager();
        graph.add_block("source", None).unwrap();
        graph.add_block("sink", None).unwrap();
        graph.clear();

        assert_eq!(graph.block_count(), 0);
        let next = graph.add_block("relay", None).unwrap();
        assert_eq!(next, BlockId(3));
    }
}
