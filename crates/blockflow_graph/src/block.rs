// SPDX-License-Identifier: MIT OR Apache-2.0
//! Block instances: live nodes with derived connector sets and adjacency.

use crate::connector::{Cardinality, ConnectorCategory, ConnectorId};
use crate::edge::EdgeId;
use crate::error::GraphError;
use crate::params::{ParameterMap, ParameterStore};
use crate::schema::BlockSchema;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Unique identifier for a block instance.
///
/// Allocated from the graph's monotonic counter; assigned once, never
/// reused, even after the block is deleted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A derived connector: its cardinality and display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    /// How many edges the connector may carry.
    pub cardinality: Cardinality,
    /// Display label, with any placeholder or computed strategy applied.
    pub label: String,
}

/// A live block: schema reference, parameter values, the connector set
/// derived from them, and the edges attached to each connector.
///
/// The connector set is a pure function of `(schema, parameters)` and is
/// recomputed in full whenever the parameters change; it is never
/// persisted. Adjacency lists keep insertion order.
#[derive(Debug, Clone)]
pub struct BlockInstance {
    id: BlockId,
    schema: Arc<BlockSchema>,
    /// Canvas position, persisted as `x`/`y` on export. The engine never
    /// interprets it; the rendering collaborator owns its meaning.
    pub position: [f64; 2],
    parameters: ParameterMap,
    connectors: IndexMap<ConnectorId, Connector>,
    adjacency: IndexMap<ConnectorId, Vec<EdgeId>>,
}

impl BlockInstance {
    pub(crate) fn new(
        id: BlockId,
        schema: Arc<BlockSchema>,
        parameters: ParameterMap,
        store: &dyn ParameterStore,
    ) -> Result<Self, GraphError> {
        let connectors = derive_connectors(&schema, &parameters, store)?;
        Ok(Self {
            id,
            schema,
            position: [0.0, 0.0],
            parameters,
            connectors,
            adjacency: IndexMap::new(),
        })
    }

    /// The block's id.
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// The shared, read-only schema this block was created from.
    pub fn schema(&self) -> &Arc<BlockSchema> {
        &self.schema
    }

    /// Current parameter values. Mutation goes through
    /// [`GraphManager::update_parameters`] so the connector set stays
    /// consistent.
    ///
    /// [`GraphManager::update_parameters`]: crate::graph::GraphManager::update_parameters
    pub fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    /// The current derived connector set, in derivation order.
    pub fn connectors(&self) -> &IndexMap<ConnectorId, Connector> {
        &self.connectors
    }

    /// A single derived connector.
    pub fn connector(&self, id: &ConnectorId) -> Option<&Connector> {
        self.connectors.get(id)
    }

    /// Edges attached to `connector`, insertion order.
    pub fn edges_at(&self, connector: &ConnectorId) -> &[EdgeId] {
        self.adjacency
            .get(connector)
            .map_or(&[], Vec::as_slice)
    }

    /// Adjacency entries in insertion order: each connector that has ever
    /// carried an edge, with the edges currently attached to it.
    pub fn adjacency(&self) -> impl Iterator<Item = (&ConnectorId, &[EdgeId])> {
        self.adjacency
            .iter()
            .map(|(connector, edges)| (connector, edges.as_slice()))
    }

    /// Whether edges touching this block are excluded from loop analysis.
    pub fn is_loopable(&self) -> bool {
        self.schema.loopable
    }

    /// Display title: the value of the schema's `as_title` parameter
    /// (`?` when unset), or the type name.
    pub fn title(&self) -> String {
        match self.schema.title_parameter() {
            Some(template) => match self.parameters.get(&template.name) {
                Some(serde_json::Value::String(text)) => text.clone(),
                Some(value) => value.to_string(),
                None => "?".to_string(),
            },
            None => self.schema.name.clone(),
        }
    }

    /// Whether one more edge can attach to `connector`: true iff the
    /// connector exists and its adjacency is below the cardinality
    /// maximum (always, when unbounded).
    pub fn can_attach(&self, connector: &ConnectorId) -> Result<bool, GraphError> {
        match self.check_attach(connector) {
            Ok(()) => Ok(true),
            Err(GraphError::CardinalityExceeded { .. }) => Ok(false),
            Err(other) => Err(other),
        }
    }

    /// Like [`can_attach`](Self::can_attach), but reports the saturated
    /// cardinality as the error the edge factory propagates.
    pub(crate) fn check_attach(&self, connector: &ConnectorId) -> Result<(), GraphError> {
        let card = self
            .connectors
            .get(connector)
            .ok_or_else(|| GraphError::ConnectorNotFound {
                block: self.id,
                connector: connector.clone(),
            })?
            .cardinality;

        if !card.accepts(self.edges_at(connector).len()) {
            return Err(GraphError::CardinalityExceeded {
                block: self.id,
                connector: connector.clone(),
                max: card.max.unwrap_or(0),
            });
        }
        Ok(())
    }

    /// Append an edge to a connector's adjacency. The edge factory has
    /// already validated the attachment; no re-check here.
    pub(crate) fn attach(&mut self, connector: ConnectorId, edge: EdgeId) {
        self.adjacency.entry(connector).or_default().push(edge);
    }

    /// Remove an edge from a connector's adjacency.
    pub(crate) fn detach(&mut self, connector: &ConnectorId, edge: EdgeId) {
        if let Some(edges) = self.adjacency.get_mut(connector) {
            edges.retain(|id| *id != edge);
        }
    }

    /// Install new parameters and the connector set derived from them,
    /// then drop adjacency entries whose connector no longer exists.
    /// Returns the edges those stale entries held, for cascaded removal.
    pub(crate) fn replace_parameters(
        &mut self,
        parameters: ParameterMap,
        connectors: IndexMap<ConnectorId, Connector>,
    ) -> Vec<EdgeId> {
        self.parameters = parameters;
        self.connectors = connectors;

        let stale: Vec<EdgeId> = self
            .adjacency
            .iter()
            .filter(|(connector, _)| !self.connectors.contains_key(*connector))
            .flat_map(|(_, edges)| edges.iter().copied())
            .collect();
        self.adjacency
            .retain(|connector, _| self.connectors.contains_key(connector));

        stale
    }
}

/// Recompute the full connector set for the given parameter values.
///
/// Fixed order: parameters, then inputs, then outputs; template
/// declaration order within each; member index order within a variadic
/// template. `as_title` parameters title the block instead of deriving a
/// connector.
pub(crate) fn derive_connectors(
    schema: &Arc<BlockSchema>,
    params: &ParameterMap,
    store: &dyn ParameterStore,
) -> Result<IndexMap<ConnectorId, Connector>, GraphError> {
    let mut set = IndexMap::new();

    for (category, template) in schema.templates() {
        if category == ConnectorCategory::Parameter && template.as_title {
            continue;
        }

        let cardinality = Cardinality::parse(
            template.card.as_ref(),
            category == ConnectorCategory::Output,
        )?;

        let size = match &template.length {
            None => 1,
            Some(length) => length.resolve(params, store)?,
        };

        for index in 0..size {
            let label = template.label.apply(schema, template, params, index);
            let id = if template.length.is_some() {
                ConnectorId::indexed(category, &template.name, index as u32)
            } else {
                ConnectorId::new(category, &template.name)
            };
            set.insert(id, Connector { cardinality, label });
        }
    }

    Ok(set)
}
