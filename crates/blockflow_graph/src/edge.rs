// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edges: validated directed links between connector endpoints.

use crate::block::BlockId;
use crate::connector::ConnectorId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an edge.
///
/// Edge ids come from their own monotonic counter, independent of block
/// ids, and are never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EdgeId(pub u64);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One end of an edge: a connector on a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// The block carrying the connector.
    pub block: BlockId,
    /// The connector the edge is attached to.
    pub connector: ConnectorId,
}

/// A validated directed link between two connector endpoints on two
/// distinct blocks.
///
/// The source/destination roles are fixed by argument order at creation
/// time and are independent of the connectors' input/output categories:
/// the first endpoint handed to [`GraphManager::add_edge`] is always the
/// traversal source.
///
/// [`GraphManager::add_edge`]: crate::graph::GraphManager::add_edge
#[derive(Debug, Clone)]
pub struct Edge {
    id: EdgeId,
    source: Endpoint,
    destination: Endpoint,
    label: Option<String>,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, source: Endpoint, destination: Endpoint) -> Self {
        Self {
            id,
            source,
            destination,
            label: None,
        }
    }

    /// The edge's id.
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// The source endpoint (first endpoint at creation).
    pub fn source(&self) -> &Endpoint {
        &self.source
    }

    /// The destination endpoint (second endpoint at creation).
    pub fn destination(&self) -> &Endpoint {
        &self.destination
    }

    /// Both endpoints, source first.
    pub fn endpoints(&self) -> [&Endpoint; 2] {
        [&self.source, &self.destination]
    }

    /// Whether the edge touches `block` at either end.
    pub fn touches(&self, block: BlockId) -> bool {
        self.source.block == block || self.destination.block == block
    }

    /// Optional display label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub(crate) fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    /// Undirected structural equality: true when the endpoints match in
    /// either order. Ids and labels are ignored.
    pub fn same(&self, other: &Edge) -> bool {
        (self.source == other.source && self.destination == other.destination)
            || (self.source == other.destination && self.destination == other.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::ConnectorId;

    fn endpoint(block: u64, connector: ConnectorId) -> Endpoint {
        Endpoint {
            block: BlockId(block),
            connector,
        }
    }

    #[test]
    fn test_same_is_undirected() {
        let forward = Edge::new(
            EdgeId(1),
            endpoint(1, ConnectorId::output("out")),
            endpoint(2, ConnectorId::input("in")),
        );
        let backward = Edge::new(
            EdgeId(2),
            endpoint(2, ConnectorId::input("in")),
            endpoint(1, ConnectorId::output("out")),
        );
        let unrelated = Edge::new(
            EdgeId(3),
            endpoint(1, ConnectorId::output("out")),
            endpoint(3, ConnectorId::input("in")),
        );

        assert!(forward.same(&backward));
        assert!(backward.same(&forward));
        assert!(!forward.same(&unrelated));
    }

    #[test]
    fn test_touches() {
        let edge = Edge::new(
            EdgeId(1),
            endpoint(4, ConnectorId::output("out")),
            endpoint(9, ConnectorId::input("in")),
        );
        assert!(edge.touches(BlockId(4)));
        assert!(edge.touches(BlockId(9)));
        assert!(!edge.touches(BlockId(5)));
    }
}
