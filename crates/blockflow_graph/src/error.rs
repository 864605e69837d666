// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error taxonomy for graph operations.

use crate::block::BlockId;
use crate::connector::{ConnectorCategory, ConnectorId};
use crate::edge::EdgeId;

/// Error produced by a graph operation.
///
/// All failures are synchronous and immediate; the engine performs no
/// internal recovery or retry. Cascading cleanup (edge removal on block
/// deletion, stale-connector pruning on parameter change) is bookkeeping,
/// not a failure path.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// No block type registered under this name/module pair
    #[error("No block type named {name:?} in module {module:?}")]
    SchemaNotFound {
        /// Requested type name
        name: String,
        /// Requested module (`None` = built-in)
        module: Option<String>,
    },

    /// Block id not present in the graph
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),

    /// Edge id not present in the graph
    #[error("Edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// Connector absent from the block's current connector set
    #[error("Block {block} has no connector {connector}")]
    ConnectorNotFound {
        /// Owning block
        block: BlockId,
        /// Requested connector
        connector: ConnectorId,
    },

    /// Both endpoints of an edge named the same block
    #[error("Cannot link block {0} to itself")]
    SelfLoopRejected(BlockId),

    /// Both endpoints share a category and same-category links are disabled
    #[error("Cannot link two {0} connectors together")]
    InvalidPortPairing(ConnectorCategory),

    /// An endpoint connector is already carrying its maximum edge count
    #[error("Connector {connector} on block {block} is full ({max} edge(s) max)")]
    CardinalityExceeded {
        /// Endpoint block
        block: BlockId,
        /// Saturated connector
        connector: ConnectorId,
        /// Bounded maximum that was hit
        max: u32,
    },

    /// A variadic length expression could not be resolved to an integer
    #[error("Cannot resolve variadic length from parameter {key:?}")]
    LengthResolution {
        /// Parameter key the length expression names
        key: String,
    },

    /// A cardinality spec failed to parse at schema registration
    #[error("Invalid cardinality spec {0:?}")]
    InvalidCardinality(String),

    /// Structurally invalid import data
    #[error("Malformed graph data: {0}")]
    ImportMalformed(String),

    /// An imported edge references a block id absent from the import set
    #[error("Imported edge references unknown block {0}")]
    ImportBlockNotFound(BlockId),

    /// An imported block references an unregistered block type
    #[error("Unable to create a block of type {name:?} (module {module:?})")]
    ImportTypeUnresolved {
        /// Unresolved type name
        name: String,
        /// Unresolved module
        module: Option<String>,
    },
}
