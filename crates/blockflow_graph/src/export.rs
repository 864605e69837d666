// SPDX-License-Identifier: MIT OR Apache-2.0
//! JSON-shaped wire records and lossless graph import/export.
//!
//! The records serialize with serde, so callers persist a [`GraphData`]
//! with `serde_json` (or any serde format) directly. Connector endpoints
//! travel as their wire strings, `<category>_<name>[_<index>]`.

use crate::block::BlockId;
use crate::connector::ConnectorId;
use crate::edge::EdgeId;
use crate::error::GraphError;
use crate::graph::GraphManager;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Wire record of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockData {
    /// Persisted block id.
    pub id: BlockId,
    /// Canvas x position.
    pub x: f64,
    /// Canvas y position.
    pub y: f64,
    /// Block type name.
    #[serde(rename = "type")]
    pub block_type: String,
    /// Block type module.
    pub module: Option<String>,
    /// Opaque parameter export from the parameters provider.
    pub parameters: serde_json::Value,
}

/// Wire record of an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    /// Persisted edge id.
    pub id: EdgeId,
    /// Source block id.
    pub block1: BlockId,
    /// Source connector, wire form.
    pub io1: String,
    /// Destination block id.
    pub block2: BlockId,
    /// Destination connector, wire form.
    pub io2: String,
}

/// Complete export of a graph: every block, then every edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    /// Block records, creation order.
    pub blocks: Vec<BlockData>,
    /// Edge records, creation order.
    pub edges: Vec<EdgeData>,
}

impl GraphManager {
    /// Export every block and edge to their wire records.
    pub fn export_graph(&self) -> GraphData {
        let blocks = self
            .blocks()
            .map(|block| BlockData {
                id: block.id(),
                x: block.position[0],
                y: block.position[1],
                block_type: block.schema().name.clone(),
                module: block.schema().module.clone(),
                parameters: self.parameter_store().export(block.parameters()),
            })
            .collect();

        let edges = self
            .edges()
            .map(|edge| EdgeData {
                id: edge.id(),
                block1: edge.source().block,
                io1: edge.source().connector.to_string(),
                block2: edge.destination().block,
                io2: edge.destination().connector.to_string(),
            })
            .collect();

        GraphData { blocks, edges }
    }

    /// Rebuild the graph from `data`, replacing the current contents.
    ///
    /// Blocks are reconstructed first, then edges, each edge re-validated
    /// through the normal creation path, so cardinality and pairing rules
    /// apply to imported graphs exactly as to interactively built ones.
    ///
    /// All-or-nothing: the import is staged against a scratch arena and
    /// only a fully successful import replaces the live graph; on any
    /// failure the pre-import state is untouched. Id counters resume past
    /// the highest imported ids.
    pub fn import_graph(&mut self, data: &GraphData) -> Result<(), GraphError> {
        let mut staged = self.staging();

        for record in &data.blocks {
            let schema = staged
                .registry()
                .lookup(&record.block_type, record.module.as_deref())
                .map_err(|_| GraphError::ImportTypeUnresolved {
                    name: record.block_type.clone(),
                    module: record.module.clone(),
                })?;
            let parameters = staged.parameter_store().import(&record.parameters)?;
            staged.insert_block_with_id(
                record.id,
                schema,
                parameters,
                [record.x, record.y],
            )?;
        }

        for record in &data.edges {
            let io1: ConnectorId = record.io1.parse()?;
            let io2: ConnectorId = record.io2.parse()?;
            for block in [record.block1, record.block2] {
                if staged.block(block).is_none() {
                    return Err(GraphError::ImportBlockNotFound(block));
                }
            }
            staged.insert_edge_with_id(record.id, record.block1, io1, record.block2, io2)?;
        }

        debug!(
            blocks = data.blocks.len(),
            edges = data.edges.len(),
            "graph imported"
        );
        self.adopt(staged);
        Ok(())
    }
}
