// SPDX-License-Identifier: MIT OR Apache-2.0
//! Block graph engine for `BlockFlow`.
//!
//! Assemble a directed graph of typed blocks connected through
//! cardinality-constrained ports, and persist/reload it losslessly.
//!
//! ## Architecture
//!
//! - Block types are described by [`BlockSchema`]s registered in a
//!   [`SchemaRegistry`]; port templates may be variadic, expanding to an
//!   indexed connector group whose size follows the block's parameters.
//! - [`GraphManager`] owns every [`BlockInstance`] and [`Edge`] in
//!   id-addressed arenas and mediates every mutation: edge creation is
//!   validated (self-loops, category pairing, cardinality), parameter
//!   updates re-derive the connector set and prune edges left on
//!   vanished connectors.
//! - Directed reachability ([`GraphManager::successor_ids`]) skips edges
//!   touching loopable blocks, so feedback loops can be permitted without
//!   being treated as cycles.
//! - [`GraphManager::export_graph`]/[`GraphManager::import_graph`] move
//!   the whole graph through serde-friendly JSON-shaped records.
//!
//! Rendering, input gestures and undo history live outside this crate;
//! they are reached only through the narrow seams in [`hooks`] and
//! [`params`].

pub mod block;
pub mod catalog;
pub mod connector;
pub mod edge;
pub mod error;
pub mod export;
pub mod graph;
pub mod hooks;
pub mod params;
pub mod schema;

pub use block::{BlockId, BlockInstance, Connector};
pub use connector::{Cardinality, CardinalitySpec, ConnectorCategory, ConnectorId};
pub use edge::{Edge, EdgeId, Endpoint};
pub use error::GraphError;
pub use export::{BlockData, EdgeData, GraphData};
pub use graph::{GraphManager, GraphOptions};
pub use hooks::{HistoryHook, LayoutHook};
pub use params::{JsonParameters, ParameterMap, ParameterStore};
pub use schema::{
    BlockSchema, LabelStrategy, LengthSpec, PortTemplate, SchemaKey, SchemaRegistry,
};
