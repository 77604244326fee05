use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_core::provenance::SchemaVersion;
use jabeja_core::{Color, NodeId};
use serde::{Deserialize, Serialize};

use crate::builder::GraphBuilder;
use crate::graph::Graph;

/// Serializable view of a colored graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Snapshot schema version.
    pub schema_version: SchemaVersion,
    /// Nodes in ascending id order.
    pub nodes: Vec<NodeSnapshot>,
}

/// A single node entry of a [`GraphSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Node identifier.
    pub id: NodeId,
    /// Color at the time of the snapshot; becomes the initial color on load.
    pub color: Color,
    /// Color the node started the run with. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_color: Option<Color>,
    /// Neighbour identifiers in loader order.
    pub neighbors: Vec<NodeId>,
}

impl GraphSnapshot {
    /// Captures the current state of `graph`.
    pub fn capture(graph: &Graph) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|node| NodeSnapshot {
                id: node.id(),
                color: node.color(),
                init_color: Some(node.init_color()),
                neighbors: node.neighbors().to_vec(),
            })
            .collect();
        Self {
            schema_version: SchemaVersion::new(1, 0, 0),
            nodes,
        }
    }

    /// Rebuilds a builder carrying the snapshot colors.
    pub fn into_builder(self) -> Result<GraphBuilder, JabejaError> {
        let mut builder = GraphBuilder::new();
        for node in self.nodes {
            builder.insert_node(node.id, node.neighbors)?;
            builder.set_color(node.id, node.color)?;
        }
        Ok(builder)
    }
}

/// Serializes the graph, including current colors, to pretty JSON.
pub fn graph_to_json(graph: &Graph) -> Result<String, JabejaError> {
    serde_json::to_string_pretty(&GraphSnapshot::capture(graph))
        .map_err(|err| JabejaError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a builder from a JSON snapshot.
pub fn graph_from_json(json: &str) -> Result<GraphBuilder, JabejaError> {
    let snapshot: GraphSnapshot = serde_json::from_str(json)
        .map_err(|err| JabejaError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    snapshot.into_builder()
}
