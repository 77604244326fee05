use std::collections::{BTreeMap, BTreeSet};

use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_core::{Color, NodeId};

use crate::graph::{Graph, Node};

/// Accumulates adjacency lists and initial colors, then validates the loader
/// contract when building the [`Graph`].
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    adjacency: BTreeMap<NodeId, Vec<NodeId>>,
    colors: BTreeMap<NodeId, Color>,
}

impl GraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the symmetric adjacency of an undirected edge list.
    pub fn from_edges(edges: &[(u64, u64)]) -> Self {
        let mut builder = Self::new();
        for &(a, b) in edges {
            builder.add_edge(NodeId::from_raw(a), NodeId::from_raw(b));
        }
        builder
    }

    /// Number of nodes registered so far.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Whether no node has been registered.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Registered node identifiers in ascending order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.adjacency.keys().copied().collect()
    }

    /// Registers a node with an explicit neighbour list, kept in the given order.
    pub fn insert_node(
        &mut self,
        id: NodeId,
        neighbors: Vec<NodeId>,
    ) -> Result<&mut Self, JabejaError> {
        if self.adjacency.contains_key(&id) {
            return Err(JabejaError::Graph(
                ErrorInfo::new("duplicate-node", "node registered twice").with_context("node", id),
            ));
        }
        self.adjacency.insert(id, neighbors);
        Ok(self)
    }

    /// Registers an isolated node if it is not present yet.
    pub fn ensure_node(&mut self, id: NodeId) -> &mut Self {
        self.adjacency.entry(id).or_default();
        self
    }

    /// Adds an undirected edge, creating both endpoints on demand.
    ///
    /// Repeated edges are ignored. Self-loops are kept so `build` can reject
    /// them with a precise error.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> &mut Self {
        let list = self.adjacency.entry(a).or_default();
        if !list.contains(&b) {
            list.push(b);
        }
        if a != b {
            let list = self.adjacency.entry(b).or_default();
            if !list.contains(&a) {
                list.push(a);
            }
        }
        self
    }

    /// Sets the initial color of a registered node.
    pub fn set_color(&mut self, id: NodeId, color: Color) -> Result<&mut Self, JabejaError> {
        if !self.adjacency.contains_key(&id) {
            return Err(crate::graph::unknown_node(id));
        }
        self.colors.insert(id, color);
        Ok(self)
    }

    /// Sets initial colors positionally (ascending id order).
    pub fn set_colors(&mut self, colors: &[u32]) -> Result<&mut Self, JabejaError> {
        if colors.len() != self.adjacency.len() {
            return Err(JabejaError::Config(
                ErrorInfo::new("color-count-mismatch", "one color per node is required")
                    .with_context("nodes", self.adjacency.len())
                    .with_context("colors", colors.len()),
            ));
        }
        let ids = self.node_ids();
        for (id, &raw) in ids.into_iter().zip(colors) {
            self.colors.insert(id, Color::from_raw(raw));
        }
        Ok(self)
    }

    /// Validates the loader contract and freezes the topology.
    ///
    /// Nodes without an explicit color start in partition 0.
    pub fn build(self) -> Result<Graph, JabejaError> {
        let mut neighbor_sets: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
        for (&id, neighbors) in &self.adjacency {
            let mut set = BTreeSet::new();
            for &neighbor in neighbors {
                if neighbor == id {
                    return Err(JabejaError::Graph(
                        ErrorInfo::new("self-loop", "node lists itself as a neighbour")
                            .with_context("node", id),
                    ));
                }
                if !self.adjacency.contains_key(&neighbor) {
                    return Err(JabejaError::Graph(
                        ErrorInfo::new("dangling-neighbor", "neighbour id does not resolve")
                            .with_context("node", id)
                            .with_context("neighbor", neighbor),
                    ));
                }
                if !set.insert(neighbor) {
                    return Err(JabejaError::Graph(
                        ErrorInfo::new("duplicate-neighbor", "neighbour listed twice")
                            .with_context("node", id)
                            .with_context("neighbor", neighbor),
                    ));
                }
            }
            neighbor_sets.insert(id, set);
        }

        for (id, set) in &neighbor_sets {
            for neighbor in set {
                let reverse = neighbor_sets
                    .get(neighbor)
                    .is_some_and(|back| back.contains(id));
                if !reverse {
                    return Err(JabejaError::Graph(
                        ErrorInfo::new("asymmetric-edge", "edge is missing its reverse direction")
                            .with_context("node", id)
                            .with_context("neighbor", neighbor)
                            .with_hint("loaders must emit every undirected edge from both ends"),
                    ));
                }
            }
        }

        let nodes = self
            .adjacency
            .into_iter()
            .map(|(id, neighbors)| {
                let color = self
                    .colors
                    .get(&id)
                    .copied()
                    .unwrap_or(Color::from_raw(0));
                Node {
                    id,
                    color,
                    init_color: color,
                    neighbors: neighbors.into_boxed_slice(),
                }
            })
            .collect();
        Ok(Graph::from_sorted_nodes(nodes))
    }
}
