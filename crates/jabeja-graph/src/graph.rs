use std::collections::BTreeMap;

use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_core::{Color, NodeId};

/// A vertex together with its current and initial partition label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) color: Color,
    pub(crate) init_color: Color,
    pub(crate) neighbors: Box<[NodeId]>,
}

impl Node {
    /// Identifier of the node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Current partition label.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Label assigned by the loader before the first round.
    pub fn init_color(&self) -> Color {
        self.init_color
    }

    /// Neighbour identifiers in loader order.
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Number of neighbours.
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Whether the node currently sits outside its initial partition.
    pub fn has_migrated(&self) -> bool {
        self.color != self.init_color
    }
}

/// Closed, symmetric graph whose only mutable state is the node colors.
///
/// Nodes are stored in ascending id order; that order is the enumeration
/// order used by every sweep. Instances are produced by
/// [`GraphBuilder::build`](crate::GraphBuilder::build), which enforces the
/// loader contract (no dangling ids, symmetric edges, no self-loops).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    pub(crate) fn from_sorted_nodes(nodes: Vec<Node>) -> Self {
        debug_assert!(nodes.windows(2).all(|pair| pair[0].id < pair[1].id));
        Self { nodes }
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(Node::degree).sum::<usize>() / 2
    }

    /// All nodes in enumeration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node identifiers in enumeration order.
    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|node| node.id)
    }

    /// Identifier stored at `position` in enumeration order.
    pub fn id_at(&self, position: usize) -> Option<NodeId> {
        self.nodes.get(position).map(|node| node.id)
    }

    /// Position of `id` in enumeration order.
    pub fn position(&self, id: NodeId) -> Result<usize, JabejaError> {
        self.nodes
            .binary_search_by_key(&id, |node| node.id)
            .map_err(|_| unknown_node(id))
    }

    /// Looks up a node; a missing id is a fatal invariant violation.
    pub fn lookup(&self, id: NodeId) -> Result<&Node, JabejaError> {
        let idx = self.position(id)?;
        Ok(&self.nodes[idx])
    }

    /// Neighbours of `id` in loader order.
    pub fn neighbors(&self, id: NodeId) -> Result<&[NodeId], JabejaError> {
        Ok(self.lookup(id)?.neighbors())
    }

    /// Current color of `id`.
    pub fn color(&self, id: NodeId) -> Result<Color, JabejaError> {
        Ok(self.lookup(id)?.color)
    }

    /// Counts the neighbours of `id` whose current color equals `color`.
    pub fn degree_in_color(&self, id: NodeId, color: Color) -> Result<usize, JabejaError> {
        let mut degree = 0;
        for &neighbor in self.lookup(id)?.neighbors.iter() {
            if self.color(neighbor)? == color {
                degree += 1;
            }
        }
        Ok(degree)
    }

    /// Exchanges the colors of two nodes.
    ///
    /// This is the only color mutation the graph offers, so the multiset of
    /// colors is invariant under any sequence of calls. It is public because
    /// the swap driver lives in `jabeja-engine`; loaders set colors through
    /// [`GraphBuilder`](crate::GraphBuilder) instead.
    pub fn swap_colors(&mut self, a: NodeId, b: NodeId) -> Result<(), JabejaError> {
        let ia = self.position(a)?;
        let ib = self.position(b)?;
        let color_a = self.nodes[ia].color;
        self.nodes[ia].color = self.nodes[ib].color;
        self.nodes[ib].color = color_a;
        Ok(())
    }

    /// Multiset of current colors.
    pub fn color_histogram(&self) -> BTreeMap<Color, usize> {
        let mut histogram = BTreeMap::new();
        for node in &self.nodes {
            *histogram.entry(node.color).or_insert(0) += 1;
        }
        histogram
    }

    /// Current `(id, color)` assignment in enumeration order.
    pub fn assignment(&self) -> Vec<(NodeId, Color)> {
        self.nodes.iter().map(|node| (node.id, node.color)).collect()
    }
}

pub(crate) fn unknown_node(id: NodeId) -> JabejaError {
    JabejaError::Graph(
        ErrorInfo::new("unknown-node", "node id does not resolve within the graph")
            .with_context("node", id),
    )
}
