use sha2::{Digest, Sha256};

use crate::graph::Graph;

/// SHA-256 over the `(id, color)` assignment in enumeration order.
pub fn partition_hash(graph: &Graph) -> String {
    let mut hasher = Sha256::new();
    hasher.update((graph.size() as u64).to_le_bytes());
    for (id, color) in graph.assignment() {
        hasher.update(id.as_raw().to_le_bytes());
        hasher.update(color.as_raw().to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}
