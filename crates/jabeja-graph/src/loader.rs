use std::fs;
use std::path::Path;

use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_core::NodeId;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::builder::GraphBuilder;
use crate::metis::parse_metis;
use crate::serialization::graph_from_json;

/// On-disk graph formats understood by [`load_graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GraphFormat {
    /// METIS adjacency lists (`.graph`).
    Metis,
    /// Whitespace separated `a b` pairs, one undirected edge per line.
    EdgeList,
    /// JSON snapshot produced by [`graph_to_json`](crate::graph_to_json).
    Json,
}

impl GraphFormat {
    /// Guesses the format from a file extension, defaulting to an edge list.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("graph") | Some("metis") => GraphFormat::Metis,
            Some("json") => GraphFormat::Json,
            _ => GraphFormat::EdgeList,
        }
    }
}

/// Reads and parses a graph file. Colors are assigned afterwards by an
/// [`InitialColoring`](crate::InitialColoring) policy.
pub fn load_graph(path: &Path, format: GraphFormat) -> Result<GraphBuilder, JabejaError> {
    let contents = fs::read_to_string(path).map_err(|err| JabejaError::io("graph-read", err, path))?;
    let builder = match format {
        GraphFormat::Metis => parse_metis(&contents),
        GraphFormat::EdgeList => parse_edge_list(&contents),
        GraphFormat::Json => graph_from_json(&contents),
    }
    .map_err(|err| attach_path(err, path))?;
    debug!(
        "loaded {} nodes from {} as {:?}",
        builder.len(),
        path.display(),
        format
    );
    Ok(builder)
}

/// Parses an undirected edge list. Lines starting with `#` or `%` are
/// comments; a single id on a line declares an isolated node; tokens past the
/// second (weights) are ignored.
pub fn parse_edge_list(input: &str) -> Result<GraphBuilder, JabejaError> {
    let mut builder = GraphBuilder::new();
    for (index, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
            continue;
        }
        let mut tokens = trimmed.split_whitespace();
        let a = parse_id(tokens.next(), index + 1)?;
        match tokens.next() {
            None => {
                builder.ensure_node(a);
            }
            Some(token) => {
                let b = parse_id(Some(token), index + 1)?;
                if a == b {
                    return Err(JabejaError::Graph(
                        ErrorInfo::new("self-loop", "edge connects a node to itself")
                            .with_context("line", index + 1)
                            .with_context("node", a),
                    ));
                }
                builder.add_edge(a, b);
            }
        }
    }
    Ok(builder)
}

fn parse_id(token: Option<&str>, line_no: usize) -> Result<NodeId, JabejaError> {
    let token = token.unwrap_or_default();
    token.parse::<u64>().map(NodeId::from_raw).map_err(|_| {
        JabejaError::Serde(
            ErrorInfo::new("edge-list-number", "expected a non-negative node id")
                .with_context("line", line_no)
                .with_context("token", token),
        )
    })
}

fn attach_path(err: JabejaError, path: &Path) -> JabejaError {
    let with_path = |info: ErrorInfo| info.with_context("path", path.display());
    match err {
        JabejaError::Config(info) => JabejaError::Config(with_path(info)),
        JabejaError::Graph(info) => JabejaError::Graph(with_path(info)),
        JabejaError::Sampling(info) => JabejaError::Sampling(with_path(info)),
        JabejaError::Serde(info) => JabejaError::Serde(with_path(info)),
        JabejaError::Io(info) => JabejaError::Io(with_path(info)),
    }
}
