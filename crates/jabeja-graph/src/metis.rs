use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_core::NodeId;
use log::warn;

use crate::builder::GraphBuilder;

/// Layout flags decoded from the optional `fmt` header field.
#[derive(Debug, Clone, Copy, Default)]
struct MetisFormat {
    vertex_sizes: bool,
    vertex_weights: bool,
    edge_weights: bool,
    constraints: usize,
}

/// Parses a METIS adjacency file into a builder.
///
/// Vertices are numbered from 1 in the file and from 0 in the returned
/// builder. Vertex sizes, vertex weights and edge weights are skipped.
/// Comment lines start with `%`; blank lines after the header are isolated
/// vertices.
pub fn parse_metis(input: &str) -> Result<GraphBuilder, JabejaError> {
    let mut lines = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim_start().starts_with('%'))
        .skip_while(|(_, line)| line.trim().is_empty());

    let (header_index, header) = lines
        .next()
        .ok_or_else(|| {
            JabejaError::Serde(metis_error(
                "metis-missing-header",
                "input holds no header line",
                0,
            ))
        })?;
    let (vertex_count, edge_count, format) = parse_header(header, header_index + 1)?;

    let mut builder = GraphBuilder::new();
    let mut entries = 0usize;
    for vertex in 0..vertex_count {
        let (index, line) = lines.next().ok_or_else(|| {
            JabejaError::Serde(
                metis_error(
                    "metis-truncated",
                    "fewer vertex lines than announced",
                    header_index + 1,
                )
                .with_context("expected", vertex_count)
                .with_context("seen", vertex),
            )
        })?;
        let neighbors = parse_vertex_line(line, index + 1, vertex_count, format)?;
        entries += neighbors.len();
        builder.insert_node(NodeId::from_raw(vertex as u64), neighbors)?;
    }

    if lines.any(|(_, line)| !line.trim().is_empty()) {
        warn!("ignoring trailing data after {vertex_count} METIS vertex lines");
    }
    if entries != edge_count * 2 {
        warn!(
            "METIS header announces {edge_count} edges but adjacency lists hold {} entries",
            entries
        );
    }
    Ok(builder)
}

fn parse_header(line: &str, line_no: usize) -> Result<(usize, usize, MetisFormat), JabejaError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(JabejaError::Serde(metis_error(
            "metis-header",
            "header must hold vertex and edge counts",
            line_no,
        )));
    }
    let vertices = parse_usize(tokens[0], line_no)?;
    let edges = parse_usize(tokens[1], line_no)?;
    let mut format = MetisFormat {
        constraints: 1,
        ..MetisFormat::default()
    };
    if let Some(fmt) = tokens.get(2) {
        if fmt.len() > 3 || !fmt.chars().all(|c| c == '0' || c == '1') {
            return Err(JabejaError::Serde(
                metis_error("metis-format", "fmt must be up to three 0/1 digits", line_no)
                    .with_context("token", fmt),
            ));
        }
        let padded = format!("{fmt:0>3}");
        let flags: Vec<bool> = padded.chars().map(|c| c == '1').collect();
        format.vertex_sizes = flags[0];
        format.vertex_weights = flags[1];
        format.edge_weights = flags[2];
    }
    if let Some(ncon) = tokens.get(3) {
        format.constraints = parse_usize(ncon, line_no)?;
    }
    Ok((vertices, edges, format))
}

fn parse_vertex_line(
    line: &str,
    line_no: usize,
    vertex_count: usize,
    format: MetisFormat,
) -> Result<Vec<NodeId>, JabejaError> {
    let mut tokens = line.split_whitespace();
    if format.vertex_sizes {
        tokens.next();
    }
    if format.vertex_weights {
        for _ in 0..format.constraints {
            tokens.next();
        }
    }
    let step = if format.edge_weights { 2 } else { 1 };
    let mut neighbors = Vec::new();
    for token in tokens.step_by(step) {
        let raw = parse_usize(token, line_no)?;
        if raw == 0 || raw > vertex_count {
            return Err(JabejaError::Serde(
                metis_error("metis-neighbor-range", "neighbour index out of range", line_no)
                    .with_context("token", token),
            ));
        }
        neighbors.push(NodeId::from_raw(raw as u64 - 1));
    }
    Ok(neighbors)
}

fn parse_usize(token: &str, line_no: usize) -> Result<usize, JabejaError> {
    token.parse().map_err(|_| {
        JabejaError::Serde(
            metis_error("metis-number", "expected a non-negative integer", line_no)
                .with_context("token", token),
        )
    })
}

fn metis_error(code: &str, message: &str, line_no: usize) -> ErrorInfo {
    ErrorInfo::new(code, message).with_context("line", line_no)
}
