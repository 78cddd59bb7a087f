use super::edge::Edge;
use super::node::{Node, NodeKind};
use crate::error::GraphValidationError;

/// Minimum number of connections a savable process must have (`start → step → end`).
pub const MIN_CONNECTIONS: usize = 2;

/// Checks the structural lower bound a graph must meet before it may be saved.
///
/// The check counts; it does not trace paths. A graph with a start, an end, one step and two
/// edges passes even if the step is not actually reachable from start.
pub fn check_save_valid(nodes: &[Node], edges: &[Edge]) -> Result<(), GraphValidationError> {
    if !nodes.iter().any(|n| n.kind() == NodeKind::Start) {
        return Err(GraphValidationError::MissingStart);
    }
    if !nodes.iter().any(|n| n.kind() == NodeKind::End) {
        return Err(GraphValidationError::MissingEnd);
    }
    if !nodes.iter().any(|n| !n.is_anchor()) {
        return Err(GraphValidationError::NoElements);
    }
    if edges.len() < MIN_CONNECTIONS {
        return Err(GraphValidationError::TooFewConnections {
            found: edges.len(),
        });
    }
    Ok(())
}

pub fn is_save_valid(nodes: &[Node], edges: &[Edge]) -> bool {
    check_save_valid(nodes, edges).is_ok()
}
