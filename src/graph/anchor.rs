//! Geometry handed to the render surface: where connections leave and enter nodes.

use super::edge::Edge;
use super::node::{Node, NodeKind, Position};
use ahash::AHashMap;

/// Vertical gap between a node's bottom edge and the drop point of its "+" button.
pub const ADD_BUTTON_GAP: f64 = 60.0;

/// Width and height of a node of this kind on the canvas.
pub fn footprint(kind: NodeKind) -> (f64, f64) {
    match kind {
        NodeKind::Start | NodeKind::End => (100.0, 100.0),
        NodeKind::Api | NodeKind::Email | NodeKind::Text => (220.0, 80.0),
    }
}

/// Bottom-center of the node, where outgoing connections start.
pub fn outbound_anchor(node: &Node) -> Position {
    let (width, height) = footprint(node.kind());
    node.position.offset(width / 2.0, height)
}

/// Top-center of the node, where incoming connections end.
pub fn inbound_anchor(node: &Node) -> Position {
    let (width, _) = footprint(node.kind());
    node.position.offset(width / 2.0, 0.0)
}

/// Drop position passed on when the "+" button below `node` is clicked.
pub fn add_button_target(node: &Node) -> Position {
    let (_, height) = footprint(node.kind());
    node.position.offset(0.0, height + ADD_BUTTON_GAP)
}

/// One connection to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSegment {
    pub edge_id: String,
    pub from: Position,
    pub to: Position,
}

/// Segments for every edge whose endpoints both exist, in edge order.
pub fn edge_segments(nodes: &[Node], edges: &[Edge]) -> Vec<EdgeSegment> {
    let by_id: AHashMap<&str, &Node> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
    edges
        .iter()
        .filter_map(|edge| {
            let source = by_id.get(edge.source.as_str())?;
            let target = by_id.get(edge.target.as_str())?;
            Some(EdgeSegment {
                edge_id: edge.id.clone(),
                from: outbound_anchor(source),
                to: inbound_anchor(target),
            })
        })
        .collect()
}
