use crate::graph::{Node, Position};

/// A press-move-release drag of one node.
///
/// The node keeps the offset between the pointer and its origin that it had when grabbed.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    node_id: String,
    grab_offset: Position,
}

impl DragGesture {
    pub fn begin(node: &Node, pointer: Position) -> Self {
        Self {
            node_id: node.id.clone(),
            grab_offset: Position::new(pointer.x - node.position.x, pointer.y - node.position.y),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Node position for the current pointer location.
    pub fn position_for(&self, pointer: Position) -> Position {
        Position::new(pointer.x - self.grab_offset.x, pointer.y - self.grab_offset.y)
    }
}
