use crate::graph::Position;
use std::fmt;

/// The gesture an editing session is currently in the middle of.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorMode {
    #[default]
    Idle,
    /// Waiting for the user to pick the target of a connection from `source`.
    Connecting { source: String },
    /// The configuration dialog for `node_id` is open.
    ConfiguringNode { node_id: String },
    /// The element menu is open. `position` is the "+" target, if one was clicked.
    ChoosingElementType { position: Option<Position> },
    /// The session was saved; every further gesture is ignored.
    Closed,
}

impl EditorMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, EditorMode::Idle)
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorMode::Idle => f.write_str("idle"),
            EditorMode::Connecting { source } => write!(f, "connecting from '{}'", source),
            EditorMode::ConfiguringNode { node_id } => write!(f, "configuring '{}'", node_id),
            EditorMode::ChoosingElementType { .. } => f.write_str("choosing an element type"),
            EditorMode::Closed => f.write_str("closed"),
        }
    }
}
