pub mod anchor;
pub mod edge;
pub mod model;
pub mod node;
pub mod validity;

pub use anchor::{EdgeSegment, add_button_target, edge_segments, footprint};
pub use edge::Edge;
pub use model::FlowGraph;
pub use node::{
    ApiConfig, EmailConfig, HttpMethod, Node, NodeKind, NodePatch, NodePayload, Position,
    TextConfig,
};
pub use validity::{check_save_valid, is_save_valid};
