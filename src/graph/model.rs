use super::edge::Edge;
use super::node::{Node, NodeKind, NodePatch, Position};
use crate::id::IdGenerator;
use tracing::{debug, warn};

/// The working copy of a process graph: nodes, directed edges and the id source for both.
///
/// All operations are total. Inputs that would break an invariant (self-loops, duplicate
/// ordered edges, edges to unknown nodes, updates of unknown ids) are absorbed as no-ops and
/// reported through the return value rather than as errors.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) ids: IdGenerator,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the given generator for every id this graph creates.
    pub fn with_ids(ids: IdGenerator) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            ids,
        }
    }

    /// Rebuilds a graph from persisted collections. Existing ids are reserved so new ones never
    /// collide with them.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>, mut ids: IdGenerator) -> Self {
        ids.reserve(nodes.iter().map(|n| n.id.clone()));
        ids.reserve(edges.iter().map(|e| e.id.clone()));
        Self { nodes, edges, ids }
    }

    /// A fresh graph holding only the `start` and `end` anchors.
    pub fn seeded(start: Position, end: Position, ids: IdGenerator) -> Self {
        let mut graph = Self::with_ids(ids);
        let start_id = graph.ids.new_id(NodeKind::Start.as_str());
        let end_id = graph.ids.new_id(NodeKind::End.as_str());
        graph.nodes.push(Node::new(start_id, NodeKind::Start, start));
        graph.nodes.push(Node::new(end_id, NodeKind::End, end));
        graph
    }

    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// First node of the given kind, in insertion order.
    pub fn find_kind(&self, kind: NodeKind) -> Option<&Node> {
        self.nodes.iter().find(|n| n.kind() == kind)
    }

    pub fn start(&self) -> Option<&Node> {
        self.find_kind(NodeKind::Start)
    }

    pub fn end(&self) -> Option<&Node> {
        self.find_kind(NodeKind::End)
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges.iter().any(|e| e.connects(source, target))
    }

    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == id)
    }

    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target == id)
    }

    /// Draws a new id from this graph's generator.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.ids.new_id(prefix)
    }

    pub fn add_node(&mut self, node: Node) {
        debug!(node_id = %node.id, kind = %node.kind(), "Adding node");
        self.ids.reserve([node.id.clone()]);
        self.nodes.push(node);
    }

    /// Removes a node and every edge that starts or ends at it.
    ///
    /// Anchors are not protected here; keeping `start`/`end` alive is the caller's concern.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        let node = self.nodes.remove(index);
        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(id));
        debug!(
            node_id = %id,
            removed_edges = before - self.edges.len(),
            "Removed node"
        );
        Some(node)
    }

    /// Merges `patch` into the node with `id`. Returns `false` if the id is unknown.
    ///
    /// A payload of a different kind than the node's is ignored: a node never changes kind.
    pub fn update_node(&mut self, id: &str, patch: NodePatch) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            debug!(node_id = %id, "Ignoring update of unknown node");
            return false;
        };

        if let Some(label) = patch.label {
            node.label = label;
        }
        if let Some(position) = patch.position {
            node.position = position;
        }
        if let Some(payload) = patch.payload {
            if payload.kind() == node.kind() {
                node.payload = payload;
            } else {
                warn!(
                    node_id = %id,
                    node_kind = %node.kind(),
                    payload_kind = %payload.kind(),
                    "Ignoring payload of a different kind"
                );
            }
        }
        true
    }

    /// Connects `source` to `target`, returning the new edge id.
    ///
    /// Returns `None` without touching the graph for self-loops, already existing ordered
    /// pairs, and endpoints that are not in the graph.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Option<String> {
        if source == target {
            debug!(node_id = %source, "Suppressing self-loop");
            return None;
        }
        if self.has_edge(source, target) {
            debug!(%source, %target, "Suppressing duplicate edge");
            return None;
        }
        if !self.contains_node(source) || !self.contains_node(target) {
            warn!(%source, %target, "Suppressing edge to an unknown node");
            return None;
        }

        let id = self.ids.new_id("conn");
        debug!(edge_id = %id, %source, %target, "Adding edge");
        self.edges.push(Edge::new(id.clone(), source, target));
        Some(id)
    }

    pub fn remove_edge(&mut self, id: &str) -> Option<Edge> {
        let index = self.edges.iter().position(|e| e.id == id)?;
        Some(self.edges.remove(index))
    }

    /// Replaces the whole edge collection, as produced by an insertion plan.
    pub(crate) fn replace_edges(&mut self, edges: Vec<Edge>) {
        self.ids.reserve(edges.iter().map(|e| e.id.clone()));
        self.edges = edges;
    }
}
