use super::InsertionRule;
use crate::graph::{Edge, Node, NodeKind, Position};
use crate::id::IdGenerator;
use itertools::Itertools;

/// Computes the replacement edge set for a node `new_id` dropped at `drop`.
///
/// Rules are tried in a fixed order and only the first match applies:
/// after start, before end, bootstrap, orphan.
pub(super) struct Rewirer<'a> {
    nodes: &'a [Node],
    edges: &'a [Edge],
    ids: &'a mut IdGenerator,
    start: Option<&'a Node>,
    end: Option<&'a Node>,
}

impl<'a> Rewirer<'a> {
    pub(super) fn new(nodes: &'a [Node], edges: &'a [Edge], ids: &'a mut IdGenerator) -> Self {
        Self {
            nodes,
            edges,
            ids,
            start: nodes.iter().find(|n| n.kind() == NodeKind::Start),
            end: nodes.iter().find(|n| n.kind() == NodeKind::End),
        }
    }

    pub(super) fn rewire(mut self, new_id: &str, drop: Position) -> (Vec<Edge>, InsertionRule) {
        if let Some(result) = self.after_start(new_id, drop) {
            return result;
        }
        if let Some(result) = self.before_end(new_id) {
            return result;
        }
        if let Some(result) = self.bootstrap(new_id) {
            return result;
        }
        (self.edges.to_vec(), InsertionRule::Orphan)
    }

    /// Drop strictly between the anchors: the new node becomes start's only successor and
    /// inherits all of start's previous successors.
    fn after_start(&mut self, new_id: &str, drop: Position) -> Option<(Vec<Edge>, InsertionRule)> {
        let (start, end) = (self.start?, self.end?);
        if !(drop.y > start.position.y && drop.y < end.position.y) {
            return None;
        }
        let current = self.edges;

        let successors: Vec<&str> = current
            .iter()
            .filter(|e| e.source == start.id)
            .map(|e| e.target.as_str())
            .unique()
            .collect();

        let mut edges: Vec<Edge> = current
            .iter()
            .filter(|e| e.source != start.id)
            .cloned()
            .collect();
        edges.push(self.link(&start.id, new_id));

        if successors.is_empty() {
            edges.push(self.link(new_id, &end.id));
            return Some((edges, InsertionRule::Bootstrap));
        }
        for target in successors {
            edges.push(self.link(new_id, target));
        }
        Some((edges, InsertionRule::AfterStart))
    }

    /// Splices the new node into the first connection that leads into end.
    fn before_end(&mut self, new_id: &str) -> Option<(Vec<Edge>, InsertionRule)> {
        let end = self.end?;
        let (nodes, current) = (self.nodes, self.edges);
        let into_end = current
            .iter()
            .find(|e| e.target == end.id && nodes.iter().any(|n| n.id == e.source))?;

        let mut edges: Vec<Edge> = current
            .iter()
            .filter(|e| e.id != into_end.id)
            .cloned()
            .collect();
        edges.push(self.link(&into_end.source, new_id));
        edges.push(self.link(new_id, &end.id));
        Some((edges, InsertionRule::BeforeEnd))
    }

    /// Only the two anchors exist: chain them through the new node.
    fn bootstrap(&mut self, new_id: &str) -> Option<(Vec<Edge>, InsertionRule)> {
        let (start, end) = (self.start?, self.end?);
        if self.nodes.len() != 2 {
            return None;
        }
        let mut edges = self.edges.to_vec();
        edges.push(self.link(&start.id, new_id));
        edges.push(self.link(new_id, &end.id));
        Some((edges, InsertionRule::Bootstrap))
    }

    fn link(&mut self, source: &str, target: &str) -> Edge {
        Edge::new(self.ids.new_id("conn"), source, target)
    }
}
