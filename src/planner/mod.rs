//! Decides where a newly added step attaches in the `start → … → end` chain.

use crate::config::PlannerConfig;
use crate::graph::{Edge, FlowGraph, Node, NodeKind, Position};
use crate::id::IdGenerator;
use std::fmt;
use tracing::debug;

mod rules;

use rules::Rewirer;

/// Which connection rule placed a new node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionRule {
    /// Became start's successor, inheriting start's previous successors.
    AfterStart,
    /// Spliced into the connection leading into end.
    BeforeEnd,
    /// Chained as `start → new → end` because start had nothing to hand over.
    Bootstrap,
    /// Added without any connection.
    Orphan,
}

impl fmt::Display for InsertionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InsertionRule::AfterStart => "after start",
            InsertionRule::BeforeEnd => "before end",
            InsertionRule::Bootstrap => "bootstrap",
            InsertionRule::Orphan => "orphan",
        };
        f.write_str(name)
    }
}

/// The outcome of planning an insertion: the node to add and the complete edge set that
/// replaces the current one.
#[derive(Debug, Clone)]
pub struct InsertionPlan {
    pub node: Node,
    pub edges: Vec<Edge>,
    pub rule: InsertionRule,
    /// Default drop position for the next insertion without an explicit target.
    pub next_drop: Position,
}

/// What was applied to a graph by [`InsertionPlanner::insert`].
#[derive(Debug, Clone, PartialEq)]
pub struct Insertion {
    pub node_id: String,
    pub rule: InsertionRule,
    pub next_drop: Position,
}

#[derive(Debug, Clone)]
pub struct InsertionPlanner {
    fallback: Position,
}

impl InsertionPlanner {
    /// `fallback` is used as drop position while either anchor is missing.
    pub fn new(fallback: Position) -> Self {
        Self { fallback }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(Position::new(config.fallback_x, config.fallback_y))
    }

    /// Where a node lands when the user did not pick a "+" target.
    ///
    /// Halfway between end and the node feeding into it, or between start and end when
    /// nothing feeds into end yet.
    pub fn default_drop_position(&self, nodes: &[Node], edges: &[Edge]) -> Position {
        self.locate(nodes.iter(), edges)
    }

    fn locate<'a, I>(&self, nodes: I, edges: &[Edge]) -> Position
    where
        I: Iterator<Item = &'a Node> + Clone,
    {
        let start = nodes.clone().find(|n| n.kind() == NodeKind::Start);
        let end = nodes.clone().find(|n| n.kind() == NodeKind::End);
        let (Some(start), Some(end)) = (start, end) else {
            return self.fallback;
        };

        let origin = edges
            .iter()
            .find(|e| e.target == end.id)
            .and_then(|e| nodes.clone().find(|n| n.id == e.source))
            .unwrap_or(start);
        origin.position.halfway_to(end.position)
    }

    /// Plans the insertion of a `kind` node without modifying anything but `ids`.
    ///
    /// `drop` is the explicit target position; `None` uses [`Self::default_drop_position`].
    pub fn plan(
        &self,
        nodes: &[Node],
        edges: &[Edge],
        kind: NodeKind,
        drop: Option<Position>,
        ids: &mut IdGenerator,
    ) -> InsertionPlan {
        let drop = drop.unwrap_or_else(|| self.default_drop_position(nodes, edges));
        let node = Node::new(ids.new_id(kind.as_str()), kind, drop);
        let (edges, rule) = Rewirer::new(nodes, edges, ids).rewire(&node.id, drop);
        let next_drop = self.locate(nodes.iter().chain(std::iter::once(&node)), &edges);

        debug!(node_id = %node.id, %kind, %rule, "Planned insertion");
        InsertionPlan {
            node,
            edges,
            rule,
            next_drop,
        }
    }

    /// Plans and applies an insertion on `graph`.
    pub fn insert(
        &self,
        graph: &mut FlowGraph,
        kind: NodeKind,
        drop: Option<Position>,
    ) -> Insertion {
        let plan = self.plan(&graph.nodes, &graph.edges, kind, drop, &mut graph.ids);
        let insertion = Insertion {
            node_id: plan.node.id.clone(),
            rule: plan.rule,
            next_drop: plan.next_drop,
        };
        graph.add_node(plan.node);
        graph.replace_edges(plan.edges);
        insertion
    }
}

impl Default for InsertionPlanner {
    fn default() -> Self {
        Self::from_config(&PlannerConfig::default())
    }
}
