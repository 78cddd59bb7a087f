//! Common test utilities for building graphs, sessions and processes.
use nagare::prelude::*;

/// A graph holding only `start` at `(0, 0)` and `end` at `(0, 300)`.
#[allow(dead_code)]
pub fn anchors_only(seed: u64) -> FlowGraph {
    FlowGraph::seeded(
        Position::new(0.0, 0.0),
        Position::new(0.0, 300.0),
        IdGenerator::seeded(seed),
    )
}

/// Ids of the `start` and `end` anchors of a graph.
#[allow(dead_code)]
pub fn anchor_ids(graph: &FlowGraph) -> (String, String) {
    let start = graph.start().expect("graph has a start node").id.clone();
    let end = graph.end().expect("graph has an end node").id.clone();
    (start, end)
}

/// `start → A → end`, with `A` at `(0, 150)`. Returns the graph and A's id.
#[allow(dead_code)]
pub fn linear_chain(seed: u64) -> (FlowGraph, String) {
    let mut graph = anchors_only(seed);
    let (start, end) = anchor_ids(&graph);
    let a = graph.next_id("api");
    graph.add_node(Node::new(a.clone(), NodeKind::Api, Position::new(0.0, 150.0)));
    graph.add_edge(&start, &a).expect("start -> A is new");
    graph.add_edge(&a, &end).expect("A -> end is new");
    (graph, a)
}

/// A fresh editing session with deterministic ids and the default configuration.
#[allow(dead_code)]
pub fn new_session(seed: u64) -> EditorSession {
    EditorSession::create_with_ids(&NagareConfig::default(), IdGenerator::seeded(seed))
}

/// A session holding `start → <kind> → end`, back in idle mode.
#[allow(dead_code)]
pub fn session_with_step(seed: u64, kind: NodeKind) -> (EditorSession, String) {
    let mut session = new_session(seed);
    assert!(session.open_element_menu());
    let insertion = session.choose_kind(kind).expect("element kinds are insertable");
    assert!(session.cancel_configuration());
    (session, insertion.node_id)
}

/// Pairs of `(source, target)` for every edge, for order-insensitive comparisons.
#[allow(dead_code)]
pub fn edge_pairs(edges: &[Edge]) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = edges
        .iter()
        .map(|e| (e.source.clone(), e.target.clone()))
        .collect();
    pairs.sort();
    pairs
}

#[allow(dead_code)]
pub fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = expected
        .iter()
        .map(|(s, t)| (s.to_string(), t.to_string()))
        .collect();
    pairs.sort();
    pairs
}

/// A minimal valid process with the given id and edit timestamp.
#[allow(dead_code)]
pub fn create_process(id: &str, name: &str, timestamp: i64) -> Process {
    Process {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{} description", name),
        tags: vec!["test".to_string()],
        nodes: vec![
            Node::new("start", NodeKind::Start, Position::new(100.0, 100.0)),
            Node::new("text1", NodeKind::Text, Position::new(100.0, 200.0)).with_payload(
                NodePayload::Text(TextConfig {
                    content: "Hello".to_string(),
                }),
            ),
            Node::new("end", NodeKind::End, Position::new(100.0, 300.0)),
        ],
        edges: vec![
            Edge::new("conn1", "start", "text1"),
            Edge::new("conn2", "text1", "end"),
        ],
        status: ProcessStatus::Draft,
        last_edited: LastEdited {
            author: "Test User".to_string(),
            time: "09:00 IST 01/01".to_string(),
            timestamp,
        },
    }
}
