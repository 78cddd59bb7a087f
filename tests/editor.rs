//! Tests for the editing session state machine and saving.
mod common;
use common::{anchor_ids, create_process, edge_pairs, new_session, pairs, session_with_step};
use nagare::editor::DEFAULT_TAG;
use nagare::prelude::*;

#[test]
fn test_new_session_starts_idle_with_anchors() {
    let session = new_session(1);
    assert_eq!(session.mode(), &EditorMode::Idle);
    assert_eq!(session.graph().nodes().len(), 2);
    assert!(session.graph().edges().is_empty());
    assert_eq!(session.process_id(), None);
    assert_eq!(session.status(), ProcessStatus::Draft);
    assert_eq!(session.check(), Err(GraphValidationError::NoElements));

    let start = session.graph().start().expect("start is seeded");
    let end = session.graph().end().expect("end is seeded");
    assert_eq!(start.position, Position::new(600.0, 100.0));
    assert_eq!(end.position, Position::new(600.0, 400.0));
    assert_eq!(session.default_drop_position(), Position::new(600.0, 250.0));
}

#[test]
fn test_choose_kind_inserts_and_opens_configuration() {
    let mut session = new_session(2);
    assert!(session.open_element_menu());
    assert_eq!(
        session.mode(),
        &EditorMode::ChoosingElementType { position: None }
    );

    let insertion = session.choose_kind(NodeKind::Email).expect("email is insertable");
    assert_eq!(insertion.rule, InsertionRule::Bootstrap);
    assert_eq!(
        session.mode(),
        &EditorMode::ConfiguringNode {
            node_id: insertion.node_id.clone()
        }
    );
    assert!(session.check().is_ok());

    let payload = NodePayload::Email(EmailConfig {
        to: "customer@example.com".to_string(),
        subject: "Welcome".to_string(),
        message: "Hello!".to_string(),
    });
    assert!(session.save_configuration(payload.clone()));
    assert!(session.mode().is_idle());
    let node = session.graph().node(&insertion.node_id).expect("node exists");
    assert_eq!(node.payload, payload);
}

#[test]
fn test_choose_kind_requires_open_menu() {
    let mut session = new_session(3);
    assert_eq!(session.choose_kind(NodeKind::Api), None);
    assert_eq!(session.graph().nodes().len(), 2);
}

#[test]
fn test_anchor_kinds_cannot_be_chosen() {
    let mut session = new_session(4);
    session.open_element_menu();
    assert_eq!(session.choose_kind(NodeKind::End), None);
    assert_eq!(session.graph().nodes().len(), 2);
    assert!(matches!(
        session.mode(),
        EditorMode::ChoosingElementType { .. }
    ));

    assert!(session.dismiss_menu());
    assert!(session.mode().is_idle());
}

#[test]
fn test_add_below_end_splices_before_end() {
    let (mut session, a) = session_with_step(5, NodeKind::Api);
    let (start, end) = anchor_ids(session.graph());

    assert!(session.click_add_below(&end));
    let insertion = session.choose_kind(NodeKind::Text).expect("text is insertable");
    assert_eq!(insertion.rule, InsertionRule::BeforeEnd);

    let b = insertion.node_id.as_str();
    assert_eq!(
        edge_pairs(session.graph().edges()),
        pairs(&[(start.as_str(), a.as_str()), (a.as_str(), b), (b, end.as_str())])
    );
    // The "+" below end sits 60 units under its 100-unit footprint.
    let node = session.graph().node(b).expect("node exists");
    assert_eq!(node.position, Position::new(600.0, 560.0));
}

#[test]
fn test_click_add_below_unknown_node_is_ignored() {
    let mut session = new_session(6);
    assert!(!session.click_add_below("missing"));
    assert!(session.mode().is_idle());
}

#[test]
fn test_connect_to_another_node() {
    let mut session = new_session(7);
    let (start, end) = anchor_ids(session.graph());

    assert!(session.begin_connect(&start));
    assert_eq!(
        session.mode(),
        &EditorMode::Connecting {
            source: start.clone()
        }
    );
    let edge = session.select_target(&end);
    assert!(edge.is_some());
    assert!(session.mode().is_idle());
    assert!(session.graph().has_edge(&start, &end));

    // A second identical connection is suppressed.
    session.begin_connect(&start);
    assert_eq!(session.select_target(&end), None);
    assert_eq!(session.graph().edges().len(), 1);
}

#[test]
fn test_reselecting_source_cancels_connection() {
    let (mut session, a) = session_with_step(8, NodeKind::Api);
    let before = session.graph().edges().to_vec();

    assert!(session.begin_connect(&a));
    assert_eq!(session.select_target(&a), None);
    assert!(session.mode().is_idle());
    assert_eq!(session.graph().edges(), before.as_slice());
}

#[test]
fn test_cancel_connect() {
    let mut session = new_session(9);
    let (start, _) = anchor_ids(session.graph());

    assert!(!session.cancel_connect());
    session.begin_connect(&start);
    assert!(session.cancel_connect());
    assert!(session.mode().is_idle());
    assert_eq!(session.select_target(&start), None);
}

#[test]
fn test_gestures_are_ignored_outside_their_mode() {
    let mut session = new_session(10);
    let (start, _) = anchor_ids(session.graph());

    session.open_element_menu();
    assert!(!session.begin_connect(&start));
    assert!(!session.open_element_menu());
    assert!(!session.click_node(&start));
    assert!(!session.save_configuration(NodePayload::Text(TextConfig::default())));
    assert!(!session.cancel_configuration());
    assert!(matches!(
        session.mode(),
        EditorMode::ChoosingElementType { .. }
    ));
}

#[test]
fn test_click_node_opens_configuration_for_steps_only() {
    let (mut session, a) = session_with_step(11, NodeKind::Text);
    let (start, _) = anchor_ids(session.graph());

    assert!(!session.click_node(&start));
    assert!(session.mode().is_idle());

    assert!(session.click_node(&a));
    assert_eq!(
        session.mode(),
        &EditorMode::ConfiguringNode { node_id: a.clone() }
    );
    assert!(session.cancel_configuration());
    assert_eq!(
        session.graph().node(&a).map(|n| n.payload.clone()),
        Some(NodePayload::Text(TextConfig::default()))
    );
}

#[test]
fn test_rename_node() {
    let (mut session, a) = session_with_step(12, NodeKind::Api);
    assert!(session.rename_node(&a, "Check Inventory"));
    assert_eq!(
        session.graph().node(&a).map(|n| n.label.as_str()),
        Some("Check Inventory")
    );
    assert!(!session.rename_node("missing", "Nothing"));
}

#[test]
fn test_drag_keeps_grab_offset() {
    let (mut session, a) = session_with_step(13, NodeKind::Api);
    let origin = session.graph().node(&a).expect("node exists").position;

    assert!(session.begin_drag(&a, origin.offset(10.0, 5.0)));
    assert!(session.is_dragging());
    assert!(session.drag_to(Position::new(300.0, 200.0)));
    assert!(session.drag_to(Position::new(310.0, 220.0)));
    assert!(session.end_drag());

    assert!(!session.is_dragging());
    assert!(!session.drag_to(Position::new(0.0, 0.0)));
    let node = session.graph().node(&a).expect("node exists");
    assert_eq!(node.position, Position::new(300.0, 215.0));
}

#[test]
fn test_drag_moves_anchor_but_keeps_edges() {
    let (mut session, _) = session_with_step(14, NodeKind::Email);
    let (start, _) = anchor_ids(session.graph());
    let edges = session.graph().edges().to_vec();

    session.begin_drag(&start, Position::new(600.0, 100.0));
    session.drag_to(Position::new(650.0, 50.0));
    session.end_drag();

    assert_eq!(
        session.graph().start().map(|n| n.position),
        Some(Position::new(650.0, 50.0))
    );
    assert_eq!(session.graph().edges(), edges.as_slice());
}

#[test]
fn test_delete_node_cascades_and_returns_to_idle() {
    let (mut session, a) = session_with_step(15, NodeKind::Api);
    session.click_node(&a);
    session.begin_drag(&a, Position::new(0.0, 0.0));

    let removed = session.delete_node(&a).expect("node exists");
    assert_eq!(removed.id, a);
    assert!(session.mode().is_idle());
    assert!(!session.is_dragging());
    assert!(session.graph().edges().is_empty());
    assert_eq!(session.check(), Err(GraphValidationError::NoElements));
}

#[test]
fn test_deleting_an_anchor_still_cascades() {
    let (mut session, a) = session_with_step(16, NodeKind::Api);
    let (start, end) = anchor_ids(session.graph());

    assert!(session.delete_node(&start).is_some());
    assert_eq!(
        edge_pairs(session.graph().edges()),
        pairs(&[(a.as_str(), end.as_str())])
    );
    assert_eq!(session.check(), Err(GraphValidationError::MissingStart));
}

#[test]
fn test_segments_follow_anchors() {
    let (session, a) = session_with_step(17, NodeKind::Api);
    let (start, _) = anchor_ids(session.graph());
    let segments = session.segments();
    assert_eq!(segments.len(), 2);

    let first = segments
        .iter()
        .find(|s| {
            session
                .graph()
                .edges()
                .iter()
                .any(|e| e.id == s.edge_id && e.source == start && e.target == a)
        })
        .expect("start -> step is drawn");
    // Start is 100 wide at (600, 100); the step is 220 wide at (600, 250).
    assert_eq!(first.from, Position::new(650.0, 200.0));
    assert_eq!(first.to, Position::new(710.0, 250.0));
}

#[test]
fn test_save_requires_idle_mode() {
    let (mut session, _) = session_with_step(18, NodeKind::Api);
    session.set_name("Busy");
    session.open_element_menu();
    let mut store = MemoryStore::new();

    let result = session.save(&mut store, &StaticIdentity::named("Jane Smith"));
    assert!(matches!(result, Err(EditorError::Busy(_))));
    assert!(store.is_empty());
    assert!(!session.is_closed());
}

#[test]
fn test_save_requires_name() {
    let (mut session, _) = session_with_step(19, NodeKind::Api);
    session.set_name("   ");
    let mut store = MemoryStore::new();

    let result = session.save(&mut store, &StaticIdentity::anonymous());
    assert!(matches!(result, Err(EditorError::EmptyName)));
    assert!(store.is_empty());
}

#[test]
fn test_save_rejects_invalid_graph() {
    let mut session = new_session(20);
    session.set_name("Empty");
    let mut store = MemoryStore::new();

    let result = session.save(&mut store, &StaticIdentity::anonymous());
    assert!(matches!(
        result,
        Err(EditorError::InvalidGraph(GraphValidationError::NoElements))
    ));
    assert!(store.is_empty());
    assert!(session.mode().is_idle());
}

#[test]
fn test_save_new_process_and_close() {
    let (mut session, _) = session_with_step(21, NodeKind::Api);
    session.set_name("Customer Onboarding");
    session.set_description("New customer registration");
    let mut store = MemoryStore::new();

    let process = session
        .save(&mut store, &StaticIdentity::named("Jane Smith"))
        .expect("valid session saves");

    assert!(process.id.starts_with("process_"));
    assert_eq!(process.name, "Customer Onboarding");
    assert_eq!(process.description, "New customer registration");
    assert_eq!(process.tags, vec![DEFAULT_TAG.to_string()]);
    assert_eq!(process.nodes.len(), 3);
    assert_eq!(process.edges.len(), 2);
    assert_eq!(process.status, ProcessStatus::Draft);
    assert_eq!(process.last_edited.author, "Jane Smith");

    assert_eq!(store.get(&process.id).expect("memory store"), Some(process.clone()));
    assert!(session.is_closed());
    assert_eq!(session.process_id(), Some(process.id.as_str()));

    // A closed session accepts nothing further.
    assert!(!session.open_element_menu());
    assert!(session.delete_node(&process.nodes[0].id).is_none());
    assert!(matches!(
        session.save(&mut store, &StaticIdentity::anonymous()),
        Err(EditorError::Closed)
    ));
}

#[test]
fn test_save_without_identity_uses_unknown_user() {
    let (mut session, _) = session_with_step(22, NodeKind::Text);
    session.set_name("Anonymous");
    let mut store = MemoryStore::new();

    let process = session
        .save(&mut store, &StaticIdentity::named("  "))
        .expect("valid session saves");
    assert_eq!(process.last_edited.author, "Unknown User");
}

#[test]
fn test_open_and_resave_existing_process() {
    let mut store = MemoryStore::new();
    let mut original = create_process("42", "Order Processing", 1_000);
    original.status = ProcessStatus::Failed;
    store.put(original.clone()).expect("memory store");

    let config = NagareConfig::default();
    let mut session =
        EditorSession::open_with_ids(&store, "42", &config, IdGenerator::seeded(23))
            .expect("process exists");
    assert_eq!(session.process_id(), Some("42"));
    assert_eq!(session.name(), "Order Processing");
    assert_eq!(session.description(), original.description);
    assert_eq!(session.graph().nodes(), original.nodes.as_slice());

    session.click_add_below("end");
    session.choose_kind(NodeKind::Email);
    session.cancel_configuration();

    let saved = session
        .save(&mut store, &StaticIdentity::named("John Doe"))
        .expect("valid session saves");
    assert_eq!(saved.id, "42");
    assert_eq!(saved.tags, original.tags);
    assert_eq!(saved.status, ProcessStatus::Failed);
    assert_eq!(saved.nodes.len(), 4);
    // text1 -> end was split around the new step.
    assert!(saved.edges.iter().all(|e| e.id != "conn2"));
    assert_eq!(saved.edges.len(), 3);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_open_missing_process() {
    let store = MemoryStore::new();
    let result = EditorSession::open(&store, "nope", &NagareConfig::default());
    assert!(matches!(result, Err(EditorError::NotFound(id)) if id == "nope"));
}

#[test]
fn test_viewport_zoom_limits() {
    let mut session = new_session(24);
    assert_eq!(session.viewport().zoom(), 100);

    for _ in 0..20 {
        session.viewport_mut().zoom_in();
    }
    assert_eq!(session.viewport().zoom(), 200);

    for _ in 0..20 {
        session.viewport_mut().zoom_out();
    }
    assert_eq!(session.viewport().zoom(), 50);
    assert_eq!(session.viewport().scale(), 0.5);

    assert_eq!(session.viewport_mut().reset(), 100);
}
