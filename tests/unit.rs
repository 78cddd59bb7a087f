//! Unit tests for core Nagare functionality.
mod common;
use chrono::{Local, TimeZone};
use nagare::graph::{add_button_target, edge_segments, footprint};
use nagare::id::{FRAGMENT_LEN, generate_id};
use nagare::identity::{UNKNOWN_AUTHOR, author_name};
use nagare::prelude::*;
use std::collections::HashSet;

fn assert_id_shape(id: &str, prefix: &str) {
    let fragment = id
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or_else(|| panic!("'{}' does not start with '{}_'", id, prefix));
    assert_eq!(fragment.len(), FRAGMENT_LEN);
    assert!(
        fragment
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
    );
}

#[test]
fn test_id_format() {
    let mut ids = IdGenerator::seeded(1);
    assert_id_shape(&ids.new_id("api"), "api");
    assert_id_shape(&ids.new_id("conn"), "conn");
    assert_id_shape(&generate_id("process"), "process");
}

#[test]
fn test_ids_are_unique() {
    let mut ids = IdGenerator::new();
    let issued: HashSet<String> = (0..2_000).map(|_| ids.new_id("conn")).collect();
    assert_eq!(issued.len(), 2_000);
}

#[test]
fn test_seeded_ids_are_reproducible() {
    let mut a = IdGenerator::seeded(5);
    let mut b = IdGenerator::seeded(5);
    for _ in 0..10 {
        assert_eq!(a.new_id("text"), b.new_id("text"));
    }
}

#[test]
fn test_reserved_ids_are_never_returned() {
    let first = IdGenerator::seeded(9).new_id("email");

    let mut ids = IdGenerator::seeded(9);
    ids.reserve([first.clone()]);
    assert_ne!(ids.new_id("email"), first);
}

#[test]
fn test_node_kind_parsing_and_display() {
    assert_eq!("API".parse::<NodeKind>(), Ok(NodeKind::Api));
    assert_eq!(" email ".parse::<NodeKind>(), Ok(NodeKind::Email));
    assert!("webhook".parse::<NodeKind>().is_err());
    assert_eq!(format!("{}", NodeKind::Text), "text");
    assert_eq!(format!("{:<6}|", NodeKind::Api), "api   |");
    assert!(NodeKind::Start.is_anchor());
    assert!(NodeKind::ELEMENTS.iter().all(|k| !k.is_anchor()));
}

#[test]
fn test_payload_set_field() {
    let mut api = NodePayload::default_for(NodeKind::Api);
    assert!(api.set_field("method", "post"));
    assert!(api.set_field("url", "https://api.example.com"));
    assert!(!api.set_field("method", "PATCH"));
    assert!(!api.set_field("subject", "Hello"));
    assert_eq!(
        api,
        NodePayload::Api(ApiConfig {
            method: HttpMethod::Post,
            url: "https://api.example.com".to_string(),
            ..ApiConfig::default()
        })
    );

    let mut start = NodePayload::default_for(NodeKind::Start);
    assert!(!start.set_field("content", "x"));
    assert_eq!(start.kind(), NodeKind::Start);
}

#[test]
fn test_http_method_display() {
    assert_eq!(HttpMethod::default(), HttpMethod::Get);
    assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    assert_eq!("put".parse::<HttpMethod>(), Ok(HttpMethod::Put));
}

#[test]
fn test_anchor_geometry() {
    let start = Node::new("s", NodeKind::Start, Position::new(0.0, 0.0));
    let step = Node::new("a", NodeKind::Api, Position::new(0.0, 200.0));

    assert_eq!(footprint(NodeKind::End), (100.0, 100.0));
    assert_eq!(footprint(NodeKind::Email), (220.0, 80.0));
    assert_eq!(add_button_target(&start), Position::new(0.0, 160.0));
    assert_eq!(add_button_target(&step), Position::new(0.0, 340.0));

    let edges = vec![
        Edge::new("c1", "s", "a"),
        Edge::new("c2", "a", "ghost"),
    ];
    let segments = edge_segments(&[start, step], &edges);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].edge_id, "c1");
    assert_eq!(segments[0].from, Position::new(50.0, 100.0));
    assert_eq!(segments[0].to, Position::new(110.0, 200.0));
}

#[test]
fn test_author_name_falls_back() {
    assert_eq!(author_name(&StaticIdentity::named("Jane Smith")), "Jane Smith");
    assert_eq!(author_name(&StaticIdentity::named("  Jane  ")), "Jane");
    assert_eq!(author_name(&StaticIdentity::named("")), UNKNOWN_AUTHOR);
    assert_eq!(author_name(&StaticIdentity::anonymous()), "Unknown User");
}

#[test]
fn test_last_edited_format() {
    let when = Local
        .with_ymd_and_hms(2024, 12, 5, 14, 30, 0)
        .single()
        .expect("unambiguous local time");
    let stamp = LastEdited::at("John Doe", when);
    assert_eq!(stamp.author, "John Doe");
    assert_eq!(stamp.time, "14:30 IST 12/05");
    assert_eq!(stamp.timestamp, when.timestamp_millis());
}

#[test]
fn test_status_display() {
    assert_eq!(ProcessStatus::default(), ProcessStatus::Draft);
    assert_eq!(ProcessStatus::Passed.to_string(), "Passed");
    assert_eq!(format!("{:>7}", ProcessStatus::Failed), " Failed");
}

#[test]
fn test_error_messages() {
    assert_eq!(
        GraphValidationError::TooFewConnections { found: 1 }.to_string(),
        "The process must be connected: expected at least 2 connections, found 1"
    );
    assert_eq!(
        EditorError::from(GraphValidationError::MissingEnd).to_string(),
        "Invalid process: The process has no end node"
    );
    assert_eq!(EditorError::EmptyName.to_string(), "Please provide a process name");
    assert_eq!(
        EditorError::from(StoreError::NotFound("7".to_string())).to_string(),
        "Process '7' not found in the store"
    );
}

#[test]
fn test_editor_mode_display() {
    assert_eq!(EditorMode::Idle.to_string(), "idle");
    assert_eq!(
        EditorMode::Connecting {
            source: "api_1".to_string()
        }
        .to_string(),
        "connecting from 'api_1'"
    );
    assert_eq!(
        InsertionRule::BeforeEnd.to_string(),
        "before end"
    );
}
