use super::store::ProcessStore;
use super::{LastEdited, Process, ProcessStatus};
use crate::error::StoreError;
use crate::graph::{ApiConfig, EmailConfig, Edge, Node, NodeKind, NodePayload, Position};
use chrono::Utc;
use tracing::info;

const DAY_MILLIS: i64 = 86_400_000;

/// The example processes installed into an empty store.
pub fn example_processes() -> Vec<Process> {
    let now = Utc::now().timestamp_millis();
    vec![
        Process {
            id: "1".to_string(),
            name: "Customer Onboarding".to_string(),
            description: "Process for new customer registration and setup".to_string(),
            tags: vec!["customer".to_string(), "onboarding".to_string()],
            nodes: vec![
                Node::new("start", NodeKind::Start, Position::new(100.0, 100.0)),
                Node::new("api1", NodeKind::Api, Position::new(100.0, 200.0))
                    .with_label("Verify Email")
                    .with_payload(NodePayload::Api(ApiConfig {
                        url: "https://api.example.com/verify".to_string(),
                        ..ApiConfig::default()
                    })),
                Node::new("email1", NodeKind::Email, Position::new(100.0, 300.0))
                    .with_label("Welcome Email")
                    .with_payload(NodePayload::Email(EmailConfig {
                        to: "customer@example.com".to_string(),
                        ..EmailConfig::default()
                    })),
                Node::new("end", NodeKind::End, Position::new(100.0, 400.0)),
            ],
            edges: vec![
                Edge::new("conn1", "start", "api1"),
                Edge::new("conn2", "api1", "email1"),
                Edge::new("conn3", "email1", "end"),
            ],
            status: ProcessStatus::Passed,
            last_edited: LastEdited {
                author: "John Doe".to_string(),
                time: "14:30 IST 12/05".to_string(),
                timestamp: now,
            },
        },
        Process {
            id: "2".to_string(),
            name: "Order Processing".to_string(),
            description: "Automate the order fulfillment process".to_string(),
            tags: vec!["order".to_string(), "fulfillment".to_string()],
            nodes: vec![
                Node::new("start", NodeKind::Start, Position::new(100.0, 100.0)),
                Node::new("api1", NodeKind::Api, Position::new(100.0, 200.0))
                    .with_label("Check Inventory")
                    .with_payload(NodePayload::Api(ApiConfig {
                        url: "https://api.example.com/inventory".to_string(),
                        ..ApiConfig::default()
                    })),
                Node::new("end", NodeKind::End, Position::new(100.0, 300.0)),
            ],
            edges: vec![
                Edge::new("conn1", "start", "api1"),
                Edge::new("conn2", "api1", "end"),
            ],
            status: ProcessStatus::Failed,
            last_edited: LastEdited {
                author: "Jane Smith".to_string(),
                time: "09:45 IST 11/05".to_string(),
                timestamp: now - DAY_MILLIS,
            },
        },
    ]
}

/// Installs [`example_processes`] when `store` holds nothing. Returns how many were added.
pub fn seed_if_empty(store: &mut dyn ProcessStore) -> Result<usize, StoreError> {
    if !store.list()?.is_empty() {
        return Ok(0);
    }
    let examples = example_processes();
    let count = examples.len();
    for process in examples {
        store.put(process)?;
    }
    info!(count, "Seeded example processes");
    Ok(count)
}
