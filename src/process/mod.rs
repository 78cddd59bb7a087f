use crate::graph::{Edge, Node};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod archive;
pub mod samples;
pub mod store;

pub use archive::ProcessArchive;
pub use samples::{example_processes, seed_if_empty};
pub use store::{JsonFileStore, MemoryStore, ProcessStore};

/// Outcome of the most recent simulated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessStatus {
    #[default]
    Draft,
    Passed,
    Failed,
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ProcessStatus::Draft => "Draft",
            ProcessStatus::Passed => "Passed",
            ProcessStatus::Failed => "Failed",
        };
        f.pad(text)
    }
}

/// Who last changed a process, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastEdited {
    pub author: String,
    /// Display form, e.g. `14:30 IST 05/12`.
    pub time: String,
    /// Milliseconds since the UNIX epoch.
    pub timestamp: i64,
}

impl LastEdited {
    /// Stamps `author` with the current local time.
    pub fn stamp(author: impl Into<String>) -> Self {
        Self::at(author, Local::now())
    }

    pub fn at(author: impl Into<String>, when: DateTime<Local>) -> Self {
        Self {
            author: author.into(),
            time: when.format("%H:%M IST %m/%d").to_string(),
            timestamp: when.timestamp_millis(),
        }
    }
}

/// The named, persisted unit: a full graph plus metadata and execution status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(rename = "elements")]
    pub nodes: Vec<Node>,
    #[serde(rename = "connections")]
    pub edges: Vec<Edge>,
    pub status: ProcessStatus,
    pub last_edited: LastEdited,
}
