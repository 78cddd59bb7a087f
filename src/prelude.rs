//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the nagare crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use nagare::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let config = NagareConfig::load(Path::new("nagare.toml"))?;
//! let store = JsonFileStore::from_config(&config.store);
//!
//! let session = EditorSession::open(&store, "1", &config)?;
//! println!("{} has {} connections", session.name(), session.graph().edges().len());
//! # Ok(())
//! # }
//! ```

// Editing session
pub use crate::editor::{EditorMode, EditorSession};
pub use crate::planner::{Insertion, InsertionPlan, InsertionPlanner, InsertionRule};

// Graph model
pub use crate::graph::{
    ApiConfig, Edge, EmailConfig, FlowGraph, HttpMethod, Node, NodeKind, NodePatch, NodePayload,
    Position, TextConfig, check_save_valid, is_save_valid,
};
pub use crate::id::IdGenerator;

// Processes and collaborators
pub use crate::identity::{IdentityProvider, StaticIdentity};
pub use crate::process::{
    JsonFileStore, LastEdited, MemoryStore, Process, ProcessArchive, ProcessStatus, ProcessStore,
};
pub use crate::simulator::{ExecutionSimulator, RandomSimulator, execute_process};

// Configuration
pub use crate::config::NagareConfig;

// Error types
pub use crate::error::{ConfigError, EditorError, GraphValidationError, StoreError};

// Standard library re-exports commonly used with this crate
pub use std::path::Path;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
