//! # Nagare - Flow Graph Editing Core
//!
//! **Nagare** is the editing core behind a visual process builder. A process is a linear
//! chain of typed steps (API call, email, text note) between a fixed `start` and `end`
//! anchor. Nagare owns the in-memory graph, decides how a newly added step is wired into the
//! chain, checks whether a graph may be saved, and drives the whole editing session as a
//! small state machine. Storage, identity and execution are pluggable collaborators.
//!
//! ## Core Workflow
//!
//! 1.  **Open a Session**: `EditorSession::create` seeds a new draft with its two anchors;
//!     `EditorSession::open` loads an existing process from any `ProcessStore`.
//! 2.  **Edit**: feed user gestures to the session (`click_add_button`, `choose_kind`,
//!     `begin_connect`/`select_target`, `begin_drag`/`drag_to`, `delete_node`, ...). New steps
//!     are placed by the `InsertionPlanner`, which keeps the chain connected.
//! 3.  **Save**: `EditorSession::save` runs the structural validity check and, if it passes,
//!     writes the complete `Process` to the store.
//! 4.  **Run**: `execute_process` asks an `ExecutionSimulator` for an outcome and records the
//!     resulting status.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nagare::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = NagareConfig::default();
//!     let mut store = MemoryStore::new();
//!
//!     // 1. A fresh draft contains only `start` and `end`.
//!     let mut session = EditorSession::create(&config);
//!     session.set_name("Customer Onboarding");
//!
//!     // 2. Add an email step. The planner chains it as start -> email -> end.
//!     session.open_element_menu();
//!     session.choose_kind(NodeKind::Email);
//!     session.save_configuration(NodePayload::Email(EmailConfig {
//!         to: "customer@example.com".to_string(),
//!         subject: "Welcome".to_string(),
//!         message: "Glad to have you on board.".to_string(),
//!     }));
//!
//!     // 3. Save, stamped with the current user.
//!     let process = session.save(&mut store, &StaticIdentity::named("Jane Smith"))?;
//!     println!("Saved '{}' with {} steps", process.name, process.nodes.len());
//!
//!     // 4. Simulate a run.
//!     let mut simulator = RandomSimulator::new(0.7);
//!     let status = execute_process(&mut store, &mut simulator, &process.id)?;
//!     println!("Run finished: {}", status);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod graph;
pub mod id;
pub mod identity;
pub mod planner;
pub mod prelude;
pub mod process;
pub mod simulator;
