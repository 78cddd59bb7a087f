//! The editing session: turns user gestures into graph mutations and hands the finished
//! process to a store.

use crate::config::NagareConfig;
use crate::error::{EditorError, GraphValidationError};
use crate::graph::{
    EdgeSegment, FlowGraph, Node, NodeKind, NodePatch, NodePayload, Position, add_button_target,
    check_save_valid, edge_segments,
};
use crate::id::IdGenerator;
use crate::identity::{IdentityProvider, author_name};
use crate::planner::{Insertion, InsertionPlanner};
use crate::process::{LastEdited, Process, ProcessStatus, ProcessStore};
use tracing::{debug, info, warn};

mod drag;
mod mode;
mod viewport;

pub use drag::DragGesture;
pub use mode::EditorMode;
pub use viewport::Viewport;

/// Tag given to processes saved without any.
pub const DEFAULT_TAG: &str = "workflow";

/// One open editor over one process.
///
/// The session exclusively owns its working copy of the graph. Gestures that do not apply in
/// the current mode are ignored and reported through their `bool`/`Option` return value.
#[derive(Debug)]
pub struct EditorSession {
    process_id: Option<String>,
    name: String,
    description: String,
    tags: Vec<String>,
    status: ProcessStatus,
    graph: FlowGraph,
    planner: InsertionPlanner,
    mode: EditorMode,
    drag: Option<DragGesture>,
    viewport: Viewport,
}

impl EditorSession {
    /// Starts a new draft process holding only the two anchors.
    pub fn create(config: &NagareConfig) -> Self {
        Self::create_with_ids(config, IdGenerator::new())
    }

    pub fn create_with_ids(config: &NagareConfig, ids: IdGenerator) -> Self {
        let x = config.canvas.anchor_x();
        let graph = FlowGraph::seeded(
            Position::new(x, config.canvas.start_y),
            Position::new(x, config.canvas.end_y),
            ids,
        );
        info!("Started editing a new process");
        Self::with_graph(None, graph, config)
    }

    /// Opens the stored process `id` for editing.
    pub fn open(
        store: &dyn ProcessStore,
        id: &str,
        config: &NagareConfig,
    ) -> Result<Self, EditorError> {
        Self::open_with_ids(store, id, config, IdGenerator::new())
    }

    pub fn open_with_ids(
        store: &dyn ProcessStore,
        id: &str,
        config: &NagareConfig,
        ids: IdGenerator,
    ) -> Result<Self, EditorError> {
        let process = store
            .get(id)?
            .ok_or_else(|| EditorError::NotFound(id.to_string()))?;
        info!(%id, name = %process.name, "Opened process for editing");

        let graph = FlowGraph::from_parts(process.nodes, process.edges, ids);
        let mut session = Self::with_graph(Some(process.id), graph, config);
        session.name = process.name;
        session.description = process.description;
        session.tags = process.tags;
        session.status = process.status;
        Ok(session)
    }

    fn with_graph(process_id: Option<String>, graph: FlowGraph, config: &NagareConfig) -> Self {
        Self {
            process_id,
            name: String::new(),
            description: String::new(),
            tags: Vec::new(),
            status: ProcessStatus::Draft,
            graph,
            planner: InsertionPlanner::from_config(&config.planner),
            mode: EditorMode::Idle,
            drag: None,
            viewport: Viewport::new(config.viewport.clone()),
        }
    }

    pub fn process_id(&self) -> Option<&str> {
        self.process_id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> ProcessStatus {
        self.status
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn is_closed(&self) -> bool {
        self.mode == EditorMode::Closed
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Connections to draw, from outbound to inbound anchor.
    pub fn segments(&self) -> Vec<EdgeSegment> {
        edge_segments(self.graph.nodes(), self.graph.edges())
    }

    /// Where the next node goes if the element menu is opened without a "+" target.
    pub fn default_drop_position(&self) -> Position {
        self.planner
            .default_drop_position(self.graph.nodes(), self.graph.edges())
    }

    fn ignore(&self, gesture: &str) -> bool {
        warn!(mode = %self.mode, gesture, "Ignoring gesture");
        false
    }

    // --- Connecting ---

    pub fn begin_connect(&mut self, node_id: &str) -> bool {
        if !self.mode.is_idle() || !self.graph.contains_node(node_id) {
            return self.ignore("begin_connect");
        }
        self.mode = EditorMode::Connecting {
            source: node_id.to_string(),
        };
        true
    }

    /// Completes a connection. Selecting the source again cancels without an edge.
    ///
    /// Returns the id of the created edge, if any.
    pub fn select_target(&mut self, target: &str) -> Option<String> {
        let EditorMode::Connecting { source } = &self.mode else {
            self.ignore("select_target");
            return None;
        };
        let source = source.clone();
        self.mode = EditorMode::Idle;
        if source == target {
            debug!(node_id = %source, "Connection cancelled by reselecting the source");
            return None;
        }
        self.graph.add_edge(&source, target)
    }

    pub fn cancel_connect(&mut self) -> bool {
        if !matches!(self.mode, EditorMode::Connecting { .. }) {
            return self.ignore("cancel_connect");
        }
        self.mode = EditorMode::Idle;
        true
    }

    // --- Adding elements ---

    /// Opens the element menu for an explicit drop position.
    pub fn click_add_button(&mut self, position: Position) -> bool {
        self.open_menu(Some(position))
    }

    /// Opens the element menu for the "+" button below `node_id`.
    pub fn click_add_below(&mut self, node_id: &str) -> bool {
        match self.graph.node(node_id).map(add_button_target) {
            Some(position) => self.open_menu(Some(position)),
            None => self.ignore("click_add_below"),
        }
    }

    /// Opens the element menu without a target; the default drop position is used.
    pub fn open_element_menu(&mut self) -> bool {
        self.open_menu(None)
    }

    fn open_menu(&mut self, position: Option<Position>) -> bool {
        if !self.mode.is_idle() {
            return self.ignore("open_menu");
        }
        self.mode = EditorMode::ChoosingElementType { position };
        true
    }

    pub fn dismiss_menu(&mut self) -> bool {
        if !matches!(self.mode, EditorMode::ChoosingElementType { .. }) {
            return self.ignore("dismiss_menu");
        }
        self.mode = EditorMode::Idle;
        true
    }

    /// Inserts a node of `kind` and opens its configuration.
    pub fn choose_kind(&mut self, kind: NodeKind) -> Option<Insertion> {
        let EditorMode::ChoosingElementType { position } = self.mode else {
            self.ignore("choose_kind");
            return None;
        };
        if kind.is_anchor() {
            warn!(%kind, "Anchor kinds cannot be inserted");
            return None;
        }

        let insertion = self.planner.insert(&mut self.graph, kind, position);
        info!(
            node_id = %insertion.node_id,
            %kind,
            rule = %insertion.rule,
            "Inserted element"
        );
        self.mode = EditorMode::ConfiguringNode {
            node_id: insertion.node_id.clone(),
        };
        Some(insertion)
    }

    // --- Configuring ---

    /// Opens the configuration of a step. Anchors have nothing to configure.
    pub fn click_node(&mut self, node_id: &str) -> bool {
        if !self.mode.is_idle() {
            return self.ignore("click_node");
        }
        match self.graph.node(node_id) {
            Some(node) if !node.is_anchor() => {
                self.mode = EditorMode::ConfiguringNode {
                    node_id: node_id.to_string(),
                };
                true
            }
            _ => self.ignore("click_node"),
        }
    }

    pub fn save_configuration(&mut self, payload: NodePayload) -> bool {
        let EditorMode::ConfiguringNode { node_id } = &self.mode else {
            return self.ignore("save_configuration");
        };
        let node_id = node_id.clone();
        self.mode = EditorMode::Idle;
        self.graph.update_node(&node_id, NodePatch::payload(payload))
    }

    pub fn cancel_configuration(&mut self) -> bool {
        if !matches!(self.mode, EditorMode::ConfiguringNode { .. }) {
            return self.ignore("cancel_configuration");
        }
        self.mode = EditorMode::Idle;
        true
    }

    pub fn rename_node(&mut self, node_id: &str, label: impl Into<String>) -> bool {
        if self.is_closed() {
            return self.ignore("rename_node");
        }
        self.graph.update_node(node_id, NodePatch::label(label))
    }

    // --- Deleting ---

    /// Deletes a node and its connections from any mode, returning to idle.
    ///
    /// Anchors are not refused here; callers only offer deletion for steps.
    pub fn delete_node(&mut self, node_id: &str) -> Option<Node> {
        if self.is_closed() {
            self.ignore("delete_node");
            return None;
        }
        self.mode = EditorMode::Idle;
        if self.drag.as_ref().is_some_and(|d| d.node_id() == node_id) {
            self.drag = None;
        }
        let removed = self.graph.remove_node(node_id);
        if let Some(node) = &removed {
            info!(node_id = %node.id, kind = %node.kind(), "Deleted node");
        }
        removed
    }

    // --- Dragging ---

    pub fn begin_drag(&mut self, node_id: &str, pointer: Position) -> bool {
        if self.is_closed() {
            return self.ignore("begin_drag");
        }
        match self.graph.node(node_id) {
            Some(node) => {
                self.drag = Some(DragGesture::begin(node, pointer));
                true
            }
            None => self.ignore("begin_drag"),
        }
    }

    pub fn drag_to(&mut self, pointer: Position) -> bool {
        let Some(drag) = &self.drag else {
            return false;
        };
        let position = drag.position_for(pointer);
        let node_id = drag.node_id().to_string();
        self.graph.update_node(&node_id, NodePatch::position(position))
    }

    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // --- Saving ---

    /// The structural check a save would run.
    pub fn check(&self) -> Result<(), GraphValidationError> {
        check_save_valid(self.graph.nodes(), self.graph.edges())
    }

    /// Validates the working copy and writes it to `store` as a complete process.
    ///
    /// On any error the session stays open and unchanged. On success it is closed.
    pub fn save(
        &mut self,
        store: &mut dyn ProcessStore,
        identity: &dyn IdentityProvider,
    ) -> Result<Process, EditorError> {
        match &self.mode {
            EditorMode::Idle => {}
            EditorMode::Closed => return Err(EditorError::Closed),
            busy => return Err(EditorError::Busy(busy.to_string())),
        }
        if self.name.trim().is_empty() {
            return Err(EditorError::EmptyName);
        }
        self.check()?;

        let id = match &self.process_id {
            Some(id) => id.clone(),
            None => self.graph.next_id("process"),
        };
        let tags = if self.tags.is_empty() {
            vec![DEFAULT_TAG.to_string()]
        } else {
            self.tags.clone()
        };
        let process = Process {
            id,
            name: self.name.clone(),
            description: self.description.clone(),
            tags,
            nodes: self.graph.nodes().to_vec(),
            edges: self.graph.edges().to_vec(),
            status: self.status,
            last_edited: LastEdited::stamp(author_name(identity)),
        };

        store.put(process.clone())?;
        info!(id = %process.id, name = %process.name, "Saved process");
        self.process_id = Some(process.id.clone());
        self.drag = None;
        self.mode = EditorMode::Closed;
        Ok(process)
    }
}
