use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point on the editor canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Keeps this point's `x` and moves halfway down (or up) to `other.y`.
    pub fn halfway_to(self, other: Position) -> Position {
        Position {
            x: self.x,
            y: self.y + (other.y - self.y) / 2.0,
        }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Position {
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The closed set of step types a process can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Start,
    End,
    Api,
    Email,
    Text,
}

impl NodeKind {
    /// Kinds a user may insert through the element menu.
    pub const ELEMENTS: [NodeKind; 3] = [NodeKind::Api, NodeKind::Email, NodeKind::Text];

    /// `true` for the singleton `start`/`end` kinds.
    pub fn is_anchor(self) -> bool {
        matches!(self, NodeKind::Start | NodeKind::End)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Api => "api",
            NodeKind::Email => "email",
            NodeKind::Text => "text",
        }
    }

    /// Display label given to freshly created nodes.
    pub fn default_label(self) -> &'static str {
        match self {
            NodeKind::Start => "Start",
            NodeKind::End => "End",
            NodeKind::Api => "Api",
            NodeKind::Email => "Email",
            NodeKind::Text => "Text",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(NodeKind::Start),
            "end" => Ok(NodeKind::End),
            "api" => Ok(NodeKind::Api),
            "email" => Ok(NodeKind::Email),
            "text" => Ok(NodeKind::Text),
            other => Err(format!("unknown node kind '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(format!("unsupported HTTP method '{}'", other)),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub method: HttpMethod,
    pub url: String,
    pub headers: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmailConfig {
    pub to: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextConfig {
    pub content: String,
}

/// Kind-specific configuration of a node. The variant determines the node's kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodePayload {
    Start,
    End,
    Api(ApiConfig),
    Email(EmailConfig),
    Text(TextConfig),
}

impl NodePayload {
    /// Empty configuration for a kind, as shown when the configuration dialog first opens.
    pub fn default_for(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Start => NodePayload::Start,
            NodeKind::End => NodePayload::End,
            NodeKind::Api => NodePayload::Api(ApiConfig::default()),
            NodeKind::Email => NodePayload::Email(EmailConfig::default()),
            NodeKind::Text => NodePayload::Text(TextConfig::default()),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodePayload::Start => NodeKind::Start,
            NodePayload::End => NodeKind::End,
            NodePayload::Api(_) => NodeKind::Api,
            NodePayload::Email(_) => NodeKind::Email,
            NodePayload::Text(_) => NodeKind::Text,
        }
    }

    /// Sets a single field by its name, returning `false` when the kind has no such field.
    pub fn set_field(&mut self, field: &str, value: &str) -> bool {
        match (self, field) {
            (NodePayload::Api(api), "method") => match value.parse() {
                Ok(method) => {
                    api.method = method;
                    true
                }
                Err(_) => false,
            },
            (NodePayload::Api(api), "url") => replace(&mut api.url, value),
            (NodePayload::Api(api), "headers") => replace(&mut api.headers, value),
            (NodePayload::Api(api), "body") => replace(&mut api.body, value),
            (NodePayload::Email(email), "to") => replace(&mut email.to, value),
            (NodePayload::Email(email), "subject") => replace(&mut email.subject, value),
            (NodePayload::Email(email), "message") => replace(&mut email.message, value),
            (NodePayload::Text(text), "content") => replace(&mut text.content, value),
            _ => false,
        }
    }
}

fn replace(slot: &mut String, value: &str) -> bool {
    *slot = value.to_string();
    true
}

/// A step in the process graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub position: Position,
    pub payload: NodePayload,
}

impl Node {
    /// Creates a node with the kind's default label and an empty payload.
    pub fn new(id: impl Into<String>, kind: NodeKind, position: Position) -> Self {
        Self {
            id: id.into(),
            label: kind.default_label().to_string(),
            position,
            payload: NodePayload::default_for(kind),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_payload(mut self, payload: NodePayload) -> Self {
        self.payload = payload;
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.payload.kind()
    }

    pub fn is_anchor(&self) -> bool {
        self.kind().is_anchor()
    }
}

/// A partial update merged into an existing node by `FlowGraph::update_node`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub position: Option<Position>,
    pub payload: Option<NodePayload>,
}

impl NodePatch {
    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn payload(payload: NodePayload) -> Self {
        Self {
            payload: Some(payload),
            ..Self::default()
        }
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }
}
