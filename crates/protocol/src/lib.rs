use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Bumped on any breaking change to the response shapes below
pub const PROTOCOL_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    PROTOCOL_SCHEMA_VERSION
}

/// Stable error codes carried by [`ErrorEnvelope::code`]
pub mod codes {
    pub const NO_MATCH: &str = "no_match";
    pub const NO_PATH: &str = "no_path";
    pub const UNKNOWN_NODE: &str = "unknown_node";
    pub const GRAPH_INTEGRITY: &str = "graph_integrity";
    pub const INVALID_DOCUMENT: &str = "invalid_document";
    pub const INVALID_REQUEST: &str = "invalid_request";
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct LocationEntry {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Alias,
    Substring,
    Fuzzy,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ResolveResponse {
    pub query: String,
    pub node_id: String,
    pub label: String,
    pub tier: MatchTier,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct CandidateLocation {
    pub node_id: String,
    pub label: String,
    pub confidence: f32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct InferenceResponse {
    pub candidates: Vec<CandidateLocation>,
    pub needs_clarification: bool,
    #[serde(default)]
    pub questions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct RouteResponse {
    pub path: Vec<String>,
    pub total_weight: u64,
    /// Numbered instructions ("1. From ...")
    pub directions: Vec<String>,
    /// Start and goal are the same node; `directions` is empty
    pub already_there: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct HighlightedEdge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct HighlightResponse {
    pub highlighted_nodes: Vec<String>,
    #[serde(default)]
    pub highlighted_edges: Vec<HighlightedEdge>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct LostUserResponse {
    pub inference: InferenceResponse,
    /// Node the directions lead to, when the user could be placed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HighlightResponse>,
    /// Requested destination that matched no location; the inference above
    /// still stands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unresolved_destination: Option<String>,
    /// Closest location names for `unresolved_destination`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct Suggestion {
    pub node_id: String,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// Top-level reply: `{"schema_version":1,"status":"ok","data":...}` or
/// `{"schema_version":1,"status":"error","error":...}`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct CommandResponse<T> {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
}

impl<T> CommandResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            schema_version: PROTOCOL_SCHEMA_VERSION,
            status: ResponseStatus::Ok,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(error: ErrorEnvelope) -> Self {
        Self {
            schema_version: PROTOCOL_SCHEMA_VERSION,
            status: ResponseStatus::Error,
            data: None,
            error: Some(error),
        }
    }
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}
