use crate::error::{FloorPlanError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_LIBRARY: &str = include_str!("../../../floorplans/library.json");

/// Serialized floor plan: the node table, hallway list and the phrase tables
/// the resolver builds on. Loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloorPlanDocument {
    /// Node used when a route request names no start
    pub default_start: String,

    pub nodes: Vec<NodeRecord>,

    #[serde(default)]
    pub edges: Vec<EdgeRecord>,

    /// Place names in lookup order. Earlier entries win ties and are checked
    /// first when scanning descriptions.
    #[serde(default)]
    pub aliases: Vec<AliasRecord>,

    /// Area descriptors for users who cannot name where they are
    #[serde(default)]
    pub descriptors: Vec<DescriptorRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeRecord {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,

    /// Extra sentence emitted when a route arrives here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default)]
    pub nearby: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    /// Signed on purpose so a negative weight reaches validation instead of
    /// failing as a parse error.
    pub weight: i64,
}

/// Free-text phrase naming exactly one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasRecord {
    pub phrase: String,
    pub node: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DescriptorRecord {
    pub phrase: String,
    pub nodes: Vec<String>,
}

impl FloorPlanDocument {
    /// The bundled library floor plan.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_bytes(BUILTIN_LIBRARY.as_bytes()).expect("bundled floor plan must parse")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| FloorPlanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Parse JSON, falling back to TOML.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match serde_json::from_slice::<Self>(bytes) {
            Ok(doc) => Ok(doc),
            Err(json_err) => {
                let utf8 = std::str::from_utf8(bytes)
                    .map_err(|err| FloorPlanError::Parse(format!("{json_err}; {err}")))?;
                toml::from_str::<Self>(utf8).map_err(|toml_err| {
                    FloorPlanError::Parse(format!(
                        "not valid JSON ({json_err}); TOML parse error: {toml_err}"
                    ))
                })
            }
        }
    }

    pub fn node(&self, id: &str) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
