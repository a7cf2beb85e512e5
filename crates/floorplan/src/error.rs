use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FloorPlanError>;

#[derive(Error, Debug)]
pub enum FloorPlanError {
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Floor plan integrity error: {0}")]
    GraphIntegrity(String),

    #[error("No path found between {from} and {to}")]
    NoPath { from: String, to: String },

    #[error("Floor plan document is invalid: {0}")]
    Parse(String),

    #[error("Failed to read floor plan {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
