//! # Wayfinder Floor Plan
//!
//! Single-floor building model for indoor wayfinding.
//!
//! ## Features
//!
//! - **Floor-plan graph** - named, positioned nodes joined by weighted, undirected hallways
//! - **Load-time validation** - referential integrity and positive weights, or startup fails
//! - **Routing** - minimum-weight paths over declared weights
//! - **Highlight overlays** - per-request display state for a map renderer
//!
//! ## Architecture
//!
//! ```text
//! FloorPlanDocument (JSON / TOML)
//!     │
//!     ├──> FloorPlan::from_document (validation)
//!     │      ├─ Nodes: id, label, position, landmark
//!     │      └─ Edges: positive integer weight
//!     │
//!     ├──> shortest_route(from, to) -> Route
//!     │
//!     └──> highlight(path) -> HighlightOverlay
//! ```

mod builder;
mod document;
mod error;
mod highlight;
mod router;
mod types;

pub use document::{AliasRecord, DescriptorRecord, EdgeRecord, FloorPlanDocument, NodeRecord};
pub use error::{FloorPlanError, Result};
pub use highlight::{DisplayState, HighlightOverlay};
pub use router::Route;
pub use types::{FloorPlan, Neighbor, PlanEdge, PlanNode, Point};
