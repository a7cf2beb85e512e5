//! Wayfinding core for the library floor plan.
//!
//! [`Wayfinder`] ties the crates together:
//!
//! ```text
//! free text ──► Resolver ──► node ids ──► FloorPlan::shortest_route
//!                                              │
//!                         DirectionSynthesizer ◄┴► HighlightOverlay
//! ```
//!
//! Results come back as `wayfinder-protocol` DTOs, ready for a host to
//! serialize. Failures carry a stable code; see [`NavigatorError::code`].

mod error;
mod query;
mod wayfinder;

pub use error::{NavigatorError, Result};
pub use query::{parse_route_query, RouteQuery};
pub use wayfinder::Wayfinder;

pub use wayfinder_floorplan::{FloorPlan, FloorPlanDocument};
pub use wayfinder_resolver::Resolver;
