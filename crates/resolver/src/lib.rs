//! # Wayfinder Resolver
//!
//! Turns what people say into floor plan nodes.
//!
//! ## Features
//!
//! - **Resolution** - exact alias, longest substring alias, then fuzzy label match (≥ 0.6)
//! - **Lost-user inference** - confidence-scored candidates from a description of the surroundings
//! - **Clarifying questions** - follow-ups when the user cannot be placed confidently
//! - **Suggestions** - "did you mean" candidates after a failed resolution
//!
//! ```text
//! "where is the cafe bergson?"
//!     │
//!     ├──> exact alias        ("cafe bergson" == query?)
//!     ├──> substring alias    (longest alias in / around the query)
//!     └──> fuzzy label        (normalized Levenshtein over node labels)
//!            │
//!            └──> Resolution { node_id, tier } | NoMatch
//! ```

mod error;
mod inference;
mod resolve;
mod suggest;
mod tables;

pub use error::{ResolveError, Result};
pub use inference::{Candidate, Inference};
pub use resolve::{MatchTier, Resolution, Resolver, FUZZY_ACCEPT_THRESHOLD};
pub use suggest::Suggestion;
pub use tables::normalize;
