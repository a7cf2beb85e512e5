use thiserror::Error;
use wayfinder_floorplan::FloorPlanError;
use wayfinder_protocol::codes;
use wayfinder_resolver::ResolveError;

pub type Result<T> = std::result::Result<T, NavigatorError>;

#[derive(Error, Debug)]
pub enum NavigatorError {
    #[error(transparent)]
    FloorPlan(#[from] FloorPlanError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl NavigatorError {
    /// Stable snake_case code for the wire
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            NavigatorError::FloorPlan(FloorPlanError::UnknownNode(_)) => codes::UNKNOWN_NODE,
            NavigatorError::FloorPlan(FloorPlanError::GraphIntegrity(_))
            | NavigatorError::Resolve(ResolveError::Table(_)) => codes::GRAPH_INTEGRITY,
            NavigatorError::FloorPlan(FloorPlanError::NoPath { .. }) => codes::NO_PATH,
            NavigatorError::FloorPlan(FloorPlanError::Parse(_) | FloorPlanError::Io { .. }) => {
                codes::INVALID_DOCUMENT
            }
            NavigatorError::Resolve(ResolveError::NoMatch { .. }) => codes::NO_MATCH,
            NavigatorError::InvalidRequest(_) => codes::INVALID_REQUEST,
        }
    }

    /// Recoverable per-request failure, answered with a clarification or
    /// apology. Everything else is a broken floor plan or a programming error.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            NavigatorError::FloorPlan(FloorPlanError::NoPath { .. })
                | NavigatorError::Resolve(ResolveError::NoMatch { .. })
                | NavigatorError::InvalidRequest(_)
        )
    }
}
