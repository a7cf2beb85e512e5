use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolveError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No location matches '{query}'")]
    NoMatch { query: String },

    #[error("Location table error: {0}")]
    Table(String),
}
