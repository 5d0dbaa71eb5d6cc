use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    UpstreamError(String),

    #[error("Internal server error")]
    InternalServerError,
}
