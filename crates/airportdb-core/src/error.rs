// crates/airportdb-core/src/error.rs
use thiserror::Error;

/// Every failure an airport operation can surface.
///
/// The first four variants are the taxonomy callers are expected to branch
/// on; `Storage`, `Io` and `Json` cover engine and file problems that have no
/// better classification.
#[derive(Debug, Error)]
pub enum AirportError {
    /// The storage engine could not be reached, or an operation timed out.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// An airport with this id already exists.
    #[error("airport {0} already exists")]
    Conflict(i32),

    /// A required field is missing or out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The origin airport of a radius query does not exist.
    #[error("airport {0} not found")]
    NotFound(i32),

    /// The engine rejected a statement for a reason other than the above.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AirportError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AirportError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AirportError>;
