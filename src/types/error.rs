use thiserror::Error;

/// salontrack error types
#[derive(Error, Debug)]
pub enum SalonError {
    /// Failed to parse JSON or a user-supplied value
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Record store operation failed
    #[error("store error: {0}")]
    Store(String),

    /// No record with this id in the collection
    #[error("{collection} record {id} not found")]
    NotFound { collection: &'static str, id: u64 },

    /// Request body or record is not usable
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for salontrack
pub type Result<T> = std::result::Result<T, SalonError>;
