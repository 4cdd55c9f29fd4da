//! Type definitions for salontrack

mod error;
mod insights;
mod records;

pub use error::*;
pub use insights::*;
pub use records::*;

/// Store loading warning types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWarning {
    /// Failed to open or read the data file
    LoadFailed(String),
    /// Data file was corrupted (invalid JSON)
    Corrupted(String),
}

impl std::fmt::Display for StoreWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoadFailed(msg) | Self::Corrupted(msg) => f.write_str(msg),
        }
    }
}
