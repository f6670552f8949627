//! Error types for silica
//!
//! Uses `thiserror` for library errors; the binary wraps these in
//! `anyhow` at the command layer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for silica operations
pub type SilicaResult<T> = Result<T, SilicaError>;

/// Main error type for silica operations
#[derive(Error, Debug)]
pub enum SilicaError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Zip archive error
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The earthengine CLI has no usable project session
    #[error("GEE project not configured properly: {detail}\nPlease run: earthengine set_project <project-id>\nFind your project ID in the GEE Code Editor Assets panel")]
    SessionNotConfigured { detail: String },

    /// An upload run found nothing to process
    #[error("no upload candidates found in {location}")]
    NoCandidates { location: String },

    /// Candidate enumeration against a remote listing failed
    #[error("failed to list {location}: {detail}")]
    ListingFailed { location: String, detail: String },

    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },
}
