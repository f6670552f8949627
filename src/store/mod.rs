//! Asset Store Port
//!
//! Abstracts the remote asset catalog the uploader talks to. The real
//! implementation shells out to the `earthengine` CLI; the upload engine
//! only sees this trait, so tests can script presence and failures.

pub mod earthengine;
pub mod gcs;

pub use earthengine::EarthEngineCli;

use std::path::PathBuf;

/// Whether an asset id already exists in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetPresence {
    Present,
    Missing,
}

/// Error from store operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The CLI session has no usable project
    SessionNotConfigured(String),
    /// Command execution error
    CommandFailed(String),
}

impl StoreError {
    /// The underlying message without the variant prefix.
    pub fn detail(&self) -> &str {
        match self {
            Self::SessionNotConfigured(msg) | Self::CommandFailed(msg) => msg,
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SessionNotConfigured(msg) => write!(f, "session not configured: {}", msg),
            Self::CommandFailed(msg) => write!(f, "command failed: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Payload handed to the store for one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    /// Zip archive on the local filesystem
    LocalZip(PathBuf),
    /// Object already staged in Cloud Storage, as a `gs://` URI
    BucketObject(String),
}

impl UploadSource {
    /// Argument form passed to the ingest command.
    pub fn payload(&self) -> String {
        match self {
            Self::LocalZip(path) => path.display().to_string(),
            Self::BucketObject(uri) => uri.clone(),
        }
    }
}

/// Trait for asset stores
///
/// Operations mirror the three CLI interactions the uploader needs:
/// a session probe, a per-asset existence check, and the ingest itself.
pub trait AssetStore {
    /// Verify the CLI session is signed in to a usable project.
    fn verify_session(&self) -> Result<(), StoreError>;

    /// Check whether `asset_id` already exists.
    ///
    /// Any spawn or exit failure counts as missing; the follow-up upload
    /// surfaces the real error if there is one.
    fn describe(&self, asset_id: &str) -> AssetPresence;

    /// Start a table ingest of `source` at `asset_id`.
    fn upload(&self, asset_id: &str, source: &UploadSource) -> Result<(), StoreError>;
}
