//! Upload pipeline: candidate discovery, the skip-or-upload engine, and
//! per-run reporting.

pub mod candidate;
pub mod engine;
pub mod report;

pub use candidate::{BucketListing, Candidate, CandidateSource, LocalZipDir};
pub use engine::{UploadEngine, UploadEvent};
pub use report::{UploadOutcome, UploadReport, UploadStatus};
