//! Upload candidate enumeration.
//!
//! Candidates come either from a local directory of zipped shapefiles or
//! from a Cloud Storage bucket where the archives were staged. Both
//! sources hand the engine the same thing: a derived asset name plus the
//! payload to ingest.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SilicaResult;
use crate::store::gcs;
use crate::store::UploadSource;

/// One enumerated candidate: derived asset name plus its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub source: UploadSource,
}

/// Trait for candidate sources
pub trait CandidateSource {
    /// Human-readable location, used in errors and progress output.
    fn location(&self) -> String;

    /// Enumerate candidates in deterministic order.
    fn list(&self) -> SilicaResult<Vec<Candidate>>;

    /// Pause for a second after every this-many candidates.
    fn throttle_every(&self) -> usize;
}

/// Candidates from `*.zip` files in a local directory.
pub struct LocalZipDir {
    dir: PathBuf,
}

impl LocalZipDir {
    /// Local uploads are synchronous on the GEE side, so the rate is
    /// kept lower than for bucket ingests.
    const THROTTLE_EVERY: usize = 10;

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl CandidateSource for LocalZipDir {
    fn location(&self) -> String {
        self.dir.display().to_string()
    }

    fn list(&self) -> SilicaResult<Vec<Candidate>> {
        // A missing directory is the same as an empty one here; the
        // engine turns an empty enumeration into the fatal error.
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut archives: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && has_zip_extension(&path) {
                archives.push(path);
            }
        }
        archives.sort();

        Ok(archives
            .into_iter()
            .map(|path| {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Candidate {
                    name: asset_name_from_stem(&stem),
                    source: UploadSource::LocalZip(path),
                }
            })
            .collect())
    }

    fn throttle_every(&self) -> usize {
        Self::THROTTLE_EVERY
    }
}

/// Candidates from a `gsutil ls` of staged bucket objects.
pub struct BucketListing {
    bucket: String,
}

impl BucketListing {
    /// Bucket ingests only start background tasks, so the pacing can be
    /// twice as loose as for local uploads.
    const THROTTLE_EVERY: usize = 20;

    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
        }
    }
}

impl CandidateSource for BucketListing {
    fn location(&self) -> String {
        self.bucket.clone()
    }

    fn list(&self) -> SilicaResult<Vec<Candidate>> {
        let objects = gcs::list_bucket_objects(&self.bucket)?;
        Ok(objects
            .into_iter()
            .map(|uri| Candidate {
                name: asset_name_from_uri(&uri),
                source: UploadSource::BucketObject(uri),
            })
            .collect())
    }

    fn throttle_every(&self) -> usize {
        Self::THROTTLE_EVERY
    }
}

fn has_zip_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

/// Asset names may not contain spaces or periods; the stem keeps any
/// other characters as-is.
fn asset_name_from_stem(stem: &str) -> String {
    stem.replace(' ', "_").replace('.', "_")
}

/// Derive the asset name from a bucket object URI: last path segment
/// with a single trailing `.zip` stripped.
fn asset_name_from_uri(uri: &str) -> String {
    let last = uri.rsplit('/').next().unwrap_or(uri);
    let stem = last.strip_suffix(".zip").unwrap_or(last);
    stem.to_string()
}
