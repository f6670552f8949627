//! Cloud Storage listing via `gsutil`.
//!
//! The bucket-ingest flow enumerates staged zip archives with
//! `gsutil ls <bucket>/*.zip`. A listing failure is fatal for the run,
//! so it maps straight onto `SilicaError::ListingFailed`.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{SilicaError, SilicaResult};

/// Resolve the `gsutil` binary to invoke.
///
/// The Cloud SDK's default install drops gsutil under
/// `~/google-cloud-sdk/bin` without touching PATH, so that location is
/// preferred; otherwise plain `gsutil` is left to PATH lookup.
pub fn gsutil_program() -> PathBuf {
    dirs::home_dir()
        .map(|home| gsutil_program_in(&home))
        .unwrap_or_else(|| PathBuf::from("gsutil"))
}

fn gsutil_program_in(home: &Path) -> PathBuf {
    let bundled = home.join("google-cloud-sdk").join("bin").join("gsutil");
    if bundled.is_file() {
        bundled
    } else {
        PathBuf::from("gsutil")
    }
}

/// List `*.zip` object URIs in `bucket`.
pub fn list_bucket_objects(bucket: &str) -> SilicaResult<Vec<String>> {
    let pattern = format!("{}/*.zip", bucket.trim_end_matches('/'));
    let program = gsutil_program();

    let output = Command::new(&program)
        .arg("ls")
        .arg(&pattern)
        .output()
        .map_err(|err| SilicaError::ListingFailed {
            location: bucket.to_string(),
            detail: format!("failed to run {}: {}", program.display(), err),
        })?;

    if !output.status.success() {
        return Err(SilicaError::ListingFailed {
            location: bucket.to_string(),
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(parse_listing(&String::from_utf8_lossy(&output.stdout)))
}

fn parse_listing(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
