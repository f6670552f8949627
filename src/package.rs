//! Zip packaging for shapefile component groups.
//!
//! Earth Engine's table ingest wants one flat zip per shapefile, so each
//! group becomes `<stem>.zip` with every component stored under its bare
//! file name.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use zip::{write::FileOptions, CompressionMethod, ZipWriter};

use crate::error::SilicaResult;
use crate::shapefile::ComponentGroup;

/// Progress notifications emitted while packaging groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageEvent {
    /// A group was written as `<stem>.zip`.
    Packaged { stem: String, members: usize },
    /// A group had no `.shp` member and was left out.
    Skipped { stem: String },
    /// Writing one group's archive failed; the batch continues.
    Failed { stem: String, reason: String },
}

/// One group that could not be archived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageFailure {
    pub stem: String,
    pub reason: String,
}

/// Outcome of a packaging run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PackageReport {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<PackageFailure>,
}

impl PackageReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write one flat deflate zip per packagable group into `out_dir`.
///
/// Groups without a `.shp` member are skipped. A write failure on one
/// group is recorded and the remaining groups are still packaged; only
/// failing to create `out_dir` itself aborts the run.
pub fn package_groups(
    groups: &[ComponentGroup],
    out_dir: &Path,
    sink: &mut dyn FnMut(PackageEvent),
) -> SilicaResult<PackageReport> {
    fs::create_dir_all(out_dir)?;

    let mut report = PackageReport::default();
    for group in groups {
        if !group.has_shp() {
            report.skipped.push(group.stem.clone());
            sink(PackageEvent::Skipped {
                stem: group.stem.clone(),
            });
            continue;
        }

        match write_archive(group, out_dir) {
            Ok(_) => {
                report.created.push(group.stem.clone());
                sink(PackageEvent::Packaged {
                    stem: group.stem.clone(),
                    members: group.files.len(),
                });
            }
            Err(err) => {
                let reason = err.to_string();
                report.failed.push(PackageFailure {
                    stem: group.stem.clone(),
                    reason: reason.clone(),
                });
                sink(PackageEvent::Failed {
                    stem: group.stem.clone(),
                    reason,
                });
            }
        }
    }

    Ok(report)
}

/// Write `<stem>.zip` with flat entries, one per component file.
fn write_archive(group: &ComponentGroup, out_dir: &Path) -> SilicaResult<PathBuf> {
    let path = out_dir.join(format!("{}.zip", group.stem));
    let file = File::create(&path)?;
    let mut archive = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for member in &group.files {
        let name = member
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| group.stem.clone());
        archive.start_file(name, options)?;
        let mut source = File::open(member)?;
        io::copy(&mut source, &mut archive)?;
    }

    archive.finish()?;
    Ok(path)
}
