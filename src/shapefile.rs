//! Shapefile component discovery and grouping.
//!
//! A "shapefile" on disk is really a family of sidecar files sharing one
//! basename (`site.shp`, `site.shx`, `site.dbf`, ...). Earth Engine
//! ingests the whole family as a single zip, so the first step is to
//! find the families.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SilicaError, SilicaResult};

/// File extensions recognized as shapefile components.
pub const SHAPEFILE_EXTENSIONS: [&str; 8] =
    ["shp", "shx", "dbf", "prj", "cpg", "sbn", "sbx", "xml"];

/// Component files sharing one basename: one logical shapefile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentGroup {
    pub stem: String,
    pub files: Vec<PathBuf>,
}

impl ComponentGroup {
    /// A group is only packagable when the geometry file is present.
    pub fn has_shp(&self) -> bool {
        self.files.iter().any(|file| has_extension(file, "shp"))
    }
}

/// Scan `dir` (non-recursive) and group recognized component files by stem.
///
/// Groups come back ordered by stem, files within a group ordered by
/// path, so downstream archives are deterministic. Files with
/// unrecognized extensions are ignored; extension matching is
/// case-insensitive.
pub fn scan_components(dir: &Path) -> SilicaResult<Vec<ComponentGroup>> {
    if !dir.is_dir() {
        return Err(SilicaError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut by_stem: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !is_component(&path) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            by_stem.entry(stem.to_string()).or_default().push(path);
        }
    }

    Ok(by_stem
        .into_iter()
        .map(|(stem, mut files)| {
            files.sort();
            ComponentGroup { stem, files }
        })
        .collect())
}

fn is_component(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SHAPEFILE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}
