//! Configuration module for silica
//!
//! Resolution happens exactly once, in `main`:
//! 1. CLI flags (highest priority, applied at the command layer)
//! 2. Environment variables (GEE_PROJECT)
//! 3. Built-in defaults (lowest priority)

use std::path::PathBuf;

/// GEE project used when `GEE_PROJECT` is not set.
const DEFAULT_PROJECT: &str = "silica-synthesis";

/// Asset folder under the project's assets root.
const DEFAULT_ASSET_FOLDER: &str = "silica-watersheds";

/// Cloud Storage staging bucket for the bucket-ingest flow.
const DEFAULT_BUCKET: &str = "gs://silica-synthesis-shapefiles";

/// Environment variable overriding the GEE project id.
pub const PROJECT_ENV_VAR: &str = "GEE_PROJECT";

/// Resolved runtime configuration, passed down by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// GEE project id, e.g. `silica-synthesis`
    pub project: String,
    /// Asset folder name under `projects/<project>/assets/`
    pub asset_folder: String,
    /// `gs://` bucket holding staged zip archives
    pub bucket: String,
    /// Default directory of loose shapefile components
    pub shapefile_dir: PathBuf,
    /// Default directory for zipped shapefiles
    pub zip_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let staging = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Downloads")
            .join("silica-shapefiles");

        Self {
            project: DEFAULT_PROJECT.to_string(),
            asset_folder: DEFAULT_ASSET_FOLDER.to_string(),
            bucket: DEFAULT_BUCKET.to_string(),
            shapefile_dir: staging.join("artisanal-shapefiles-2"),
            zip_dir: staging.join("zipped-for-gee"),
        }
    }
}

impl Config {
    /// Resolve the effective configuration (defaults + environment overrides).
    pub fn resolve() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides (GEE_PROJECT)
    pub fn with_env_overrides(self) -> Self {
        self.with_project_override(std::env::var(PROJECT_ENV_VAR).ok())
    }

    fn with_project_override(mut self, project: Option<String>) -> Self {
        if let Some(project) = project {
            if !project.trim().is_empty() {
                self.project = project;
            }
        }
        self
    }

    /// Fully qualified assets root: `projects/<project>/assets/<folder>`
    pub fn asset_root(&self) -> String {
        format!("projects/{}/assets/{}", self.project, self.asset_folder)
    }
}
