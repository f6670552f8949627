//! Silica - shapefile packaging and Earth Engine upload tooling
//!
//! Silica moves watershed shapefiles through the silica-synthesis
//! pipeline: loose component files are zipped one archive per shapefile,
//! the archives are batch-uploaded to Google Earth Engine as table
//! assets (skipping anything already ingested), and free-text site names
//! are normalized into stable identifiers for cross-dataset joins.

pub mod config;
pub mod error;
pub mod naming;
pub mod package;
pub mod shapefile;
pub mod store;
pub mod upload;

// Re-exports for convenience
pub use config::Config;
pub use error::{SilicaError, SilicaResult};
pub use naming::{build_name_map, find_collisions, normalize_site_name};
pub use package::{package_groups, PackageEvent, PackageReport};
pub use shapefile::{scan_components, ComponentGroup};
pub use store::{AssetPresence, AssetStore, EarthEngineCli, StoreError, UploadSource};
pub use upload::{
    BucketListing, CandidateSource, LocalZipDir, UploadEngine, UploadEvent, UploadReport,
};
