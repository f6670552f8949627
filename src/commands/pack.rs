//! `silica pack` - zip shapefile components for Earth Engine ingest.

use std::path::Path;

use anyhow::Result;

use silica::config::Config;
use silica::package::{package_groups, PackageEvent};
use silica::shapefile::scan_components;

pub fn cmd_pack(
    config: &Config,
    input: Option<&Path>,
    output: Option<&Path>,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let input = input.unwrap_or(&config.shapefile_dir);
    let output = output.unwrap_or(&config.zip_dir);

    if !json {
        println!("📦 Silica Pack");
        println!("Source: {}", input.display());
        println!("Output: {}", output.display());
        println!();
    }

    let groups = scan_components(input)?;

    if json {
        let line = serde_json::json!({"event": "scan", "shapefiles": groups.len()});
        println!("{}", serde_json::to_string(&line)?);
    } else {
        println!("Found {} shapefiles to zip", groups.len());
    }

    let report = package_groups(&groups, output, &mut |event| match event {
        PackageEvent::Packaged { stem, members } => {
            if json {
                let line =
                    serde_json::json!({"event": "packaged", "stem": stem, "members": members});
                println!("{}", line);
            } else if verbose > 0 {
                println!("  Packed {}.zip ({} files)", stem, members);
            }
        }
        PackageEvent::Skipped { stem } => {
            if json {
                let line = serde_json::json!({"event": "skipped", "stem": stem});
                println!("{}", line);
            } else {
                println!("  Skipping {}: no .shp file", stem);
            }
        }
        PackageEvent::Failed { stem, reason } => {
            if json {
                let line = serde_json::json!({"event": "failed", "stem": stem, "reason": reason});
                println!("{}", line);
            } else {
                println!("  Error zipping {}: {}", stem, reason);
            }
        }
    })?;

    if json {
        let summary = serde_json::json!({
            "event": "summary",
            "created": report.created.len(),
            "skipped": report.skipped,
            "failed": report.failed,
            "output": output.display().to_string(),
        });
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!();
        println!("Created {} zip files in {}", report.created.len(), output.display());
        println!();
        println!("Next step: run `silica upload` to send these to Earth Engine");
    }

    Ok(())
}
