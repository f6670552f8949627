//! `silica upload` - batch-upload zipped shapefiles to Earth Engine.
//!
//! Two variants share one engine: uploading local zip archives, and
//! ingesting objects already staged in a Cloud Storage bucket.

use std::path::Path;

use anyhow::Result;

use silica::config::Config;
use silica::store::EarthEngineCli;
use silica::upload::{
    BucketListing, LocalZipDir, UploadEngine, UploadEvent, UploadOutcome, UploadReport,
};

pub fn cmd_upload(
    config: &Config,
    source: Option<&Path>,
    bucket: Option<Option<String>>,
    json: bool,
) -> Result<()> {
    let asset_root = config.asset_root();

    match bucket {
        Some(uri_override) => {
            let bucket = uri_override.unwrap_or_else(|| config.bucket.clone());
            // Against staged objects the CLI phrases "missing" differently.
            let store = EarthEngineCli::new().with_missing_marker("does not exist");
            let engine = UploadEngine::new(store, &asset_root);
            let listing = BucketListing::new(&bucket);

            if !json {
                println!("🌍 Silica Upload");
                println!("Bucket: {}", bucket);
                println!();
            }

            let report = engine.run(&listing, &mut |event| {
                render_event(&event, "Started", true, json, &asset_root)
            })?;
            finish(&report, "Started", true, json)
        }
        None => {
            let zip_dir = source.unwrap_or(&config.zip_dir);
            let store = EarthEngineCli::new();
            let engine = UploadEngine::new(store, &asset_root);
            let candidates = LocalZipDir::new(zip_dir);

            if !json {
                println!("🌍 Silica Upload");
                println!("Source: {}", zip_dir.display());
                println!();
            }

            let report = engine.run(&candidates, &mut |event| {
                render_event(&event, "Uploaded", false, json, &asset_root)
            })?;
            finish(&report, "Uploaded", false, json)
        }
    }
}

fn render_event(event: &UploadEvent, verb: &str, from_bucket: bool, json: bool, asset_root: &str) {
    if json {
        let line = match event {
            UploadEvent::Enumerating => None,
            UploadEvent::Found { total } => {
                Some(serde_json::json!({"event": "found", "total": total}))
            }
            UploadEvent::Skipped { index, total, name } => Some(serde_json::json!({
                "event": "skipped", "index": index, "total": total, "name": name
            })),
            UploadEvent::Uploaded { index, total, name } => Some(serde_json::json!({
                "event": "uploaded", "index": index, "total": total, "name": name
            })),
            UploadEvent::Failed {
                index,
                total,
                name,
                reason,
            } => Some(serde_json::json!({
                "event": "failed", "index": index, "total": total, "name": name, "reason": reason
            })),
        };
        if let Some(line) = line {
            println!("{}", line);
        }
        return;
    }

    match event {
        UploadEvent::Enumerating => {
            if from_bucket {
                println!("Listing files in GCS...");
            }
        }
        UploadEvent::Found { total } => {
            if from_bucket {
                println!("Found {} files to ingest", total);
                println!();
            } else {
                println!("Found {} shapefiles to upload", total);
                if *total > 0 {
                    println!();
                    println!("Uploading to: {}", asset_root);
                }
            }
        }
        UploadEvent::Skipped { index, total, name } => {
            println!("[{}/{}] Skipped (exists): {}", index, total, name);
        }
        UploadEvent::Uploaded { index, total, name } => {
            println!("[{}/{}] {}: {}", index, total, verb, name);
        }
        UploadEvent::Failed {
            index,
            total,
            name,
            reason,
        } => {
            println!("[{}/{}] FAILED: {} - {}", index, total, name, reason);
        }
    }
}

fn finish(report: &UploadReport, verb: &str, from_bucket: bool, json: bool) -> Result<()> {
    if json {
        let failures: Vec<&UploadOutcome> = report.failures().collect();
        let summary = serde_json::json!({
            "event": "summary",
            "uploaded": report.uploaded(),
            "skipped": report.skipped(),
            "failed": report.failed(),
            "failures": failures,
        });
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!();
        println!("{}", report.render_summary(verb));
        if from_bucket {
            println!();
            println!("Note: Uploads run as background tasks in GEE.");
            println!("Check progress at: https://code.earthengine.google.com/ (Tasks tab)");
        }
    }

    Ok(())
}
