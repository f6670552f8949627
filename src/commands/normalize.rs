//! `silica normalize` - canonical site identifiers for joins.

use std::io::{self, BufRead};

use anyhow::Result;

use silica::naming::{build_name_map, find_collisions};

pub fn cmd_normalize(names: &[String], json: bool) -> Result<()> {
    let names = if names.is_empty() {
        read_stdin_names()?
    } else {
        names.to_vec()
    };

    let map = build_name_map(names.iter().map(String::as_str));
    let collisions = find_collisions(names.iter().map(String::as_str));

    if json {
        for (name, normalized) in &map {
            let line =
                serde_json::json!({"event": "mapping", "name": name, "normalized": normalized});
            println!("{}", serde_json::to_string(&line)?);
        }
        for (normalized, originals) in &collisions {
            let line = serde_json::json!({
                "event": "collision", "normalized": normalized, "names": originals
            });
            println!("{}", serde_json::to_string(&line)?);
        }
        let summary = serde_json::json!({
            "event": "summary",
            "count": map.len(),
            "collisions": collisions.len(),
        });
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        for (name, normalized) in &map {
            println!("{:50} → {}", name, normalized);
        }
        if !collisions.is_empty() {
            println!();
            for (normalized, originals) in &collisions {
                let quoted: Vec<String> = originals
                    .iter()
                    .map(|original| format!("\"{}\"", original))
                    .collect();
                println!(
                    "⚠ {} names collapse to '{}': {}",
                    originals.len(),
                    normalized,
                    quoted.join(", ")
                );
            }
        }
    }

    Ok(())
}

/// One name per line; surrounding whitespace is trimmed and blank lines
/// are dropped.
fn read_stdin_names() -> Result<Vec<String>> {
    let stdin = io::stdin();
    let mut names = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            names.push(trimmed.to_string());
        }
    }
    Ok(names)
}
