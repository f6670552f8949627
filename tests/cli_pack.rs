//! Integration tests for `silica pack`.

mod common;

use std::fs::File;
use std::io::Read;

use common::TestEnv;

/// Read back entry names from a zip archive, sorted.
fn archive_entries(env: &TestEnv, relative: &str) -> Vec<String> {
    let file = File::open(env.work_path(relative)).expect("open archive");
    let mut archive = zip::ZipArchive::new(file).expect("read archive");
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).expect("entry").name().to_string())
        .collect();
    names.sort();
    names
}

fn archive_entry_content(env: &TestEnv, relative: &str, entry: &str) -> String {
    let file = File::open(env.work_path(relative)).expect("open archive");
    let mut archive = zip::ZipArchive::new(file).expect("read archive");
    let mut content = String::new();
    archive
        .by_name(entry)
        .expect("entry by name")
        .read_to_string(&mut content)
        .expect("read entry");
    content
}

#[test]
fn pack_creates_archive_per_shapefile() {
    let env = TestEnv::new();
    env.write_file("shapes/site_a.shp", "shp-bytes");
    env.write_file("shapes/site_a.shx", "shx-bytes");
    env.write_file("shapes/site_a.dbf", "dbf-bytes");

    let result = env.run(&["pack", "-i", "shapes", "-o", "zips"]);

    assert!(
        result.success,
        "pack should succeed:\n{}",
        result.combined_output()
    );
    assert!(result.stdout.contains("Found 1 shapefiles to zip"));
    assert!(result.stdout.contains("Created 1 zip files in"));

    assert_eq!(
        archive_entries(&env, "zips/site_a.zip"),
        vec!["site_a.dbf", "site_a.shp", "site_a.shx"]
    );
    assert_eq!(
        archive_entry_content(&env, "zips/site_a.zip", "site_a.shp"),
        "shp-bytes"
    );
}

#[test]
fn pack_skips_groups_without_shp() {
    let env = TestEnv::new();
    env.write_file("shapes/site_a.shp", "shp");
    env.write_file("shapes/site_a.dbf", "dbf");
    env.write_file("shapes/site_b.dbf", "orphan sidecar");

    let result = env.run(&["pack", "-i", "shapes", "-o", "zips"]);

    assert!(
        result.success,
        "skipped groups are not failures:\n{}",
        result.combined_output()
    );
    // Groups are counted before filtering, matching the scan line.
    assert!(result.stdout.contains("Found 2 shapefiles to zip"));
    assert!(result.stdout.contains("Skipping site_b: no .shp file"));
    assert!(result.stdout.contains("Created 1 zip files in"));

    assert!(env.work_path("zips/site_a.zip").exists());
    assert!(!env.work_path("zips/site_b.zip").exists());
}

#[test]
fn pack_matches_component_extensions_case_insensitively() {
    let env = TestEnv::new();
    env.write_file("shapes/SITE_C.SHP", "shp");
    env.write_file("shapes/SITE_C.DBF", "dbf");

    let result = env.run(&["pack", "-i", "shapes", "-o", "zips"]);

    assert!(
        result.success,
        "uppercase components should pack:\n{}",
        result.combined_output()
    );
    assert_eq!(
        archive_entries(&env, "zips/SITE_C.zip"),
        vec!["SITE_C.DBF", "SITE_C.SHP"]
    );
}

#[test]
fn pack_excludes_non_component_files() {
    let env = TestEnv::new();
    env.write_file("shapes/site_a.shp", "shp");
    env.write_file("shapes/site_a.prj", "prj");
    env.write_file("shapes/site_a.qpj", "not a recognized sidecar");
    env.write_file("shapes/readme.txt", "notes");

    let result = env.run(&["pack", "-i", "shapes", "-o", "zips"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("Found 1 shapefiles to zip"));
    assert_eq!(
        archive_entries(&env, "zips/site_a.zip"),
        vec!["site_a.prj", "site_a.shp"]
    );
}

#[test]
fn pack_creates_missing_output_directory() {
    let env = TestEnv::new();
    env.write_file("shapes/basin.shp", "shp");

    let result = env.run(&["pack", "-i", "shapes", "-o", "zips/nested/out"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env.work_path("zips/nested/out/basin.zip").exists());
}

#[test]
fn pack_fails_on_missing_input_directory() {
    let env = TestEnv::new();

    let result = env.run(&["pack", "-i", "no-such-dir", "-o", "zips"]);

    assert!(!result.success, "missing input must be fatal");
    assert_eq!(result.exit_code, 1);
    assert!(
        result.stderr.contains("directory not found"),
        "stderr should name the problem:\n{}",
        result.stderr
    );
    assert!(result.stderr.contains("no-such-dir"));
}

#[test]
fn pack_json_emits_machine_readable_events() {
    let env = TestEnv::new();
    env.write_file("shapes/site_a.shp", "shp");
    env.write_file("shapes/site_a.dbf", "dbf");
    env.write_file("shapes/site_b.dbf", "orphan");

    let result = env.run(&["pack", "--json", "-i", "shapes", "-o", "zips"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(
        !result.stdout.contains("📦"),
        "json mode must not render the banner:\n{}",
        result.stdout
    );

    let lines: Vec<serde_json::Value> = result
        .stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is one json object"))
        .collect();

    assert_eq!(lines[0]["event"], "scan");
    assert_eq!(lines[0]["shapefiles"], 2);

    let skipped = lines
        .iter()
        .find(|line| line["event"] == "skipped")
        .expect("skipped event");
    assert_eq!(skipped["stem"], "site_b");

    let summary = lines.last().expect("summary line");
    assert_eq!(summary["event"], "summary");
    assert_eq!(summary["created"], 1);
    assert_eq!(summary["skipped"], 1);
    assert_eq!(summary["failed"], 0);
}

// Default directories resolve under HOME, which only overrides cleanly
// on unix.
#[cfg(unix)]
#[test]
fn pack_defaults_fail_when_download_dir_absent() {
    let env = TestEnv::new();

    let result = env.run(&["pack"]);

    assert!(!result.success);
    assert!(result.stderr.contains("directory not found"));
    assert!(
        result
            .stderr
            .contains("Downloads/silica-shapefiles/artisanal-shapefiles-2"),
        "error should point at the default source dir:\n{}",
        result.stderr
    );
}

#[cfg(unix)]
#[test]
fn pack_defaults_resolve_under_home() {
    let env = TestEnv::new();
    let source = env.home_path("Downloads/silica-shapefiles/artisanal-shapefiles-2");
    std::fs::create_dir_all(&source).expect("create default source dir");
    std::fs::write(source.join("basin.shp"), "shp").expect("write component");
    std::fs::write(source.join("basin.dbf"), "dbf").expect("write component");

    let result = env.run(&["pack"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env
        .home_path("Downloads/silica-shapefiles/zipped-for-gee/basin.zip")
        .exists());
}
