//! Common test utilities for silica CLI tests.
//!
//! Provides `TestEnv`, an isolated environment with temp working and
//! home directories, plus helpers to run the silica binary with stub
//! `earthengine`/`gsutil` scripts shadowing the real tools on PATH.

#![allow(dead_code)]

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Result of running a silica CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment with temp directories.
///
/// Provides:
/// - Isolated working directory for shapefiles and archives
/// - Isolated home directory, so default paths never touch the real one
/// - A stub-bin directory prepended to PATH for faking external tools
/// - CLI command execution helpers
pub struct TestEnv {
    /// Temporary directory commands run from
    work_dir: TempDir,
    /// Temporary directory for HOME
    home_dir: TempDir,
    /// Directory holding stub executables, first on PATH
    stub_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let work_dir = TempDir::new().expect("Failed to create temp work dir");
        let home_dir = TempDir::new().expect("Failed to create temp home dir");
        let stub_dir = work_dir.path().join("stub-bin");
        fs::create_dir_all(&stub_dir).expect("Failed to create stub dir");
        Self {
            work_dir,
            home_dir,
            stub_dir,
        }
    }

    /// Get path relative to the working directory
    pub fn work_path(&self, relative: &str) -> PathBuf {
        self.work_dir.path().join(relative)
    }

    /// Get path relative to the home directory
    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home_dir.path().join(relative)
    }

    /// Create a directory (and parents) under the working directory
    pub fn create_dir(&self, relative: &str) -> PathBuf {
        let path = self.work_path(relative);
        fs::create_dir_all(&path).expect("Failed to create directory");
        path
    }

    /// Write a file under the working directory
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Install an executable shell script into the stub-bin directory.
    ///
    /// The stub directory is first on PATH, so the script shadows any
    /// real `earthengine` or `gsutil` installation.
    #[cfg(unix)]
    pub fn stub_binary(&self, name: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.stub_dir.join(name);
        fs::write(&path, script).expect("Failed to write stub script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark stub executable");
    }

    /// Path the stub scripts append their invocations to
    pub fn stub_log_path(&self) -> PathBuf {
        self.work_path("stub-invocations.log")
    }

    /// Read the stub invocation log (empty if no stub ran)
    pub fn stub_log(&self) -> String {
        fs::read_to_string(self.stub_log_path()).unwrap_or_default()
    }

    /// Run silica in this environment
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run silica in this environment with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = self.command(args);
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("Failed to execute silica");
        output_to_result(output)
    }

    /// Run silica with the given text piped to stdin
    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> TestResult {
        let mut cmd = self.command(args);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().expect("Failed to spawn silica");
        child
            .stdin
            .take()
            .expect("stdin not captured")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
        let output = child.wait_with_output().expect("Failed to wait for silica");
        output_to_result(output)
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_silica"));
        cmd.current_dir(self.work_dir.path())
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("USERPROFILE", self.home_dir.path())
            .env("PATH", self.stubbed_path());
        cmd
    }

    /// System PATH with the stub directory prepended
    fn stubbed_path(&self) -> OsString {
        let mut paths = vec![self.stub_dir.clone()];
        if let Some(system_path) = env::var_os("PATH") {
            paths.extend(env::split_paths(&system_path));
        }
        env::join_paths(paths).expect("Failed to join PATH entries")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert Command output to TestResult
fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
