//! Isolated project environment for CLI tests.
//!
//! Each `TestEnv` owns a temporary project root holding `remote-sync.toml`
//! and a temporary home, so no user configuration leaks into a run.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

/// Result of running the remote-sync binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
}

impl TestEnv {
    /// Project with the given `remote-sync.toml` body; `[local]` is appended
    pub fn with_config(config: &str) -> Self {
        let env = Self {
            project_root: TempDir::new().unwrap(),
            home_dir: TempDir::new().unwrap(),
        };
        let body = format!(
            "{config}\n[local]\nenvironment = \"local\"\nproject_root = {:?}\n",
            env.project_root.path().display().to_string()
        );
        fs::write(env.project_path("remote-sync.toml"), body).unwrap();
        env
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Create an empty snapshot file last modified `age_secs` ago
    pub fn write_snapshot(&self, name: &str, age_secs: u64) -> PathBuf {
        let dir = self.project_path("storage/snapshots");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{name}.sql.gz"));
        let file = fs::File::create(&path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(age_secs))
            .unwrap();
        path
    }

    pub fn snapshot_names(&self) -> Vec<String> {
        let dir = self.project_path("storage/snapshots");
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.project_root.path(), args)
    }

    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_remote-sync"))
            .current_dir(cwd)
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("REMOTE_SYNC_DEFAULT")
            .env_remove("REMOTE_SYNC_ENV")
            .output()
            .expect("failed to execute remote-sync");

        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

pub const TWO_REMOTES: &str = r#"
default = "staging"

[remotes.staging]
host = "deploy@staging.example.com"
path = "/var/www/app"
push_allowed = true

[remotes.production]
host = "deploy@prod.example.com"
path = "/var/www/app"
"#;
