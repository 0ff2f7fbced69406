//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SyncError, SyncResult};

use super::types::{Config, RemoteConfig};

const PROJECT_CONFIG_FILE: &str = "remote-sync.toml";
const ENV_PREFIX: &str = "REMOTE_SYNC_";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> SyncResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| SyncError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the config file and load it, then apply environment overrides
///
/// An explicit path must exist. Otherwise `./remote-sync.toml` wins over the
/// user config, and built-in defaults apply when neither exists.
pub fn load_or_default(explicit: Option<&Path>) -> SyncResult<(Config, Vec<ConfigWarning>)> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => discover(),
    };

    let (config, warnings) = match candidate {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            load_with_warnings(&path)?
        }
        None => {
            tracing::debug!("no configuration file found, using defaults");
            (Config::default(), Vec::new())
        }
    };

    Ok((with_env_overrides(config, std::env::vars()), warnings))
}

fn discover() -> Option<PathBuf> {
    let project = PathBuf::from(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Some(project);
    }

    dirs::config_dir()
        .map(|dir| dir.join("remote-sync").join("config.toml"))
        .filter(|user| user.is_file())
}

/// Apply `REMOTE_SYNC_*` overrides from an environment snapshot
///
/// `REMOTE_SYNC_<NAME>_HOST` and `REMOTE_SYNC_<NAME>_PATH` match a configured
/// remote by upper-cased name (with `-` read as `_`); an unmatched NAME
/// creates a remote named in lower case.
pub fn with_env_overrides<I>(mut config: Config, vars: I) -> Config
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in vars {
        let Some(rest) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };

        match rest {
            "DEFAULT" => config.default = value,
            "ENV" => config.local.environment = value,
            _ => {
                if let Some(name) = rest.strip_suffix("_HOST") {
                    remote_entry(&mut config, name).host = Some(value);
                } else if let Some(name) = rest.strip_suffix("_PATH") {
                    remote_entry(&mut config, name).path = Some(value);
                }
            }
        }
    }

    config
}

fn remote_entry<'a>(config: &'a mut Config, env_name: &str) -> &'a mut RemoteConfig {
    let existing = config
        .remotes
        .keys()
        .find(|name| name.to_uppercase().replace('-', "_") == env_name)
        .cloned();
    let name = existing.unwrap_or_else(|| env_name.to_lowercase());
    config.remotes.entry(name).or_default()
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "default",
        "remotes",
        "host",
        "path",
        "push_allowed",
        "paths",
        "exclude_paths",
        "exclude_tables",
        "timeouts",
        "snapshot_create",
        "snapshot_download",
        "snapshot_upload",
        "snapshot_cleanup",
        "file_sync",
        "probe",
        "dry_run",
        "local",
        "environment",
        "driver",
        "project_root",
        "storage_path",
        "snapshots",
        "tool",
        "directory",
        "subdirectory",
        "keep",
        "compress",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
