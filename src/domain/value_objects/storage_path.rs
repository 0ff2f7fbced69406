//! Storage Path Value Object
//!
//! A user-supplied relative path that has been proven to stay inside the
//! storage root. File sync builds every local and remote path from one of
//! these, never from raw input.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::error::{SyncError, SyncResult};

const TRAVERSAL_SEQUENCES: [&str; 2] = ["../", "..\\"];

/// A validated path relative to the storage root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath {
    relative: String,
    local: PathBuf,
}

impl StoragePath {
    /// Validate `candidate` against `root`
    ///
    /// Traversal sequences are stripped textually and leading separators
    /// removed; any stripping counts as a traversal attempt. The parent of the
    /// joined path is then canonicalized (walking up to the nearest existing
    /// ancestor, since the final directories may be created later) and must be
    /// the canonical root or nested under it.
    pub fn resolve(root: &Path, candidate: &str) -> SyncResult<Self> {
        let stripped = strip_traversal(candidate);
        if stripped != candidate {
            return Err(SyncError::PathTraversal {
                path: candidate.to_string(),
            });
        }

        let relative = stripped
            .trim_start_matches(['/', '\\'])
            .trim_end_matches(['/', '\\'])
            .to_string();

        if relative.is_empty() {
            return Err(SyncError::InvalidPath {
                path: candidate.to_string(),
            });
        }

        // Bare ".." segments survive the textual strip ("app/..")
        if Path::new(&relative)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(SyncError::PathTraversal {
                path: candidate.to_string(),
            });
        }

        let canonical_root = root
            .canonicalize()
            .map_err(|_| SyncError::StorageInaccessible {
                root: root.to_path_buf(),
            })?;

        let local = root.join(&relative);
        let parent = local.parent().unwrap_or(root);

        let canonical_parent =
            canonical_ancestor(parent).ok_or_else(|| SyncError::InvalidPath {
                path: candidate.to_string(),
            })?;

        if !canonical_parent.starts_with(&canonical_root) {
            return Err(SyncError::PathTraversal {
                path: candidate.to_string(),
            });
        }

        Ok(Self { relative, local })
    }

    /// Path relative to the storage root, without leading or trailing separators
    pub fn relative(&self) -> &str {
        &self.relative
    }

    /// Absolute local directory
    pub fn local_path(&self) -> &Path {
        &self.local
    }

    /// Local directory with a trailing separator (rsync "contents of")
    pub fn local_dir_arg(&self) -> String {
        format!("{}/", self.local.display().to_string().trim_end_matches('/'))
    }

    /// Remote directory under a remote storage root, with a trailing separator
    pub fn remote_dir_arg(&self, remote_storage: &str) -> String {
        format!("{}/{}/", remote_storage.trim_end_matches('/'), self.relative)
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relative)
    }
}

/// Remove literal traversal sequences until none remain
fn strip_traversal(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let next = TRAVERSAL_SEQUENCES
            .iter()
            .fold(current.clone(), |acc, seq| acc.replace(seq, ""));
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Canonical form of the nearest existing ancestor, which must be a directory
fn canonical_ancestor(path: &Path) -> Option<PathBuf> {
    let existing = path.ancestors().find(|a| a.exists())?;
    if !existing.is_dir() {
        return None;
    }
    existing.canonicalize().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn storage_root() -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let root = dir.path().join("storage");
        fs::create_dir_all(root.join("app")).unwrap();
        (dir, root)
    }

    #[test]
    fn accepts_nested_relative_path() {
        let (_dir, root) = storage_root();
        let path = StoragePath::resolve(&root, "app/public").unwrap();
        assert_eq!(path.relative(), "app/public");
        assert_eq!(path.local_path(), root.join("app/public"));
    }

    #[test]
    fn rejects_parent_traversal() {
        let (_dir, root) = storage_root();
        let err = StoragePath::resolve(&root, "../../etc/passwd").unwrap_err();
        assert!(matches!(err, SyncError::PathTraversal { .. }));
    }

    #[test]
    fn rejects_backslash_traversal() {
        let (_dir, root) = storage_root();
        let err = StoragePath::resolve(&root, "app\\..\\..\\secrets").unwrap_err();
        assert!(matches!(err, SyncError::PathTraversal { .. }));
    }

    #[test]
    fn rejects_nested_sequences_that_reassemble() {
        let (_dir, root) = storage_root();
        let err = StoragePath::resolve(&root, "....//etc").unwrap_err();
        assert!(matches!(err, SyncError::PathTraversal { .. }));
    }

    #[test]
    fn rejects_trailing_parent_segment() {
        let (_dir, root) = storage_root();
        let err = StoragePath::resolve(&root, "app/..").unwrap_err();
        assert!(matches!(err, SyncError::PathTraversal { .. }));
    }

    #[test]
    fn accepts_missing_parent_inside_root() {
        let (_dir, root) = storage_root();
        let path = StoragePath::resolve(&root, "app/uploads/2024/avatars").unwrap();
        assert_eq!(path.relative(), "app/uploads/2024/avatars");
        assert!(!path.local_path().exists());
    }

    #[test]
    fn strips_leading_separators() {
        let (_dir, root) = storage_root();
        let path = StoragePath::resolve(&root, "/app/").unwrap();
        assert_eq!(path.relative(), "app");
    }

    #[test]
    fn rejects_empty_path() {
        let (_dir, root) = storage_root();
        let err = StoragePath::resolve(&root, "/").unwrap_err();
        assert!(matches!(err, SyncError::InvalidPath { .. }));
    }

    #[test]
    fn rejects_parent_that_is_a_file() {
        let (_dir, root) = storage_root();
        fs::write(root.join("app/notes.txt"), "x").unwrap();
        let err = StoragePath::resolve(&root, "app/notes.txt/inner").unwrap_err();
        assert!(matches!(err, SyncError::InvalidPath { .. }));
    }

    #[test]
    fn reports_inaccessible_root() {
        let dir = tempdir().unwrap();
        let err = StoragePath::resolve(&dir.path().join("missing"), "app").unwrap_err();
        assert!(matches!(err, SyncError::StorageInaccessible { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn rejects_symlink_escaping_root() {
        let (dir, root) = storage_root();
        let outside = dir.path().join("outside");
        fs::create_dir_all(&outside).unwrap();
        std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();

        let err = StoragePath::resolve(&root, "link/data").unwrap_err();
        assert!(matches!(err, SyncError::PathTraversal { .. }));
    }

    #[test]
    fn rsync_arguments_end_with_separator() {
        let (_dir, root) = storage_root();
        let path = StoragePath::resolve(&root, "app").unwrap();
        assert!(path.local_dir_arg().ends_with("storage/app/"));
        assert_eq!(
            path.remote_dir_arg("/var/www/app/storage"),
            "/var/www/app/storage/app/"
        );
    }
}
