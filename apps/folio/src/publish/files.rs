//! File enumeration for publishing.
//!
//! Which files are eligible is decided by a predicate handed to
//! [`collect_files`]; [`ExclusionRules`] is the default one.

use std::path::{Component, Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::publish::PublishError;

/// A file on disk and the path it will have in the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub disk_path: PathBuf,
    pub repo_path: String,
}

impl LocalFile {
    pub fn read(&self) -> Result<Vec<u8>, PublishError> {
        std::fs::read(&self.disk_path).map_err(|source| PublishError::Io {
            path: self.disk_path.clone(),
            source,
        })
    }
}

/// Skips version-control metadata, secret files, build output, and the
/// publisher's own executable.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    pub skip_prefixes: Vec<String>,
    pub skip_dirs: Vec<String>,
    pub skip_files: Vec<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            skip_prefixes: vec![".git".to_string()],
            skip_dirs: vec!["target".to_string()],
            skip_files: vec![".env".to_string()],
        }
    }
}

impl ExclusionRules {
    /// Default rules plus the file name of the running executable.
    pub fn for_current_exe() -> Self {
        let mut rules = Self::default();
        if let Some(name) = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        {
            rules.skip_files.push(name);
        }
        rules
    }

    /// `rel` is relative to the publish root.
    pub fn allows(&self, rel: &Path) -> bool {
        let names: Vec<_> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy()),
                _ => None,
            })
            .collect();

        let Some((file_name, dirs)) = names.split_last() else {
            return true;
        };

        if names
            .iter()
            .any(|n| self.skip_prefixes.iter().any(|p| n.starts_with(p.as_str())))
        {
            return false;
        }
        if dirs.iter().any(|d| self.skip_dirs.iter().any(|s| s == d)) {
            return false;
        }
        // A skipped dir name can also be the last component while walking.
        if self.skip_dirs.iter().any(|s| s == file_name) {
            return false;
        }
        !self.skip_files.iter().any(|s| s == file_name)
    }
}

/// `a/b/c` regardless of platform separator.
pub fn to_repo_path(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Walks `root` and returns every file whose root-relative path satisfies
/// `keep`, sorted by repo path. Directories failing `keep` are not descended.
pub fn collect_files<F>(root: &Path, keep: F) -> Result<Vec<LocalFile>, PublishError>
where
    F: Fn(&Path) -> bool,
{
    let mut files = Vec::new();
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || entry
                .path()
                .strip_prefix(root)
                .map(|rel| keep(rel))
                .unwrap_or(false)
    });

    for entry in walker {
        let entry = entry.map_err(|e| PublishError::Io {
            path: root.to_path_buf(),
            source: e.into(),
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        // Links are not followed while walking; a link to a file publishes its target.
        if !entry.path().is_file() {
            debug!("Skipping {}: not a regular file", entry.path().display());
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        files.push(LocalFile {
            repo_path: to_repo_path(rel),
            disk_path: entry.into_path(),
        });
    }

    files.sort_by(|a, b| a.repo_path.cmp(&b.repo_path));
    Ok(files)
}

/// Maps explicit paths (e.g. freshly generated files) to repo paths relative
/// to `root`. Paths outside `root` land at the repository top level.
pub fn files_from_paths(root: &Path, paths: &[PathBuf]) -> Vec<LocalFile> {
    paths
        .iter()
        .map(|path| {
            let repo_path = match path.strip_prefix(root) {
                Ok(rel) => to_repo_path(rel),
                Err(_) => path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            };
            LocalFile {
                disk_path: path.clone(),
                repo_path,
            }
        })
        .collect()
}
