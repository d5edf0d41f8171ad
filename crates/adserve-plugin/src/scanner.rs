// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directory scan producing the component file index.

use std::path::{Path, PathBuf};

use adserve_core::ScanDepth;
use adserve_core::types::IDENTIFIER_SEPARATOR;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::naming::component_stem;

/// One discovered component file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentFile {
    /// `"<dir>:<name>"`, where `<dir>` is the directory path relative to the
    /// extension directory (joined with `/`) and `<name>` is the file name
    /// without its suffix. Files directly in the extension directory have no
    /// `<dir>:` part.
    pub key: String,
    /// Absolute (or root-relative) path to the file.
    pub path: PathBuf,
}

impl ComponentFile {
    /// Split the key into `(group, component)`.
    ///
    /// Returns `None` for root-level files (no group) and for files nested
    /// more than one directory deep, neither of which is addressable as
    /// `extension/group/component`.
    pub fn group_and_component(&self) -> Option<(&str, &str)> {
        let (group, component) = self.key.split_once(IDENTIFIER_SEPARATOR)?;
        if group.is_empty() || group.contains('/') {
            return None;
        }
        Some((group, component))
    }
}

/// Scan `scan_dir` for component files, keyed relative to `extension_dir`.
///
/// Walk order is sorted by file name at every level so repeated scans are
/// stable. An unreadable or missing directory yields no files. Symlinked
/// component files are listed when their target is a regular file; symlinked
/// directories are not descended into.
pub fn scan_component_files(
    extension_dir: &Path,
    scan_dir: &Path,
    depth: ScanDepth,
) -> Vec<ComponentFile> {
    if !scan_dir.is_dir() {
        debug!(dir = %scan_dir.display(), "component directory not readable, skipping");
        return Vec::new();
    }

    WalkDir::new(scan_dir)
        .min_depth(1)
        .max_depth(depth.max_walk_depth())
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable plugin path");
                None
            }
        })
        .filter(|e| e.file_type().is_file() || (e.path_is_symlink() && e.path().is_file()))
        .filter_map(|entry| {
            let file_name = entry.file_name().to_str()?;
            let stem = component_stem(file_name)?;
            if !is_valid_segment(stem) {
                debug!(file = %entry.path().display(), "component file name has invalid characters");
                return None;
            }

            let relative_dir = entry
                .path()
                .parent()?
                .strip_prefix(extension_dir)
                .ok()?
                .components()
                .map(|c| c.as_os_str().to_str())
                .collect::<Option<Vec<_>>>()?;
            if !relative_dir.iter().all(|s| is_valid_segment(s)) {
                return None;
            }

            let key = if relative_dir.is_empty() {
                stem.to_string()
            } else {
                format!("{}{IDENTIFIER_SEPARATOR}{stem}", relative_dir.join("/"))
            };

            Some(ComponentFile {
                key,
                path: entry.path().to_path_buf(),
            })
        })
        .collect()
}

/// Path segments are limited to `[A-Za-z0-9_-]`.
fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
