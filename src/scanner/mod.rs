//! Catalog file discovery.
//!
//! Walks a directory tree and returns the video files that should be
//! identified, skipping excluded folders.

use std::path::{Path, PathBuf};

use anyhow::Result;
use idforged_common::paths::has_extension;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::ResourceConfig;

/// Find candidate video files under `root`, sorted by path.
///
/// A directory is skipped when it is `root` joined with an entry of
/// `exclude_folders`, or when it is the configured failed folder. A folder
/// that merely shares an excluded name deeper in the tree is still scanned.
pub fn discover(root: &Path, resource: &ResourceConfig) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("Scan root is not a directory: {:?}", root);
    }

    info!("Scanning directory: {:?}", root);
    let failed = failed_dir(root, resource);
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, root, resource, &failed));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read directory entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if has_extension(entry.path(), &resource.file_type) {
            files.push(entry.into_path());
        } else {
            debug!("Skipping non-video file: {:?}", entry.path());
        }
    }

    files.sort();
    info!("Found {} candidate files under {:?}", files.len(), root);
    Ok(files)
}

/// Where failed files go for a scan of `root`.
pub fn failed_dir(root: &Path, resource: &ResourceConfig) -> PathBuf {
    if resource.failed_folder.is_absolute() {
        resource.failed_folder.clone()
    } else {
        root.join(&resource.failed_folder)
    }
}

fn is_excluded(entry: &DirEntry, root: &Path, resource: &ResourceConfig, failed: &Path) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    if entry.path() == failed {
        return true;
    }
    resource
        .exclude_folders
        .iter()
        .any(|excluded| entry.path() == root.join(excluded))
}
