//! Tree scanner: imports an on-disk app directory into a [`RouteTree`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::application::{ApplicationError, ApplicationResult, WalkResultExt};
use crate::config::{ScanConfig, Settings};
use crate::domain::{Conventions, DomainError, EntryId, RouteTree};

/// Read-only importer for app directories.
#[derive(Debug, Clone, Default)]
pub struct TreeScanner {
    conventions: Conventions,
    scan: ScanConfig,
}

impl TreeScanner {
    pub fn new(conventions: Conventions, scan: ScanConfig) -> Self {
        Self { conventions, scan }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.conventions.clone(), settings.scan.clone())
    }

    /// Build a tree mirroring `app_dir`.
    ///
    /// Entries are visited sorted by file name so the result is stable.
    /// Ignored names are not descended into; files with other extensions are
    /// skipped. A second page or layout marker in one directory is skipped
    /// with a warning.
    #[instrument(level = "debug", skip(self))]
    pub fn scan(&self, app_dir: &Path) -> ApplicationResult<RouteTree> {
        if !app_dir.exists() {
            return Err(ApplicationError::Scan {
                path: app_dir.to_path_buf(),
                reason: "not found".to_string(),
            });
        }
        if !app_dir.is_dir() {
            return Err(ApplicationError::Scan {
                path: app_dir.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let mut tree = RouteTree::with_conventions(self.conventions.clone());
        let mut ids: HashMap<PathBuf, EntryId> = HashMap::new();
        ids.insert(app_dir.to_path_buf(), tree.root());

        let walker = WalkDir::new(app_dir)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_ignored(e));

        for entry in walker {
            let entry = entry.with_path_context("scan", app_dir)?;
            let Some(&parent) = entry.path().parent().and_then(|p| ids.get(p)) else {
                trace!("orphan entry {}", entry.path().display());
                continue;
            };
            let name = entry.file_name().to_string_lossy().to_string();

            if entry.file_type().is_dir() {
                if let Some(id) = tree.add_directory(parent, &name)? {
                    ids.insert(entry.path().to_path_buf(), id);
                }
                continue;
            }

            let extension = entry.path().extension().and_then(|e| e.to_str());
            if !self.scan.accepts_extension(extension) {
                trace!("skipping {}", entry.path().display());
                continue;
            }
            match tree.add_file(parent, &name) {
                Ok(_) => {}
                Err(DomainError::DuplicateMarker { directory, marker }) => {
                    warn!(
                        "skipping {}: {} already has a {} file",
                        entry.path().display(),
                        directory,
                        marker
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        debug!("scanned {} entries from {}", tree.len(), app_dir.display());
        Ok(tree)
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .map(|name| self.scan.is_ignored(name))
            .unwrap_or(false)
    }
}
