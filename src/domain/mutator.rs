//! In-place route tree mutations
//!
//! Every operation validates first and then applies fully, so an error
//! leaves the tree untouched. A target that no longer exists is reported as
//! `None`/`false`/`0`, not as an error.

use tracing::{debug, instrument, trace};

use crate::domain::arena::RouteTree;
use crate::domain::entities::{CreatedRoute, CreatedSegment, EntryId, EntryKind};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::path;
use crate::domain::validation::{validate_entry_name, validate_route_path, validate_segment_name};

/// Name used by `add_segment` when the caller gives none.
pub const DEFAULT_SEGMENT_NAME: &str = "new-segment";

impl RouteTree {
    /// Make `route_path` routable, reusing as much of the existing tree as
    /// possible.
    ///
    /// Idempotent: creating an existing route is a no-op.
    #[instrument(level = "debug", skip(self))]
    pub fn create_route(&mut self, route_path: &str) -> DomainResult<CreatedRoute> {
        validate_route_path(route_path)?;
        let target = path::canonical(route_path);
        let dirs = self.directories();

        if let Some(existing) = self.find_route_directory(&target) {
            if self.has_page(existing) {
                debug!("route {} already exists", target);
                return Ok(CreatedRoute {
                    directory: existing,
                    created: Vec::new(),
                });
            }
            self.check_page_slot(existing)?;
            let page = self.attach_page(existing);
            return Ok(CreatedRoute {
                directory: existing,
                created: vec![page],
            });
        }

        // Deepest page-bearing strict prefix; ties keep the first declared.
        let mut best: Option<(EntryId, usize)> = None;
        for d in &dirs {
            if !path::is_strict_prefix(&d.url, &target) || !self.has_page(d.id) {
                continue;
            }
            let depth = path::effective_depth(&d.url);
            if best.map(|(_, best_depth)| depth > best_depth).unwrap_or(true) {
                best = Some((d.id, depth));
            }
        }
        let (mut current, consumed) = match best {
            Some((id, depth)) => (id, depth),
            None => (self.root(), 0),
        };
        trace!("best parent {} at depth {}", current, consumed);

        // Descend through existing directories; any clash is found before the
        // first insert.
        let segments = path::segments(&target);
        let mut missing = segments.get(consumed..).unwrap_or_default();
        while let Some((segment, rest)) = missing.split_first() {
            let Some(child) = self.find_child(current, segment) else {
                break;
            };
            if !self.get(child).map_or(false, |e| e.is_dir()) {
                return Err(DomainError::NameTaken {
                    parent: self.raw_path(current).unwrap_or_default(),
                    name: segment.to_string(),
                });
            }
            current = child;
            missing = rest;
        }
        if missing.is_empty() {
            self.check_page_slot(current)?;
        }

        let mut created = Vec::new();
        for segment in missing {
            current = self.insert_entry(current, segment, EntryKind::Directory);
            created.push(current);
        }
        if !self.has_page(current) {
            created.push(self.attach_page(current));
        }
        debug!("created route {} ({} new entries)", target, created.len());
        Ok(CreatedRoute {
            directory: current,
            created,
        })
    }

    /// Remove the page marker at `route_path` and prune directories left
    /// without any file, walking up until the root.
    ///
    /// Returns whether a page marker was removed.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_route(&mut self, route_path: &str) -> bool {
        let Some(dir) = self.find_route_directory(route_path) else {
            return false;
        };
        let page = self
            .children(dir)
            .find(|e| e.is_file() && self.conventions().is_page_marker(e.name()))
            .map(|e| e.id());
        let Some(page) = page else {
            return false;
        };
        self.remove_subtree(page);

        let mut current = dir;
        while current != self.root() && !self.subtree_has_file(current) {
            let Some(parent) = self.parent(current) else {
                break;
            };
            let removed = self.remove_subtree(current);
            trace!("pruned empty directory {} ({} entries)", current, removed);
            current = parent;
        }
        true
    }

    /// Insert a page-bearing child directory under the directory at
    /// `parent_path`, suffixing `-2`, `-3`, … until the name is unique.
    #[instrument(level = "debug", skip(self))]
    pub fn add_segment(
        &mut self,
        parent_path: &str,
        name: Option<&str>,
    ) -> DomainResult<Option<CreatedSegment>> {
        let base = name.map(str::trim).unwrap_or(DEFAULT_SEGMENT_NAME);
        validate_segment_name(base)?;
        let Some(parent) = self.find_route_directory(parent_path) else {
            return Ok(None);
        };

        let name = self.unique_child_name(parent, base);
        let id = self.insert_entry(parent, &name, EntryKind::Directory);
        self.attach_page(id);
        debug!("added segment {} under {}", name, parent_path);
        Ok(Some(CreatedSegment { id, name }))
    }

    /// Rename a directory segment in place; the id is preserved.
    ///
    /// Returns the previous name, or `None` if the entry no longer exists.
    #[instrument(level = "debug", skip(self))]
    pub fn rename_segment(&mut self, id: EntryId, new_name: &str) -> DomainResult<Option<String>> {
        validate_segment_name(new_name)?;
        self.rename_checked(id, new_name.trim())
    }

    /// Rename any entry (files, groups, dynamic segments) in place.
    pub fn rename_entry(&mut self, id: EntryId, new_name: &str) -> DomainResult<Option<String>> {
        validate_entry_name(new_name)?;
        self.rename_checked(id, new_name)
    }

    fn rename_checked(&mut self, id: EntryId, new_name: &str) -> DomainResult<Option<String>> {
        if !self.contains(id) {
            return Ok(None);
        }
        if id == self.root() {
            return Err(DomainError::RootImmutable);
        }
        if self.sibling_names(id).contains(&new_name) {
            return Err(DomainError::NameTaken {
                parent: self.parent_label(id),
                name: new_name.to_string(),
            });
        }
        if let Some(entry) = self.get(id) {
            if entry.is_file() {
                if let Some(marker) = self.conventions().marker_of(new_name) {
                    let was_same = self.conventions().marker_of(entry.name()) == Some(marker);
                    let parent = self.parent(id).unwrap_or(self.root());
                    if !was_same && self.has_marker(parent, marker) {
                        return Err(DomainError::DuplicateMarker {
                            directory: self.parent_label(id),
                            marker: marker.to_string(),
                        });
                    }
                }
            }
        }
        Ok(self.set_name(id, new_name))
    }

    /// Manually add a directory. `None` if `parent` no longer exists.
    pub fn add_directory(&mut self, parent: EntryId, name: &str) -> DomainResult<Option<EntryId>> {
        self.add_checked(parent, name, EntryKind::Directory)
    }

    /// Manually add a file. A second page or layout marker is refused.
    pub fn add_file(&mut self, parent: EntryId, name: &str) -> DomainResult<Option<EntryId>> {
        self.add_checked(parent, name, EntryKind::File)
    }

    fn add_checked(
        &mut self,
        parent: EntryId,
        name: &str,
        kind: EntryKind,
    ) -> DomainResult<Option<EntryId>> {
        validate_entry_name(name)?;
        let Some(parent_entry) = self.get(parent) else {
            return Ok(None);
        };
        if !parent_entry.is_dir() {
            return Err(DomainError::NotADirectory(
                self.raw_path(parent).unwrap_or_default(),
            ));
        }
        let label = self.raw_path(parent).unwrap_or_default();
        if self.find_child(parent, name).is_some() {
            return Err(DomainError::NameTaken {
                parent: label,
                name: name.to_string(),
            });
        }
        if kind == EntryKind::File {
            if let Some(marker) = self.conventions().marker_of(name) {
                if self.has_marker(parent, marker) {
                    return Err(DomainError::DuplicateMarker {
                        directory: label,
                        marker: marker.to_string(),
                    });
                }
            }
        }
        Ok(Some(self.insert_entry(parent, name, kind)))
    }

    /// Remove an entry and everything below it. No pruning of ancestors.
    ///
    /// Returns the number of removed entries, `0` for a stale id.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_entry(&mut self, id: EntryId) -> DomainResult<usize> {
        if id == self.root() {
            return Err(DomainError::RootImmutable);
        }
        if !self.contains(id) {
            return Ok(0);
        }
        Ok(self.remove_subtree(id))
    }

    /// A directory named like the page marker blocks the marker file.
    fn check_page_slot(&self, dir: EntryId) -> DomainResult<()> {
        if self.has_page(dir) {
            return Ok(());
        }
        let marker = &self.conventions().page_marker;
        if self.find_child(dir, marker).is_some() {
            return Err(DomainError::NameTaken {
                parent: self.raw_path(dir).unwrap_or_default(),
                name: marker.clone(),
            });
        }
        Ok(())
    }

    fn attach_page(&mut self, dir: EntryId) -> EntryId {
        let marker = self.conventions().page_marker.clone();
        self.insert_entry(dir, &marker, EntryKind::File)
    }

    fn has_marker(&self, dir: EntryId, marker: &str) -> bool {
        self.children(dir)
            .any(|e| e.is_file() && self.conventions().marker_of(e.name()) == Some(marker))
    }

    fn unique_child_name(&self, parent: EntryId, base: &str) -> String {
        let taken = self.child_names(parent);
        if !taken.contains(&base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| !taken.contains(&candidate.as_str()))
            .unwrap_or_else(|| base.to_string())
    }

    fn parent_label(&self, id: EntryId) -> String {
        self.parent(id)
            .and_then(|p| self.raw_path(p))
            .unwrap_or_default()
    }
}
