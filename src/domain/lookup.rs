//! Lookups from route paths to tree entries

use tracing::instrument;

use crate::domain::arena::RouteTree;
use crate::domain::entities::EntryId;
use crate::domain::path::{self, ROOT_PATH};

/// A directory together with its accumulated paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPath {
    pub id: EntryId,
    /// Path including route-group segments, e.g. "/(shop)/cart"
    pub raw: String,
    /// URL path with groups stripped, e.g. "/cart"
    pub url: String,
}

impl RouteTree {
    /// Accumulated path of an entry including group segments; root is `/`.
    pub fn raw_path(&self, id: EntryId) -> Option<String> {
        let mut names = Vec::new();
        let mut current = self.get(id)?;
        while let Some(parent) = current.parent() {
            names.push(current.name());
            current = self.get(parent)?;
        }
        names.reverse();
        Some(format!("/{}", names.join("/")))
    }

    /// URL-visible path of an entry (route groups stripped).
    pub fn url_path(&self, id: EntryId) -> Option<String> {
        self.raw_path(id).map(|raw| path::strip_groups(&raw))
    }

    /// Every directory in pre-order with its raw and URL paths.
    pub fn directories(&self) -> Vec<DirectoryPath> {
        let mut out = Vec::new();
        self.collect_directories(self.root(), ROOT_PATH.to_string(), &mut out);
        out
    }

    fn collect_directories(&self, id: EntryId, raw: String, out: &mut Vec<DirectoryPath>) {
        out.push(DirectoryPath {
            id,
            url: path::strip_groups(&raw),
            raw: raw.clone(),
        });
        for child in self.child_dirs(id) {
            self.collect_directories(child.id(), path::join(&raw, child.name()), out);
        }
    }

    /// First directory (pre-order) whose URL path equals `route_path`.
    #[instrument(level = "trace", skip(self))]
    pub fn find_directory(&self, route_path: &str) -> Option<EntryId> {
        let target = path::normalize(route_path);
        self.directories()
            .into_iter()
            .find(|d| d.url == target)
            .map(|d| d.id)
    }

    /// Directory implementing the route at `route_path`.
    ///
    /// Several directories can share a URL path (`/blog` and `/(news)/blog`);
    /// the first one carrying a page marker wins, otherwise the first match.
    #[instrument(level = "trace", skip(self))]
    pub fn find_route_directory(&self, route_path: &str) -> Option<EntryId> {
        let target = path::normalize(route_path);
        let matches: Vec<EntryId> = self
            .directories()
            .into_iter()
            .filter(|d| d.url == target)
            .map(|d| d.id)
            .collect();
        matches
            .iter()
            .copied()
            .find(|&id| self.has_page(id))
            .or_else(|| matches.first().copied())
    }

    /// Child of `parent` with exactly this name.
    pub fn find_child(&self, parent: EntryId, name: &str) -> Option<EntryId> {
        self.children(parent)
            .find(|e| e.name() == name)
            .map(|e| e.id())
    }

    /// Names of all children of `parent`.
    pub fn child_names(&self, parent: EntryId) -> Vec<&str> {
        self.children(parent).map(|e| e.name()).collect()
    }

    /// Names of the other entries sharing `id`'s parent, for uniqueness checks.
    pub fn sibling_names(&self, id: EntryId) -> Vec<&str> {
        match self.parent(id) {
            Some(parent) => self
                .children(parent)
                .filter(|e| e.id() != id)
                .map(|e| e.name())
                .collect(),
            None => Vec::new(),
        }
    }
}
