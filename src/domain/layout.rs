//! Layout chain resolution for a page

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::arena::RouteTree;
use crate::domain::entities::EntryId;
use crate::domain::path::{self, ROOT_PATH};

/// One layout-bearing directory in a page's chain.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LayoutHit {
    /// Reported path: raw for groups, URL for plain directories
    path: String,
    is_group: bool,
}

impl LayoutHit {
    fn sort_key(&self) -> (bool, usize, bool, &str) {
        (
            self.path != ROOT_PATH,
            path::effective_depth(&self.path),
            !self.is_group,
            self.path.as_str(),
        )
    }
}

impl RouteTree {
    /// Layout directories wrapping `page_path`, outermost first.
    ///
    /// Plain directories count when their URL path equals or prefixes the
    /// page. Route groups count only when the page is reachable through them.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve_layouts(&self, page_path: &str) -> Vec<String> {
        let page = path::normalize(page_path);
        let hits: Vec<LayoutHit> = self
            .directories()
            .into_iter()
            .filter(|d| self.has_layout(d.id))
            .filter_map(|d| {
                let is_group = self.get(d.id)?.segment().is_group();
                let wraps = if is_group {
                    self.reaches_page(d.id, &d.url, &page)
                } else {
                    path::is_prefix_or_equal(&d.url, &page)
                };
                wraps.then(|| LayoutHit {
                    path: if is_group { d.raw } else { d.url },
                    is_group,
                })
            })
            .collect();

        let layouts: Vec<String> = hits
            .iter()
            .sorted_by(|a, b| a.sort_key().cmp(&b.sort_key()))
            .map(|h| h.path.clone())
            .dedup()
            .collect();
        debug!("{} layouts for {}", layouts.len(), page);
        layouts
    }

    /// True when a page-bearing directory with URL `page` lies at or below
    /// `id`, descending only through directories on the page's URL prefix.
    fn reaches_page(&self, id: EntryId, url: &str, page: &str) -> bool {
        if !path::is_prefix_or_equal(url, page) {
            return false;
        }
        if url == page && self.has_page(id) {
            return true;
        }
        self.child_dirs(id).any(|child| {
            let child_url = if child.segment().is_group() {
                url.to_string()
            } else {
                path::join(url, child.name())
            };
            self.reaches_page(child.id(), &child_url, page)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EntryKind;

    fn dir(tree: &mut RouteTree, parent: EntryId, name: &str, files: &[&str]) -> EntryId {
        let id = tree.insert_entry(parent, name, EntryKind::Directory);
        for f in files {
            tree.insert_entry(id, f, EntryKind::File);
        }
        id
    }

    #[test]
    fn test_group_and_plain_layouts_are_ordered() {
        let mut tree = RouteTree::new();
        let root = tree.root();
        tree.insert_entry(root, "layout", EntryKind::File);
        let group = dir(&mut tree, root, "(group)", &["layout"]);
        dir(&mut tree, group, "dashboard", &["layout", "page"]);

        assert_eq!(
            tree.resolve_layouts("/dashboard"),
            vec!["/", "/(group)", "/dashboard"]
        );
    }

    #[test]
    fn test_group_without_reachable_page_is_skipped() {
        let mut tree = RouteTree::new();
        let root = tree.root();
        let group = dir(&mut tree, root, "(auth)", &["layout.tsx"]);
        dir(&mut tree, group, "login", &["page.tsx"]);
        dir(&mut tree, root, "about", &["page.tsx"]);

        assert!(tree.resolve_layouts("/about").is_empty());
        assert_eq!(tree.resolve_layouts("/login"), vec!["/(auth)"]);
    }

    #[test]
    fn test_plain_prefix_is_component_wise() {
        let mut tree = RouteTree::new();
        let root = tree.root();
        dir(&mut tree, root, "dash", &["layout"]);
        let dashboard = dir(&mut tree, root, "dashboard", &["page"]);
        dir(&mut tree, dashboard, "settings", &["page"]);

        assert!(tree.resolve_layouts("/dashboard").is_empty());
        assert!(tree.resolve_layouts("/dashboard/settings/").is_empty());
    }

    #[test]
    fn test_group_sorts_before_plain_at_equal_depth() {
        let mut tree = RouteTree::new();
        let root = tree.root();
        let shop = dir(&mut tree, root, "shop", &["layout"]);
        let group = dir(&mut tree, shop, "(checkout)", &["layout"]);
        dir(&mut tree, group, "cart", &["page"]);

        // both sit at effective depth 1
        assert_eq!(
            tree.resolve_layouts("/shop/cart"),
            vec!["/shop/(checkout)", "/shop"]
        );
    }
}
