//! Route table synthesis from the live tree

use tracing::{debug, instrument};

use crate::domain::arena::RouteTree;
use crate::domain::entities::{EntryId, RouteNode, RouteTable};
use crate::domain::path::{self, ROOT_PATH};

impl RouteTree {
    /// Derive the hierarchical route table.
    ///
    /// Every page-bearing directory becomes a [`RouteNode`] at its URL path.
    /// Routes found below it nest as its children; directories without a page
    /// (route groups included) are transparent and hand their descendants'
    /// routes up to the enclosing level.
    #[instrument(level = "debug", skip(self))]
    pub fn synthesize_routes(&self) -> RouteTable {
        let nodes = self.visit(self.root(), ROOT_PATH, &[]);
        debug!("synthesized {} top-level routes", nodes.len());
        RouteTable::new(nodes)
    }

    fn visit(&self, id: EntryId, url: &str, params: &[String]) -> Vec<RouteNode> {
        let mut children = Vec::new();
        for child in self.child_dirs(id) {
            let segment = child.segment();
            let child_url = if segment.is_group() {
                url.to_string()
            } else {
                path::join(url, child.name())
            };
            let mut child_params = params.to_vec();
            if let Some(param) = segment.param_name(child.name()) {
                child_params.push(param.to_string());
            }
            children.extend(self.visit(child.id(), &child_url, &child_params));
        }

        if self.has_page(id) {
            vec![RouteNode {
                path: url.to_string(),
                directory: id,
                params: params.to_vec(),
                children,
            }]
        } else {
            children
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EntryKind;

    fn dir(tree: &mut RouteTree, parent: EntryId, name: &str, page: bool) -> EntryId {
        let id = tree.insert_entry(parent, name, EntryKind::Directory);
        if page {
            tree.insert_entry(id, "page", EntryKind::File);
        }
        id
    }

    #[test]
    fn test_empty_tree_has_no_routes() {
        let tree = RouteTree::new();
        assert!(tree.synthesize_routes().is_empty());
    }

    #[test]
    fn test_root_page_wraps_everything() {
        let mut tree = RouteTree::new();
        let root = tree.root();
        tree.insert_entry(root, "page", EntryKind::File);
        dir(&mut tree, root, "about", true);

        let table = tree.synthesize_routes();
        assert_eq!(table.nodes().len(), 1);
        assert_eq!(table.nodes()[0].path, "/");
        assert_eq!(table.nodes()[0].children[0].path, "/about");
    }

    #[test]
    fn test_pageless_directory_lifts_descendants() {
        let mut tree = RouteTree::new();
        let root = tree.root();
        let docs = dir(&mut tree, root, "docs", false);
        dir(&mut tree, docs, "intro", true);
        let api = dir(&mut tree, docs, "api", true);
        dir(&mut tree, api, "v1", true);

        let table = tree.synthesize_routes();
        assert_eq!(table.paths(), vec!["/docs/intro", "/docs/api", "/docs/api/v1"]);
        assert_eq!(table.nodes().len(), 2);
        assert_eq!(table.nodes()[1].children[0].path, "/docs/api/v1");
    }

    #[test]
    fn test_dynamic_params_accumulate() {
        let mut tree = RouteTree::new();
        let root = tree.root();
        let users = dir(&mut tree, root, "users", false);
        let id = dir(&mut tree, users, "[id]", true);
        dir(&mut tree, id, "[...rest]", true);

        let table = tree.synthesize_routes();
        let user = &table.nodes()[0];
        assert_eq!(user.path, "/users/[id]");
        assert_eq!(user.params, vec!["id"]);
        assert_eq!(user.directory, id);
        assert_eq!(user.children[0].params, vec!["id", "rest"]);
    }

    #[test]
    fn test_inert_files_do_not_make_routes() {
        let mut tree = RouteTree::new();
        let root = tree.root();
        let lib = dir(&mut tree, root, "lib", false);
        tree.insert_entry(lib, "utils.ts", EntryKind::File);
        tree.insert_entry(lib, "layout", EntryKind::File);
        assert!(tree.synthesize_routes().is_empty());
    }
}
