use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::RouteTree;
use crate::domain::entities::{EntryId, RouteNode, RouteTable};

/// Render a structure as a `termtree` for terminal output.
pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeDisplay for RouteTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build(tree: &RouteTree, id: EntryId) -> Option<Tree<String>> {
            let entry = tree.get(id)?;
            let mut label = entry.name().to_string();
            if entry.is_dir() {
                label.push('/');
                let mut tags = Vec::new();
                if entry.segment().is_group() {
                    tags.push("group");
                } else if entry.segment().is_dynamic() {
                    tags.push("dynamic");
                }
                if tree.has_page(id) {
                    tags.push("page");
                }
                if tree.has_layout(id) {
                    tags.push("layout");
                }
                if !tags.is_empty() {
                    label = format!("{} [{}]", label, tags.join(", "));
                }
            }
            let leaves: Vec<_> = entry
                .children()
                .iter()
                .filter_map(|&c| build(tree, c))
                .collect();
            Some(Tree::new(label).with_leaves(leaves))
        }

        build(self, self.root()).unwrap_or_else(|| Tree::new("Empty tree".to_string()))
    }
}

impl TreeDisplay for RouteNode {
    fn to_tree_string(&self) -> Tree<String> {
        let label = if self.params.is_empty() {
            self.path.clone()
        } else {
            format!("{} ({})", self.path, self.params.join(", "))
        };
        Tree::new(label).with_leaves(self.children.iter().map(|c| c.to_tree_string()))
    }
}

impl TreeDisplay for RouteTable {
    /// Top-level routes hang off a synthetic `routes` node.
    fn to_tree_string(&self) -> Tree<String> {
        Tree::new("routes".to_string()).with_leaves(self.nodes().iter().map(|n| n.to_tree_string()))
    }
}
