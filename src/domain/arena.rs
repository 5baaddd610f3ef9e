use generational_arena::Arena;
use tracing::instrument;

use crate::domain::entities::{Conventions, EntryId, EntryKind, EntrySnapshot, SegmentKind};

/// Node of the virtual route tree: a directory or a file.
#[derive(Debug, Clone)]
pub struct Entry {
    id: EntryId,
    name: String,
    kind: EntryKind,
    segment: SegmentKind,
    /// Presentation only, never read by routing
    expanded: bool,
    parent: Option<EntryId>,
    children: Vec<EntryId>,
}

impl Entry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn segment(&self) -> SegmentKind {
        self.segment
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn parent(&self) -> Option<EntryId> {
        self.parent
    }

    /// Child ids in insertion (display) order.
    pub fn children(&self) -> &[EntryId] {
        &self.children
    }
}

/// Arena-backed route tree.
///
/// Entries live in a generational arena and reference each other by
/// [`EntryId`]; mutation happens in place. The root directory is created with
/// the tree and lives as long as it does.
#[derive(Debug, Clone)]
pub struct RouteTree {
    arena: Arena<Entry>,
    root: EntryId,
    conventions: Conventions,
}

impl Default for RouteTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for RouteTree {
    /// Structural equality: names, kinds and child order. Ids are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.conventions == other.conventions && self.snapshot() == other.snapshot()
    }
}

impl RouteTree {
    pub fn new() -> Self {
        Self::with_conventions(Conventions::default())
    }

    pub fn with_conventions(conventions: Conventions) -> Self {
        let mut arena = Arena::new();
        let root_name = conventions.root_name.clone();
        let root = arena.insert_with(|idx| Entry {
            id: EntryId(idx),
            segment: SegmentKind::Plain,
            name: root_name,
            kind: EntryKind::Directory,
            expanded: true,
            parent: None,
            children: Vec::new(),
        });
        Self {
            arena,
            root: EntryId(root),
            conventions,
        }
    }

    pub fn root(&self) -> EntryId {
        self.root
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.arena.get(id.0)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.arena.contains(id.0)
    }

    /// Number of entries, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// A tree always holds its root, so this is never true.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn parent(&self, id: EntryId) -> Option<EntryId> {
        self.get(id).and_then(|e| e.parent)
    }

    /// Resolved children of `id`, in display order.
    pub fn children(&self, id: EntryId) -> impl Iterator<Item = &Entry> + '_ {
        self.get(id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&c| self.get(c))
    }

    /// Child directories of `id`, in display order.
    pub fn child_dirs(&self, id: EntryId) -> impl Iterator<Item = &Entry> + '_ {
        self.children(id).filter(|e| e.is_dir())
    }

    pub fn has_page(&self, id: EntryId) -> bool {
        self.children(id)
            .any(|e| e.is_file() && self.conventions.is_page_marker(&e.name))
    }

    pub fn has_layout(&self, id: EntryId) -> bool {
        self.children(id)
            .any(|e| e.is_file() && self.conventions.is_layout_marker(&e.name))
    }

    /// True when any file lives at or below `id`.
    #[instrument(level = "trace", skip(self))]
    pub fn subtree_has_file(&self, id: EntryId) -> bool {
        match self.get(id) {
            Some(e) if e.is_file() => true,
            Some(e) => e.children.iter().any(|&c| self.subtree_has_file(c)),
            None => false,
        }
    }

    pub fn set_expanded(&mut self, id: EntryId, expanded: bool) -> bool {
        match self.arena.get_mut(id.0) {
            Some(e) => {
                e.expanded = expanded;
                true
            }
            None => false,
        }
    }

    /// Attach a new entry below `parent` without any checks; callers validate.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn insert_entry(&mut self, parent: EntryId, name: &str, kind: EntryKind) -> EntryId {
        let idx = self.arena.insert_with(|idx| Entry {
            id: EntryId(idx),
            name: name.to_string(),
            kind,
            segment: SegmentKind::parse(name),
            expanded: false,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent) = self.arena.get_mut(parent.0) {
            parent.children.push(EntryId(idx));
        }
        EntryId(idx)
    }

    /// Rename in place, re-parsing the segment kind. Id is preserved.
    pub(crate) fn set_name(&mut self, id: EntryId, name: &str) -> Option<String> {
        let entry = self.arena.get_mut(id.0)?;
        entry.segment = SegmentKind::parse(name);
        Some(std::mem::replace(&mut entry.name, name.to_string()))
    }

    /// Detach `id` from its parent and free it with all descendants.
    /// Returns the number of freed entries.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn remove_subtree(&mut self, id: EntryId) -> usize {
        if let Some(parent) = self.parent(id) {
            if let Some(p) = self.arena.get_mut(parent.0) {
                p.children.retain(|&c| c != id);
            }
        }
        let doomed: Vec<EntryId> = self.iter_from(id).map(|e| e.id).collect();
        for d in &doomed {
            self.arena.remove(d.0);
        }
        doomed.len()
    }

    /// Pre-order traversal from the root.
    pub fn iter(&self) -> TreeIterator<'_> {
        self.iter_from(self.root)
    }

    /// Pre-order traversal of the subtree at `start`.
    pub fn iter_from(&self, start: EntryId) -> TreeIterator<'_> {
        TreeIterator::new(self, start)
    }

    pub fn snapshot(&self) -> EntrySnapshot {
        self.snapshot_of(self.root)
            .unwrap_or_else(|| EntrySnapshot {
                name: self.conventions.root_name.clone(),
                kind: EntryKind::Directory,
                children: Vec::new(),
            })
    }

    pub fn snapshot_of(&self, id: EntryId) -> Option<EntrySnapshot> {
        let entry = self.get(id)?;
        Some(EntrySnapshot {
            name: entry.name.clone(),
            kind: entry.kind,
            children: entry
                .children
                .iter()
                .filter_map(|&c| self.snapshot_of(c))
                .collect(),
        })
    }
}

pub struct TreeIterator<'a> {
    tree: &'a RouteTree,
    stack: Vec<EntryId>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a RouteTree, start: EntryId) -> Self {
        Self {
            tree,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(entry) = self.tree.get(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in entry.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some(entry);
            }
        }
        None
    }
}
