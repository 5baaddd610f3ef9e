//! Domain entities: core data structures

use std::fmt;
use std::path::Path;

use generational_arena::Index;
use serde::{Deserialize, Serialize};

/// Stable identifier of an entry in a [`RouteTree`](crate::domain::RouteTree).
///
/// Never reused: removing an entry bumps the arena generation of its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub(crate) Index);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "{}v{}", slot, generation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Directory,
    File,
}

/// Routing meaning of an entry name, parsed once when the name is set.
///
/// ```
/// use routetree::domain::SegmentKind;
///
/// assert_eq!(SegmentKind::parse("blog"), SegmentKind::Plain);
/// assert_eq!(SegmentKind::parse("(marketing)"), SegmentKind::Group);
/// assert_eq!(SegmentKind::parse("[id]"), SegmentKind::Dynamic);
/// assert_eq!(SegmentKind::parse("[...slug]"), SegmentKind::CatchAll);
/// assert_eq!(SegmentKind::parse("[[...slug]]"), SegmentKind::OptionalCatchAll);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Static text segment
    Plain,
    /// Route group `(name)`: no URL segment
    Group,
    /// Dynamic parameter `[name]`
    Dynamic,
    /// Catch-all `[...name]`
    CatchAll,
    /// Optional catch-all `[[...name]]`
    OptionalCatchAll,
}

impl SegmentKind {
    pub fn parse(name: &str) -> Self {
        if name.len() > 4 && name.starts_with("[[") && name.ends_with("]]") {
            if name[2..name.len() - 2].starts_with("...") {
                return SegmentKind::OptionalCatchAll;
            }
        }
        if name.len() > 2 && name.starts_with('[') && name.ends_with(']') {
            return if name[1..name.len() - 1].starts_with("...") {
                SegmentKind::CatchAll
            } else {
                SegmentKind::Dynamic
            };
        }
        if name.len() > 2 && name.starts_with('(') && name.ends_with(')') {
            return SegmentKind::Group;
        }
        SegmentKind::Plain
    }

    pub fn is_group(self) -> bool {
        self == SegmentKind::Group
    }

    pub fn is_dynamic(self) -> bool {
        matches!(
            self,
            SegmentKind::Dynamic | SegmentKind::CatchAll | SegmentKind::OptionalCatchAll
        )
    }

    /// Parameter name carried by a dynamic segment (`[...slug]` → `slug`).
    pub fn param_name(self, name: &str) -> Option<&str> {
        let inner = match self {
            SegmentKind::Dynamic => name.strip_prefix('[')?.strip_suffix(']')?,
            SegmentKind::CatchAll => name.strip_prefix("[...")?.strip_suffix(']')?,
            SegmentKind::OptionalCatchAll => name.strip_prefix("[[...")?.strip_suffix("]]")?,
            SegmentKind::Plain | SegmentKind::Group => return None,
        };
        Some(inner)
    }
}

/// Reserved names that give a tree its routing meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conventions {
    /// Name of the fixed root directory
    pub root_name: String,
    /// File name that makes a directory routable
    pub page_marker: String,
    /// File name that makes a directory layout-bearing
    pub layout_marker: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            root_name: "app".into(),
            page_marker: "page".into(),
            layout_marker: "layout".into(),
        }
    }
}

impl Conventions {
    /// `page` and `page.tsx` both mark a page.
    pub fn is_page_marker(&self, file_name: &str) -> bool {
        marker_matches(file_name, &self.page_marker)
    }

    pub fn is_layout_marker(&self, file_name: &str) -> bool {
        marker_matches(file_name, &self.layout_marker)
    }

    /// Which marker, if any, a file name stands for.
    pub fn marker_of(&self, file_name: &str) -> Option<&str> {
        if self.is_page_marker(file_name) {
            Some(self.page_marker.as_str())
        } else if self.is_layout_marker(file_name) {
            Some(self.layout_marker.as_str())
        } else {
            None
        }
    }
}

fn marker_matches(file_name: &str, marker: &str) -> bool {
    file_name == marker
        || Path::new(file_name)
            .file_stem()
            .map(|stem| stem == marker)
            .unwrap_or(false)
}

/// One routable directory in a [`RouteTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteNode {
    /// URL path with route groups stripped, e.g. "/blog/[slug]"
    pub path: String,
    /// Page-bearing directory this route was synthesized from
    #[serde(skip)]
    pub directory: EntryId,
    /// Dynamic parameter names along the path
    pub params: Vec<String>,
    /// Routes of page-bearing descendants
    pub children: Vec<RouteNode>,
}

/// Hierarchical route table: an ordered forest of [`RouteNode`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    nodes: Vec<RouteNode>,
}

impl RouteTable {
    pub fn new(nodes: Vec<RouteNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[RouteNode] {
        &self.nodes
    }

    /// All route paths in pre-order.
    pub fn paths(&self) -> Vec<&str> {
        fn collect<'a>(nodes: &'a [RouteNode], out: &mut Vec<&'a str>) {
            for node in nodes {
                out.push(&node.path);
                collect(&node.children, out);
            }
        }
        let mut out = Vec::new();
        collect(&self.nodes, &mut out);
        out
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths().contains(&path)
    }

    /// Total number of routes, nested ones included.
    pub fn len(&self) -> usize {
        self.paths().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Outcome of `create_route`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRoute {
    /// Directory now carrying the page marker
    pub directory: EntryId,
    /// Every entry created by the call, outermost first (empty for a no-op)
    pub created: Vec<EntryId>,
}

impl CreatedRoute {
    pub fn is_noop(&self) -> bool {
        self.created.is_empty()
    }
}

/// Outcome of `add_segment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSegment {
    pub id: EntryId,
    /// Final name after de-duplication, for inline rename
    pub name: String,
}

/// Id-free structural copy of a subtree, used for equality and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySnapshot {
    pub name: String,
    pub kind: EntryKind,
    pub children: Vec<EntrySnapshot>,
}
