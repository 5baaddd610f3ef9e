//! Route path utilities
//!
//! Pure string functions over `/`-separated route paths. No tree access.

use std::borrow::Cow;

use itertools::Itertools;

use crate::domain::entities::SegmentKind;

/// Root route path.
pub const ROOT_PATH: &str = "/";

/// Strip a single trailing slash (root stays `/`).
///
/// ```
/// use routetree::domain::path::normalize;
///
/// assert_eq!(normalize("/blog/"), "/blog");
/// assert_eq!(normalize("/"), "/");
/// assert_eq!(normalize("/blog"), "/blog");
/// ```
pub fn normalize(path: &str) -> Cow<'_, str> {
    if path.len() > 1 {
        if let Some(stripped) = path.strip_suffix('/') {
            return Cow::Borrowed(stripped);
        }
    }
    Cow::Borrowed(path)
}

/// Rebuild a validated route path from its trimmed segments.
///
/// ```
/// use routetree::domain::path::canonical;
///
/// assert_eq!(canonical("/ blog/post /"), "/blog/post");
/// assert_eq!(canonical("/"), "/");
/// ```
pub fn canonical(path: &str) -> String {
    format!("/{}", segments(path).iter().map(|s| s.trim()).join("/"))
}

/// Remove every route-group component from a path.
///
/// Empty components collapse; the result always starts with `/` and is `/`
/// when nothing remains.
///
/// ```
/// use routetree::domain::path::strip_groups;
///
/// assert_eq!(strip_groups("/(marketing)/blog"), "/blog");
/// assert_eq!(strip_groups("/(a)/(b)"), "/");
/// assert_eq!(strip_groups("shop//(auth)/login/"), "/shop/login");
/// ```
pub fn strip_groups(path: &str) -> String {
    let kept = path
        .split('/')
        .filter(|c| !c.is_empty() && !SegmentKind::parse(c).is_group())
        .join("/");
    format!("/{}", kept)
}

/// Non-empty components of a path.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|c| !c.is_empty()).collect()
}

/// Append one segment to a base path.
pub fn join(base: &str, segment: &str) -> String {
    if base == ROOT_PATH || base.is_empty() {
        format!("/{}", segment)
    } else {
        format!("{}/{}", base, segment)
    }
}

/// Component-wise prefix test; `/dash` is not a prefix of `/dashboard`.
pub fn is_prefix_or_equal(prefix: &str, path: &str) -> bool {
    let prefix = segments(prefix);
    let path = segments(path);
    prefix.len() <= path.len() && prefix.iter().zip(path.iter()).all(|(a, b)| a == b)
}

/// Like [`is_prefix_or_equal`] but excludes equality.
pub fn is_strict_prefix(prefix: &str, path: &str) -> bool {
    segments(prefix).len() < segments(path).len() && is_prefix_or_equal(prefix, path)
}

/// Number of URL components after stripping route groups (root = 0).
pub fn effective_depth(path: &str) -> usize {
    segments(&strip_groups(path)).len()
}
