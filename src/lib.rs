//! routetree: a virtual route-tree model
//!
//! Directories are URL segments, `page`/`layout` marker files make them
//! routable or layout-bearing, `(group)` directories vanish from the URL and
//! `[param]` directories capture dynamic values. The [`domain`] layer derives
//! route tables, mutates the tree in place and resolves layout chains.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
