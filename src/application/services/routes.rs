//! Route service
//!
//! Loads the app directory of a project and runs domain operations against
//! it. Mutations are previews: they act on the in-memory tree only and never
//! touch the disk.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{CreatedRoute, CreatedSegment, RouteTable, RouteTree};

use super::scanner::TreeScanner;

/// Tree after a previewed mutation, with the operation's outcome.
#[derive(Debug, Clone)]
pub struct Preview<T> {
    pub tree: RouteTree,
    pub outcome: T,
}

pub struct RouteService {
    settings: Settings,
    project_dir: PathBuf,
}

impl RouteService {
    pub fn new(settings: Settings, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            project_dir: project_dir.into(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Explicit directory if given, else the configured app dir of the project.
    pub fn app_dir(&self, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(dir) => dir.to_path_buf(),
            None => self.settings.app_dir_in(&self.project_dir),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn load_tree(&self, explicit: Option<&Path>) -> ApplicationResult<RouteTree> {
        let app_dir = self.app_dir(explicit);
        debug!("loading tree from {}", app_dir.display());
        TreeScanner::from_settings(&self.settings).scan(&app_dir)
    }

    pub fn routes(&self, explicit: Option<&Path>) -> ApplicationResult<RouteTable> {
        Ok(self.load_tree(explicit)?.synthesize_routes())
    }

    pub fn layouts(&self, page_path: &str, explicit: Option<&Path>) -> ApplicationResult<Vec<String>> {
        Ok(self.load_tree(explicit)?.resolve_layouts(page_path))
    }

    pub fn preview_create(
        &self,
        route_path: &str,
        explicit: Option<&Path>,
    ) -> ApplicationResult<Preview<CreatedRoute>> {
        let mut tree = self.load_tree(explicit)?;
        let outcome = tree.create_route(route_path)?;
        Ok(Preview { tree, outcome })
    }

    pub fn preview_delete(
        &self,
        route_path: &str,
        explicit: Option<&Path>,
    ) -> ApplicationResult<Preview<bool>> {
        let mut tree = self.load_tree(explicit)?;
        let outcome = tree.delete_route(route_path);
        Ok(Preview { tree, outcome })
    }

    pub fn preview_segment(
        &self,
        parent_path: &str,
        name: Option<&str>,
        explicit: Option<&Path>,
    ) -> ApplicationResult<Preview<Option<CreatedSegment>>> {
        let mut tree = self.load_tree(explicit)?;
        let outcome = tree.add_segment(parent_path, name)?;
        Ok(Preview { tree, outcome })
    }
}
