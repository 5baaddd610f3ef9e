//! Error conversion helpers for directory traversal

use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `walkdir::Result` to `ApplicationResult` with context.
pub trait WalkResultExt<T> {
    /// Add path context to a traversal error.
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> WalkResultExt<T> for walkdir::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}
