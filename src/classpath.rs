//! Class path validation
//!
//! Confirms every artifact named in the manifest exists before anything is
//! loaded. The check itself is a collaborator so callers can substitute it.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Raised for the first class path entry that does not exist
#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("File {} not found", .0.display())]
    ArtifactNotFound(PathBuf),
}

/// Existence check for class path artifacts
pub trait ArtifactChecker {
    fn exists(&self, path: &Path) -> bool;
}

/// Checks artifacts against the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileChecker;

impl ArtifactChecker for FileChecker {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Check `class_path` in declared order, stopping at the first missing entry
///
/// Entries after the first missing one are never checked.
pub fn validate_class_path(
    class_path: &[PathBuf],
    checker: &dyn ArtifactChecker,
) -> Result<(), ValidateError> {
    for path in class_path {
        if !checker.exists(path) {
            tracing::debug!(path = %path.display(), "Class path entry missing");
            return Err(ValidateError::ArtifactNotFound(path.clone()));
        }
    }
    Ok(())
}
