//! Manifest discovery
//!
//! Resolution order, first match wins:
//! 1. An explicit override path, when the file exists there
//! 2. A fixed file name in the directory holding the launcher executable

use crate::config::{LauncherSettings, DEFAULT_MANIFEST_NAME};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Raised by the pipeline when no manifest could be found
#[derive(Error, Debug)]
pub enum LocateError {
    #[error("Could not locate configuration file")]
    ManifestNotFound,
}

/// Anything able to hand out the manifest byte stream
///
/// Absence is a normal answer here; the pipeline decides that it is fatal.
pub trait ManifestSource {
    fn open_manifest(&self) -> Option<Box<dyn BufRead>>;
}

impl<F> ManifestSource for F
where
    F: Fn() -> Option<Box<dyn BufRead>>,
{
    fn open_manifest(&self) -> Option<Box<dyn BufRead>> {
        self()
    }
}

/// Filesystem manifest locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLocator {
    override_path: Option<PathBuf>,
    install_dir: Option<PathBuf>,
    file_name: String,
}

impl Default for ManifestLocator {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST_NAME)
    }
}

impl ManifestLocator {
    /// Locator looking for `file_name` beside the running executable
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            override_path: None,
            install_dir: current_install_dir(),
            file_name: file_name.into(),
        }
    }

    /// Locator configured from launcher settings
    pub fn from_settings(settings: &LauncherSettings) -> Self {
        let locator = Self::new(settings.manifest_name.clone());
        match &settings.manifest_override {
            Some(path) => locator.with_override(path),
            None => locator,
        }
    }

    /// Try this path before the sibling file
    pub fn with_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    /// Replace the directory searched for the sibling file
    ///
    /// `None` models a launcher whose own location is unknown.
    pub fn with_install_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.install_dir = dir;
        self
    }

    /// Path of the manifest that would be used, if any
    pub fn locate_file(&self) -> Option<PathBuf> {
        self.override_file().or_else(|| self.sibling_file())
    }

    fn override_file(&self) -> Option<PathBuf> {
        let path = self.override_path.as_ref()?;
        if path.is_file() {
            tracing::debug!(path = %path.display(), "Using manifest override");
            Some(path.clone())
        } else {
            tracing::debug!(path = %path.display(), "Manifest override does not exist");
            None
        }
    }

    fn sibling_file(&self) -> Option<PathBuf> {
        let dir = self.install_dir.as_ref()?;
        let path = dir.join(&self.file_name);
        path.is_file().then_some(path)
    }
}

impl ManifestSource for ManifestLocator {
    fn open_manifest(&self) -> Option<Box<dyn BufRead>> {
        let path = self.locate_file()?;
        match File::open(&path) {
            Ok(file) => Some(Box::new(BufReader::new(file))),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Manifest could not be opened");
                None
            }
        }
    }
}

fn current_install_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent().map(Path::to_path_buf)
}
