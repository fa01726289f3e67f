//! Entry point resolution and invocation
//!
//! An entry point conforms when it can be called without first obtaining an
//! owning value and takes the argument vector as its only parameter. In-process
//! exports must be [`Export::Entry`]; files on disk must be executable.

use crate::context::{EntryFn, ExecutionContext, Export, SymbolKind};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Calling convention every entry point must follow
pub const ENTRY_CONVENTION: &str = "fn(&[String]) callable without an instance";

/// Errors raised while resolving the entry point
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Entry point {0} not found")]
    SymbolNotFound(String),

    #[error("{name} is not a valid entry point: expected {expected}, found {found}")]
    EntryShapeMismatch {
        name: String,
        expected: &'static str,
        found: String,
    },
}

/// A resolved, conforming entry point
#[derive(Clone)]
pub enum Callable {
    /// Export of an in-process module
    InProcess { name: String, entry: EntryFn },

    /// Executable spawned with the argument vector
    Program { name: String, path: PathBuf },
}

impl Callable {
    pub fn name(&self) -> &str {
        match self {
            Callable::InProcess { name, .. } | Callable::Program { name, .. } => name,
        }
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::InProcess { name, .. } => {
                f.debug_struct("InProcess").field("name", name).finish()
            }
            Callable::Program { name, path } => f
                .debug_struct("Program")
                .field("name", name)
                .field("path", path)
                .finish(),
        }
    }
}

/// How an entry point finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// In-process entry returned normally
    Returned,

    /// Spawned program exited; its status becomes the launcher's
    Exited(ExitStatus),
}

impl Completion {
    /// Exit code the launcher should leave with, if the entry decided one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Completion::Returned => None,
            Completion::Exited(status) => Some(status.code().unwrap_or(1)),
        }
    }
}

/// Resolves entry points inside a context and calls them
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryPointInvoker;

impl EntryPointInvoker {
    pub fn new() -> Self {
        Self
    }

    /// Find `name` in `context` and check it follows the entry convention
    pub fn resolve(
        &self,
        context: &ExecutionContext,
        name: &str,
    ) -> Result<Callable, ResolveError> {
        let symbol = context
            .lookup(name)
            .ok_or_else(|| ResolveError::SymbolNotFound(name.to_string()))?;
        tracing::debug!(entry = name, origin = %symbol.origin.display(), "Entry point found");

        let mismatch = |found: String| ResolveError::EntryShapeMismatch {
            name: name.to_string(),
            expected: ENTRY_CONVENTION,
            found,
        };

        match symbol.kind {
            SymbolKind::Export(Export::Entry(entry)) => Ok(Callable::InProcess {
                name: symbol.name,
                entry,
            }),
            SymbolKind::Export(export) => Err(mismatch(export.shape())),
            SymbolKind::Program {
                path,
                executable: true,
            } => Ok(Callable::Program {
                name: symbol.name,
                path: explicit_path(path),
            }),
            SymbolKind::Program { path, .. } => {
                Err(mismatch(format!("non-executable file {}", path.display())))
            }
        }
    }

    /// Call the entry point synchronously with `args`
    ///
    /// Whatever the entry raises is returned as is.
    pub fn invoke(&self, callable: &Callable, args: &[String]) -> anyhow::Result<Completion> {
        tracing::debug!(entry = callable.name(), args = args.len(), "Invoking entry point");
        match callable {
            Callable::InProcess { entry, .. } => {
                entry(args)?;
                Ok(Completion::Returned)
            }
            Callable::Program { path, .. } => {
                let status = Command::new(path).args(args).status()?;
                tracing::debug!(%status, "Entry point program finished");
                Ok(Completion::Exited(status))
            }
        }
    }
}

/// Anchor a bare file name to the working directory so spawning never searches `PATH`
fn explicit_path(path: PathBuf) -> PathBuf {
    if path.is_relative() && path.components().count() == 1 {
        Path::new(".").join(path)
    } else {
        path
    }
}
