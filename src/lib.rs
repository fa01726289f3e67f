//! bootstrap - Staged application launcher
//!
//! Locates a boot manifest, parses it into a validated configuration, checks
//! that every class path artifact exists, mounts those artifacts into an
//! isolated execution context and starts the named entry point with the
//! process arguments.
//!
//! # Architecture
//!
//! - **manifest**: Manifest discovery and parsing (`BootConfig`)
//! - **classpath**: Existence checks for class path artifacts
//! - **context**: Execution contexts, in-process modules and host visibility
//! - **entry**: Entry point resolution and invocation
//! - **pipeline**: The staged orchestrator tying the above together
//! - **reporter**: Where failures go (console, memory)
//! - **config**: Environment-driven launcher settings
//!
//! # Example
//!
//! ```no_run
//! use bootstrap::{BootPipeline, ConsoleReporter, FileChecker, LauncherSettings, ManifestLocator};
//!
//! let settings = LauncherSettings::from_env();
//! let locator = ManifestLocator::from_settings(&settings);
//! let reporter = ConsoleReporter::stderr().with_trace(settings.show_trace);
//! let args: Vec<String> = std::env::args().skip(1).collect();
//!
//! BootPipeline::new(&locator, &FileChecker, &reporter).start(&args);
//! ```

pub mod classpath;
pub mod config;
pub mod context;
pub mod entry;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod pipeline;
pub mod reporter;

// Re-exports
pub use classpath::{validate_class_path, ArtifactChecker, FileChecker, ValidateError};
pub use config::LauncherSettings;
pub use context::{
    ContextBuilder, ExecutionContext, Export, HostScope, Layer, Module, ModuleRegistry,
    VisibilityBoundary,
};
pub use entry::{Callable, Completion, EntryPointInvoker, ResolveError};
pub use error::{BootError, Result};
pub use manifest::{
    BootConfig, LocateError, ManifestLocator, ManifestParser, ManifestSource, ParseError,
};
pub use pipeline::{BootPipeline, PipelineFailure, Stage};
pub use reporter::{ConsoleReporter, FailureReporter, MemoryReporter};
