//! Staged bootstrap pipeline
//!
//! Runs the launch stages strictly in order:
//!
//! ```text
//! locate manifest -> parse manifest -> validate class path
//!     -> build context + resolve entry -> invoke
//! ```
//!
//! The first failing stage stops the run. Its error is tagged with the stage
//! and handed, unmodified, to the [`FailureReporter`] exactly once. A run that
//! reports nothing succeeded.

use crate::classpath::{validate_class_path, ArtifactChecker};
use crate::context::ContextBuilder;
use crate::entry::{Completion, EntryPointInvoker};
use crate::error::BootError;
use crate::manifest::{BootConfig, LocateError, ManifestParser, ManifestSource};
use crate::reporter::FailureReporter;
use std::fmt;
use std::io::BufRead;

/// Pipeline stage, used to label failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LocateManifest,
    ParseManifest,
    ValidateClassPath,
    ResolveEntry,
    Invoke,
}

impl Stage {
    /// Human readable label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Stage::LocateManifest => "Locate config file",
            Stage::ParseManifest => "Read config file",
            Stage::ValidateClassPath => "Check class path files",
            Stage::ResolveEntry | Stage::Invoke => "Start entry point",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A stage together with the error that stopped the pipeline there
#[derive(Debug)]
pub struct PipelineFailure {
    pub stage: Stage,
    pub error: BootError,
}

impl PipelineFailure {
    pub fn new(stage: Stage, error: impl Into<BootError>) -> Self {
        Self {
            stage,
            error: error.into(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.stage.label()
    }
}

impl fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.stage.label(), self.error)
    }
}

/// Orchestrates one launch
pub struct BootPipeline<'a> {
    source: &'a dyn ManifestSource,
    checker: &'a dyn ArtifactChecker,
    reporter: &'a dyn FailureReporter,
    builder: ContextBuilder,
    invoker: EntryPointInvoker,
}

impl<'a> BootPipeline<'a> {
    pub fn new(
        source: &'a dyn ManifestSource,
        checker: &'a dyn ArtifactChecker,
        reporter: &'a dyn FailureReporter,
    ) -> Self {
        Self {
            source,
            checker,
            reporter,
            builder: ContextBuilder::default(),
            invoker: EntryPointInvoker::new(),
        }
    }

    /// Use a custom context builder (registered modules, host scope, boundary)
    pub fn with_context_builder(mut self, builder: ContextBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Run every stage, forwarding `args` to the entry point
    ///
    /// Returns how the entry point finished, or `None` once a failure has
    /// been handed to the reporter.
    pub fn start(&self, args: &[String]) -> Option<Completion> {
        match self.run(args) {
            Ok(completion) => Some(completion),
            Err(failure) => {
                tracing::error!(stage = failure.label(), error = %failure.error, "Boot failed");
                self.reporter.report_failure(failure);
                None
            }
        }
    }

    fn run(&self, args: &[String]) -> Result<Completion, PipelineFailure> {
        let stream = self.locate().map_err(|e| PipelineFailure::new(Stage::LocateManifest, e))?;
        let config = self
            .parse(stream)
            .map_err(|e| PipelineFailure::new(Stage::ParseManifest, e))?;
        self.validate(&config)
            .map_err(|e| PipelineFailure::new(Stage::ValidateClassPath, e))?;
        self.launch(&config, args)
    }

    fn locate(&self) -> Result<Box<dyn BufRead>, LocateError> {
        tracing::debug!(stage = Stage::LocateManifest.label(), "Stage started");
        self.source.open_manifest().ok_or(LocateError::ManifestNotFound)
    }

    fn parse(&self, stream: Box<dyn BufRead>) -> Result<BootConfig, BootError> {
        tracing::debug!(stage = Stage::ParseManifest.label(), "Stage started");
        Ok(ManifestParser::new().parse(stream)?)
    }

    fn validate(&self, config: &BootConfig) -> Result<(), BootError> {
        tracing::debug!(stage = Stage::ValidateClassPath.label(), "Stage started");
        Ok(validate_class_path(config.class_path(), self.checker)?)
    }

    fn launch(&self, config: &BootConfig, args: &[String]) -> Result<Completion, PipelineFailure> {
        tracing::debug!(stage = Stage::ResolveEntry.label(), "Stage started");
        let context = self.builder.build(config.class_path());
        let callable = self
            .invoker
            .resolve(&context, config.entry_point())
            .map_err(|e| PipelineFailure::new(Stage::ResolveEntry, e))?;

        tracing::debug!(stage = Stage::Invoke.label(), entry = callable.name(), "Stage started");
        self.invoker
            .invoke(&callable, args)
            .map_err(|e| PipelineFailure::new(Stage::Invoke, BootError::invoke(e)))
    }
}
