//! Isolated execution contexts
//!
//! An [`ExecutionContext`] is the searchable set of artifacts named by the
//! class path, in class path order, plus whatever part of the host it is
//! allowed to see. The host exposes its own exports through a [`HostScope`];
//! a [`VisibilityBoundary`] decides which layers of that scope leak into the
//! context. By default only the foundation layer is shared, so loaded code can
//! never bind to the launcher's application-level symbols.

mod artifact;
mod module;

pub use artifact::{Artifact, Symbol, SymbolKind};
pub use module::{EntryFn, Export, Module, ModuleRegistry};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Layer a host export belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Shared runtime pieces every context may bind to
    Foundation,
    /// The launcher's own application code
    Application,
}

/// Exports the host makes available to contexts, tagged by layer
#[derive(Debug, Clone, Default)]
pub struct HostScope {
    exports: HashMap<String, (Layer, Export)>,
}

impl HostScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_export(mut self, layer: Layer, name: impl Into<String>, export: Export) -> Self {
        self.exports.insert(name.into(), (layer, export));
        self
    }

    fn visible_through(&self, boundary: &VisibilityBoundary) -> HashMap<String, Export> {
        self.exports
            .iter()
            .filter(|(_, (layer, _))| boundary.permits(*layer))
            .map(|(name, (_, export))| (name.clone(), export.clone()))
            .collect()
    }
}

/// Allow-list of host layers a context may fall back to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityBoundary {
    visible: Vec<Layer>,
}

impl Default for VisibilityBoundary {
    fn default() -> Self {
        Self {
            visible: vec![Layer::Foundation],
        }
    }
}

impl VisibilityBoundary {
    /// Boundary that hides the whole host
    pub fn sealed() -> Self {
        Self {
            visible: Vec::new(),
        }
    }

    pub fn allow(mut self, layer: Layer) -> Self {
        if !self.visible.contains(&layer) {
            self.visible.push(layer);
        }
        self
    }

    pub fn permits(&self, layer: Layer) -> bool {
        self.visible.contains(&layer)
    }
}

/// Builds execution contexts from validated class paths
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    registry: ModuleRegistry,
    host: HostScope,
    boundary: VisibilityBoundary,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(mut self, registry: ModuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_host_scope(mut self, host: HostScope) -> Self {
        self.host = host;
        self
    }

    pub fn with_boundary(mut self, boundary: VisibilityBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Mount `class_path` in order behind the configured boundary
    pub fn build(&self, class_path: &[PathBuf]) -> ExecutionContext {
        let artifacts: Vec<Artifact> = class_path
            .iter()
            .map(|location| Artifact::mount(location, self.registry.get(location)))
            .collect();
        let parent = self.host.visible_through(&self.boundary);

        tracing::debug!(
            artifacts = artifacts.len(),
            host_exports = parent.len(),
            "Execution context built"
        );
        ExecutionContext { artifacts, parent }
    }
}

/// Searchable artifact set with a restricted view of the host
#[derive(Debug)]
pub struct ExecutionContext {
    artifacts: Vec<Artifact>,
    parent: HashMap<String, Export>,
}

impl ExecutionContext {
    /// Mounted artifacts in search order
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Resolve `name`, consulting visible host exports first, then artifacts in order
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        if let Some(export) = self.parent.get(name) {
            return Some(Symbol {
                name: name.to_string(),
                origin: Path::new("<host>").to_path_buf(),
                kind: SymbolKind::Export(export.clone()),
            });
        }
        self.artifacts.iter().find_map(|artifact| artifact.lookup(name))
    }
}
