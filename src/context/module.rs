//! In-process modules
//!
//! A module is a named set of exports registered by the host at build time.
//! Class path entries that match a registered module location resolve
//! against its exports instead of the filesystem.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Body of an in-process entry point
pub type EntryFn = Arc<dyn Fn(&[String]) -> anyhow::Result<()> + Send + Sync>;

/// A symbol exported by a module
#[derive(Clone)]
pub enum Export {
    /// Callable without an owning value, taking the argument vector
    Entry(EntryFn),

    /// Only callable on an instance of its owner
    Method(EntryFn),

    /// Free function with some other parameter list
    Function { params: String },
}

impl Export {
    /// Conforming entry point from a closure
    pub fn entry<F>(f: F) -> Self
    where
        F: Fn(&[String]) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Export::Entry(Arc::new(f))
    }

    /// Instance method from a closure
    pub fn method<F>(f: F) -> Self
    where
        F: Fn(&[String]) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Export::Method(Arc::new(f))
    }

    /// Free function taking `params`
    pub fn function(params: impl Into<String>) -> Self {
        Export::Function {
            params: params.into(),
        }
    }

    /// Human readable shape, used in mismatch reports
    pub fn shape(&self) -> String {
        match self {
            Export::Entry(_) => "fn(&[String])".to_string(),
            Export::Method(_) => "fn(&self, &[String])".to_string(),
            Export::Function { params } => format!("fn({})", params),
        }
    }
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Export").field(&self.shape()).finish()
    }
}

/// Named exports of one in-process artifact
#[derive(Debug, Clone, Default)]
pub struct Module {
    exports: HashMap<String, Export>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an export, replacing any previous one with the same name
    pub fn with_export(mut self, name: impl Into<String>, export: Export) -> Self {
        self.exports.insert(name.into(), export);
        self
    }

    /// Shorthand for a conforming entry point
    pub fn with_entry<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[String]) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.with_export(name, Export::entry(f))
    }

    pub fn get(&self, name: &str) -> Option<&Export> {
        self.exports.get(name)
    }

    pub fn len(&self) -> usize {
        self.exports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }
}

/// Modules known to the host, keyed by the class path location they answer for
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: HashMap<PathBuf, Module>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `module` for class path entries equal to `location`
    pub fn register(&mut self, location: impl Into<PathBuf>, module: Module) {
        self.modules.insert(location.into(), module);
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_module(mut self, location: impl Into<PathBuf>, module: Module) -> Self {
        self.register(location, module);
        self
    }

    pub fn get(&self, location: &Path) -> Option<&Module> {
        self.modules.get(location)
    }
}
