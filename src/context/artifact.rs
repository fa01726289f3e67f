//! Artifacts mounted into an execution context

use super::module::{Export, Module};
use std::path::{Component, Path, PathBuf};

/// What a name resolved to
#[derive(Debug, Clone)]
pub enum SymbolKind {
    /// Export of an in-process module or of the host
    Export(Export),

    /// File on disk
    Program { path: PathBuf, executable: bool },
}

/// A resolved name together with where it came from
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub origin: PathBuf,
    pub kind: SymbolKind,
}

/// One class path entry, classified when the context is built
#[derive(Debug, Clone)]
pub enum Artifact {
    /// Location registered with an in-process module
    Module { location: PathBuf, module: Module },

    /// Directory searched for `a/b/C` when resolving `a.b.C`
    Directory(PathBuf),

    /// Single file answering to its own name
    File(PathBuf),

    /// Entry that exists in no loadable form; contributes nothing
    Missing(PathBuf),
}

impl Artifact {
    /// Classify `location`, preferring a registered module over the filesystem
    pub fn mount(location: &Path, module: Option<&Module>) -> Self {
        if let Some(module) = module {
            return Artifact::Module {
                location: location.to_path_buf(),
                module: module.clone(),
            };
        }
        if location.is_dir() {
            Artifact::Directory(location.to_path_buf())
        } else if location.is_file() {
            Artifact::File(location.to_path_buf())
        } else {
            tracing::warn!(path = %location.display(), "Class path entry is not loadable");
            Artifact::Missing(location.to_path_buf())
        }
    }

    pub fn location(&self) -> &Path {
        match self {
            Artifact::Module { location, .. } => location,
            Artifact::Directory(path) | Artifact::File(path) | Artifact::Missing(path) => path,
        }
    }

    /// Look `name` up inside this artifact
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        let kind = match self {
            Artifact::Module { module, .. } => SymbolKind::Export(module.get(name)?.clone()),
            Artifact::Directory(dir) => program(find_in_directory(dir, name)?),
            Artifact::File(path) => {
                if !file_answers_to(path, name) {
                    return None;
                }
                program(path.clone())
            }
            Artifact::Missing(_) => return None,
        };
        Some(Symbol {
            name: name.to_string(),
            origin: self.location().to_path_buf(),
            kind,
        })
    }
}

fn program(path: PathBuf) -> SymbolKind {
    let executable = is_executable(&path);
    SymbolKind::Program { path, executable }
}

/// Map `a.b.C` to `dir/a/b/C`, refusing names that would leave `dir`
fn find_in_directory(dir: &Path, name: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for segment in name.split('.') {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) if part == segment => relative.push(part),
            _ => return None,
        }
    }

    let candidate = dir.join(&relative);
    if candidate.is_file() {
        return Some(candidate);
    }
    let suffix = std::env::consts::EXE_SUFFIX;
    if suffix.is_empty() {
        return None;
    }
    let mut with_suffix = candidate.into_os_string();
    with_suffix.push(suffix);
    let candidate = PathBuf::from(with_suffix);
    candidate.is_file().then_some(candidate)
}

fn file_answers_to(path: &Path, name: &str) -> bool {
    let file_name = path.file_name().and_then(|n| n.to_str());
    let stem = path.file_stem().and_then(|n| n.to_str());
    file_name == Some(name) || stem == Some(name)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
