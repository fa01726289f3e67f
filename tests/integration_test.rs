//! Integration tests for the launcher
//!
//! These tests drive the full pipeline from manifest discovery on disk through
//! entry point invocation.

use bootstrap::{
    BootError, BootPipeline, Completion, ConsoleReporter, ContextBuilder, Export, FileChecker,
    HostScope, Layer, ManifestLocator, MemoryReporter, Module, ModuleRegistry, ResolveError, Stage,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Helper to write a manifest naming `entry_point` and `class_path`
fn write_manifest(path: &Path, entry_point: &str, class_path: &[&Path]) {
    let mut content = String::from("# generated by the integration tests\n");
    content.push_str(&format!("ep={}\n", entry_point));
    for entry in class_path {
        content.push_str(&format!("cp={}\n", entry.display()));
    }
    fs::write(path, content).unwrap();
}

/// Module whose entry point records the arguments it was called with
fn recording_module(name: &str, seen: &Arc<Mutex<Vec<Vec<String>>>>) -> Module {
    let sink = Arc::clone(seen);
    Module::new().with_entry(name, move |args| {
        sink.lock().unwrap().push(args.to_vec());
        Ok(())
    })
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

struct Install {
    root: TempDir,
}

impl Install {
    fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
        }
    }

    fn dir(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    fn artifact_dir(&self, name: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::create_dir_all(&path).unwrap();
        path
    }

    fn locator(&self) -> ManifestLocator {
        ManifestLocator::new("boot.cfg").with_install_dir(Some(self.dir()))
    }
}

mod pipeline_tests {
    use super::*;

    #[test]
    fn test_valid_manifest_runs_entry_with_process_args() {
        let install = Install::new();
        let valid_dir = install.artifact_dir("validDir");
        write_manifest(&install.dir().join("boot.cfg"), "sample.Good", &[&valid_dir]);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let registry =
            ModuleRegistry::new().with_module(&valid_dir, recording_module("sample.Good", &seen));
        let reporter = MemoryReporter::new();
        let locator = install.locator();

        let outcome = BootPipeline::new(&locator, &FileChecker, &reporter)
            .with_context_builder(ContextBuilder::new().with_registry(registry))
            .start(&args(&["alpha", "beta"]));

        assert!(reporter.is_empty(), "no failure should be reported");
        assert_eq!(outcome, Some(Completion::Returned));
        assert_eq!(*seen.lock().unwrap(), vec![args(&["alpha", "beta"])]);
    }

    #[test]
    fn test_entry_requiring_instance_is_reported() {
        let install = Install::new();
        let lib = install.artifact_dir("lib");
        write_manifest(&install.dir().join("boot.cfg"), "sample.NoStaticMain", &[&lib]);

        let called = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&called);
        let registry = ModuleRegistry::new().with_module(
            &lib,
            Module::new().with_export(
                "sample.NoStaticMain",
                Export::method(move |_| {
                    *flag.lock().unwrap() = true;
                    Ok(())
                }),
            ),
        );
        let reporter = MemoryReporter::new();
        let locator = install.locator();

        let outcome = BootPipeline::new(&locator, &FileChecker, &reporter)
            .with_context_builder(ContextBuilder::new().with_registry(registry))
            .start(&[]);

        assert!(outcome.is_none());
        assert!(!*called.lock().unwrap());
        let failures = reporter.take();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].label(), "Start entry point");
        assert!(matches!(
            failures[0].error,
            BootError::Resolve(ResolveError::EntryShapeMismatch { ref name, .. }) if name == "sample.NoStaticMain"
        ));
    }

    #[test]
    fn test_override_wins_over_sibling() {
        let install = Install::new();
        let lib = install.artifact_dir("lib");
        write_manifest(&install.dir().join("boot.cfg"), "app.FromSibling", &[&lib]);
        let elsewhere = TempDir::new().unwrap();
        let override_path = elsewhere.path().join("custom.cfg");
        write_manifest(&override_path, "app.FromOverride", &[&lib]);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let module = recording_module("app.FromOverride", &seen).with_export(
            "app.FromSibling",
            Export::entry(|_| Err(anyhow::anyhow!("sibling manifest was used"))),
        );
        let registry = ModuleRegistry::new().with_module(&lib, module);
        let reporter = MemoryReporter::new();
        let locator = install.locator().with_override(&override_path);

        BootPipeline::new(&locator, &FileChecker, &reporter)
            .with_context_builder(ContextBuilder::new().with_registry(registry))
            .start(&args(&["x"]));

        assert!(reporter.is_empty());
        assert_eq!(*seen.lock().unwrap(), vec![args(&["x"])]);
    }

    #[test]
    fn test_missing_manifest_on_disk() {
        let install = Install::new();
        let reporter = MemoryReporter::new();
        let locator = install.locator();

        BootPipeline::new(&locator, &FileChecker, &reporter).start(&[]);

        let failures = reporter.take();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].stage, Stage::LocateManifest);
        assert_eq!(
            failures[0].to_string(),
            "Locate config file: Could not locate configuration file"
        );
    }

    #[test]
    fn test_missing_artifact_on_disk() {
        let install = Install::new();
        let lib = install.artifact_dir("lib");
        let missing = install.dir().join("missing");
        write_manifest(&install.dir().join("boot.cfg"), "app.Main", &[&lib, &missing]);

        let reporter = MemoryReporter::new();
        let locator = install.locator();
        BootPipeline::new(&locator, &FileChecker, &reporter).start(&[]);

        let failures = reporter.take();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].label(), "Check class path files");
        assert_eq!(
            failures[0].error.to_string(),
            format!("File {} not found", missing.display())
        );
    }

    #[test]
    fn test_first_artifact_without_entry_is_skipped() {
        let install = Install::new();
        let empty = install.artifact_dir("empty");
        let lib = install.artifact_dir("lib");
        write_manifest(&install.dir().join("boot.cfg"), "sample.Good", &[&empty, &lib]);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let registry =
            ModuleRegistry::new().with_module(&lib, recording_module("sample.Good", &seen));
        let reporter = MemoryReporter::new();
        let locator = install.locator();

        BootPipeline::new(&locator, &FileChecker, &reporter)
            .with_context_builder(ContextBuilder::new().with_registry(registry))
            .start(&[]);

        assert!(reporter.is_empty());
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_loaded_entry_does_not_bind_to_launcher_internals() {
        let install = Install::new();
        let lib = install.artifact_dir("lib");
        write_manifest(&install.dir().join("boot.cfg"), "sample.Good", &[&lib]);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let host_called = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&host_called);
        let host = HostScope::new().with_export(
            Layer::Application,
            "sample.Good",
            Export::entry(move |_| {
                *flag.lock().unwrap() = true;
                Ok(())
            }),
        );
        let registry =
            ModuleRegistry::new().with_module(&lib, recording_module("sample.Good", &seen));
        let reporter = MemoryReporter::new();
        let locator = install.locator();

        BootPipeline::new(&locator, &FileChecker, &reporter)
            .with_context_builder(
                ContextBuilder::new()
                    .with_registry(registry)
                    .with_host_scope(host),
            )
            .start(&[]);

        assert!(reporter.is_empty());
        assert!(!*host_called.lock().unwrap());
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}

mod console_tests {
    use super::*;

    #[test]
    fn test_console_report_and_exit_code() {
        let install = Install::new();
        let codes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&codes);
        let reporter = ConsoleReporter::new(Vec::new())
            .with_exit(move |code| sink.lock().unwrap().push(code));
        let locator = install.locator();

        BootPipeline::new(&locator, &FileChecker, &reporter).start(&[]);

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            output.lines().next(),
            Some("Locate config file: Could not locate configuration file")
        );
        assert_eq!(*codes.lock().unwrap(), vec![1]);
    }
}

#[cfg(unix)]
mod program_tests {
    use super::*;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    fn executable(path: &Path, body: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_program_entry_point_gets_args_and_sets_status() {
        let install = Install::new();
        let bin = install.artifact_dir("bin");
        let out = install.dir().join("hello.out");
        executable(
            &bin.join("sample").join("Hello"),
            &format!("echo \"Hello $*\" > '{}'\nexit 3", out.display()),
        );
        write_manifest(&install.dir().join("boot.cfg"), "sample.Hello", &[&bin]);

        let reporter = MemoryReporter::new();
        let locator = install.locator();
        let outcome = BootPipeline::new(&locator, &FileChecker, &reporter).start(&args(&["world"]));

        assert!(reporter.is_empty());
        assert_eq!(outcome.and_then(|c| c.exit_code()), Some(3));
        assert_eq!(fs::read_to_string(out).unwrap(), "Hello world\n");
    }

    #[test]
    fn test_single_file_artifact() {
        let install = Install::new();
        let tool = install.dir().join("tools").join("greeter");
        executable(&tool, "exit 0");
        write_manifest(&install.dir().join("boot.cfg"), "greeter", &[&tool]);

        let reporter = MemoryReporter::new();
        let locator = install.locator();
        let outcome = BootPipeline::new(&locator, &FileChecker, &reporter).start(&[]);

        assert!(reporter.is_empty());
        assert_eq!(outcome.and_then(|c| c.exit_code()), Some(0));
    }

    /// Executable created in the working directory, named by a bare file name
    fn local_executable(body: &str) -> tempfile::TempPath {
        let mut file = tempfile::Builder::new()
            .prefix("boot-tool-")
            .tempfile_in(".")
            .unwrap();
        write!(file, "#!/bin/sh\n{}\n", body).unwrap();
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(0o755))
            .unwrap();
        file.into_temp_path()
    }

    fn bare_name(path: &Path) -> &str {
        path.file_name().unwrap().to_str().unwrap()
    }

    fn write_relative_manifest(path: &Path, entry_point: &str, class_path: &str) {
        fs::write(path, format!("ep={}\ncp={}\n", entry_point, class_path)).unwrap();
    }

    #[test]
    fn test_bare_file_class_path_runs_the_resolved_file() {
        let install = Install::new();
        let out = install.dir().join("tool.out");
        let tool = local_executable(&format!("echo \"local $*\" > '{}'\nexit 4", out.display()));
        let name = bare_name(&tool);
        write_relative_manifest(&install.dir().join("boot.cfg"), name, name);

        let reporter = MemoryReporter::new();
        let locator = install.locator();
        let outcome = BootPipeline::new(&locator, &FileChecker, &reporter).start(&args(&["run"]));

        assert!(reporter.is_empty(), "unexpected failures: {:?}", reporter.take());
        assert_eq!(outcome.and_then(|c| c.exit_code()), Some(4));
        assert_eq!(fs::read_to_string(out).unwrap(), "local run\n");
    }

    #[test]
    fn test_relative_file_class_path() {
        let install = Install::new();
        let out = install.dir().join("greeter.out");
        let dir = tempfile::Builder::new()
            .prefix("boot-lib-")
            .tempdir_in(".")
            .unwrap();
        executable(&dir.path().join("greeter"), &format!("echo relative > '{}'", out.display()));
        let class_path = format!("{}/greeter", bare_name(dir.path()));
        write_relative_manifest(&install.dir().join("boot.cfg"), "greeter", &class_path);

        let reporter = MemoryReporter::new();
        let locator = install.locator();
        let outcome = BootPipeline::new(&locator, &FileChecker, &reporter).start(&[]);

        assert!(reporter.is_empty());
        assert_eq!(outcome.and_then(|c| c.exit_code()), Some(0));
        assert_eq!(fs::read_to_string(out).unwrap(), "relative\n");
    }

    #[test]
    fn test_relative_directory_class_path() {
        let install = Install::new();
        let out = install.dir().join("app.out");
        let dir = tempfile::Builder::new()
            .prefix("boot-lib-")
            .tempdir_in(".")
            .unwrap();
        executable(
            &dir.path().join("app").join("sample").join("Hello"),
            &format!("echo \"Hello $*\" > '{}'", out.display()),
        );
        let class_path = format!("{}/app", bare_name(dir.path()));
        write_relative_manifest(&install.dir().join("boot.cfg"), "sample.Hello", &class_path);

        let reporter = MemoryReporter::new();
        let locator = install.locator();
        let outcome = BootPipeline::new(&locator, &FileChecker, &reporter).start(&args(&["there"]));

        assert!(reporter.is_empty());
        assert_eq!(outcome.and_then(|c| c.exit_code()), Some(0));
        assert_eq!(fs::read_to_string(out).unwrap(), "Hello there\n");
    }

    #[test]
    fn test_non_executable_program_is_wrong_shape() {
        let install = Install::new();
        let bin = install.artifact_dir("bin");
        fs::write(bin.join("notes"), "just text\n").unwrap();
        write_manifest(&install.dir().join("boot.cfg"), "notes", &[&bin]);

        let reporter = MemoryReporter::new();
        let locator = install.locator();
        BootPipeline::new(&locator, &FileChecker, &reporter).start(&[]);

        let failures = reporter.take();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].label(), "Start entry point");
        assert!(matches!(
            failures[0].error,
            BootError::Resolve(ResolveError::EntryShapeMismatch { .. })
        ));
    }
}
