//! boot - Staged application launcher
//!
//! Every argument after the program name is forwarded to the entry point.
//! Launcher settings come from the environment (see `bootstrap::config`).

use bootstrap::{BootPipeline, ConsoleReporter, FileChecker, LauncherSettings, ManifestLocator};
use std::process;

fn main() {
    // Initialize logging
    if let Err(e) = bootstrap::logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let settings = LauncherSettings::from_env();
    tracing::debug!(?settings, "Launcher settings loaded");

    let locator = ManifestLocator::from_settings(&settings);
    let reporter = ConsoleReporter::stderr().with_trace(settings.show_trace);
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let completion = BootPipeline::new(&locator, &FileChecker, &reporter).start(&args);

    // A spawned entry point decides the launcher's exit status
    if let Some(code) = completion.and_then(|c| c.exit_code()) {
        process::exit(code);
    }
}
