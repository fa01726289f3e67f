//! Boot manifest handling
//!
//! Finds and parses the line-oriented manifest that tells the launcher what
//! to start and where to load it from.
//!
//! # Example Manifest
//!
//! ```text
//! # Application launcher
//! ep=app.start.Main
//! cp=lib/app
//! cp=lib/support
//! ```
//!
//! `ep` names the entry point (exactly one), `cp` appends an artifact to the
//! class path (one or more, order preserved). Blank lines and lines starting
//! with `#` are ignored.

mod locator;
mod parser;

pub use locator::{LocateError, ManifestLocator, ManifestSource};
pub use parser::{BootConfig, ManifestLine, ManifestParser, ParseError};
