//! Line-oriented manifest parser

use std::io::BufRead;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading a manifest
#[derive(Error, Debug)]
pub enum ParseError {
    /// A line that is neither a directive, a comment nor blank
    #[error("Illegal line '{0}'")]
    IllegalLine(String),

    /// `ep` declared a second time
    #[error("Must have exactly one 'ep' entry")]
    DuplicateEntryPoint,

    /// No `ep` declared at all
    #[error("Must have exactly one 'ep' entry")]
    MissingEntryPoint,

    /// No `cp` declared at all
    #[error("Must have at least one 'cp' entry")]
    MissingClassPath,

    /// The parser instance was already used for a parse
    #[error("Manifest parser can only be used once")]
    ParserReused,

    /// The underlying stream failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Validated launcher configuration
///
/// Holds exactly one entry point and a non-empty class path in declaration
/// order. Only obtainable through [`ManifestParser::parse`] or
/// [`BootConfig::new`], both of which enforce those constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootConfig {
    entry_point: String,
    class_path: Vec<PathBuf>,
}

impl BootConfig {
    /// Build a configuration directly, enforcing a non-empty class path
    pub fn new<I, P>(entry_point: impl Into<String>, class_path: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let class_path: Vec<PathBuf> = class_path.into_iter().map(Into::into).collect();
        if class_path.is_empty() {
            return Err(ParseError::MissingClassPath);
        }
        Ok(Self {
            entry_point: entry_point.into(),
            class_path,
        })
    }

    /// Fully-qualified name of the symbol to invoke
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Artifact locations in search order
    pub fn class_path(&self) -> &[PathBuf] {
        &self.class_path
    }
}

/// One classified manifest line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestLine<'a> {
    /// `ep=<value>`
    EntryPoint(&'a str),
    /// `cp=<value>`
    ClassPath(&'a str),
    /// Comment or blank line
    Ignored,
}

impl<'a> ManifestLine<'a> {
    /// Classify a single line, rejecting anything unrecognised
    pub fn classify(line: &'a str) -> Result<Self, ParseError> {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(ManifestLine::Ignored);
        }
        if let Some(value) = line.strip_prefix("ep=") {
            return Ok(ManifestLine::EntryPoint(value));
        }
        if let Some(value) = line.strip_prefix("cp=") {
            return Ok(ManifestLine::ClassPath(value));
        }
        Err(ParseError::IllegalLine(line.to_string()))
    }
}

/// Single-use manifest parser
///
/// A parser may read exactly one manifest; every later call fails with
/// [`ParseError::ParserReused`] whatever the input.
#[derive(Debug, Default)]
pub struct ManifestParser {
    used: bool,
}

impl ManifestParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume `reader` and produce a validated configuration
    ///
    /// The reader is dropped on every return path.
    pub fn parse<R: BufRead>(&mut self, reader: R) -> Result<BootConfig, ParseError> {
        if self.used {
            return Err(ParseError::ParserReused);
        }
        self.used = true;

        let mut entry_point: Option<String> = None;
        let mut class_path: Vec<PathBuf> = Vec::new();

        for line in reader.lines() {
            let line = line?;
            match ManifestLine::classify(&line)? {
                ManifestLine::EntryPoint(value) => {
                    if entry_point.is_some() {
                        return Err(ParseError::DuplicateEntryPoint);
                    }
                    entry_point = Some(value.to_string());
                }
                ManifestLine::ClassPath(value) => class_path.push(Path::new(value).to_path_buf()),
                ManifestLine::Ignored => {}
            }
        }

        let entry_point = entry_point.ok_or(ParseError::MissingEntryPoint)?;
        tracing::debug!(
            entry_point = %entry_point,
            class_path = class_path.len(),
            "Manifest parsed"
        );
        BootConfig::new(entry_point, class_path)
    }
}
