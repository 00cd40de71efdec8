//! Error types for every stage of the pipeline.
//!
//! Each stage has its own enum so callers can match on what went wrong;
//! [`Error`] wraps them all for the top-level [`crate::run`].

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::num::ParseFloatError;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure between acquiring the input and building a report.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Acquiring the input failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),

    /// A line of the input was malformed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    /// The records could not be shaped into two series.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Series(#[from] SeriesError),

    /// The report could not be rendered.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),
}

/// The benchmark text could not be obtained.
#[derive(Error, Debug, Diagnostic)]
pub enum SourceError {
    /// The benchstat executable could not be started.
    #[error("could not run `{tool}`")]
    #[diagnostic(
        code(benchseries::source::spawn),
        help("install it with `go install golang.org/x/perf/cmd/benchstat@latest`, or pass --tool")
    )]
    Spawn {
        /// Executable that was run.
        tool: String,
        /// Underlying spawn failure.
        #[source]
        source: std::io::Error,
    },

    /// benchstat ran but exited unsuccessfully.
    #[error("`{tool} {}` exited with {status}", .target.display())]
    #[diagnostic(code(benchseries::source::tool_failed), help("{stderr}"))]
    ToolFailed {
        /// Executable that was run.
        tool: String,
        /// Path passed to it.
        target: PathBuf,
        /// Its exit status.
        status: ExitStatus,
        /// Its captured standard error, trimmed.
        stderr: String,
    },

    /// benchstat wrote bytes that are not UTF-8.
    #[error("`{tool}` printed output that is not valid UTF-8")]
    #[diagnostic(code(benchseries::source::not_utf8))]
    NotUtf8 {
        /// Executable that was run.
        tool: String,
        /// Decoding failure.
        #[source]
        source: FromUtf8Error,
    },

    /// The preprocessed report could not be read.
    #[error("could not read {}", .path.display())]
    #[diagnostic(code(benchseries::source::read))]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// A retained line of the report could not be turned into a measurement.
#[derive(Error, Debug, Diagnostic)]
pub enum ParseError {
    /// No space separates the benchmark name from the measurement.
    #[error("malformed benchmark line `{line}`")]
    #[diagnostic(
        code(benchseries::parse::missing_separator),
        help("expected `<name>/<variant>-<n> <value><unit> ± <pct>`")
    )]
    MissingSeparator {
        /// The offending line.
        line: String,
        /// Location of the line in the input.
        #[label("no space between benchmark name and measurement")]
        span: SourceSpan,
        /// The whole input, for rendering.
        #[source_code]
        src: NamedSource<String>,
    },

    /// The benchmark name has no `/<variant>` segment.
    #[error("malformed benchmark line `{line}`")]
    #[diagnostic(
        code(benchseries::parse::missing_variant),
        help("benchmark names look like `<name>/<variant>-<n>`")
    )]
    MissingVariant {
        /// The offending line.
        line: String,
        /// Location of the line in the input.
        #[label("benchmark name has no `/<variant>` segment")]
        span: SourceSpan,
        /// The whole input, for rendering.
        #[source_code]
        src: NamedSource<String>,
    },

    /// The measurement is not in ns, µs or ms.
    #[error("unrecognized time unit in `{token}`")]
    #[diagnostic(
        code(benchseries::parse::unknown_unit),
        help("only ns, µs and ms measurements are understood")
    )]
    UnknownUnit {
        /// The measurement token, e.g. `1.5s`.
        token: String,
        /// The offending line.
        line: String,
        /// Location of the line in the input.
        #[label("in this line")]
        span: SourceSpan,
        /// The whole input, for rendering.
        #[source_code]
        src: NamedSource<String>,
    },

    /// The measurement's number could not be parsed.
    #[error("invalid number in `{token}`")]
    #[diagnostic(code(benchseries::parse::invalid_number))]
    InvalidNumber {
        /// The measurement token, e.g. `x1ns`.
        token: String,
        /// The offending line.
        line: String,
        /// Float parsing failure.
        #[source]
        source: ParseFloatError,
        /// Location of the line in the input.
        #[label("in this line")]
        span: SourceSpan,
        /// The whole input, for rendering.
        #[source_code]
        src: NamedSource<String>,
    },
}

impl ParseError {
    /// Text of the offending line.
    pub fn line(&self) -> &str {
        match self {
            ParseError::MissingSeparator { line, .. }
            | ParseError::MissingVariant { line, .. }
            | ParseError::UnknownUnit { line, .. }
            | ParseError::InvalidNumber { line, .. } => line,
        }
    }
}

/// The parsed records cannot be shaped into two series.
#[derive(Error, Debug, Diagnostic)]
pub enum SeriesError {
    /// Fewer than two distinct variants appear in the input.
    #[error("need two benchmark variants to compare, found {}", .found.len())]
    #[diagnostic(
        code(benchseries::series::not_enough_variants),
        help("variants seen: [{}]", found.join(", "))
    )]
    NotEnoughVariants {
        /// Distinct variant labels that were seen.
        found: Vec<String>,
    },
}

/// The report could not be serialized.
#[derive(Error, Debug, Diagnostic)]
#[error("could not serialize report as JSON: {message}")]
#[diagnostic(code(benchseries::render::json))]
pub struct RenderError {
    /// Serializer error message.
    pub message: String,
}
