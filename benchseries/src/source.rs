//! Acquire the benchmark text, either by running benchstat or by reading a file.

use crate::error::SourceError;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// The executable run in [`Mode::Raw`] unless overridden.
pub const DEFAULT_TOOL: &str = "benchstat";

/// How the target path should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// `go test -bench` output; summarized by running benchstat on it.
    #[default]
    Raw,
    /// Text that benchstat already produced.
    Preprocessed,
}

impl Mode {
    /// `None` and `"raw"` select [`Mode::Raw`]; any other value selects
    /// [`Mode::Preprocessed`].
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            None | Some("raw") => Mode::Raw,
            Some(_) => Mode::Preprocessed,
        }
    }
}

/// Acquired benchmark text plus a display name for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    /// File path, or `<tool> <path>` in raw mode.
    pub name: String,
    /// The benchmark text itself.
    pub text: String,
}

impl Input {
    /// Wrap already-acquired text.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Where the benchmark text comes from.
#[derive(Debug, Clone)]
pub struct InputSource {
    target: PathBuf,
    mode: Mode,
    tool: String,
}

impl InputSource {
    /// Read `target` according to `mode`, running [`DEFAULT_TOOL`] in raw mode.
    pub fn new(target: impl Into<PathBuf>, mode: Mode) -> Self {
        Self {
            target: target.into(),
            mode,
            tool: DEFAULT_TOOL.to_string(),
        }
    }

    /// Use a different benchstat executable in [`Mode::Raw`].
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    /// Path handed to the tool or read directly.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// How the target is interpreted.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Executable used in raw mode.
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Run the tool or read the file and return its text.
    pub fn acquire(&self) -> Result<Input, SourceError> {
        match self.mode {
            Mode::Raw => self.run_tool(),
            Mode::Preprocessed => self.read_file(),
        }
    }

    fn run_tool(&self) -> Result<Input, SourceError> {
        tracing::debug!(tool = %self.tool, path = %self.target.display(), "running benchstat");

        let output = Command::new(&self.tool)
            .arg(&self.target)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| SourceError::Spawn {
                tool: self.tool.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SourceError::ToolFailed {
                tool: self.tool.clone(),
                target: self.target.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8(output.stdout).map_err(|source| SourceError::NotUtf8 {
            tool: self.tool.clone(),
            source,
        })?;

        Ok(Input::new(
            format!("{} {}", self.tool, self.target.display()),
            text,
        ))
    }

    fn read_file(&self) -> Result<Input, SourceError> {
        tracing::debug!(path = %self.target.display(), "reading preprocessed report");

        let text = fs::read_to_string(&self.target).map_err(|source| SourceError::Read {
            path: self.target.clone(),
            source,
        })?;

        Ok(Input::new(self.target.display().to_string(), text))
    }
}
