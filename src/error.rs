// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Structured errors raised while driving the Cachet compiler.
// Author: Lukas Bower

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::artifact::Artifact;

/// Failures surfaced by [`crate::Generator`] and the toolchain helpers.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// No compiler binary could be located.
    #[error("cachet compiler not found: {name}")]
    CompilerNotFound {
        /// Path or program name that was looked up.
        name: String,
    },
    /// The DSL source handed to the compiler is not a readable file.
    #[error("cachet source does not exist or is not a file: {}", .0.display())]
    MissingSource(PathBuf),
    /// The compiler process could not be started.
    #[error("failed to launch {}", tool.display())]
    Spawn {
        /// Compiler binary that failed to start.
        tool: PathBuf,
        /// Underlying spawn error.
        #[source]
        source: io::Error,
    },
    /// The compiler ran but reported failure.
    #[error("{} exited with {status}{}", tool.display(), diagnostics(stdout, stderr))]
    CompilerFailed {
        /// Compiler binary that was invoked.
        tool: PathBuf,
        /// Exit status reported by the operating system.
        status: ExitStatus,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },
    /// The compiler exited successfully without writing the expected artifact.
    #[error("compiler did not produce the {artifact} artifact at {}", path.display())]
    MissingArtifact {
        /// Artifact that was expected.
        artifact: Artifact,
        /// Location the compiler was told to write to.
        path: PathBuf,
    },
    /// Reading a generated artifact or writing the output failed.
    #[error("i/o error on {}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The generator configuration file could not be loaded.
    #[error("invalid generator config {}: {message}", path.display())]
    Config {
        /// Config file path.
        path: PathBuf,
        /// Parse or read failure detail.
        message: String,
    },
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }
}

fn diagnostics(stdout: &str, stderr: &str) -> String {
    let mut text = String::new();
    for stream in [stdout.trim_end(), stderr.trim_end()] {
        if !stream.is_empty() {
            text.push('\n');
            text.push_str(stream);
        }
    }
    text
}
