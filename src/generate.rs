// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Run cachet-compiler in a scratch directory and propagate its output.
// Author: Lukas Bower

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, Level};
use tempfile::TempDir;

use crate::artifact::{Artifact, GeneratedArtifacts};
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::invocation::{build_command, InvocationStyle, OutputPaths};
use crate::logging;
use crate::output::{hash_bytes, write_if_changed, Emitted};
use crate::toolchain;

const SCRATCH_PREFIX: &str = "cachet-gen-";

/// Drives one `cachet-compiler` binary.
///
/// Every call gets its own scratch directory, removed when the call returns
/// on every path.
#[derive(Debug, Clone)]
pub struct Generator {
    compiler: PathBuf,
    style: InvocationStyle,
    args: Vec<String>,
}

impl Generator {
    /// Use `compiler` as-is; no discovery or existence check happens here.
    pub fn new(compiler: impl Into<PathBuf>) -> Self {
        Generator {
            compiler: compiler.into(),
            style: InvocationStyle::default(),
            args: Vec::new(),
        }
    }

    /// Resolve the compiler through the toolchain chain and apply config.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GenerateError> {
        let compiler = toolchain::resolve_compiler(config.compiler.as_deref())?;
        Ok(Generator {
            compiler,
            style: config.style,
            args: config.args.clone(),
        })
    }

    #[must_use]
    pub fn with_style(mut self, style: InvocationStyle) -> Self {
        self.style = style;
        self
    }

    /// Append arguments passed to the compiler after the output paths.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn compiler(&self) -> &Path {
        &self.compiler
    }

    pub fn style(&self) -> InvocationStyle {
        self.style
    }

    /// Compile `source` and copy the artifact `output_name` asks for into `out`.
    ///
    /// `.h` outputs receive the declarations, anything else the definitions.
    /// Nothing is written to `out` when the compiler fails.
    pub fn generate<W: Write + ?Sized>(
        &self,
        out: &mut W,
        output_name: &Path,
        source: &Path,
    ) -> Result<Artifact, GenerateError> {
        let artifact = Artifact::for_output(output_name);
        let bytes = self.run(source, output_name, |paths| read_artifact(paths, artifact))?;
        out.write_all(&bytes)
            .and_then(|()| out.flush())
            .map_err(|err| GenerateError::io(output_name, err))?;
        logging::log(
            Level::Info,
            &self.compiler,
            source,
            output_name,
            &completion(artifact, &bytes),
        );
        Ok(artifact)
    }

    /// Compile `source` and return both artifacts.
    pub fn compile(&self, source: &Path) -> Result<GeneratedArtifacts, GenerateError> {
        let generated = self.run(source, Path::new("-"), |paths| {
            Ok(GeneratedArtifacts {
                declarations: read_artifact(paths, Artifact::Declarations)?,
                definitions: read_artifact(paths, Artifact::Definitions)?,
            })
        })?;
        for artifact in [Artifact::Declarations, Artifact::Definitions] {
            logging::log(
                Level::Info,
                &self.compiler,
                source,
                Path::new(artifact.file_name()),
                &completion(artifact, generated.select(artifact)),
            );
        }
        Ok(generated)
    }

    /// Generate into the file at `output`, leaving it untouched if unchanged.
    pub fn generate_file(&self, output: &Path, source: &Path) -> Result<Emitted, GenerateError> {
        let artifact = Artifact::for_output(output);
        let bytes = self.run(source, output, |paths| read_artifact(paths, artifact))?;
        self.persist(artifact, output, source, &bytes)
    }

    /// Write both artifacts as `<stem>.h` and `<stem>.inc` under `out_dir`.
    pub fn emit_all(
        &self,
        source: &Path,
        out_dir: &Path,
        stem: &str,
    ) -> Result<[Emitted; 2], GenerateError> {
        let generated = self.compile(source)?;
        let emit = |artifact: Artifact| {
            let path = out_dir.join(format!("{stem}.{}", artifact.extension()));
            self.persist(artifact, &path, source, generated.select(artifact))
        };
        Ok([emit(Artifact::Declarations)?, emit(Artifact::Definitions)?])
    }

    fn persist(
        &self,
        artifact: Artifact,
        path: &Path,
        source: &Path,
        bytes: &[u8],
    ) -> Result<Emitted, GenerateError> {
        let updated = write_if_changed(path, bytes).map_err(|err| GenerateError::io(path, err))?;
        let emitted = Emitted {
            artifact,
            path: path.to_path_buf(),
            bytes: bytes.len(),
            sha256: hash_bytes(bytes),
            updated,
        };
        logging::log(Level::Info, &self.compiler, source, path, &emitted.summary());
        Ok(emitted)
    }

    /// Run the compiler and hand its output locations to `collect` while the
    /// scratch directory is still alive.
    fn run<T>(
        &self,
        source: &Path,
        output_name: &Path,
        collect: impl FnOnce(&OutputPaths) -> Result<T, GenerateError>,
    ) -> Result<T, GenerateError> {
        if !source.is_file() {
            return Err(GenerateError::MissingSource(source.to_path_buf()));
        }
        let scratch: TempDir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir()
            .map_err(|err| GenerateError::io(std::env::temp_dir(), err))?;
        let paths = OutputPaths::in_dir(scratch.path());
        let mut cmd = build_command(&self.compiler, self.style, source, &paths, &self.args);
        logging::log(Level::Info, &self.compiler, source, output_name, "generate");
        debug!("command {cmd:?}");

        let output = cmd.output().map_err(|source| GenerateError::Spawn {
            tool: self.compiler.clone(),
            source,
        })?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            logging::log(
                Level::Error,
                &self.compiler,
                source,
                output_name,
                &format!("compiler failed: {}", output.status),
            );
            logging::log_streams(Level::Error, &self.compiler, &stdout, &stderr);
            return Err(GenerateError::CompilerFailed {
                tool: self.compiler.clone(),
                status: output.status,
                stdout,
                stderr,
            });
        }
        logging::log_streams(Level::Warn, &self.compiler, "", &stderr);
        logging::log_streams(Level::Debug, &self.compiler, &stdout, "");

        collect(&paths)
    }
}

fn completion(artifact: Artifact, bytes: &[u8]) -> String {
    format!(
        "wrote {artifact} ({} bytes, sha256={})",
        bytes.len(),
        hash_bytes(bytes)
    )
}

fn read_artifact(paths: &OutputPaths, artifact: Artifact) -> Result<Vec<u8>, GenerateError> {
    let path = paths.artifact(artifact);
    fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => GenerateError::MissingArtifact {
            artifact,
            path: path.to_path_buf(),
        },
        _ => GenerateError::io(path, err),
    })
}
