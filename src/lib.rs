// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Expose Cachet code generation for build scripts, tests and the CLI.
// Author: Lukas Bower
#![forbid(unsafe_code)]

//! Build-time shim around the external `cachet-compiler`.
//!
//! The compiler turns a Cachet source file into two C++ artifacts: a
//! declarations header and an includable definitions file. [`Generator`]
//! runs it inside a scratch directory, turns a nonzero exit into a
//! [`GenerateError`], and copies whichever artifact the requested output
//! name selects (`.h` for declarations, anything else for definitions).

pub mod artifact;
pub mod build_script;
pub mod config;
pub mod error;
pub mod generate;
pub mod invocation;
pub mod logging;
pub mod output;
pub mod toolchain;

use std::io::Write;
use std::path::Path;

pub use artifact::{Artifact, GeneratedArtifacts};
pub use config::GeneratorConfig;
pub use error::GenerateError;
pub use generate::Generator;
pub use invocation::InvocationStyle;
pub use output::Emitted;

/// Compile `source` with the discovered compiler and write the artifact
/// selected by `output_name` into `out`.
pub fn generate<W: Write + ?Sized>(
    out: &mut W,
    output_name: &Path,
    source: &Path,
) -> Result<Artifact, GenerateError> {
    Generator::from_config(&GeneratorConfig::default())?.generate(out, output_name, source)
}
