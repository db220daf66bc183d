// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Helpers for invoking cachet-gen from a Cargo build script.
// Author: Lukas Bower

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::GeneratorConfig;
use crate::generate::Generator;
use crate::toolchain::COMPILER_ENV;

/// Print the `cargo:` directives that re-run the build script when the
/// source or compiler override changes.
pub fn emit_rerun_hints(source: &Path) {
    println!("cargo:rerun-if-changed={}", source.display());
    println!("cargo:rerun-if-env-changed={COMPILER_ENV}");
}

/// Generate `<stem>.h` and `<stem>.inc` for `source` inside `OUT_DIR`.
///
/// Returns the declarations and definitions paths, in that order.
pub fn generate_into_out_dir(source: &Path, stem: &str) -> Result<(PathBuf, PathBuf)> {
    let out_dir = env::var_os("OUT_DIR").context("OUT_DIR is not set; call from build.rs")?;
    let generator = Generator::from_config(&GeneratorConfig::default())?;
    let [decls, defs] = generator
        .emit_all(source, Path::new(&out_dir), stem)
        .with_context(|| format!("generate cachet sources from {}", source.display()))?;
    emit_rerun_hints(source);
    Ok((decls.path, defs.path))
}
