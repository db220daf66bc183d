// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Build cachet-compiler command lines for each supported CLI revision.
// Author: Lukas Bower

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use clap::ValueEnum;
use serde::Deserialize;

use crate::artifact::Artifact;

/// Scratch name for the verification output the positional CLI insists on.
pub const UNUSED_BPL_FILE: &str = "unused.bpl";

/// Which revision of the compiler's command line to speak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InvocationStyle {
    /// `<source> --cpp-decls <path> --cpp-defs <path>`
    #[default]
    Flags,
    /// `<source> <h> <inc> <bpl>`
    Positional,
}

impl fmt::Display for InvocationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationStyle::Flags => write!(f, "flags"),
            InvocationStyle::Positional => write!(f, "positional"),
        }
    }
}

/// Output locations for one compiler run, all inside a scratch directory.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub declarations: PathBuf,
    pub definitions: PathBuf,
    pub bpl: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(dir: &Path) -> Self {
        OutputPaths {
            declarations: dir.join(Artifact::Declarations.file_name()),
            definitions: dir.join(Artifact::Definitions.file_name()),
            bpl: dir.join(UNUSED_BPL_FILE),
        }
    }

    /// Location the compiler writes `artifact` to.
    pub fn artifact(&self, artifact: Artifact) -> &Path {
        match artifact {
            Artifact::Declarations => &self.declarations,
            Artifact::Definitions => &self.definitions,
        }
    }
}

impl InvocationStyle {
    /// Arguments following the compiler path, before any user extras.
    pub fn args(self, source: &Path, outputs: &OutputPaths) -> Vec<OsString> {
        let mut args = vec![source.as_os_str().to_owned()];
        match self {
            InvocationStyle::Flags => {
                args.push("--cpp-decls".into());
                args.push(outputs.declarations.as_os_str().to_owned());
                args.push("--cpp-defs".into());
                args.push(outputs.definitions.as_os_str().to_owned());
            }
            InvocationStyle::Positional => {
                args.push(outputs.declarations.as_os_str().to_owned());
                args.push(outputs.definitions.as_os_str().to_owned());
                args.push(outputs.bpl.as_os_str().to_owned());
            }
        }
        args
    }
}

/// Assemble the full command for one compiler run.
pub fn build_command(
    tool: &Path,
    style: InvocationStyle,
    source: &Path,
    outputs: &OutputPaths,
    extra_args: &[String],
) -> Command {
    let mut cmd = Command::new(tool);
    cmd.args(style.args(source, outputs));
    cmd.args(extra_args);
    cmd
}
