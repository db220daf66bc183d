// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Command-line and TOML configuration for cachet-gen.
// Author: Lukas Bower

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Deserialize;

use crate::error::GenerateError;
use crate::invocation::InvocationStyle;

/// Stem used by `emit` when none is given.
pub const DEFAULT_STEM: &str = "CachetGenerated";

#[derive(Debug, Parser)]
#[command(name = "cachet-gen", author, version, about = "Generate C++ sources from Cachet")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    /// Path to the cachet-compiler binary.
    #[arg(long, global = true)]
    pub compiler: Option<PathBuf>,
    /// TOML file supplying compiler, style and extra args.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Compiler command-line revision to use.
    #[arg(long, value_enum, global = true)]
    pub style: Option<InvocationStyle>,
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the artifact selected by the output's extension (.h = declarations).
    Generate {
        source: PathBuf,
        #[arg(short = 'o', long)]
        out: PathBuf,
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Write both artifacts as <stem>.h and <stem>.inc.
    Emit {
        source: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
        #[arg(long, default_value = DEFAULT_STEM)]
        stem: String,
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Print the resolved compiler path.
    Locate,
}

/// Generator settings loaded from an optional TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub compiler: Option<PathBuf>,
    pub style: InvocationStyle,
    pub args: Vec<String>,
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<Self, GenerateError> {
        let text = fs::read_to_string(path).map_err(|err| GenerateError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::parse(path, &text)
    }

    pub fn parse(path: &Path, text: &str) -> Result<Self, GenerateError> {
        toml::from_str(text).map_err(|err| GenerateError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}

impl Cli {
    /// Layer CLI flags over the config file, if any.
    pub fn generator_config(&self) -> Result<GeneratorConfig, GenerateError> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(compiler) = &self.compiler {
            config.compiler = Some(compiler.clone());
        }
        if let Some(style) = self.style {
            config.style = style;
        }
        Ok(config)
    }
}
