// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: CLI entry point for cachet-gen.
// Author: Lukas Bower

use anyhow::{Context, Result};
use cachet_gen::config::{Cli, Command};
use cachet_gen::{logging, toolchain, Generator};
use clap::Parser;

fn run(cli: Cli) -> Result<()> {
    let config = cli.generator_config()?;
    match cli.command {
        Command::Generate { source, out, args } => {
            let generator = Generator::from_config(&config)?.with_args(args);
            let emitted = generator
                .generate_file(&out, &source)
                .with_context(|| format!("generate {}", out.display()))?;
            println!("cachet-gen: wrote {}", emitted.summary());
        }
        Command::Emit {
            source,
            out_dir,
            stem,
            args,
        } => {
            let generator = Generator::from_config(&config)?.with_args(args);
            let emitted = generator
                .emit_all(&source, &out_dir, &stem)
                .with_context(|| format!("emit {stem} into {}", out_dir.display()))?;
            for artifact in &emitted {
                println!("cachet-gen: wrote {}", artifact.summary());
            }
        }
        Command::Locate => {
            let path = toolchain::resolve_compiler(config.compiler.as_deref())?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("cachet-gen: {err:#}");
        std::process::exit(1);
    }
}
