// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Structured invocation records and binary logger setup.
// Author: Lukas Bower

use std::path::Path;

use env_logger::Env;
use log::{Level, LevelFilter};

/// Emit a `key=value` invocation record through the `log` facade.
pub fn log(level: Level, tool: &Path, source: &Path, output: &Path, msg: &str) {
    log::log!(
        level,
        "tool={} source={} output={} msg={}",
        tool.display(),
        source.display(),
        output.display(),
        msg
    );
}

/// Emit captured compiler streams, one record per non-empty line.
pub fn log_streams(level: Level, tool: &Path, stdout: &str, stderr: &str) {
    for (stream, text) in [("stdout", stdout), ("stderr", stderr)] {
        for line in text.lines().filter(|line| !line.trim().is_empty()) {
            log::log!(level, "tool={} {stream}: {line}", tool.display());
        }
    }
}

/// Initialise `env_logger` for the binary; `RUST_LOG` overrides the default.
pub fn init(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(default_level.as_str()));
    builder.format_timestamp_millis();
    let _ = builder.try_init();
}
