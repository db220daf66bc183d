// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Validate the log records emitted around compiler runs.
// Author: Lukas Bower
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::{Mutex, Once};

use cachet_gen::{GenerateError, Generator};
use log::{Level, LevelFilter, Metadata, Record};
use serial_test::serial;
use tempfile::tempdir;

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
static INSTALL: Once = Once::new();
static LOGGER: CaptureLogger = CaptureLogger;

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

fn capture() {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    RECORDS.lock().unwrap().clear();
}

fn records_at(level: Level) -> Vec<String> {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(l, _)| *l == level)
        .map(|(_, msg)| msg.clone())
        .collect()
}

fn run_compiler(body: &str) -> Result<Vec<u8>, GenerateError> {
    let dir = tempdir().unwrap();
    let compiler = dir.path().join("cachet-compiler");
    fs::write(&compiler, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&compiler, fs::Permissions::from_mode(0o755)).unwrap();
    let source = dir.path().join("CacheIR.cachet");
    fs::write(&source, "struct Value;\n").unwrap();
    let mut out = Vec::new();
    Generator::new(&compiler)
        .generate(&mut out, Path::new("Foo.h"), &source)
        .map(|_| out)
}

#[test]
#[serial]
fn failed_run_logs_both_streams_at_error() {
    capture();
    let err = run_compiler("echo 'parsing CacheIR'\necho 'type error at 3:7' >&2\nexit 2")
        .unwrap_err();
    assert!(matches!(err, GenerateError::CompilerFailed { .. }));

    let errors = records_at(Level::Error);
    assert!(
        errors.iter().any(|msg| msg.ends_with("stdout: parsing CacheIR")),
        "{errors:?}"
    );
    assert!(
        errors.iter().any(|msg| msg.ends_with("stderr: type error at 3:7")),
        "{errors:?}"
    );
    assert!(errors.iter().any(|msg| msg.contains("compiler failed")));
    assert!(records_at(Level::Info)
        .iter()
        .all(|msg| !msg.contains("wrote")));
}

#[test]
#[serial]
fn successful_run_logs_completion_with_digest() {
    capture();
    let out = run_compiler("echo decls > \"$3\"\necho defs > \"$5\"\necho 'note: slow path' >&2")
        .unwrap();
    assert_eq!(out, b"decls\n");

    assert!(records_at(Level::Error).is_empty());
    let warnings = records_at(Level::Warn);
    assert!(warnings.iter().any(|msg| msg.ends_with("stderr: note: slow path")));
    let infos = records_at(Level::Info);
    assert!(
        infos
            .iter()
            .any(|msg| msg.contains("wrote declarations (6 bytes, sha256=")),
        "{infos:?}"
    );
}
