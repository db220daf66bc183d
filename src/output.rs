// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Persist generated artifacts without disturbing unchanged outputs.
// Author: Lukas Bower

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::artifact::Artifact;

/// Summary of an artifact written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub artifact: Artifact,
    pub path: PathBuf,
    pub bytes: usize,
    /// Hex sha256 of the written contents.
    pub sha256: String,
    /// False when the file already held identical contents.
    pub updated: bool,
}

impl Emitted {
    pub fn summary(&self) -> String {
        let state = if self.updated { "updated" } else { "unchanged" };
        format!(
            "{} ({}, {} bytes, sha256={}, {state})",
            self.path.display(),
            self.artifact,
            self.bytes,
            self.sha256
        )
    }
}

pub fn hash_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Write `bytes` to `path` unless it already holds exactly those bytes.
///
/// Returns whether the file was (re)written. Missing parent directories are
/// created.
pub fn write_if_changed(path: &Path, bytes: &[u8]) -> io::Result<bool> {
    match fs::read(path) {
        Ok(existing) if existing == bytes => return Ok(false),
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    Ok(true)
}
