// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Identify the generated Cachet artifacts and pick one per output.
// Author: Lukas Bower

use std::fmt;
use std::path::Path;

/// File name the compiler writes declarations to inside the scratch directory.
pub const DECLARATIONS_FILE: &str = "CachetGenerated.h";
/// File name the compiler writes definitions to inside the scratch directory.
pub const DEFINITIONS_FILE: &str = "CachetGenerated.inc";

/// One of the two outputs produced by `cachet-compiler`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Header-like declarations consumed by native headers.
    Declarations,
    /// Includable definitions consumed by native translation units.
    Definitions,
}

impl Artifact {
    /// Select the artifact an output file expects from its extension.
    ///
    /// Only a lowercase `.h` extension selects declarations; everything else,
    /// including a missing extension, selects definitions.
    pub fn for_output(path: &Path) -> Artifact {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("h") => Artifact::Declarations,
            _ => Artifact::Definitions,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::Declarations => DECLARATIONS_FILE,
            Artifact::Definitions => DEFINITIONS_FILE,
        }
    }

    /// Extension used when both artifacts are emitted under a shared stem.
    pub fn extension(self) -> &'static str {
        match self {
            Artifact::Declarations => "h",
            Artifact::Definitions => "inc",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Declarations => write!(f, "declarations"),
            Artifact::Definitions => write!(f, "definitions"),
        }
    }
}

/// Both artifacts of a single compiler run, read back into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifacts {
    pub declarations: Vec<u8>,
    pub definitions: Vec<u8>,
}

impl GeneratedArtifacts {
    pub fn select(&self, artifact: Artifact) -> &[u8] {
        match artifact {
            Artifact::Declarations => &self.declarations,
            Artifact::Definitions => &self.definitions,
        }
    }
}
