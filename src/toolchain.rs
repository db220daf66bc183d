// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Locate the cachet-compiler binary.
// Author: Lukas Bower

use std::env;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::GenerateError;

/// Program name searched for on `PATH`.
pub const COMPILER_NAME: &str = "cachet-compiler";
/// Environment variable that overrides `PATH` discovery.
pub const COMPILER_ENV: &str = "CACHET_COMPILER";

/// Resolve the compiler path.
///
/// An explicit path wins, then `CACHET_COMPILER`, then a `PATH` lookup.
/// Explicit and environment paths must exist; a bare program name that is
/// not a file in the working directory is looked up on `PATH`.
pub fn resolve_compiler(explicit: Option<&Path>) -> Result<PathBuf, GenerateError> {
    if let Some(path) = explicit {
        debug!("toolchain source=explicit path={}", path.display());
        return existing(path);
    }
    if let Some(value) = env::var_os(COMPILER_ENV).filter(|value| !value.is_empty()) {
        let path = PathBuf::from(value);
        debug!("toolchain source=env var={COMPILER_ENV} path={}", path.display());
        return existing(&path);
    }
    match which::which(COMPILER_NAME) {
        Ok(path) => {
            debug!("toolchain source=path path={}", path.display());
            Ok(path)
        }
        Err(err) => {
            debug!("toolchain source=path lookup failed: {err}");
            Err(GenerateError::CompilerNotFound {
                name: COMPILER_NAME.to_owned(),
            })
        }
    }
}

fn existing(path: &Path) -> Result<PathBuf, GenerateError> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    if path.components().count() == 1 {
        if let Ok(found) = which::which(path) {
            debug!("toolchain bare name {} found at {}", path.display(), found.display());
            return Ok(found);
        }
    }
    Err(GenerateError::CompilerNotFound {
        name: path.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::tempdir;

    struct EnvGuard(Option<std::ffi::OsString>);

    impl EnvGuard {
        fn set(value: Option<&Path>) -> Self {
            let prev = env::var_os(COMPILER_ENV);
            match value {
                Some(v) => env::set_var(COMPILER_ENV, v),
                None => env::remove_var(COMPILER_ENV),
            }
            EnvGuard(prev)
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match self.0.take() {
                Some(v) => env::set_var(COMPILER_ENV, v),
                None => env::remove_var(COMPILER_ENV),
            }
        }
    }

    #[test]
    #[serial]
    fn explicit_path_wins_over_env() {
        let dir = tempdir().unwrap();
        let explicit = dir.path().join("explicit");
        let from_env = dir.path().join("from-env");
        fs::write(&explicit, "").unwrap();
        fs::write(&from_env, "").unwrap();
        let _guard = EnvGuard::set(Some(&from_env));
        assert_eq!(resolve_compiler(Some(&explicit)).unwrap(), explicit);
    }

    #[test]
    #[serial]
    fn env_path_is_used_without_explicit() {
        let dir = tempdir().unwrap();
        let from_env = dir.path().join("from-env");
        fs::write(&from_env, "").unwrap();
        let _guard = EnvGuard::set(Some(&from_env));
        assert_eq!(resolve_compiler(None).unwrap(), from_env);
    }

    #[test]
    #[serial]
    fn missing_explicit_path_is_reported() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let _guard = EnvGuard::set(None);
        match resolve_compiler(Some(&missing)) {
            Err(GenerateError::CompilerNotFound { name }) => assert!(name.ends_with("nope")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn explicit_bare_name_is_found_on_path() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let tool = dir.path().join("cachet-compiler-17");
        fs::write(&tool, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
        let prev_path = env::var_os("PATH");
        env::set_var("PATH", dir.path());

        let result = resolve_compiler(Some(Path::new("cachet-compiler-17")));

        match prev_path {
            Some(v) => env::set_var("PATH", v),
            None => env::remove_var("PATH"),
        }
        assert_eq!(result.unwrap(), tool);
    }

    #[test]
    #[serial]
    fn bare_name_missing_from_path_is_reported() {
        let dir = tempdir().unwrap();
        let prev_path = env::var_os("PATH");
        env::set_var("PATH", dir.path());

        let result = resolve_compiler(Some(Path::new("cachet-compiler-absent")));

        match prev_path {
            Some(v) => env::set_var("PATH", v),
            None => env::remove_var("PATH"),
        }
        assert!(matches!(
            result,
            Err(GenerateError::CompilerNotFound { .. })
        ));
    }

    #[test]
    #[serial]
    fn missing_env_path_is_reported() {
        let dir = tempdir().unwrap();
        let _guard = EnvGuard::set(Some(&dir.path().join("gone")));
        assert!(matches!(
            resolve_compiler(None),
            Err(GenerateError::CompilerNotFound { .. })
        ));
    }
}
