//! Versioned copy of the bundler artifact.
//!
//! `dist/app.html` is duplicated as `dist/app-<version>.html` so a specific
//! client version can be loaded by tweaking the URL. Nothing else depends on
//! the stamped file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::error::BuildError;

/// Name of the versioned copy: `app.html` + `4.0.0` -> `app-4.0.0.html`.
pub fn stamped_path(artifact: &Path, version: &str) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match artifact.extension() {
        Some(ext) => format!("{stem}-{version}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{version}"),
    };
    artifact.with_file_name(name)
}

/// Copy `artifact` next to itself under its versioned name, returning the new path.
#[instrument(skip_all, fields(artifact = %artifact.display(), version = %version))]
pub fn stamp_artifact(artifact: &Path, version: &str) -> Result<PathBuf, BuildError> {
    let target = stamped_path(artifact, version);
    match fs::copy(artifact, &target) {
        Ok(_) => {}
        Err(err) if err.kind() == ErrorKind::NotFound && !artifact.exists() => {
            return Err(BuildError::FileNotFound {
                path: artifact.to_path_buf(),
            });
        }
        Err(err) => {
            return Err(BuildError::io(
                format!("copy {} to {}", artifact.display(), target.display()),
                err,
            ));
        }
    }
    info!(target = %target.display(), "stamped artifact");
    Ok(target)
}
