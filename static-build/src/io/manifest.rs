//! Reading the package manifest (`package.json`).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::error::BuildError;

/// Read the `version` field of a manifest.
///
/// Strings are used verbatim and numbers are stringified; the dotted format is
/// not checked. The version becomes part of a file name, so it must be
/// non-empty and free of path separators.
pub fn read_version(path: &Path) -> Result<String, BuildError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(BuildError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(err) => return Err(BuildError::io(format!("read {}", path.display()), err)),
    };
    parse_version(path, &raw)
}

fn parse_version(path: &Path, raw: &str) -> Result<String, BuildError> {
    let parse_err = |message: String| BuildError::Parse {
        path: path.to_path_buf(),
        message,
    };
    let manifest: Value = serde_json::from_str(raw).map_err(|err| parse_err(err.to_string()))?;
    let Value::Object(mut fields) = manifest else {
        return Err(parse_err("manifest must be a JSON object".to_string()));
    };
    let version = match fields.remove("version") {
        Some(Value::String(version)) => version,
        Some(Value::Number(number)) => number.to_string(),
        Some(other) => {
            return Err(parse_err(format!(
                "version must be a string or number, got {other}"
            )));
        }
        None => return Err(parse_err("missing version field".to_string())),
    };
    if version.trim().is_empty() {
        return Err(parse_err("version is empty".to_string()));
    }
    if version.contains(['/', '\\', '\0']) {
        return Err(parse_err(format!(
            "version must not contain path separators, got {version:?}"
        )));
    }
    Ok(version)
}
