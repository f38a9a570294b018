//! Build configuration stored in `static-build.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "static-build.toml";

/// Build configuration (TOML).
///
/// Every field is optional in the file; missing fields take the values the
/// production build has always used. Relative paths resolve against the
/// working directory the orchestrator is started in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BuildConfig {
    /// Manifest holding the `version` used for the stamped artifact.
    pub manifest: PathBuf,

    /// Bundler output directory, removed before every build.
    pub output_dir: PathBuf,

    /// File name inside `output_dir` that gets a versioned copy.
    pub artifact: String,

    pub assets: AssetsConfig,

    pub bundler: BundlerConfig,
}

/// The auxiliary asset package built before and after the bundler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssetsConfig {
    pub dir: PathBuf,
    pub command: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BundlerConfig {
    pub command: Vec<String>,
    /// Passed to node as `--max_old_space_size`.
    pub max_old_space_size_mb: u32,
    pub base_url: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("package.json"),
            output_dir: PathBuf::from("dist"),
            artifact: "app.html".to_string(),
            assets: AssetsConfig::default(),
            bundler: BundlerConfig::default(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("../../webapp-lib"),
            command: vec!["npm".to_string(), "run".to_string(), "build".to_string()],
        }
    }
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            command: vec![
                "webpack".to_string(),
                "--progress".to_string(),
                "--color".to_string(),
            ],
            max_old_space_size_mb: 8000,
            base_url: "/".to_string(),
        }
    }
}

impl BuildConfig {
    pub fn validate(&self) -> Result<()> {
        if self.assets.command.is_empty() || self.assets.command[0].trim().is_empty() {
            return Err(anyhow!("assets.command must be a non-empty array"));
        }
        if self.bundler.command.is_empty() || self.bundler.command[0].trim().is_empty() {
            return Err(anyhow!("bundler.command must be a non-empty array"));
        }
        if self.bundler.max_old_space_size_mb == 0 {
            return Err(anyhow!("bundler.max_old_space_size_mb must be > 0"));
        }
        if self.artifact.trim().is_empty() {
            return Err(anyhow!("artifact must not be empty"));
        }
        if self.artifact.contains(['/', '\\']) {
            return Err(anyhow!("artifact must be a file name, got {}", self.artifact));
        }
        Ok(())
    }

    /// Path of the bundler artifact that gets a versioned copy.
    pub fn artifact_path(&self) -> PathBuf {
        self.output_dir.join(&self.artifact)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `BuildConfig::default()`.
pub fn load_config(path: &Path) -> Result<BuildConfig> {
    if !path.exists() {
        let cfg = BuildConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: BuildConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join(CONFIG_FILE)).expect("load");
        assert_eq!(cfg, BuildConfig::default());
        assert_eq!(cfg.artifact_path(), PathBuf::from("dist/app.html"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "[assets]\ndir = \"../lib\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.assets.dir, PathBuf::from("../lib"));
        assert_eq!(cfg.assets.command, vec!["npm", "run", "build"]);
        assert_eq!(cfg.bundler, BundlerConfig::default());
    }

    #[test]
    fn rejects_empty_bundler_command() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "[bundler]\ncommand = []\n").expect("write");
        let err = load_config(&path).expect_err("invalid");
        assert!(format!("{err:#}").contains("bundler.command"));
    }

    #[test]
    fn rejects_artifact_with_directory() {
        let cfg = BuildConfig {
            artifact: "nested/app.html".to_string(),
            ..BuildConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_memory_limit() {
        let mut cfg = BuildConfig::default();
        cfg.bundler.max_old_space_size_mb = 0;
        assert!(cfg.validate().is_err());
    }
}
