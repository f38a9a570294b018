//! The external invocations of a production build.
//!
//! Pure: turns a [`BuildConfig`] and the caller's `NODE_ENV` into the exact
//! command lines, directories and environment overrides, without touching
//! the filesystem.

use std::path::PathBuf;

use anyhow::{Result, anyhow};

use crate::config::BuildConfig;
use crate::io::process::Invocation;

/// Base URL baked into the asset package for the production bundle.
pub const ASSETS_BASE_URL: &str = "BASE_URL";
/// Disables webpack's on-disk cache, which corrupts production builds now and then.
pub const NO_DISK_CACHE: &str = "NO_WEBPACK_DISK_CACHE";
pub const NODE_ENV: &str = "NODE_ENV";
pub const NODE_OPTIONS: &str = "NODE_OPTIONS";
pub const BUNDLER_BASE_URL: &str = "COCALC_BASE_URL";

pub const DEFAULT_NODE_ENV: &str = "production";

/// Everything the pipeline needs, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    /// Asset package build with an empty base URL.
    pub assets_production: Invocation,
    /// Asset package build with default settings, run last no matter what.
    pub assets_development: Invocation,
    pub bundler: Invocation,
    pub output_dir: PathBuf,
    pub artifact: PathBuf,
    pub manifest: PathBuf,
}

/// `NODE_ENV` for the bundler: the caller's value if set, else `production`.
pub fn resolve_node_env(inherited: Option<String>) -> String {
    inherited.unwrap_or_else(|| DEFAULT_NODE_ENV.to_string())
}

pub fn build_plan(cfg: &BuildConfig, inherited_node_env: Option<String>) -> Result<BuildPlan> {
    let assets = Invocation::from_argv(&cfg.assets.command)
        .ok_or_else(|| anyhow!("assets.command must be a non-empty array"))?
        .in_dir(&cfg.assets.dir);
    let bundler = Invocation::from_argv(&cfg.bundler.command)
        .ok_or_else(|| anyhow!("bundler.command must be a non-empty array"))?
        .with_env(NO_DISK_CACHE, "true")
        .with_env(NODE_ENV, resolve_node_env(inherited_node_env))
        .with_env(
            NODE_OPTIONS,
            format!("--max_old_space_size={}", cfg.bundler.max_old_space_size_mb),
        )
        .with_env(BUNDLER_BASE_URL, cfg.bundler.base_url.clone());

    Ok(BuildPlan {
        assets_production: assets.clone().with_env(ASSETS_BASE_URL, ""),
        assets_development: assets,
        bundler,
        output_dir: cfg.output_dir.clone(),
        artifact: cfg.artifact_path(),
        manifest: cfg.manifest.clone(),
    })
}
