//! Production build sequence.
//!
//! Order is fixed: asset package (production base URL), clear the output
//! directory, bundler, versioned artifact. The asset package is always
//! rebuilt with default settings afterwards so the sibling checkout is left
//! in its development state, even when an earlier step failed.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{error, info, instrument};

use crate::error::BuildError;
use crate::io::manifest::read_version;
use crate::io::process::CommandRunner;
use crate::plan::BuildPlan;
use crate::stamp::stamp_artifact;

/// Run the full production build, returning the path of the stamped artifact.
///
/// The manifest is read before anything runs, so a missing or broken
/// manifest fails the build without touching the asset package. Once the
/// first command has started, the development rebuild always runs; the first
/// error is the one returned.
#[instrument(skip_all, fields(output_dir = %plan.output_dir.display()))]
pub fn run_production_build<R: CommandRunner>(
    plan: &BuildPlan,
    runner: &mut R,
) -> Result<PathBuf, BuildError> {
    let version = read_version(&plan.manifest)?;
    info!(version = %version, "production build started");

    let outcome = run_steps(plan, &version, runner);

    info!("restoring development build of assets");
    let cleanup = runner.run(&plan.assets_development);

    match (outcome, cleanup) {
        (Ok(stamped), Ok(())) => {
            info!(stamped = %stamped.display(), "production build complete");
            Ok(stamped)
        }
        (Ok(_), Err(cleanup_err)) => Err(cleanup_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(cleanup_err)) => {
            error!(err = %cleanup_err, "development rebuild of assets also failed");
            Err(err)
        }
    }
}

fn run_steps<R: CommandRunner>(
    plan: &BuildPlan,
    version: &str,
    runner: &mut R,
) -> Result<PathBuf, BuildError> {
    runner.run(&plan.assets_production)?;
    remove_output_dir(&plan.output_dir)?;
    runner.run(&plan.bundler)?;
    stamp_artifact(&plan.artifact, version)
}

/// Remove the output directory if it exists.
fn remove_output_dir(dir: &Path) -> Result<(), BuildError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {
            info!(dir = %dir.display(), "removed previous output");
            Ok(())
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(BuildError::io(format!("remove {}", dir.display()), err)),
    }
}
