//! Production build of the static web app.
//!
//! Builds the asset package with a production base URL, bundles with webpack,
//! writes a versioned copy of `app.html`, then rebuilds the asset package for
//! development. Takes no build arguments; see `static-build.toml` for the
//! knobs.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use static_build::config::{CONFIG_FILE, load_config};
use static_build::error::BuildError;
use static_build::exit_codes;
use static_build::io::interrupt::InterruptGate;
use static_build::io::process::SystemRunner;
use static_build::logging;
use static_build::pipeline::run_production_build;
use static_build::plan::{NODE_ENV, build_plan};

#[derive(Parser)]
#[command(
    name = "static-build",
    version,
    about = "Production build of the static web app"
)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    logging::init();

    if let Err(err) = run() {
        eprintln!("{:#}", err);
        let code = err
            .downcast_ref::<BuildError>()
            .map_or(exit_codes::FAILED, BuildError::exit_code);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let cfg = load_config(&cwd.join(CONFIG_FILE)).context("load build config")?;
    let plan = build_plan(&cfg, std::env::var(NODE_ENV).ok())?;

    let interrupts = InterruptGate::install().context("install signal handlers")?;
    let mut runner = SystemRunner::new(interrupts);
    let stamped = run_production_build(&plan, &mut runner)?;
    info!(stamped = %stamped.display(), "done");
    Ok(())
}
