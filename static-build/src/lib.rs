//! Production build orchestrator for the static web app.
//!
//! Runs the external tools that make up a production build, in order:
//!
//! - **[`plan`]**: Pure construction of every command line, working
//!   directory and environment override from [`config`].
//! - **[`io`]**: Side effects (reading the manifest, spawning processes),
//!   behind the [`io::process::CommandRunner`] seam so tests can record
//!   invocations instead of running them.
//! - **[`pipeline`]**: The build sequence itself, with the development
//!   rebuild of the asset package guaranteed to run last.
//!
//! The orchestrator never changes its own working directory; each child
//! process is given its directory explicitly.

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod plan;
pub mod stamp;
#[cfg(test)]
mod test_support;
