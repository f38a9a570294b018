//! I/O helpers for the build orchestrator.

pub mod interrupt;
pub mod manifest;
pub mod process;
