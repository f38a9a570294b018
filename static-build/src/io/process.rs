//! Running external build tools.
//!
//! Commands are argument vectors, never shell strings. The working directory
//! is handed to the child explicitly; the orchestrator's own cwd is never
//! changed.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, error, info, instrument, warn};

use crate::error::BuildError;
use crate::io::interrupt::InterruptGate;

/// One external command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Directory to run in; `None` means the orchestrator's working directory.
    pub dir: Option<PathBuf>,
    /// Overrides applied on top of the inherited environment.
    pub env: BTreeMap<String, String>,
}

impl Invocation {
    /// Build an invocation from a non-empty argv.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            dir: None,
            env: BTreeMap::new(),
        })
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: &str, value: impl Into<String>) -> Self {
        self.env.insert(key.to_string(), value.into());
        self
    }

    /// The command line with its environment prefix, e.g. `BASE_URL= npm run build`.
    pub fn command_line(&self) -> String {
        let mut parts: Vec<String> = self
            .env
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Command line plus a `# in '<dir>'` suffix when a directory is set.
    pub fn describe(&self) -> String {
        match &self.dir {
            Some(dir) => format!("{} # in '{}'", self.command_line(), dir.display()),
            None => self.command_line(),
        }
    }
}

/// Seam between the orchestration and real processes.
pub trait CommandRunner {
    /// Run to completion; `Err` unless the command exits successfully.
    fn run(&mut self, invocation: &Invocation) -> Result<(), BuildError>;
}

/// Runs commands as child processes with inherited stdio.
///
/// Interrupts are held while a child runs, see [`InterruptGate`].
#[derive(Debug, Default)]
pub struct SystemRunner {
    interrupts: InterruptGate,
}

impl SystemRunner {
    pub fn new(interrupts: InterruptGate) -> Self {
        Self { interrupts }
    }
}

impl CommandRunner for SystemRunner {
    #[instrument(skip_all, fields(program = %invocation.program))]
    fn run(&mut self, invocation: &Invocation) -> Result<(), BuildError> {
        info!("{}", invocation.describe());

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .envs(&invocation.env)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &invocation.dir {
            cmd.current_dir(dir);
        }

        let held = self.interrupts.hold();
        let status = match cmd.status() {
            Ok(status) => status,
            Err(source) => {
                error!(err = %source, "failed to spawn command");
                return Err(BuildError::Spawn {
                    command: invocation.command_line(),
                    source,
                });
            }
        };

        if held.interrupted() {
            warn!(exit_code = ?status.code(), "interrupted while command was running");
        }
        drop(held);

        debug!(exit_code = ?status.code(), "command finished");
        if status.success() {
            Ok(())
        } else {
            Err(BuildError::Execution {
                command: invocation.command_line(),
                code: status.code(),
            })
        }
    }
}
