//! Test-only command runner that records invocations instead of spawning them.

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use crate::error::BuildError;
use crate::io::process::{CommandRunner, Invocation};

/// What a scripted call does. Calls beyond the script succeed.
#[derive(Debug, Clone)]
pub enum ScriptedRun {
    Succeed,
    /// Exit with the given non-zero code.
    Fail(i32),
    /// Succeed after writing a file, the way a bundler produces its output.
    WriteFile { path: PathBuf, contents: String },
}

#[derive(Debug, Default)]
pub struct RecordingRunner {
    script: VecDeque<ScriptedRun>,
    pub calls: Vec<Invocation>,
}

impl RecordingRunner {
    pub fn new(script: Vec<ScriptedRun>) -> Self {
        Self {
            script: script.into(),
            calls: Vec::new(),
        }
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<(), BuildError> {
        self.calls.push(invocation.clone());
        match self.script.pop_front().unwrap_or(ScriptedRun::Succeed) {
            ScriptedRun::Succeed => Ok(()),
            ScriptedRun::Fail(code) => Err(BuildError::Execution {
                command: invocation.command_line(),
                code: Some(code),
            }),
            ScriptedRun::WriteFile { path, contents } => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)
                        .map_err(|err| BuildError::io("create scripted output dir", err))?;
                }
                fs::write(&path, contents)
                    .map_err(|err| BuildError::io("write scripted output", err))?;
                Ok(())
            }
        }
    }
}
