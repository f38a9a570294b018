//! Error taxonomy for the production build.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Any failure that aborts the build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// An external command ran and exited unsuccessfully.
    #[error("error executing '{command}' ({})", describe_code(*code))]
    Execution { command: String, code: Option<i32> },

    /// An external command could not be started at all.
    #[error("failed to start '{command}'")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Process exit code to report for this error.
    ///
    /// A failing external command propagates its own code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Execution {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => crate::exit_codes::FAILED,
        }
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_error_propagates_child_code() {
        let err = BuildError::Execution {
            command: "webpack --progress --color".to_string(),
            code: Some(2),
        };
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            err.to_string(),
            "error executing 'webpack --progress --color' (exit code 2)"
        );
    }

    #[test]
    fn signal_termination_maps_to_generic_failure() {
        let err = BuildError::Execution {
            command: "npm run build".to_string(),
            code: None,
        };
        assert_eq!(err.exit_code(), crate::exit_codes::FAILED);
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn file_errors_use_generic_failure_code() {
        let err = BuildError::FileNotFound {
            path: PathBuf::from("package.json"),
        };
        assert_eq!(err.exit_code(), crate::exit_codes::FAILED);
        assert_eq!(err.to_string(), "file not found: package.json");
    }
}
