//! External command execution.
//!
//! The parsers work on captured text only; this module is the single place
//! that touches a process. The [`CommandRunner`] trait keeps that seam
//! mockable so the whole scrape pipeline is testable without a ZFS system.

use std::io;
use std::process::Command;

/// Invocation failure: the command could not run, or it produced diagnostic
/// error output. Either way the affected table's scrape is abandoned.
#[derive(Debug)]
pub enum RunError {
    /// The process could not be spawned at all.
    Spawn { command: String, source: io::Error },
    /// The command ran but reported an error. zpool writes its diagnostics
    /// to stderr, and that state does not resolve itself over time.
    Failed { command: String, message: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spawn { command, source } => write!(f, "'{command}' failed: {source}"),
            Self::Failed { command, message } => write!(f, "'{command}' failed: {message}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::Failed { .. } => None,
        }
    }
}

/// Executes one argv and returns its captured stdout.
pub trait CommandRunner: Send + Sync {
    fn run(&self, argv: &[String]) -> Result<String, RunError>;
}

/// Real implementation over `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZpoolRunner;

impl ZpoolRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ZpoolRunner {
    fn run(&self, argv: &[String]) -> Result<String, RunError> {
        let command = argv.join(" ");
        let Some((program, args)) = argv.split_first() else {
            return Err(RunError::Failed {
                command,
                message: "empty command line".to_string(),
            });
        };

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| RunError::Spawn {
                command: command.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            return Err(RunError::Failed {
                command,
                message: stderr.trim().to_string(),
            });
        }
        if !output.status.success() {
            return Err(RunError::Failed {
                command,
                message: format!("exited with {}", output.status),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
