//! Error types for pipeline execution.

use std::path::PathBuf;

use thiserror::Error;

use crate::step::StepKind;

/// Exit code used for failures that did not come from a tool's exit status.
pub const GENERIC_FAILURE: i32 = 1;

/// Errors that can stop a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
  /// A tool ran and exited with a non-zero code.
  #[error("{step} step failed: command [{command}] exit with code {code}")]
  StepFailed { step: StepKind, command: String, code: i32 },

  /// A tool was killed by a signal and has no exit code.
  #[error("{step} step failed: command [{command}] terminated by signal {signal:?}")]
  StepTerminated {
    step: StepKind,
    command: String,
    signal: Option<i32>,
  },

  /// The tool could not be started at all.
  #[error("failed to start {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// Creating or clearing the build directory failed.
  #[error("failed to prepare build directory {path}: {source}")]
  PrepareBuildDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The launch directory could not be determined.
  #[error("failed to read current directory: {0}")]
  CurrentDir(#[source] std::io::Error),
}

impl PipelineError {
  /// Process exit code this error should terminate the run with.
  ///
  /// Tool failures pass the tool's own code through. A tool killed by a
  /// signal maps to `128 + signal`, the shell convention.
  pub fn exit_code(&self) -> i32 {
    match self {
      PipelineError::StepFailed { code, .. } => *code,
      PipelineError::StepTerminated {
        signal: Some(signal), ..
      } => 128 + signal,
      _ => GENERIC_FAILURE,
    }
  }

  /// The failing command line, when the error came from a tool.
  pub fn command(&self) -> Option<&str> {
    match self {
      PipelineError::StepFailed { command, .. } | PipelineError::StepTerminated { command, .. } => {
        Some(command.as_str())
      }
      _ => None,
    }
  }
}
