//! External tool invocations.
//!
//! Each pipeline stage is a [`Step`]: one program, its arguments, and the
//! directory it runs in. Steps inherit the parent's stdio so tool output goes
//! straight to the CI log.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::PipelineError;
use crate::options::PipelineOptions;

/// Which stage of the pipeline a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
  Configure,
  Build,
  Test,
}

impl StepKind {
  pub fn as_str(self) -> &'static str {
    match self {
      StepKind::Configure => "configure",
      StepKind::Build => "build",
      StepKind::Test => "test",
    }
  }

  /// Heading printed before the step runs.
  pub fn title(self) -> &'static str {
    match self {
      StepKind::Configure => "CMake configure",
      StepKind::Build => "CMake build",
      StepKind::Test => "CTest run unit tests",
    }
  }
}

impl fmt::Display for StepKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A single external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
  pub kind: StepKind,
  pub program: PathBuf,
  pub args: Vec<OsString>,
  /// Working directory of the child process.
  pub cwd: PathBuf,
}

impl Step {
  pub fn new<I, S>(kind: StepKind, program: impl Into<PathBuf>, args: I, cwd: impl Into<PathBuf>) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    Self {
      kind,
      program: program.into(),
      args: args.into_iter().map(|a| a.as_ref().to_os_string()).collect(),
      cwd: cwd.into(),
    }
  }

  /// `cmake -DBUILD_SHARED_LIBS=<bool> -DCMAKE_BUILD_TYPE=<type> -G <generator> <source>`
  pub fn configure(options: &PipelineOptions) -> Self {
    let shared = if options.shared_libs { "True" } else { "False" };
    let args: Vec<OsString> = vec![
      format!("-DBUILD_SHARED_LIBS={}", shared).into(),
      format!("-DCMAKE_BUILD_TYPE={}", options.build_type).into(),
      "-G".into(),
      options.generator.as_str().into(),
      options.source_dir.clone().into_os_string(),
    ];
    Self::new(StepKind::Configure, &options.toolchain.cmake, args, &options.build_dir)
  }

  /// `cmake --build . --config <type>`
  pub fn build(options: &PipelineOptions) -> Self {
    Self::new(
      StepKind::Build,
      &options.toolchain.cmake,
      ["--build", ".", "--config", options.build_type.as_str()],
      &options.build_dir,
    )
  }

  /// `ctest -VV --output-on-failure -C <type>`
  pub fn test(options: &PipelineOptions) -> Self {
    Self::new(
      StepKind::Test,
      &options.toolchain.ctest,
      ["-VV", "--output-on-failure", "-C", options.build_type.as_str()],
      &options.build_dir,
    )
  }

  /// The three pipeline steps, in the order they run.
  pub fn sequence(options: &PipelineOptions) -> [Step; 3] {
    [Self::configure(options), Self::build(options), Self::test(options)]
  }

  /// Program and arguments joined by single spaces, for display.
  pub fn command_line(&self) -> String {
    std::iter::once(self.program.as_os_str())
      .chain(self.args.iter().map(OsString::as_os_str))
      .map(|part| part.to_string_lossy())
      .collect::<Vec<_>>()
      .join(" ")
  }

  /// Run the step to completion and return how long it took.
  ///
  /// A non-zero exit becomes [`PipelineError::StepFailed`] carrying the tool's
  /// exit code.
  pub async fn run(&self) -> Result<Duration, PipelineError> {
    let command_line = self.command_line();
    info!(step = %self.kind, cmd = %command_line, "running step");

    let mut command = Command::new(&self.program);
    command
      .args(&self.args)
      .current_dir(&self.cwd)
      .stdin(Stdio::inherit())
      .stdout(Stdio::inherit())
      .stderr(Stdio::inherit());

    debug!(program = %self.program.display(), working_dir = ?self.cwd, "spawning process");

    let start = Instant::now();
    let status = command.status().await.map_err(|source| PipelineError::Spawn {
      program: self.program.display().to_string(),
      source,
    })?;
    let elapsed = start.elapsed();

    if status.success() {
      debug!(step = %self.kind, ?elapsed, "step finished");
      return Ok(elapsed);
    }

    Err(match status.code() {
      Some(code) => PipelineError::StepFailed {
        step: self.kind,
        command: command_line,
        code,
      },
      None => PipelineError::StepTerminated {
        step: self.kind,
        command: command_line,
        signal: termination_signal(&status),
      },
    })
  }
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.command_line())
  }
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> Option<i32> {
  use std::os::unix::process::ExitStatusExt;
  status.signal()
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> Option<i32> {
  None
}
