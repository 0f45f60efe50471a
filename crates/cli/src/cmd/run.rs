//! Implementation of the pipeline run.
//!
//! Prepares the build directory, then runs the CMake configure, CMake build
//! and CTest steps in order. A failing step ends the process with the tool's
//! own exit code.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use cmake_ci_lib::{PipelineError, PipelineEvent, PipelineOptions, run_pipeline};

use crate::output::{
  format_duration, format_flag, print_error, print_info, print_setting, print_stat, print_step, print_success,
};

/// Execute the configure → build → test pipeline.
///
/// Resolves `options` against the current directory, prints the settings
/// banner, and drives the pipeline on a single-threaded runtime so only one
/// tool runs at a time.
///
/// # Errors
///
/// Returns an error if the current directory cannot be read, the build
/// directory cannot be prepared, or a tool cannot be started. A tool that runs
/// and fails does not return: the process exits with that tool's exit code.
pub fn cmd_run(options: PipelineOptions) -> Result<()> {
  let launch_dir = std::env::current_dir().map_err(PipelineError::CurrentDir)?;
  let options = options.resolve(&launch_dir);

  print_settings(&options);

  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;

  let result = rt.block_on(run_pipeline(&options, |event| report(event, &launch_dir, &options.build_dir)));

  let summary = match result {
    Ok(summary) => summary,
    Err(err) => exit_on_step_failure(err)?,
  };

  println!();
  print_success("Configure, build and tests succeeded");
  for (step, elapsed) in &summary.steps {
    print_stat(step.kind.title(), &format_duration(*elapsed));
  }
  print_stat("Total", &format_duration(summary.elapsed));
  info!(elapsed = ?summary.elapsed, "pipeline finished");

  Ok(())
}

fn print_settings(options: &PipelineOptions) {
  print_setting("IS_SHARED_LIBS", format_flag(options.shared_libs));
  print_setting("NOT_CLEAR_BUILD_DIR", format_flag(options.preserve_build_dir));
  print_setting("BUILD_TYPE", options.build_type.as_str());
  print_setting("CMAKE_GENERATOR", options.generator.as_str());
  print_setting("BUILD_DIR", &options.build_dir.display().to_string());
  print_setting("SOURCE_DIR", &options.source_dir.display().to_string());
}

fn report(event: PipelineEvent<'_>, launch_dir: &Path, build_dir: &Path) {
  match event {
    PipelineEvent::BuildDirPrepared(state) => {
      print_info(&format!("Build directory {}: [{}]", state.as_str(), build_dir.display()));
      print_info(&format!(
        "Working directory: [{}] -> [{}]",
        launch_dir.display(),
        build_dir.display()
      ));
    }
    PipelineEvent::StepStarted(step) => {
      print_step(step.kind.title(), &step.command_line());
    }
    PipelineEvent::StepFinished(step, elapsed) => {
      print_info(&format!("{} finished in {}", step.kind.title(), format_duration(elapsed)));
    }
  }
}

/// Terminate with the tool's exit code if `err` came from a tool, otherwise
/// hand it back for `main` to report.
fn exit_on_step_failure<T>(err: PipelineError) -> Result<T> {
  match &err {
    PipelineError::StepFailed { command, code, .. } => {
      print_error(&format!("Command [{}] exit with code {}", command, code));
      std::process::exit(*code);
    }
    PipelineError::StepTerminated { command, signal, .. } => {
      match signal {
        Some(signal) => print_error(&format!("Command [{}] terminated by signal {}", command, signal)),
        None => print_error(&format!("Command [{}] terminated without an exit code", command)),
      }
      std::process::exit(err.exit_code());
    }
    _ => Err(err.into()),
  }
}
