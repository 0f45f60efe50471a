//! Configure → build → test, in order, stopping at the first failure.

use std::time::{Duration, Instant};

use tracing::info;

use crate::build_dir::{BuildDirState, prepare_build_dir};
use crate::error::PipelineError;
use crate::options::PipelineOptions;
use crate::step::Step;

/// Progress notifications emitted while the pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent<'a> {
  BuildDirPrepared(BuildDirState),
  StepStarted(&'a Step),
  StepFinished(&'a Step, Duration),
}

/// Result of a run where every step succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
  pub build_dir: BuildDirState,
  pub steps: Vec<(Step, Duration)>,
  pub elapsed: Duration,
}

/// Run the whole pipeline.
///
/// `options` must already be resolved (see [`PipelineOptions::resolve`]). The
/// build directory is prepared before anything is spawned, then each step runs
/// to completion in that directory. The first failing step ends the run and
/// its error is returned; later steps are never started.
pub async fn run_pipeline<F>(options: &PipelineOptions, mut on_event: F) -> Result<PipelineSummary, PipelineError>
where
  F: FnMut(PipelineEvent<'_>),
{
  let start = Instant::now();

  let build_dir = prepare_build_dir(&options.build_dir, options.preserve_build_dir).await?;
  info!(path = %options.build_dir.display(), state = build_dir.as_str(), "build directory ready");
  on_event(PipelineEvent::BuildDirPrepared(build_dir));

  let mut steps = Vec::with_capacity(3);
  for step in Step::sequence(options) {
    on_event(PipelineEvent::StepStarted(&step));
    let elapsed = step.run().await?;
    on_event(PipelineEvent::StepFinished(&step, elapsed));
    steps.push((step, elapsed));
  }

  Ok(PipelineSummary {
    build_dir,
    steps,
    elapsed: start.elapsed(),
  })
}
