//! cmake-ci-lib: configure, build and test a CMake project in CI.
//!
//! The pipeline is a fixed sequence of external tool invocations:
//! - `cmake` configure, run inside a freshly prepared build directory
//! - `cmake --build` against that directory
//! - `ctest` for the chosen configuration
//!
//! The first step that fails stops the pipeline, and its exit code becomes the
//! exit code of the whole run.

pub mod build_dir;
pub mod error;
pub mod options;
pub mod paths;
pub mod pipeline;
pub mod step;


pub use build_dir::{BuildDirState, prepare_build_dir};
pub use error::PipelineError;
pub use options::{BuildType, Generator, PipelineOptions, Toolchain};
pub use pipeline::{PipelineEvent, PipelineSummary, run_pipeline};
pub use step::{Step, StepKind};
