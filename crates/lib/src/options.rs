//! Invocation options for a pipeline run.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::paths::resolve_path;

/// Default build directory, relative to the launch directory.
pub const DEFAULT_BUILD_DIR: &str = "./build";

/// Default source directory, relative to the launch directory.
pub const DEFAULT_SOURCE_DIR: &str = "./";

/// Default build-system tool.
pub const DEFAULT_CMAKE: &str = "cmake";

/// Default test-runner tool.
pub const DEFAULT_CTEST: &str = "ctest";

/// CMake build configuration, passed as `CMAKE_BUILD_TYPE` and `--config`/`-C`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BuildType {
  #[default]
  #[value(name = "Debug")]
  Debug,
  #[value(name = "Release")]
  Release,
}

impl BuildType {
  pub fn as_str(self) -> &'static str {
    match self {
      BuildType::Debug => "Debug",
      BuildType::Release => "Release",
    }
  }
}

impl fmt::Display for BuildType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// CMake generator passed to `-G`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Generator {
  #[value(name = "Xcode")]
  Xcode,
  #[default]
  #[value(name = "Ninja")]
  Ninja,
}

impl Generator {
  pub fn as_str(self) -> &'static str {
    match self {
      Generator::Xcode => "Xcode",
      Generator::Ninja => "Ninja",
    }
  }
}

impl fmt::Display for Generator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Programs used for the configure/build steps and the test step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
  pub cmake: PathBuf,
  pub ctest: PathBuf,
}

impl Default for Toolchain {
  fn default() -> Self {
    Self {
      cmake: PathBuf::from(DEFAULT_CMAKE),
      ctest: PathBuf::from(DEFAULT_CTEST),
    }
  }
}

/// Everything a pipeline run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
  /// Build shared libraries instead of static ones.
  pub shared_libs: bool,
  /// Keep an existing build directory instead of wiping it.
  pub preserve_build_dir: bool,
  pub build_type: BuildType,
  pub generator: Generator,
  pub build_dir: PathBuf,
  /// Directory holding the root `CMakeLists.txt`.
  pub source_dir: PathBuf,
  pub toolchain: Toolchain,
}

impl Default for PipelineOptions {
  fn default() -> Self {
    Self {
      shared_libs: false,
      preserve_build_dir: false,
      build_type: BuildType::default(),
      generator: Generator::default(),
      build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
      source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
      toolchain: Toolchain::default(),
    }
  }
}

impl PipelineOptions {
  /// Make the build and source directories absolute against `base`.
  ///
  /// Resolution is purely lexical, so the directories do not need to exist yet.
  /// Tool paths with a directory part are resolved the same way, since steps
  /// run from the build directory; bare tool names stay as given for `PATH`
  /// lookup.
  pub fn resolve(mut self, base: &Path) -> Self {
    self.build_dir = resolve_path(&self.build_dir, base);
    self.source_dir = resolve_path(&self.source_dir, base);
    self.toolchain.cmake = resolve_program(&self.toolchain.cmake, base);
    self.toolchain.ctest = resolve_program(&self.toolchain.ctest, base);
    self
  }
}

fn resolve_program(program: &Path, base: &Path) -> PathBuf {
  if program.components().count() > 1 {
    resolve_path(program, base)
  } else {
    program.to_path_buf()
  }
}
