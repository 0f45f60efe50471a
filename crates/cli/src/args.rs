//! Command-line argument definitions.
//!
//! CI scripts call the tool with single-dash long options (`-shared`,
//! `-build_dir out`). clap only understands single-dash for one-letter flags,
//! so those spellings are rewritten to their `--` forms before parsing.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use cmake_ci_lib::options::{DEFAULT_BUILD_DIR, DEFAULT_CMAKE, DEFAULT_CTEST, DEFAULT_SOURCE_DIR};
use cmake_ci_lib::{BuildType, Generator, PipelineOptions, Toolchain};

/// Single-dash spellings and the long option each one stands for.
const SINGLE_DASH_ALIASES: &[(&str, &str)] = &[
  ("-shared", "--is_shared_libs"),
  ("-notclear", "--not_clear_build_dir"),
  ("-build_dir", "--build_dir"),
  ("-source_dir", "--source_dir"),
];

/// cmake-ci - configure, build and test a CMake project
#[derive(Parser, Debug)]
#[command(name = "cmake-ci")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Steps:
  1. Create the build directory (cleared unless --not_clear_build_dir).
  2. Run CMake with the chosen generator to generate the project.
  3. Run CMake to build the project.
  4. Run CTest to execute unit tests.")]
pub struct Cli {
  /// Build shared libraries instead of static ones
  #[arg(long = "is_shared_libs")]
  pub is_shared_libs: bool,

  /// Keep the existing build directory instead of clearing it
  #[arg(long = "not_clear_build_dir")]
  pub not_clear_build_dir: bool,

  /// Build type
  #[arg(long = "build_type", value_enum, default_value_t = BuildType::Debug, env = "CMAKE_CI_BUILD_TYPE")]
  pub build_type: BuildType,

  /// CMake generator
  #[arg(short = 'g', long = "generator", value_enum, default_value_t = Generator::Ninja, env = "CMAKE_CI_GENERATOR")]
  pub generator: Generator,

  /// Relative or absolute path to the build directory
  #[arg(long = "build_dir", default_value = DEFAULT_BUILD_DIR, env = "CMAKE_CI_BUILD_DIR")]
  pub build_dir: PathBuf,

  /// Relative or absolute path to the directory with the root CMakeLists.txt
  #[arg(long = "source_dir", default_value = DEFAULT_SOURCE_DIR, env = "CMAKE_CI_SOURCE_DIR")]
  pub source_dir: PathBuf,

  /// CMake executable used for the configure and build steps
  #[arg(long, default_value = DEFAULT_CMAKE, env = "CMAKE_CI_CMAKE")]
  pub cmake: PathBuf,

  /// CTest executable used for the test step
  #[arg(long, default_value = DEFAULT_CTEST, env = "CMAKE_CI_CTEST")]
  pub ctest: PathBuf,

  /// Enable verbose output
  #[arg(short, long)]
  pub verbose: bool,
}

impl Cli {
  /// Parse the process arguments, accepting single-dash long options.
  pub fn parse_normalized() -> Self {
    Self::parse_from(normalize_args(std::env::args_os()))
  }

  /// Unresolved pipeline options; paths are still as given.
  pub fn pipeline_options(&self) -> PipelineOptions {
    PipelineOptions {
      shared_libs: self.is_shared_libs,
      preserve_build_dir: self.not_clear_build_dir,
      build_type: self.build_type,
      generator: self.generator,
      build_dir: self.build_dir.clone(),
      source_dir: self.source_dir.clone(),
      toolchain: Toolchain {
        cmake: self.cmake.clone(),
        ctest: self.ctest.clone(),
      },
    }
  }
}

/// Rewrite single-dash long options to their `--` spelling.
///
/// Handles both `-build_dir out` and `-build_dir=out`. Everything after a bare
/// `--` is passed through untouched, as are arguments that are not valid UTF-8.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
  I: IntoIterator<Item = OsString>,
{
  let mut out = Vec::new();
  let mut passthrough = false;

  for arg in args {
    if passthrough {
      out.push(arg);
      continue;
    }

    let rewritten = match arg.to_str() {
      Some("--") => {
        passthrough = true;
        None
      }
      Some(s) => rewrite_alias(s),
      None => None,
    };

    out.push(rewritten.map(OsString::from).unwrap_or(arg));
  }

  out
}

fn rewrite_alias(arg: &str) -> Option<String> {
  let (name, value) = match arg.split_once('=') {
    Some((name, value)) => (name, Some(value)),
    None => (arg, None),
  };

  let (_, long) = SINGLE_DASH_ALIASES.iter().find(|(short, _)| *short == name)?;

  Some(match value {
    Some(value) => format!("{}={}", long, value),
    None => long.to_string(),
  })
}
