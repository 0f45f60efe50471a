//! Build directory preparation.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::PipelineError;

/// What [`prepare_build_dir`] did to the build directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildDirState {
  /// The directory did not exist and was created, parents included.
  Created,
  /// The directory existed and was replaced by an empty one.
  Cleared,
  /// The directory existed and was left untouched.
  Preserved,
}

impl BuildDirState {
  pub fn as_str(self) -> &'static str {
    match self {
      BuildDirState::Created => "created",
      BuildDirState::Cleared => "cleared",
      BuildDirState::Preserved => "preserved",
    }
  }
}

/// Make sure `path` exists as a directory before the configure step runs.
///
/// - Missing: created along with any parents.
/// - Present and `preserve` unset: removed recursively and recreated empty.
/// - Present and `preserve` set: left as is.
///
/// An existing path that is not a directory is an error either way.
pub async fn prepare_build_dir(path: &Path, preserve: bool) -> Result<BuildDirState, PipelineError> {
  let wrap = |source: io::Error| PipelineError::PrepareBuildDir {
    path: path.to_path_buf(),
    source,
  };

  let exists = tokio::fs::try_exists(path).await.map_err(wrap)?;

  if !exists {
    debug!(path = %path.display(), "creating build directory");
    tokio::fs::create_dir_all(path).await.map_err(wrap)?;
    return Ok(BuildDirState::Created);
  }

  let metadata = tokio::fs::metadata(path).await.map_err(wrap)?;
  if !metadata.is_dir() {
    return Err(wrap(io::Error::other("path exists and is not a directory")));
  }

  if preserve {
    debug!(path = %path.display(), "keeping existing build directory");
    return Ok(BuildDirState::Preserved);
  }

  debug!(path = %path.display(), "clearing build directory");
  tokio::fs::remove_dir_all(path).await.map_err(wrap)?;
  tokio::fs::create_dir_all(path).await.map_err(wrap)?;
  Ok(BuildDirState::Cleared)
}
