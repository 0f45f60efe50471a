//! Lexical path resolution.

use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `base`, collapsing `.` and `..` components.
///
/// The filesystem is never consulted, so symlinks are not followed and the
/// path does not have to exist.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
  let full_path = if path.is_absolute() {
    path.to_path_buf()
  } else {
    base.join(path)
  };

  dunce::simplified(&normalize_path(&full_path)).to_path_buf()
}

/// Normalize a path by resolving `.` and `..` components without requiring the path to exist
fn normalize_path(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in path.components() {
    match component {
      Component::ParentDir => {
        normalized.pop();
      }
      Component::CurDir => {}
      other => normalized.push(other),
    }
  }
  normalized
}
