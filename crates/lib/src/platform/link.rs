//! Symbolic link helpers.
//!
//! Link targets are written verbatim: relative targets stay relative to the
//! directory holding the link.

use std::io;
use std::path::Path;

/// Returns true if `path` itself is a symbolic link (without following it).
pub fn is_symlink(path: &Path) -> bool {
  path
    .symlink_metadata()
    .map(|m| m.file_type().is_symlink())
    .unwrap_or(false)
}

/// Returns true if anything, including a dangling link, occupies `path`.
pub fn occupied(path: &Path) -> bool {
  path.symlink_metadata().is_ok()
}

/// Create a symbolic link at `link` pointing to `target`.
#[cfg(unix)]
pub fn symlink(target: &Path, link: &Path) -> io::Result<()> {
  std::os::unix::fs::symlink(target, link)
}

/// Create a symbolic link at `link` pointing to `target`.
///
/// Windows distinguishes file and directory links, so the target is
/// resolved against the link's parent to pick the right kind.
#[cfg(windows)]
pub fn symlink(target: &Path, link: &Path) -> io::Result<()> {
  let resolved = match link.parent() {
    Some(parent) if target.is_relative() => parent.join(target),
    _ => target.to_path_buf(),
  };

  if resolved.is_dir() {
    std::os::windows::fs::symlink_dir(target, link)
  } else {
    std::os::windows::fs::symlink_file(target, link)
  }
}

/// Remove the link at `path` without touching what it points to.
pub fn remove_link(path: &Path) -> io::Result<()> {
  #[cfg(windows)]
  {
    if path.is_dir() {
      return std::fs::remove_dir(path);
    }
  }

  std::fs::remove_file(path)
}
