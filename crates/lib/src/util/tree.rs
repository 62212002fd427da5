//! Link-preserving directory tree duplication.
//!
//! [`copy_tree`] copies regular files, recreates symbolic links with their
//! original target text, and refuses to copy a tree that contains a link
//! pointing at nothing. The source is checked in full before the destination
//! is created, so a dangling link never leaves a half-written copy behind.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::platform::link::{is_symlink, occupied, symlink};

#[derive(Debug, Error)]
pub enum TreeError {
  #[error("dangling symlink {link} -> {target}")]
  DanglingSymlink { link: PathBuf, target: PathBuf },

  #[error("destination already exists: {0}")]
  DestinationExists(PathBuf),

  #[error("not a directory: {0}")]
  NotADirectory(PathBuf),

  #[error("failed to traverse {path}: {source}")]
  WalkDir {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },

  #[error("io error at {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl TreeError {
  pub(crate) fn io(path: &Path) -> impl FnOnce(io::Error) -> TreeError + '_ {
    move |source| TreeError::Io {
      path: path.to_path_buf(),
      source,
    }
  }
}

/// Counts of what a copy wrote.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CopyStats {
  pub files: u64,
  pub dirs: u64,
  pub symlinks: u64,
  pub bytes: u64,
}

/// Fail with [`TreeError::DanglingSymlink`] on the first link under `root`
/// whose target does not exist.
pub fn check_links(root: &Path) -> Result<(), TreeError> {
  for entry in walk(root) {
    let entry = entry.map_err(|source| TreeError::WalkDir {
      path: root.to_path_buf(),
      source,
    })?;

    if entry.depth() == 0 || !entry.path_is_symlink() {
      continue;
    }

    let link = entry.path();
    if let Err(err) = fs::metadata(link) {
      if err.kind() != io::ErrorKind::NotFound {
        return Err(TreeError::Io {
          path: link.to_path_buf(),
          source: err,
        });
      }
      let target = fs::read_link(link).map_err(TreeError::io(link))?;
      return Err(TreeError::DanglingSymlink {
        link: link.to_path_buf(),
        target,
      });
    }
  }

  Ok(())
}

/// Duplicate `src` into `dst`, which must not exist yet.
///
/// Symbolic links inside `src` are recreated verbatim, never followed; `src`
/// itself may be a link to a directory. Directory permissions are applied
/// after their contents are written so read-only sources copy cleanly.
///
/// A relative link that resolved in `src` can point outside the copied tree
/// and dangle at `dst`, so the written copy is checked as well.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<CopyStats, TreeError> {
  if occupied(dst) {
    return Err(TreeError::DestinationExists(dst.to_path_buf()));
  }

  let root = resolve_root(src)?;
  check_links(&root)?;
  check_relocated_links(&root, dst)?;

  if let Some(parent) = dst.parent() {
    fs::create_dir_all(parent).map_err(TreeError::io(parent))?;
  }

  let mut stats = CopyStats::default();
  let mut dir_permissions = Vec::new();

  for entry in walk(&root) {
    let entry = entry.map_err(|source| TreeError::WalkDir {
      path: root.clone(),
      source,
    })?;

    let target = match entry.path().strip_prefix(&root) {
      Ok(rel) if !rel.as_os_str().is_empty() => dst.join(rel),
      _ => dst.to_path_buf(),
    };

    if entry.depth() == 0 {
      let metadata = fs::metadata(&root).map_err(TreeError::io(&root))?;
      if !metadata.is_dir() {
        return Err(TreeError::NotADirectory(src.to_path_buf()));
      }
      fs::create_dir(&target).map_err(TreeError::io(&target))?;
      dir_permissions.push((target, metadata.permissions()));
      stats.dirs += 1;
    } else if entry.path_is_symlink() {
      let link_target = fs::read_link(entry.path()).map_err(TreeError::io(entry.path()))?;
      symlink(&link_target, &target).map_err(TreeError::io(&target))?;
      stats.symlinks += 1;
    } else if entry.file_type().is_dir() {
      fs::create_dir(&target).map_err(TreeError::io(&target))?;
      let metadata = fs::metadata(entry.path()).map_err(TreeError::io(entry.path()))?;
      dir_permissions.push((target, metadata.permissions()));
      stats.dirs += 1;
    } else {
      stats.bytes += fs::copy(entry.path(), &target).map_err(TreeError::io(&target))?;
      stats.files += 1;
    }
  }

  // deepest first, so a read-only parent is locked only after its children
  for (dir, permissions) in dir_permissions.into_iter().rev() {
    fs::set_permissions(&dir, permissions).map_err(TreeError::io(&dir))?;
  }

  debug!(
    src = ?src,
    dst = ?dst,
    files = stats.files,
    dirs = stats.dirs,
    symlinks = stats.symlinks,
    "copied tree"
  );

  check_links(dst)?;
  Ok(stats)
}

/// Fail on a relative link under `root` that climbs out of it and has
/// nothing at the matching place beside `dst`.
fn check_relocated_links(root: &Path, dst: &Path) -> Result<(), TreeError> {
  for entry in walk(root) {
    let entry = entry.map_err(|source| TreeError::WalkDir {
      path: root.to_path_buf(),
      source,
    })?;

    if entry.depth() == 0 || !entry.path_is_symlink() {
      continue;
    }

    let target = fs::read_link(entry.path()).map_err(TreeError::io(entry.path()))?;
    let Ok(rel) = entry.path().strip_prefix(root) else {
      continue;
    };
    let rel_dir = rel.parent().unwrap_or(Path::new(""));
    if target.is_absolute() || !climbs_out(rel_dir, &target) {
      continue;
    }

    // `dst` does not exist yet, so `..` is resolved lexically
    let mut relocated = dst.join(rel_dir);
    for component in target.components() {
      match component {
        Component::ParentDir => {
          relocated.pop();
        }
        Component::Normal(part) => relocated.push(part),
        _ => {}
      }
    }
    let link = dst.join(rel);
    if fs::metadata(&relocated).is_err() {
      return Err(TreeError::DanglingSymlink { link, target });
    }
  }

  Ok(())
}

/// Whether `target`, read from `dir` (relative to a tree root), leaves the tree.
fn climbs_out(dir: &Path, target: &Path) -> bool {
  let mut depth = dir.components().count();
  for component in target.components() {
    match component {
      Component::ParentDir => match depth.checked_sub(1) {
        Some(up) => depth = up,
        None => return true,
      },
      Component::Normal(_) => depth += 1,
      _ => {}
    }
  }
  false
}

/// A root given as a link is walked through its target.
fn resolve_root(src: &Path) -> Result<PathBuf, TreeError> {
  if is_symlink(src) {
    fs::canonicalize(src).map_err(TreeError::io(src))
  } else {
    Ok(src.to_path_buf())
  }
}

fn walk(root: &Path) -> walkdir::IntoIter {
  WalkDir::new(root)
    .follow_links(false)
    .follow_root_links(true)
    .sort_by_file_name()
    .into_iter()
}
