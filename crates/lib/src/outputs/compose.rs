//! Writes `$lib`, `$deps` and `$out` from a source root and a dependency closure.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::types::{ComposeError, OutputPaths, OutputSet};
use crate::consts::NODE_MODULES;
use crate::platform::link::{is_symlink, occupied, remove_link, symlink};
use crate::strategy::InstallStrategy;
use crate::util::tree::{CopyStats, copy_tree};

/// Compose all three outputs.
///
/// `deps_tree` is the materialized dependency closure, or `None` for a
/// package without dependencies. A closure path that does not exist is
/// treated the same as `None`.
///
/// None of `$lib`, `$deps` or `$out` may exist beforehand; an occupied
/// destination fails the build before anything is written.
///
/// Phases run in a fixed order and the first failure aborts the build:
///
/// 1. `$deps` is copied from the closure (links preserved) or created empty
/// 2. the `node_modules` placeholder link is removed from the source root
/// 3. `$lib` is copied from the source root
/// 4. `$out/bin` is created and `$out/lib` assembled per `strategy`
pub fn compose_outputs(
  source_root: &Path,
  deps_tree: Option<&Path>,
  strategy: InstallStrategy,
  paths: &OutputPaths,
) -> Result<OutputSet, ComposeError> {
  info!(
    strategy = %strategy,
    lib = ?paths.lib,
    deps = ?paths.deps,
    out = ?paths.out,
    "composing outputs"
  );

  for dest in [&paths.lib, &paths.deps, &paths.out] {
    if occupied(dest) {
      return Err(ComposeError::DestinationExists(dest.clone()));
    }
  }

  let deps = populate_deps(deps_tree, &paths.deps)?;

  remove_placeholder(source_root)?;
  let lib = copy_tree(source_root, &paths.lib)?;

  let out_bin = paths.out_bin();
  fs::create_dir_all(&out_bin).map_err(ComposeError::io(&out_bin))?;

  match strategy {
    InstallStrategy::Copy => copy_layout(paths)?,
    InstallStrategy::Symlink => link_layout(paths)?,
  }

  Ok(OutputSet {
    paths: paths.clone(),
    strategy,
    lib,
    deps,
  })
}

fn populate_deps(deps_tree: Option<&Path>, dest: &Path) -> Result<CopyStats, ComposeError> {
  match deps_tree {
    Some(tree) if tree.exists() => {
      debug!(tree = ?tree, "copying dependency closure");
      Ok(copy_tree(tree, dest)?)
    }
    _ => {
      debug!(deps = ?dest, "no dependency closure, creating empty deps");
      if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(ComposeError::io(parent))?;
      }
      fs::create_dir(dest).map_err(ComposeError::io(dest))?;
      Ok(CopyStats::default())
    }
  }
}

/// Drop the `node_modules` link left by the preparation phase.
///
/// Only a link is removed; a real `node_modules` directory belongs to the
/// package source and is kept.
fn remove_placeholder(source_root: &Path) -> Result<(), ComposeError> {
  let placeholder = source_root.join(NODE_MODULES);
  if is_symlink(&placeholder) {
    debug!(path = ?placeholder, "removing node_modules placeholder");
    remove_link(&placeholder).map_err(ComposeError::io(&placeholder))?;
  }
  Ok(())
}

fn copy_layout(paths: &OutputPaths) -> Result<(), ComposeError> {
  copy_tree(&paths.lib, &paths.out_lib())?;
  copy_tree(&paths.deps, &paths.out_node_modules())?;
  Ok(())
}

/// One link per top-level `$lib` entry, so other files can later be overlaid
/// into `$out/lib` without touching `$lib`.
fn link_layout(paths: &OutputPaths) -> Result<(), ComposeError> {
  let out_lib = paths.out_lib();
  fs::create_dir_all(&out_lib).map_err(ComposeError::io(&out_lib))?;

  let lib_root = std::path::absolute(&paths.lib).map_err(ComposeError::io(&paths.lib))?;
  let deps_root = std::path::absolute(&paths.deps).map_err(ComposeError::io(&paths.deps))?;

  let mut names = fs::read_dir(&lib_root)
    .map_err(ComposeError::io(&lib_root))?
    .map(|entry| entry.map(|e| e.file_name()))
    .collect::<Result<Vec<_>, _>>()
    .map_err(ComposeError::io(&lib_root))?;
  names.sort();

  for name in &names {
    link_entry(&lib_root.join(name), &out_lib.join(name))?;
  }
  link_entry(&deps_root, &paths.out_node_modules())?;

  debug!(entries = names.len(), "linked lib entries");
  Ok(())
}

fn link_entry(target: &Path, link: &Path) -> Result<(), ComposeError> {
  if occupied(link) {
    return Err(ComposeError::DestinationExists(link.to_path_buf()));
  }
  symlink(target, link).map_err(ComposeError::io(link))
}
