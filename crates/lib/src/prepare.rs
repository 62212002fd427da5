//! The `node_modules` preparation phase.
//!
//! Before outputs are written, the materialized dependency closure is linked
//! into the source root as `node_modules`, so that anything running in the
//! source tree (lifecycle scripts of the main package, for instance) can
//! resolve dependencies. The link is a placeholder: composition removes it
//! again before `$lib` is copied.

use std::path::Path;

use tracing::{debug, info};

use crate::consts::NODE_MODULES;
use crate::manifest::PackageJson;
use crate::outputs::ComposeError;
use crate::platform::link::{is_symlink, occupied, symlink};

/// Only the top-level package and packages with install scripts need a
/// `node_modules` in their source tree.
pub fn needs_node_modules(manifest: &PackageJson, is_main: bool) -> bool {
  is_main || manifest.has_lifecycle_scripts()
}

/// Link `closure` into `source_root/node_modules` when the package needs it.
///
/// Returns whether the placeholder is in place afterwards. Re-running with
/// the same closure is a no-op; any other existing `node_modules` entry is a
/// collision.
pub fn prepare_node_modules(
  source_root: &Path,
  closure: Option<&Path>,
  manifest: &PackageJson,
  is_main: bool,
) -> Result<bool, ComposeError> {
  if !needs_node_modules(manifest, is_main) {
    debug!("package needs no node_modules in its source tree");
    return Ok(false);
  }

  let Some(closure) = closure.filter(|c| c.exists()) else {
    debug!("no dependency closure to link");
    return Ok(false);
  };

  let placeholder = source_root.join(NODE_MODULES);
  if occupied(&placeholder) {
    if is_symlink(&placeholder) && std::fs::read_link(&placeholder).ok().as_deref() == Some(closure) {
      return Ok(true);
    }
    return Err(ComposeError::DestinationExists(placeholder));
  }

  symlink(closure, &placeholder).map_err(ComposeError::io(&placeholder))?;
  info!(closure = ?closure, "linked node_modules");
  Ok(true)
}
