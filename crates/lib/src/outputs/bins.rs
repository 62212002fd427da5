//! Entry-point links in `$out/bin`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::{ComposeError, LinkedBinary, OutputPaths};
use crate::consts::LIB_DIR;
use crate::manifest::PackageIdentity;
use crate::platform::link::{occupied, symlink};

/// Create `$out/bin/<name> -> ../lib/<entry>` for every declared binary.
///
/// Links always go through `$out/lib`, never straight into `$lib`, so a
/// binary sees the same `node_modules` under either install strategy. They
/// are links under the copy strategy as well. The entry point is made
/// executable.
pub fn link_binaries(
  paths: &OutputPaths,
  identity: &PackageIdentity,
  bins: &BTreeMap<String, PathBuf>,
) -> Result<Vec<LinkedBinary>, ComposeError> {
  let out_bin = paths.out_bin();
  let out_lib = paths.out_lib();
  fs::create_dir_all(&out_bin).map_err(ComposeError::io(&out_bin))?;

  let mut linked = Vec::with_capacity(bins.len());

  for (name, rel) in bins {
    let entry_point = out_lib.join(rel);
    if !entry_point.exists() {
      return Err(ComposeError::MissingEntryPoint {
        name: name.clone(),
        path: entry_point,
      });
    }

    let link = out_bin.join(name);
    if occupied(&link) {
      return Err(ComposeError::DestinationExists(link));
    }

    let target = Path::new("..").join(LIB_DIR).join(rel);
    symlink(&target, &link).map_err(ComposeError::io(&link))?;
    make_executable(&entry_point)?;

    debug!(package = %identity, bin = %name, target = ?target, "linked binary");
    linked.push(LinkedBinary {
      name: name.clone(),
      link,
      target,
    });
  }

  info!(package = %identity, count = linked.len(), "linked binaries");
  Ok(linked)
}

/// Add execute bits to the file `path` resolves to.
#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), ComposeError> {
  use std::os::unix::fs::PermissionsExt;

  let mut perms = fs::metadata(path).map_err(ComposeError::io(path))?.permissions();
  perms.set_mode(perms.mode() | 0o111);
  fs::set_permissions(path, perms).map_err(ComposeError::io(path))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), ComposeError> {
  Ok(())
}
