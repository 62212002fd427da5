//! The build phases, in the order a build runs them.
//!
//! 1. [`check_platform`] rejects hosts the package does not support
//! 2. [`prepare_node_modules`] links the dependency closure into the source
//! 3. [`make_outputs`] writes `$lib`, `$deps` and `$out`, then links binaries

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::BuildConfig;
use crate::consts::EXIT_PLATFORM_INCOMPATIBLE;
use crate::manifest::{ManifestError, PackageIdentity, PackageJson};
use crate::outputs::{ComposeError, LinkedBinary, OutputSet, compose_outputs, link_binaries};
use crate::platform::Platform;
use crate::prepare::prepare_node_modules;

#[derive(Debug, Error)]
pub enum BuildError {
  #[error("{package} does not support platform {host} (os: {os:?}, cpu: {cpu:?})")]
  PlatformIncompatible {
    package: String,
    host: String,
    os: Vec<String>,
    cpu: Vec<String>,
  },

  #[error(transparent)]
  Manifest(#[from] ManifestError),

  #[error(transparent)]
  Compose(#[from] ComposeError),
}

impl BuildError {
  /// Process exit status for this failure.
  pub fn exit_code(&self) -> u8 {
    match self {
      BuildError::PlatformIncompatible { .. } => EXIT_PLATFORM_INCOMPATIBLE,
      _ => 1,
    }
  }
}

/// Summary of a finished build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
  pub package: PackageIdentity,
  pub outputs: OutputSet,
  pub binaries: Vec<LinkedBinary>,
}

/// Fail with [`BuildError::PlatformIncompatible`] unless `host` satisfies the
/// manifest's `os`/`cpu` restrictions.
pub fn check_platform(manifest: &PackageJson, host: &Platform) -> Result<(), BuildError> {
  let compat = manifest.compatibility();
  if compat.allows(host) {
    info!(host = %host, "platform compatible");
    return Ok(());
  }

  let package = manifest.name.clone().unwrap_or_else(|| "package".to_string());
  warn!(package = %package, host = %host, os = ?compat.os, cpu = ?compat.cpu, "platform incompatible");
  Err(BuildError::PlatformIncompatible {
    package,
    host: host.to_string(),
    os: compat.os,
    cpu: compat.cpu,
  })
}

/// Compose the outputs and link the declared binaries.
///
/// Identity and binaries are read from the manifest first, so a broken
/// manifest fails the build before any output is written.
pub fn make_outputs(config: &BuildConfig, manifest: &PackageJson) -> Result<BuildReport, BuildError> {
  let package = manifest.identity()?;
  let bins = manifest.bins()?;

  info!(package = %package, strategy = %config.strategy, "making outputs");

  let outputs = compose_outputs(
    &config.source_root,
    config.node_modules.as_deref(),
    config.strategy,
    &config.outputs,
  )?;
  let binaries = link_binaries(&config.outputs, &package, &bins)?;

  Ok(BuildReport {
    package,
    outputs,
    binaries,
  })
}

/// Run every phase against `host`.
pub fn run_build(config: &BuildConfig, host: &Platform) -> Result<BuildReport, BuildError> {
  let manifest = PackageJson::load(&config.source_root)?;

  check_platform(&manifest, host)?;
  prepare_node_modules(
    &config.source_root,
    config.node_modules.as_deref(),
    &manifest,
    config.is_main,
  )?;
  make_outputs(config, &manifest)
}
