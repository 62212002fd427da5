//! Implementation of the `nodebuild check-platform` command.

use anyhow::{Context, Result};

use nodebuild_lib::manifest::PackageJson;
use nodebuild_lib::pipeline::check_platform;
use nodebuild_lib::platform::Platform;

use super::ConfigArgs;
use crate::output::{Status, status};

/// Fails with the platform error (exit status 3) if the package's `os`/`cpu`
/// restrictions exclude this host.
pub fn cmd_check_platform(args: &ConfigArgs) -> Result<()> {
  let source = args.overrides().source_root()?;
  let manifest = PackageJson::load(&source).context("Failed to read package manifest")?;
  let host = Platform::current();

  check_platform(&manifest, &host).context("check platform failed")?;

  status(Status::Done, &format!("Platform {} is supported", host));
  Ok(())
}
