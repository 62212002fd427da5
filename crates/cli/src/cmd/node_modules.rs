//! Implementation of the `nodebuild node-modules` command.

use anyhow::{Context, Result};

use nodebuild_lib::manifest::PackageJson;
use nodebuild_lib::prepare::prepare_node_modules;

use super::ConfigArgs;
use crate::output::{Status, status};

pub fn cmd_node_modules(args: &ConfigArgs) -> Result<()> {
  let overrides = args.overrides();
  let source = overrides.source_root()?;
  let closure = overrides.node_modules();
  let is_main = overrides.is_main()?;

  let manifest = PackageJson::load(&source).context("Failed to read package manifest")?;
  let linked = prepare_node_modules(&source, closure.as_deref(), &manifest, is_main)
    .context("prepare node_modules failed")?;

  if linked {
    status(Status::Done, "Linked node_modules");
  } else {
    status(Status::Skipped, "No node_modules needed");
  }
  Ok(())
}
