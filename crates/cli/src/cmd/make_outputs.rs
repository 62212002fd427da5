//! Implementation of the `nodebuild make-outputs` command.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use nodebuild_lib::config::BuildConfig;
use nodebuild_lib::manifest::PackageJson;
use nodebuild_lib::pipeline::make_outputs;

use super::ConfigArgs;
use super::build::print_report;
use crate::output::OutputFormat;

/// Writes `$lib`, `$deps` and `$out` and links the declared binaries.
///
/// Configuration is resolved in full before anything is written, so an
/// unknown install method or a missing output path changes nothing on disk.
pub fn cmd_make_outputs(args: &ConfigArgs, format: OutputFormat) -> Result<()> {
  let config = BuildConfig::resolve(&args.overrides()).context("Invalid build configuration")?;
  debug!(config = ?config, "resolved build configuration");
  let manifest = PackageJson::load(&config.source_root).context("Failed to read package manifest")?;

  let started = Instant::now();
  let report = make_outputs(&config, &manifest).context("make outputs failed")?;

  print_report(&report, started.elapsed(), format)
}
