//! Implementation of the `nodebuild build` command.
//!
//! Runs every phase in order: platform check, node_modules preparation and
//! output composition.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::debug;

use nodebuild_lib::config::BuildConfig;
use nodebuild_lib::pipeline::{BuildReport, run_build};
use nodebuild_lib::platform::Platform;

use super::ConfigArgs;
use crate::output::{OutputFormat, Status, bin_entry, field, human_elapsed, human_size, print_json, status};

pub fn cmd_build(args: &ConfigArgs, format: OutputFormat) -> Result<()> {
  let config = BuildConfig::resolve(&args.overrides()).context("Invalid build configuration")?;
  debug!(config = ?config, "resolved build configuration");

  let started = Instant::now();
  let report = run_build(&config, &Platform::current()).context("build failed")?;

  print_report(&report, started.elapsed(), format)
}

/// Print the summary of a finished build.
pub(super) fn print_report(report: &BuildReport, elapsed: Duration, format: OutputFormat) -> Result<()> {
  if format.is_json() {
    return print_json(report);
  }

  let outputs = &report.outputs;
  status(Status::Done, &format!("Built {}", report.package));
  field("Install method", outputs.strategy.as_str());
  field("lib", &outputs.paths.lib.display().to_string());
  field("deps", &outputs.paths.deps.display().to_string());
  field("out", &outputs.paths.out.display().to_string());
  field(
    "Copied",
    &format!(
      "{} files, {} links ({})",
      outputs.lib.files + outputs.deps.files,
      outputs.lib.symlinks + outputs.deps.symlinks,
      human_size(outputs.lib.bytes + outputs.deps.bytes)
    ),
  );
  field("Binaries", &report.binaries.len().to_string());
  for bin in &report.binaries {
    bin_entry(&bin.name, &bin.target.display().to_string());
  }
  field("Duration", &human_elapsed(elapsed));

  Ok(())
}
