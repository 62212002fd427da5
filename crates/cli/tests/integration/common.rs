//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated build environment.
///
/// Each test gets its own temporary directory holding the package source,
/// an optional dependency closure, and the three output destinations.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// The `foo@1.0.0` package with one binary `foo` at `cli.js`.
  pub fn foo() -> Self {
    let env = Self::new();
    env.write_source(
      "package.json",
      r#"{"name": "foo", "version": "1.0.0", "bin": {"foo": "cli.js"}}"#,
    );
    env.write_source("cli.js", "#!/usr/bin/env node\nconsole.log('foo');\n");
    env
  }

  fn base(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap_or_else(|_| self.temp.path().to_path_buf())
  }

  pub fn source_path(&self) -> PathBuf {
    self.base().join("source")
  }

  pub fn closure_path(&self) -> PathBuf {
    self.base().join("closure")
  }

  pub fn lib_path(&self) -> PathBuf {
    self.base().join("lib")
  }

  pub fn deps_path(&self) -> PathBuf {
    self.base().join("deps")
  }

  pub fn out_path(&self) -> PathBuf {
    self.base().join("out")
  }

  /// Write a file relative to the package source root.
  pub fn write_source(&self, relative_path: &str, content: &str) {
    write(&self.source_path().join(relative_path), content);
  }

  /// Write a file relative to the dependency closure.
  pub fn write_closure(&self, relative_path: &str, content: &str) {
    write(&self.closure_path().join(relative_path), content);
  }

  /// Get a Command for the nodebuild binary, run from the source root.
  ///
  /// Output paths are passed through the environment, the way a derivation
  /// builder receives them:
  /// - `lib`, `deps`, `out`: isolated output destinations
  /// - `NODEBUILD_NODE_MODULES`: the closure path
  /// - `installMethod`, `isMain`: cleared, tests set them explicitly
  pub fn nodebuild_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("nodebuild");
    cmd.current_dir(self.source_path());
    cmd.env("lib", self.lib_path());
    cmd.env("deps", self.deps_path());
    cmd.env("out", self.out_path());
    cmd.env("NODEBUILD_NODE_MODULES", self.closure_path());
    cmd.env_remove("installMethod");
    cmd.env_remove("isMain");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}

fn write(path: &Path, content: &str) {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(path, content).unwrap();
}

pub fn is_symlink(path: &Path) -> bool {
  path
    .symlink_metadata()
    .map(|m| m.file_type().is_symlink())
    .unwrap_or(false)
}
