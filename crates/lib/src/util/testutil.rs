//! Test utilities for nodebuild-lib.
//!
//! Helpers for laying out package source trees and dependency closures in
//! temporary directories.

use std::path::{Path, PathBuf};

use crate::consts::MANIFEST_FILE;
use crate::outputs::OutputPaths;

/// Write a file, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(path, content).unwrap();
}

/// Create a package source tree at `root` with the given `package.json` body.
pub fn write_package(root: &Path, manifest: &str) -> PathBuf {
  write_file(&root.join(MANIFEST_FILE), manifest);
  root.to_path_buf()
}

/// The `foo@1.0.0` package with a single `foo` binary at `cli.js`.
pub fn foo_package(root: &Path) -> PathBuf {
  write_package(
    root,
    r#"{"name": "foo", "version": "1.0.0", "bin": {"foo": "cli.js"}}"#,
  );
  write_file(&root.join("cli.js"), "#!/usr/bin/env node\nconsole.log('foo');\n");
  root.to_path_buf()
}

/// Output destinations under `base`, none of which exist yet.
pub fn output_paths(base: &Path) -> OutputPaths {
  OutputPaths {
    lib: base.join("lib"),
    deps: base.join("deps"),
    out: base.join("out"),
  }
}
