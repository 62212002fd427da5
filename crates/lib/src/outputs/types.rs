use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::consts::{BIN_DIR, LIB_DIR, NODE_MODULES};
use crate::strategy::InstallStrategy;
use crate::util::tree::{CopyStats, TreeError};

/// Errors raised while writing the outputs.
#[derive(Debug, Error)]
pub enum ComposeError {
  #[error(transparent)]
  Tree(#[from] TreeError),

  #[error("destination already exists: {0}")]
  DestinationExists(PathBuf),

  #[error("io error at {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("binary `{name}` points to a missing entry point: {path}")]
  MissingEntryPoint { name: String, path: PathBuf },
}

impl ComposeError {
  pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> ComposeError + '_ {
    move |source| ComposeError::Io {
      path: path.to_path_buf(),
      source,
    }
  }
}

/// Destination paths handed to the build by its environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
  pub lib: PathBuf,
  pub deps: PathBuf,
  pub out: PathBuf,
}

impl OutputPaths {
  /// `$out/bin`, holding one link per declared binary.
  pub fn out_bin(&self) -> PathBuf {
    self.out.join(BIN_DIR)
  }

  /// `$out/lib`, the composed package view.
  pub fn out_lib(&self) -> PathBuf {
    self.out.join(LIB_DIR)
  }

  /// `$out/lib/node_modules`.
  pub fn out_node_modules(&self) -> PathBuf {
    self.out_lib().join(NODE_MODULES)
  }
}

/// The written outputs and what went into them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSet {
  pub paths: OutputPaths,
  pub strategy: InstallStrategy,
  pub lib: CopyStats,
  pub deps: CopyStats,
}

/// One `$out/bin` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedBinary {
  pub name: String,
  /// Location of the link, `$out/bin/<name>`.
  pub link: PathBuf,
  /// Link text, relative to `$out/bin`.
  pub target: PathBuf,
}
