//! Installation strategy selection.
//!
//! The strategy decides how `out/lib` is assembled: either a full physical
//! copy of `lib` and `deps`, or a layer of symbolic links into them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrategyError {
  #[error("unknown install method `{0}` (expected `copy` or `symlink`)")]
  Unknown(String),
}

/// How the composed `out/lib` tree is built. Fixed for a whole build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallStrategy {
  /// Physically duplicate `lib` and `deps` into `out/lib`.
  Copy,
  /// Link every top-level entry of `lib`, and `deps` itself, into `out/lib`.
  #[default]
  Symlink,
}

impl InstallStrategy {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Copy => "copy",
      Self::Symlink => "symlink",
    }
  }
}

impl FromStr for InstallStrategy {
  type Err = StrategyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "copy" => Ok(Self::Copy),
      "symlink" | "reference" => Ok(Self::Symlink),
      other => Err(StrategyError::Unknown(other.to_string())),
    }
  }
}

impl fmt::Display for InstallStrategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Resolve the configured install method.
///
/// An absent value selects [`InstallStrategy::Symlink`]. A present value must
/// name one of the known strategies exactly.
pub fn resolve_strategy(value: Option<&str>) -> Result<InstallStrategy, StrategyError> {
  match value {
    None => Ok(InstallStrategy::default()),
    Some(literal) => literal.parse(),
  }
}
