//! Host platform detection and package compatibility checks.

pub mod arch;
pub mod compat;
pub mod link;
pub mod os;

use arch::Arch;
use os::Os;
use std::fmt;

/// Host identifier combining OS and CPU (e.g., "linux-x64")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
  pub os: Os,
  pub arch: Arch,
}

impl Platform {
  pub fn new(os: Os, arch: Arch) -> Self {
    Self { os, arch }
  }

  /// Detect the platform this process runs on
  pub fn current() -> Self {
    Self {
      os: Os::current(),
      arch: Arch::current(),
    }
  }

  /// Returns the `<os>-<cpu>` pair string (e.g., "darwin-arm64")
  pub fn pair(&self) -> String {
    format!("{}-{}", self.os, self.arch)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.pair())
  }
}
