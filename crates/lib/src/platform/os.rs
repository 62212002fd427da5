use std::fmt;

/// Operating systems, named the way Node's `process.platform` names them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  Darwin,
  Win32,
  FreeBsd,
  OpenBsd,
  NetBsd,
  Android,
  SunOs,
  Aix,
  /// Anything Node has no name for; carries Rust's own identifier.
  Other(String),
}

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Self {
    Self::from_rust(std::env::consts::OS)
  }

  /// Map a Rust `target_os` identifier to its Node equivalent
  pub fn from_rust(os: &str) -> Self {
    match os {
      "linux" => Self::Linux,
      "macos" => Self::Darwin,
      "windows" => Self::Win32,
      "freebsd" => Self::FreeBsd,
      "openbsd" => Self::OpenBsd,
      "netbsd" => Self::NetBsd,
      "android" => Self::Android,
      "solaris" | "illumos" => Self::SunOs,
      "aix" => Self::Aix,
      other => Self::Other(other.to_string()),
    }
  }

  /// Returns the identifier used in `package.json` `os` lists
  pub fn as_str(&self) -> &str {
    match self {
      Self::Linux => "linux",
      Self::Darwin => "darwin",
      Self::Win32 => "win32",
      Self::FreeBsd => "freebsd",
      Self::OpenBsd => "openbsd",
      Self::NetBsd => "netbsd",
      Self::Android => "android",
      Self::SunOs => "sunos",
      Self::Aix => "aix",
      Self::Other(name) => name,
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
