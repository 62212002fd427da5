use std::fmt;

/// CPU architectures, named the way Node's `process.arch` names them
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arch {
  X64,
  Arm64,
  Ia32,
  Arm,
  Ppc64,
  S390x,
  Riscv64,
  Loong64,
  Mips,
  Other(String),
}

impl Arch {
  /// Detect the current CPU architecture at runtime
  pub fn current() -> Self {
    Self::from_rust(std::env::consts::ARCH)
  }

  pub fn from_rust(arch: &str) -> Self {
    match arch {
      "x86_64" => Self::X64,
      "aarch64" => Self::Arm64,
      "x86" => Self::Ia32,
      "arm" => Self::Arm,
      "powerpc64" => Self::Ppc64,
      "s390x" => Self::S390x,
      "riscv64" => Self::Riscv64,
      "loongarch64" => Self::Loong64,
      "mips" => Self::Mips,
      other => Self::Other(other.to_string()),
    }
  }

  /// Returns the identifier used in `package.json` `cpu` lists
  pub fn as_str(&self) -> &str {
    match self {
      Self::X64 => "x64",
      Self::Arm64 => "arm64",
      Self::Ia32 => "ia32",
      Self::Arm => "arm",
      Self::Ppc64 => "ppc64",
      Self::S390x => "s390x",
      Self::Riscv64 => "riscv64",
      Self::Loong64 => "loong64",
      Self::Mips => "mips",
      Self::Other(name) => name,
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
