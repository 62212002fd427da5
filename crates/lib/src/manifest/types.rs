use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MANIFEST_FILE;
use crate::platform::compat::Compatibility;

/// Scripts that npm runs while installing a package.
const LIFECYCLE_SCRIPTS: &[&str] = &[
  "preinstall",
  "install",
  "postinstall",
  "prepublish",
  "preprepare",
  "prepare",
  "postprepare",
];

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("manifest not found: {0}")]
  NotFound(PathBuf),

  #[error("failed to read manifest {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse manifest {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("manifest is missing required field `{0}`")]
  MissingField(&'static str),

  #[error("invalid binary name `{0}`")]
  InvalidBinName(String),

  #[error("binary `{0}` is declared more than once")]
  DuplicateBin(String),

  #[error("binary `{name}` points outside the package: {path}")]
  InvalidBinPath { name: String, path: String },
}

/// Name and version of a package. Never changes once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageIdentity {
  pub name: String,
  pub version: String,
}

impl std::fmt::Display for PackageIdentity {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}@{}", self.name, self.version)
  }
}

/// The `bin` field: either one path named after the package, or a map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BinField {
  Single(String),
  Map(BTreeMap<String, String>),
}

/// The subset of `package.json` the build reads.
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageJson {
  pub name: Option<String>,
  pub version: Option<String>,
  #[serde(default)]
  pub bin: Option<BinField>,
  #[serde(default)]
  pub scripts: BTreeMap<String, serde_json::Value>,
  #[serde(default)]
  pub os: Vec<String>,
  #[serde(default)]
  pub cpu: Vec<String>,
}

impl PackageJson {
  /// Load `package.json` from a package root directory.
  pub fn load(package_root: &Path) -> Result<Self, ManifestError> {
    let path = package_root.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&path).map_err(|source| {
      if source.kind() == std::io::ErrorKind::NotFound {
        ManifestError::NotFound(path.clone())
      } else {
        ManifestError::Read {
          path: path.clone(),
          source,
        }
      }
    })?;

    serde_json::from_str(&content).map_err(|source| ManifestError::Parse { path, source })
  }

  pub fn identity(&self) -> Result<PackageIdentity, ManifestError> {
    Ok(PackageIdentity {
      name: self.name.clone().ok_or(ManifestError::MissingField("name"))?,
      version: self.version.clone().ok_or(ManifestError::MissingField("version"))?,
    })
  }

  /// Declared binaries, keyed by binary name, with paths relative to the
  /// package root.
  ///
  /// A string `bin` is named after the package with any scope removed
  /// (`@scope/tool` installs `tool`); map keys lose a leading scope the same
  /// way. A name that still contains a path separator, or that collides with
  /// another declared name, is rejected. Leading `./` is dropped and paths
  /// that would leave the package root are rejected.
  pub fn bins(&self) -> Result<BTreeMap<String, PathBuf>, ManifestError> {
    let mut bins = BTreeMap::new();

    match &self.bin {
      None => {}
      Some(BinField::Single(path)) => {
        let package = self.name.as_deref().ok_or(ManifestError::MissingField("name"))?;
        let name = bin_name(package)?;
        let rel = normalize_bin_path(&name, path)?;
        bins.insert(name, rel);
      }
      Some(BinField::Map(map)) => {
        for (key, path) in map {
          let name = bin_name(key)?;
          let rel = normalize_bin_path(&name, path)?;
          if bins.insert(name.clone(), rel).is_some() {
            return Err(ManifestError::DuplicateBin(name));
          }
        }
      }
    }

    Ok(bins)
  }

  /// Returns true if any install-time lifecycle script is declared.
  pub fn has_lifecycle_scripts(&self) -> bool {
    LIFECYCLE_SCRIPTS.iter().any(|s| self.scripts.contains_key(*s))
  }

  pub fn compatibility(&self) -> Compatibility {
    Compatibility::new(self.os.clone(), self.cpu.clone())
  }
}

/// A declared name with its `@scope/` prefix removed.
fn bin_name(raw: &str) -> Result<String, ManifestError> {
  let name = match raw.strip_prefix('@') {
    Some(scoped) => scoped.split_once('/').map_or(raw, |(_, rest)| rest),
    None => raw,
  };
  if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
    return Err(ManifestError::InvalidBinName(raw.to_string()));
  }
  Ok(name.to_string())
}

fn normalize_bin_path(name: &str, raw: &str) -> Result<PathBuf, ManifestError> {
  let invalid = || ManifestError::InvalidBinPath {
    name: name.to_string(),
    path: raw.to_string(),
  };

  let mut normalized = PathBuf::new();
  for component in Path::new(raw).components() {
    match component {
      Component::CurDir => {}
      Component::Normal(part) => normalized.push(part),
      Component::ParentDir => {
        if !normalized.pop() {
          return Err(invalid());
        }
      }
      Component::RootDir | Component::Prefix(_) => return Err(invalid()),
    }
  }

  if normalized.as_os_str().is_empty() {
    return Err(invalid());
  }
  Ok(normalized)
}
