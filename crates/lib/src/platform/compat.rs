//! Package compatibility matching.
//!
//! A package restricts where it may be installed through the `os` and `cpu`
//! lists of its manifest. Each list is matched on its own:
//!
//! - an empty list allows every value
//! - `!name` blocks `name`, even if it is listed positively as well
//! - if any positive entry exists, the host value must be one of them

use serde::{Deserialize, Serialize};

use super::Platform;

/// The `os`/`cpu` restrictions a package declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compatibility {
  #[serde(default)]
  pub os: Vec<String>,
  #[serde(default)]
  pub cpu: Vec<String>,
}

impl Compatibility {
  pub fn new(os: Vec<String>, cpu: Vec<String>) -> Self {
    Self { os, cpu }
  }

  /// Returns true if the package can be installed on `host`.
  pub fn allows(&self, host: &Platform) -> bool {
    list_allows(&self.os, host.os.as_str()) && list_allows(&self.cpu, host.arch.as_str())
  }
}

fn list_allows(list: &[String], value: &str) -> bool {
  let mut has_positive = false;
  let mut matched = false;

  for entry in list {
    match entry.strip_prefix('!') {
      Some(blocked) if blocked == value => return false,
      Some(_) => {}
      None => {
        has_positive = true;
        matched |= entry == value;
      }
    }
  }

  !has_positive || matched
}
