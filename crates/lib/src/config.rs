//! Build configuration.
//!
//! Every parameter of a build is fixed for one invocation. The build
//! environment provides them as environment variables (the output paths are
//! named after the outputs, as derivation builders expect); explicit values
//! take precedence. Only [`ConfigOverrides`] reads the environment: the phases
//! themselves receive a resolved [`BuildConfig`].

use std::path::PathBuf;

use thiserror::Error;

use crate::outputs::OutputPaths;
use crate::strategy::{InstallStrategy, StrategyError, resolve_strategy};

pub const ENV_LIB: &str = "lib";
pub const ENV_DEPS: &str = "deps";
pub const ENV_OUT: &str = "out";
pub const ENV_INSTALL_METHOD: &str = "installMethod";
pub const ENV_IS_MAIN: &str = "isMain";
pub const ENV_NODE_MODULES: &str = "NODEBUILD_NODE_MODULES";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("output path `{0}` is not set (pass --{0} or set ${0})")]
  MissingOutput(&'static str),

  #[error("invalid value `{value}` for {name} (expected true/false or 1/0)")]
  InvalidFlag { name: &'static str, value: String },

  #[error(transparent)]
  Strategy(#[from] StrategyError),

  #[error("failed to determine current directory: {0}")]
  CurrentDir(#[source] std::io::Error),
}

/// Explicitly supplied parameters. Anything left `None` falls back to the
/// environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
  pub source_root: Option<PathBuf>,
  pub node_modules: Option<PathBuf>,
  pub lib: Option<PathBuf>,
  pub deps: Option<PathBuf>,
  pub out: Option<PathBuf>,
  pub install_method: Option<String>,
  pub is_main: Option<bool>,
}

impl ConfigOverrides {
  /// Package source root; defaults to the working directory.
  pub fn source_root(&self) -> Result<PathBuf, ConfigError> {
    match &self.source_root {
      Some(path) => Ok(path.clone()),
      None => std::env::current_dir().map_err(ConfigError::CurrentDir),
    }
  }

  pub fn node_modules(&self) -> Option<PathBuf> {
    self.node_modules.clone().or_else(|| env_path(ENV_NODE_MODULES))
  }

  pub fn is_main(&self) -> Result<bool, ConfigError> {
    if let Some(flag) = self.is_main {
      return Ok(flag);
    }
    match std::env::var(ENV_IS_MAIN) {
      Ok(value) => parse_flag(ENV_IS_MAIN, &value),
      Err(_) => Ok(false),
    }
  }

  pub fn strategy(&self) -> Result<InstallStrategy, ConfigError> {
    let value = self
      .install_method
      .clone()
      .or_else(|| std::env::var(ENV_INSTALL_METHOD).ok());
    Ok(resolve_strategy(value.as_deref())?)
  }

  pub fn outputs(&self) -> Result<OutputPaths, ConfigError> {
    Ok(OutputPaths {
      lib: output(&self.lib, ENV_LIB)?,
      deps: output(&self.deps, ENV_DEPS)?,
      out: output(&self.out, ENV_OUT)?,
    })
  }
}

/// Fully resolved parameters of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
  pub source_root: PathBuf,
  /// Materialized dependency closure; `None` when the package has none.
  pub node_modules: Option<PathBuf>,
  pub outputs: OutputPaths,
  pub strategy: InstallStrategy,
  /// Whether this is the top-level package of the build.
  pub is_main: bool,
}

impl BuildConfig {
  /// Resolve every parameter. Fails before anything touches the filesystem
  /// if the install method is unknown or an output path is missing.
  pub fn resolve(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
    Ok(Self {
      strategy: overrides.strategy()?,
      outputs: overrides.outputs()?,
      source_root: overrides.source_root()?,
      node_modules: overrides.node_modules(),
      is_main: overrides.is_main()?,
    })
  }
}

fn env_path(name: &str) -> Option<PathBuf> {
  std::env::var_os(name)
    .filter(|value| !value.is_empty())
    .map(PathBuf::from)
}

fn output(explicit: &Option<PathBuf>, name: &'static str) -> Result<PathBuf, ConfigError> {
  explicit
    .clone()
    .or_else(|| env_path(name))
    .ok_or(ConfigError::MissingOutput(name))
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
  match value {
    "1" | "true" => Ok(true),
    "" | "0" | "false" => Ok(false),
    other => Err(ConfigError::InvalidFlag {
      name,
      value: other.to_string(),
    }),
  }
}
