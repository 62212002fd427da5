use std::path::PathBuf;

use clap::Args;

use nodebuild_lib::config::ConfigOverrides;

mod build;
mod check_platform;
mod info;
mod make_outputs;
mod node_modules;

pub use build::cmd_build;
pub use check_platform::cmd_check_platform;
pub use info::cmd_info;
pub use make_outputs::cmd_make_outputs;
pub use node_modules::cmd_node_modules;

/// Build parameters. Unset values fall back to the build environment.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
  /// Package source root [default: current directory]
  #[arg(long)]
  pub source: Option<PathBuf>,

  /// Materialized dependency closure [env: NODEBUILD_NODE_MODULES]
  #[arg(long)]
  pub node_modules: Option<PathBuf>,

  /// Destination of the bare package [env: lib]
  #[arg(long)]
  pub lib: Option<PathBuf>,

  /// Destination of the dependency closure [env: deps]
  #[arg(long)]
  pub deps: Option<PathBuf>,

  /// Destination of the composed installation [env: out]
  #[arg(long)]
  pub out: Option<PathBuf>,

  /// How out/lib is assembled: copy or symlink [env: installMethod]
  #[arg(long)]
  pub install_method: Option<String>,

  /// Treat the package as the top-level package of the build [env: isMain]
  #[arg(long)]
  pub main: bool,
}

impl ConfigArgs {
  pub fn overrides(&self) -> ConfigOverrides {
    ConfigOverrides {
      source_root: self.source.clone(),
      node_modules: self.node_modules.clone(),
      lib: self.lib.clone(),
      deps: self.deps.clone(),
      out: self.out.clone(),
      install_method: self.install_method.clone(),
      is_main: self.main.then_some(true),
    }
  }
}
