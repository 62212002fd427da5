use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nodebuild_lib::consts::APP_NAME;
use nodebuild_lib::pipeline::BuildError;

mod cmd;
mod output;

use cmd::ConfigArgs;
use output::{OutputFormat, Status, status};

/// nodebuild - compose the outputs of a Node.js package build
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format for summaries
  #[arg(long, global = true, value_enum, default_value_t)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Check that the package supports this host (exits 3 if not)
  CheckPlatform {
    #[command(flatten)]
    config: ConfigArgs,
  },

  /// Link the dependency closure into the source tree as node_modules
  NodeModules {
    #[command(flatten)]
    config: ConfigArgs,
  },

  /// Write the lib, deps and out outputs and link binaries
  MakeOutputs {
    #[command(flatten)]
    config: ConfigArgs,
  },

  /// Run all phases: check-platform, node-modules, make-outputs
  Build {
    #[command(flatten)]
    config: ConfigArgs,
  },

  /// Show host platform information
  Info,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let result = match cli.command {
    Commands::CheckPlatform { config } => cmd::cmd_check_platform(&config),
    Commands::NodeModules { config } => cmd::cmd_node_modules(&config),
    Commands::MakeOutputs { config } => cmd::cmd_make_outputs(&config, cli.format),
    Commands::Build { config } => cmd::cmd_build(&config, cli.format),
    Commands::Info => cmd::cmd_info(cli.format),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      status(Status::Failed, &format!("{:#}", err));
      ExitCode::from(exit_code(&err))
    }
  }
}

fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

/// Platform rejection keeps its reserved status; everything else is 1.
fn exit_code(err: &anyhow::Error) -> u8 {
  err
    .downcast_ref::<BuildError>()
    .map(BuildError::exit_code)
    .unwrap_or(1)
}
