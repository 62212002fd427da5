//! Fixed names shared across the build phases.

pub const APP_NAME: &str = "nodebuild";

/// Manifest file expected at the root of every package source tree.
pub const MANIFEST_FILE: &str = "package.json";

/// Name of the dependency directory inside a package tree.
pub const NODE_MODULES: &str = "node_modules";

pub const BIN_DIR: &str = "bin";
pub const LIB_DIR: &str = "lib";

/// Exit status reserved for "host platform not supported by the package".
pub const EXIT_PLATFORM_INCOMPATIBLE: u8 = 3;
