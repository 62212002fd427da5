//! nodebuild-lib: output composition for Node.js package builds
//!
//! Given a package source tree and its materialized dependency closure, this
//! crate writes the three outputs of a package build:
//! - `lib`: the bare package, a copy of the source tree
//! - `deps`: the dependency closure, always present even when empty
//! - `out`: the installation view, `bin/` entry points plus a `lib/` that
//!   copies or links `lib` and `deps` depending on the [`strategy`]

pub mod config;
pub mod consts;
pub mod manifest;
pub mod outputs;
pub mod pipeline;
pub mod platform;
pub mod prepare;
pub mod strategy;
pub mod util;
