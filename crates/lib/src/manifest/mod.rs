//! Package manifest access.
//!
//! Reads `package.json` from a package source root and exposes the handful of
//! fields the build needs: identity, declared binaries, lifecycle scripts and
//! platform restrictions.

mod types;

pub use types::*;
