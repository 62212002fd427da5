//! Shared utilities.
//!
//! Filesystem tree duplication and test helpers.

pub mod tree;

#[cfg(test)]
pub mod testutil;
