//! CLI integration tests for nodebuild.

mod build_tests;
mod common;
mod phase_tests;
