//! Integration tests for the individual phase commands.

use std::fs;

use predicates::prelude::*;

use super::common::{TestEnv, is_symlink};

#[test]
fn check_platform_accepts_unrestricted_package() {
  let env = TestEnv::foo();

  env
    .nodebuild_cmd()
    .arg("check-platform")
    .assert()
    .success()
    .stdout(predicate::str::contains("is supported"));
}

#[test]
fn check_platform_rejects_with_status_3() {
  let env = TestEnv::new();
  env.write_source(
    "package.json",
    r#"{"name": "odd", "version": "1.0.0", "cpu": ["!x64", "!arm64", "!ia32", "!arm", "!ppc64", "!s390x", "!riscv64", "!loong64", "!mips"]}"#,
  );

  env.nodebuild_cmd().arg("check-platform").assert().code(3);
}

#[test]
fn node_modules_links_for_main_package() {
  let env = TestEnv::foo();
  env.write_closure("ms/index.js", "");

  env
    .nodebuild_cmd()
    .arg("node-modules")
    .env("isMain", "1")
    .assert()
    .success()
    .stdout(predicate::str::contains("Linked node_modules"));

  let placeholder = env.source_path().join("node_modules");
  assert!(is_symlink(&placeholder));
  assert_eq!(fs::read_link(&placeholder).unwrap(), env.closure_path());
}

#[test]
fn node_modules_skipped_for_plain_dependency() {
  let env = TestEnv::foo();
  env.write_closure("ms/index.js", "");

  env
    .nodebuild_cmd()
    .arg("node-modules")
    .assert()
    .success()
    .stdout(predicate::str::contains("No node_modules needed"));

  assert!(!env.source_path().join("node_modules").exists());
}

#[test]
fn phases_run_separately() {
  let env = TestEnv::foo();
  env.write_closure("ms/index.js", "");

  env.nodebuild_cmd().arg("check-platform").assert().success();
  env.nodebuild_cmd().arg("node-modules").arg("--main").assert().success();
  env
    .nodebuild_cmd()
    .arg("make-outputs")
    .arg("--install-method")
    .arg("copy")
    .assert()
    .success()
    .stdout(predicate::str::contains("Binaries: 1"));

  assert!(!is_symlink(&env.lib_path().join("node_modules")));
  assert!(!env.lib_path().join("node_modules").exists());
  assert!(env.out_path().join("lib/node_modules/ms/index.js").is_file());
}

#[test]
fn make_outputs_requires_output_paths() {
  let env = TestEnv::foo();

  env
    .nodebuild_cmd()
    .arg("make-outputs")
    .env_remove("out")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("output path `out` is not set"));

  assert!(!env.lib_path().exists());
}
