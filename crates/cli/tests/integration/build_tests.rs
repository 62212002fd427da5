//! `nodebuild build` integration tests.

use std::fs;
use std::path::Path;

use predicates::prelude::*;

use super::common::{TestEnv, is_symlink};

#[test]
fn build_with_symlink_method() {
  let env = TestEnv::foo();

  env
    .nodebuild_cmd()
    .arg("build")
    .env("installMethod", "symlink")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built foo@1.0.0"));

  assert!(env.deps_path().is_dir());
  assert_eq!(fs::read_dir(env.deps_path()).unwrap().count(), 0);
  assert!(env.lib_path().join("package.json").is_file());
  assert_eq!(
    fs::read_link(env.out_path().join("lib/cli.js")).unwrap(),
    env.lib_path().join("cli.js")
  );
  assert_eq!(
    fs::read_link(env.out_path().join("lib/node_modules")).unwrap(),
    env.deps_path()
  );
  assert_eq!(
    fs::read_link(env.out_path().join("bin/foo")).unwrap(),
    Path::new("../lib/cli.js")
  );
}

#[test]
fn build_with_copy_method() {
  let env = TestEnv::foo();
  env.write_closure("ms/index.js", "module.exports = 1000;\n");

  env
    .nodebuild_cmd()
    .arg("build")
    .arg("--install-method")
    .arg("copy")
    .assert()
    .success();

  let copied = env.out_path().join("lib/cli.js");
  assert!(!is_symlink(&copied));
  assert_eq!(fs::read(&copied).unwrap(), fs::read(env.lib_path().join("cli.js")).unwrap());
  assert!(!is_symlink(&env.out_path().join("lib/node_modules")));
  assert!(env.out_path().join("lib/node_modules/ms/index.js").is_file());
  assert!(is_symlink(&env.out_path().join("bin/foo")));
}

#[test]
fn build_json_report() {
  let env = TestEnv::foo();

  env
    .nodebuild_cmd()
    .args(["--format", "json", "build"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"strategy\": \"symlink\""))
    .stdout(predicate::str::contains("\"name\": \"foo\""));
}

#[test]
fn main_package_placeholder_is_removed() {
  let env = TestEnv::foo();
  env.write_closure("ms/index.js", "");

  env.nodebuild_cmd().arg("build").arg("--main").assert().success();

  assert!(!env.source_path().join("node_modules").exists());
  assert!(!env.lib_path().join("node_modules").exists());
  assert!(env.deps_path().join("ms/index.js").is_file());
}

#[test]
fn incompatible_platform_exits_3() {
  let env = TestEnv::new();
  env.write_source(
    "package.json",
    r#"{"name": "nowhere", "version": "1.0.0", "os": ["!linux", "!darwin", "!win32", "!freebsd", "!openbsd", "!netbsd", "!android", "!sunos", "!aix"]}"#,
  );

  env
    .nodebuild_cmd()
    .arg("build")
    .assert()
    .code(3)
    .stderr(predicate::str::contains("does not support platform"));

  assert!(!env.out_path().exists());
}

#[cfg(unix)]
#[test]
fn dangling_closure_link_fails_build() {
  let env = TestEnv::foo();
  env.write_closure("ms/index.js", "");
  std::os::unix::fs::symlink("../missing", env.closure_path().join("ms/broken")).unwrap();

  env
    .nodebuild_cmd()
    .arg("build")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("dangling symlink"));

  assert!(!env.out_path().exists());
}

#[test]
fn unknown_install_method_changes_nothing() {
  let env = TestEnv::foo();

  env
    .nodebuild_cmd()
    .arg("build")
    .env("installMethod", "hardlink")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("unknown install method `hardlink`"));

  assert!(!env.deps_path().exists());
  assert!(!env.lib_path().exists());
  assert!(!env.out_path().exists());
}

#[test]
fn missing_entry_point_fails_build() {
  let env = TestEnv::new();
  env.write_source(
    "package.json",
    r#"{"name": "foo", "version": "1.0.0", "bin": "missing.js"}"#,
  );

  env
    .nodebuild_cmd()
    .arg("build")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("missing entry point"));
}

#[test]
fn rebuild_into_existing_outputs_fails() {
  let env = TestEnv::foo();
  env.nodebuild_cmd().arg("build").assert().success();
  env.write_source("extra.js", "");

  env
    .nodebuild_cmd()
    .arg("build")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("destination already exists"));

  assert!(!env.lib_path().join("extra.js").exists());
}
