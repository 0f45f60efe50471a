use predicates::prelude::*;
use serial_test::serial;

use crate::common::{TestEnv, ToolExits};

#[test]
#[serial]
fn default_invocation_runs_all_steps() {
  let env = TestEnv::passing();
  let project = env.project_path();

  env
    .ci_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("IS_SHARED_LIBS:[False]"))
    .stdout(predicate::str::contains("NOT_CLEAR_BUILD_DIR:[False]"))
    .stdout(predicate::str::contains("BUILD_TYPE:[Debug]"))
    .stdout(predicate::str::contains("CMAKE_GENERATOR:[Ninja]"))
    .stdout(predicate::str::contains(format!("BUILD_DIR:[{}]", env.build_path().display())))
    .stdout(predicate::str::contains(format!("SOURCE_DIR:[{}]", project.display())))
    .stdout(predicate::str::contains("CMake configure:["))
    .stdout(predicate::str::contains("CMake build:["))
    .stdout(predicate::str::contains("CTest run unit tests:["))
    .stdout(predicate::str::contains("Configure, build and tests succeeded"));

  assert!(env.build_path().is_dir());
  assert_eq!(
    env.calls(),
    vec![
      format!(
        "cmake -DBUILD_SHARED_LIBS=False -DCMAKE_BUILD_TYPE=Debug -G Ninja {}",
        project.display()
      ),
      "cmake --build . --config Debug".to_string(),
      "ctest -VV --output-on-failure -C Debug".to_string(),
    ]
  );
}

#[test]
#[serial]
fn single_dash_options_accepted() {
  let env = TestEnv::passing();
  let project = env.project_path();

  env
    .ci_cmd()
    .args([
      "-shared",
      "--build_type",
      "Release",
      "-g",
      "Xcode",
      "-build_dir",
      "out/ci",
      "-source_dir=./src/..",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("IS_SHARED_LIBS:[True]"))
    .stdout(predicate::str::contains(format!(
      "BUILD_DIR:[{}]",
      project.join("out").join("ci").display()
    )));

  assert!(project.join("out").join("ci").is_dir());
  assert_eq!(
    env.calls(),
    vec![
      format!(
        "cmake -DBUILD_SHARED_LIBS=True -DCMAKE_BUILD_TYPE=Release -G Xcode {}",
        project.display()
      ),
      "cmake --build . --config Release".to_string(),
      "ctest -VV --output-on-failure -C Release".to_string(),
    ]
  );
}

#[test]
#[serial]
fn relative_source_dir_resolved_from_launch_dir() {
  let env = TestEnv::passing();
  let project = env.project_path();
  let sibling = project.parent().unwrap().join("src");

  env.ci_cmd().args(["-source_dir", "../src"]).assert().success();

  assert!(env.calls()[0].ends_with(&format!("-G Ninja {}", sibling.display())));
}

#[test]
#[serial]
fn configure_failure_exits_with_its_code() {
  let env = TestEnv::new(ToolExits {
    configure: 3,
    ..Default::default()
  });

  env
    .ci_cmd()
    .assert()
    .code(3)
    .stdout(predicate::str::contains("CMake configure:["))
    .stdout(predicate::str::contains("CMake build:[").not())
    .stderr(predicate::str::contains("exit with code 3"));

  assert_eq!(env.calls().len(), 1);
}

#[test]
#[serial]
fn build_failure_skips_tests() {
  let env = TestEnv::new(ToolExits {
    build: 5,
    ..Default::default()
  });

  env
    .ci_cmd()
    .assert()
    .code(5)
    .stdout(predicate::str::contains("CTest run unit tests:[").not())
    .stderr(predicate::str::contains("--build . --config Debug] exit with code 5"));

  let calls = env.calls();
  assert_eq!(calls.len(), 2);
  assert_eq!(calls[1], "cmake --build . --config Debug");
}

#[test]
#[serial]
fn test_failure_exits_with_its_code() {
  let env = TestEnv::new(ToolExits {
    test: 8,
    ..Default::default()
  });

  env
    .ci_cmd()
    .assert()
    .code(8)
    .stdout(predicate::str::contains("succeeded").not())
    .stderr(predicate::str::contains("-VV --output-on-failure -C Debug] exit with code 8"));

  assert_eq!(env.calls().len(), 3);
}

#[test]
#[serial]
fn existing_build_dir_cleared_by_default() {
  let env = TestEnv::passing();
  env.write_project_file("build/CMakeCache.txt", "stale");
  env.write_project_file("build/CMakeFiles/rules.ninja", "stale");

  env
    .ci_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("Build directory cleared"));

  assert_eq!(env.configure_entries(), Some(String::new()));
  assert!(!env.build_path().join("CMakeCache.txt").exists());
}

#[test]
#[serial]
fn notclear_keeps_build_dir_contents() {
  let env = TestEnv::passing();
  env.write_project_file("build/CMakeCache.txt", "kept");

  env
    .ci_cmd()
    .arg("-notclear")
    .assert()
    .success()
    .stdout(predicate::str::contains("NOT_CLEAR_BUILD_DIR:[True]"))
    .stdout(predicate::str::contains("Build directory preserved"));

  assert_eq!(env.configure_entries(), Some("CMakeCache.txt".to_string()));
  assert_eq!(
    std::fs::read_to_string(env.build_path().join("CMakeCache.txt")).unwrap(),
    "kept"
  );
}

#[test]
#[serial]
fn missing_build_dir_created_before_configure() {
  let env = TestEnv::passing();

  env
    .ci_cmd()
    .args(["--build_dir", "a/b/build"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Build directory created"));

  assert!(env.project_path().join("a/b/build").is_dir());
  assert_eq!(env.configure_entries(), Some(String::new()));
}

#[test]
#[serial]
fn environment_supplies_defaults() {
  let env = TestEnv::passing();

  env
    .ci_cmd()
    .env("CMAKE_CI_BUILD_TYPE", "Release")
    .env("CMAKE_CI_GENERATOR", "Xcode")
    .assert()
    .success()
    .stdout(predicate::str::contains("BUILD_TYPE:[Release]"));

  assert!(env.calls()[0].contains("-DCMAKE_BUILD_TYPE=Release -G Xcode"));
}

#[test]
#[serial]
fn flags_override_environment() {
  let env = TestEnv::passing();

  env
    .ci_cmd()
    .env("CMAKE_CI_BUILD_TYPE", "Release")
    .args(["--build_type", "Debug"])
    .assert()
    .success();

  assert_eq!(env.calls()[2], "ctest -VV --output-on-failure -C Debug");
}

#[test]
#[serial]
fn relative_tool_paths_resolved_from_launch_dir() {
  let env = TestEnv::passing();

  env
    .ci_cmd()
    .env_remove("CMAKE_CI_CMAKE")
    .env_remove("CMAKE_CI_CTEST")
    .args(["--cmake", "../tools/cmake", "--ctest", "../tools/ctest"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Configure, build and tests succeeded"));

  let calls = env.calls();
  assert_eq!(calls.len(), 3);
  assert_eq!(calls[2], "ctest -VV --output-on-failure -C Debug");
}
