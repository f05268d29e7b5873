use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
  Command::cargo_bin("escudeiro").unwrap()
}

fn render_stdout() -> Vec<u8> {
  cmd()
    .arg("render")
    .assert()
    .success()
    .get_output()
    .stdout
    .clone()
}

#[test]
fn render_prints_the_page() {
  cmd()
    .arg("render")
    .assert()
    .success()
    .stdout(contains("<h1 class=\"card-title\">Squire's Page</h1>"))
    .stdout(contains("id=\"myButton\""));
}

#[test]
fn render_is_byte_identical_across_runs() {
  assert_eq!(render_stdout(), render_stdout());
}

#[test]
fn rendered_file_passes_check() {
  let tmp = TempDir::new().expect("create temp dir");
  let out = tmp.path().join("public").join("index.html");
  cmd()
    .args(["render", "--output"])
    .arg(&out)
    .assert()
    .success();
  assert_eq!(fs::read(&out).unwrap(), render_stdout());

  cmd()
    .arg("check")
    .arg(&out)
    .assert()
    .success()
    .stdout(contains("ok   | click-alert"));
}

#[test]
fn check_fails_when_button_is_removed() {
  let tmp = TempDir::new().expect("create temp dir");
  let page = String::from_utf8(render_stdout()).unwrap();
  let broken = page.replace(
    r#"<button id="myButton" class="btn btn-primary">Learn More</button>"#,
    "",
  );
  let path = tmp.path().join("broken.html");
  fs::write(&path, broken).unwrap();

  cmd()
    .arg("check")
    .arg(&path)
    .assert()
    .failure()
    .stdout(contains("FAIL | bind-target"))
    .stdout(contains("ok   | heading"))
    .stderr(contains("ContractViolation"));
}

#[test]
fn check_reports_json() {
  let out = cmd()
    .args(["check", "--json"])
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();
  let report: serde_json::Value = serde_json::from_slice(&out).expect("valid json output");
  let checks = report["checks"].as_array().unwrap();
  assert_eq!(checks.len(), 6);
  assert!(checks.iter().all(|c| c["passed"] == true));
}

#[test]
fn check_missing_file_fails() {
  cmd()
    .args(["check", "does/not/exist.html"])
    .assert()
    .failure()
    .stderr(contains("DocumentReadError"));
}

#[test]
fn assets_lists_every_reference() {
  cmd()
    .arg("assets")
    .assert()
    .success()
    .stdout(contains("bootstrap/4.5.2/css/bootstrap.min.css"))
    .stdout(contains("jquery-3.5.1.slim.min.js"))
    .stdout(contains("@popperjs/core@2.5.4"))
    .stdout(contains("bootstrap/4.5.2/js/bootstrap.min.js"));
}

#[test]
fn serve_rejects_invalid_host() {
  cmd()
    .args(["serve", "--host", "not a host", "--port", "0"])
    .assert()
    .failure()
    .stderr(contains("InvalidAddress"));
}

fn env_dir(contents: &str) -> TempDir {
  let tmp = TempDir::new().expect("create temp dir");
  fs::write(tmp.path().join(".env"), contents).unwrap();
  fs::create_dir_all(tmp.path().join("sub")).unwrap();
  tmp
}

#[test]
fn dotenv_in_working_dir_feeds_server_port() {
  let tmp = env_dir("SERVER_PORT=notaport\n");
  cmd()
    .current_dir(tmp.path())
    .env_remove("SERVER_PORT")
    .args(["serve", "--host", "not a host"])
    .assert()
    .failure()
    .stderr(contains("notaport"));
}

#[test]
fn dotenv_in_parent_dir_is_ignored() {
  let tmp = env_dir("SERVER_PORT=notaport\n");
  cmd()
    .current_dir(tmp.path().join("sub"))
    .env_remove("SERVER_PORT")
    .args(["serve", "--host", "not a host"])
    .assert()
    .failure()
    .stderr(contains("InvalidAddress"))
    .stderr(contains("notaport").not());
}

#[test]
fn default_verbosity_hides_debug_logs() {
  cmd()
    .arg("render")
    .assert()
    .success()
    .stderr(contains("CLI args").not());
}

#[test]
fn single_verbose_flag_enables_debug_only() {
  cmd()
    .args(["-v", "render"])
    .assert()
    .success()
    .stderr(contains("CLI args"))
    .stderr(contains("Replacing placeholder").not());
}

#[test]
fn double_verbose_flag_enables_trace() {
  cmd()
    .args(["-vv", "render"])
    .assert()
    .success()
    .stderr(contains("Replacing placeholder"));
}
