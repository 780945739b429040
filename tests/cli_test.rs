//! Integration tests for the gcr-push binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const ENV_FALLBACKS: &[&str] = &[
    "CLOUDSDK_CORE_PROJECT",
    "GOOGLE_APPLICATION_CREDENTIALS",
    "GCP_SERVICE_ACCOUNT_JSON",
    "RELEASE_VERSION",
    "RELEASE_PREVIOUS_VERSION",
    "RELEASE_TAG_NAME",
    "RELEASE_TYPE",
    "RELEASE_BRANCH",
    "GCR_PUSH_DOCKER",
    "RUST_LOG",
];

const CONFIG: &str = r#"
project: acme
repository: containers
image: api
source_image: api:build
tags:
  - "{{.Version}}"
  - latest
multi_region:
  enabled: true
  regions: [us-east1, europe-west1]
"#;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("gcr.yml"), config).unwrap();
    temp
}

fn gcr_push(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(cargo_bin("gcr-push"));
    cmd.current_dir(dir);
    for var in ENV_FALLBACKS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    gcr_push(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("execute"))
        .stdout(predicate::str::contains("validate"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    gcr_push(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn describe_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let output = gcr_push(temp.path())
        .args(["describe", "--json"])
        .output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["name"], "gcr");
    assert_eq!(value["hooks"], serde_json::json!(["post_publish"]));
    Ok(())
}

#[test]
fn validate_accepts_good_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    gcr_push(temp.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
    Ok(())
}

#[test]
fn validate_rejects_incomplete_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("image: api\n");
    gcr_push(temp.path())
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("project: GCP project ID is required"))
        .stderr(predicate::str::contains("source_image"));
    Ok(())
}

#[test]
fn validate_uses_env_file_fallbacks() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("repository: r\nimage: api\nsource_image: api:build\n");
    fs::write(temp.path().join("ci.env"), "export CLOUDSDK_CORE_PROJECT=acme\n")?;
    gcr_push(temp.path())
        .args(["validate", "--env-file", "ci.env"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn validate_uses_process_env_fallbacks() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("repository: r\nimage: api\nsource_image: api:build\n");
    gcr_push(temp.path())
        .arg("validate")
        .env("CLOUDSDK_CORE_PROJECT", "acme")
        .assert()
        .success();
    Ok(())
}

#[test]
fn missing_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    gcr_push(temp.path())
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No configuration found"));
    Ok(())
}

#[test]
fn execute_dry_run_previews_pushes() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    gcr_push(temp.path())
        .args(["execute", "--dry-run", "--release-version", "1.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[dry-run] Would tag api:build as us-east1-docker.pkg.dev/acme/containers/api:1.0.0",
        ))
        .stdout(predicate::str::contains(
            "[dry-run] Would push europe-west1-docker.pkg.dev/acme/containers/api:latest",
        ))
        .stdout(predicate::str::contains("Would push 4 image(s) to GCR (dry run)"));
    Ok(())
}

#[test]
fn execute_reads_release_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    gcr_push(temp.path())
        .args(["execute", "--dry-run"])
        .env("RELEASE_VERSION", "9.9.9")
        .assert()
        .success()
        .stdout(predicate::str::contains("api:9.9.9"));
    Ok(())
}

#[test]
fn execute_json_is_parseable() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    let output = gcr_push(temp.path())
        .args(["execute", "--dry-run", "--json", "--release-version", "2.0.0"])
        .output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["success"], true);
    assert_eq!(value["outputs"]["tags"], serde_json::json!(["2.0.0", "latest"]));
    Ok(())
}

#[test]
fn dry_run_in_config_is_honored() -> Result<(), Box<dyn std::error::Error>> {
    let config = format!("{}dry_run: true\n", CONFIG);
    let temp = setup_project(&config);
    gcr_push(temp.path())
        .args(["execute", "--release-version", "1.0.0", "--docker-bin", "/nonexistent/docker"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(dry run)"));
    Ok(())
}

#[test]
fn tags_lists_references() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    gcr_push(temp.path())
        .args(["tags", "--release-version", "1.0.0"])
        .assert()
        .success()
        .stdout(
            "us-east1-docker.pkg.dev/acme/containers/api:1.0.0\n\
             us-east1-docker.pkg.dev/acme/containers/api:latest\n\
             europe-west1-docker.pkg.dev/acme/containers/api:1.0.0\n\
             europe-west1-docker.pkg.dev/acme/containers/api:latest\n",
        );
    Ok(())
}

#[test]
fn explicit_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join("legacy.yml"),
        "artifact_registry: false\nproject: acme\nimage: api\nregion: asia\ntags: [stable]\n",
    )?;
    gcr_push(temp.path())
        .args(["tags", "--config", "legacy.yml"])
        .assert()
        .success()
        .stdout("asia.gcr.io/acme/api:stable\n");
    Ok(())
}

#[test]
fn completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    gcr_push(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gcr-push"));
    Ok(())
}

#[cfg(unix)]
mod with_fake_tools {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    fn fake_tool(dir: &Path, name: &str, log: &Path, fail_on: Option<&str>) -> PathBuf {
        let path = dir.join(name);
        let fail = match fail_on {
            Some(pattern) => format!(
                "case \"$*\" in *\"{}\"*) echo \"denied\" >&2; exit 1;; esac\n",
                pattern
            ),
            None => String::new(),
        };
        let script = format!(
            "#!/bin/sh\necho \"{} $*\" >> \"{}\"\n{}exit 0\n",
            name,
            log.display(),
            fail
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn run(temp: &TempDir, fail_on: Option<&str>) -> (assert_cmd::assert::Assert, String) {
        let log = temp.path().join("calls.log");
        let docker = fake_tool(temp.path(), "docker", &log, fail_on);
        let gcloud = fake_tool(temp.path(), "gcloud", &log, None);
        let assert = gcr_push(temp.path())
            .args(["execute", "--release-version", "1.0.0"])
            .arg("--docker-bin")
            .arg(&docker)
            .arg("--gcloud-bin")
            .arg(&gcloud)
            .assert();
        let calls = fs::read_to_string(&log).unwrap_or_default();
        (assert, calls)
    }

    #[test]
    fn execute_runs_auth_tag_and_push() {
        let temp = setup_project(CONFIG);
        let (assert, calls) = run(&temp, None);
        assert
            .success()
            .stdout(predicate::str::contains("Successfully pushed 4 image(s) to GCR"));

        let lines: Vec<&str> = calls.lines().collect();
        assert_eq!(
            lines[0],
            "gcloud auth configure-docker us-east1-docker.pkg.dev --quiet"
        );
        assert_eq!(
            lines[1],
            "gcloud auth configure-docker europe-west1-docker.pkg.dev --quiet"
        );
        assert!(lines.contains(
            &"docker tag api:build europe-west1-docker.pkg.dev/acme/containers/api:latest"
        ));
        assert_eq!(
            lines.last().copied(),
            Some("docker push europe-west1-docker.pkg.dev/acme/containers/api:latest")
        );
    }

    #[test]
    fn execute_stops_on_push_failure() {
        let temp = setup_project(CONFIG);
        let (assert, calls) = run(&temp, Some("push us-east1-docker.pkg.dev/acme/containers/api:latest"));
        assert.code(1).stderr(predicate::str::contains(
            "failed to push image us-east1-docker.pkg.dev/acme/containers/api:latest",
        ));
        assert!(!calls.contains("europe-west1-docker.pkg.dev/acme/containers/api:1.0.0"));
    }
}
