//! Registry authentication.
//!
//! Two methods are supported:
//!
//! - `gcloud`: `gcloud auth configure-docker HOST --quiet`, relying on the
//!   ambient gcloud login
//! - `service_account`: `docker login -u _json_key --password-stdin HOST`
//!   with the key content on stdin; the key comes from `key_file` (read
//!   verbatim) or else `key_json`

use crate::config::schema::{AuthConfig, AuthMethod};
use crate::error::{GcrError, Result};
use crate::registry::host_for;
use crate::shell::{execute_checked, CancellationToken, CommandOptions};
use crate::tools::docker::DEFAULT_DOCKER_BIN;
use std::fs;

/// Default gcloud binary.
pub const DEFAULT_GCLOUD_BIN: &str = "gcloud";

/// Username docker expects for JSON key logins.
const JSON_KEY_USER: &str = "_json_key";

/// Authenticates the local container engine against a registry region.
pub trait RegistryAuth {
    /// Authenticate for `region` using `auth`.
    ///
    /// # Errors
    ///
    /// Returns `Authentication` naming the region on any failure.
    fn authenticate(&self, region: &str, auth: &AuthConfig) -> Result<()>;
}

/// [`RegistryAuth`] backed by the gcloud and docker CLIs.
#[derive(Debug, Clone)]
pub struct GcloudAuth {
    artifact_registry: bool,
    gcloud_bin: String,
    docker_bin: String,
    cancel: Option<CancellationToken>,
}

impl GcloudAuth {
    /// Create an authenticator for the given registry mode.
    pub fn new(artifact_registry: bool) -> Self {
        Self {
            artifact_registry,
            gcloud_bin: DEFAULT_GCLOUD_BIN.to_string(),
            docker_bin: DEFAULT_DOCKER_BIN.to_string(),
            cancel: None,
        }
    }

    /// Override the gcloud binary.
    pub fn with_gcloud_bin(mut self, bin: impl Into<String>) -> Self {
        self.gcloud_bin = bin.into();
        self
    }

    /// Override the docker binary.
    pub fn with_docker_bin(mut self, bin: impl Into<String>) -> Self {
        self.docker_bin = bin.into();
        self
    }

    /// Kill running commands when `cancel` fires.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn options(&self) -> CommandOptions {
        CommandOptions {
            cancel: self.cancel.clone(),
            ..Default::default()
        }
    }

    fn authenticate_gcloud(&self, host: &str) -> Result<()> {
        execute_checked(
            &self.gcloud_bin,
            &["auth", "configure-docker", host, "--quiet"],
            &self.options(),
        )?;
        Ok(())
    }

    fn authenticate_service_account(&self, host: &str, auth: &AuthConfig) -> Result<()> {
        let key = read_key(auth)?;
        let options = CommandOptions {
            stdin: Some(key),
            ..self.options()
        };
        execute_checked(
            &self.docker_bin,
            &["login", "-u", JSON_KEY_USER, "--password-stdin", host],
            &options,
        )?;
        Ok(())
    }
}

/// Load service account key material. `key_file` wins over `key_json`.
fn read_key(auth: &AuthConfig) -> Result<String> {
    if let Some(path) = auth.key_file.as_deref().filter(|p| !p.is_empty()) {
        return fs::read_to_string(path).map_err(|e| {
            GcrError::Other(anyhow::anyhow!("failed to read key file {}: {}", path, e))
        });
    }

    match auth.key_json.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => Ok(key.to_string()),
        None => Err(GcrError::Other(anyhow::anyhow!(
            "service account key not provided"
        ))),
    }
}

impl RegistryAuth for GcloudAuth {
    fn authenticate(&self, region: &str, auth: &AuthConfig) -> Result<()> {
        let host = host_for(region, self.artifact_registry);
        tracing::info!("Authenticating with {} ({})", host, auth.method);

        let result = match &auth.method {
            AuthMethod::Gcloud => self.authenticate_gcloud(&host),
            AuthMethod::ServiceAccount => self.authenticate_service_account(&host, auth),
            AuthMethod::Unknown(method) => Err(GcrError::Other(anyhow::anyhow!(
                "unknown auth method: {}",
                method
            ))),
        };

        result.map_err(|err| match err {
            GcrError::Cancelled { .. } => err,
            other => GcrError::Authentication {
                region: region.to_string(),
                message: other.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn key_file_is_read_verbatim() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("key.json");
        fs::write(&path, "{\"type\": \"service_account\"}\n").unwrap();

        let auth = AuthConfig {
            method: AuthMethod::ServiceAccount,
            key_file: Some(path.display().to_string()),
            key_json: Some("ignored".to_string()),
        };
        assert_eq!(read_key(&auth).unwrap(), "{\"type\": \"service_account\"}\n");
    }

    #[test]
    fn key_json_used_without_file() {
        let auth = AuthConfig {
            method: AuthMethod::ServiceAccount,
            key_file: Some(String::new()),
            key_json: Some("{}".to_string()),
        };
        assert_eq!(read_key(&auth).unwrap(), "{}");
    }

    #[test]
    fn missing_key_is_error() {
        let auth = AuthConfig {
            method: AuthMethod::ServiceAccount,
            ..Default::default()
        };
        assert!(read_key(&auth)
            .unwrap_err()
            .to_string()
            .contains("not provided"));
    }

    #[test]
    fn unreadable_key_file_fails_authentication_for_region() {
        let auth = AuthConfig {
            method: AuthMethod::ServiceAccount,
            key_file: Some("/nonexistent/key.json".to_string()),
            key_json: None,
        };
        let err = GcloudAuth::new(true)
            .authenticate("europe-west1", &auth)
            .unwrap_err();
        match err {
            GcrError::Authentication { region, message } => {
                assert_eq!(region, "europe-west1");
                assert!(message.contains("/nonexistent/key.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_method_fails_authentication() {
        let auth = AuthConfig {
            method: AuthMethod::Unknown("oauth".into()),
            ..Default::default()
        };
        let err = GcloudAuth::new(false).authenticate("us", &auth).unwrap_err();
        assert!(matches!(err, GcrError::Authentication { .. }));
        assert!(err.to_string().contains("unknown auth method: oauth"));
    }

    #[test]
    fn missing_gcloud_binary_fails_authentication() {
        let err = GcloudAuth::new(true)
            .with_gcloud_bin("definitely-not-a-real-binary-xyz")
            .authenticate("us-central1", &AuthConfig::default())
            .unwrap_err();
        assert!(matches!(err, GcrError::Authentication { .. }));
    }

    #[test]
    fn cancelled_token_is_not_wrapped() {
        let token = CancellationToken::new();
        token.cancel();
        let err = GcloudAuth::new(true)
            .with_cancel(token)
            .authenticate("us-central1", &AuthConfig::default())
            .unwrap_err();
        assert!(err.is_cancelled());
    }
}
