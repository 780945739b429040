//! Resolved configuration types.
//!
//! The host hands over an untyped [`RawConfig`] map. The resolver turns it
//! into a [`ResolvedConfig`], which is what validation and execution read.

use serde::Serialize;
use std::fmt;

/// Untyped configuration as supplied by the host.
pub type RawConfig = serde_json::Map<String, serde_json::Value>;

/// Tag template injected when the caller supplies none.
pub const DEFAULT_TAG: &str = "{{.Version}}";

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-central1";

/// How to obtain registry credentials.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthMethod {
    /// Use the ambient gcloud login (`gcloud auth configure-docker`).
    #[default]
    Gcloud,

    /// Log in with a service account key (`docker login -u _json_key`).
    ServiceAccount,

    /// A value that is neither of the above, kept verbatim so validation can
    /// report it.
    Unknown(String),
}

impl AuthMethod {
    /// Parse a configured method name. Empty means the default.
    pub fn parse(value: &str) -> Self {
        match value {
            "" | "gcloud" => AuthMethod::Gcloud,
            "service_account" => AuthMethod::ServiceAccount,
            other => AuthMethod::Unknown(other.to_string()),
        }
    }

    /// Configured name of this method.
    pub fn as_str(&self) -> &str {
        match self {
            AuthMethod::Gcloud => "gcloud",
            AuthMethod::ServiceAccount => "service_account",
            AuthMethod::Unknown(other) => other,
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AuthMethod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Registry credentials (`auth` section).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AuthConfig {
    /// Authentication method.
    pub method: AuthMethod,

    /// Path to a service account key file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_file: Option<String>,

    /// Inline service account key content. Never serialized.
    #[serde(skip)]
    pub key_json: Option<String>,
}

impl AuthConfig {
    /// Whether any key material is configured.
    pub fn has_key(&self) -> bool {
        self.key_file.as_deref().is_some_and(|s| !s.is_empty())
            || self.key_json.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// Fan-out to several regions (`multi_region` section).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MultiRegionConfig {
    /// Whether multi-region pushes are enabled.
    pub enabled: bool,

    /// Target regions, in push order.
    pub regions: Vec<String>,
}

/// Fully resolved configuration for one validate or execute call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    /// Use Artifact Registry addressing (otherwise legacy Container Registry).
    pub artifact_registry: bool,

    /// GCP project ID.
    pub project: String,

    /// Primary region.
    pub region: String,

    /// Artifact Registry repository.
    pub repository: String,

    /// Image name inside the registry.
    pub image: String,

    /// Registry credentials.
    pub auth: AuthConfig,

    /// Locally built image to promote.
    pub source_image: String,

    /// Raw tag templates. Never empty.
    pub tags: Vec<String>,

    /// Multi-region settings.
    pub multi_region: MultiRegionConfig,

    /// Preview only.
    pub dry_run: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            artifact_registry: true,
            project: String::new(),
            region: DEFAULT_REGION.to_string(),
            repository: String::new(),
            image: String::new(),
            auth: AuthConfig::default(),
            source_image: String::new(),
            tags: vec![DEFAULT_TAG.to_string()],
            multi_region: MultiRegionConfig::default(),
            dry_run: false,
        }
    }
}

impl ResolvedConfig {
    /// Regions this configuration pushes to, in order.
    ///
    /// The multi-region list wins only when enabled and non-empty.
    pub fn target_regions(&self) -> Vec<String> {
        if self.multi_region.enabled && !self.multi_region.regions.is_empty() {
            self.multi_region.regions.clone()
        } else {
            vec![self.region.clone()]
        }
    }
}
