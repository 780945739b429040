//! Registry hostnames and image paths.
//!
//! Two addressing schemes are supported:
//!
//! - Artifact Registry: `{region}-docker.pkg.dev/{project}/{repository}/{image}`
//! - Legacy Container Registry: `{host}/{project}/{image}`, where `host` is
//!   one of a few region-keyed hostnames

/// Legacy Container Registry host for a region name.
///
/// Unknown regions fall back to `gcr.io`.
fn legacy_host(region: &str) -> &'static str {
    match region {
        "us" => "gcr.io",
        "eu" | "europe" => "eu.gcr.io",
        "asia" => "asia.gcr.io",
        _ => "gcr.io",
    }
}

/// Registry hostname for a region.
///
/// In Artifact Registry mode the region is used verbatim.
pub fn host_for(region: &str, artifact_registry: bool) -> String {
    if artifact_registry {
        format!("{}-docker.pkg.dev", region)
    } else {
        legacy_host(region).to_string()
    }
}

/// Fully-qualified image path, without tag.
pub fn image_path_for(
    project: &str,
    region: &str,
    repository: &str,
    image: &str,
    artifact_registry: bool,
) -> String {
    let host = host_for(region, artifact_registry);
    if artifact_registry {
        format!("{}/{}/{}/{}", host, project, repository, image)
    } else {
        format!("{}/{}/{}", host, project, image)
    }
}

/// Addressing parameters shared by every region of a push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryAddress {
    /// GCP project ID.
    pub project: String,
    /// Artifact Registry repository (ignored in legacy mode).
    pub repository: String,
    /// Use Artifact Registry addressing.
    pub artifact_registry: bool,
}

impl RegistryAddress {
    /// Create an address for a project.
    pub fn new(project: &str, repository: &str, artifact_registry: bool) -> Self {
        Self {
            project: project.to_string(),
            repository: repository.to_string(),
            artifact_registry,
        }
    }

    /// Registry hostname for `region`.
    pub fn host(&self, region: &str) -> String {
        host_for(region, self.artifact_registry)
    }

    /// Image path for `image` in `region`.
    pub fn image_path(&self, region: &str, image: &str) -> String {
        image_path_for(
            &self.project,
            region,
            &self.repository,
            image,
            self.artifact_registry,
        )
    }

    /// Fully-qualified reference `path:tag`.
    pub fn image_reference(&self, region: &str, image: &str, tag: &str) -> String {
        format!("{}:{}", self.image_path(region, image), tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_registry_host_uses_region_verbatim() {
        assert_eq!(host_for("us-central1", true), "us-central1-docker.pkg.dev");
        assert_eq!(host_for("europe-west1", true), "europe-west1-docker.pkg.dev");
        assert_eq!(host_for("us", true), "us-docker.pkg.dev");
    }

    #[test]
    fn legacy_hosts() {
        assert_eq!(host_for("us", false), "gcr.io");
        assert_eq!(host_for("eu", false), "eu.gcr.io");
        assert_eq!(host_for("europe", false), "eu.gcr.io");
        assert_eq!(host_for("asia", false), "asia.gcr.io");
    }

    #[test]
    fn legacy_unknown_region_defaults_to_gcr_io() {
        assert_eq!(host_for("us-central1", false), "gcr.io");
        assert_eq!(host_for("", false), "gcr.io");
    }

    #[test]
    fn artifact_registry_image_path() {
        assert_eq!(
            image_path_for("p", "us-central1", "r", "app", true),
            "us-central1-docker.pkg.dev/p/r/app"
        );
    }

    #[test]
    fn legacy_image_path_has_no_repository() {
        assert_eq!(image_path_for("p", "eu", "r", "app", false), "eu.gcr.io/p/app");
        assert_eq!(image_path_for("p", "us-central1", "", "app", false), "gcr.io/p/app");
    }

    #[test]
    fn address_builds_per_region_references() {
        let address = RegistryAddress::new("my-project", "containers", true);
        assert_eq!(
            address.image_reference("us-east1", "api", "1.0.0"),
            "us-east1-docker.pkg.dev/my-project/containers/api:1.0.0"
        );
        assert_eq!(
            address.image_reference("europe-west4", "api", "1.0.0"),
            "europe-west4-docker.pkg.dev/my-project/containers/api:1.0.0"
        );
        assert_eq!(address.host("asia-east1"), "asia-east1-docker.pkg.dev");
    }
}
