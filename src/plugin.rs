//! Plugin lifecycle: describe, validate and execute.
//!
//! A release host drives the plugin through three calls. Configuration
//! arrives as a raw key/value map; [`GcrPlugin`] resolves it, validates it
//! and, on execute, runs the [`PushOrchestrator`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{validate_config, ConfigResolver, RawConfig, ResolvedConfig, ValidationIssue};
use crate::error::Result;
use crate::push::{PushOrchestrator, PushResult};
use crate::release::ReleaseContext;
use crate::shell::CancellationToken;
use crate::tools::{ContainerTool, RegistryAuth};
use crate::ui::UserInterface;

/// Plugin name reported to hosts.
pub const PLUGIN_NAME: &str = "gcr";

/// Release lifecycle points the plugin can run at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hook {
    /// After release artifacts are published.
    PostPublish,
}

impl Hook {
    /// Wire name of the hook.
    pub fn as_str(&self) -> &'static str {
        match self {
            Hook::PostPublish => "post_publish",
        }
    }
}

/// Static plugin metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub hooks: Vec<Hook>,
}

/// Validation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

/// Input to [`GcrPlugin::execute`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExecuteRequest {
    /// Raw plugin configuration.
    pub config: RawConfig,
    /// Release being published.
    pub context: ReleaseContext,
    /// Host-level dry-run flag, OR'd with the config's own.
    pub dry_run: bool,
}

/// Result of [`GcrPlugin::execute`].
#[derive(Debug, Clone, Serialize)]
pub struct ExecuteResponse {
    pub success: bool,
    pub message: String,
    /// `project`, `repository`, `tags` and `pushed_images`.
    pub outputs: BTreeMap<String, Value>,
}

impl ExecuteResponse {
    /// A failed execution carrying the error message and no outputs.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            outputs: BTreeMap::new(),
        }
    }

    fn from_result(config: &ResolvedConfig, result: &PushResult) -> Self {
        let mut outputs = BTreeMap::new();
        outputs.insert("project".to_string(), Value::from(config.project.clone()));
        outputs.insert(
            "repository".to_string(),
            Value::from(config.repository.clone()),
        );
        outputs.insert("tags".to_string(), Value::from(result.tags.clone()));
        outputs.insert(
            "pushed_images".to_string(),
            Value::from(result.pushed_images.clone()),
        );

        Self {
            success: true,
            message: result.summary(),
            outputs,
        }
    }
}

/// The GCR promotion plugin.
#[derive(Debug, Clone, Default)]
pub struct GcrPlugin {
    resolver: ConfigResolver,
}

impl GcrPlugin {
    /// Create a plugin resolving env fallbacks through `resolver`.
    pub fn new(resolver: ConfigResolver) -> Self {
        Self { resolver }
    }

    /// The resolver used for configuration.
    pub fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    /// Plugin metadata.
    pub fn describe(&self) -> PluginInfo {
        PluginInfo {
            name: PLUGIN_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Push container images to Google Container Registry and Artifact Registry"
                .to_string(),
            hooks: vec![Hook::PostPublish],
        }
    }

    /// Resolve and validate `raw` without side effects.
    pub fn validate(&self, raw: &RawConfig) -> ValidateResponse {
        let config = self.resolver.resolve(raw);
        let errors = validate_config(&config);
        for issue in &errors {
            tracing::debug!("Validation issue: {}", issue);
        }
        ValidateResponse {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Resolve the request's configuration and push.
    ///
    /// Validation is not repeated here; hosts call [`validate`](Self::validate)
    /// first.
    ///
    /// # Errors
    ///
    /// Propagates the first authentication, tag, push or cancellation error.
    pub fn execute(
        &self,
        request: &ExecuteRequest,
        container: &dyn ContainerTool,
        auth: &dyn RegistryAuth,
        cancel: CancellationToken,
        ui: &mut dyn UserInterface,
    ) -> Result<ExecuteResponse> {
        let mut config = self.resolver.resolve(&request.config);
        config.dry_run |= request.dry_run;

        tracing::info!(
            "Pushing {} to {} region(s){}",
            config.source_image,
            config.target_regions().len(),
            if config.dry_run { " (dry run)" } else { "" }
        );

        let result = PushOrchestrator::new(container, auth)
            .with_cancel(cancel)
            .execute(&config, &request.context, ui)?;

        tracing::debug!("Push finished in {:?}", result.duration);
        Ok(ExecuteResponse::from_result(&config, &result))
    }
}
