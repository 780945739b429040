//! Multi-region push orchestration.
//!
//! A run is strictly sequential:
//!
//! 1. Resolve tag templates against the release context
//! 2. Authenticate every target region (skipped in dry-run)
//! 3. For each region, then each tag: tag the source image and push it
//!
//! The first failure ends the run. Images pushed before it stay pushed.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::ResolvedConfig;
use crate::error::{GcrError, Result};
use crate::registry::RegistryAddress;
use crate::release::ReleaseContext;
use crate::shell::CancellationToken;
use crate::template::resolve_tags;
use crate::tools::{ContainerTool, RegistryAuth};
use crate::ui::UserInterface;

/// One tag-and-push of the source image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushAction {
    /// Region whose registry receives the image.
    pub region: String,
    /// Local source image.
    pub source: String,
    /// Fully-qualified target reference.
    pub target: String,
}

/// Everything a run would do, computed without side effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushPlan {
    /// Resolved, non-empty tags.
    pub tags: Vec<String>,
    /// Target regions in push order.
    pub regions: Vec<String>,
    /// Region-major, tag-minor actions.
    pub actions: Vec<PushAction>,
}

impl PushPlan {
    /// Compute the plan for a configuration and release.
    pub fn new(config: &ResolvedConfig, context: &ReleaseContext) -> Self {
        let tags = resolve_tags(&config.tags, context);
        let regions = config.target_regions();
        let address = RegistryAddress::new(
            &config.project,
            &config.repository,
            config.artifact_registry,
        );

        let actions = regions
            .iter()
            .flat_map(|region| {
                tags.iter().map(|tag| PushAction {
                    region: region.clone(),
                    source: config.source_image.clone(),
                    target: address.image_reference(region, &config.image, tag),
                })
            })
            .collect();

        Self {
            tags,
            regions,
            actions,
        }
    }

    /// Target references in push order.
    pub fn targets(&self) -> Vec<String> {
        self.actions.iter().map(|a| a.target.clone()).collect()
    }
}

/// Outcome of a push run.
#[derive(Debug, Clone, Serialize)]
pub struct PushResult {
    /// Resolved tags.
    pub tags: Vec<String>,
    /// Pushed (or, in dry-run, would-be pushed) references.
    pub pushed_images: Vec<String>,
    /// Every action performed or previewed.
    pub actions: Vec<PushAction>,
    /// Whether this was a preview.
    pub dry_run: bool,
    /// Wall time of the run.
    #[serde(skip)]
    pub duration: Duration,
}

impl PushResult {
    /// Human-readable one-line summary.
    pub fn summary(&self) -> String {
        if self.dry_run {
            format!(
                "Would push {} image(s) to GCR (dry run)",
                self.pushed_images.len()
            )
        } else {
            format!(
                "Successfully pushed {} image(s) to GCR",
                self.pushed_images.len()
            )
        }
    }
}

/// Drives authentication, tagging and pushing across regions.
pub struct PushOrchestrator<'a> {
    container: &'a dyn ContainerTool,
    auth: &'a dyn RegistryAuth,
    cancel: CancellationToken,
}

impl<'a> PushOrchestrator<'a> {
    /// Create an orchestrator over the given tools.
    pub fn new(container: &'a dyn ContainerTool, auth: &'a dyn RegistryAuth) -> Self {
        Self {
            container,
            auth,
            cancel: CancellationToken::new(),
        }
    }

    /// Abort between steps once `cancel` fires.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run the push for `config` and `context`.
    ///
    /// # Errors
    ///
    /// - `Authentication` naming the first region that failed
    /// - `ToolExecution` naming the first image that failed to tag or push
    /// - `Cancelled` if the token fired
    pub fn execute(
        &self,
        config: &ResolvedConfig,
        context: &ReleaseContext,
        ui: &mut dyn UserInterface,
    ) -> Result<PushResult> {
        let start = Instant::now();
        let plan = PushPlan::new(config, context);

        if plan.tags.is_empty() {
            tracing::warn!("No tags resolved from {:?}; nothing to push", config.tags);
        }

        if !config.dry_run {
            self.authenticate_all(config, &plan.regions)?;

            if !plan.actions.is_empty() && !self.container.exists(&config.source_image) {
                tracing::warn!(
                    "Source image {} not found locally; tagging may fail",
                    config.source_image
                );
            }
        }

        let mut pushed_images = Vec::with_capacity(plan.actions.len());
        for action in &plan.actions {
            if config.dry_run {
                ui.message(&format!(
                    "[dry-run] Would tag {} as {}",
                    action.source, action.target
                ));
                ui.message(&format!("[dry-run] Would push {}", action.target));
            } else {
                self.tag_and_push(action)?;
                ui.message(&format!("Pushed: {}", action.target));
            }
            pushed_images.push(action.target.clone());
        }

        Ok(PushResult {
            tags: plan.tags,
            pushed_images,
            actions: plan.actions,
            dry_run: config.dry_run,
            duration: start.elapsed(),
        })
    }

    fn authenticate_all(&self, config: &ResolvedConfig, regions: &[String]) -> Result<()> {
        for region in regions {
            self.check_cancelled(&format!("authenticate {}", region))?;
            self.auth
                .authenticate(region, &config.auth)
                .map_err(|err| match err {
                    GcrError::Authentication { .. } | GcrError::Cancelled { .. } => err,
                    other => GcrError::Authentication {
                        region: region.clone(),
                        message: other.to_string(),
                    },
                })?;
            tracing::debug!("Authenticated {}", region);
        }
        Ok(())
    }

    fn tag_and_push(&self, action: &PushAction) -> Result<()> {
        self.check_cancelled(&format!("tag {}", action.target))?;
        self.container
            .tag(&action.source, &action.target)
            .map_err(|err| tool_error("tag", &action.target, err))?;

        self.check_cancelled(&format!("push {}", action.target))?;
        self.container
            .push(&action.target)
            .map_err(|err| tool_error("push", &action.target, err))?;

        tracing::info!("Pushed {}", action.target);
        Ok(())
    }

    fn check_cancelled(&self, step: &str) -> Result<()> {
        if self.cancel.is_cancelled() {
            tracing::warn!("Cancelled before {}", step);
            return Err(GcrError::Cancelled {
                step: step.to_string(),
            });
        }
        Ok(())
    }
}

fn tool_error(action: &str, image: &str, err: GcrError) -> GcrError {
    match err {
        GcrError::Cancelled { .. } => err,
        other => GcrError::ToolExecution {
            action: action.to_string(),
            image: image.to_string(),
            message: other.to_string(),
        },
    }
}
