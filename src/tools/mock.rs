//! Recording test doubles for the external tools.
//!
//! Both mocks append to a shared [`CallLog`], so tests can assert the exact
//! interleaving of authenticate, tag and push calls.
//!
//! # Example
//!
//! ```
//! use gcr_push::config::AuthConfig;
//! use gcr_push::tools::{CallLog, ContainerTool, MockContainerTool, MockRegistryAuth, RegistryAuth, ToolCall};
//!
//! let log = CallLog::new();
//! let auth = MockRegistryAuth::new(log.clone());
//! let docker = MockContainerTool::new(log.clone()).fail_push("gcr.io/p/app:bad");
//!
//! auth.authenticate("us", &AuthConfig::default()).unwrap();
//! docker.tag("app", "gcr.io/p/app:bad").unwrap();
//! assert!(docker.push("gcr.io/p/app:bad").is_err());
//! assert_eq!(log.calls().len(), 3);
//! assert!(matches!(log.calls()[0], ToolCall::Authenticate { .. }));
//! ```

use crate::config::schema::AuthConfig;
use crate::error::{GcrError, Result};
use crate::shell::CancellationToken;
use crate::tools::{ContainerTool, RegistryAuth};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// A recorded tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    Authenticate { region: String, method: String },
    Tag { source: String, target: String },
    Push { target: String },
    Exists { image: String },
}

/// Ordered log of tool invocations, shared between mocks.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<ToolCall>>>);

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: ToolCall) {
        if let Ok(mut calls) = self.0.lock() {
            calls.push(call);
        }
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<ToolCall> {
        self.0.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Regions authenticated, in order.
    pub fn authenticated_regions(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ToolCall::Authenticate { region, .. } => Some(region),
                _ => None,
            })
            .collect()
    }

    /// Targets pushed (attempted), in order.
    pub fn pushed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ToolCall::Push { target } => Some(target),
                _ => None,
            })
            .collect()
    }

    /// Number of tag and push calls.
    pub fn tag_push_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ToolCall::Tag { .. } | ToolCall::Push { .. }))
            .count()
    }
}

/// [`ContainerTool`] that records calls and fails on demand.
#[derive(Debug, Default)]
pub struct MockContainerTool {
    log: CallLog,
    existing: HashSet<String>,
    fail_tag: HashSet<String>,
    fail_push: HashSet<String>,
    cancel_on_push: Option<(String, CancellationToken)>,
}

impl MockContainerTool {
    /// Create a mock recording into `log`.
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Default::default()
        }
    }

    /// Report `image` as present locally.
    pub fn with_image(mut self, image: &str) -> Self {
        self.existing.insert(image.to_string());
        self
    }

    /// Fail when tagging to `target`.
    pub fn fail_tag(mut self, target: &str) -> Self {
        self.fail_tag.insert(target.to_string());
        self
    }

    /// Fail when pushing `target`.
    pub fn fail_push(mut self, target: &str) -> Self {
        self.fail_push.insert(target.to_string());
        self
    }

    /// Cancel `token` once `target` has been pushed.
    pub fn cancel_on_push(mut self, target: &str, token: CancellationToken) -> Self {
        self.cancel_on_push = Some((target.to_string(), token));
        self
    }
}

impl ContainerTool for MockContainerTool {
    fn tag(&self, source: &str, target: &str) -> Result<()> {
        self.log.record(ToolCall::Tag {
            source: source.to_string(),
            target: target.to_string(),
        });
        if self.fail_tag.contains(target) {
            return Err(GcrError::CommandFailed {
                command: format!("docker tag {} {}", source, target),
                code: Some(1),
                output: "No such image".to_string(),
            });
        }
        Ok(())
    }

    fn push(&self, target: &str) -> Result<()> {
        self.log.record(ToolCall::Push {
            target: target.to_string(),
        });
        if self.fail_push.contains(target) {
            return Err(GcrError::CommandFailed {
                command: format!("docker push {}", target),
                code: Some(1),
                output: "denied: Permission denied".to_string(),
            });
        }
        if let Some((after, token)) = &self.cancel_on_push {
            if after == target {
                token.cancel();
            }
        }
        Ok(())
    }

    fn exists(&self, image: &str) -> bool {
        self.log.record(ToolCall::Exists {
            image: image.to_string(),
        });
        self.existing.contains(image)
    }
}

/// [`RegistryAuth`] that records calls and fails on demand.
#[derive(Debug, Default)]
pub struct MockRegistryAuth {
    log: CallLog,
    fail_regions: HashSet<String>,
}

impl MockRegistryAuth {
    /// Create a mock recording into `log`.
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Default::default()
        }
    }

    /// Fail authentication for `region`.
    pub fn fail_region(mut self, region: &str) -> Self {
        self.fail_regions.insert(region.to_string());
        self
    }
}

impl RegistryAuth for MockRegistryAuth {
    fn authenticate(&self, region: &str, auth: &AuthConfig) -> Result<()> {
        self.log.record(ToolCall::Authenticate {
            region: region.to_string(),
            method: auth.method.to_string(),
        });
        if self.fail_regions.contains(region) {
            return Err(GcrError::Authentication {
                region: region.to_string(),
                message: "gcloud auth failed".to_string(),
            });
        }
        Ok(())
    }
}
