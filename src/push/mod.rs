//! Image promotion across regions.

pub mod orchestrator;

pub use orchestrator::{PushAction, PushOrchestrator, PushPlan, PushResult};
