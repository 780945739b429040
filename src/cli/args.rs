//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::release::ReleaseContext;
use crate::tools::{DEFAULT_DOCKER_BIN, DEFAULT_GCLOUD_BIN};

/// gcr-push - Push release images to Google Artifact Registry and GCR.
#[derive(Debug, Parser)]
#[command(name = "gcr-push")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides gcr.yml + gcr.local.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Dotenv file merged over the process environment
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether the selected command writes JSON to stdout.
    pub fn wants_json(&self) -> bool {
        match &self.command {
            Commands::Describe(args) => args.json,
            Commands::Validate(args) => args.json,
            Commands::Execute(args) => args.json,
            Commands::Tags(args) => args.json,
            Commands::Completions(_) => false,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show plugin metadata
    Describe(DescribeArgs),

    /// Validate configuration
    Validate(ValidateArgs),

    /// Tag and push the source image
    Execute(ExecuteArgs),

    /// Show the images a push would produce
    Tags(TagsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `describe` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DescribeArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ValidateArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Release facts used to resolve tag templates.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ReleaseArgs {
    /// Version being released
    #[arg(long, env = "RELEASE_VERSION", default_value = "")]
    pub release_version: String,

    /// Previously released version
    #[arg(long, env = "RELEASE_PREVIOUS_VERSION", default_value = "")]
    pub previous_version: String,

    /// Git tag of the release
    #[arg(long, env = "RELEASE_TAG_NAME", default_value = "")]
    pub tag_name: String,

    /// Kind of release (major, minor, patch, ...)
    #[arg(long, env = "RELEASE_TYPE", default_value = "")]
    pub release_type: String,

    /// Branch the release was cut from
    #[arg(long, env = "RELEASE_BRANCH", default_value = "")]
    pub branch: String,
}

impl ReleaseArgs {
    /// Build the release context.
    pub fn to_context(&self) -> ReleaseContext {
        ReleaseContext {
            version: self.release_version.clone(),
            previous_version: self.previous_version.clone(),
            tag_name: self.tag_name.clone(),
            release_type: self.release_type.clone(),
            branch: self.branch.clone(),
        }
    }
}

/// Arguments for the `execute` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ExecuteArgs {
    #[command(flatten)]
    pub release: ReleaseArgs,

    /// Preview commands without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Push without validating first
    #[arg(long)]
    pub skip_validation: bool,

    /// Abort the push after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Container CLI to invoke
    #[arg(long, env = "GCR_PUSH_DOCKER", default_value = DEFAULT_DOCKER_BIN)]
    pub docker_bin: String,

    /// gcloud CLI to invoke
    #[arg(long, default_value = DEFAULT_GCLOUD_BIN)]
    pub gcloud_bin: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl Default for ExecuteArgs {
    fn default() -> Self {
        Self {
            release: ReleaseArgs::default(),
            dry_run: false,
            skip_validation: false,
            timeout: None,
            docker_bin: DEFAULT_DOCKER_BIN.to_string(),
            gcloud_bin: DEFAULT_GCLOUD_BIN.to_string(),
            json: false,
        }
    }
}

/// Arguments for the `tags` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TagsArgs {
    #[command(flatten)]
    pub release: ReleaseArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
