//! Tag template resolution.
//!
//! Tags are written with a fixed set of placeholders:
//!
//! - `{{.Version}}`, `{{.PreviousVersion}}`, `{{.TagName}}`, `{{.ReleaseType}}`
//! - `{{.Branch}}`, with every `/` replaced by `-`
//!
//! This is plain string replacement, not a template language. A template
//! containing `{{if` cannot be resolved statically and is dropped. Unknown
//! placeholders pass through unchanged.
//!
//! # Example
//!
//! ```
//! use gcr_push::release::ReleaseContext;
//! use gcr_push::template::resolve_tags;
//!
//! let ctx = ReleaseContext {
//!     version: "1.2.3".to_string(),
//!     branch: "release/1.x".to_string(),
//!     ..Default::default()
//! };
//! let templates = vec![
//!     "v{{.Version}}".to_string(),
//!     "{{.Branch}}".to_string(),
//!     "{{if .Prerelease}}pre{{end}}".to_string(),
//! ];
//! let tags = resolve_tags(&templates, &ctx);
//! assert_eq!(tags, vec!["v1.2.3", "release-1.x"]);
//! ```

use crate::release::ReleaseContext;

/// Marker of a conditional construct.
const CONDITIONAL_MARKER: &str = "{{if";

/// A supported placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Version,
    PreviousVersion,
    TagName,
    ReleaseType,
    Branch,
}

impl Placeholder {
    /// Placeholders substituted unconditionally, in substitution order.
    const PLAIN: [Placeholder; 4] = [
        Placeholder::Version,
        Placeholder::PreviousVersion,
        Placeholder::TagName,
        Placeholder::ReleaseType,
    ];

    /// Literal text of this placeholder in a template.
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Version => "{{.Version}}",
            Placeholder::PreviousVersion => "{{.PreviousVersion}}",
            Placeholder::TagName => "{{.TagName}}",
            Placeholder::ReleaseType => "{{.ReleaseType}}",
            Placeholder::Branch => "{{.Branch}}",
        }
    }

    fn value(self, ctx: &ReleaseContext) -> &str {
        match self {
            Placeholder::Version => &ctx.version,
            Placeholder::PreviousVersion => &ctx.previous_version,
            Placeholder::TagName => &ctx.tag_name,
            Placeholder::ReleaseType => &ctx.release_type,
            Placeholder::Branch => &ctx.branch,
        }
    }
}

/// Check if a template uses an unsupported conditional.
pub fn is_conditional(template: &str) -> bool {
    template.contains(CONDITIONAL_MARKER)
}

/// Resolve a single template.
///
/// Returns an empty string for conditional templates.
pub fn resolve_tag(template: &str, ctx: &ReleaseContext) -> String {
    if is_conditional(template) {
        return String::new();
    }

    let mut result = template.to_string();
    for placeholder in Placeholder::PLAIN {
        result = result.replace(placeholder.token(), placeholder.value(ctx));
    }

    // An empty branch leaves the placeholder in place.
    let branch = Placeholder::Branch.value(ctx);
    if !branch.is_empty() {
        result = result.replace(Placeholder::Branch.token(), &branch.replace('/', "-"));
    }

    result
}

/// Resolve every template, dropping those that resolve to empty.
///
/// Order of the remaining tags follows the input.
pub fn resolve_tags(templates: &[String], ctx: &ReleaseContext) -> Vec<String> {
    templates
        .iter()
        .filter_map(|template| {
            let tag = resolve_tag(template, ctx);
            if tag.is_empty() {
                tracing::debug!("Dropping tag template '{}'", template);
                None
            } else {
                Some(tag)
            }
        })
        .collect()
}
