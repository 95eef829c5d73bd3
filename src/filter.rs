//! Ignore rules shared by both traversal passes.

use std::collections::BTreeSet;
use std::path::{Component, Path};

/// Directory names excluded from traversal: version-control metadata,
/// build output, dependency caches, editor state, virtual environments.
const DEFAULT_IGNORED_SEGMENTS: &[&str] = &[
    "node_modules",
    "build",
    "dist",
    "__pycache__",
    ".git",
    ".idea",
    ".vscode",
    "venv",
    "env",
    ".next",
];

/// Predicate deciding which paths are excluded from the render and the copy
/// pass. Both passes must consult the same instance so they can never
/// disagree on which entries exist.
///
/// A path is ignored when any of its segments exactly equals a member of the
/// segment set (never a substring match), or when its basename starts with
/// the output-folder prefix, so a run's own output is never recursed into
/// even before the destination is timestamped into existence.
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
    segments: BTreeSet<String>,
    output_prefix: String,
}

impl IgnoreFilter {
    /// Filter with the built-in segment set.
    pub fn new(output_prefix: &str) -> Self {
        Self::with_segments(
            DEFAULT_IGNORED_SEGMENTS.iter().map(|s| s.to_string()),
            output_prefix,
        )
    }

    /// Filter with a caller-supplied segment set.
    pub fn with_segments<I>(segments: I, output_prefix: &str) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        IgnoreFilter {
            segments: segments.into_iter().collect(),
            output_prefix: output_prefix.to_string(),
        }
    }

    /// The configured output-folder base name.
    pub fn output_prefix(&self) -> &str {
        &self.output_prefix
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        let segment_hit = path.components().any(|c| match c {
            Component::Normal(name) => name
                .to_str()
                .is_some_and(|name| self.segments.contains(name)),
            _ => false,
        });
        segment_hit || self.hides_output(path)
    }

    fn hides_output(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.starts_with(&self.output_prefix))
    }
}
