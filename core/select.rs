use crate::error::{AppError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log;
use serde::{Deserialize, Serialize};

/// Directory names never descended into during the scan.
pub const PRUNED_DIRS: [&str; 2] = ["node_modules", ".git"];

const SKIP_NAMES: [&str; 5] = [
    "node_modules",
    ".env",
    "package-lock.json",
    ".gitignore",
    "robots.txt",
];
const SKIP_EXTENSIONS: [&str; 6] = [".png", ".jpg", ".jpeg", ".gif", ".ico", ".svg"];

const INCLUDED_EXTENSIONS: [&str; 5] = [".js", ".jsx", ".json", ".css", ".html"];
const INCLUDED_NAMES: [&str; 2] = ["tailwind.config.js", "postcss.config.js"];

/// How skip tokens and the `public` directory marker are matched.
///
/// `Legacy` matches anywhere in the path string, so `src/.envoy/a.js` or
/// `publications/x.js` are caught as well. `Segment` only matches whole
/// path segments (or the file extension for image tokens).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    Legacy,
    Segment,
}

impl MatchMode {
    pub fn is_skipped(self, relative_path: &str) -> bool {
        match self {
            MatchMode::Legacy => SKIP_NAMES
                .iter()
                .chain(SKIP_EXTENSIONS.iter())
                .any(|pattern| relative_path.contains(pattern)),
            MatchMode::Segment => {
                let segments: Vec<&str> = relative_path.split('/').collect();
                let name_hit = segments.iter().any(|segment| {
                    SKIP_NAMES.iter().any(|token| {
                        *segment == *token
                            || segment
                                .strip_prefix(token)
                                .is_some_and(|rest| rest.starts_with('.'))
                    })
                });
                let extension_hit = segments.last().is_some_and(|name| {
                    SKIP_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
                });
                name_hit || extension_hit
            }
        }
    }
}

pub fn is_pruned_dir(name: &str) -> bool {
    PRUNED_DIRS.contains(&name)
}

/// Allow-list check on the bare file name.
pub fn is_eligible_name(name: &str) -> bool {
    INCLUDED_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) || INCLUDED_NAMES.contains(&name)
}

#[derive(Debug, Clone)]
pub struct Selector {
    mode: MatchMode,
    extra_excludes: GlobSet,
}

impl Selector {
    pub fn new(mode: MatchMode, exclude_patterns: &[String]) -> Result<Self> {
        Ok(Self {
            mode,
            extra_excludes: build_glob_set(exclude_patterns)?,
        })
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// `relative_path` uses `/` separators and is relative to the project root.
    pub fn is_included(&self, relative_path: &str) -> bool {
        if self.mode.is_skipped(relative_path) {
            log::trace!("Skip pattern matched: {}", relative_path);
            return false;
        }
        if self.extra_excludes.is_match(relative_path) {
            log::trace!("Excluded by configured pattern: {}", relative_path);
            return false;
        }
        let name = relative_path.rsplit('/').next().unwrap_or(relative_path);
        is_eligible_name(name)
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self {
            mode: MatchMode::default(),
            extra_excludes: GlobSet::empty(),
        }
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern_str in patterns {
        let mut processed_pattern = pattern_str.trim().to_string();
        if processed_pattern.ends_with('/') && processed_pattern.len() > 1 {
            processed_pattern.push_str("**");
        }
        let glob = Glob::new(&processed_pattern).map_err(|e| {
            log::error!("Invalid glob pattern \"{}\": {}", pattern_str, e);
            AppError::Glob(format!(
                "Invalid glob pattern \"{}\" (processed as \"{}\"): {}",
                pattern_str, processed_pattern, e
            ))
        })?;
        log::trace!("Adding exclude pattern: {}", processed_pattern);
        builder.add(glob);
    }
    Ok(builder.build()?)
}
