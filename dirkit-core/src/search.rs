// SPDX-License-Identifier: AGPL-3.0-or-later
//! Recursive filename search
//!
//! A [`Search`] walks the tree under a root lazily and yields the full path
//! of every entry whose file name contains the pattern. Matching is literal
//! and case-sensitive. Symlinks are reported by their own name and never
//! followed. Entries the walker cannot read are logged and skipped, so one
//! unreadable directory does not end the search.

use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

/// Literal, case-sensitive substring match on a base name
pub fn matches_name(pattern: &str, name: &str) -> bool {
    name.contains(pattern)
}

/// Lazy walk over everything below a root, filtered by name
pub struct Search {
    walker: walkdir::IntoIter,
    pattern: String,
}

impl Search {
    /// Starts a fresh walk. The root itself is never yielded.
    pub fn new(root: &Path, pattern: impl Into<String>) -> Self {
        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .into_iter();
        Self { walker, pattern: pattern.into() }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Iterator for Search {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            match self.walker.next()? {
                Ok(entry) => {
                    let name = entry.file_name().to_string_lossy();
                    if matches_name(&self.pattern, &name) {
                        return Some(entry.path().display().to_string());
                    }
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "?".to_string());
                    warn!("Skipping unreadable entry during search: {path}: {err}");
                }
            }
        }
    }
}
