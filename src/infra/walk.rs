//! Filepath: src/infra/walk.rs
//! Source-file walker for module discovery.
//! - Yields every non-directory entry whose extension is selected
//! - Hidden files included, ignore files NOT honored by default
//!   (results match a plain recursive glob)
//! - Optional .gitignore / .ignore / .git/info/exclude support
//! - Early pruning of dotted directories and of directories matched by
//!   non-negated exclude patterns
//! - Deterministic ordering for stable results
//!
//! Backed by ripgrep's `ignore` crate.

use std::path::{Component, Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};
use tracing::trace;

use crate::core::{error::Result, pattern::RelPathPattern};

/// Recursive walker over source files beneath one root.
#[derive(Clone)]
pub struct SourceWalker
{
    /// Extensions without the leading dot ("py", "pyi")
    extensions: Vec<String>,

    /// Directory patterns that stop descent
    prune_patterns: Vec<RelPathPattern>,

    /// Honor ignore files; default false
    respect_gitignore: bool,
}

impl SourceWalker
{
    /// Build a walker selecting files by extension.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(Into::into)
                .collect(),
            prune_patterns: Vec::new(),
            respect_gitignore: false,
        }
    }

    /// (Optional) Skip directories matched by these patterns.
    ///
    /// Negated patterns are dropped here: a negated match on a directory
    /// says nothing about the paths below it.
    pub fn with_prune_patterns(
        mut self,
        patterns: &[RelPathPattern],
    ) -> Self
    {
        self.prune_patterns = patterns
            .iter()
            .filter(|p| !p.is_negated())
            .cloned()
            .collect();
        self
    }

    /// (Optional) Honor .gitignore, .ignore and .git/info/exclude.
    pub fn with_gitignore(
        mut self,
        respect: bool,
    ) -> Self
    {
        self.respect_gitignore = respect;
        self
    }

    pub fn extensions(&self) -> &[String]
    {
        &self.extensions
    }

    /// Does `path` carry one of the selected extensions?
    pub fn is_source_file(
        &self,
        path: &Path,
    ) -> bool
    {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|x| x == ext)
            })
    }

    /// Internal: construct a configured WalkBuilder for `root`.
    fn build_walk(
        &self,
        root: &Path,
    ) -> WalkBuilder
    {
        let mut b = WalkBuilder::new(root);

        // Start from a bare recursive walk: hidden files, no ignore files
        b.standard_filters(false);

        if self.respect_gitignore
        {
            b.ignore(true);
            b.git_ignore(true);
            b.git_exclude(true);
            b.parents(true);
            b.require_git(false);
        }

        b.follow_links(false);

        let base = root.to_path_buf();
        let prune = self
            .prune_patterns
            .clone();
        b.filter_entry(move |ent: &DirEntry| {
            if ent.depth() == 0
            {
                return true;
            }

            let is_dir = ent
                .file_type()
                .is_some_and(|ft| ft.is_dir());
            if !is_dir
            {
                return true;
            }

            let Ok(rel) = ent
                .path()
                .strip_prefix(&base)
            else
            {
                return true;
            };

            if has_dotted_segment(rel)
            {
                trace!(dir = %rel.display(), "pruned dotted directory");
                return false;
            }

            let hit = prune
                .iter()
                .find(|p| {
                    p.is_match(rel, Some(base.as_path()))
                        .unwrap_or(false)
                });
            if let Some(p) = hit
            {
                trace!(dir = %rel.display(), pattern = %p, "pruned excluded directory");
                return false;
            }

            true
        });

        b
    }

    /// Traverse source files under `root`.
    /// Returns a **sorted** list of absolute paths; walk errors propagate.
    pub fn walk<P: AsRef<Path>>(
        &self,
        root: P,
    ) -> Result<Vec<PathBuf>>
    {
        let root_path = root.as_ref();
        let mut out = Vec::new();

        for res in self
            .build_walk(root_path)
            .build()
        {
            let entry = res?;

            // Directories are walked, not yielded
            if entry
                .file_type()
                .is_none_or(|ft| ft.is_dir())
            {
                continue;
            }

            if self.is_source_file(entry.path())
            {
                out.push(entry.into_path());
            }
        }

        // Deterministic order (stable results across runs)
        out.sort();

        Ok(out)
    }
}

/// True when any segment of `rel` contains a `.`.
pub fn has_dotted_segment(rel: &Path) -> bool
{
    rel.components()
        .any(|c| match c
        {
            Component::Normal(s) => s
                .to_string_lossy()
                .contains('.'),
            _ => false,
        })
}
