//! Filepath: src/core/discover.rs
//! Find the module and package roots beneath a search directory, taking
//! implicit (PEP 420) namespace packages into account.
//!
//! Given a layout like
//!
//! ```text
//! mynamespace/
//!     subpackage_a/
//!         __init__.py
//! ```
//!
//! the root is `mynamespace/subpackage_a` (import name
//! `mynamespace.subpackage_a`), even though `mynamespace` has no init file.
//! The "root init" may sit arbitrarily deep, so every init file is collected
//! and the set is reduced to the topmost entries.
//!
//! Pipeline:
//!   walk `*.py` → per-file filters → init files become their directory
//!   → `RootSet` reduction by filesystem ancestry.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, trace};

use crate::{
    core::{
        error::{DiscoveryError, Result},
        module::FoundModule,
        pattern::{RelPathPattern, compile_all},
        roots::RootSet,
    },
    infra::walk::{SourceWalker, has_dotted_segment},
};

/// Conventional paths that never hold importable project code.
///
/// Adapted from GitHub's `Python.gitignore`. Callers that need more pass
/// their own list (see `DiscoveryOptions::extend_exclude`).
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    // Byte-compiled / optimized / DLL files
    "__pycache__/",
    // Distribution / packaging
    "/build/",
    "/develop-eggs/",
    "/dist/",
    "/downloads/",
    "/eggs/",
    "/.eggs/",
    "/lib/",
    "/lib64/",
    "/parts/",
    "/sdist/",
    "/var/",
    "/wheels/",
    "/pip-wheel-metadata/",
    "/share/python-wheels/",
    "/*.egg-info/",
    // Environments
    ".env/",
    ".venv/",
    "env/",
    "venv/",
    "ENV/",
    "env.bak/",
    "venv.bak/",
    // Editors
    ".vscode/",
    "/docs/",
    "/test/",
    "/tests/",
];

/// Default source extensions.
pub const DEFAULT_EXTENSIONS: &[&str] = &["py"];

/// File stem of a package init file.
pub const INIT_STEM: &str = "__init__";

/// Whole-file (trimmed) contents of a `pkgutil` or `pkg_resources` style
/// namespace init. Matching is exact; any other text is an ordinary package.
pub const NAMESPACE_INIT_CONTENTS: [&str; 3] = [
    "__path__ = __import__('pkgutil').extend_path(__path__, __name__)",
    "__import__('pkg_resources').declare_namespace(__name__)",
    "try:
    __import__('pkg_resources').declare_namespace(__name__)
except ImportError:
    __path__ = __import__('pkgutil').extend_path(__path__, __name__)",
];

/// Caller-supplied discovery settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions
{
    /// Exclude patterns, `RelPathPattern` syntax
    pub exclude: Vec<String>,

    /// Source extensions without the dot
    pub extensions: Vec<String>,

    /// Honor .gitignore and friends while walking
    pub respect_gitignore: bool,
}

impl Default for DiscoveryOptions
{
    fn default() -> Self
    {
        Self {
            exclude: to_strings(DEFAULT_EXCLUDE_PATTERNS),
            extensions: to_strings(DEFAULT_EXTENSIONS),
            respect_gitignore: false,
        }
    }
}

impl DiscoveryOptions
{
    /// Replace the exclude list.
    pub fn with_exclude<I, S>(
        mut self,
        patterns: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = patterns
            .into_iter()
            .map(Into::into)
            .collect();
        self
    }

    /// Append to the exclude list.
    pub fn extend_exclude<I, S>(
        mut self,
        patterns: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude
            .extend(
                patterns
                    .into_iter()
                    .map(Into::into),
            );
        self
    }

    pub fn with_extensions<I, S>(
        mut self,
        extensions: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(Into::into)
            .collect();
        self
    }

    pub fn with_gitignore(
        mut self,
        respect: bool,
    ) -> Self
    {
        self.respect_gitignore = respect;
        self
    }
}

fn to_strings(items: &[&str]) -> Vec<String>
{
    items
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Why a candidate file was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection
{
    NotAFile,
    /// `__init__.py` directly in the search dir has no import name
    BareInit,
    DottedParent,
    NamespaceInit,
    Excluded(String),
}

/// Compiled, reusable discovery configuration.
#[derive(Clone)]
pub struct Discovery
{
    exclude: Vec<RelPathPattern>,
    walker: SourceWalker,
}

impl Discovery
{
    /// Compile every exclude pattern up front.
    pub fn new(options: &DiscoveryOptions) -> Result<Self>
    {
        let exclude = compile_all(&options.exclude)?;
        let walker = SourceWalker::new(
            options
                .extensions
                .iter()
                .cloned(),
        )
        .with_prune_patterns(&exclude)
        .with_gitignore(options.respect_gitignore);

        Ok(Self { exclude, walker })
    }

    pub fn exclude_patterns(&self) -> &[RelPathPattern]
    {
        &self.exclude
    }

    /// First exclude pattern matching `rel_path`, checked against `base`.
    pub fn excluded_by(
        &self,
        rel_path: &Path,
        base: &Path,
    ) -> Result<Option<&RelPathPattern>>
    {
        for pattern in &self.exclude
        {
            if pattern.is_match(rel_path, Some(base))?
            {
                return Ok(Some(pattern));
            }
        }
        Ok(None)
    }

    /// Run discovery under `search_dir`.
    ///
    /// An empty path searches the working directory. A missing directory
    /// yields no modules; a path that exists but is not a directory is
    /// `DiscoveryError::NotADirectory`.
    pub fn find<P: AsRef<Path>>(
        &self,
        search_dir: P,
    ) -> Result<Vec<FoundModule>>
    {
        self.find_in(search_dir.as_ref())
    }

    #[instrument(skip_all, fields(search_dir = %search_dir.display()))]
    fn find_in(
        &self,
        search_dir: &Path,
    ) -> Result<Vec<FoundModule>>
    {
        let walk_dir = walk_root(search_dir);

        if !walk_dir.exists()
        {
            debug!("search directory does not exist");
            return Ok(Vec::new());
        }

        // Absolute base so relative paths and dir-only checks line up
        let base = dunce::canonicalize(walk_dir).map_err(|e| DiscoveryError::io(search_dir, e))?;

        if !base.is_dir()
        {
            return Err(DiscoveryError::NotADirectory { path: search_dir.to_path_buf() });
        }

        let files = self
            .walker
            .walk(&base)?;
        let candidates = files.len();

        let mut roots = RootSet::new(FoundModule::is_covered_by);

        for path in files
        {
            let Ok(rel_path) = path.strip_prefix(&base)
            else
            {
                continue;
            };
            let rel_path = rel_path.to_path_buf();

            if let Some(why) = self.screen(&base, &path, &rel_path)?
            {
                trace!(path = %rel_path.display(), reason = ?why, "rejected");
                continue;
            }

            // An init file stands for its package directory; the bare
            // root-level case was rejected above, so a parent exists.
            let (path, rel_path) = if is_init_file(&path)
            {
                (parent_of(&path), parent_of(&rel_path))
            }
            else
            {
                (path, rel_path)
            };

            roots.push(FoundModule::new(path, rel_path, search_dir));
        }

        let roots = roots.into_vec();
        debug!(candidates, roots = roots.len(), "discovery finished");

        Ok(roots)
    }

    /// Apply the per-file filters in order; `None` means keep.
    fn screen(
        &self,
        base: &Path,
        path: &Path,
        rel_path: &Path,
    ) -> Result<Option<Rejection>>
    {
        if !path.is_file()
        {
            return Ok(Some(Rejection::NotAFile));
        }

        let parent = rel_path
            .parent()
            .unwrap_or(Path::new(""));

        if is_init_file(rel_path) && parent.as_os_str().is_empty()
        {
            return Ok(Some(Rejection::BareInit));
        }

        if has_dotted_segment(parent)
        {
            return Ok(Some(Rejection::DottedParent));
        }

        if is_namespace_init(path)?
        {
            return Ok(Some(Rejection::NamespaceInit));
        }

        if let Some(pattern) = self.excluded_by(rel_path, base)?
        {
            return Ok(Some(Rejection::Excluded(pattern.to_string())));
        }

        Ok(None)
    }
}

/// An empty path names the working directory.
fn walk_root(search_dir: &Path) -> &Path
{
    if search_dir
        .as_os_str()
        .is_empty()
    {
        Path::new(".")
    }
    else
    {
        search_dir
    }
}

fn parent_of(path: &Path) -> PathBuf
{
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Is `path` named like a package init (`__init__.<ext>`)?
pub fn is_init_file(path: &Path) -> bool
{
    path.file_stem()
        .is_some_and(|s| s == INIT_STEM)
        && path
            .extension()
            .is_some()
}

/// Is this an init file whose whole content declares a `pkgutil` or
/// `pkg_resources` namespace?
pub fn is_namespace_init(path: &Path) -> Result<bool>
{
    if !is_init_file(path)
    {
        return Ok(false);
    }

    let bytes = fs::read(path).map_err(|e| DiscoveryError::io(path, e))?;

    // Undecodable text can never equal one of the templates
    let Ok(text) = std::str::from_utf8(&bytes)
    else
    {
        return Ok(false);
    };

    Ok(is_namespace_declaration(text))
}

/// Exact comparison of trimmed `text` against the known declarations.
pub fn is_namespace_declaration(text: &str) -> bool
{
    let text = text.trim();
    NAMESPACE_INIT_CONTENTS
        .iter()
        .any(|known| *known == text)
}

/// Find module roots under `search_dir`, excluding paths matched by
/// `exclude` (pass `DEFAULT_EXCLUDE_PATTERNS` for the conventional set).
pub fn find_module_roots<P, I, S>(
    search_dir: P,
    exclude: I,
) -> Result<Vec<FoundModule>>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let options = DiscoveryOptions::default().with_exclude(
        exclude
            .into_iter()
            .map(|s| s.as_ref().to_string()),
    );
    Discovery::new(&options)?.find(search_dir)
}
