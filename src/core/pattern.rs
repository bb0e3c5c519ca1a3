//! Filepath: src/core/pattern.rs
//! Small gitignore-style matcher for *relative* paths.
//!
//! A pattern is split on `/` into terms, and each term is matched against
//! one path segment with shell-glob rules (`*`, `?`, `[...]`). A `**` term
//! lets the match scan forward through segments until the next term hits.
//! Backslashes and braces inside a term are plain characters.
//!
//! Syntax, applied in this order at compile time:
//!   1) Leading `!` negates the final verdict; leading `\!` is a literal `!`.
//!   2) Trailing `/` restricts matches to directories (when a base is given).
//!   3) Any remaining `/` anchors the pattern to the start of the path.
//!   4) Empty terms are dropped; at least one term must remain.
//!
//! No attempt is made at full gitignore fidelity.

use std::{
    borrow::Cow,
    ffi::OsStr,
    fmt,
    path::{Component, Path},
    str::FromStr,
};

use globset::{GlobBuilder, GlobMatcher};

use crate::core::error::{DiscoveryError, Result};

/// One compiled `/`-delimited term.
#[derive(Clone)]
enum Term
{
    /// `**`: un-anchor and scan forward
    Recursive,

    /// Shell-glob matched against exactly one segment
    Glob
    {
        text: String, matcher: GlobMatcher
    },
}

impl Term
{
    fn compile(
        pattern: &str,
        text: &str,
    ) -> Result<Self>
    {
        if text == "**"
        {
            return Ok(Term::Recursive);
        }

        let matcher = GlobBuilder::new(&literal_braces(text))
            .literal_separator(true)
            .backslash_escape(false)
            .build()
            .map_err(|source| DiscoveryError::InvalidGlob {
                pattern: pattern.to_string(),
                term: text.to_string(),
                source,
            })?
            .compile_matcher();

        Ok(Term::Glob { text: text.to_string(), matcher })
    }

    fn as_str(&self) -> &str
    {
        match self
        {
            Term::Recursive => "**",
            Term::Glob { text, .. } => text,
        }
    }
}

/// A compiled exclusion rule for relative paths.
#[derive(Clone)]
pub struct RelPathPattern
{
    /// Text exactly as supplied
    pattern: String,

    /// Never empty
    terms: Vec<Term>,

    /// Must match from the first path segment
    anchored: bool,

    /// Invert the verdict
    negate: bool,

    /// Matched prefix must be a directory under the base
    dir_only: bool,
}

impl RelPathPattern
{
    /// Compile `pattern`. Fails when no usable terms remain (`""`, `"/"`,
    /// `"///"`, `"!"`) or a term is not a valid glob.
    pub fn new(pattern: &str) -> Result<Self>
    {
        let mut rest = pattern;
        let mut negate = false;

        if let Some(stripped) = rest.strip_prefix('!')
        {
            negate = true;
            rest = stripped;
        }
        else if rest.starts_with("\\!")
        {
            rest = &rest[1..];
        }

        let dir_only = rest.ends_with('/');
        if dir_only
        {
            rest = rest.trim_end_matches('/');
        }

        let anchored = rest.contains('/');

        let terms = rest
            .split('/')
            .filter(|t| !t.is_empty())
            .map(|t| Term::compile(pattern, t))
            .collect::<Result<Vec<_>>>()?;

        if terms.is_empty()
        {
            return Err(DiscoveryError::EmptyPattern { pattern: pattern.to_string() });
        }

        Ok(Self { pattern: pattern.to_string(), terms, anchored, negate, dir_only })
    }

    /// The pattern text as given.
    pub fn as_str(&self) -> &str
    {
        &self.pattern
    }

    pub fn terms(&self) -> impl Iterator<Item = &str>
    {
        self.terms
            .iter()
            .map(Term::as_str)
    }

    pub fn is_anchored(&self) -> bool
    {
        self.anchored
    }

    pub fn is_negated(&self) -> bool
    {
        self.negate
    }

    pub fn is_dir_only(&self) -> bool
    {
        self.dir_only
    }

    /// Test `rel_path` against this pattern.
    ///
    /// When `rel_to` is given and the pattern is directory-only, the matched
    /// prefix of `rel_path` must be a directory under `rel_to`. Absolute
    /// paths are rejected.
    pub fn is_match(
        &self,
        rel_path: &Path,
        rel_to: Option<&Path>,
    ) -> Result<bool>
    {
        if rel_path.is_absolute() || rel_path.has_root()
        {
            return Err(DiscoveryError::AbsolutePath { path: rel_path.to_path_buf() });
        }

        let parts: Vec<&OsStr> = rel_path
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .map(Component::as_os_str)
            .collect();

        let raw = self.walk(&parts, rel_to);

        Ok(raw != self.negate)
    }

    /// Advance through (term, segment) pairs. Each step has exactly one
    /// successor, so this is a plain loop with no backtracking.
    fn walk(
        &self,
        parts: &[&OsStr],
        rel_to: Option<&Path>,
    ) -> bool
    {
        let mut anchored = self.anchored;
        let mut term_index = 0;
        let mut part_index = 0;

        loop
        {
            let Some(term) = self
                .terms
                .get(term_index)
            else
            {
                return match rel_to
                {
                    Some(base) if self.dir_only => parts[..part_index]
                        .iter()
                        .fold(base.to_path_buf(), |acc, p| acc.join(p))
                        .is_dir(),
                    _ => true,
                };
            };

            let Some(part) = parts.get(part_index)
            else
            {
                return false;
            };

            match term
            {
                Term::Recursive =>
                {
                    anchored = false;
                    term_index += 1;
                }
                Term::Glob { matcher, .. } if matcher.is_match(Path::new(part)) =>
                {
                    anchored = true;
                    term_index += 1;
                    part_index += 1;
                }
                Term::Glob { .. } if anchored => return false,
                Term::Glob { .. } => part_index += 1,
            }
        }
    }
}

impl fmt::Debug for RelPathPattern
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        write!(f, "RelPathPattern({:?})", self.pattern)
    }
}

impl fmt::Display for RelPathPattern
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        f.write_str(&self.pattern)
    }
}

impl PartialEq for RelPathPattern
{
    fn eq(
        &self,
        other: &Self,
    ) -> bool
    {
        self.pattern == other.pattern
    }
}

/// Wrap `{` and `}` outside bracket classes in a class of their own so
/// globset reads them literally instead of as alternation.
fn literal_braces(term: &str) -> Cow<'_, str>
{
    if !term.contains(['{', '}'])
    {
        return Cow::Borrowed(term);
    }

    let mut out = String::with_capacity(term.len() + 8);
    let mut in_class = false;
    // A `]` right after `[` (or `[!`) belongs to the class
    let mut leading = false;
    let mut negated = false;

    for c in term.chars()
    {
        if in_class
        {
            out.push(c);
            if c == ']' && !leading
            {
                in_class = false;
            }
            else if leading && !negated && (c == '!' || c == '^')
            {
                negated = true;
            }
            else
            {
                leading = false;
            }
            continue;
        }

        match c
        {
            '{' => out.push_str("[{]"),
            '}' => out.push_str("[}]"),
            '[' =>
            {
                out.push(c);
                in_class = true;
                leading = true;
                negated = false;
            }
            _ => out.push(c),
        }
    }

    Cow::Owned(out)
}

impl Eq for RelPathPattern {}

impl FromStr for RelPathPattern
{
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self>
    {
        Self::new(s)
    }
}

impl TryFrom<&str> for RelPathPattern
{
    type Error = DiscoveryError;

    fn try_from(value: &str) -> Result<Self>
    {
        Self::new(value)
    }
}

impl TryFrom<String> for RelPathPattern
{
    type Error = DiscoveryError;

    fn try_from(value: String) -> Result<Self>
    {
        Self::new(&value)
    }
}

/// Compile every entry of `patterns`, failing on the first bad one.
pub fn compile_all<I, S>(patterns: I) -> Result<Vec<RelPathPattern>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|p| RelPathPattern::new(p.as_ref()))
        .collect()
}
