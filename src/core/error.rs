//! Error taxonomy for pattern compilation, matching, and discovery.

use std::path::PathBuf;

use miette::Diagnostic;

/// Errors raised by the library surface.
///
/// `EmptyPattern`, `InvalidGlob`, and `AbsolutePath` are invalid-argument
/// errors; `NotADirectory` is a caller precondition violation.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum DiscoveryError
{
    /// Pattern text has no non-empty `/`-separated terms.
    #[error("must provide pattern with terms; given {pattern:?}")]
    #[diagnostic(
        code(modroots::pattern::empty),
        help("blank lines and comments must be filtered out before compiling")
    )]
    EmptyPattern
    {
        pattern: String
    },

    /// A term is not a valid shell-style glob.
    #[error("invalid term {term:?} in pattern {pattern:?}")]
    #[diagnostic(code(modroots::pattern::glob))]
    InvalidGlob
    {
        pattern: String,
        term: String,
        #[source]
        source: globset::Error,
    },

    /// The matcher only accepts relative paths.
    #[error("only matches relative paths; given {}", path.display())]
    #[diagnostic(code(modroots::pattern::absolute_path))]
    AbsolutePath
    {
        path: PathBuf
    },

    /// The search directory exists but is something other than a directory.
    #[error("search directory must be a directory, given {}", path.display())]
    #[diagnostic(code(modroots::discover::not_a_directory))]
    NotADirectory
    {
        path: PathBuf
    },

    #[error("failed to read {}", path.display())]
    #[diagnostic(code(modroots::io))]
    Io
    {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory enumeration failed part way through.
    #[error("failed to walk source tree")]
    #[diagnostic(code(modroots::walk))]
    Walk(#[from] ignore::Error),
}

impl DiscoveryError
{
    /// Wrap an I/O error with the path it concerns.
    pub fn io(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self
    {
        Self::Io { path: path.into(), source }
    }

    /// True for errors caused by a bad pattern or path argument.
    pub fn is_invalid_argument(&self) -> bool
    {
        matches!(
            self,
            Self::EmptyPattern { .. } | Self::InvalidGlob { .. } | Self::AbsolutePath { .. }
        )
    }
}

/// Result alias for library operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
