//! **modroots** - Find importable Python module and package roots
//!
//! Walks a directory, filters candidates through gitignore-style exclude
//! patterns, and collapses them to their topmost roots so that implicit
//! (PEP 420) namespace packages resolve to names like `ns.sub`.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core discovery pipeline
pub mod core {
    /// Error taxonomy shared by every core operation
    pub mod error;
    pub use error::DiscoveryError;

    /// Gitignore-style matcher for relative paths
    pub mod pattern;
    pub use pattern::RelPathPattern;

    /// Reduce items to their topmost roots under a descendant relation
    pub mod roots;
    pub use roots::{RootSet, reduce_roots};

    /// Discovered module descriptors
    pub mod module;
    pub use module::{FoundModule, ModuleKind, ModuleRecord};

    /// Namespace-aware module root discovery
    pub mod discover;
    pub use discover::{
        DEFAULT_EXCLUDE_PATTERNS, Discovery, DiscoveryOptions, find_module_roots,
    };
}

/// Infrastructure - configuration and filesystem walking
pub mod infra {
    /// Configuration management with TOML files and env overrides
    pub mod config;
    pub use self::config::{Config, init as config_init, load_config};

    /// Recursive source-file walker
    pub mod walk;
    pub use walk::SourceWalker;
}

/// Subcommand handlers
pub mod cli_ext {
    pub mod find_cmd;
    pub mod match_cmd;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use cli_ext::{find_cmd::run as find_run, match_cmd::run as match_run};

// Core types for external consumers
pub use crate::core::{
    DEFAULT_EXCLUDE_PATTERNS, Discovery, DiscoveryError, DiscoveryOptions, FoundModule,
    RelPathPattern, find_module_roots, reduce_roots,
};
