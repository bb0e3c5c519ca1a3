use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::core::discover::{DEFAULT_EXCLUDE_PATTERNS, DEFAULT_EXTENSIONS, DiscoveryOptions};

/// Config file names, checked in priority order; the first one found wins.
pub const CONFIG_FILES: [&str; 2] = ["modroots.toml", ".modroots.toml"];

/// Environment prefix; nested keys use `__` (`MODROOTS__EXTEND_EXCLUDE`).
pub const ENV_PREFIX: &str = "MODROOTS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Exclude patterns; replaces the built-in list
    pub exclude: Vec<String>,

    /// Extra patterns appended after `exclude`
    pub extend_exclude: Vec<String>,

    /// Source file extensions (no dot)
    pub extensions: Vec<String>,

    /// Honor .gitignore while walking
    pub respect_gitignore: bool,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            exclude: DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            extend_exclude: Vec::new(),
            extensions: DEFAULT_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            respect_gitignore: false,
        }
    }
}

impl Config
{
    /// Discovery options described by this config.
    pub fn discovery_options(&self) -> DiscoveryOptions
    {
        DiscoveryOptions::default()
            .with_exclude(
                self.exclude
                    .iter()
                    .cloned(),
            )
            .extend_exclude(
                self.extend_exclude
                    .iter()
                    .cloned(),
            )
            .with_extensions(
                self.extensions
                    .iter()
                    .cloned(),
            )
            .with_gitignore(self.respect_gitignore)
    }
}

/// Locate the config file in `dir`, if any.
pub fn config_file_in(dir: &Path) -> Option<PathBuf>
{
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

/// Load configuration from `dir` plus `MODROOTS__*` environment overrides.
pub fn load_config_from(dir: &Path) -> Result<Config>
{
    let mut builder = config::Config::builder();

    if let Some(path) = config_file_in(dir)
    {
        tracing::debug!(path = %path.display(), "loading config file");
        builder = builder.add_source(config::File::new(
            &path.to_string_lossy(),
            config::FileFormat::Toml,
        ));
    }

    // Lists from the environment are comma separated
    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("exclude")
            .with_list_parse_key("extend_exclude")
            .with_list_parse_key("extensions"),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

/// Load configuration from the working directory.
pub fn load_config() -> Result<Config>
{
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    load_config_from(&cwd)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILES[0]);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if ctx.dry_run
    {
        if !ctx.quiet
        {
            println!("Would write {}:\n{}", config_path.display(), toml_string);
        }
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests
{
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn ctx() -> AppContext
    {
        AppContext { quiet: true, no_color: true, dry_run: false }
    }

    #[test]
    fn test_defaults_when_no_file() -> Result<()>
    {
        let tmp = TempDir::new()?;
        assert!(config_file_in(tmp.path()).is_none());

        let cfg = load_config_from(tmp.path())?;
        assert_eq!(cfg.exclude.len(), DEFAULT_EXCLUDE_PATTERNS.len());
        assert_eq!(cfg.extensions, vec!["py".to_string()]);
        Ok(())
    }

    #[test]
    fn test_file_overrides_and_extends() -> Result<()>
    {
        let tmp = TempDir::new()?;
        fs::write(
            tmp.path()
                .join(".modroots.toml"),
            "exclude = [\"/vendor/\"]\nextend_exclude = [\"/examples/\"]\nrespect_gitignore = true\n",
        )?;

        let cfg = load_config_from(tmp.path())?;
        assert_eq!(cfg.exclude, vec!["/vendor/".to_string()]);
        assert!(cfg.respect_gitignore);
        // unspecified fields keep defaults
        assert_eq!(cfg.extensions, vec!["py".to_string()]);

        let options = cfg.discovery_options();
        assert_eq!(options.exclude, vec!["/vendor/".to_string(), "/examples/".to_string()]);
        assert!(options.respect_gitignore);
        Ok(())
    }

    #[test]
    fn test_init_writes_loadable_file() -> Result<()>
    {
        let tmp = TempDir::new()?;
        let args = InitArgs { path: tmp.path().to_path_buf(), force: false };
        init(args, &ctx())?;

        let cfg = load_config_from(tmp.path())?;
        assert_eq!(cfg, Config::default());

        // second init refuses without --force
        let args = InitArgs { path: tmp.path().to_path_buf(), force: false };
        assert!(init(args, &ctx()).is_err());

        let args = InitArgs { path: tmp.path().to_path_buf(), force: true };
        init(args, &ctx())?;
        Ok(())
    }
}
