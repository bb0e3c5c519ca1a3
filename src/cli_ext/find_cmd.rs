//! `modroots find`: run discovery and print the root set.

use std::io::{IsTerminal, Write};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tabled::Table;
use tracing::{instrument, warn};

use crate::{
    cli::{AppContext, FindArgs, OutputFormat},
    core::{
        discover::{Discovery, DiscoveryOptions},
        module::{FoundModule, ModuleKind, ModuleRecord},
    },
    infra::config::{Config, load_config},
};

/// Merge config file settings with command-line flags.
pub fn build_options(
    config: &Config,
    args: &FindArgs,
) -> DiscoveryOptions
{
    let mut options = config.discovery_options();

    if args.no_default_excludes
    {
        options = options.with_exclude(Vec::<String>::new());
    }

    options = options.extend_exclude(
        args.exclude
            .iter()
            .cloned(),
    );

    if !args
        .extensions
        .is_empty()
    {
        options = options.with_extensions(
            args.extensions
                .iter()
                .map(|e| {
                    e.trim_start_matches('.')
                        .to_string()
                }),
        );
    }

    if args.gitignore
    {
        options = options.with_gitignore(true);
    }

    options
}

#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn run(
    args: FindArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config = load_config().unwrap_or_else(|err| {
        warn!("ignoring unreadable config: {err:#}");
        Config::default()
    });

    let options = build_options(&config, &args);

    if ctx.dry_run
    {
        if !ctx.quiet
        {
            println!("{}", "DRY RUN: Would search:".yellow());
            println!("  Root: {}", args.path.display());
            println!("  Extensions: {:?}", options.extensions);
            println!("  Respect gitignore: {}", options.respect_gitignore);
            println!("  Exclude patterns: {:?}", options.exclude);
        }
        return Ok(());
    }

    let discovery = Discovery::new(&options).context("Invalid exclude pattern")?;
    let found = discovery
        .find(&args.path)
        .with_context(|| format!("Failed to discover modules under {}", args.path.display()))?;

    let color = !ctx.no_color && std::io::stdout().is_terminal();
    let mut out = std::io::stdout().lock();
    render(&mut out, &found, args.format, color)?;

    if !ctx.quiet
    {
        eprintln!("{} root(s) under {}", found.len(), args.path.display());
    }

    Ok(())
}

/// Write `found` in the requested format.
pub fn render<W: Write>(
    out: &mut W,
    found: &[FoundModule],
    format: OutputFormat,
    color: bool,
) -> Result<()>
{
    match format
    {
        OutputFormat::Text =>
        {
            for module in found
            {
                let name = module.name();
                match (color, module.kind())
                {
                    (true, ModuleKind::Package) => writeln!(out, "{}", name.blue())?,
                    (true, _) => writeln!(out, "{}", name.green())?,
                    (false, _) => writeln!(out, "{name}")?,
                }
            }
        }
        OutputFormat::Json =>
        {
            let records: Vec<ModuleRecord> = found
                .iter()
                .map(FoundModule::record)
                .collect();
            let json = serde_json::to_string_pretty(&records).context("serialize modules")?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Table =>
        {
            let records: Vec<ModuleRecord> = found
                .iter()
                .map(FoundModule::record)
                .collect();
            writeln!(out, "{}", Table::new(records))?;
        }
    }

    Ok(())
}
