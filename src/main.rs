use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use miette::{GraphicalReportHandler, GraphicalTheme};
use modroots::cli::{AppContext, Cli, Commands};
use modroots::core::error::DiscoveryError;
use tracing_subscriber::EnvFilter;

/// Env var holding a tracing filter directive (e.g. `modroots=trace`)
const LOG_ENV: &str = "MODROOTS_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();

    let no_color = cli.no_color;
    init_tracing(cli.verbose, no_color);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            report(&err, no_color);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::Find(args) => modroots::find_run(args, &ctx)?,
        Commands::Match(args) => {
            if !modroots::match_run(args, &ctx)? {
                return Ok(ExitCode::from(1));
            }
        }
        Commands::Init(args) => modroots::infra::config::init(args, &ctx)?,
        Commands::Completions(args) => modroots::completion::run(args, &ctx)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: u8, no_color: bool) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .init();
}

/// Library errors also get their labeled diagnostic (code, help).
fn report(err: &anyhow::Error, no_color: bool) {
    eprintln!("Error: {err:#}");

    if let Some(diag) = err.downcast_ref::<DiscoveryError>() {
        let theme = if no_color {
            GraphicalTheme::unicode_nocolor()
        } else {
            GraphicalTheme::default()
        };
        let mut out = String::new();
        if GraphicalReportHandler::new_themed(theme)
            .render_report(&mut out, diag)
            .is_ok()
        {
            eprint!("{out}");
        }
    }
}
