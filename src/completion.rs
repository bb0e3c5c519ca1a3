//! Shell completions for `modroots`, generated from the clap definition.

use std::{fs, io};

use anyhow::{Context, Result, anyhow};
use clap::CommandFactory;
use clap_complete::{Shell as CompletionShell, generate, generate_to};

use crate::cli::{AppContext, Cli, CompletionsArgs, Shell};

const BIN_NAME: &str = "modroots";

impl From<Shell> for CompletionShell
{
    fn from(shell: Shell) -> Self
    {
        match shell
        {
            Shell::Bash => CompletionShell::Bash,
            Shell::Zsh => CompletionShell::Zsh,
            Shell::Fish => CompletionShell::Fish,
            Shell::PowerShell => CompletionShell::PowerShell,
            Shell::Elvish => CompletionShell::Elvish,
        }
    }
}

/// Print the script to stdout, or write it under `--out-dir`.
pub fn run(
    args: CompletionsArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let mut cmd = Cli::command();
    let shell = CompletionShell::from(args.shell);

    if args.stdout
    {
        generate(shell, &mut cmd, BIN_NAME, &mut io::stdout());
        return Ok(());
    }

    let Some(dir) = args.out_dir
    else
    {
        return Err(anyhow!("--out-dir is required unless --stdout is set"));
    };

    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    let path = generate_to(shell, &mut cmd, BIN_NAME, &dir)
        .with_context(|| format!("write {shell} completion"))?;

    if !ctx.quiet
    {
        eprintln!("Wrote {shell} completion to {}", path.display());
    }

    Ok(())
}
