//! `modroots match`: check which paths an exclude pattern hits.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::debug;

use crate::{
    cli::{AppContext, MatchArgs},
    core::pattern::RelPathPattern,
};

/// Print a verdict per path. Returns true when at least one path matched.
pub fn run(
    args: MatchArgs,
    ctx: &AppContext,
) -> Result<bool>
{
    let pattern = RelPathPattern::new(&args.pattern)
        .with_context(|| format!("Invalid pattern {:?}", args.pattern))?;

    debug!(
        pattern = %pattern,
        anchored = pattern.is_anchored(),
        negate = pattern.is_negated(),
        dir_only = pattern.is_dir_only(),
        "compiled"
    );

    let mut any = false;

    for path in &args.paths
    {
        let hit = pattern.is_match(path, args.base.as_deref())?;
        any |= hit;

        if ctx.quiet
        {
            continue;
        }

        let verdict = match (hit, ctx.no_color)
        {
            (true, false) => "match".green().to_string(),
            (false, false) => "no match".red().to_string(),
            (true, true) => "match".to_string(),
            (false, true) => "no match".to_string(),
        };
        println!("{verdict}\t{}", path.display());
    }

    Ok(any)
}
