//! `mosekfind cache` command
//!
//! Inspect the configuration namespace persisted between runs.

use anyhow::Result;

use crate::cli::{CacheArgs, CacheCommands, CacheListArgs};
use mosekfind::core::Settings;
use mosekfind::util::fs::remove_file_if_exists;
use mosekfind::util::GlobalContext;

pub fn execute(args: CacheArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;

    match args.command {
        CacheCommands::List(list_args) => list_cache(&ctx, list_args),
        CacheCommands::Path => {
            println!("{}", ctx.cache_path().display());
            Ok(())
        }
        CacheCommands::Clear => clear_cache(&ctx),
    }
}

/// List cached values.
fn list_cache(ctx: &GlobalContext, args: CacheListArgs) -> Result<()> {
    let cache_path = ctx.cache_path();
    if !cache_path.exists() {
        println!("No cache at {}", cache_path.display());
        return Ok(());
    }

    let settings = Settings::load(&cache_path)?;
    let entries: Vec<_> = settings
        .entries()
        .into_iter()
        .filter(|(name, _)| args.all || !settings.is_advanced(name))
        .collect();

    if entries.is_empty() {
        println!("(empty)");
        return Ok(());
    }

    let width = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, value) in entries {
        println!("{:<width$} = {}", name, value, width = width);
    }

    Ok(())
}

fn clear_cache(ctx: &GlobalContext) -> Result<()> {
    let cache_path = ctx.cache_path();

    if remove_file_if_exists(&cache_path)? {
        eprintln!("     Removed {}", cache_path.display());
    } else {
        eprintln!("Cache is already empty");
    }

    Ok(())
}
