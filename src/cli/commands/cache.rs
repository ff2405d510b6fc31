//! Cache command - inspect or clear the inventory parse cache

use crate::cache::{file_mod_time, Cache, CacheIndex, CacheLocator};
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::Config;
use crate::error::{ArmadaError, ArmadaResult};
use chrono::{DateTime, Utc};
use console::style;
use std::io::{self, Write};
use tokio::fs;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> ArmadaResult<()> {
    let locator = super::locator_from(config);

    match args.action {
        CacheAction::List { format } => list_entries(&locator, format).await,
        CacheAction::Clear { yes } => clear(&locator, yes).await,
    }
}

/// Freshness of one entry relative to the filesystem right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryState {
    Fresh,
    Stale,
    Missing,
}

impl EntryState {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Stale => "stale",
            Self::Missing => "missing",
        }
    }
}

async fn entry_state(entry: &Cache) -> EntryState {
    if !entry.instances_path.exists() {
        return EntryState::Missing;
    }

    match file_mod_time(&entry.config_path).await {
        Ok(current) if current == entry.mod_time => EntryState::Fresh,
        _ => EntryState::Stale,
    }
}

fn format_captured(mod_time: i64) -> String {
    DateTime::<Utc>::from_timestamp(mod_time, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "?".to_string())
}

async fn list_entries(locator: &CacheLocator, format: OutputFormat) -> ArmadaResult<()> {
    let index = CacheIndex::load(&locator.index_path()).await?;

    if index.is_empty() {
        match format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => println!("Cache index is empty."),
        }
        return Ok(());
    }

    let mut states = Vec::with_capacity(index.len());
    for entry in index.iter() {
        states.push(entry_state(entry).await);
    }

    match format {
        OutputFormat::Table => print_table(locator, &index, &states),
        OutputFormat::Json => print_json(&index, &states)?,
        OutputFormat::Plain => print_plain(&index),
    }

    Ok(())
}

fn print_table(locator: &CacheLocator, index: &CacheIndex, states: &[EntryState]) {
    println!("Cache dir:   {}", locator.cache_dir().display());
    println!("Cache index: {}", locator.index_path().display());
    println!();
    println!(
        "{:<40} {:<18} {:<8} ARTIFACT",
        style("CONFIG").bold(),
        style("CAPTURED").bold(),
        style("STATE").bold()
    );
    println!("{}", "-".repeat(100));

    for (entry, state) in index.iter().zip(states) {
        let state_display = match state {
            EntryState::Fresh => style("fresh").green().to_string(),
            EntryState::Stale => style("stale").yellow().to_string(),
            EntryState::Missing => style("missing").red().to_string(),
        };

        let artifact = entry
            .instances_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| entry.instances_path.display().to_string());

        println!(
            "{:<40} {:<18} {:<8} {}",
            entry.config_path.display(),
            format_captured(entry.mod_time),
            state_display,
            artifact
        );
    }

    println!();
    println!("Total: {} entr{}", index.len(), if index.len() == 1 { "y" } else { "ies" });
}

fn print_json(index: &CacheIndex, states: &[EntryState]) -> ArmadaResult<()> {
    #[derive(serde::Serialize)]
    struct EntryJson {
        config_path: String,
        instances_path: String,
        mod_time: i64,
        state: &'static str,
    }

    let entries: Vec<EntryJson> = index
        .iter()
        .zip(states)
        .map(|(e, s)| EntryJson {
            config_path: e.config_path.display().to_string(),
            instances_path: e.instances_path.display().to_string(),
            mod_time: e.mod_time,
            state: s.as_str(),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

fn print_plain(index: &CacheIndex) {
    for entry in index.iter() {
        println!("{}", entry.config_path.display());
    }
}

async fn clear(locator: &CacheLocator, skip_confirm: bool) -> ArmadaResult<()> {
    let dir = locator.cache_dir();
    if !dir.exists() {
        println!("Nothing to clear.");
        return Ok(());
    }

    let mut files = 0;
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| ArmadaError::io(format!("reading cache dir {}", dir.display()), e))?;
    while let Some(_entry) = entries
        .next_entry()
        .await
        .map_err(|e| ArmadaError::io("reading cache dir entry", e))?
    {
        files += 1;
    }

    if files == 0 {
        println!("Nothing to clear.");
        return Ok(());
    }

    println!("This will remove {} file(s) under {}", files, dir.display());

    if !skip_confirm {
        print!("Are you sure? [y/N] ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Failed to read input, aborting.");
            return Ok(());
        }

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    fs::remove_dir_all(dir)
        .await
        .map_err(|e| ArmadaError::io(format!("removing cache dir {}", dir.display()), e))?;

    println!("{} cleared {} file(s)", style("✓").green(), files);
    Ok(())
}
