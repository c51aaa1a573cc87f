//! Loads the JmdictFurigana dataset and queries it from the command line.

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use eyre::WrapErr;
use jmfurigana::{Entry, Furigana};
use jmfurigana_data::{cache, release, Config};
use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
};

fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(dataset) = cli.dataset {
        config.dataset_path = dataset;
    }
    if let Some(cache) = cli.cache {
        config.cache_path = Some(cache);
    }
    if cli.no_cache {
        config.cache_path = None;
    }
    if let Some(format) = cli.format {
        config.format = Some(format.into());
    }
    config.skip_invalid |= cli.skip_invalid;

    match cli.command {
        Command::Fetch { output, keep } => {
            fetch(&config, output, keep)?;
        }
        Command::Cache => {
            create_cache(&config)?;
        }
        Command::Lookup { text, reading } => {
            lookup(&config, text.as_deref(), reading.as_deref())?;
        }
        Command::Parse { line } => {
            let entry = jmfurigana::parse_line(&line)?;
            println!("{}", serde_json::to_string(&entry)?);
        }
        Command::Encode { json } => {
            let furigana: Vec<Furigana> =
                serde_json::from_str(&json).wrap_err("Invalid furigana JSON")?;
            println!("{}", jmfurigana::furigana_to_string(&furigana)?);
        }
        Command::Decode { markup } => {
            let furigana = jmfurigana::string_to_furigana(&markup);
            println!("{}", serde_json::to_string(&furigana)?);
        }
    }

    Ok(())
}

fn fetch(config: &Config, output: Option<PathBuf>, keep: bool) -> eyre::Result<()> {
    let latest = release::latest_release(&config.release_url, &config.asset_name)
        .wrap_err("Failed to find the latest release")?;
    tracing::info!("latest release is {}", latest.tag);
    let output = output.unwrap_or_else(|| config.dataset_path.clone());
    release::save_latest(&latest.url, &output, !keep)
        .wrap_err_with(|| format!("Failed to download {}", latest.filename))?;
    Ok(())
}

fn create_cache(config: &Config) -> eyre::Result<()> {
    let cache_path = config
        .cache_path
        .as_deref()
        .ok_or_else(|| eyre::eyre!("No cache path configured"))?;
    let parsed =
        jmfurigana_data::load_dataset(&config.dataset_path, config.format, config.skip_invalid)?;
    if !parsed.is_complete() {
        tracing::warn!(
            "skipped {} lines of the dataset, the cache will be missing their entries",
            parsed.skipped.len()
        );
    }
    cache::write_cache(cache_path, &parsed.entries)?;
    tracing::info!("cached {} entries", parsed.entries.len());
    Ok(())
}

fn lookup(config: &Config, text: Option<&str>, reading: Option<&str>) -> eyre::Result<()> {
    let index = jmfurigana_data::setup(config)?;
    let entries = match (text, reading) {
        (Some(text), _) => index.by_text(text).collect::<Vec<_>>(),
        (None, Some(reading)) => index.by_reading(reading).collect(),
        (None, None) => vec![],
    };
    if entries.is_empty() {
        tracing::info!("no entries found");
    }

    let mut out = BufWriter::new(io::stdout().lock());
    for entry in entries {
        write_entry(&mut out, entry)?;
    }
    out.flush()?;
    Ok(())
}

fn write_entry(out: &mut impl Write, entry: &Entry) -> eyre::Result<()> {
    serde_json::to_writer(&mut *out, entry)?;
    writeln!(out)?;
    match jmfurigana::furigana_to_string(&entry.furigana) {
        Ok(markup) => writeln!(out, "{markup}")?,
        Err(err) => tracing::warn!("{err}"),
    }
    Ok(())
}
