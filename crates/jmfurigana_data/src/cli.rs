use clap::{Parser, Subcommand, ValueEnum};
use jmfurigana::DatasetFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// The path to the JmdictFurigana dataset, either the text or the JSON release.
    #[arg(short, long, global = true)]
    pub dataset: Option<PathBuf>,
    /// The path to the cache of parsed entries.
    #[arg(short, long, global = true)]
    pub cache: Option<PathBuf>,
    /// Neither read nor write the cache.
    #[arg(long, global = true)]
    pub no_cache: bool,
    /// The dataset format. Detected from the content by default.
    #[arg(short, long, global = true)]
    pub format: Option<Format>,
    /// Skip malformed dataset lines instead of failing.
    #[arg(long, global = true)]
    pub skip_invalid: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Downloads the latest dataset release.
    Fetch {
        /// Where to save the dataset. Defaults to the dataset path.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Keep an existing non-empty file instead of downloading.
        #[arg(short, long)]
        keep: bool,
    },
    /// Parses the dataset and writes the cache.
    Cache,
    /// Prints the entries with the given text or reading.
    Lookup {
        /// The written form, e.g. 漢字.
        #[arg(short, long, required_unless_present = "reading")]
        text: Option<String>,
        /// The reading, e.g. かんじ.
        #[arg(short, long, conflicts_with = "text")]
        reading: Option<String>,
    },
    /// Parses a single dataset line, e.g. `頑張る|がんばる|0:がん;1:ば`.
    Parse { line: String },
    /// Converts JSON furigana to bracket markup.
    Encode {
        /// A JSON array of strings and `{"ruby", "rt"}` objects.
        json: String,
    },
    /// Converts bracket markup, e.g. `{大人}^{おとな}{買}^{が}い`, to JSON furigana.
    Decode { markup: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

impl From<Format> for DatasetFormat {
    fn from(value: Format) -> Self {
        match value {
            Format::Text => DatasetFormat::Text,
            Format::Json => DatasetFormat::Json,
        }
    }
}
