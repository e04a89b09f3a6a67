use std::fmt;
use std::path::PathBuf;

use chrono::Utc;
use quiz_core::model::SourceUrl;
use quiz_core::parse_document;
use storage::repository::{SOURCE_URL_KEY, Storage};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    file: PathBuf,
    source: Option<SourceUrl>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingFile,
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidSource { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingFile => write!(f, "--file is required"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidSource { raw } => write!(f, "invalid --source value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("IQUIZ_DB_URL")
            .unwrap_or_else(|_| "sqlite:iquiz.sqlite3?mode=rwc".into());
        let mut file: Option<PathBuf> = None;
        let mut source: Option<SourceUrl> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--file" => {
                    file = Some(PathBuf::from(require_value(&mut args, "--file")?));
                }
                "--source" => {
                    let value = require_value(&mut args, "--source")?;
                    let parsed = SourceUrl::parse(&value)
                        .map_err(|_| ArgsError::InvalidSource { raw: value.clone() })?;
                    source = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            file: file.ok_or(ArgsError::MissingFile)?,
            source,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- --file <questions.json> [options]");
    eprintln!();
    eprintln!("Loads a quiz document into the offline cache so the app can start without a network.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --file <path>       Quiz document to cache (required)");
    eprintln!("  --db <sqlite_url>   SQLite URL (default: sqlite:iquiz.sqlite3?mode=rwc)");
    eprintln!("  --source <url>      Also store this URL as the quiz source");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  IQUIZ_DB_URL");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let bytes = std::fs::read(&args.file)?;
    // Refuse to cache anything the app would reject on load.
    let topics = parse_document(&bytes)?;

    let storage = Storage::sqlite(&args.db_url).await?;
    storage.documents.save_document(&bytes, Utc::now()).await?;
    if let Some(source) = &args.source {
        storage
            .preferences
            .set_preference(SOURCE_URL_KEY, source.as_str())
            .await?;
    }

    println!(
        "Cached {} topics from {} into {}",
        topics.len(),
        args.file.display(),
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
