use std::fmt;
use std::sync::Arc;

use services::{CatalogService, TerminalBell, TrainerService};
use storage::repository::Storage;
use trainer_core::time::Clock;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidListen { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidListen { raw } => write!(f, "invalid --listen value: {raw}"),
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

struct Args {
    data_dir: String,
    listen: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--data-dir <dir>] [--listen <addr>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data-dir .");
    eprintln!("  --listen 127.0.0.1:5000");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRAINER_DATA_DIR, TRAINER_LISTEN");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut data_dir = std::env::var("TRAINER_DATA_DIR").unwrap_or_else(|_| ".".into());
        let mut listen =
            std::env::var("TRAINER_LISTEN").unwrap_or_else(|_| "127.0.0.1:5000".into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data-dir" => {
                    data_dir = require_value(args, "--data-dir")?;
                }
                "--listen" => {
                    let value = require_value(args, "--listen")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidListen { raw: value });
                    }
                    listen = value;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { data_dir, listen })
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    tracing::info!(data_dir = %args.data_dir, listen = %args.listen, "starting trainer");

    let storage = Storage::json_dir(&args.data_dir)?;

    let catalog = CatalogService::new(Arc::clone(&storage.catalog)).load().await;
    if catalog.is_empty() {
        // load errors are recoverable, an empty catalog is not
        return Err("no drills in commands.json, refusing to start".into());
    }

    let trainer = TrainerService::start(
        catalog,
        Arc::clone(&storage.settings),
        Arc::clone(&storage.progress),
        Arc::new(TerminalBell),
        Clock::default_clock(),
    )
    .await?;

    // periodic advancement runs for the life of the process
    tokio::spawn(Arc::clone(&trainer).run_periodic());

    server::serve(&args.listen, trainer).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        // at this layer printing once is fine
        eprintln!("{err}");
        std::process::exit(2);
    }
}
