use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prism_sql::config::{default_config_dir, Config, InputFormat, LogFormat};
use prism_sql::AggregationFamily;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::translate::TranslateOptions;

#[derive(Parser, Debug)]
#[command(name = "prism-sql")]
#[command(about = "Prism SQL - translate aggregate queries into search engine DSL")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.prism-sql/config.toml)
    #[arg(short, long, global = true, env = "PRISM_SQL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a query document into an aggregation request body
    Translate {
        /// Query document (JSON or YAML), `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Input format (inferred from the file extension when omitted)
        #[arg(short, long)]
        format: Option<InputFormat>,

        /// Indent the emitted JSON
        #[arg(long)]
        pretty: bool,

        /// Write the DSL to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List supported aggregation kinds and their engine tags
    Kinds {
        /// Only show one family (metric or bucket)
        #[arg(long)]
        family: Option<AggregationFamily>,
    },

    /// Print the effective configuration
    Config {
        /// Write the default config file first if it does not exist
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };

    init_tracing(&config)?;

    match cli.command {
        Commands::Translate {
            input,
            format,
            pretty,
            output,
        } => {
            let opts = TranslateOptions {
                input,
                format,
                pretty,
                output,
            };
            commands::run_translate(&opts, &config)?;
        }
        Commands::Kinds { family } => {
            commands::run_kinds(family)?;
        }
        Commands::Config { init } => {
            let config = if init {
                let path = cli
                    .config
                    .unwrap_or_else(|| default_config_dir().join("config.toml"));
                Config::load_or_create(&path)
                    .with_context(|| format!("Failed to initialize config at {}", path.display()))?
            } else {
                config
            };
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn init_tracing(config: &Config) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone()),
    );

    let writer = match &config.logging.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let (plain, json) = match config.logging.format {
        LogFormat::Plain => (Some(tracing_subscriber::fmt::layer().with_writer(writer)), None),
        LogFormat::Json => (
            None,
            Some(tracing_subscriber::fmt::layer().json().with_writer(writer)),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .init();

    Ok(())
}
