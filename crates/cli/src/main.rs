use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

/// Order candidate images by the numbers read from a reference image.
#[derive(Parser)]
#[command(name = "ordo", version)]
struct Args {
    /// Config file (default: <config dir>/ordo/config.toml, if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory containing Tesseract traineddata files
    #[arg(long, global = true)]
    tessdata: Option<String>,

    /// OCR language
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Tesseract page segmentation mode (0-13)
    #[arg(long, global = true)]
    psm: Option<u8>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// OCR a JSON request ({"main": ..., "images": {...}}) and print the ordered keys
    Sort {
        /// Request file, or `-` for stdin
        request: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Normalize text without OCR and print the resulting tokens
    Normalize {
        #[arg(required = true)]
        text: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Sort { request, format } => {
            let overrides = commands::Overrides {
                data_path: args.tessdata,
                language: args.lang,
                page_segmentation_mode: args.psm,
            };
            let config = commands::load_config(args.config.as_deref(), overrides)?;
            let output = commands::sort(&request, &config, format).await?;
            println!("{output}");
        }
        Command::Normalize { text } => {
            for line in commands::normalize_lines(&text) {
                println!("{line}");
            }
        }
    }

    Ok(())
}
