//! Prism CLI - classify an image with a pretrained ONNX model.
//!
//! Prism takes an encoded image as input and outputs the top predicted
//! class labels with confidence scores as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Classify a single image
//! prism classify image.jpg
//!
//! # Point at a specific model and catalog
//! prism classify image.jpg --model resnet.onnx --catalog synset.txt
//!
//! # View configuration
//! prism config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Prism - image classification with a pretrained ONNX model.
#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify an image and print ranked predictions
    Classify(cli::classify::ClassifyArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI overrides.
    // Logging isn't up yet, so config warnings go through eprintln.
    let config = match prism_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `prism config path`."
            );
            prism_core::Config::default()
        }
    };
    logging::init(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Prism v{}", prism_core::VERSION);

    match cli.command {
        Commands::Classify(args) => cli::classify::execute(args, config),
        Commands::Config(args) => cli::config::execute(args),
    }
}
