use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
use commands::{compare, estimate, models};

#[derive(Parser)]
#[command(
    name = "kitna",
    version = "0.1.0",
    author,
    about = "Estimate tokens and cost of text, token counts, or voice input across AI models",
    long_about = r#"kitna approximates how many tokens an input will consume and what it costs
against a catalog of text and voice model prices.

Input modes: text, tokens, voice

Quick start:
  kitna estimate --text "Summarize this report"      # price text with the default model
  kitna estimate --mode tokens --tokens 12000 --model claude-3-haiku
  kitna estimate --mode voice --audio meeting.mp3    # price an upload by file size
  kitna compare --file prompt.txt                    # price one input on every model
  kitna models --mode voice                          # list the voice catalog"#
)]
pub struct Cli {
    /// JSON catalog replacing the built-in model list (falls back to $KITNA_CATALOG)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate tokens and cost for one model
    Estimate(estimate::EstimateArgs),

    /// Price one input against every model of the active catalog
    Compare(compare::CompareArgs),

    /// List the model catalog
    Models(models::ModelsArgs),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let catalog_path = kitna_input::resolve_catalog_path(cli.catalog.as_deref());
    if let Some(path) = &catalog_path {
        eprintln!("{} Loading catalog {}...", "→".cyan(), kitna_input::short_path(path));
    }
    let catalog = kitna_input::load_catalog(catalog_path.as_deref()).context("could not load model catalog")?;

    match cli.command {
        Commands::Estimate(args) => estimate::run(args, catalog),
        Commands::Compare(args) => compare::run(args, catalog),
        Commands::Models(args) => models::run(args, &catalog),
    }
}
