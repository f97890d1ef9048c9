use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use advisor::commands;
use advisor::config::Config;
use advisor::form::{ChipField, ScalarField};

#[derive(Parser)]
#[command(name = "advisor")]
#[command(about = "Collects a student profile and requests a potential and personal-brand analysis", long_about = None)]
struct Cli {
    /// Analysis service base URL (overrides API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Form draft file
    #[arg(long, global = true, default_value = "draft.json")]
    draft: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a draft seeded with default answers
    Init {
        /// Overwrite an existing draft
        #[arg(long)]
        force: bool,
    },
    /// Show or edit the form draft
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
    /// Check the draft without contacting the service
    Validate,
    /// Validate the draft, submit it and print the analysis
    Submit {
        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the development analysis service
    Stub {
        /// Port to listen on (overrides STUB_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
enum DraftAction {
    /// Print the draft
    Show,
    /// Add an entry to a list (hobbies, personality, exciting-topics,
    /// short-term-goals, long-term-goals, strengths, achievements)
    Add { list: ChipField, value: String },
    /// Remove a list entry by index
    Remove { list: ChipField, index: usize },
    /// Set a field (unique-brand, study-style, major, gpa, year, mentor)
    Set { field: ScalarField, value: String },
    /// Add a language row, or replace the row at --index
    LangSet {
        language: String,
        level: String,
        #[arg(long)]
        index: Option<usize>,
    },
    /// Remove a language row by index
    LangRemove { index: usize },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr so rendered output on stdout stays clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("advisor v{}", env!("CARGO_PKG_VERSION"));

    let base_url = cli.base_url.as_deref().unwrap_or(&config.api_base_url);
    let draft = cli.draft.as_path();

    match cli.command {
        Commands::Init { force } => commands::draft::init(draft, force)?,
        Commands::Draft { action } => match action {
            DraftAction::Show => commands::draft::show(draft)?,
            DraftAction::Add { list, value } => commands::draft::add(draft, list, &value)?,
            DraftAction::Remove { list, index } => commands::draft::remove(draft, list, index)?,
            DraftAction::Set { field, value } => commands::draft::set(draft, field, &value)?,
            DraftAction::LangSet {
                language,
                level,
                index,
            } => commands::draft::set_language(draft, index, &language, &level)?,
            DraftAction::LangRemove { index } => commands::draft::remove_language(draft, index)?,
        },
        Commands::Validate => commands::draft::check(draft)?,
        Commands::Submit { json } => {
            info!("Using analysis service at {base_url}");
            commands::submit::run(base_url, draft, json).await?
        }
        Commands::Stub { port } => commands::stub::run(&config, port).await?,
    }

    Ok(())
}
