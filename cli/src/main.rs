//! CLI entrypoint for question-queue
//!
//! This is the `qqueue` binary that wires together all layers using
//! dependency injection: config file → store adapter → queue service.

mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use queue_application::{QuestionQueueService, QuestionStore, dispatch};
use queue_domain::{QuestionDraft, QuestionId};
use queue_infrastructure::{
    ConfigLoader, FileConfig, InMemoryQuestionStore, JsonlQuestionStore, StoreBackend,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "qqueue",
    about = "Manage a queue of user-submitted questions",
    version
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a config file (merged over discovered configs)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip config file discovery, use built-in defaults
    #[arg(long, global = true)]
    no_config: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a new question to the queue
    Submit {
        /// The question text
        content: String,
        /// Queue priority; falls back to the configured default
        #[arg(short, long)]
        priority: Option<i32>,
    },
    /// List the active questions
    List {
        /// Emit the questions as JSON instead of lines
        #[arg(long)]
        json: bool,
    },
    /// Record a response to a question
    Respond {
        /// Question id
        id: String,
        /// Response text
        response: String,
    },
    /// Change a question's priority
    Prioritize {
        /// Question id
        id: String,
        /// New priority (higher is more urgent)
        priority: i32,
    },
    /// Archive a question, removing it from the active queue
    Archive {
        /// Question id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("loading configuration")?
    };

    // === Dependency Injection ===
    let store = build_store(&config)?;
    let service = QuestionQueueService::new(store);
    let params = config.queue.to_params();

    // Each command runs as one dispatched operation; the handle delivers
    // the single outcome, and a failure outcome becomes the exit status.
    match cli.command {
        Command::Submit { content, priority } => {
            let draft = QuestionDraft::try_new(content)?
                .with_priority(priority.unwrap_or(params.default_priority));
            dispatch(async move { service.submit_question(draft).await })
                .outcome()
                .await?;
            println!("Question submitted.");
        }
        Command::List { json } => {
            let questions = dispatch(async move { service.retrieve_questions().await })
                .outcome()
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&questions)?);
            } else if questions.is_empty() {
                println!("No active questions.");
            } else {
                for question in &questions {
                    println!("{}", output::format_question(question));
                }
            }
        }
        Command::Respond { id, response } => {
            let id = QuestionId::new(id);
            dispatch(async move { service.respond_to_question(&id, &response).await })
                .outcome()
                .await?;
            println!("Response recorded.");
        }
        Command::Prioritize { id, priority } => {
            let id = QuestionId::new(id);
            dispatch(async move { service.prioritize_question(&id, priority).await })
                .outcome()
                .await?;
            println!("Priority updated.");
        }
        Command::Archive { id } => {
            let id = QuestionId::new(id);
            dispatch(async move { service.archive_question(&id).await })
                .outcome()
                .await?;
            println!("Question archived.");
        }
    }

    Ok(())
}

fn build_store(config: &FileConfig) -> Result<Arc<dyn QuestionStore>> {
    match config.store.backend {
        StoreBackend::Jsonl => {
            let path = config.store.resolved_path();
            let store = JsonlQuestionStore::open(&path)
                .with_context(|| format!("opening question store at {}", path.display()))?;
            info!("Using JSONL store at {}", store.path().display());
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store; questions will not outlive this process");
            Ok(Arc::new(InMemoryQuestionStore::new()))
        }
    }
}
