//! CodeRunner terminal client.
//!
//! Pick a programming task, read its description and examples, write code and
//! submit it to the task service for evaluation.

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::info;

use coderunner_client::{Controller, HttpClient, DEFAULT_BASE_URL};
use coderunner_core::{present, Language, EXECUTION_FAILED};

mod app;
mod backend;
mod editor;
mod event;
mod state;
mod ui;

use app::App;
use event::{BackendCommand, UiEvent};
use state::UiState;

const DEFAULT_LOG_FILE: &str = "/tmp/coderunner-tui.log";

#[derive(Parser)]
#[command(name = "coderunner")]
#[command(about = "Terminal client for the CodeRunner task service")]
#[command(version)]
struct Cli {
    /// Base URL of the task endpoints
    #[arg(long, global = true, env = "CODERUNNER_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Label language (en, ru)
    #[arg(long, global = true, env = "CODERUNNER_LANG", default_value = "en")]
    lang: Language,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive task picker and editor (default)
    Ui {
        /// Preload the editor with this file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Log file (the terminal is owned by the UI)
        #[arg(long, default_value = DEFAULT_LOG_FILE)]
        log_file: PathBuf,
    },

    #[command(flatten)]
    Query(Query),
}

/// One-shot commands that print and exit.
#[derive(Subcommand)]
enum Query {
    /// List available tasks
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a task's description and examples
    Show {
        /// Task name
        name: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Submit a source file against a task
    Submit {
        /// Task name
        name: String,

        /// Source file to submit
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Check whether the service is healthy
    Health,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let client = HttpClient::new(&cli.base_url)?;

    match cli.command {
        None => run_ui(client, cli.lang, None, Path::new(DEFAULT_LOG_FILE)),
        Some(Commands::Ui { file, log_file }) => {
            run_ui(client, cli.lang, file.as_deref(), &log_file)
        }
        Some(Commands::Query(query)) => {
            init_stderr_logging();
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_query(client, cli.lang, query))
        }
    }
}

/// Log to stderr for one-shot commands, quiet unless RUST_LOG says otherwise.
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

async fn run_query(client: HttpClient, lang: Language, query: Query) -> Result<(), Box<dyn Error>> {
    let labels = lang.labels();

    match query {
        Query::List { json } => {
            let tasks = client.list_tasks().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                println!("{} ({}):", labels.task_name, tasks.len());
                for task in &tasks {
                    println!("  {}", task.name);
                }
            }
        }
        Query::Show { name, json } => {
            let detail = client.get_task_detail(&name).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                println!("{}", name);
                println!("{}", "-".repeat(name.chars().count().max(8)));
                println!("{}:\n  {}\n", labels.description, detail.description);
                println!("{}:\n  {}\n", labels.input, detail.input);
                println!("{}:\n  {}\n", labels.output, detail.output);
                if !detail.examples.is_empty() {
                    println!("{}:", labels.examples);
                    for example in &detail.examples {
                        println!("  {}: {}", labels.input, example.input);
                        println!("  {}: {}", labels.output, example.output);
                        println!();
                    }
                }
            }
        }
        Query::Submit { name, file } => {
            let code = std::fs::read_to_string(&file)?;

            let mut controller = Controller::new(client);
            controller.select_task_without_detail(name);
            controller.edit_code(code).await;
            controller.submit().await;

            let state = controller.into_state();
            if state.result == EXECUTION_FAILED {
                return Err(EXECUTION_FAILED.into());
            }

            println!("{}: {}", labels.result, state.result);
            if let Some(summary) = present(&state.result).summary {
                println!("{}", labels.summary(&summary));
            }
        }
        Query::Health => {
            let healthy = client.health().await?;
            println!("{}", if healthy { "healthy" } else { "unhealthy" });
            if !healthy {
                return Err("service reported unhealthy".into());
            }
        }
    }

    Ok(())
}

fn run_ui(
    client: HttpClient,
    lang: Language,
    file: Option<&Path>,
    log_file: &Path,
) -> Result<(), Box<dyn Error>> {
    // Initialize tracing - write to file to avoid terminal interference
    if let Ok(file) = std::fs::File::create(log_file) {
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("coderunner=debug")),
            )
            .with_ansi(false)
            .init();
    }

    let code = match file {
        Some(path) => Some(std::fs::read_to_string(path)?),
        None => None,
    };

    info!(base_url = %client.base_url(), lang = %lang, "Starting TUI");

    // Create channels for UI <-> backend communication
    let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>(100);
    let (cmd_tx, cmd_rx) = mpsc::channel::<BackendCommand>(100);

    // Spawn background thread with its own tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    let state = UiState::new(client.base_url().as_str(), lang);
    let bg_handle = std::thread::spawn(move || {
        rt.block_on(backend::run_backend(client, ui_tx, cmd_rx));
    });

    let mut app = App::new(state, ui_rx, cmd_tx);
    if let Some(code) = code {
        app.load_code(&code);
    }
    app.start();

    // Initialize terminal (enters alternate screen, enables raw mode)
    let terminal = ratatui::init();

    // Run UI loop on main thread
    let result = app.run(terminal);

    // Restore terminal (exits alternate screen, disables raw mode)
    ratatui::restore();

    // Wait for background thread to finish
    let _ = bg_handle.join();

    info!("TUI shutdown complete");

    result.map_err(|e| e.into())
}
