//! Mergington CLI
//!
//! One-shot commands against the school API:
//! - List activities, sign up, unregister
//! - List, add, toggle and delete todos
//! - Generate a config file

use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use mergington::view::{ActivitiesRegion, TodosRegion};
use mergington::{ActivitiesView, Config, Confirm, HttpBackend, Outcome, TodoView};

#[derive(Parser)]
#[command(name = "mergington")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mergington High School activities and task lists")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/mergington/config.toml or ./mergington.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API server URL, overrides the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format for listings (text, json)
    #[arg(short, long, default_value = "text", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List activities with their rosters
    Activities,

    /// Sign a student up for an activity
    Signup {
        /// Activity name, e.g. "Chess Club"
        activity: String,
        email: String,
    },

    /// Remove a student from an activity
    Unregister {
        activity: String,
        email: String,
    },

    /// List a student's tasks
    Todos { email: String },

    /// Add a task
    AddTodo {
        email: String,
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Flip a task between complete and incomplete
    Toggle { email: String, id: u64 },

    /// Delete a task
    DeleteTodo {
        email: String,
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Write the prompt and read a yes/no answer. Anything but y/yes is a no.
fn ask(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> std::io::Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Confirmation read from the terminal
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        match ask(&mut std::io::stdin().lock(), &mut std::io::stdout(), prompt) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Confirmation failed, not deleting: {}", e);
                false
            }
        }
    }
}

struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, skipped) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, Vec::new()),
        None => Config::load_default(),
    };
    if let Some(url) = &cli.base_url {
        config.backend.base_url = url.clone();
    }

    mergington::logging::init(&config.logging);
    for error in &skipped {
        tracing::warn!("Skipped config file: {}", error);
    }

    if let Commands::Config { output } = &cli.command {
        let content = mergington::config::generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let backend = HttpBackend::new(config.backend.client_config())?;
    tracing::debug!(base_url = backend.base_url(), "using backend");

    let outcome = match cli.command {
        Commands::Activities => {
            let mut view = ActivitiesView::new(backend, config.status.activity_ttl());
            view.load().await;
            print_activities(&view, &cli.format)?
        }

        Commands::Signup { activity, email } => {
            let mut view = ActivitiesView::new(backend, config.status.activity_ttl());
            let outcome = view.signup(&activity, &email).await;
            print_status(view.status().current());
            if outcome.is_success() {
                print_activities(&view, &cli.format)?;
            }
            outcome
        }

        Commands::Unregister { activity, email } => {
            let mut view = ActivitiesView::new(backend, config.status.activity_ttl());
            let outcome = view.unregister(&activity, &email).await;
            print_status(view.status().current());
            if outcome.is_success() {
                print_activities(&view, &cli.format)?;
            }
            outcome
        }

        Commands::Todos { email } => {
            let mut view = TodoView::new(backend, config.status.todo_ttl());
            view.email_entered(&email).await;
            print_todos(&view, &cli.format)?
        }

        Commands::AddTodo {
            email,
            title,
            description,
            due,
        } => {
            let mut view = TodoView::new(backend, config.status.todo_ttl());
            let outcome = view
                .create(&email, &title, description.as_deref(), due.as_deref())
                .await;
            print_status(view.status().current());
            if outcome.is_success() {
                print_todos(&view, &cli.format)?;
            }
            outcome
        }

        Commands::Toggle { email, id } => {
            let mut view = TodoView::new(backend, config.status.todo_ttl());
            view.email_entered(&email).await;

            let completed = match view.todo(id) {
                Some(todo) => todo.completed,
                None => {
                    eprintln!("No task #{} for {}", id, email);
                    std::process::exit(1);
                }
            };

            let outcome = view.toggle(id, completed).await;
            print_status(view.status().current());
            if outcome.is_success() {
                print_todos(&view, &cli.format)?;
            }
            outcome
        }

        Commands::DeleteTodo { email, id, yes } => {
            let mut view = TodoView::new(backend, config.status.todo_ttl());
            view.email_entered(&email).await;

            let outcome = if yes {
                view.delete(id, &AssumeYes).await
            } else {
                view.delete(id, &StdinConfirm).await
            };
            print_status(view.status().current());
            if outcome.is_success() {
                print_todos(&view, &cli.format)?;
            }
            outcome
        }

        Commands::Config { .. } => Outcome::Completed,
    };

    if matches!(outcome, Outcome::Rejected | Outcome::Failed) {
        std::process::exit(1);
    }

    Ok(())
}

fn print_status(message: Option<&mergington::StatusMessage>) {
    match message {
        Some(message) if message.kind == mergington::StatusKind::Error => eprintln!("{}", message),
        Some(message) => println!("{}", message),
        None => {}
    }
}

fn print_activities<B: mergington::Backend>(
    view: &ActivitiesView<B>,
    format: &str,
) -> anyhow::Result<Outcome> {
    match (view.region(), format) {
        (ActivitiesRegion::Ready(catalog), "json") => {
            println!("{}", serde_json::to_string_pretty(catalog)?);
        }
        _ => print!("{}", view.render()),
    }

    Ok(match view.region() {
        ActivitiesRegion::Failed => Outcome::Failed,
        _ => Outcome::Completed,
    })
}

fn print_todos<B: mergington::Backend>(view: &TodoView<B>, format: &str) -> anyhow::Result<Outcome> {
    match (view.region(), format) {
        (TodosRegion::Ready(todos), "json") => {
            println!("{}", serde_json::to_string_pretty(todos)?);
        }
        (TodosRegion::Empty, "json") => println!("[]"),
        _ => print!("{}", view.render()),
    }

    Ok(match view.region() {
        TodosRegion::Failed => Outcome::Failed,
        _ => Outcome::Completed,
    })
}
