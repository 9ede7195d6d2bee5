//! Mergington Interactive Session
//!
//! Run with: cargo run --bin mergington-shell
//!
//! Loads the activity list once at startup and then reads commands from
//! stdin, one per line. The session keeps the current email between commands
//! and prints status messages as they appear.
//!
//! # Configuration
//!
//! Same config file and `MERGINGTON_*` environment variables as the
//! `mergington` CLI. `MERGINGTON_CONFIG` points at an explicit config file.

use mergington::view::DELETE_PROMPT;
use mergington::{ActivitiesView, Backend, Config, HttpBackend, StatusBoard, TodoView};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

const HELP: &str = "\
Commands:
  activities                        reload the activity list
  signup <email> <activity>         sign up for an activity
  unregister <email> <activity>     remove a participant
  email <address>                   switch the task list to this email
  todos                             reload the task list
  add <title>[ | description[ | due date]]
                                    add a task for the current email
  toggle <id>                       mark a task complete / incomplete
  delete <id>                       delete a task
  status                            show current messages
  help                              show this help
  quit                              leave the session";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Activities,
    Signup { email: String, activity: String },
    Unregister { email: String, activity: String },
    Email(String),
    Todos,
    Add {
        title: String,
        description: Option<String>,
        due_date: Option<String>,
    },
    Toggle(u64),
    Delete(u64),
    Status,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let email_and_activity = |usage: &str| -> Result<(String, String), String> {
        match rest.split_once(char::is_whitespace) {
            Some((email, activity)) if !activity.trim().is_empty() => {
                Ok((email.to_string(), activity.trim().to_string()))
            }
            _ => Err(format!("usage: {}", usage)),
        }
    };

    let id = |usage: &str| -> Result<u64, String> {
        rest.parse().map_err(|_| format!("usage: {}", usage))
    };

    match word.to_lowercase().as_str() {
        "activities" => Ok(Command::Activities),
        "signup" => {
            let (email, activity) = email_and_activity("signup <email> <activity>")?;
            Ok(Command::Signup { email, activity })
        }
        "unregister" => {
            let (email, activity) = email_and_activity("unregister <email> <activity>")?;
            Ok(Command::Unregister { email, activity })
        }
        "email" => Ok(Command::Email(rest.to_string())),
        "todos" => Ok(Command::Todos),
        "add" => {
            let mut parts = rest.splitn(3, '|').map(str::trim);
            let title = parts.next().unwrap_or_default();
            if title.is_empty() {
                return Err("usage: add <title>[ | description[ | due date]]".to_string());
            }
            let description = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
            let due_date = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
            Ok(Command::Add {
                title: title.to_string(),
                description,
                due_date,
            })
        }
        "toggle" => Ok(Command::Toggle(id("toggle <id>")?)),
        "delete" => Ok(Command::Delete(id("delete <id>")?)),
        "status" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command: {} (try `help`)", other)),
    }
}

struct Session<B> {
    activities: ActivitiesView<B>,
    todos: TodoView<B>,
    last_activity_message: Option<u64>,
    last_todo_message: Option<u64>,
}

impl<B: Backend + Clone> Session<B> {
    fn new(backend: B, config: &Config) -> Self {
        Self {
            activities: ActivitiesView::new(backend.clone(), config.status.activity_ttl()),
            todos: TodoView::new(backend, config.status.todo_ttl()),
            last_activity_message: None,
            last_todo_message: None,
        }
    }

    /// Print messages that appeared since the last call
    fn print_new_messages(&mut self) {
        print_if_new(self.activities.status(), &mut self.last_activity_message);
        print_if_new(self.todos.status(), &mut self.last_todo_message);
    }

    fn print_all_messages(&self) {
        let messages: Vec<_> = [self.activities.status(), self.todos.status()]
            .into_iter()
            .filter_map(StatusBoard::current)
            .collect();

        if messages.is_empty() {
            println!("(no messages)");
        }
        for message in messages {
            println!("{}", message);
        }
    }

    /// Run one command. Returns false when the session should end.
    async fn execute(&mut self, command: Command, lines: &mut Lines<BufReader<Stdin>>) -> std::io::Result<bool> {
        match command {
            Command::Activities => {
                self.activities.load().await;
                print!("{}", self.activities.render());
            }
            Command::Signup { email, activity } => {
                if self.activities.signup(&activity, &email).await.is_success() {
                    print!("{}", self.activities.render());
                }
            }
            Command::Unregister { email, activity } => {
                if self.activities.unregister(&activity, &email).await.is_success() {
                    print!("{}", self.activities.render());
                }
            }
            Command::Email(email) => {
                self.todos.email_entered(&email).await;
                print!("{}", self.todos.render());
            }
            Command::Todos => {
                self.todos.refresh().await;
                print!("{}", self.todos.render());
            }
            Command::Add {
                title,
                description,
                due_date,
            } => {
                let email = self.todos.form().email.clone();
                if email.is_empty() {
                    println!("Set an email first: email <address>");
                    return Ok(true);
                }
                let outcome = self
                    .todos
                    .create(&email, &title, description.as_deref(), due_date.as_deref())
                    .await;
                if outcome.is_success() {
                    print!("{}", self.todos.render());
                }
            }
            Command::Toggle(id) => match self.todos.todo(id).map(|t| t.completed) {
                Some(completed) => {
                    if self.todos.toggle(id, completed).await.is_success() {
                        print!("{}", self.todos.render());
                    }
                }
                None => println!("No task #{} in the current list", id),
            },
            Command::Delete(id) => {
                print!("{} [y/N] ", DELETE_PROMPT);
                std::io::stdout().flush()?;
                let answer = lines.next_line().await?.unwrap_or_default();
                let confirmed = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");

                if self.todos.delete(id, &|_: &str| confirmed).await.is_success() {
                    print!("{}", self.todos.render());
                }
            }
            Command::Status => self.print_all_messages(),
            Command::Help => println!("{}", HELP),
            Command::Quit => return Ok(false),
        }

        self.print_new_messages();
        Ok(true)
    }
}

fn print_if_new(board: &StatusBoard, last: &mut Option<u64>) {
    if let Some(message) = board.current() {
        if *last != Some(message.id) {
            println!("{}", message);
            *last = Some(message.id);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, skipped) = match std::env::var("MERGINGTON_CONFIG") {
        Ok(path) => (Config::load_with_env(&PathBuf::from(path))?, Vec::new()),
        Err(_) => Config::load_default(),
    };

    mergington::logging::init(&config.logging);
    for error in &skipped {
        tracing::warn!("Skipped config file: {}", error);
    }

    tracing::info!("Mergington session v{}", env!("CARGO_PKG_VERSION"));

    let backend = std::sync::Arc::new(HttpBackend::new(config.backend.client_config())?);
    let mut session = Session::new(backend, &config);

    session.activities.load().await;
    print!("{}", session.activities.render());
    println!();
    print!("{}", session.todos.render());
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(command) => {
                if !session.execute(command, &mut lines).await? {
                    break;
                }
            }
            Err(usage) => println!("{}", usage),
        }
    }

    tracing::info!("Session ended");
    Ok(())
}
