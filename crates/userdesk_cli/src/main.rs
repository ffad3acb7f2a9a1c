//! Command-line entry point for `userdesk_core`.
//!
//! # Responsibility
//! - Verify core crate wiring without any UI shell.
//! - Exercise the user and task stores against real collaborators.
//!
//! Set `USERDESK_LOG_DIR` to an absolute path to enable file logging.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use userdesk_core::db::open_db;
use userdesk_core::{
    default_log_level, init_logging, HttpUserSource, SourceConfig, SqliteBlobStore, TaskId,
    TaskStore, UserStore,
};

#[derive(Parser)]
#[command(name = "userdesk_cli")]
#[command(about = "Inspect userdesk users and tasks from the terminal")]
#[command(
    after_help = "Environment:\n  USERDESK_LOG_DIR   Absolute directory for rolling log files"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the remote user listing and print records matching `term`.
    Users { term: Option<String> },
    /// List or change the to-do tasks persisted in a SQLite file.
    Tasks {
        db_path: PathBuf,
        #[command(subcommand)]
        action: Option<TaskAction>,
    },
}

#[derive(Subcommand)]
enum TaskAction {
    /// Append a task; words are joined with single spaces.
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    Toggle {
        id: TaskId,
    },
    Remove {
        id: TaskId,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(log_dir) = std::env::var("USERDESK_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let result = match cli.command {
        None => {
            println!("userdesk_core ping={}", userdesk_core::ping());
            println!("userdesk_core version={}", userdesk_core::core_version());
            Ok(())
        }
        Some(Command::Users { term }) => run_users(term.as_deref().unwrap_or("")),
        Some(Command::Tasks { db_path, action }) => run_tasks(&db_path, action),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run_users(term: &str) -> Result<(), String> {
    let source = HttpUserSource::new(&SourceConfig::default()).map_err(|err| err.to_string())?;
    let store = UserStore::open(source);
    if let Some(message) = store.error() {
        return Err(message.to_string());
    }

    for user in store.search(term) {
        println!(
            "{:>4}  {}  <{}>  {}  {}",
            user.id, user.name, user.email, user.company, user.city
        );
    }
    Ok(())
}

fn run_tasks(db_path: &Path, action: Option<TaskAction>) -> Result<(), String> {
    let conn = open_db(db_path).map_err(|err| err.to_string())?;
    let blobs = SqliteBlobStore::try_new(&conn).map_err(|err| err.to_string())?;
    let mut store = TaskStore::load(blobs);

    match action {
        None => {}
        Some(TaskAction::Add { text }) => {
            store.add(&text.join(" ")).map_err(|err| err.to_string())?;
        }
        Some(TaskAction::Toggle { id }) => {
            if !store.toggle(id) {
                eprintln!("no such task: {id}");
            }
        }
        Some(TaskAction::Remove { id }) => {
            if !store.remove(id) {
                eprintln!("no such task: {id}");
            }
        }
    }

    for item in store.items() {
        let mark = if item.completed { "x" } else { " " };
        println!("[{mark}] {}  {}", item.id, item.text);
    }
    println!("{}/{} completed", store.completed_count(), store.total());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, TaskAction};
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_prints_the_health_check() {
        let cli = Cli::try_parse_from(["userdesk_cli"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn help_is_rendered_instead_of_rejected() {
        let err = Cli::try_parse_from(["userdesk_cli", "--help"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn users_term_is_optional() {
        let cli = Cli::try_parse_from(["userdesk_cli", "users"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Users { term: None })));

        let cli = Cli::try_parse_from(["userdesk_cli", "users", "romaguera"]).unwrap();
        match cli.command {
            Some(Command::Users { term }) => assert_eq!(term.as_deref(), Some("romaguera")),
            _ => panic!("expected users command"),
        }
    }

    #[test]
    fn add_collects_words_and_requires_text() {
        let cli = Cli::try_parse_from(["userdesk_cli", "tasks", "db.sqlite", "add", "Buy", "milk"])
            .unwrap();
        match cli.command {
            Some(Command::Tasks {
                db_path,
                action: Some(TaskAction::Add { text }),
            }) => {
                assert_eq!(db_path.to_str(), Some("db.sqlite"));
                assert_eq!(text.join(" "), "Buy milk");
            }
            _ => panic!("expected tasks add"),
        }

        let err = Cli::try_parse_from(["userdesk_cli", "tasks", "db.sqlite", "add"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn task_ids_are_parsed_as_integers() {
        let cli = Cli::try_parse_from(["userdesk_cli", "tasks", "db.sqlite", "toggle", "1700000000000"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Tasks {
                action: Some(TaskAction::Toggle { id: 1_700_000_000_000 }),
                ..
            })
        ));

        let err = Cli::try_parse_from(["userdesk_cli", "tasks", "db.sqlite", "remove", "abc"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
