use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Result, eyre};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use taskmaster::i18n::{Labels, labels};
use taskmaster::models::{is_valid_date, now_hhmm, today};
use taskmaster::{Config, Language, SlotStorage, StoreEvent, Task, TaskStore, view};

#[derive(Parser)]
#[command(name = "taskmaster")]
#[command(about = "TaskMaster CLI - dated tasks with persistent local storage")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the data directory from config
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task (defaults to today at the current time)
    Add {
        text: String,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        /// Time of day, HH:MM
        #[arg(long, conflicts_with = "no_time")]
        time: Option<String>,
        /// Add the task without a time
        #[arg(long)]
        no_time: bool,
    },

    /// List tasks for a day, ordered by time
    List {
        /// Day to show, YYYY-MM-DD (default: today)
        #[arg(long, conflicts_with = "all")]
        date: Option<String>,
        /// Show every task in storage order
        #[arg(long)]
        all: bool,
    },

    /// Toggle a task's completion
    Toggle { id: String },

    /// Replace a task's text
    Edit { id: String, text: String },

    /// Delete a task
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show or set the UI language (en, ar)
    Lang {
        language: Option<Language>,
        /// Switch to the other language
        #[arg(long, conflicts_with = "language")]
        toggle: bool,
    },
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let mut store = TaskStore::open_with_key(config.open_storage()?, &config.storage_key);
    store.subscribe(|event| {
        if let StoreEvent::PersistFailed { error } = event {
            eprintln!("{} {}", "warning: changes not saved:".yellow(), error);
        }
    });

    run(&mut store, cli.command)
}

fn run<S: SlotStorage>(store: &mut TaskStore<S>, command: Commands) -> Result<()> {
    let l = labels(store.language());

    match command {
        Commands::Add {
            text,
            date,
            time,
            no_time,
        } => {
            let date = resolve_date(date)?;
            let time = if no_time { None } else { Some(time.unwrap_or_else(now_hhmm)) };
            let id = store.add_task(&text, &date, time.as_deref())?;
            println!("{} {}", l.add.green(), id);
        }
        Commands::List { date, all } => {
            if all {
                print_tasks(store.language(), &store.tasks().iter().collect::<Vec<_>>());
            } else {
                let date = resolve_date(date)?;
                let tasks = store.day_view(&date);
                let (done, total) = view::progress(&tasks);
                let header = format!("{} - {} ({}/{})", l.title, date, done, total);
                println!("{}", directional(store.language(), &header).bold());
                print_tasks(store.language(), &tasks);
                println!();
                println!("{}", directional(store.language(), l.footer).dimmed());
                println!("{}", directional(store.language(), l.copyright).dimmed());
            }
        }
        Commands::Toggle { id } => {
            if !store.toggle_task(&id) {
                return Err(eyre!("No task with id {}", id));
            }
            if let Some(task) = store.get(&id) {
                print_tasks(store.language(), &[task]);
            }
        }
        Commands::Edit { id, text } => {
            if !store.edit_task(&id, &text)? {
                return Err(eyre!("No task with id {}", id));
            }
            println!("{}: {}", l.edit_title, text.trim());
        }
        Commands::Delete { id, yes } => {
            let Some(task) = store.get(&id) else {
                return Err(eyre!("No task with id {}", id));
            };
            println!("{}", task.text);
            if !yes && !confirm_delete(l, &mut io::stdin().lock(), &mut io::stdout())? {
                println!("{}", l.delete_confirm_cancel);
                return Ok(());
            }
            if !store.delete_task(&id) {
                return Err(eyre!("No task with id {}", id));
            }
            println!("{} {}", l.delete_confirm_action.red(), id);
        }
        Commands::Lang { language, toggle } => {
            if toggle {
                let other = store.language().toggled();
                store.set_language(other);
            } else if let Some(language) = language {
                store.set_language(language);
            }
            println!("{}", store.language());
        }
    }

    Ok(())
}

/// Date argument or today, rejecting anything that is not YYYY-MM-DD
fn resolve_date(date: Option<String>) -> Result<String> {
    match date {
        Some(date) if !is_valid_date(&date) => Err(eyre!("Invalid date {:?} (expected YYYY-MM-DD)", date)),
        Some(date) => Ok(date),
        None => Ok(today()),
    }
}

/// Ask before deleting; anything but an explicit yes declines
fn confirm_delete<R: BufRead, W: Write>(l: &Labels, input: &mut R, output: &mut W) -> Result<bool> {
    writeln!(output, "{}", l.delete_confirm_title)?;
    writeln!(output, "{}", l.delete_confirm_description)?;
    write!(output, "{} [y/N] ", l.delete_confirm_action)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes") || answer == l.delete_confirm_action.to_lowercase())
}

/// Mark right-to-left lines so terminals lay them out correctly
fn directional(language: Language, text: &str) -> String {
    if language.is_rtl() {
        format!("\u{200F}{}", text)
    } else {
        text.to_string()
    }
}

fn print_tasks(language: Language, tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("{}", labels(language).no_tasks.dimmed());
        return;
    }

    for task in tasks {
        let mark = if task.completed { "[x]".green() } else { "[ ]".normal() };
        let text = if task.completed {
            task.text.strikethrough().dimmed()
        } else {
            task.text.normal()
        };
        let when = match &task.time {
            Some(time) => format!("{} {}", task.date, time),
            None => task.date.clone(),
        };
        println!("{} {} {} {}", mark, when.cyan(), text, task.id.dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(language: Language, answer: &str) -> (bool, String) {
        let mut input = Cursor::new(answer.as_bytes().to_vec());
        let mut output = Vec::new();
        let confirmed = confirm_delete(labels(language), &mut input, &mut output).unwrap();
        (confirmed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_confirm_delete_declines_by_default() {
        assert!(!ask(Language::En, "\n").0);
        assert!(!ask(Language::En, "n\n").0);
        assert!(!ask(Language::En, "maybe\n").0);
        assert!(!ask(Language::En, "").0);
    }

    #[test]
    fn test_confirm_delete_accepts_yes() {
        assert!(ask(Language::En, "y\n").0);
        assert!(ask(Language::En, " YES \n").0);
        assert!(ask(Language::En, "delete\n").0);
        assert!(ask(Language::Ar, "حذف\n").0);
    }

    #[test]
    fn test_confirm_delete_prompt_is_localized() {
        let (_, prompt) = ask(Language::Ar, "n\n");
        assert!(prompt.contains("هل أنت متأكد؟"));
        assert!(prompt.contains("لا يمكن التراجع"));

        let (_, prompt) = ask(Language::En, "n\n");
        assert!(prompt.contains("Are you sure?"));
    }

    #[test]
    fn test_resolve_date() {
        assert_eq!(resolve_date(Some("2025-06-01".to_string())).unwrap(), "2025-06-01");
        assert_eq!(resolve_date(None).unwrap(), today());
        assert!(resolve_date(Some("June 1".to_string())).is_err());
        assert!(resolve_date(Some("2025-02-30".to_string())).is_err());
    }

    #[test]
    fn test_directional_marks_rtl_only() {
        assert_eq!(directional(Language::En, "Tasks"), "Tasks");
        assert!(directional(Language::Ar, "مهام").starts_with('\u{200F}'));
    }

    #[test]
    fn test_delete_with_yes_skips_prompt() {
        let mut store = TaskStore::open(taskmaster::MemoryStorage::new());
        let id = store.add_task("Remove me", "2025-06-01", None).unwrap();

        let command = Commands::Delete { id: id.clone(), yes: true };
        run(&mut store, command).unwrap();
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn test_lang_toggle() {
        let mut store = TaskStore::open(taskmaster::MemoryStorage::new());
        run(&mut store, Commands::Lang { language: None, toggle: true }).unwrap();
        assert_eq!(store.language(), Language::Ar);
        run(&mut store, Commands::Lang { language: None, toggle: true }).unwrap();
        assert_eq!(store.language(), Language::En);
    }

    #[test]
    fn test_list_rejects_bad_date() {
        let mut store = TaskStore::open(taskmaster::MemoryStorage::new());
        let command = Commands::List {
            date: Some("01/06/2025".to_string()),
            all: false,
        };
        assert!(run(&mut store, command).is_err());
    }
}
