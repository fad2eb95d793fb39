use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Result, bail};
use std::path::PathBuf;
use tasktrack::config::{TASKS_FILE_ENV, resolve_tasks_path};
use tasktrack::models::{DATE_FORMAT, today};
use tasktrack::{Category, Config, Filter, NewTask, Priority, Store, Task, categories_in_use, get_overdue_tasks};
use tracing::{Level, debug};

#[derive(Parser)]
#[command(name = "tasktrack")]
#[command(about = "tasktrack - Personal task tracker backed by a JSON task file")]
#[command(version)]
struct Cli {
    /// Path to the task file (default: $TASKTRACK_FILE, the config file, or ./tasks.json)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Low, Medium or High
        #[arg(short, long, default_value = "Low")]
        priority: Priority,

        /// Work, Personal, School or Other
        #[arg(short, long, default_value = "Work")]
        category: Category,

        /// Due date as YYYY-MM-DD (default: today)
        #[arg(long, value_parser = parse_date)]
        due: Option<NaiveDate>,
    },

    /// List tasks, hiding completed ones unless asked
    List {
        #[arg(short, long)]
        priority: Option<Priority>,

        #[arg(short, long)]
        category: Option<Category>,

        /// Show only completed tasks
        #[arg(long, conflicts_with = "all")]
        completed: bool,

        /// Show completed and open tasks
        #[arg(short, long)]
        all: bool,

        /// Case-sensitive text to find in title or description
        #[arg(short, long)]
        search: Option<String>,

        /// Show only overdue tasks
        #[arg(long)]
        overdue: bool,
    },

    /// Mark a task complete, or undo completion
    Toggle { id: u64 },

    /// Delete a task
    Delete { id: u64 },

    /// List incomplete tasks due before today
    Overdue,

    /// List the categories that have tasks
    Categories,
}

fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let path = resolve_tasks_path(cli.file, std::env::var_os(TASKS_FILE_ENV), Config::load)?;
    debug!(file = ?path, "Using task file");

    let mut store = Store::open(&path)?;

    match cli.command {
        Commands::Add {
            title,
            description,
            priority,
            category,
            due,
        } => {
            if title.trim().is_empty() {
                bail!("Task title cannot be empty");
            }
            let task = store.add(NewTask {
                title,
                description,
                priority,
                category,
                due_date: due.unwrap_or_else(today),
            })?;
            println!("{} #{} {}", "Added".green(), task.id, task.title.bold());
        }
        Commands::List {
            priority,
            category,
            completed,
            all,
            search,
            overdue,
        } => {
            let mut filters = Vec::new();
            if let Some(category) = category {
                filters.push(Filter::Category(category));
            }
            if let Some(priority) = priority {
                filters.push(Filter::Priority(priority));
            }
            if completed {
                filters.push(Filter::Completed(true));
            } else if !all {
                filters.push(Filter::Completed(false));
            }
            if let Some(query) = search {
                filters.push(Filter::Search(query));
            }
            if overdue {
                filters.push(Filter::overdue());
            }
            print_tasks(&store.list(&filters));
        }
        Commands::Toggle { id } => {
            if store.toggle(id)? {
                println!("{} #{}", "Completed".green(), id);
            } else {
                println!("{} #{}", "Reopened".yellow(), id);
            }
        }
        Commands::Delete { id } => {
            let task = store.delete(id)?;
            println!("{} #{} {}", "Deleted".red(), task.id, task.title);
        }
        Commands::Overdue => {
            print_tasks(&get_overdue_tasks(store.tasks()));
        }
        Commands::Categories => {
            for category in categories_in_use(store.tasks()) {
                println!("{}", category);
            }
        }
    }

    Ok(())
}

fn print_tasks(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("{}", "No tasks".dimmed());
        return;
    }

    let today = today();
    for task in tasks {
        let (mark, title) = if task.completed {
            ("[x]", task.title.strikethrough())
        } else {
            ("[ ]", task.title.bold())
        };
        let due = task.due_date.format(DATE_FORMAT).to_string();
        let due = if !task.completed && task.due_date < today {
            due.red()
        } else {
            due.normal()
        };

        println!("{} #{} {}", mark, task.id, title);
        if !task.description.is_empty() {
            println!("      {}", task.description);
        }
        println!(
            "      {} {} {}",
            "Due:".dimmed(),
            due,
            format!("| Priority: {} | Category: {}", task.priority, task.category).dimmed()
        );
    }
}
