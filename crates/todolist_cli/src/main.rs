//! Command-line shell over the TodoList core.
//!
//! # Responsibility
//! - Drive the same mutation pipeline the UI shells use.
//! - Simulate pointer drags for `move`, so reordering exercises the
//!   drag controller rather than a separate code path.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todolist_core::{
    default_log_level, init_logging, DirectoryTransfer, ImportNotice, LayoutMetrics,
    ListView, SqliteKvStore, TaskForm, TodoListService, VisualRow,
};

const DB_FILE_NAME: &str = "todolist.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "todolist", version, about = "Ordered task list with drag reordering")]
struct Cli {
    /// SQLite file holding the list.
    #[arg(long, env = "TODOLIST_DB_PATH")]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "TODOLIST_LOG_DIR")]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the list in display order.
    List,
    /// Append a task.
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Due date, e.g. 2024-05-01.
        #[arg(long, default_value = "")]
        date: String,
    },
    /// Delete the task at a 1-based position.
    Delete { position: usize },
    /// Drag the task at `from` so it lands at `to` (1-based).
    Move { from: usize, to: usize },
    /// Write todos.json into a directory.
    Export {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Replace the list with the contents of a JSON file.
    Import { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir.to_string_lossy()).map_err(anyhow::Error::msg)?;
    }

    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(DB_FILE_NAME));
    let store = SqliteKvStore::open(&db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;
    let mut service = TodoListService::open(store)?;

    match cli.command {
        Command::List => {}
        Command::Add {
            title,
            description,
            date,
        } => service.add_from_form(TaskForm::new(title, description, date))?,
        Command::Delete { position } => {
            let index = to_index(position, service.tasks().len())?;
            service.delete(index)?;
        }
        Command::Move { from, to } => {
            let len = service.tasks().len();
            let source = to_index(from, len)?;
            let target = to_index(to, len)?;
            drag_to(&mut service, source, target)?;
        }
        Command::Export { dir } => {
            let path = service.export(&DirectoryTransfer::new(dir))?;
            println!("Exported to {}", path.display());
            return Ok(());
        }
        Command::Import { file } => {
            let transfer = DirectoryTransfer::new(".");
            let result = service.import_file(&transfer, &file);
            let notice = ImportNotice::from_result(&result);
            println!("{}", notice.message());
            if !notice.is_success() {
                std::process::exit(1);
            }
        }
    }

    print_view(service.view());
    Ok(())
}

/// Replays a pointer drag that moves `source` to final position `target`.
fn drag_to(
    service: &mut TodoListService<SqliteKvStore>,
    source: usize,
    target: usize,
) -> Result<()> {
    if !service.drag_start(source) {
        bail!("cannot drag position {}", source + 1);
    }

    let layout = service.view().layout(&LayoutMetrics::default());
    let others: Vec<_> = layout
        .iter()
        .filter(|entry_box| entry_box.index != source)
        .collect();
    let pointer_y = match others.get(target) {
        Some(entry_box) => entry_box.midpoint() - 1.0,
        None => layout
            .last()
            .map_or(0.0, |entry_box| entry_box.top + entry_box.height + 1.0),
    };

    let slot = service.drag_over(pointer_y, &layout);
    log::debug!("event=cli_move module=cli status=over slot={slot:?}");
    if !service.drop_entry()? {
        service.drag_end();
        bail!("move was not applied");
    }
    Ok(())
}

fn to_index(position: usize, len: usize) -> Result<usize> {
    if position == 0 || position > len {
        bail!("position {position} is out of range (list has {len} task(s))");
    }
    Ok(position - 1)
}

fn print_view(view: &ListView) {
    if view.entries.is_empty() {
        println!("(no tasks)");
        return;
    }
    for row in view.rows() {
        match row {
            VisualRow::Entry(entry) => {
                println!("{:>3}. {}", entry.index + 1, entry.title);
                if let Some(description) = &entry.description {
                    println!("     {description}");
                }
                if let Some(due) = &entry.due {
                    println!("     {due}");
                }
            }
            VisualRow::DropIndicator => println!("     ----"),
        }
    }
}
