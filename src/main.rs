use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use eyre::Result;
use std::path::PathBuf;
use taskboard::{Backend, Config, Task, TaskFilter, TaskId, TaskStore, Theme, ThemeStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Task list editor with persisted tasks and theme")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/taskboard/config.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding persisted state (overrides config)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Storage backend (overrides config)
    #[arg(short, long, value_enum)]
    backend: Option<Backend>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task
    Add { title: String, description: String },

    /// List tasks
    List {
        /// all, completed or incomplete
        #[arg(short, long, default_value = "all")]
        filter: TaskFilter,
    },

    /// Replace a task's description
    Update {
        #[arg(allow_negative_numbers = true)]
        id: TaskId,
        description: String,
    },

    /// Mark a task completed or incomplete
    Toggle {
        #[arg(allow_negative_numbers = true)]
        id: TaskId,
    },

    /// Delete a task
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: TaskId,
    },

    /// Show or toggle the display theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Switch between light and dark
    Toggle,
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }

    let mut tasks = TaskStore::open(config.open_backend()?);
    let mut theme = ThemeStore::open(config.open_backend()?);

    match cli.command {
        Commands::Add { title, description } => {
            let id = tasks.add_task(&title, &description)?;
            if let Some(task) = tasks.get(id) {
                println!("Added {}", render_task(task, theme.theme()));
            }
        }
        Commands::List { filter } => {
            tasks.set_filter(filter);
            let visible = tasks.visible_tasks();
            if visible.is_empty() {
                match filter {
                    TaskFilter::All => println!("No tasks"),
                    other => println!("No {} tasks", other),
                }
            }
            for task in visible {
                println!("{}", render_task(task, theme.theme()));
            }
        }
        Commands::Update { id, description } => {
            if tasks.update_task(id, &description) {
                println!("Updated task {}", id);
            } else {
                println!("No task with id {}", id);
            }
        }
        Commands::Toggle { id } => {
            if tasks.toggle_completed(id) {
                if let Some(task) = tasks.get(id) {
                    println!("{}", render_task(task, theme.theme()));
                }
            } else {
                println!("No task with id {}", id);
            }
        }
        Commands::Delete { id } => {
            if tasks.delete_task(id) {
                println!("Deleted task {}", id);
            } else {
                println!("No task with id {}", id);
            }
        }
        Commands::Theme { action } => {
            if let Some(ThemeAction::Toggle) = action {
                theme.toggle_theme();
            }
            println!("Theme: {}", theme.theme());
        }
    }

    Ok(())
}

fn render_task(task: &Task, theme: Theme) -> String {
    let marker = if task.completed { "[x]" } else { "[ ]" };
    let created = task
        .created_at()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();

    format!(
        "{} {} {} - {} {}",
        paint_marker(marker, task.completed, theme),
        task.id.to_string().dimmed(),
        paint_title(&task.title, task.completed, theme),
        task.description,
        created.dimmed()
    )
}

fn paint_marker(marker: &str, completed: bool, theme: Theme) -> ColoredString {
    match (theme, completed) {
        (Theme::Light, true) => marker.green(),
        (Theme::Light, false) => marker.yellow(),
        (Theme::Dark, true) => marker.bright_green(),
        (Theme::Dark, false) => marker.bright_yellow(),
    }
}

fn paint_title(title: &str, completed: bool, theme: Theme) -> ColoredString {
    let title = match theme {
        Theme::Light => title.blue().bold(),
        Theme::Dark => title.bright_cyan().bold(),
    };
    if completed { title.strikethrough() } else { title }
}
