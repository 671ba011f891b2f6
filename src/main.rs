//! posts-crud: terminal client for the JSONPlaceholder posts resource
//!
//! ```sh
//! # Show the first page
//! posts-crud list
//!
//! # Create, edit, delete
//! posts-crud add --title "Hello" --body "First post"
//! posts-crud edit --id 3 --title "New title" --body "New body"
//! posts-crud delete --id 3
//!
//! # Interactive session (default when no command is given)
//! posts-crud shell
//!
//! # No network: generated in-memory posts
//! posts-crud --offline shell
//!
//! # Validate config without starting
//! posts-crud --check
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use posts_crud::config::AppConfig;
use posts_crud::interfaces::cli::{execute, render_view, run_shell, ShellCommand};
use posts_crud::runtime::{init_tracing, open_session, SessionOptions};
use posts_crud::shared::validate_page_size;
use posts_crud::PostDraft;

/// List, add, edit and delete posts on a JSONPlaceholder-style API.
#[derive(Parser, Debug)]
#[command(
    name = "posts-crud",
    version,
    about = "Paginated CRUD client for the JSONPlaceholder posts resource",
    long_about = "Paginated CRUD client for the JSONPlaceholder posts resource.\n\n\
                  Default config: ~/.config/posts-crud/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "POSTS_CRUD_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the remote base URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override the number of posts per page.
    #[arg(long, global = true)]
    page_size: Option<usize>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Work on generated in-memory posts instead of the remote API.
    #[arg(long, global = true)]
    offline: bool,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one page of posts.
    List {
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Create a post.
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        body: String,
    },
    /// Replace the title and body of a post.
    Edit {
        #[arg(long)]
        id: i64,
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        body: String,
    },
    /// Delete a post.
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Interactive session.
    Shell,
}

impl Command {
    fn into_shell_command(self) -> Option<ShellCommand> {
        match self {
            Command::List { page } => Some(ShellCommand::Page(page)),
            Command::Add { title, body } => Some(ShellCommand::Add(PostDraft::new(title, body))),
            Command::Edit { id, title, body } => Some(ShellCommand::Edit { id, title, body }),
            Command::Delete { id } => Some(ShellCommand::Delete(id)),
            Command::Shell => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(posts_crud::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            eprintln!("Using default configuration.");
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);
    info!("Configuration resolved from {}", config_path.display());

    if let Some(ref base_url) = cli.base_url {
        info!("CLI override: base_url = {}", base_url);
        config.remote.base_url = base_url.clone();
    }
    if let Some(page_size) = cli.page_size {
        let page_size = validate_page_size(Some(page_size));
        info!("CLI override: page_size = {}", page_size);
        config.pagination.page_size = page_size;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Remote      : {}", config.remote.base_url);
        match config.remote.timeout() {
            Some(timeout) => println!("   Timeout     : {}s", timeout.as_secs()),
            None => println!("   Timeout     : none"),
        }
        println!("   Page size   : {}", config.page_size());
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Open session ───────────────────────────────────────────
    let mut store = open_session(SessionOptions {
        config,
        offline: cli.offline,
        event_bus: None,
    })?;

    if let Err(e) = store.load().await {
        error!("{}", e);
        return Err(e.into());
    }

    match cli.command.unwrap_or(Command::Shell).into_shell_command() {
        Some(command) => {
            let message = execute(&mut store, command).await?;
            if !message.is_empty() {
                println!("{}", message);
            }
            print!("{}", render_view(&store.current_view()));
        }
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            run_shell(&mut store, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}
