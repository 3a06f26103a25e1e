use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use roster_core::domains::ui::form::{DEMO_EMAIL, DEMO_PASSWORD};
use roster_core::{ConfigOverrides, RefreshPolicy};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::Context;
use cli::commands::{self, UserFields};
use cli::output::ListLayout;

#[derive(Parser)]
#[command(
    name = "rosterctl",
    version,
    about = "Manage users on the reqres demo API"
)]
struct Cli {
    /// Base URL of the remote API (overrides ROSTER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// API key sent as x-api-key (overrides ROSTER_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,
    /// Where the session token is persisted (overrides ROSTER_SESSION_FILE)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,
    /// What to do with the visible page after a create, update or delete
    #[arg(long, global = true, value_enum, default_value_t = RefreshArg::Refetch)]
    refresh: RefreshArg,
    /// Log file for the full-screen console
    #[arg(long, global = true, env = "ROSTER_LOG_FILE")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone)]
enum Command {
    /// Open the full-screen console (default)
    Tui,
    /// Log in and persist the session token
    Login {
        #[arg(long, default_value = DEMO_EMAIL)]
        email: String,
        #[arg(long, default_value = DEMO_PASSWORD)]
        password: String,
    },
    /// End the session; the local token is removed even if the server call fails
    Logout,
    /// Show configuration and whether a session is stored
    Status,
    /// List, create, update or delete users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Subcommand, Clone)]
enum UsersAction {
    /// Print one page of users
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Case-insensitive filter over first name, last name and email
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value_t = LayoutArg::Table)]
        layout: LayoutArg,
    },
    /// Register a new user
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        /// Profile image link
        #[arg(long)]
        avatar: String,
    },
    /// Update a user; unset fields keep the values currently on the server
    Update {
        id: u64,
        /// Page the user is listed on
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Delete a user (requires --yes)
    Delete {
        id: u64,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum RefreshArg {
    Refetch,
    Manual,
}

impl From<RefreshArg> for RefreshPolicy {
    fn from(val: RefreshArg) -> Self {
        match val {
            RefreshArg::Refetch => RefreshPolicy::RefetchCurrentPage,
            RefreshArg::Manual => RefreshPolicy::Manual,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum LayoutArg {
    Table,
    Cards,
}

impl From<LayoutArg> for ListLayout {
    fn from(val: LayoutArg) -> Self {
        match val {
            LayoutArg::Table => ListLayout::Table,
            LayoutArg::Cards => ListLayout::Cards,
        }
    }
}

fn init_tracing(log_file: Option<PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    match log_file {
        // The console owns the terminal, so its logs go to a file.
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Command::Tui);

    let log_file = match command {
        Command::Tui => Some(match cli.log_file.clone() {
            Some(path) => path,
            None => cli::default_log_file(),
        }),
        _ => None,
    };
    init_tracing(log_file)?;

    let overrides = ConfigOverrides {
        api_url: cli.api_url,
        api_key: cli.api_key,
        session_file: cli.session_file,
    };
    let ctx = Context::load(overrides, cli.refresh.into())?;

    match command {
        Command::Tui => cli::tui::run_console(ctx).await,
        Command::Login { email, password } => {
            commands::login(&ctx, email, password).await
        }
        Command::Logout => commands::logout(&ctx).await,
        Command::Status => commands::status(&ctx),
        Command::Users { action } => match action {
            UsersAction::List {
                page,
                search,
                layout,
            } => {
                commands::list_users(&ctx, page, search.as_deref(), layout.into())
                    .await
            }
            UsersAction::Create {
                first_name,
                last_name,
                email,
                avatar,
            } => {
                let fields = UserFields {
                    first_name: Some(first_name),
                    last_name: Some(last_name),
                    email: Some(email),
                    avatar: Some(avatar),
                };
                commands::create_user(&ctx, fields).await
            }
            UsersAction::Update {
                id,
                page,
                first_name,
                last_name,
                email,
                avatar,
            } => {
                let fields = UserFields {
                    first_name,
                    last_name,
                    email,
                    avatar,
                };
                commands::update_user(&ctx, id.into(), page, fields).await
            }
            UsersAction::Delete { id, yes } => {
                commands::delete_user(&ctx, id.into(), yes).await
            }
        },
    }
}
