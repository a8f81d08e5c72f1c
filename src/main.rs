use anyhow::Result;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs::File;
use std::io;
use std::sync::{Arc, Mutex};
use tracing::info;

mod api;
mod config;
mod grid;
mod models;
mod parsers;
mod storage;
mod ui;

use crate::api::{create_client, TeeTimeClient};
use crate::config::AppConfig;
use crate::storage::{FavoritesStore, SqliteFavoritesStore};
use crate::ui::App;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the aggregation server
    #[arg(long)]
    base_url: Option<String>,

    /// Configuration file to load instead of tee-time-grid.toml
    #[arg(long)]
    config: Option<String>,

    /// SQLite database holding saved preferences
    #[arg(long)]
    db: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(db) = args.db {
        config.db_path = db;
    }
    if let Some(log_file) = args.log_file {
        config.log_file = log_file;
    }

    // The alternate screen owns stdout, so logs go to a file.
    let log_file = File::create(&config.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tee_time_grid=info".parse()?),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    info!("Starting Tee Time Grid against {}", config.base_url);

    // Initialize storage
    let storage = Arc::new(SqliteFavoritesStore::new(&config.db_path).await?);
    storage.migrate().await?;
    let favorites = storage.load().await;

    // Initialize HTTP client
    let client = create_client(config.request_timeout_seconds)?;
    let api = Arc::new(TeeTimeClient::new(client, &config.base_url));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.days_ahead, favorites);
    let result = ui::run(&mut terminal, &mut app, api, storage).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
