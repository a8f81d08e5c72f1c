pub mod app;
pub mod browser;
pub mod draw;

pub use app::{Action, App, FetchOutcome, GridState, SettingsModal};

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::error;

use crate::api::TeeTimeClient;
use crate::storage::FavoritesStore;
use browser::open_in_browser;

/// Drive the terminal UI until the user quits. Fetches run on background
/// tasks and report back over the channel, so drawing and input handling
/// never block on the network.
pub async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    api: Arc<TeeTimeClient>,
    store: Arc<dyn FavoritesStore>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<FetchOutcome>(16);

    dispatch_grid_fetch(app, &api, &tx);

    loop {
        terminal.draw(|f| draw::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.handle_key(key.code) {
                        Action::None => {}
                        Action::Refresh => dispatch_grid_fetch(app, &api, &tx),
                        Action::FetchClubs => dispatch_clubs_fetch(&api, &tx),
                        Action::SaveFavorites(clubs) => {
                            if let Err(e) = store.save(&clubs).await {
                                error!("Failed to persist favorites: {}", e);
                            }
                            dispatch_grid_fetch(app, &api, &tx);
                        }
                        Action::OpenUrl(url) => {
                            if let Err(e) = open_in_browser(&url) {
                                error!("Failed to open booking page: {}", e);
                            }
                        }
                    }
                }
            }
        }

        while let Ok(outcome) = rx.try_recv() {
            match outcome {
                FetchOutcome::Grid { request_id, result } => {
                    app.on_grid_outcome(request_id, result)
                }
                FetchOutcome::Clubs { result } => app.on_clubs_outcome(result),
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn dispatch_grid_fetch(app: &mut App, api: &Arc<TeeTimeClient>, tx: &mpsc::Sender<FetchOutcome>) {
    let (request_id, request) = app.begin_refresh();
    let api = api.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        let result = api.fetch_grouped(&request).await;
        let _ = tx.send(FetchOutcome::Grid { request_id, result }).await;
    });
}

fn dispatch_clubs_fetch(api: &Arc<TeeTimeClient>, tx: &mpsc::Sender<FetchOutcome>) {
    let api = api.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        let result = api.fetch_all_clubs().await;
        let _ = tx.send(FetchOutcome::Clubs { result }).await;
    });
}
