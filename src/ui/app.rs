use std::collections::BTreeSet;

use chrono::{Duration, Local, NaiveDate};
use crossterm::event::KeyCode;
use ratatui::widgets::TableState;
use tracing::{error, info};

use crate::api::ApiError;
use crate::grid::{build_table, group_offers, CellView, TableModel};
use crate::models::{GroupedRequest, Offer};

pub const HOUR_BUCKETS: u32 = 24;

/// Result of a background fetch, tagged for the request-id fence.
#[derive(Debug)]
pub enum FetchOutcome {
    Grid {
        request_id: u64,
        result: Result<Vec<Offer>, ApiError>,
    },
    Clubs {
        result: Result<Vec<String>, ApiError>,
    },
}

/// Lifecycle of the price grid.
#[derive(Debug, Default)]
pub enum GridState {
    #[default]
    Idle,
    Loading,
    Rendered(TableModel),
    Errored(String),
}

/// Settings modal lifecycle: club catalog in flight, editable, or failed.
#[derive(Debug)]
pub enum SettingsModal {
    Loading,
    Ready {
        clubs: Vec<String>,
        checked: Vec<bool>,
        cursor: usize,
    },
    Failed(String),
}

/// Work the event loop must perform on behalf of a key press.
#[derive(Debug, PartialEq)]
pub enum Action {
    None,
    Refresh,
    FetchClubs,
    SaveFavorites(Vec<String>),
    OpenUrl(String),
}

pub struct App {
    pub should_quit: bool,
    pub grid: GridState,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub checked_hours: BTreeSet<u32>,
    pub favorites: Vec<String>,
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub table_state: TableState,
    /// Cursor into the hour-filter modal; `None` while it is closed.
    pub hour_cursor: Option<u32>,
    pub settings: Option<SettingsModal>,
    next_request_id: u64,
    latest_request_id: Option<u64>,
}

impl App {
    pub fn new(days_ahead: i64, favorites: Vec<String>) -> Self {
        let initial = Local::now().date_naive() + Duration::days(days_ahead);

        Self {
            should_quit: false,
            grid: GridState::Idle,
            start_date: initial,
            end_date: initial,
            checked_hours: BTreeSet::new(),
            favorites,
            cursor_row: 0,
            cursor_col: 0,
            table_state: TableState::default(),
            hour_cursor: None,
            settings: None,
            next_request_id: 0,
            latest_request_id: None,
        }
    }

    /// Snapshot the current filter state as a request payload.
    pub fn build_request(&self) -> GroupedRequest {
        let hour_range = if self.checked_hours.is_empty() {
            None
        } else {
            Some(self.checked_hours.iter().copied().collect())
        };

        GroupedRequest {
            start_date: self.start_date.format("%Y-%m-%d").to_string(),
            end_date: self.end_date.format("%Y-%m-%d").to_string(),
            hour_range,
            favorite_clubs: self.favorites.clone(),
        }
    }

    /// Move the grid into Loading and hand out a fenced request. Responses
    /// that come back under an older id are ignored, so a slow earlier
    /// fetch can never overwrite a newer one.
    pub fn begin_refresh(&mut self) -> (u64, GroupedRequest) {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.latest_request_id = Some(request_id);
        self.grid = GridState::Loading;

        info!("Issuing tee-time request {}", request_id);
        (request_id, self.build_request())
    }

    pub fn on_grid_outcome(&mut self, request_id: u64, result: Result<Vec<Offer>, ApiError>) {
        if self.latest_request_id != Some(request_id) {
            info!("Dropping stale response for request {}", request_id);
            return;
        }

        match result {
            Ok(offers) => {
                info!(
                    "Received {} offers for request {}",
                    offers.len(),
                    request_id
                );
                let table = build_table(&group_offers(offers));
                self.cursor_row = self.cursor_row.min(table.rows.len().saturating_sub(1));
                self.cursor_col = self.cursor_col.min(table.columns.len().saturating_sub(1));
                self.grid = GridState::Rendered(table);
            }
            Err(e) => {
                error!("Tee-time request {} failed: {}", request_id, e);
                self.grid = GridState::Errored(e.to_string());
            }
        }
    }

    pub fn on_clubs_outcome(&mut self, result: Result<Vec<String>, ApiError>) {
        if !matches!(self.settings, Some(SettingsModal::Loading)) {
            // Modal was closed while the catalog was in flight.
            return;
        }

        self.settings = Some(match result {
            Ok(clubs) => {
                let checked = clubs.iter().map(|c| self.favorites.contains(c)).collect();
                SettingsModal::Ready {
                    clubs,
                    checked,
                    cursor: 0,
                }
            }
            Err(e) => {
                error!("Failed to fetch club catalog: {}", e);
                SettingsModal::Failed(e.to_string())
            }
        });
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Action {
        if self.settings.is_some() {
            return self.handle_settings_key(code);
        }
        if self.hour_cursor.is_some() {
            self.handle_hour_key(code);
            return Action::None;
        }

        match code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Action::None
            }
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('s') => {
                self.settings = Some(SettingsModal::Loading);
                Action::FetchClubs
            }
            KeyCode::Char('h') => {
                self.hour_cursor = Some(0);
                Action::None
            }
            KeyCode::Up => {
                self.move_cursor(-1, 0);
                Action::None
            }
            KeyCode::Down => {
                self.move_cursor(1, 0);
                Action::None
            }
            KeyCode::Left => {
                self.move_cursor(0, -1);
                Action::None
            }
            KeyCode::Right => {
                self.move_cursor(0, 1);
                Action::None
            }
            KeyCode::Enter => match self.selected_cell() {
                Some(cell) => Action::OpenUrl(cell.url.clone()),
                None => Action::None,
            },
            KeyCode::Char(',') => {
                self.shift_range(-1);
                Action::None
            }
            KeyCode::Char('.') => {
                self.shift_range(1);
                Action::None
            }
            KeyCode::Char('[') => {
                self.resize_range(-1);
                Action::None
            }
            KeyCode::Char(']') => {
                self.resize_range(1);
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Cell under the cursor, if it holds a surviving offer.
    pub fn selected_cell(&self) -> Option<&CellView> {
        let GridState::Rendered(table) = &self.grid else {
            return None;
        };
        table
            .rows
            .get(self.cursor_row)?
            .cells
            .get(self.cursor_col)?
            .as_ref()
    }

    fn move_cursor(&mut self, dr: isize, dc: isize) {
        let GridState::Rendered(table) = &self.grid else {
            return;
        };
        if table.rows.is_empty() || table.columns.is_empty() {
            return;
        }

        let rows = table.rows.len() as isize;
        let cols = table.columns.len() as isize;
        self.cursor_row = (self.cursor_row as isize + dr).clamp(0, rows - 1) as usize;
        self.cursor_col = (self.cursor_col as isize + dc).clamp(0, cols - 1) as usize;
    }

    fn shift_range(&mut self, days: i64) {
        self.start_date = self.start_date + Duration::days(days);
        self.end_date = self.end_date + Duration::days(days);
    }

    fn resize_range(&mut self, days: i64) {
        self.end_date = self.end_date + Duration::days(days);
        if self.end_date < self.start_date {
            self.end_date = self.start_date;
        }
    }

    fn handle_hour_key(&mut self, code: KeyCode) {
        let Some(cursor) = self.hour_cursor else {
            return;
        };

        match code {
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Enter => self.hour_cursor = None,
            KeyCode::Up => {
                self.hour_cursor = Some(cursor.checked_sub(1).unwrap_or(HOUR_BUCKETS - 1));
            }
            KeyCode::Down => self.hour_cursor = Some((cursor + 1) % HOUR_BUCKETS),
            KeyCode::Left | KeyCode::Right => {
                self.hour_cursor = Some((cursor + HOUR_BUCKETS / 2) % HOUR_BUCKETS);
            }
            KeyCode::Char(' ') => {
                if !self.checked_hours.remove(&cursor) {
                    self.checked_hours.insert(cursor);
                }
            }
            KeyCode::Char('c') => self.checked_hours.clear(),
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, code: KeyCode) -> Action {
        let Some(mut modal) = self.settings.take() else {
            return Action::None;
        };

        let mut action = Action::None;
        let mut keep_open = true;

        match &mut modal {
            SettingsModal::Ready {
                clubs,
                checked,
                cursor,
            } => match code {
                KeyCode::Esc => keep_open = false,
                KeyCode::Up => {
                    if !clubs.is_empty() {
                        *cursor = cursor.checked_sub(1).unwrap_or(clubs.len() - 1);
                    }
                }
                KeyCode::Down => {
                    if !clubs.is_empty() {
                        *cursor = (*cursor + 1) % clubs.len();
                    }
                }
                KeyCode::Char(' ') => {
                    if let Some(flag) = checked.get_mut(*cursor) {
                        *flag = !*flag;
                    }
                }
                KeyCode::Enter => {
                    let selected: Vec<String> = clubs
                        .iter()
                        .zip(checked.iter())
                        .filter(|(_, &checked)| checked)
                        .map(|(club, _)| club.clone())
                        .collect();

                    self.favorites = selected.clone();
                    action = Action::SaveFavorites(selected);
                    keep_open = false;
                }
                _ => {}
            },
            SettingsModal::Loading | SettingsModal::Failed(_) => {
                if matches!(code, KeyCode::Esc | KeyCode::Char('q')) {
                    keep_open = false;
                }
            }
        }

        if keep_open {
            self.settings = Some(modal);
        }
        action
    }
}
