use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table};
use ratatui::Frame;

use crate::grid::{CellView, TableModel};
use crate::models::Source;
use crate::ui::app::{App, GridState, SettingsModal, HOUR_BUCKETS};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_filter_bar(f, app, chunks[0]);
    draw_grid(f, app, chunks[1]);
    draw_footer(f, chunks[2]);

    if app.hour_cursor.is_some() {
        draw_hour_modal(f, app);
    }
    if app.settings.is_some() {
        draw_settings_modal(f, app);
    }
}

fn draw_filter_bar(f: &mut Frame, app: &App, area: Rect) {
    let hours = if app.checked_hours.is_empty() {
        "all".to_string()
    } else {
        app.checked_hours
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>()
            .join(",")
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ~ {}", app.start_date, app.end_date),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "   hours: {}   favorites: {}",
            hours,
            app.favorites.len()
        )),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Tee Time Grid "),
    );
    f.render_widget(paragraph, area);
}

fn draw_grid(f: &mut Frame, app: &mut App, area: Rect) {
    match &app.grid {
        GridState::Idle => notice(f, area, "Press r to fetch tee times", Color::DarkGray),
        GridState::Loading => notice(f, area, "Fetching tee times...", Color::Yellow),
        GridState::Errored(message) => {
            notice(f, area, &format!("Request failed: {message}"), Color::Red)
        }
        GridState::Rendered(table) if table.rows.is_empty() => notice(
            f,
            area,
            "No tee times for the current filters",
            Color::DarkGray,
        ),
        GridState::Rendered(table) => {
            let cursor_row = app.cursor_row;
            let cursor_col = app.cursor_col;
            let widget = grid_table(table, cursor_row, cursor_col);
            app.table_state.select(Some(cursor_row));
            f.render_stateful_widget(widget, area, &mut app.table_state);
        }
    }
}

fn notice(f: &mut Frame, area: Rect, message: &str, color: Color) {
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn grid_table(table: &TableModel, cursor_row: usize, cursor_col: usize) -> Table<'static> {
    let header = Row::new(
        std::iter::once(Cell::from("날짜/시간대"))
            .chain(table.columns.iter().map(|name| Cell::from(name.clone())))
            .collect::<Vec<_>>(),
    )
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    let rows: Vec<Row> = table
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let mut cells = Vec::with_capacity(table.columns.len() + 1);
            cells.push(
                Cell::from(row.label.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
            );

            for (col_idx, cell) in row.cells.iter().enumerate() {
                let selected = row_idx == cursor_row && col_idx == cursor_col;
                cells.push(price_cell(cell.as_ref(), selected));
            }

            let widget = Row::new(cells);
            // Blank line between date groups.
            if row.new_date && row_idx > 0 {
                widget.top_margin(1)
            } else {
                widget
            }
        })
        .collect();

    let mut widths = vec![Constraint::Length(14)];
    widths.extend(table.columns.iter().map(|_| Constraint::Min(8)));

    Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().borders(Borders::ALL))
}

fn price_cell(cell: Option<&CellView>, selected: bool) -> Cell<'static> {
    let Some(view) = cell else {
        let mut style = Style::default().fg(Color::DarkGray);
        if selected {
            style = style.add_modifier(Modifier::REVERSED);
        }
        return Cell::from("-").style(style);
    };

    let badge_style = Style::default()
        .fg(source_color(view.source))
        .add_modifier(Modifier::BOLD);
    let price_style = if view.highlight {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled(view.source.badge(), badge_style),
        Span::raw(" "),
        Span::styled(view.display_price.clone(), price_style),
    ]);

    let mut style = Style::default();
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Cell::from(line).style(style)
}

fn source_color(source: Source) -> Color {
    match source {
        Source::Teescan => Color::Red,
        Source::Golfpang => Color::Blue,
    }
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" r", key),
        Span::raw(" refresh  "),
        Span::styled("h", key),
        Span::raw(" hours  "),
        Span::styled("s", key),
        Span::raw(" clubs  "),
        Span::styled("↵", key),
        Span::raw(" open  "),
        Span::styled(",/.", key),
        Span::raw(" shift dates  "),
        Span::styled("[/]", key),
        Span::raw(" range  "),
        Span::styled("q", key),
        Span::raw(" quit"),
    ]))
    .style(Style::default().fg(Color::DarkGray));

    f.render_widget(footer, area);
}

fn center_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn draw_hour_modal(f: &mut Frame, app: &App) {
    let Some(cursor) = app.hour_cursor else {
        return;
    };

    let popup = center_rect(36, 16, f.area());
    f.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(" Hour Filter ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Cyan));

    let half = HOUR_BUCKETS / 2;
    let mut lines = Vec::new();
    for i in 0..half {
        lines.push(Line::from(vec![
            hour_entry(app, i, cursor),
            Span::raw("    "),
            hour_entry(app, i + half, cursor),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " space toggle · c clear · esc close",
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn hour_entry(app: &App, bucket: u32, cursor: u32) -> Span<'static> {
    let marker = if app.checked_hours.contains(&bucket) {
        "x"
    } else {
        " "
    };
    let prefix = if bucket == cursor { "▸" } else { " " };
    let style = if bucket == cursor {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Span::styled(format!("{prefix}[{marker}] {bucket:02}시대"), style)
}

fn draw_settings_modal(f: &mut Frame, app: &App) {
    let Some(modal) = &app.settings else {
        return;
    };

    let popup = center_rect(40, 18, f.area());
    f.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(" Favorite Clubs ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Cyan));

    let lines = match modal {
        SettingsModal::Loading => vec![Line::from(""), Line::from("Fetching club list...")],
        SettingsModal::Failed(message) => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Request failed: {message}"),
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            Line::from(Span::styled(
                " esc close",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        SettingsModal::Ready {
            clubs,
            checked,
            cursor,
        } => {
            let visible = popup.height.saturating_sub(4) as usize;
            let offset = cursor.saturating_sub(visible.saturating_sub(1));

            let mut lines: Vec<Line> = clubs
                .iter()
                .zip(checked.iter())
                .enumerate()
                .skip(offset)
                .take(visible)
                .map(|(i, (club, &is_checked))| {
                    let marker = if is_checked { "x" } else { " " };
                    let prefix = if i == *cursor { "▸" } else { " " };
                    let style = if i == *cursor {
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    Line::from(Span::styled(format!("{prefix}[{marker}] {club}"), style))
                })
                .collect();

            if clubs.is_empty() {
                lines.push(Line::from("No clubs available"));
            }
            lines.push(Line::from(Span::styled(
                " space toggle · enter save · esc cancel",
                Style::default().fg(Color::DarkGray),
            )));
            lines
        }
    };

    f.render_widget(Paragraph::new(lines).block(block), popup);
}
