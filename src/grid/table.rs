use crate::models::{SlotKey, Source};
use crate::parsers::format_man_won;

use super::Grouped;

/// One renderable cell: the surviving offer plus derived display state.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub source: Source,
    pub price: i64,
    pub display_price: String,
    pub url: String,
    pub highlight: bool,
}

/// One grid row, cells aligned with `TableModel::columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: String,
    pub date: String,
    /// True when this row starts a new date group, used as a visual
    /// separator only.
    pub new_date: bool,
    pub min_price: i64,
    pub cells: Vec<Option<CellView>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableModel {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// Build the display grid from grouped offers: columns sorted
/// lexicographically, rows sorted by (date, hour bucket), each cell flagged
/// highlighted iff its price equals the row minimum. Rows without a single
/// surviving cell are dropped.
pub fn build_table(grouped: &Grouped) -> TableModel {
    let columns: Vec<String> = grouped.clubs.iter().cloned().collect();

    let mut slots: Vec<&SlotKey> = grouped.slots.keys().collect();
    slots.sort_by(|a, b| {
        a.sort_key()
            .cmp(&b.sort_key())
            .then_with(|| a.label().cmp(&b.label()))
    });

    let mut rows = Vec::new();
    let mut last_date: Option<&str> = None;

    for slot in slots {
        let cells_by_club = &grouped.slots[slot];
        let Some(min_price) = cells_by_club.values().map(|o| o.price).min() else {
            continue;
        };

        let new_date = last_date != Some(slot.date.as_str());
        last_date = Some(slot.date.as_str());

        let cells = columns
            .iter()
            .map(|club| {
                cells_by_club.get(club).map(|offer| CellView {
                    source: offer.source,
                    price: offer.price,
                    display_price: format_man_won(offer.price),
                    url: offer.url.clone(),
                    highlight: offer.price == min_price,
                })
            })
            .collect();

        rows.push(TableRow {
            label: slot.label(),
            date: slot.date.clone(),
            new_date,
            min_price,
            cells,
        });
    }

    TableModel { columns, rows }
}
