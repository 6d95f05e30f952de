// src/specs/schedule.rs
//! Scraping *spec* for the daily schedule page.
//!
//! Page shape (only what matters here):
//! ```html
//! <thead><tr>
//!   <th id="sch_time">Time</th><th id="sch_phones">Phones</th> … <th>Total</th>
//! </tr></thead>
//! <table id="sch_table_verticle">
//!   <thead>…</thead>
//!   <tr><td>7:00am</td><td>ABCDEFGH</td> … <td>2</td></tr>
//!   …
//!   <tr>…footer…</tr><tr>…footer…</tr>
//! </table>
//! ```
//! Column identities come from the header ids (`sch_<role>`); the body cells
//! line up with them by position. The trailing "Total" header carries no id,
//! so a `total` column is appended and later dropped together with the footer
//! rows.
//!
//! Pure: no fetching, no caching.

use chrono::NaiveDate;
use log::debug;

use crate::config::{
    SiteSettings,
    consts::{AGENT_CODE_WIDTH, TIME_COLUMN, TOTAL_COLUMN},
};
use crate::core::html::{self, element_by_id_ci, next_tag_block_ci};
use crate::core::sanitize::is_numeric;
use crate::error::ParseError;
use crate::roles::RoleColumn;
use crate::schedule::{Assignment, ScheduleTable, TimeSlot, split_agent_codes};

/// Where the schedule lives on the page and how much trailing summary to drop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleLayout {
    pub table_id: String,
    pub footer_rows: usize,
}

impl Default for ScheduleLayout {
    fn default() -> Self {
        Self::from_settings(&SiteSettings::default())
    }
}

impl ScheduleLayout {
    pub fn from_settings(site: &SiteSettings) -> Self {
        Self {
            table_id: site.schedule_table_id.clone(),
            footer_rows: site.footer_rows,
        }
    }
}

pub fn parse(doc: &str, date: NaiveDate, layout: &ScheduleLayout) -> Result<ScheduleTable, ParseError> {
    let header = header_ids(doc)?;
    let time_idx = header
        .iter()
        .position(|h| h == TIME_COLUMN)
        .ok_or(ParseError::ColumnMissing(TIME_COLUMN))?;

    let table = element_by_id_ci(doc, "table", &layout.table_id)
        .ok_or_else(|| ParseError::TableMissing(layout.table_id.clone()))?;
    let body = strip_thead(table);

    let mut rows: Vec<Vec<String>> = html::rows(&body).into_iter().map(html::row_cells).collect();
    rows.truncate(rows.len().saturating_sub(layout.footer_rows));

    let slots: Vec<TimeSlot> = rows
        .iter()
        .map(|r| TimeSlot::new(r.get(time_idx).cloned().unwrap_or_default()))
        .collect();

    let mut out = ScheduleTable::new(date, slots);
    for (col, id) in header.iter().enumerate() {
        if col == time_idx || id == TOTAL_COLUMN {
            continue;
        }
        let cells: Vec<Assignment> = rows
            .iter()
            .map(|r| r.get(col).and_then(|text| assignment(text)))
            .collect();
        out.push_column(RoleColumn::new(id), cells);
    }

    debug!(
        "Parsed schedule {}: {} slots x {} roles",
        out.key(),
        out.slots().len(),
        out.columns().len()
    );
    Ok(out)
}

/// Column tokens from the first header row, with `total` appended.
fn header_ids(doc: &str) -> Result<Vec<String>, ParseError> {
    let (hs, he) =
        next_tag_block_ci(doc, "<thead", "</thead>", 0).ok_or(ParseError::HeaderRowMissing)?;
    let thead = &doc[hs..he];
    let (rs, re) =
        next_tag_block_ci(thead, "<tr", "</tr>", 0).ok_or(ParseError::HeaderRowMissing)?;
    let row = html::inner_after_open_tag(&thead[rs..re]);

    let mut ids: Vec<String> = html::attr_values_ci(&row, "id")
        .iter()
        .filter_map(|id| id.split('_').nth(1))
        .map(str::to_string)
        .collect();
    ids.push(s!(TOTAL_COLUMN));
    Ok(ids)
}

/// The table with its `<thead>` cut out.
fn strip_thead(table: &str) -> String {
    match next_tag_block_ci(table, "<thead", "</thead>", 0) {
        Some((s, e)) => format!("{}{}", &table[..s], &table[e..]),
        None => s!(table),
    }
}

/// Blank or purely numeric cells hold nobody.
fn assignment(text: &str) -> Assignment {
    if text.is_empty() || is_numeric(text) {
        return None;
    }
    Some(split_agent_codes(text, AGENT_CODE_WIDTH))
}
