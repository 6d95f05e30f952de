// src/schedule.rs
//! Typed schedule for one day, and ordered sets of days.
//!
//! A [`ScheduleTable`] is stored column-major: one [`RoleSchedule`] per role,
//! each holding one cell per time slot. Tables are immutable once built;
//! narrowing to a set of roles produces a new table.

use std::{borrow::Borrow, collections::BTreeSet, fmt, sync::Arc};

use chrono::{NaiveDate, NaiveTime};

use crate::dates::format_date;
use crate::roles::RoleColumn;

/// A staff member (or placeholder) as written in a schedule cell.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgentCode(String);

impl AgentCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// All whitespace: an unfilled slot rather than a person.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Borrow<str> for AgentCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AgentCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for AgentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cut packed cell text into fixed-width codes, in order.
/// A short trailing chunk is kept as-is.
pub fn split_agent_codes(text: &str, width: usize) -> Vec<AgentCode> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|chunk| AgentCode(chunk.iter().collect()))
        .collect()
}

/// Row label of a schedule table (`"7:00am"`, `"13:30"`, …).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimeSlot(String);

impl TimeSlot {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Clock time, if the label is in a recognizable format.
    pub fn to_time(&self) -> Option<NaiveTime> {
        let label = self.0.trim().to_ascii_uppercase();
        ["%H:%M", "%I:%M%p", "%I:%M %p"]
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(&label, fmt).ok())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One cell: `None` when the page showed nothing there.
pub type Assignment = Option<Vec<AgentCode>>;

#[derive(Clone, Debug, PartialEq)]
pub struct RoleSchedule {
    pub role: RoleColumn,
    /// Aligned with the table's slots.
    pub cells: Vec<Assignment>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleTable {
    date: NaiveDate,
    slots: Vec<TimeSlot>,
    columns: Vec<RoleSchedule>,
}

impl ScheduleTable {
    pub fn new(date: NaiveDate, slots: Vec<TimeSlot>) -> Self {
        Self { date, slots, columns: Vec::new() }
    }

    /// Append a role column; cells are padded/truncated to the slot count.
    pub fn push_column(&mut self, role: RoleColumn, mut cells: Vec<Assignment>) {
        cells.resize(self.slots.len(), None);
        self.columns.push(RoleSchedule { role, cells });
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Cache/wire key: `Y-M-D`, unpadded.
    pub fn key(&self) -> String {
        format_date(self.date)
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn columns(&self) -> &[RoleSchedule] {
        &self.columns
    }

    pub fn roles(&self) -> impl Iterator<Item = &RoleColumn> {
        self.columns.iter().map(|c| &c.role)
    }

    pub fn column(&self, role: &str) -> Option<&RoleSchedule> {
        self.columns.iter().find(|c| c.role.as_str() == role)
    }

    /// Agents in one cell; `None` if the slot/role is unknown or the cell is absent.
    pub fn cell(&self, slot: &str, role: &str) -> Option<&[AgentCode]> {
        let row = self.slots.iter().position(|s| s.as_str() == slot)?;
        self.column(role)?.cells.get(row)?.as_deref()
    }

    /// No role columns (e.g. after filtering to roles the day doesn't have).
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Every present cell, column by column, top to bottom.
    pub fn assignments(&self) -> impl Iterator<Item = (&RoleColumn, &TimeSlot, &[AgentCode])> {
        self.columns.iter().flat_map(move |col| {
            col.cells
                .iter()
                .zip(self.slots.iter())
                .filter_map(move |(cell, slot)| cell.as_deref().map(|agents| (&col.role, slot, agents)))
        })
    }

    /// Copy holding only the listed roles, column order preserved.
    pub fn retain_roles(&self, roles: &BTreeSet<RoleColumn>) -> ScheduleTable {
        ScheduleTable {
            date: self.date,
            slots: self.slots.clone(),
            columns: self
                .columns
                .iter()
                .filter(|c| roles.contains(&c.role))
                .cloned()
                .collect(),
        }
    }
}

/// Schedules for several days, in the order they were collected.
#[derive(Clone, Debug, Default)]
pub struct ScheduleSet {
    tables: Vec<Arc<ScheduleTable>>,
}

impl ScheduleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a day; a day already present is replaced where it stands.
    pub fn insert(&mut self, table: Arc<ScheduleTable>) {
        match self.tables.iter_mut().find(|t| t.date() == table.date()) {
            Some(slot) => *slot = table,
            None => self.tables.push(table),
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&ScheduleTable> {
        self.tables.iter().find(|t| t.date() == date).map(|t| t.as_ref())
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.tables.iter().map(|t| t.date()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduleTable> {
        self.tables.iter().map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<Arc<ScheduleTable>> for ScheduleSet {
    fn from_iter<I: IntoIterator<Item = Arc<ScheduleTable>>>(iter: I) -> Self {
        let mut set = ScheduleSet::new();
        for table in iter {
            set.insert(table);
        }
        set
    }
}

impl FromIterator<ScheduleTable> for ScheduleSet {
    fn from_iter<I: IntoIterator<Item = ScheduleTable>>(iter: I) -> Self {
        iter.into_iter().map(Arc::new).collect()
    }
}
