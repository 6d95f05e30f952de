//! # Page specs
//!
//! One module per remote page. Each spec knows *where the data lives in the
//! HTML* of its page and turns a fetched document into a typed value.
//!
//! - `schedule` – the daily schedule grid → [`ScheduleTable`](crate::schedule::ScheduleTable).
//! - `staff` – the staff-utility search result → [`AgentJob`](staff::AgentJob).
//!
//! Specs do no fetching and no caching; `cache::ScheduleCache` decides when a
//! page is requested and keeps the results. Everything here is testable
//! offline against saved pages (see `tests/fixtures/`).
//!
//! Conventions:
//! - Case-insensitive tag scanning through `core::html`; no full-document regexes.
//! - Scan locally inside the known block (`<table id=…>`, the header row, one `<tr>`).
//! - Missing structure is an error, never a silently empty result.
pub mod schedule;
pub mod staff;
