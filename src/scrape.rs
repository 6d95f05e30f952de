// src/scrape.rs
//! Batch collection of schedules: a day, a month, a span, or the last N days.
//!
//! Dates are fetched one after another through the cache, so anything already
//! collected is not requested again. The first failing date aborts the batch.

use chrono::NaiveDate;
use log::info;

use crate::{
    cache::ScheduleCache,
    config::consts::RECENT_DAYS,
    core::Session,
    dates::{self, format_date, parse_date},
    error::ScrapeResult,
    progress::Progress,
    schedule::ScheduleSet,
};

/// One date, as a single-entry set.
pub fn collect_day<S: Session>(
    cache: &mut ScheduleCache<S>,
    date: NaiveDate,
    progress: Option<&mut dyn Progress>,
) -> ScrapeResult<ScheduleSet> {
    collect_dates(cache, &[date], progress)
}

/// Every day of `month`/`year`.
pub fn collect_month<S: Session>(
    cache: &mut ScheduleCache<S>,
    month: u32,
    year: i32,
    progress: Option<&mut dyn Progress>,
) -> ScrapeResult<ScheduleSet> {
    let days = dates::month_days(month, year)?;
    collect_dates(cache, &days, progress)
}

/// `start..=end`; empty when `end` precedes `start`.
pub fn collect_range<S: Session>(
    cache: &mut ScheduleCache<S>,
    start: NaiveDate,
    end: NaiveDate,
    progress: Option<&mut dyn Progress>,
) -> ScrapeResult<ScheduleSet> {
    collect_dates(cache, &dates::days_between(start, end), progress)
}

/// `collect_range` from `Y-M-D` strings; a missing end means today.
pub fn collect_range_str<S: Session>(
    cache: &mut ScheduleCache<S>,
    start: &str,
    end: Option<&str>,
    progress: Option<&mut dyn Progress>,
) -> ScrapeResult<ScheduleSet> {
    let start = parse_date(start)?;
    let end = match end {
        Some(end) => parse_date(end)?,
        None => dates::today(),
    };
    collect_range(cache, start, end, progress)
}

/// `num_days` days ending at `today`, newest first (default 7).
pub fn collect_recent<S: Session>(
    cache: &mut ScheduleCache<S>,
    today: NaiveDate,
    num_days: Option<usize>,
    progress: Option<&mut dyn Progress>,
) -> ScrapeResult<ScheduleSet> {
    let days = dates::recent_days(today, num_days.unwrap_or(RECENT_DAYS));
    collect_dates(cache, &days, progress)
}

fn collect_dates<S: Session>(
    cache: &mut ScheduleCache<S>,
    days: &[NaiveDate],
    mut progress: Option<&mut dyn Progress>,
) -> ScrapeResult<ScheduleSet> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(days.len());
        p.log("Fetching schedules…");
    }
    if let (Some(first), Some(last)) = (days.first(), days.last()) {
        info!("Collecting {} schedule(s): {} .. {}", days.len(), format_date(*first), format_date(*last));
    }

    let mut set = ScheduleSet::new();
    for &day in days {
        let key = format_date(day);
        match cache.get_or_fetch(day) {
            Ok(table) => {
                set.insert(table);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&key);
                }
            }
            Err(e) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&key, &e.to_string());
                    p.finish();
                }
                return Err(e);
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(set)
}
