// src/dates.rs
//! Date helpers for the schedule site's `date=Y-M-D` query parameter.
//!
//! The site never zero-pads (`2024-3-5`), so parsing and formatting are done
//! by hand instead of through `%Y-%m-%d`.

use chrono::{Datelike, Days, Local, NaiveDate};

use crate::error::DateError;

const DAYS_IN_MONTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Parse `Y-M-D` (zero padding optional).
pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
    let bad = || DateError::Format(s!(s));

    let parts: Vec<&str> = s.trim().split('-').collect();
    if parts.len() != 3 {
        return Err(bad());
    }
    let year: i32 = parts[0].parse().map_err(|_| bad())?;
    let month: u32 = parts[1].parse().map_err(|_| bad())?;
    let day: u32 = parts[2].parse().map_err(|_| bad())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(bad)
}

/// `2024-03-05` → `"2024-3-5"`.
pub fn format_date(d: NaiveDate) -> String {
    format!("{}-{}-{}", d.year(), d.month(), d.day())
}

/// Month length with February at 29 whenever `year % 4 == 0`.
///
/// Century years are not special-cased (`days_in_month(2, 1900) == 29`);
/// month collection relies on this exact rule.
pub fn days_in_month(month: u32, year: i32) -> Result<u32, DateError> {
    if !(1..=12).contains(&month) {
        return Err(DateError::InvalidMonth(month));
    }
    let days = DAYS_IN_MONTHS[(month - 1) as usize];
    if month == 2 && year % 4 == 0 {
        Ok(days + 1)
    } else {
        Ok(days)
    }
}

/// `count` consecutive calendar days starting at `start`.
pub fn enumerate_days(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    (0..count as u64)
        .map_while(|i| start.checked_add_days(Days::new(i)))
        .collect()
}

/// Inclusive span; empty when `end` precedes `start`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if end < start {
        return Vec::new();
    }
    let count = (end - start).num_days() + 1;
    enumerate_days(start, count as usize)
}

/// Every day of a month, counted from the 1st with `days_in_month`.
pub fn month_days(month: u32, year: i32) -> Result<Vec<NaiveDate>, DateError> {
    let count = days_in_month(month, year)?;
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or(DateError::InvalidMonth(month))?;
    Ok(enumerate_days(start, count as usize))
}

/// `today`, yesterday, … (`num_days` dates, newest first).
pub fn recent_days(today: NaiveDate, num_days: usize) -> Vec<NaiveDate> {
    (0..num_days as u64)
        .map_while(|i| today.checked_sub_days(Days::new(i)))
        .collect()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
