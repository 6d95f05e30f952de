// tests/schedule_parse.rs
//
// Schedule page → ScheduleTable, against the saved page and small built pages.
//
mod common;

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime};
use acme_scrape::error::ParseError;
use acme_scrape::roles::RoleColumn;
use acme_scrape::schedule::{split_agent_codes, AgentCode, ScheduleSet, ScheduleTable};
use acme_scrape::specs::schedule::{parse, ScheduleLayout};
use acme_scrape::specs::staff;

use common::*;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

fn codes(list: &[&str]) -> Vec<AgentCode> {
    list.iter().map(|c| AgentCode::from(*c)).collect()
}

fn fixture() -> ScheduleTable {
    parse(SCHEDULE_FIXTURE, day(), &ScheduleLayout::default()).unwrap()
}

#[test]
fn fixture_columns_and_slots() {
    let t = fixture();
    let roles: Vec<&str> = t.roles().map(|r| r.as_str()).collect();
    assert_eq!(roles, vec!["phones", "chatemail", "hdqa", "phonesremote"]);

    let slots: Vec<&str> = t.slots().iter().map(|s| s.as_str()).collect();
    assert_eq!(slots, vec!["7:00am", "7:30am", "8:00am"]);
    assert_eq!(t.key(), "2024-3-5");
}

#[test]
fn fixture_cells() {
    let t = fixture();
    assert_eq!(t.cell("7:00am", "phones"), Some(codes(&["ABCD", "EFGH"]).as_slice()));
    assert_eq!(t.cell("8:00am", "phones"), Some(codes(&["EFGH", "YANG"]).as_slice()));
    assert_eq!(t.cell("7:00am", "phonesremote"), Some(codes(&["PETE"]).as_slice()));
    // Empty and &nbsp;-only cells are absent.
    assert_eq!(t.cell("7:00am", "hdqa"), None);
    assert_eq!(t.cell("7:30am", "phonesremote"), None);
    // Unknown slot/role.
    assert_eq!(t.cell("9:00am", "phones"), None);
    assert_eq!(t.cell("7:00am", "total"), None);
}

#[test]
fn footer_rows_and_total_column_are_dropped() {
    let t = fixture();
    assert!(t.column("total").is_none());
    assert!(t.slots().iter().all(|s| s.as_str() != "Total" && s.as_str() != "Time"));
}

#[test]
fn assignments_walk_columns_then_slots() {
    let t = fixture();
    let order: Vec<(&str, &str)> = t
        .assignments()
        .map(|(role, slot, _)| (role.as_str(), slot.as_str()))
        .collect();
    assert_eq!(order[..4], [
        ("phones", "7:00am"),
        ("phones", "7:30am"),
        ("phones", "8:00am"),
        ("chatemail", "7:00am"),
    ]);
    assert_eq!(order.len(), 9);
}

#[test]
fn time_slots_parse_to_clock_times() {
    let t = fixture();
    assert_eq!(t.slots()[1].to_time(), NaiveTime::from_hms_opt(7, 30, 0));
}

#[test]
fn packed_codes_split_in_fours() {
    assert_eq!(split_agent_codes("ABCDEFGH", 4), codes(&["ABCD", "EFGH"]));
    assert_eq!(split_agent_codes("ABCDABCD", 4), codes(&["ABCD", "ABCD"]));
    assert_eq!(split_agent_codes("ABCDEF", 4), codes(&["ABCD", "EF"]));
    assert!(split_agent_codes("", 4).is_empty());
}

#[test]
fn numeric_cells_are_absent() {
    let html = schedule_html(&["phones", "hdqa"], &[("7:00am", &["12", "WXYZ"])]);
    let t = parse(&html, day(), &ScheduleLayout::default()).unwrap();
    assert_eq!(t.cell("7:00am", "phones"), None);
    assert_eq!(t.cell("7:00am", "hdqa"), Some(codes(&["WXYZ"]).as_slice()));
}

#[test]
fn short_rows_are_padded() {
    let html = schedule_html(&["phones", "hdqa", "repair"], &[("7:00am", &["ABCD"])]);
    let t = parse(&html, day(), &ScheduleLayout::default()).unwrap();
    assert_eq!(t.columns().len(), 3);
    assert_eq!(t.cell("7:00am", "phones"), Some(codes(&["ABCD"]).as_slice()));
    assert_eq!(t.column("repair").unwrap().cells, vec![None]);
}

#[test]
fn missing_structure_is_an_error() {
    let no_table = "<html><thead><tr><th id=\"sch_time\">Time</th></tr></thead></html>";
    assert_eq!(
        parse(no_table, day(), &ScheduleLayout::default()),
        Err(ParseError::TableMissing("sch_table_verticle".into()))
    );

    assert_eq!(
        parse("<html><body>Please log in</body></html>", day(), &ScheduleLayout::default()),
        Err(ParseError::HeaderRowMissing)
    );

    let no_time = "<table id=\"sch_table_verticle\"><thead><tr><th id=\"sch_phones\">P</th></tr></thead></table>";
    assert_eq!(
        parse(no_time, day(), &ScheduleLayout::default()),
        Err(ParseError::ColumnMissing("time"))
    );
}

#[test]
fn footer_count_is_configurable() {
    let html = schedule_html(&["phones"], &[("7:00am", &["ABCD"]), ("7:30am", &["EFGH"])]);
    let layout = ScheduleLayout { footer_rows: 0, ..ScheduleLayout::default() };
    let t = parse(&html, day(), &layout).unwrap();
    assert_eq!(t.slots().len(), 4);
}

#[test]
fn retain_roles_builds_a_narrower_copy() {
    let t = fixture();
    let keep: BTreeSet<RoleColumn> = [RoleColumn::new("HDQA"), RoleColumn::new("Repair")].into();
    let narrow = t.retain_roles(&keep);
    assert_eq!(narrow.roles().map(|r| r.as_str()).collect::<Vec<_>>(), vec!["hdqa"]);
    assert_eq!(narrow.slots(), t.slots());
    assert_eq!(t.columns().len(), 4);

    let none = t.retain_roles(&BTreeSet::new());
    assert!(none.is_empty());
    assert_eq!(none.date(), t.date());
}

#[test]
fn schedule_set_keeps_insertion_order_and_replaces() {
    let a = ScheduleTable::new(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(), vec![]);
    let b = ScheduleTable::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), vec![]);
    let mut set: ScheduleSet = vec![a.clone(), b.clone()].into_iter().collect();
    assert_eq!(set.dates(), vec![a.date(), b.date()]);

    set.insert(std::sync::Arc::new(fixture()));
    set.insert(std::sync::Arc::new(a.clone()));
    assert_eq!(set.len(), 3);
    assert_eq!(set.dates()[0], a.date());
}

#[test]
fn staff_fixture_yields_job_and_trainings() {
    let job = staff::parse(STAFF_FIXTURE).unwrap();
    assert_eq!(job.base_job.as_deref(), Some("Support Specialist"));
    assert_eq!(job.trainings, vec!["Chat/Email", "HDQA", "Walk-in"]);
}

#[test]
fn staff_page_without_position_is_element_missing() {
    let err = staff::parse("<html><body><p>No staff found.</p></body></html>").unwrap_err();
    assert_eq!(err.kind(), "element_missing");

    let no_trainings = "<table><tr><td>Position</td><td>Support Specialist</td></tr></table>";
    assert_eq!(staff::parse(no_trainings).unwrap_err().kind(), "element_missing");
}
