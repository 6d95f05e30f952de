// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use acme_scrape::config::SiteSettings;
use acme_scrape::core::{Endpoints, Session};
use acme_scrape::error::SessionError;

pub const SCHEDULE_FIXTURE: &str = include_str!("../fixtures/schedule_day.html");
pub const STAFF_FIXTURE: &str = include_str!("../fixtures/staff_lookup.html");

/// Scripted site: canned schedule pages by date and staff pages by code.
/// Records every request so tests can count round trips.
pub struct FakeSession {
    endpoints: Endpoints,
    schedules: HashMap<String, String>,
    staff: HashMap<String, String>,
    broken: HashSet<String>,
    pub fetched: Vec<String>,
    pub lookups: Vec<String>,
    pub closed: bool,
}

impl FakeSession {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            endpoints: Endpoints::from_settings(&SiteSettings::default()),
            schedules: HashMap::new(),
            staff: HashMap::new(),
            broken: HashSet::new(),
            fetched: Vec::new(),
            lookups: Vec::new(),
            closed: false,
        }
    }

    pub fn with_schedule(mut self, date: &str, html: impl Into<String>) -> Self {
        self.schedules.insert(date.to_string(), html.into());
        self
    }

    pub fn with_staff(mut self, code: &str, html: impl Into<String>) -> Self {
        self.staff.insert(code.to_string(), html.into());
        self
    }

    /// Lookups for `code` fail at the transport level.
    pub fn with_broken_lookup(mut self, code: &str) -> Self {
        self.broken.insert(code.to_string());
        self
    }

    pub fn fetch_count(&self, date: &str) -> usize {
        let url = self.endpoints.schedule_page(date);
        self.fetched.iter().filter(|u| **u == url).count()
    }

    pub fn lookup_count(&self, code: &str) -> usize {
        self.lookups.iter().filter(|c| *c == code).count()
    }
}

impl Session for FakeSession {
    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn fetch_html(&mut self, url: &str) -> Result<String, SessionError> {
        self.fetched.push(url.to_string());
        let date = url.rsplit("date=").next().unwrap_or_default();
        self.schedules
            .get(date)
            .cloned()
            .ok_or_else(|| SessionError::Status { status: 404, url: url.to_string() })
    }

    fn submit_form(&mut self, url: &str, fields: &[(&str, &str)]) -> Result<String, SessionError> {
        assert_eq!(url, self.endpoints.staff_url);
        assert!(fields.contains(&("inactive", "on")));
        let code = fields
            .iter()
            .find(|(k, _)| *k == "login")
            .map(|(_, v)| v.to_string())
            .unwrap_or_default();
        self.lookups.push(code.clone());
        if self.broken.contains(&code) {
            return Err(SessionError::Transport(format!("connection reset ({code})")));
        }
        Ok(self
            .staff
            .get(&code)
            .cloned()
            .unwrap_or_else(|| s("<html><body><p>No staff found.</p></body></html>")))
    }

    fn close(&mut self) -> Result<(), SessionError> {
        self.closed = true;
        Ok(())
    }
}

fn s(text: &str) -> String {
    text.to_string()
}

/// Schedule page with `sch_<role>` header ids, a trailing Total column and
/// two footer rows. Each row is `(time, cells)` with one cell per role.
pub fn schedule_html(roles: &[&str], rows: &[(&str, &[&str])]) -> String {
    let mut out = s("<html><body><table id=\"sch_table_verticle\">\n<thead><tr><th id=\"sch_time\">Time</th>");
    for role in roles {
        out.push_str(&format!("<th id=\"sch_{role}\">{role}</th>"));
    }
    out.push_str("<th>Total</th></tr></thead>\n");

    for (time, cells) in rows {
        out.push_str(&format!("<tr><td>{time}</td>"));
        for cell in *cells {
            out.push_str(&format!("<td>{cell}</td>"));
        }
        out.push_str(&format!("<td>{}</td></tr>\n", cells.len()));
    }

    out.push_str("<tr><td>Total</td></tr>\n<tr><td>Time</td></tr>\n</table></body></html>");
    out
}

/// Staff-utility result with a Position row and a Trainings list.
pub fn staff_html(position: &str, trainings: &[&str]) -> String {
    let items: String = trainings.iter().map(|t| format!("<li>{t}</li>")).collect();
    format!(
        "<table><tr><td>Position</td><td>{position}</td></tr>\
         <tr><td>Trainings</td><td><ul>{items}</ul></td></tr></table>"
    )
}
