// src/core/session.rs
//! The seam between the scraper and whatever actually talks to the site.
//!
//! Everything above this trait only ever sees raw HTML strings, so the
//! transport (plain HTTP, a browser driver, canned fixtures in tests) can be
//! swapped without touching parsing, caching or aggregation.

use crate::config::SiteSettings;
use crate::error::SessionError;

/// Where the two pages of interest live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub schedule_url: String,
    pub staff_url: String,
}

impl Endpoints {
    pub fn from_settings(site: &SiteSettings) -> Self {
        Self {
            schedule_url: site.schedule_url.clone(),
            staff_url: site.staff_url.clone(),
        }
    }

    /// `…/schedule.php?date=2024-3-5`
    pub fn schedule_page(&self, date: &str) -> String {
        format!("{}?date={}", self.schedule_url, date)
    }
}

pub trait Session {
    fn endpoints(&self) -> &Endpoints;

    /// Authenticate against the site. Sessions that need no login keep the
    /// default.
    fn login(&mut self) -> Result<(), SessionError> {
        Ok(())
    }

    fn fetch_html(&mut self, url: &str) -> Result<String, SessionError>;

    fn submit_form(&mut self, url: &str, fields: &[(&str, &str)]) -> Result<String, SessionError>;

    /// Schedule page for a `Y-M-D` (unpadded) date.
    fn fetch_schedule_html(&mut self, date: &str) -> Result<String, SessionError> {
        let url = self.endpoints().schedule_page(date);
        self.fetch_html(&url)
    }

    /// Staff-utility search for one agent code, inactive staff included.
    fn fetch_agent_lookup_html(&mut self, agent_code: &str) -> Result<String, SessionError> {
        let url = self.endpoints().staff_url.clone();
        self.submit_form(&url, &[("login", agent_code), ("inactive", "on"), ("search", "Search")])
    }

    fn close(&mut self) -> Result<(), SessionError> {
        Ok(())
    }
}
