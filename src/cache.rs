// src/cache.rs
//! Memoized access to the site: one schedule table per date, one pay rate and
//! one job record per agent.
//!
//! Entries live as long as the cache. Nothing expires on its own; callers that
//! know a page changed use the `invalidate_*` methods.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use chrono::NaiveDate;
use log::{debug, warn};

use crate::config::Settings;
use crate::core::Session;
use crate::dates::format_date;
use crate::error::{LookupFailure, ScrapeResult};
use crate::pay::PayModel;
use crate::schedule::{AgentCode, ScheduleTable};
use crate::specs::{
    self,
    schedule::ScheduleLayout,
    staff::AgentJob,
};

pub struct ScheduleCache<S: Session> {
    session: S,
    layout: ScheduleLayout,
    pay_model: PayModel,
    non_agents: HashSet<String>,
    fte: HashSet<String>,
    schedules: HashMap<String, Arc<ScheduleTable>>,
    agent_pay: HashMap<AgentCode, f64>,
    agent_jobs: HashMap<AgentCode, AgentJob>,
}

impl<S: Session> ScheduleCache<S> {
    pub fn new(session: S, settings: &Settings) -> Self {
        Self {
            session,
            layout: ScheduleLayout::from_settings(&settings.site),
            pay_model: PayModel::from_settings(&settings.pay),
            non_agents: settings.agents.non_agents.iter().cloned().collect(),
            fte: settings.agents.fte.iter().cloned().collect(),
            schedules: HashMap::new(),
            agent_pay: HashMap::new(),
            agent_jobs: HashMap::new(),
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }

    pub fn pay_model(&self) -> &PayModel {
        &self.pay_model
    }

    /// Schedule for `date`, fetched and parsed on first request only.
    pub fn get_or_fetch(&mut self, date: NaiveDate) -> ScrapeResult<Arc<ScheduleTable>> {
        let key = format_date(date);
        if let Some(table) = self.schedules.get(&key) {
            debug!("Schedule cache hit: {key}");
            return Ok(Arc::clone(table));
        }

        debug!("Schedule cache miss: {key}");
        let html = self.session.fetch_schedule_html(&key)?;
        let table = Arc::new(specs::schedule::parse(&html, date, &self.layout)?);
        self.schedules.insert(key, Arc::clone(&table));
        Ok(table)
    }

    /// Placeholder or full-time code (compared trimmed): never looked up.
    pub fn is_excluded(&self, code: &AgentCode) -> bool {
        let code = code.as_str().trim();
        self.non_agents.contains(code) || self.fte.contains(code)
    }

    /// Hourly rate for `code`. Excluded codes cost 0. A failed lookup is
    /// logged and the default rate is stored in its place.
    pub fn get_or_fetch_agent_pay(&mut self, code: &AgentCode) -> f64 {
        if self.is_excluded(code) {
            return 0.0;
        }
        if let Some(&pay) = self.agent_pay.get(code) {
            return pay;
        }

        let pay = match self.lookup_agent(code) {
            Ok(job) => self.pay_model.effective_pay(job.base_job.as_deref().unwrap_or(""), &job.trainings),
            Err(err) => {
                warn!("Agent {code}: lookup failed ({}): {err}; using default pay", err.kind());
                self.pay_model.default_rate()
            }
        };
        self.agent_pay.insert(code.clone(), pay);
        pay
    }

    /// Job title and trainings for `code`, memoized apart from pay. Excluded
    /// codes and failed lookups give an empty record; failures are not
    /// remembered.
    pub fn get_or_fetch_agent_trainings(&mut self, code: &AgentCode) -> AgentJob {
        if self.is_excluded(code) {
            return AgentJob::default();
        }
        if let Some(job) = self.agent_jobs.get(code) {
            return job.clone();
        }

        match self.lookup_agent(code) {
            Ok(job) => {
                self.agent_jobs.insert(code.clone(), job.clone());
                job
            }
            Err(err) => {
                warn!("Agent {code}: lookup failed ({}): {err}", err.kind());
                AgentJob::default()
            }
        }
    }

    fn lookup_agent(&mut self, code: &AgentCode) -> Result<AgentJob, LookupFailure> {
        debug!("Looking up agent {code}");
        let html = self.session.fetch_agent_lookup_html(code.as_str())?;
        specs::staff::parse(&html)
    }

    pub fn invalidate_schedule(&mut self, date: NaiveDate) -> bool {
        self.schedules.remove(&format_date(date)).is_some()
    }

    /// Drop both the pay rate and the job record of `code`.
    pub fn invalidate_agent(&mut self, code: &AgentCode) -> bool {
        let pay = self.agent_pay.remove(code).is_some();
        let job = self.agent_jobs.remove(code).is_some();
        pay || job
    }

    pub fn clear(&mut self) {
        self.schedules.clear();
        self.agent_pay.clear();
        self.agent_jobs.clear();
    }

    pub fn cached_schedules(&self) -> usize {
        self.schedules.len()
    }

    /// Agents with a stored pay rate.
    pub fn cached_agents(&self) -> usize {
        self.agent_pay.len()
    }
}
