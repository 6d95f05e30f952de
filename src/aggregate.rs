// src/aggregate.rs
//! Hours, cost and training summaries over a set of schedules.

use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use chrono::NaiveDate;
use log::info;

use crate::{
    cache::ScheduleCache,
    config::Settings,
    core::Session,
    error::ScrapeResult,
    progress::Progress,
    roles::RoleCatalog,
    schedule::{AgentCode, ScheduleSet, ScheduleTable},
    scrape,
    specs::staff::AgentJob,
};

/// Per-agent amounts in a fixed order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentTotals(Vec<(AgentCode, f64)>);

/// Hours per agent.
pub type AgentHours = AgentTotals;
/// Pay per agent.
pub type AgentCosts = AgentTotals;

impl AgentTotals {
    pub fn get(&self, code: &str) -> Option<f64> {
        self.0.iter().find(|(c, _)| c.as_str() == code).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AgentCode, f64)> {
        self.0.iter().map(|(c, v)| (c, *v))
    }

    pub fn codes(&self) -> impl Iterator<Item = &AgentCode> {
        self.0.iter().map(|(c, _)| c)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|(_, v)| v).sum()
    }

    pub fn into_vec(self) -> Vec<(AgentCode, f64)> {
        self.0
    }
}

/// One block per agent code per present cell, summed over every table.
///
/// Cells are visited column by column, top to bottom, tables in set order;
/// agents with equal hours keep that first-seen order.
pub fn total_hours<'a, I>(tables: I, block_hours: f64, most_first: bool) -> AgentHours
where
    I: IntoIterator<Item = &'a ScheduleTable>,
{
    let mut index: HashMap<AgentCode, usize> = HashMap::new();
    let mut totals: Vec<(AgentCode, f64)> = Vec::new();

    for table in tables {
        for (_, _, agents) in table.assignments() {
            for code in agents {
                let i = *index.entry(code.clone()).or_insert_with(|| {
                    totals.push((code.clone(), 0.0));
                    totals.len() - 1
                });
                totals[i].1 += block_hours;
            }
        }
    }

    let order = |a: &(AgentCode, f64), b: &(AgentCode, f64)| -> Ordering {
        if most_first { b.1.total_cmp(&a.1) } else { a.1.total_cmp(&b.1) }
    };
    totals.sort_by(order);
    AgentTotals(totals)
}

pub struct AggregationEngine<S: Session> {
    cache: ScheduleCache<S>,
    catalog: RoleCatalog,
    block_hours: f64,
}

impl<S: Session> AggregationEngine<S> {
    pub fn new(session: S, settings: &Settings) -> Self {
        Self {
            cache: ScheduleCache::new(session, settings),
            catalog: RoleCatalog::from_settings(settings),
            block_hours: settings.block_length_hours,
        }
    }

    pub fn cache(&self) -> &ScheduleCache<S> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ScheduleCache<S> {
        &mut self.cache
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    pub fn block_hours(&self) -> f64 {
        self.block_hours
    }

    pub fn into_session(self) -> S {
        self.cache.into_session()
    }

    pub fn schedule_for(&mut self, date: NaiveDate) -> ScrapeResult<ScheduleSet> {
        scrape::collect_day(&mut self.cache, date, None)
    }

    pub fn schedules_by_month(
        &mut self,
        month: u32,
        year: i32,
        progress: Option<&mut dyn Progress>,
    ) -> ScrapeResult<ScheduleSet> {
        scrape::collect_month(&mut self.cache, month, year, progress)
    }

    pub fn schedules_in_range(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        progress: Option<&mut dyn Progress>,
    ) -> ScrapeResult<ScheduleSet> {
        scrape::collect_range(&mut self.cache, start, end, progress)
    }

    pub fn recent_schedules(
        &mut self,
        today: NaiveDate,
        num_days: Option<usize>,
        progress: Option<&mut dyn Progress>,
    ) -> ScrapeResult<ScheduleSet> {
        scrape::collect_recent(&mut self.cache, today, num_days, progress)
    }

    /// Same dates, only the columns of `role_or_group`.
    ///
    /// Each date is narrowed from the cached original, so filtering an
    /// already-filtered set by a different role still works. Dates with no
    /// matching column come back as tables without columns.
    pub fn filter_by_role(&mut self, tables: &ScheduleSet, role_or_group: &str) -> ScrapeResult<ScheduleSet> {
        let roles = self.catalog.resolve_role_set(role_or_group);
        let mut out = ScheduleSet::new();
        for date in tables.dates() {
            let original = self.cache.get_or_fetch(date)?;
            out.insert(Arc::new(original.retain_roles(&roles)));
        }
        Ok(out)
    }

    pub fn total_hours(&self, tables: &ScheduleSet, most_first: bool) -> AgentHours {
        total_hours(tables.iter(), self.block_hours, most_first)
    }

    /// Hours × hourly pay per agent, most hours first. With `day_avg` each
    /// cost is divided by the number of dates in `tables`.
    pub fn schedule_cost(
        &mut self,
        tables: &ScheduleSet,
        day_avg: bool,
        mut progress: Option<&mut dyn Progress>,
    ) -> AgentCosts {
        let hours = self.total_hours(tables, true);
        let days = tables.len().max(1) as f64;

        if let Some(p) = progress.as_deref_mut() {
            p.begin(hours.len());
            p.log("Looking up agent pay…");
        }
        let mut costs = Vec::with_capacity(hours.len());
        for (code, h) in hours.into_vec() {
            let mut cost = h * self.cache.get_or_fetch_agent_pay(&code);
            if day_avg {
                cost /= days;
            }
            if let Some(p) = progress.as_deref_mut() {
                p.item_done(code.as_str());
            }
            costs.push((code, cost));
        }
        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        info!("Costed {} agent(s) over {} date(s)", costs.len(), tables.len());
        AgentTotals(costs)
    }

    pub fn total_schedule_cost(
        &mut self,
        tables: &ScheduleSet,
        day_avg: bool,
        progress: Option<&mut dyn Progress>,
    ) -> f64 {
        self.schedule_cost(tables, day_avg, progress).total()
    }

    /// Job record of every scheduled agent, most hours first.
    pub fn scheduled_agent_trainings(
        &mut self,
        tables: &ScheduleSet,
        mut progress: Option<&mut dyn Progress>,
    ) -> Vec<(AgentCode, AgentJob)> {
        let hours = self.total_hours(tables, true);
        if let Some(p) = progress.as_deref_mut() {
            p.begin(hours.len());
            p.log("Looking up agent trainings…");
        }
        let out = hours
            .into_vec()
            .into_iter()
            .map(|(code, _)| {
                let job = self.cache.get_or_fetch_agent_trainings(&code);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(code.as_str());
                }
                (code, job)
            })
            .collect();
        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        out
    }
}
