// src/specs/staff.rs
//! Scraping *spec* for the staff-utility search result.
//!
//! The result is a two-column detail table:
//! ```html
//! <tr><td>Position</td><td>Support Specialist</td></tr>
//! <tr><td>Trainings</td><td><ul><li>Chat/Email</li><li>HDQA</li></ul></td></tr>
//! ```
//! The job title sits in the cell after the one labelled "Position"; the
//! trainings are the list items in the second cell of the following row.

use crate::core::html;
use crate::error::LookupFailure;

const POSITION_LABEL: &str = "Position";

/// Job title and trainings of one agent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AgentJob {
    pub base_job: Option<String>,
    pub trainings: Vec<String>,
}

pub fn parse(doc: &str) -> Result<AgentJob, LookupFailure> {
    let rows = html::rows(doc);

    let (idx, job) = rows
        .iter()
        .enumerate()
        .find_map(|(i, tr)| {
            let cells = html::row_cells(tr);
            let label = cells.iter().position(|c| c.contains(POSITION_LABEL))?;
            Some((i, cells.get(label + 1).cloned()))
        })
        .ok_or(LookupFailure::ElementMissing("position label"))?;

    let job = job.ok_or(LookupFailure::ElementMissing("position value"))?;

    let next = rows
        .get(idx + 1)
        .ok_or(LookupFailure::ElementMissing("trainings row"))?;
    let cells = html::row_cell_blocks(next);
    let training_cell = cells
        .get(1)
        .ok_or(LookupFailure::ElementMissing("trainings cell"))?;

    let trainings = html::list_items(training_cell)
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect();

    Ok(AgentJob { base_job: Some(job), trainings })
}
