// src/pay.rs
//! Hourly pay estimate from a job title and a training list.

use std::collections::{BTreeMap, HashMap};

use crate::config::{PaySettings, consts::SLP_MARKER};

#[derive(Clone, Debug, PartialEq)]
pub struct PayModel {
    default_rate: f64,
    rates: HashMap<String, f64>,
    raises: BTreeMap<String, f64>,
}

impl Default for PayModel {
    fn default() -> Self {
        Self::from_settings(&PaySettings::default())
    }
}

impl PayModel {
    pub fn from_settings(pay: &PaySettings) -> Self {
        Self {
            default_rate: pay.default_rate,
            rates: pay.rates.clone(),
            raises: pay.raises.clone(),
        }
    }

    pub fn default_rate(&self) -> f64 {
        self.default_rate
    }

    /// Rate for an exact title match, else the default rate.
    pub fn base_pay(&self, job_title: &str) -> f64 {
        self.rates.get(job_title).copied().unwrap_or(self.default_rate)
    }

    /// Base pay plus every raise the agent is trained for.
    /// Student-lead ("SLP") titles are flat: no raises apply.
    pub fn effective_pay<T: AsRef<str>>(&self, job_title: &str, trainings: &[T]) -> f64 {
        let mut pay = self.base_pay(job_title);
        if job_title.contains(SLP_MARKER) {
            return pay;
        }
        for (training, raise) in &self.raises {
            if trainings.iter().any(|t| t.as_ref() == training.as_str()) {
                pay += raise;
            }
        }
        pay
    }
}
