// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod aggregate;
pub mod cache;
pub mod dates;
pub mod pay;
pub mod progress;
pub mod roles;
pub mod schedule;
pub mod scrape;

#[cfg(feature = "cli")]
pub mod cli;

pub use aggregate::{AgentCosts, AgentHours, AggregationEngine};
pub use cache::ScheduleCache;
pub use config::Settings;
pub use crate::core::{Credentials, HttpSession, Session};
pub use schedule::{AgentCode, ScheduleSet, ScheduleTable};
