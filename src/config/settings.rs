// src/config/settings.rs
//! Runtime settings, loadable from TOML.
//!
//! Every field has a default matching the live deployment, and the file only
//! needs to name what it overrides:
//!
//! ```toml
//! block_length_hours = 0.5
//!
//! [pay]
//! default_rate = 10.50
//!
//! [pay.raises]
//! "Chat/Email" = 0.60
//!
//! [agents]
//! fte = ["YANG", "MIMO"]
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
};

use serde::Deserialize;

use super::consts::*;
use crate::error::ConfigError;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Length of one schedule block, in hours.
    pub block_length_hours: f64,
    pub site: SiteSettings,
    pub pay: PaySettings,
    pub agents: AgentSettings,
    /// Role group name → raw role labels (normalized at lookup time).
    pub role_groups: BTreeMap<String, Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            block_length_hours: SCHEDULE_BLOCK_HOURS,
            site: SiteSettings::default(),
            pay: PaySettings::default(),
            agents: AgentSettings::default(),
            role_groups: default_role_groups(),
        }
    }
}

impl Settings {
    /// Read settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.block_length_hours > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "block_length_hours must be positive, got {}",
                self.block_length_hours
            )));
        }
        if self.pay.default_rate < 0.0 {
            return Err(ConfigError::Invalid(s!("pay.default_rate must not be negative")));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteSettings {
    pub schedule_url: String,
    pub staff_url: String,
    pub schedule_table_id: String,
    /// Summary rows at the bottom of the schedule table.
    pub footer_rows: usize,
    pub timeout_secs: u64,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            schedule_url: s!(SCHEDULE_URL),
            staff_url: s!(STAFF_URL),
            schedule_table_id: s!(SCHEDULE_TABLE_ID),
            footer_rows: FOOTER_ROWS,
            timeout_secs: HTTP_TIMEOUT_SECS,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaySettings {
    pub default_rate: f64,
    /// Exact job title → base hourly rate.
    pub rates: HashMap<String, f64>,
    /// Training name → hourly raise.
    pub raises: BTreeMap<String, f64>,
}

impl Default for PaySettings {
    fn default() -> Self {
        let rates = [
            ("Support Specialist", 10.25),    // Pick 1
            ("SLP Web Writer", 12.75),        // Student Technical Writer
            ("SLP Developer", 12.75),         // Student Developer
            ("SLP WiscIT Lead", 13.75),       // Student WiscIT Lead
            ("SLP Data Metrics Lead", 12.75), // Student Data & Metrics Lead
            ("SLP Team Lead", 13.75),         // Student Team Lead
        ];
        let raises = [
            ("Pick 3", 0.50), // Advanced Phone Agent
            ("Chat/Email", 0.50),
            ("HDQA", 0.75),
        ];
        Self {
            default_rate: DEFAULT_PAY,
            rates: rates.into_iter().map(|(k, v)| (s!(k), v)).collect(),
            raises: raises.into_iter().map(|(k, v)| (s!(k), v)).collect(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AgentSettings {
    /// Codes that mark posted/unfilled shifts rather than people.
    pub non_agents: Vec<String>,
    /// Full-time staff; never paid from the hourly model.
    pub fte: Vec<String>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            non_agents: strings!["", "PETE", "HDP1", "HDP2", "HDP3", "HDP4"],
            fte: strings!["YANG", "MIMO", "HPRI", "SSCH"],
        }
    }
}

fn default_role_groups() -> BTreeMap<String, Vec<String>> {
    let mut groups = BTreeMap::new();
    groups.insert(s!("ALL"), strings![
        "HDQA", "Floor Supervisor", "Tech Store", "Phones", "Chat/Email", "Email", "HDQA (Remote)",
        "Supervisor (Remote)", "Phones (FTE)", "Phones (Remote)", "Trainer/Phones", "Chat/Email (Remote)",
        "Chat (Remote)", "Email (Remote)", "HDL1 Project", "Walk-in [Lead]", "Walk-in Counter", "Walk-in SD",
        "Repair", "WiHD onsite FTE", "WiHD Appt", "STL Outreach", "Training", "Event", "Meeting",
    ]);
    groups.insert(s!("ALL_STUDENTS"), strings![
        "HDQA", "Tech Store", "Phones", "Chat/Email", "Email", "HDQA (Remote)", "Phones (Remote)",
        "Trainer/Phones", "Chat/Email (Remote)", "Chat (Remote)", "Email (Remote)", "HDL1 Project",
        "Walk-in [Lead]", "Walk-in Counter", "Walk-in SD", "Repair", "WiHD Appt", "STL Outreach", "Training",
    ]);
    groups.insert(s!("ALL_HDQA"), strings!["HDQA", "HDQA (Remote)"]);
    groups.insert(s!("STL"), strings!["HDL1 Project", "STL Outreach"]);
    groups.insert(s!("WALK_IN"), strings![
        "Tech Store", "Walk-in [Lead]", "Walk-in Counter", "Walk-in SD", "Repair", "WiHD onsite FTE", "WiHD Appt",
    ]);
    groups.insert(s!("ALL_PHONES"), strings!["Phones", "Phones (FTE)", "Phones (Remote)", "Trainer/Phones"]);
    groups.insert(s!("ALL_CHAT_EMAIL"), strings![
        "Chat/Email", "Email", "Chat/Email (Remote)", "Chat (Remote)", "Email (Remote)",
    ]);
    groups.insert(s!("ALL_TRAINING"), strings!["Trainer/Phones", "Chat/Email (Remote)", "Training"]);
    groups.insert(s!("MEETING_AND_EVENT"), strings!["Event", "Meeting"]);
    groups
}
