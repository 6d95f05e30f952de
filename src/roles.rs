// src/roles.rs
//! Role columns and role groups.
//!
//! Schedule headers and the configured group lists spell roles differently
//! (`"Chat/Email (Remote)"` vs `chatemailremote`), so both sides go through
//! [`normalize`] before they are compared.

use std::{
    borrow::Borrow,
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use crate::config::Settings;

const STRIPPED: [char; 8] = [' ', '-', '/', '\\', '[', ']', '(', ')'];

/// Lowercase and drop spaces, `-`, `/`, `\` and brackets.
pub fn normalize(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED.contains(c))
        .collect()
}

/// A normalized role name; the column key of a schedule table.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoleColumn(String);

impl RoleColumn {
    pub fn new(label: &str) -> Self {
        Self(normalize(label))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RoleColumn {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleCatalog {
    groups: BTreeMap<String, Vec<String>>,
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl RoleCatalog {
    pub fn new(groups: BTreeMap<String, Vec<String>>) -> Self {
        Self { groups }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.role_groups.clone())
    }

    pub fn is_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Group name → every member role; anything else → itself.
    ///
    /// Single roles are not checked against any master list: an unknown
    /// role simply matches no column.
    pub fn resolve_role_set(&self, role_or_group: &str) -> BTreeSet<RoleColumn> {
        match self.groups.get(role_or_group) {
            Some(members) => members.iter().map(|m| RoleColumn::new(m)).collect(),
            None => BTreeSet::from([RoleColumn::new(role_or_group)]),
        }
    }
}
