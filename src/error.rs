// src/error.rs
//! Error types for every layer of the scraper.
//!
//! Only `LookupFailure` is routinely recovered from (the cache substitutes the
//! configured default); everything else propagates to the caller.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid date '{0}': expected Y-M-D")]
    Format(String),

    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("HTTP error: {status} {url}")]
    Status { status: u16, url: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Login failed: {0}")]
    Login(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("schedule table '{0}' not found")]
    TableMissing(String),

    #[error("header row not found")]
    HeaderRowMissing,

    #[error("'{0}' column not found in header")]
    ColumnMissing(&'static str),
}

/// Why an agent-detail lookup could not produce a job title + trainings.
#[derive(Error, Debug)]
pub enum LookupFailure {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("element not found: {0}")]
    ElementMissing(&'static str),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl LookupFailure {
    /// Short stable tag for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupFailure::Session(_) => "session",
            LookupFailure::ElementMissing(_) => "element_missing",
            LookupFailure::Malformed(_) => "malformed",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Failure of a schedule fetch or batch collection.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error(transparent)]
    Date(#[from] DateError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;
