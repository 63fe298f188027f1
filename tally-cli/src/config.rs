use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tally_calendar::DEFAULT_PRODID;
use tally_ingest::DateStyle;

/// Optional `tally.toml`. Every key has a default, so an empty file is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub statement: StatementSection,
    pub calendar: CalendarSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementSection {
    /// Rewrite MM/DD/YYYY to YYYY-MM-DD (default: true)
    pub normalize_dates: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSection {
    pub prodid: String,
    /// IANA zone name, e.g. "America/New_York". Unset means floating times.
    pub timezone: Option<String>,
}

impl Default for StatementSection {
    fn default() -> Self {
        Self {
            normalize_dates: true,
        }
    }
}

impl Default for CalendarSection {
    fn default() -> Self {
        Self {
            prodid: DEFAULT_PRODID.to_string(),
            timezone: None,
        }
    }
}

impl StatementSection {
    pub fn date_style(&self) -> DateStyle {
        if self.normalize_dates {
            DateStyle::Iso
        } else {
            DateStyle::AsWritten
        }
    }
}

/// Load config from `path`, or defaults when no path was given.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(p) = path else {
        return Ok(Config::default());
    };
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| anyhow!("invalid timezone: {name}"))
}
