//! Read calendar events from a spreadsheet CSV export.
//!
//! Expected header row (column order does not matter):
//! Subject,Start Date,Start Time,End Date,End Time,Description,Location
//!
//! Dates are `YYYY-MM-DD` and times `HH:MM:SS`; they are kept as text here and
//! parsed when the calendar is built so one bad row does not sink the file.

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// One CSV row, before date/time parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CsvEvent {
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Start Date")]
    pub start_date: String,
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Date")]
    pub end_date: String,
    #[serde(rename = "End Time")]
    pub end_time: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Location", default)]
    pub location: String,
}

/// Read every event row from the CSV at `path`.
pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<CsvEvent>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => anyhow!("The file '{}' does not exist.", path.display()),
        _ => anyhow!(e).context(format!("Error reading '{}'", path.display())),
    })?;

    read_events_from_reader(file).with_context(|| format!("Error reading '{}'", path.display()))
}

/// Read event rows from any CSV source (headers required).
pub fn read_events_from_reader<R: Read>(reader: R) -> Result<Vec<CsvEvent>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .quote(b'"')
        .escape(Some(b'\\'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut events = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        // +2: header is line 1
        let event: CsvEvent = result.with_context(|| format!("row {}", i + 2))?;
        events.push(event);
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_rows_in_order() {
        let csv = "\
Subject,Start Date,Start Time,End Date,End Time,Description,Location
Spring Concert,2024-04-12,19:30:00,2024-04-12,21:00:00,Brahms and Dvorak,Main Hall
Masterclass,2024-04-13,10:00:00,2024-04-13,12:00:00,,Studio B
";
        let events = read_events_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].subject, "Spring Concert");
        assert_eq!(events[0].start_time, "19:30:00");
        assert_eq!(events[0].location, "Main Hall");
        assert_eq!(events[1].subject, "Masterclass");
        assert_eq!(events[1].description, "");
    }

    #[test]
    fn test_quoted_fields_and_escapes() {
        let csv = r#"Subject,Start Date,Start Time,End Date,End Time,Description,Location
"Quartet, live",2024-05-01,18:00:00,2024-05-01,19:00:00,"Program: \"Death and the Maiden\"","Hall A, Level 2"
"#;
        let events = read_events_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(events[0].subject, "Quartet, live");
        assert_eq!(events[0].description, r#"Program: "Death and the Maiden""#);
        assert_eq!(events[0].location, "Hall A, Level 2");
    }

    #[test]
    fn test_optional_columns_default_to_empty() {
        let csv = "Subject,Start Date,Start Time,End Date,End Time\nRehearsal,2024-05-02,09:00:00,2024-05-02,11:00:00\n";
        let events = read_events_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(events[0].description, "");
        assert_eq!(events[0].location, "");
    }

    #[test]
    fn test_missing_required_column_is_error() {
        let csv = "Subject,Start Date,End Date,End Time\nRehearsal,2024-05-02,2024-05-02,11:00:00\n";
        assert!(read_events_from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_header_only_is_empty() {
        let csv = "Subject,Start Date,Start Time,End Date,End Time,Description,Location\n";
        assert!(read_events_from_reader(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_message() {
        let err = read_events("/definitely/not/here.csv").unwrap_err();
        assert_eq!(
            err.to_string(),
            "The file '/definitely/not/here.csv' does not exist."
        );
    }
}
