//! Minimal RFC 5545 writer: one VCALENDAR holding VEVENT blocks.
//!
//! Notes:
//! - Lines end with CRLF and are folded at 75 octets.
//! - Times are floating unless the event carries a zone, in which case
//!   DTSTART/DTEND get a TZID parameter. No VTIMEZONE is emitted.
//! - DTSTAMP is always UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use std::path::{Path, PathBuf};

const MAX_LINE_OCTETS: usize = 75;

/// A local wall-clock time, optionally pinned to an IANA zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTime {
    pub local: NaiveDateTime,
    pub tz: Option<Tz>,
}

impl EventTime {
    fn property(&self, name: &str) -> String {
        let value = self.local.format("%Y%m%dT%H%M%S");
        match self.tz {
            Some(tz) => format!("{name};TZID={}:{value}", tz.name()),
            None => format!("{name}:{value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IcsEvent {
    pub uid: String,
    pub dtstamp: DateTime<Utc>,
    pub start: EventTime,
    pub end: EventTime,
    pub summary: String,
    pub description: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    pub prodid: String,
    pub events: Vec<IcsEvent>,
}

impl Calendar {
    pub fn new(prodid: impl Into<String>) -> Self {
        Self {
            prodid: prodid.into(),
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, event: IcsEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Serialize to iCalendar text.
    pub fn to_ics(&self) -> String {
        let mut s = String::new();
        push_line(&mut s, "BEGIN:VCALENDAR");
        push_line(&mut s, &format!("PRODID:{}", escape_ics(&self.prodid)));
        push_line(&mut s, "VERSION:2.0");

        for e in &self.events {
            push_line(&mut s, "BEGIN:VEVENT");
            push_line(&mut s, &format!("SUMMARY:{}", escape_ics(&e.summary)));
            push_line(&mut s, &e.start.property("DTSTART"));
            push_line(&mut s, &e.end.property("DTEND"));
            push_line(
                &mut s,
                &format!("DTSTAMP:{}", e.dtstamp.format("%Y%m%dT%H%M%SZ")),
            );
            push_line(&mut s, &format!("UID:{}", e.uid));
            push_line(&mut s, &format!("DESCRIPTION:{}", escape_ics(&e.description)));
            push_line(&mut s, &format!("LOCATION:{}", escape_ics(&e.location)));
            push_line(&mut s, "END:VEVENT");
        }

        push_line(&mut s, "END:VCALENDAR");
        s
    }
}

/// `events.csv` -> `events.ics`, next to the input.
pub fn default_output_path(input_csv: &Path) -> PathBuf {
    input_csv.with_extension("ics")
}

fn escape_ics(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}

/// Append one content line, folded so no physical line exceeds 75 octets.
fn push_line(out: &mut String, line: &str) {
    let mut limit = MAX_LINE_OCTETS;
    let mut used = 0;

    for ch in line.chars() {
        let n = ch.len_utf8();
        if used + n > limit {
            out.push_str("\r\n ");
            // continuation lines spend one octet on the leading space
            limit = MAX_LINE_OCTETS - 1;
            used = 0;
        }
        out.push(ch);
        used += n;
    }
    out.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn sample_event(tz: Option<Tz>) -> IcsEvent {
        IcsEvent {
            uid: "0b7e5c1e-8d1a-4c43-9a57-3c1c2f0e7f11".to_string(),
            dtstamp: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            start: EventTime {
                local: at(2024, 4, 12, 19, 30),
                tz,
            },
            end: EventTime {
                local: at(2024, 4, 12, 21, 0),
                tz,
            },
            summary: "Spring Concert".to_string(),
            description: "Brahms, Dvorak; encore\nreception after".to_string(),
            location: "Main Hall".to_string(),
        }
    }

    #[test]
    fn test_floating_calendar_layout() {
        let mut cal = Calendar::new("-//Test//EN");
        cal.push(sample_event(None));
        let ics = cal.to_ics();

        let expected = "BEGIN:VCALENDAR\r\n\
PRODID:-//Test//EN\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:Spring Concert\r\n\
DTSTART:20240412T193000\r\n\
DTEND:20240412T210000\r\n\
DTSTAMP:20240301T080000Z\r\n\
UID:0b7e5c1e-8d1a-4c43-9a57-3c1c2f0e7f11\r\n\
DESCRIPTION:Brahms\\, Dvorak\\; encore\\nreception after\r\n\
LOCATION:Main Hall\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
        assert_eq!(ics, expected);
    }

    #[test]
    fn test_zoned_times_carry_tzid() {
        let mut cal = Calendar::new("-//Test//EN");
        cal.push(sample_event(Some(chrono_tz::America::New_York)));
        let ics = cal.to_ics();
        assert!(ics.contains("DTSTART;TZID=America/New_York:20240412T193000\r\n"));
        assert!(ics.contains("DTEND;TZID=America/New_York:20240412T210000\r\n"));
        assert!(ics.contains("DTSTAMP:20240301T080000Z\r\n"));
    }

    #[test]
    fn test_empty_calendar() {
        let cal = Calendar::new("-//Test//EN");
        assert!(cal.is_empty());
        assert_eq!(
            cal.to_ics(),
            "BEGIN:VCALENDAR\r\nPRODID:-//Test//EN\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n"
        );
    }

    #[test]
    fn test_long_lines_are_folded() {
        let mut out = String::new();
        let line = format!("DESCRIPTION:{}", "x".repeat(200));
        push_line(&mut out, &line);

        let physical: Vec<&str> = out.trim_end_matches("\r\n").split("\r\n").collect();
        assert!(physical.len() > 1);
        for (i, l) in physical.iter().enumerate() {
            assert!(l.len() <= MAX_LINE_OCTETS, "line {i} too long: {}", l.len());
            if i > 0 {
                assert!(l.starts_with(' '));
            }
        }

        let unfolded = out.trim_end_matches("\r\n").replace("\r\n ", "");
        assert_eq!(unfolded, line);
    }

    #[test]
    fn test_folding_keeps_multibyte_chars_whole() {
        let mut out = String::new();
        let line = format!("SUMMARY:{}", "é".repeat(60));
        push_line(&mut out, &line);

        for l in out.trim_end_matches("\r\n").split("\r\n") {
            assert!(l.len() <= MAX_LINE_OCTETS);
        }
        assert_eq!(out.trim_end_matches("\r\n").replace("\r\n ", ""), line);
    }

    #[test]
    fn test_escape_ics() {
        assert_eq!(escape_ics(r"a\b"), r"a\\b");
        assert_eq!(escape_ics("a,b;c"), r"a\,b\;c");
        assert_eq!(escape_ics("line1\r\nline2\nline3"), r"line1\nline2\nline3");
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("events/fcm.csv")),
            PathBuf::from("events/fcm.ics")
        );
        assert_eq!(
            default_output_path(Path::new("schedule")),
            PathBuf::from("schedule.ics")
        );
    }
}
