use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;
use uuid::Uuid;

use crate::csv_events::CsvEvent;
use crate::ics::{Calendar, EventTime, IcsEvent};

pub const DEFAULT_PRODID: &str = "-//Friends of Chamber Music//FCM Events//EN";

const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub prodid: String,
    /// Zone applied to every start/end time; `None` emits floating times.
    pub timezone: Option<Tz>,
    /// DTSTAMP written on every event.
    pub generated_at: DateTime<Utc>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            prodid: DEFAULT_PRODID.to_string(),
            timezone: None,
            generated_at: Utc::now(),
        }
    }
}

/// A row that could not become an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEvent {
    pub subject: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct CalendarBuild {
    pub calendar: Calendar,
    pub skipped: Vec<SkippedEvent>,
}

/// Turn CSV rows into calendar events, in row order.
///
/// Rows whose start or end cannot be parsed (or does not exist in the chosen
/// zone) are skipped and reported in `skipped`; the rest still convert.
pub fn build_calendar(events: &[CsvEvent], opts: &BuildOptions) -> CalendarBuild {
    let mut calendar = Calendar::new(opts.prodid.clone());
    let mut skipped = Vec::new();

    for ev in events {
        let times = event_time(&ev.start_date, &ev.start_time, opts.timezone).and_then(|start| {
            event_time(&ev.end_date, &ev.end_time, opts.timezone).map(|end| (start, end))
        });

        let (start, end) = match times {
            Ok(t) => t,
            Err(reason) => {
                debug!(subject = %ev.subject, %reason, "skipping event");
                skipped.push(SkippedEvent {
                    subject: ev.subject.clone(),
                    reason,
                });
                continue;
            }
        };

        calendar.push(IcsEvent {
            uid: Uuid::new_v4().to_string(),
            dtstamp: opts.generated_at,
            start,
            end,
            summary: ev.subject.clone(),
            description: ev.description.clone(),
            location: ev.location.clone(),
        });
    }

    CalendarBuild { calendar, skipped }
}

fn event_time(date: &str, time: &str, tz: Option<Tz>) -> Result<EventTime, String> {
    let raw = format!("{date} {time}");
    let local = NaiveDateTime::parse_from_str(&raw, CSV_DATETIME_FORMAT)
        .map_err(|e| format!("invalid date/time '{raw}': {e}"))?;

    if let Some(tz) = tz {
        // Ambiguous (DST fall-back) times are fine; gaps are not.
        if tz.from_local_datetime(&local).earliest().is_none() {
            return Err(format!("local time '{raw}' does not exist in {}", tz.name()));
        }
    }

    Ok(EventTime { local, tz })
}
