//! tally-calendar: CSV event rows to iCalendar (.ics) conversion

pub mod builder;
pub mod csv_events;
pub mod ics;

pub use builder::{BuildOptions, CalendarBuild, DEFAULT_PRODID, SkippedEvent, build_calendar};
pub use csv_events::{CsvEvent, read_events, read_events_from_reader};
pub use ics::{Calendar, EventTime, IcsEvent, default_output_path};
