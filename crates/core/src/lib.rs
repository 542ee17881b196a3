#![warn(clippy::pedantic)]

//! Course-schedule extraction and recurring-event synthesis.
//!
//! Takes the HTML export of a registration-system schedule page plus the
//! first day of the quarter, recovers every course session the markup
//! still admits to, and creates one weekly recurring event per session
//! through a [`CalendarService`].

pub mod calendar;
pub mod course;
pub mod day;
pub mod diag;
pub mod error;
pub mod event;
pub mod scrape;
pub mod time;

pub use calendar::{CalendarError, CalendarEvent, CalendarService, IcsCalendar};
pub use course::CourseSession;
pub use diag::{Anomaly, AnomalyKind, Diagnostics};
pub use error::Error;
pub use event::{EventRequest, Synthesis, Visibility};
pub use time::TimeRange;

use chrono::NaiveDate;

/// The institution's time zone. Every event instant is produced here.
pub const TZ: chrono_tz::Tz = chrono_tz::America::Los_Angeles;

/// Everything one pipeline run produces.
#[derive(Debug)]
pub struct Outcome {
	/// Identifier the calendar returned for each created event.
	pub event_ids: Vec<String>,
	/// Course code of each created event, in document order.
	pub course_codes: Vec<String>,
	/// Recoverable anomalies absorbed along the way.
	pub diagnostics: Diagnostics,
}

/// Run the full pipeline: extract sessions from the page, then create one
/// recurring event per session.
///
/// `weeks` is the quarter length in weeks; ten for a regular quarter, six
/// for a summer term.
pub fn process(
	html: &str,
	quarter_start: NaiveDate,
	weeks: u32,
	service: &mut dyn CalendarService,
) -> Result<Outcome, Error> {
	let mut diagnostics = Diagnostics::new();

	let sessions = scrape::extract(html, quarter_start, &mut diagnostics)?;
	let synthesis = event::create_events(&sessions, weeks, service)?;

	Ok(Outcome {
		event_ids: synthesis.event_ids,
		course_codes: synthesis.course_codes,
		diagnostics,
	})
}
