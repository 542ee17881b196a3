use std::fmt;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;
use rrule::{Frequency, NWeekday, RRule};

use crate::calendar::CalendarService;
use crate::course::CourseSession;
use crate::error::Error;
use crate::TZ;

/// Popup reminder offset attached to every created event.
pub const REMINDER_MINUTES: u32 = 30;

/// Event visibility as the calendar collaborator understands it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
	#[default]
	Public,
	Private,
}

impl fmt::Display for Visibility {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", match self {
			Self::Public => "PUBLIC",
			Self::Private => "PRIVATE",
		})
	}
}

/// One event-creation request for the calendar collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRequest {
	pub summary: String,
	pub description: String,
	pub location: String,
	pub start: DateTime<Tz>,
	pub end: DateTime<Tz>,
	/// `FREQ=WEEKLY;UNTIL=...;BYDAY=...` recurrence value.
	pub recurrence: String,
	pub reminder_minutes: u32,
	pub visibility: Visibility,
}

/// Identifiers and course codes produced by one synthesis run, in the
/// order the sessions appeared in the document.
#[derive(Debug, Default)]
pub struct Synthesis {
	pub event_ids: Vec<String>,
	pub course_codes: Vec<String>,
}

fn days_until(from: Weekday, to: Weekday) -> u32 {
	(to.num_days_from_monday() + 7 - from.num_days_from_monday()) % 7
}

/// The member of `days` closest on/after `from`.
///
/// The first concrete occurrence anchors on this day; picking the earliest
/// keeps the result independent of the order the page listed the days.
pub(crate) fn anchor_day(days: &[Weekday], from: Weekday) -> Weekday {
	days.iter()
		.copied()
		.min_by_key(|&day| days_until(from, day))
		.unwrap_or(Weekday::Mon)
}

fn local_instant(date: NaiveDate, time: NaiveTime) -> Result<DateTime<Tz>, Error> {
	TZ.from_local_datetime(&date.and_time(time))
		.earliest()
		.ok_or(Error::LocalTime(date, time))
}

/// Render the weekly recurrence value over the full day set, terminating
/// inclusively at `until`.
fn weekly_rule(days: &[Weekday], until: NaiveDate) -> String {
	let mut by_day: Vec<NWeekday> = Vec::new();
	for &day in days {
		let day = NWeekday::Every(day);
		if !by_day.contains(&day) {
			by_day.push(day);
		}
	}

	// 23:59:59 keeps the final day's meetings inside the rule
	let until = rrule::Tz::Tz(chrono_tz::Tz::UTC)
		.from_utc_datetime(&until.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap()));

	RRule::new(Frequency::Weekly)
		.until(until)
		.by_weekday(by_day)
		.to_string()
}

/// Build the event-creation request for one session.
///
/// `weeks` is the quarter length; the recurrence terminates at
/// `quarter_start + weeks * 7` calendar days. The first occurrence lands on
/// the anchor weekday on/after the quarter start; when they coincide, the
/// first occurrence is the quarter start itself.
pub fn plan(session: &CourseSession, weeks: u32) -> Result<EventRequest, Error> {
	let start_weekday = session.quarter_start.weekday();
	let anchor = anchor_day(&session.days, start_weekday);
	let first = session.quarter_start + Days::new(u64::from(days_until(start_weekday, anchor)));

	let until = session.quarter_start + Days::new(u64::from(weeks) * 7);

	Ok(EventRequest {
		summary: session.course_code.clone(),
		description: format!(
			"{}\nInstructor: {}",
			session.course_title, session.instructor
		),
		location: session.location.clone(),
		start: local_instant(first, session.start_time)?,
		end: local_instant(first, session.end_time)?,
		recurrence: weekly_rule(&session.days, until),
		reminder_minutes: REMINDER_MINUTES,
		visibility: Visibility::Public,
	})
}

/// Create one recurring event per session, sequentially and in document
/// order.
///
/// A failure from the calendar collaborator aborts the run; events created
/// before the failure stay in place (no rollback).
pub fn create_events(
	sessions: &[CourseSession],
	weeks: u32,
	service: &mut dyn CalendarService,
) -> Result<Synthesis, Error> {
	let mut synthesis = Synthesis::default();

	for session in sessions {
		let request = plan(session, weeks)?;

		log::debug!(
			"creating event {:?}, first occurrence {}",
			request.summary,
			request.start,
		);

		let id = service.create_recurring_event(&request)?;
		synthesis.event_ids.push(id);
		synthesis.course_codes.push(session.course_code.clone());
	}

	Ok(synthesis)
}
