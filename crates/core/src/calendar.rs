use chrono::DateTime;
use chrono_tz::Tz;
use icalendar::{Calendar, CalendarDateTime, Component, Event, EventLike};

use crate::event::EventRequest;
use crate::TZ;

/// Failure reported by the calendar collaborator. Always fatal to the
/// request: a partially populated calendar is surfaced, not papered over.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
	#[error("no event with id {0:?}")]
	NotFound(String),
	#[error("calendar service: {0}")]
	Service(String),
}

/// Simplified view of an already-created event, for the debug operations.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
	pub id: String,
	pub summary: String,
	pub start: DateTime<Tz>,
	pub end: DateTime<Tz>,
}

/// The external calendar collaborator: create a recurring event, get back
/// an identifier.
///
/// `list_events` and `get_event` exist for debug tooling only; the
/// synthesis core never calls them.
pub trait CalendarService {
	fn create_recurring_event(&mut self, request: &EventRequest) -> Result<String, CalendarError>;

	fn list_events(
		&self,
		from: DateTime<Tz>,
		to: DateTime<Tz>,
	) -> Result<Vec<CalendarEvent>, CalendarError>;

	fn get_event(&self, id: &str) -> Result<CalendarEvent, CalendarError>;
}

/// Calendar sink that renders created events into an iCalendar document.
///
/// Identifiers are sequential, so a rerun over the same input produces the
/// same ids.
#[derive(Debug, Default)]
pub struct IcsCalendar {
	created: Vec<(String, EventRequest)>,
}

impl IcsCalendar {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.created.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.created.is_empty()
	}

	/// Render everything created so far as an iCalendar document.
	#[must_use]
	pub fn into_calendar(self) -> Calendar {
		let mut calendar = Calendar::new();

		calendar.name("Course Schedule");
		calendar.timezone(TZ.name());

		for (id, request) in self.created {
			let mut event = Event::new();

			event
				.uid(&id)
				.summary(&request.summary)
				.description(&request.description)
				.location(&request.location)
				.starts(CalendarDateTime::WithTimezone {
					date_time: request.start.naive_local(),
					tzid: TZ.name().to_string(),
				})
				.ends(CalendarDateTime::WithTimezone {
					date_time: request.end.naive_local(),
					tzid: TZ.name().to_string(),
				})
				.add_property("RRULE", request.recurrence.as_str())
				.add_property("CLASS", request.visibility.to_string().as_str())
				// reminder before each occurrence
				.add_property(
					"VALARM",
					format!(
						"TRIGGER:-PT{}M;ACTION=DISPLAY;DESCRIPTION=Reminder",
						request.reminder_minutes
					)
					.as_str(),
				);

			calendar.push(event);
		}

		calendar
	}
}

impl CalendarService for IcsCalendar {
	fn create_recurring_event(&mut self, request: &EventRequest) -> Result<String, CalendarError> {
		let id = format!("event-{}@gold2cal", self.created.len() + 1);
		self.created.push((id.clone(), request.clone()));

		Ok(id)
	}

	fn list_events(
		&self,
		from: DateTime<Tz>,
		to: DateTime<Tz>,
	) -> Result<Vec<CalendarEvent>, CalendarError> {
		Ok(self
			.created
			.iter()
			.filter(|(_, request)| request.start >= from && request.start <= to)
			.map(|(id, request)| CalendarEvent {
				id: id.clone(),
				summary: request.summary.clone(),
				start: request.start,
				end: request.end,
			})
			.collect())
	}

	fn get_event(&self, id: &str) -> Result<CalendarEvent, CalendarError> {
		self.created
			.iter()
			.find(|(created, _)| created == id)
			.map(|(id, request)| CalendarEvent {
				id: id.clone(),
				summary: request.summary.clone(),
				start: request.start,
				end: request.end,
			})
			.ok_or_else(|| CalendarError::NotFound(id.to_string()))
	}
}
