use chrono::{NaiveDate, NaiveTime};

use crate::calendar::CalendarError;

/// Fatal pipeline failures.
///
/// Field- and row-level trouble never lands here; it is absorbed into
/// [`Diagnostics`](crate::Diagnostics) and extraction keeps going.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The document was empty or blank.
	#[error("empty HTML document")]
	EmptyDocument,
	/// Nothing in the document looked like a course block.
	#[error("no course sessions found in the document")]
	NoSessions,
	/// The computed occurrence does not exist as a wall-clock time.
	#[error("no valid local time for {0} {1}")]
	LocalTime(NaiveDate, NaiveTime),
	/// The calendar collaborator refused an event.
	#[error(transparent)]
	Calendar(#[from] CalendarError),
}
