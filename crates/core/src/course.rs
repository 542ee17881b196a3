use chrono::{NaiveDate, NaiveTime, Weekday};

/// One scheduled meeting pattern of a course, as recovered from the page.
///
/// A single course heading commonly yields several of these (the lecture
/// plus its discussion or lab sections); they share `course_code` and
/// `course_title` but may differ in every other field. A session is
/// immutable once extraction produces it; synthesis only reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSession {
	/// Short identifier, whitespace-collapsed (e.g. `CMPSC 130A`).
	pub course_code: String,
	/// Free-text title, whitespace-collapsed.
	pub course_title: String,
	/// Empty string when the markup gave nothing to recover.
	pub instructor: String,
	/// Empty string when the markup gave nothing to recover.
	pub location: String,
	/// Meeting weekdays in the order the page listed them. Never empty.
	pub days: Vec<Weekday>,
	pub start_time: NaiveTime,
	pub end_time: NaiveTime,
	/// First day of the quarter the recurrence is anchored to.
	pub quarter_start: NaiveDate,
}
