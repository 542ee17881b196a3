use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

/// `2:00 PM-2:50 PM` with explicit minutes on both sides.
static RANGE_STRICT: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?i)(\d{1,2}):(\d{2})\s+(AM|PM)\s*-\s*(\d{1,2}):(\d{2})\s+(AM|PM)").unwrap()
});

/// `9AM-10:45 AM`, minutes optional on either side.
static RANGE_RELAXED: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?i)(\d{1,2})(?::(\d{2}))?\s*(AM|PM)\s*-\s*(\d{1,2})(?::(\d{2}))?\s*(AM|PM)")
		.unwrap()
});

/// A start/end pair of times-of-day, not yet bound to any date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
	pub start: NaiveTime,
	pub end: NaiveTime,
	/// Set when the end preceded the start and was pushed to start + 60
	/// minutes.
	pub corrected: bool,
}

#[derive(Debug, thiserror::Error)]
#[error("could not parse time range {0:?}")]
pub struct ParseTimeError(pub String);

fn hour_24(hour: u32, meridiem: &str) -> u32 {
	let pm = meridiem.eq_ignore_ascii_case("PM");

	if pm && hour < 12 {
		hour + 12
	} else if !pm && hour == 12 {
		0
	} else {
		hour
	}
}

impl TimeRange {
	/// Does the text contain a parseable time range at all?
	#[must_use]
	pub fn matches(text: &str) -> bool {
		RANGE_RELAXED.is_match(text)
	}

	/// Parse a 12-hour clock range out of free text.
	///
	/// The strict pattern is tried first, then the relaxed one; first match
	/// wins. An end earlier than the start means the meridiem was misread,
	/// so the end is forced to start + 60 minutes and `corrected` is set.
	pub fn parse(text: &str) -> Result<Self, ParseTimeError> {
		let caps = RANGE_STRICT
			.captures(text)
			.or_else(|| RANGE_RELAXED.captures(text))
			.ok_or_else(|| ParseTimeError(text.to_string()))?;

		let num = |i: usize| caps.get(i).map_or(0, |m| m.as_str().parse().unwrap_or(0));
		let meridiem = |i: usize| caps.get(i).map_or("", |m| m.as_str());

		let start = NaiveTime::from_hms_opt(hour_24(num(1), meridiem(3)), num(2), 0);
		let end = NaiveTime::from_hms_opt(hour_24(num(4), meridiem(6)), num(5), 0);

		let (Some(start), Some(mut end)) = (start, end) else {
			return Err(ParseTimeError(text.to_string()));
		};

		let corrected = end < start;
		if corrected {
			end = start + chrono::Duration::hours(1);
		}

		Ok(Self { start, end, corrected })
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveTime;
	use pretty_assertions::assert_eq;

	use super::TimeRange;

	fn hm(hour: u32, minute: u32) -> NaiveTime {
		NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
	}

	#[test]
	fn explicit_minutes() {
		let range = TimeRange::parse("2:00 PM-2:50 PM").unwrap();

		assert_eq!(range.start, hm(14, 0));
		assert_eq!(range.end, hm(14, 50));
		assert!(!range.corrected);
	}

	#[test]
	fn minutes_optional() {
		let range = TimeRange::parse("9AM-10AM").unwrap();

		assert_eq!(range.start, hm(9, 0));
		assert_eq!(range.end, hm(10, 0));
	}

	#[test]
	fn mixed_precision() {
		let range = TimeRange::parse("9:30 AM-11 AM").unwrap();

		assert_eq!(range.start, hm(9, 30));
		assert_eq!(range.end, hm(11, 0));
	}

	#[test]
	fn noon_and_midnight() {
		let range = TimeRange::parse("12:00 PM-12:50 PM").unwrap();
		assert_eq!(range.start, hm(12, 0));

		let range = TimeRange::parse("12:00 AM-1:00 AM").unwrap();
		assert_eq!(range.start, hm(0, 0));
		assert_eq!(range.end, hm(1, 0));
	}

	#[test]
	fn end_before_start_is_corrected() {
		let range = TimeRange::parse("11:30 AM-11:00 AM").unwrap();

		assert_eq!(range.start, hm(11, 30));
		assert_eq!(range.end, hm(12, 30));
		assert!(range.corrected);
	}

	#[test]
	fn embedded_in_label_text() {
		let range = TimeRange::parse("Time 9:30 AM-10:45 AM").unwrap();

		assert_eq!(range.start, hm(9, 30));
		assert_eq!(range.end, hm(10, 45));
	}

	#[test]
	fn garbage_is_an_error() {
		assert!(TimeRange::parse("T.B.A.").is_err());
		assert!(TimeRange::parse("").is_err());
		assert!(TimeRange::parse("2:00-3:00").is_err());
	}

	#[test]
	fn matches_is_a_cheap_preview() {
		assert!(TimeRange::matches("lecture 2:00 PM-2:50 PM in hall"));
		assert!(!TimeRange::matches("no time here"));
	}
}
