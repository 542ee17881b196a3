use chrono::Weekday;

use crate::diag::{AnomalyKind, Diagnostics};

/// Canonical two-letter code for a weekday, as recurrence rules spell it.
#[must_use]
pub fn byday(day: Weekday) -> &'static str {
	match day {
		Weekday::Mon => "MO",
		Weekday::Tue => "TU",
		Weekday::Wed => "WE",
		Weekday::Thu => "TH",
		Weekday::Fri => "FR",
		Weekday::Sat => "SA",
		Weekday::Sun => "SU",
	}
}

/// Normalize a free-text day token to a weekday.
///
/// Total over all inputs: single letters, 3-letter abbreviations and full
/// names, any case. `R` is Thursday in registrar abbreviations; a bare `T`
/// is Tuesday. Unrecognized tokens fall back to Monday so a session is
/// never lost over one day cell.
#[must_use]
pub fn normalize(token: &str) -> Weekday {
	match token.trim().to_uppercase().as_str() {
		"T" | "TU" | "TUE" | "TUES" | "TUESDAY" => Weekday::Tue,
		"W" | "WE" | "WED" | "WEDNESDAY" => Weekday::Wed,
		"R" | "TH" | "THU" | "THUR" | "THURS" | "THURSDAY" => Weekday::Thu,
		"F" | "FR" | "FRI" | "FRIDAY" => Weekday::Fri,
		"SA" | "SAT" | "SATURDAY" => Weekday::Sat,
		"SU" | "SUN" | "SUNDAY" => Weekday::Sun,
		"M" | "MO" | "MON" | "MONDAY" => Weekday::Mon,
		other => {
			log::debug!("unrecognized day token {other:?}, assuming Monday");
			Weekday::Mon
		}
	}
}

/// Parse the set of weekdays present in a days cell.
///
/// The markup writes Monday through Friday in every spelling the registrar
/// has ever used (`MWF`, `TR`, `Tu/Th`, full names). Separators collapse to
/// spaces, then each weekday is tested by containment. Thursday is checked
/// before the bare-`T` Tuesday rule so `TR` and `TTH` schedules do not
/// double-register, and `R` inside a Friday spelling does not count as
/// Thursday. An empty result degrades to Monday instead of dropping the
/// session.
pub fn parse_set(text: &str, diagnostics: &mut Diagnostics) -> Vec<Weekday> {
	let cleaned = text
		.to_uppercase()
		.replace([',', ';', '&', '/', '.'], " ");
	let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

	let thursday = cleaned.contains("TH") || (cleaned.contains('R') && !cleaned.contains("FR"));

	let mut days = Vec::new();

	if cleaned.contains('M') {
		days.push(Weekday::Mon);
	}
	if cleaned.contains("TU") || (cleaned.contains('T') && !cleaned.contains("TH")) {
		days.push(Weekday::Tue);
	}
	if cleaned.contains('W') {
		days.push(Weekday::Wed);
	}
	if thursday {
		days.push(Weekday::Thu);
	}
	if cleaned.contains('F') {
		days.push(Weekday::Fri);
	}

	if days.is_empty() {
		diagnostics.record(
			AnomalyKind::EmptyDaySet,
			format!("no weekday in {text:?}, defaulting to Monday"),
		);
		days.push(Weekday::Mon);
	}

	days
}
