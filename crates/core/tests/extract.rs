use chrono::{NaiveDate, NaiveTime, Weekday};
use gold2cal_core::{scrape, AnomalyKind, Diagnostics, Error};
use pretty_assertions::assert_eq;

const SCHEDULE: &str = include_str!("fixtures/schedule.html");
const DEGRADED: &str = include_str!("fixtures/degraded.html");
const CONTAINER: &str = include_str!("fixtures/container.html");
const MESSY: &str = include_str!("fixtures/messy.html");
const NO_COURSES: &str = include_str!("fixtures/no_courses.html");

fn quarter_start() -> NaiveDate {
	// a Monday
	NaiveDate::from_ymd_opt(2026, 3, 30).unwrap()
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
	NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[test]
fn well_marked_page_yields_sessions_in_document_order() {
	let mut diagnostics = Diagnostics::new();
	let sessions = scrape::extract(SCHEDULE, quarter_start(), &mut diagnostics).unwrap();

	assert_eq!(sessions.len(), 3);

	let lecture = &sessions[0];
	assert_eq!(lecture.course_code, "CMPSC 130A");
	assert_eq!(lecture.course_title, "DATA STRUCT ALGORITHMS");
	assert_eq!(lecture.days, vec![Weekday::Mon, Weekday::Wed]);
	assert_eq!(lecture.start_time, hm(14, 0));
	assert_eq!(lecture.end_time, hm(15, 15));
	assert_eq!(lecture.location, "BUCHN 1930");
	assert_eq!(lecture.instructor, "GONZALEZ T F");

	let section = &sessions[1];
	assert_eq!(section.course_code, "CMPSC 130A");
	assert_eq!(section.course_title, "DATA STRUCT ALGORITHMS");
	assert_eq!(section.days, vec![Weekday::Fri]);
	assert_eq!(section.start_time, hm(9, 0));
	assert_eq!(section.location, "PHELP 1440");

	let other = &sessions[2];
	assert_eq!(other.course_code, "PHYS 100A");
	assert_eq!(other.days, vec![Weekday::Tue, Weekday::Thu]);
	assert_eq!(other.start_time, hm(11, 0));
	assert_eq!(other.end_time, hm(12, 15));

	assert!(diagnostics.is_empty(), "{diagnostics:?}");
}

#[test]
fn units_section_is_never_a_course() {
	let mut diagnostics = Diagnostics::new();
	let sessions = scrape::extract(SCHEDULE, quarter_start(), &mut diagnostics).unwrap();

	assert!(sessions.iter().all(|s| !s.course_code.contains("Units")));
}

#[test]
fn heading_walk_recovers_unmarked_blocks() {
	let mut diagnostics = Diagnostics::new();
	let sessions = scrape::extract(DEGRADED, quarter_start(), &mut diagnostics).unwrap();

	assert_eq!(sessions.len(), 1);
	assert_eq!(sessions[0].course_code, "ANTH 2");
	assert_eq!(sessions[0].course_title, "INTRO CULT ANTHRO");
	assert_eq!(sessions[0].days, vec![Weekday::Tue, Weekday::Thu]);
	assert_eq!(sessions[0].start_time, hm(9, 30));
	assert_eq!(sessions[0].end_time, hm(10, 45));
	assert_eq!(sessions[0].location, "EMBAR HALL");
	assert_eq!(sessions[0].instructor, "SMITH J");

	assert_eq!(diagnostics.count_of(AnomalyKind::FallbackStrategy), 1);
}

#[test]
fn schedule_container_is_the_last_resort() {
	let mut diagnostics = Diagnostics::new();
	let sessions = scrape::extract(CONTAINER, quarter_start(), &mut diagnostics).unwrap();

	assert_eq!(sessions.len(), 1);
	assert_eq!(sessions[0].course_code, "MATH 4B");
	assert_eq!(
		sessions[0].days,
		vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
	);
	assert_eq!(sessions[0].location, "SOUTH HALL 1607");

	assert_eq!(diagnostics.count_of(AnomalyKind::FallbackStrategy), 2);
}

#[test]
fn rows_and_blocks_degrade_independently() {
	let mut diagnostics = Diagnostics::new();
	let sessions = scrape::extract(MESSY, quarter_start(), &mut diagnostics).unwrap();

	// the TBA row and the dash-less heading both drop; the damaged first
	// row survives with its defaults
	assert_eq!(sessions.len(), 1);

	let survivor = &sessions[0];
	assert_eq!(survivor.course_code, "WRIT 2");
	assert_eq!(survivor.days, vec![Weekday::Mon]);
	assert_eq!(survivor.start_time, hm(11, 30));
	assert_eq!(survivor.end_time, hm(12, 30));
	assert_eq!(survivor.location, "");

	assert_eq!(diagnostics.count_of(AnomalyKind::EmptyDaySet), 1);
	assert_eq!(diagnostics.count_of(AnomalyKind::EndBeforeStart), 1);
	assert_eq!(diagnostics.count_of(AnomalyKind::SkippedRow), 1);
	assert_eq!(diagnostics.count_of(AnomalyKind::UnparsedHeading), 1);
	assert_eq!(diagnostics.count_of(AnomalyKind::EmptyField), 1);
}

#[test]
fn blank_document_is_fatal() {
	let mut diagnostics = Diagnostics::new();

	assert!(matches!(
		scrape::extract("", quarter_start(), &mut diagnostics),
		Err(Error::EmptyDocument)
	));
	assert!(matches!(
		scrape::extract("  \n\t ", quarter_start(), &mut diagnostics),
		Err(Error::EmptyDocument)
	));
}

#[test]
fn unrecognizable_document_is_fatal_not_empty_success() {
	let mut diagnostics = Diagnostics::new();

	assert!(matches!(
		scrape::extract(NO_COURSES, quarter_start(), &mut diagnostics),
		Err(Error::NoSessions)
	));
}

#[test]
fn extraction_is_deterministic() {
	let mut first_diagnostics = Diagnostics::new();
	let first = scrape::extract(SCHEDULE, quarter_start(), &mut first_diagnostics).unwrap();

	let mut second_diagnostics = Diagnostics::new();
	let second = scrape::extract(SCHEDULE, quarter_start(), &mut second_diagnostics).unwrap();

	assert_eq!(first, second);
	assert_eq!(first_diagnostics.len(), second_diagnostics.len());
}
