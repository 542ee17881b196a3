use std::collections::HashSet;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use select::document::Document;
use select::node::Node;
use select::predicate::{And, Any, Attr, Class, Name};

use crate::course::CourseSession;
use crate::day;
use crate::diag::{AnomalyKind, Diagnostics};
use crate::error::Error;
use crate::time::TimeRange;

/// `CODE  - Title`, the two-space marker the registrar renders between the
/// course code and the dash.
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"([\w\s]+?)\s{2,}-\s*(.*)").unwrap());

/// Extract every course session from an exported schedule page.
///
/// The markup carries no stable schema, so blocks and rows are located by
/// an ordered fallback chain and every field is recovered independently.
/// Field failures leave the field empty, an unparseable time drops its row,
/// an unsplittable heading drops its block; only a blank document or a
/// document with zero recoverable sessions is fatal.
pub fn extract(
	html: &str,
	quarter_start: NaiveDate,
	diagnostics: &mut Diagnostics,
) -> Result<Vec<CourseSession>, Error> {
	if html.trim().is_empty() {
		return Err(Error::EmptyDocument);
	}

	let document = Document::from(html);
	let mut sessions = Vec::new();

	for item in schedule_items(&document, diagnostics) {
		// the running units/summary block is not a course
		if class_contains(&item, "unitsSection") {
			continue;
		}

		let Some((code, title)) = course_heading(&item, diagnostics) else {
			continue;
		};

		let rows = session_rows(&item);
		log::debug!("{code}: {} session rows", rows.len());

		for row in rows {
			if let Some(session) = session_from_row(&row, &code, &title, quarter_start, diagnostics)
			{
				sessions.push(session);
			}
		}
	}

	if sessions.is_empty() {
		return Err(Error::NoSessions);
	}

	Ok(sessions)
}

fn id_contains(node: &Node, needle: &str) -> bool {
	node.attr("id").is_some_and(|id| id.contains(needle))
}

fn class_contains(node: &Node, needle: &str) -> bool {
	node.attr("class").is_some_and(|class| class.contains(needle))
}

fn heading_marker(node: &Node) -> bool {
	id_contains(node, "CourseHeadingLabel") || class_contains(node, "courseHeading")
}

fn collapse_ws(s: &str) -> String {
	s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn ancestor<'a>(node: Node<'a>, levels: usize) -> Option<Node<'a>> {
	let mut current = node;
	for _ in 0..levels {
		current = current.parent()?;
	}
	Some(current)
}

/// Locate the course blocks, from most to least specific selector. Each
/// strategy runs only when the previous one matched nothing.
fn schedule_items<'a>(document: &'a Document, diagnostics: &mut Diagnostics) -> Vec<Node<'a>> {
	let items: Vec<_> = document.find(Class("scheduleItem")).collect();
	if !items.is_empty() {
		return items;
	}

	// no marker class anywhere; find the heading labels and walk back up to
	// the block that encloses them
	diagnostics.record(
		AnomalyKind::FallbackStrategy,
		"no scheduleItem class, walking up from course headings",
	);

	let mut seen = HashSet::new();
	let items: Vec<_> = document
		.find(Any)
		.filter(|node| id_contains(node, "CourseHeadingLabel"))
		.filter_map(|node| ancestor(node, 3))
		.filter(|node| seen.insert(node.index()))
		.collect();
	if !items.is_empty() {
		return items;
	}

	diagnostics.record(
		AnomalyKind::FallbackStrategy,
		"searching the schedule container for course blocks",
	);

	if let Some(container) = document.find(Attr("id", "div_Schedule_Container")).next() {
		return container
			.children()
			.filter(|node| node.name() == Some("div"))
			.filter(|node| node.find(Any).any(|child| heading_marker(&child)))
			.collect();
	}

	Vec::new()
}

/// Heading text split into course code and title.
fn course_heading(item: &Node, diagnostics: &mut Diagnostics) -> Option<(String, String)> {
	let heading = item
		.find(Class("courseHeadingLabel"))
		.next()
		.or_else(|| item.find(Any).find(heading_marker))
		.or_else(|| item.find(Class("courseTitle")).next())
		.or_else(|| item.find(Name("span")).next())
		.map(|node| node.text())
		.unwrap_or_default();
	let heading = heading.trim();

	if let Some(caps) = HEADING.captures(heading) {
		return Some((collapse_ws(&caps[1]), collapse_ws(&caps[2])));
	}

	// the two-space marker is gone once the markup is flattened; fall back
	// to the first dash
	if let Some((code, title)) = heading.split_once('-') {
		if !code.trim().is_empty() && !title.trim().is_empty() {
			return Some((collapse_ws(code), collapse_ws(title)));
		}
	}

	diagnostics.record(
		AnomalyKind::UnparsedHeading,
		format!("cannot split heading {heading:?}"),
	);

	None
}

/// Session rows of one course block: the marker class, else rows carrying
/// a time range, else rows carrying a days column or label.
fn session_rows<'a>(item: &Node<'a>) -> Vec<Node<'a>> {
	let rows: Vec<_> = item.find(And(Class("row"), Class("session"))).collect();
	if !rows.is_empty() {
		return rows;
	}

	let rows: Vec<_> = item
		.find(Class("row"))
		.filter(|node| TimeRange::matches(&node.text()))
		.collect();
	if !rows.is_empty() {
		return rows;
	}

	item.find(Class("row"))
		.filter(|node| {
			node.find(Any).any(|child| class_contains(&child, "days"))
				|| node
					.find(Name("div"))
					.any(|child| child.text().contains("Days"))
		})
		.collect()
}

/// Pull one field out of a session row: an element whose class carries the
/// marker, else any `div` labelled with the literal column name. The label
/// word itself is stripped from the result.
fn field_text(row: &Node, marker: &str, label: &str) -> String {
	let text = row
		.find(Any)
		.find(|node| class_contains(node, marker))
		.or_else(|| {
			row.find(Name("div"))
				.find(|node| node.text().contains(label))
		})
		.map(|node| node.text())
		.unwrap_or_default();

	collapse_ws(&text.replace(label, ""))
}

/// The time column, else any element whose text carries a time range, else
/// the whole row.
fn time_text(row: &Node) -> String {
	let text = row
		.find(Any)
		.find(|node| class_contains(node, "time"))
		.map(|node| node.text())
		.or_else(|| {
			row.find(Name("div"))
				.map(|node| node.text())
				.find(|text| TimeRange::matches(text))
		})
		.unwrap_or_else(|| row.text());

	collapse_ws(&text.replace("Time", ""))
}

/// The location column, preferring the map link's text, else the labelled
/// fallback.
fn location_text(row: &Node) -> String {
	let text = row
		.find(Any)
		.find(|node| class_contains(node, "location"))
		.map(|node| node.find(Name("a")).next().unwrap_or(node))
		.or_else(|| {
			row.find(Name("a"))
				.find(|node| node.attr("href").is_some_and(|href| href.contains("map")))
		})
		.or_else(|| {
			row.find(Name("div"))
				.find(|node| node.text().contains("Location"))
		})
		.map(|node| node.text())
		.unwrap_or_default();

	collapse_ws(&text.replace("Location", ""))
}

/// Build a session from one row. Fields are recovered independently; only
/// an unparseable time drops the row.
fn session_from_row(
	row: &Node,
	code: &str,
	title: &str,
	quarter_start: NaiveDate,
	diagnostics: &mut Diagnostics,
) -> Option<CourseSession> {
	let days_text = field_text(row, "days", "Days");
	let days = day::parse_set(&days_text, diagnostics);

	let time_text = time_text(row);
	let range = match TimeRange::parse(&time_text) {
		Ok(range) => range,
		Err(err) => {
			diagnostics.record(AnomalyKind::SkippedRow, format!("{code}: {err}"));
			return None;
		}
	};
	if range.corrected {
		diagnostics.record(
			AnomalyKind::EndBeforeStart,
			format!("{code}: end precedes start in {time_text:?}"),
		);
	}

	let location = location_text(row);
	if location.is_empty() {
		diagnostics.record(AnomalyKind::EmptyField, format!("{code}: no location"));
	}

	let instructor = field_text(row, "instructor", "Instructor");
	if instructor.is_empty() {
		diagnostics.record(AnomalyKind::EmptyField, format!("{code}: no instructor"));
	}

	Some(CourseSession {
		course_code: code.to_string(),
		course_title: title.to_string(),
		instructor,
		location,
		days,
		start_time: range.start,
		end_time: range.end,
		quarter_start,
	})
}
