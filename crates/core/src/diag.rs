use std::fmt;

/// Recoverable anomalies absorbed during one extraction pass.
///
/// Fatal conditions are [`Error`](crate::Error)s; everything here is the
/// degrade-don't-fail path. The pipeline keeps going and the caller can
/// inspect what was patched over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
	/// No weekday recovered from a days cell; defaulted to Monday.
	EmptyDaySet,
	/// A course heading matched neither split pattern; block skipped.
	UnparsedHeading,
	/// A session row's time range was unparseable; row dropped.
	SkippedRow,
	/// End time preceded the start; forced to start + 60 minutes.
	EndBeforeStart,
	/// A field (location, instructor) was unrecoverable; left empty.
	EmptyField,
	/// A primary selector produced nothing; a fallback strategy was used.
	FallbackStrategy,
}

impl fmt::Display for AnomalyKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", match self {
			Self::EmptyDaySet => "empty day set",
			Self::UnparsedHeading => "unparsed heading",
			Self::SkippedRow => "skipped row",
			Self::EndBeforeStart => "end before start",
			Self::EmptyField => "empty field",
			Self::FallbackStrategy => "fallback strategy",
		})
	}
}

#[derive(Debug, Clone)]
pub struct Anomaly {
	pub kind: AnomalyKind,
	pub detail: String,
}

/// Per-call diagnostics channel.
///
/// Anomalies are collected here and mirrored to the `log` facade, so tests
/// assert on counts by kind instead of on printed text.
#[derive(Debug, Default)]
pub struct Diagnostics {
	anomalies: Vec<Anomaly>,
}

impl Diagnostics {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	pub fn record(&mut self, kind: AnomalyKind, detail: impl Into<String>) {
		let detail = detail.into();
		log::warn!("{kind}: {detail}");
		self.anomalies.push(Anomaly { kind, detail });
	}

	#[must_use]
	pub fn count_of(&self, kind: AnomalyKind) -> usize {
		self.anomalies.iter().filter(|a| a.kind == kind).count()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.anomalies.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.anomalies.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Anomaly> {
		self.anomalies.iter()
	}
}
