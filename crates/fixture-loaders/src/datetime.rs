//! Best-effort date/time coercion for decoded mappings.
//!
//! Fixture authors write timestamps as plain strings. When coercion is
//! enabled, every string value of a decoded mapping is offered to a
//! [`DateTimeParser`]; values that parse become [`FixtureValue::Timestamp`],
//! everything else is left untouched. Coercion never fails.

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::value::{FixtureValue, Mapping};

/// A timestamp produced by coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
	/// Date and time without offset information.
	Naive(NaiveDateTime),
	/// Date and time with an explicit UTC offset.
	Zoned(DateTime<FixedOffset>),
}

impl Timestamp {
	/// Returns the wall-clock date and time, dropping any offset.
	pub fn naive_local(&self) -> NaiveDateTime {
		match self {
			Self::Naive(dt) => *dt,
			Self::Zoned(dt) => dt.naive_local(),
		}
	}

	/// Returns the calendar date.
	pub fn date(&self) -> NaiveDate {
		self.naive_local().date()
	}

	/// Returns the UTC offset, if the source carried one.
	pub fn offset(&self) -> Option<FixedOffset> {
		match self {
			Self::Naive(_) => None,
			Self::Zoned(dt) => Some(*dt.offset()),
		}
	}
}

impl fmt::Display for Timestamp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
			Self::Zoned(dt) => write!(f, "{}", dt.to_rfc3339()),
		}
	}
}

impl From<NaiveDateTime> for Timestamp {
	fn from(value: NaiveDateTime) -> Self {
		Self::Naive(value)
	}
}

impl From<DateTime<FixedOffset>> for Timestamp {
	fn from(value: DateTime<FixedOffset>) -> Self {
		Self::Zoned(value)
	}
}

/// Strategy used to turn fixture strings into timestamps.
pub trait DateTimeParser: Send + Sync {
	/// Parses `input`, returning `None` when it is not a recognizable date or time.
	fn parse(&self, input: &str) -> Option<Timestamp>;
}

/// Minimal parser accepting only `YYYY-MM-DD`, parsed to midnight.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictDateParser;

impl DateTimeParser for StrictDateParser {
	fn parse(&self, input: &str) -> Option<Timestamp> {
		NaiveDate::parse_from_str(input, "%Y-%m-%d")
			.ok()
			.map(|date| Timestamp::Naive(date.and_time(NaiveTime::MIN)))
	}
}

/// Parser accepting the date and date-time spellings commonly found in
/// hand-written fixtures.
///
/// Strings with an offset (RFC 3339, RFC 2822) become [`Timestamp::Zoned`];
/// everything else becomes [`Timestamp::Naive`], with date-only strings
/// mapped to midnight.
///
/// # Example
///
/// ```
/// use fixture_loaders::datetime::{DateTimeParser, FlexibleDateTimeParser};
///
/// let parser = FlexibleDateTimeParser::new();
/// assert!(parser.parse("2024-01-15T10:30:00Z").is_some());
/// assert!(parser.parse("January 15, 2024").is_some());
/// assert!(parser.parse("2024 report").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct FlexibleDateTimeParser {
	datetime_formats: Vec<String>,
	date_formats: Vec<String>,
}

impl FlexibleDateTimeParser {
	/// Creates a parser with the default format lists.
	pub fn new() -> Self {
		Self {
			datetime_formats: vec![
				"%Y-%m-%dT%H:%M:%S%.f".to_string(),
				"%Y-%m-%d %H:%M:%S%.f".to_string(),
				"%Y-%m-%dT%H:%M:%S".to_string(),
				"%Y-%m-%d %H:%M:%S".to_string(),
				"%Y-%m-%dT%H:%M".to_string(),
				"%Y-%m-%d %H:%M".to_string(),
				"%m/%d/%Y %H:%M:%S".to_string(),
				"%m/%d/%Y %H:%M".to_string(),
			],
			date_formats: vec![
				"%Y-%m-%d".to_string(),  // 2025-01-15
				"%Y/%m/%d".to_string(),  // 2025/01/15
				"%m/%d/%Y".to_string(),  // 01/15/2025
				"%b %d %Y".to_string(),  // Jan 15 2025
				"%b %d, %Y".to_string(), // Jan 15, 2025
				"%d %b %Y".to_string(),  // 15 Jan 2025
				"%B %d %Y".to_string(),  // January 15 2025
				"%B %d, %Y".to_string(), // January 15, 2025
				"%d %B %Y".to_string(),  // 15 January 2025
			],
		}
	}

	/// Adds a `chrono` format for strings carrying both date and time.
	pub fn with_datetime_format(mut self, format: impl Into<String>) -> Self {
		self.datetime_formats.push(format.into());
		self
	}

	/// Adds a `chrono` format for date-only strings.
	pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
		self.date_formats.push(format.into());
		self
	}

	fn parse_zoned(input: &str) -> Option<DateTime<FixedOffset>> {
		DateTime::parse_from_rfc3339(input)
			.or_else(|_| DateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f%:z"))
			.or_else(|_| DateTime::parse_from_rfc2822(input))
			.ok()
	}

	fn parse_naive(&self, input: &str) -> Option<NaiveDateTime> {
		self.datetime_formats
			.iter()
			.find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
			.or_else(|| {
				self.date_formats
					.iter()
					.find_map(|format| NaiveDate::parse_from_str(input, format).ok())
					.map(|date| date.and_time(NaiveTime::MIN))
			})
	}
}

impl Default for FlexibleDateTimeParser {
	fn default() -> Self {
		Self::new()
	}
}

impl DateTimeParser for FlexibleDateTimeParser {
	fn parse(&self, input: &str) -> Option<Timestamp> {
		let input = input.trim();
		if input.is_empty() {
			return None;
		}

		let timestamp = match Self::parse_zoned(input) {
			Some(dt) => Timestamp::Zoned(dt),
			None => Timestamp::Naive(self.parse_naive(input)?),
		};

		// Two-digit or five-digit years are almost always not dates.
		if !(1000..=9999).contains(&timestamp.date().year()) {
			return None;
		}
		Some(timestamp)
	}
}

/// Replaces every direct string value of `mapping` that `parser` accepts
/// with the parsed timestamp.
///
/// Nested mappings are not visited; loaders call this once per mapping as
/// the mapping is decoded.
pub fn coerce_mapping(mapping: &mut Mapping, parser: &dyn DateTimeParser) {
	for value in mapping.values_mut() {
		if let FixtureValue::String(text) = value
			&& let Some(timestamp) = parser.parse(text)
		{
			*value = FixtureValue::Timestamp(timestamp);
		}
	}
}
