//! JSON fixture loader.

use std::path::Path;

use serde::de::DeserializeSeed;

use super::{LoadContext, Loader, read_fixture};
use crate::error::LoaderResult;
use crate::value::{FixtureValue, ValueSeed};

/// Loader for JSON fixtures (`.json`, `.js`).
///
/// With `parse_datetime` enabled, each mapping is coerced as soon as it is
/// decoded, so nested mappings are processed before their parents.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLoader;

impl JsonLoader {
	/// Extensions claimed by the JSON loader.
	pub const EXTENSIONS: &'static [&'static str] = &[".json", ".js"];

	/// Creates a new JSON loader.
	pub fn new() -> Self {
		Self
	}

	/// Decodes JSON content held in memory.
	///
	/// # Example
	///
	/// ```
	/// use fixture_loaders::datetime::FlexibleDateTimeParser;
	/// use fixture_loaders::loaders::JsonLoader;
	/// use fixture_loaders::{LoadContext, LoaderSettings};
	///
	/// let settings = LoaderSettings::new().with_parse_datetime(true);
	/// let parser = FlexibleDateTimeParser::new();
	/// let context = LoadContext::new(&settings, &parser);
	///
	/// let value = JsonLoader::new()
	///     .load_str(r#"{"created_at": "2024-01-15"}"#, &context)
	///     .unwrap();
	/// assert!(value.get("created_at").unwrap().as_timestamp().is_some());
	/// ```
	pub fn load_str(&self, content: &str, context: &LoadContext<'_>) -> LoaderResult<FixtureValue> {
		let mut deserializer = serde_json::Deserializer::from_str(content);
		let value = ValueSeed::new(context.datetime_coercion()).deserialize(&mut deserializer)?;
		deserializer.end()?;
		Ok(value)
	}
}

impl Loader for JsonLoader {
	fn name(&self) -> &str {
		"json"
	}

	fn extensions(&self) -> &[&str] {
		Self::EXTENSIONS
	}

	fn load(&self, path: &Path, context: &LoadContext<'_>) -> LoaderResult<FixtureValue> {
		let content = read_fixture(path)?;
		self.load_str(&content, context)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::datetime::{FlexibleDateTimeParser, Timestamp};
	use crate::error::LoaderError;
	use crate::settings::LoaderSettings;
	use chrono::NaiveDate;
	use rstest::{fixture, rstest};
	use serde_json::json;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[fixture]
	fn parser() -> FlexibleDateTimeParser {
		FlexibleDateTimeParser::new()
	}

	#[rstest]
	fn test_load_str_without_coercion(parser: FlexibleDateTimeParser) {
		let settings = LoaderSettings::new();
		let context = LoadContext::new(&settings, &parser);

		let value = JsonLoader::new()
			.load_str(r#"{"created_at": "2024-01-15", "tags": ["x"]}"#, &context)
			.unwrap();

		assert_eq!(
			value,
			FixtureValue::from(json!({"created_at": "2024-01-15", "tags": ["x"]}))
		);
	}

	#[rstest]
	fn test_load_str_with_coercion(parser: FlexibleDateTimeParser) {
		let settings = LoaderSettings::new().with_parse_datetime(true);
		let context = LoadContext::new(&settings, &parser);

		let value = JsonLoader::new()
			.load_str(
				r#"{"created_at": "2024-01-15", "name": "2024 report", "author": {"born": "1970-05-01"}}"#,
				&context,
			)
			.unwrap();

		let midnight = |y, m, d| {
			FixtureValue::Timestamp(Timestamp::Naive(
				NaiveDate::from_ymd_opt(y, m, d)
					.unwrap()
					.and_hms_opt(0, 0, 0)
					.unwrap(),
			))
		};
		assert_eq!(value.get("created_at"), Some(&midnight(2024, 1, 15)));
		assert_eq!(value.get("name"), Some(&FixtureValue::from("2024 report")));
		assert_eq!(
			value.get("author").and_then(|a| a.get("born")),
			Some(&midnight(1970, 5, 1))
		);
	}

	#[rstest]
	fn test_load_str_rejects_trailing_content(parser: FlexibleDateTimeParser) {
		let settings = LoaderSettings::new();
		let context = LoadContext::new(&settings, &parser);

		let result = JsonLoader::new().load_str(r#"{"a": 1} {"b": 2}"#, &context);
		assert!(matches!(result, Err(LoaderError::JsonError(_))));
	}

	#[rstest]
	fn test_load_file(parser: FlexibleDateTimeParser) {
		let settings = LoaderSettings::new();
		let context = LoadContext::new(&settings, &parser);
		let mut file = NamedTempFile::with_suffix(".json").unwrap();
		writeln!(file, r#"[{{"model": "auth.User", "pk": 1}}]"#).unwrap();

		let value = JsonLoader::new().load(file.path(), &context).unwrap();
		assert_eq!(value, FixtureValue::from(json!([{"model": "auth.User", "pk": 1}])));
	}

	#[rstest]
	fn test_load_malformed_file(parser: FlexibleDateTimeParser) {
		let settings = LoaderSettings::new();
		let context = LoadContext::new(&settings, &parser);
		let mut file = NamedTempFile::with_suffix(".json").unwrap();
		writeln!(file, "{{\"model\": ").unwrap();

		let error = JsonLoader::new().load(file.path(), &context).unwrap_err();
		assert!(matches!(error, LoaderError::JsonError(_)));
		assert!(error.is_parse_failure());
	}
}
