//! Format loaders.
//!
//! A [`Loader`] decodes the files whose extensions it declares into a
//! [`FixtureValue`]. The crate ships a JSON and a YAML loader; applications
//! can add their own through the [`LoaderRegistry`](crate::LoaderRegistry).

pub mod json;
pub mod yaml;

use std::path::Path;
use std::sync::Arc;

pub use json::JsonLoader;
pub use yaml::YamlLoader;

use crate::datetime::DateTimeParser;
use crate::error::{LoaderError, LoaderResult};
use crate::settings::LoaderSettings;
use crate::value::FixtureValue;

/// Trait for decoding fixture files of one or more formats.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use fixture_loaders::{FixtureValue, LoadContext, Loader, LoaderResult};
///
/// struct LinesLoader;
///
/// impl Loader for LinesLoader {
///     fn name(&self) -> &str {
///         "lines"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &[".lines"]
///     }
///
///     fn load(&self, path: &Path, _context: &LoadContext<'_>) -> LoaderResult<FixtureValue> {
///         let content = std::fs::read_to_string(path)?;
///         Ok(FixtureValue::Sequence(content.lines().map(FixtureValue::from).collect()))
///     }
/// }
/// ```
pub trait Loader: Send + Sync {
	/// Returns the loader name, unique within a registry.
	fn name(&self) -> &str;

	/// Returns the file extensions handled by this loader, dot included
	/// (e.g. `".json"`).
	///
	/// A loader that declares nothing is never selected by dispatch.
	fn extensions(&self) -> &[&str] {
		&[]
	}

	/// Decodes the file at `path`.
	fn load(&self, path: &Path, context: &LoadContext<'_>) -> LoaderResult<FixtureValue>;

	/// Returns true if `extension` is one of the declared extensions.
	///
	/// Matching is exact and case-sensitive.
	fn handles(&self, extension: &str) -> bool {
		self.extensions().iter().any(|ext| *ext == extension)
	}
}

/// Per-call state handed to [`Loader::load`].
#[derive(Clone, Copy)]
pub struct LoadContext<'a> {
	settings: &'a LoaderSettings,
	datetime_parser: &'a dyn DateTimeParser,
}

impl<'a> LoadContext<'a> {
	/// Creates a context from settings and the date/time parser to use.
	pub fn new(settings: &'a LoaderSettings, datetime_parser: &'a dyn DateTimeParser) -> Self {
		Self {
			settings,
			datetime_parser,
		}
	}

	/// Returns the loader settings.
	pub fn settings(&self) -> &LoaderSettings {
		self.settings
	}

	/// Returns the configured date/time parser, regardless of settings.
	pub fn datetime_parser(&self) -> &'a dyn DateTimeParser {
		self.datetime_parser
	}

	/// Returns the parser to coerce with, or `None` when `parse_datetime` is off.
	pub fn datetime_coercion(&self) -> Option<&'a dyn DateTimeParser> {
		self.settings
			.parse_datetime
			.then_some(self.datetime_parser)
	}
}

/// Returns fresh instances of the built-in loaders, JSON first.
pub fn builtin_loaders() -> Vec<Arc<dyn Loader>> {
	vec![Arc::new(JsonLoader::new()), Arc::new(YamlLoader::new())]
}

/// Reads a whole fixture file, reporting a missing file distinctly.
pub(crate) fn read_fixture(path: &Path) -> LoaderResult<String> {
	std::fs::read_to_string(path).map_err(|e| {
		if e.kind() == std::io::ErrorKind::NotFound {
			LoaderError::FileNotFound(path.display().to_string())
		} else {
			LoaderError::IoError(e)
		}
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::datetime::{FlexibleDateTimeParser, StrictDateParser};
	use rstest::rstest;

	struct Unconfigured;

	impl Loader for Unconfigured {
		fn name(&self) -> &str {
			"unconfigured"
		}

		fn load(&self, _path: &Path, _context: &LoadContext<'_>) -> LoaderResult<FixtureValue> {
			Ok(FixtureValue::Null)
		}
	}

	#[rstest]
	fn test_default_extensions_are_empty() {
		assert!(Unconfigured.extensions().is_empty());
		assert!(!Unconfigured.handles(".json"));
	}

	#[rstest]
	fn test_handles_is_case_sensitive() {
		let loader = YamlLoader::new();
		assert!(loader.handles(".yml"));
		assert!(!loader.handles(".YML"));
		assert!(!loader.handles("yml"));
	}

	#[rstest]
	fn test_builtin_loaders_order() {
		let names: Vec<String> = builtin_loaders()
			.iter()
			.map(|l| l.name().to_string())
			.collect();
		assert_eq!(names, vec!["json", "yaml"]);
	}

	#[rstest]
	fn test_context_coercion_follows_settings() {
		let parser = FlexibleDateTimeParser::new();
		let disabled = LoaderSettings::new();
		let enabled = LoaderSettings::new().with_parse_datetime(true);

		assert!(LoadContext::new(&disabled, &parser).datetime_coercion().is_none());
		assert!(LoadContext::new(&enabled, &parser).datetime_coercion().is_some());
		assert!(
			LoadContext::new(&disabled, &StrictDateParser)
				.datetime_parser()
				.parse("2024-01-15")
				.is_some()
		);
	}

	#[rstest]
	fn test_read_fixture_missing_file() {
		let result = read_fixture(Path::new("/nonexistent/fixture.json"));
		assert!(matches!(result, Err(LoaderError::FileNotFound(_))));
	}
}
