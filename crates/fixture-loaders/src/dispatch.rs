//! Extension-based dispatch.
//!
//! [`FixtureLoader`] is the entry point used by test-support code: it maps a
//! file name to the first registered loader claiming its extension and
//! returns the decoded value.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::datetime::{DateTimeParser, FlexibleDateTimeParser};
use crate::error::{LoaderError, LoaderResult};
use crate::loaders::{LoadContext, Loader};
use crate::registry::LoaderRegistry;
use crate::settings::LoaderSettings;
use crate::value::FixtureValue;

/// Returns the extension used for dispatch, dot included.
///
/// Only the last extension of the file name counts, and leading dots are
/// part of the name rather than an extension.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use fixture_loaders::fixture_extension;
///
/// assert_eq!(fixture_extension(Path::new("fixtures/users.json")), Some(".json"));
/// assert_eq!(fixture_extension(Path::new("backup.tar.gz")), Some(".gz"));
/// assert_eq!(fixture_extension(Path::new(".yml")), None);
/// assert_eq!(fixture_extension(Path::new("README")), None);
/// ```
///
/// The stem may be any OS string; only the extension itself has to be UTF-8.
pub fn fixture_extension(path: &Path) -> Option<&str> {
	let name = path.file_name()?.as_encoded_bytes();
	let stem_start = name.iter().position(|&b| b != b'.')?;
	let dot = name[stem_start..].iter().rposition(|&b| b == b'.')?;
	std::str::from_utf8(&name[stem_start + dot..]).ok()
}

/// Loads fixture files by dispatching on their extension.
///
/// # Example
///
/// ```no_run
/// use fixture_loaders::{FixtureLoader, LoaderSettings};
///
/// let loader = FixtureLoader::new()
///     .with_settings(LoaderSettings::new().with_parse_datetime(true));
/// let users = loader.load("fixtures/users.json")?;
/// # Ok::<(), fixture_loaders::LoaderError>(())
/// ```
#[derive(Clone)]
pub struct FixtureLoader {
	registry: Arc<LoaderRegistry>,
	settings: LoaderSettings,
	datetime_parser: Arc<dyn DateTimeParser>,
}

impl FixtureLoader {
	/// Creates a loader with a fresh registry, default settings and the
	/// flexible date/time parser.
	pub fn new() -> Self {
		Self {
			registry: Arc::new(LoaderRegistry::new()),
			settings: LoaderSettings::default(),
			datetime_parser: Arc::new(FlexibleDateTimeParser::new()),
		}
	}

	/// Uses a shared registry.
	pub fn with_registry(mut self, registry: Arc<LoaderRegistry>) -> Self {
		self.registry = registry;
		self
	}

	/// Sets the loader settings.
	pub fn with_settings(mut self, settings: LoaderSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Sets the date/time parser used when `parse_datetime` is enabled.
	pub fn with_datetime_parser<P: DateTimeParser + 'static>(mut self, parser: P) -> Self {
		self.datetime_parser = Arc::new(parser);
		self
	}

	/// Returns the registry consulted by dispatch.
	pub fn registry(&self) -> &Arc<LoaderRegistry> {
		&self.registry
	}

	/// Returns the current settings.
	pub fn settings(&self) -> &LoaderSettings {
		&self.settings
	}

	/// Loads a fixture file with the first loader that claims its extension.
	///
	/// Loaders that declare no extension are skipped with a warning.
	///
	/// # Errors
	///
	/// Returns [`LoaderError::UnsupportedFormat`] if no loader matches, or
	/// whatever error the selected loader reports.
	pub fn load(&self, path: impl AsRef<Path>) -> LoaderResult<FixtureValue> {
		let path = path.as_ref();
		let loader = self
			.select(path)
			.ok_or_else(|| LoaderError::UnsupportedFormat(path.display().to_string()))?;

		tracing::debug!(
			path = %path.display(),
			loader = loader.name(),
			"Loading fixture"
		);
		let context = LoadContext::new(&self.settings, self.datetime_parser.as_ref());
		loader.load(path, &context)
	}

	/// Loads several fixture files in order, stopping at the first failure.
	pub fn load_files<P: AsRef<Path>>(&self, paths: &[P]) -> LoaderResult<Vec<FixtureValue>> {
		paths.iter().map(|path| self.load(path)).collect()
	}

	/// Returns true if some registered loader claims the extension of `path`.
	pub fn supports(&self, path: impl AsRef<Path>) -> bool {
		self.select(path.as_ref()).is_some()
	}

	fn select(&self, path: &Path) -> Option<Arc<dyn Loader>> {
		let extension = fixture_extension(path)?;

		self.registry.list_loaders().into_iter().find(|loader| {
			if loader.extensions().is_empty() {
				tracing::warn!(
					loader = loader.name(),
					"The loader '{}' is missing extensions and will not be used.",
					loader.name()
				);
				return false;
			}
			loader.handles(extension)
		})
	}
}

impl Default for FixtureLoader {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for FixtureLoader {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FixtureLoader")
			.field("registry", &self.registry)
			.field("settings", &self.settings)
			.finish_non_exhaustive()
	}
}
