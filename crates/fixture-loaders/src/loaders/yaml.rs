//! YAML fixture loader.

use std::path::Path;

use super::{LoadContext, Loader};
use crate::error::LoaderResult;
use crate::value::FixtureValue;

/// Loader for YAML fixtures (`.yaml`, `.yml`).
///
/// Parsing is restricted to plain data: tagged nodes such as
/// `!!python/object:...` or `!Custom` are rejected instead of being
/// constructed. Merge keys (`<<: *defaults`) are resolved. No date/time
/// coercion is applied.
///
/// Requires the `yaml` feature; without it the loader is still known to the
/// registry but every load fails with a [`LoaderError::ParseError`](crate::LoaderError::ParseError).
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlLoader;

impl YamlLoader {
	/// Extensions claimed by the YAML loader.
	pub const EXTENSIONS: &'static [&'static str] = &[".yaml", ".yml"];

	/// Creates a new YAML loader.
	pub fn new() -> Self {
		Self
	}

	/// Decodes YAML content held in memory.
	#[cfg(feature = "yaml")]
	pub fn load_str(&self, content: &str, _context: &LoadContext<'_>) -> LoaderResult<FixtureValue> {
		use crate::value::ValueSeed;
		use serde::de::DeserializeSeed;

		let value = ValueSeed::new(None)
			.with_merge_keys()
			.deserialize(serde_yaml::Deserializer::from_str(content))?;
		Ok(value)
	}

	/// Stub for YAML parsing when the feature is not enabled.
	#[cfg(not(feature = "yaml"))]
	pub fn load_str(&self, _content: &str, _context: &LoadContext<'_>) -> LoaderResult<FixtureValue> {
		Err(crate::error::LoaderError::ParseError(
			"YAML support requires the 'yaml' feature".to_string(),
		))
	}
}

impl Loader for YamlLoader {
	fn name(&self) -> &str {
		"yaml"
	}

	fn extensions(&self) -> &[&str] {
		Self::EXTENSIONS
	}

	#[cfg(feature = "yaml")]
	fn load(&self, path: &Path, context: &LoadContext<'_>) -> LoaderResult<FixtureValue> {
		let content = super::read_fixture(path)?;
		self.load_str(&content, context)
	}

	#[cfg(not(feature = "yaml"))]
	fn load(&self, path: &Path, _context: &LoadContext<'_>) -> LoaderResult<FixtureValue> {
		Err(crate::error::LoaderError::ParseError(format!(
			"Could not load fixture '{}'. YAML support requires the 'yaml' feature",
			path.display()
		)))
	}
}
