//! Test data locator.
//!
//! Provides paths to the fixture files under the tests/fixtures/data directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Locator for fixture files used by the integration tests.
pub struct TestData {
	base_path: PathBuf,
}

impl TestData {
	/// Create a locator rooted at the crate's test data directory.
	pub fn new() -> Self {
		Self {
			base_path: Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/data"),
		}
	}

	/// Create a locator with a custom base path.
	pub fn with_base<P: AsRef<Path>>(base_path: P) -> Self {
		Self {
			base_path: base_path.as_ref().to_path_buf(),
		}
	}

	/// Get the full path to a test data file.
	///
	/// # Panics
	///
	/// Panics if the file does not exist, so a typo fails loudly instead of
	/// showing up as an unrelated load error.
	pub fn path(&self, name: &str) -> PathBuf {
		let path = self.base_path.join(name);
		assert!(path.exists(), "Missing test data file: {:?}", path);
		path
	}

	/// Read a test data file as a string.
	pub fn read(&self, name: &str) -> String {
		let path = self.path(name);
		std::fs::read_to_string(&path)
			.unwrap_or_else(|_| panic!("Failed to read test data: {:?}", path))
	}
}

impl Default for TestData {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[rstest::rstest]
	fn test_test_data_path() {
		let data = TestData::new();
		assert!(data.path("users.json").ends_with("tests/fixtures/data/users.json"));
	}

	#[rstest::rstest]
	fn test_test_data_with_base() {
		let data = TestData::with_base("/custom/path");
		assert_eq!(data.base_path, PathBuf::from("/custom/path"));
	}

	#[rstest::rstest]
	#[should_panic(expected = "Missing test data file")]
	fn test_test_data_missing_file() {
		TestData::new().path("does-not-exist.json");
	}
}
