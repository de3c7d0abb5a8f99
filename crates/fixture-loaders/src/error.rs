//! Error types for fixture loading.
//!
//! This module defines the error types used throughout the fixture-loaders crate.

use thiserror::Error;

/// Errors that can occur while registering loaders or loading fixtures.
#[derive(Debug, Error)]
pub enum LoaderError {
	/// No known loader claims the file's extension.
	#[error("Could not load fixture '{0}'. Unsupported file format.")]
	UnsupportedFormat(String),

	/// Fixture file not found.
	#[error("Fixture file not found: {0}")]
	FileNotFound(String),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),

	/// JSON deserialization error.
	#[error("JSON error: {0}")]
	JsonError(#[from] serde_json::Error),

	/// YAML deserialization error (when yaml feature is enabled).
	#[cfg(feature = "yaml")]
	#[error("YAML error: {0}")]
	YamlError(#[from] serde_yaml::Error),

	/// Generic parse failure, mostly raised by custom loaders.
	#[error("Parse error: {0}")]
	ParseError(String),

	/// A loader was rejected by the registry.
	#[error("Invalid loader registration: {0}")]
	InvalidLoaderRegistration(String),
}

impl LoaderError {
	/// Returns true if the error came from opening or decoding a fixture file.
	///
	/// ```
	/// # use fixture_loaders::LoaderError;
	/// assert!(LoaderError::FileNotFound("users.json".into()).is_parse_failure());
	/// assert!(!LoaderError::UnsupportedFormat("users.txt".into()).is_parse_failure());
	/// ```
	pub fn is_parse_failure(&self) -> bool {
		match self {
			Self::FileNotFound(_) | Self::IoError(_) | Self::JsonError(_) | Self::ParseError(_) => {
				true
			}
			#[cfg(feature = "yaml")]
			Self::YamlError(_) => true,
			Self::UnsupportedFormat(_) | Self::InvalidLoaderRegistration(_) => false,
		}
	}
}

/// Result type alias for loader operations.
pub type LoaderResult<T> = Result<T, LoaderError>;
