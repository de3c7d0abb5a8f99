//! Loader configuration.
//!
//! The only knob is `parse_datetime`, which enables date/time coercion for
//! JSON fixtures. Hosts can embed [`LoaderSettings`] in their own
//! configuration (it implements `Deserialize`) or read it from the
//! environment.

use serde::{Deserialize, Serialize};

/// Environment variable read by [`LoaderSettings::from_env`].
pub const PARSE_DATETIME_ENV: &str = "FIXTURES_JSON_PARSE_DATETIME";

/// Settings consumed by the built-in loaders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderSettings {
	/// Coerce string values of decoded JSON mappings into timestamps.
	pub parse_datetime: bool,
}

impl LoaderSettings {
	/// Creates settings with every option disabled.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the `parse_datetime` flag.
	///
	/// ```
	/// use fixture_loaders::LoaderSettings;
	///
	/// let settings = LoaderSettings::new().with_parse_datetime(true);
	/// assert!(settings.parse_datetime);
	/// ```
	pub fn with_parse_datetime(mut self, enabled: bool) -> Self {
		self.parse_datetime = enabled;
		self
	}

	/// Reads settings from the process environment.
	///
	/// See [`LoaderSettings::from_lookup`] for the accepted values.
	pub fn from_env() -> Self {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Reads settings through `lookup`, which maps a variable name to its value.
	///
	/// `FIXTURES_JSON_PARSE_DATETIME` accepts `true`/`1`/`yes`/`on` and
	/// `false`/`0`/`no`/`off` in any case. Unrecognized values keep the
	/// default and are reported with a warning.
	///
	/// ```
	/// use fixture_loaders::LoaderSettings;
	///
	/// let settings = LoaderSettings::from_lookup(|key| {
	///     (key == "FIXTURES_JSON_PARSE_DATETIME").then(|| "yes".to_string())
	/// });
	/// assert!(settings.parse_datetime);
	/// ```
	pub fn from_lookup<F>(lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut settings = Self::default();

		if let Some(raw) = lookup(PARSE_DATETIME_ENV) {
			match parse_flag(&raw) {
				Some(enabled) => settings.parse_datetime = enabled,
				None => tracing::warn!(
					variable = PARSE_DATETIME_ENV,
					value = %raw,
					"Ignoring unrecognized boolean value"
				),
			}
		}

		settings
	}
}

fn parse_flag(value: &str) -> Option<bool> {
	match value.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Some(true),
		"false" | "0" | "no" | "off" => Some(false),
		_ => None,
	}
}
