//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use fixture_loaders::prelude::*;
//! ```

// Error types
pub use crate::error::{LoaderError, LoaderResult};

// Loader types
pub use crate::loaders::{JsonLoader, LoadContext, Loader, YamlLoader, builtin_loaders};
pub use crate::registry::LoaderRegistry;

// Dispatch
pub use crate::dispatch::{FixtureLoader, fixture_extension};

// Values and coercion
pub use crate::datetime::{
	DateTimeParser, FlexibleDateTimeParser, StrictDateParser, Timestamp, coerce_mapping,
};
pub use crate::value::{FixtureValue, Mapping};

// Settings
pub use crate::settings::LoaderSettings;
