//! Fixture file loading for test suites.
//!
//! This crate turns fixture files into decoded values that test-support code
//! can use to seed a database before each test:
//!
//! - **Loaders**: JSON (`.json`, `.js`) and YAML (`.yaml`, `.yml`) out of the
//!   box, plus any number of custom [`Loader`] implementations
//! - **Dispatch**: the loader is chosen from the file extension
//! - **Date/time coercion**: optionally turn date strings in JSON fixtures
//!   into timestamps
//!
//! # Features
//!
//! - `yaml` - YAML fixture support (enabled by default)
//!
//! # Quick Start
//!
//! Create a fixture file (`fixtures/users.json`):
//!
//! ```json
//! [
//!   {
//!     "username": "admin",
//!     "email": "admin@example.com",
//!     "joined": "2024-01-15"
//!   }
//! ]
//! ```
//!
//! Load it:
//!
//! ```no_run
//! use fixture_loaders::prelude::*;
//!
//! let loader = FixtureLoader::new()
//!     .with_settings(LoaderSettings::new().with_parse_datetime(true));
//! let users = loader.load("fixtures/users.json")?;
//!
//! for user in users.as_sequence().unwrap_or_default() {
//!     println!("{:?}", user.get("joined"));
//! }
//! # Ok::<(), LoaderError>(())
//! ```
//!
//! ## Custom loaders
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use fixture_loaders::prelude::*;
//!
//! struct LinesLoader;
//!
//! impl Loader for LinesLoader {
//!     fn name(&self) -> &str {
//!         "lines"
//!     }
//!
//!     fn extensions(&self) -> &[&str] {
//!         &[".lines"]
//!     }
//!
//!     fn load(&self, path: &Path, _context: &LoadContext<'_>) -> LoaderResult<FixtureValue> {
//!         let content = std::fs::read_to_string(path)?;
//!         Ok(FixtureValue::Sequence(content.lines().map(FixtureValue::from).collect()))
//!     }
//! }
//!
//! let registry = Arc::new(LoaderRegistry::new());
//! registry.register(LinesLoader)?;
//!
//! let loader = FixtureLoader::new().with_registry(registry);
//! let names = loader.load("fixtures/names.lines")?;
//! # Ok::<(), LoaderError>(())
//! ```
//!
//! # Architecture
//!
//! - [`FixtureValue`] - Decoded tree of mappings, sequences and scalars
//! - [`Loader`] - Format loader trait, implemented by [`JsonLoader`] and [`YamlLoader`]
//! - [`LoaderRegistry`] - Custom loaders followed by the built-ins
//! - [`FixtureLoader`] - Extension-based dispatch
//! - [`DateTimeParser`](datetime::DateTimeParser) - Pluggable date/time coercion strategy
//! - [`LoaderSettings`] - The `parse_datetime` option

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod datetime;
pub mod dispatch;
pub mod error;
pub mod loaders;
pub mod prelude;
pub mod registry;
pub mod settings;
pub mod value;

// Re-export commonly used types at crate root
pub use datetime::Timestamp;
pub use dispatch::{FixtureLoader, fixture_extension};
pub use error::{LoaderError, LoaderResult};
pub use loaders::{JsonLoader, LoadContext, Loader, YamlLoader};
pub use registry::LoaderRegistry;
pub use settings::LoaderSettings;
pub use value::{FixtureValue, Mapping};
