//! Loader registry.
//!
//! The registry holds the loaders considered by dispatch: custom loaders
//! registered by the application, followed by the built-in loaders. It is an
//! ordinary value, so tests can build a fresh one instead of sharing
//! process-wide state.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{LoaderError, LoaderResult};
use crate::loaders::{Loader, builtin_loaders};

/// Ordered collection of fixture loaders.
///
/// # Example
///
/// ```
/// use fixture_loaders::LoaderRegistry;
///
/// let registry = LoaderRegistry::new();
/// assert_eq!(registry.list_extensions(), vec![".json", ".js", ".yaml", ".yml"]);
/// ```
pub struct LoaderRegistry {
	custom: RwLock<Vec<Arc<dyn Loader>>>,
	builtins: Vec<Arc<dyn Loader>>,
}

impl LoaderRegistry {
	/// Creates a registry with the built-in JSON and YAML loaders.
	pub fn new() -> Self {
		Self::with_builtins(builtin_loaders())
	}

	/// Creates a registry with a caller-supplied list of built-in loaders.
	pub fn with_builtins(builtins: Vec<Arc<dyn Loader>>) -> Self {
		Self {
			custom: RwLock::new(Vec::new()),
			builtins,
		}
	}

	/// Registers a custom loader.
	///
	/// Custom loaders are consulted before the built-ins, in registration
	/// order. A custom loader named like a built-in replaces it.
	///
	/// # Errors
	///
	/// Returns [`LoaderError::InvalidLoaderRegistration`] and leaves the
	/// registry unchanged if the loader has an empty name, declares a
	/// malformed extension, or a custom loader with the same name is already
	/// registered.
	pub fn register<L: Loader + 'static>(&self, loader: L) -> LoaderResult<()> {
		self.register_arc(Arc::new(loader))
	}

	/// Registers an already shared custom loader.
	///
	/// See [`LoaderRegistry::register`].
	pub fn register_arc(&self, loader: Arc<dyn Loader>) -> LoaderResult<()> {
		validate_loader(loader.as_ref())?;

		let mut custom = self.custom.write();
		if custom.iter().any(|l| l.name() == loader.name()) {
			return Err(LoaderError::InvalidLoaderRegistration(format!(
				"a loader named '{}' is already registered",
				loader.name()
			)));
		}

		tracing::debug!(
			loader = loader.name(),
			extensions = ?loader.extensions(),
			"Registered custom fixture loader"
		);
		custom.push(loader);
		Ok(())
	}

	/// Removes the custom loader called `name`.
	///
	/// Returns whether a loader was removed; unknown names are ignored.
	pub fn unregister(&self, name: &str) -> bool {
		let mut custom = self.custom.write();
		let before = custom.len();
		custom.retain(|l| l.name() != name);
		let removed = custom.len() != before;
		if removed {
			tracing::debug!(loader = name, "Unregistered custom fixture loader");
		}
		removed
	}

	/// Returns true if a custom loader called `name` is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.custom.read().iter().any(|l| l.name() == name)
	}

	/// Returns every loader in dispatch order: custom loaders first, then the
	/// built-ins not shadowed by a custom loader of the same name.
	///
	/// The returned list is a snapshot; later registrations do not affect it.
	pub fn list_loaders(&self) -> Vec<Arc<dyn Loader>> {
		let custom = self.custom.read();
		let mut loaders: Vec<Arc<dyn Loader>> = custom.iter().cloned().collect();
		loaders.extend(
			self.builtins
				.iter()
				.filter(|builtin| !custom.iter().any(|l| l.name() == builtin.name()))
				.cloned(),
		);
		loaders
	}

	/// Returns the extensions of every loader in dispatch order, without duplicates.
	pub fn list_extensions(&self) -> Vec<String> {
		collect_extensions(&self.list_loaders())
	}

	/// Returns the extensions declared by the built-in loaders only.
	pub fn builtin_extensions(&self) -> Vec<String> {
		collect_extensions(&self.builtins)
	}

	/// Removes all custom loaders.
	pub fn clear(&self) {
		self.custom.write().clear();
	}

	/// Returns the number of custom loaders.
	pub fn len(&self) -> usize {
		self.custom.read().len()
	}

	/// Returns true if no custom loaders are registered.
	pub fn is_empty(&self) -> bool {
		self.custom.read().is_empty()
	}
}

impl Default for LoaderRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for LoaderRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let names = |loaders: &[Arc<dyn Loader>]| {
			loaders
				.iter()
				.map(|l| l.name().to_string())
				.collect::<Vec<_>>()
		};
		f.debug_struct("LoaderRegistry")
			.field("custom", &names(self.custom.read().as_slice()))
			.field("builtins", &names(self.builtins.as_slice()))
			.finish()
	}
}

fn collect_extensions(loaders: &[Arc<dyn Loader>]) -> Vec<String> {
	let mut extensions: Vec<String> = Vec::new();
	for ext in loaders.iter().flat_map(|l| l.extensions().iter()) {
		if !extensions.iter().any(|known| known == ext) {
			extensions.push((*ext).to_string());
		}
	}
	extensions
}

fn validate_loader(loader: &dyn Loader) -> LoaderResult<()> {
	if loader.name().trim().is_empty() {
		return Err(LoaderError::InvalidLoaderRegistration(
			"loader name must not be empty".to_string(),
		));
	}

	if let Some(ext) = loader.extensions().iter().find(|ext| !is_valid_extension(ext)) {
		return Err(LoaderError::InvalidLoaderRegistration(format!(
			"loader '{}' declares invalid extension '{}': expected a single '.'-prefixed suffix such as '.csv'",
			loader.name(),
			ext
		)));
	}

	Ok(())
}

/// Dispatch only ever sees the last extension of a file name, so anything
/// else could never match.
fn is_valid_extension(ext: &str) -> bool {
	match ext.strip_prefix('.') {
		Some(rest) => !rest.is_empty() && !rest.contains(['.', '/', '\\']),
		None => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::LoaderResult;
	use crate::loaders::{JsonLoader, LoadContext};
	use crate::value::FixtureValue;
	use rstest::rstest;
	use std::path::Path;

	struct StubLoader {
		name: &'static str,
		extensions: &'static [&'static str],
	}

	impl Loader for StubLoader {
		fn name(&self) -> &str {
			self.name
		}

		fn extensions(&self) -> &[&str] {
			self.extensions
		}

		fn load(&self, _path: &Path, _context: &LoadContext<'_>) -> LoaderResult<FixtureValue> {
			Ok(FixtureValue::from(self.name))
		}
	}

	fn names(loaders: &[Arc<dyn Loader>]) -> Vec<String> {
		loaders.iter().map(|l| l.name().to_string()).collect()
	}

	#[rstest]
	fn test_new_lists_builtins() {
		let registry = LoaderRegistry::new();
		assert!(registry.is_empty());
		assert_eq!(names(&registry.list_loaders()), vec!["json", "yaml"]);
	}

	#[rstest]
	fn test_custom_loaders_come_first_in_registration_order() {
		let registry = LoaderRegistry::new();
		registry
			.register(StubLoader {
				name: "csv",
				extensions: &[".csv"],
			})
			.unwrap();
		registry
			.register(StubLoader {
				name: "toml",
				extensions: &[".toml"],
			})
			.unwrap();

		assert_eq!(registry.len(), 2);
		assert_eq!(
			names(&registry.list_loaders()),
			vec!["csv", "toml", "json", "yaml"]
		);
	}

	#[rstest]
	fn test_custom_loader_shadows_builtin_of_same_name() {
		let registry = LoaderRegistry::new();
		registry
			.register(StubLoader {
				name: "json",
				extensions: &[".json"],
			})
			.unwrap();

		assert_eq!(names(&registry.list_loaders()), vec!["json", "yaml"]);
		assert_eq!(registry.list_loaders()[0].extensions(), &[".json"]);
	}

	#[rstest]
	fn test_duplicate_registration_is_rejected() {
		let registry = LoaderRegistry::new();
		registry
			.register(StubLoader {
				name: "csv",
				extensions: &[".csv"],
			})
			.unwrap();

		let result = registry.register(StubLoader {
			name: "csv",
			extensions: &[".tsv"],
		});
		assert!(matches!(
			result,
			Err(LoaderError::InvalidLoaderRegistration(_))
		));
		assert_eq!(registry.len(), 1);
		assert!(!registry.list_extensions().contains(&".tsv".to_string()));
	}

	#[rstest]
	#[case("", &[".csv"])]
	#[case("csv", &["csv"])]
	#[case("csv", &["."])]
	#[case("archive", &[".tar.gz"])]
	#[case("nested", &["./x"])]
	fn test_invalid_registration_leaves_registry_unchanged(
		#[case] name: &'static str,
		#[case] extensions: &'static [&'static str],
	) {
		let registry = LoaderRegistry::new();
		let before = names(&registry.list_loaders());

		let result = registry.register(StubLoader { name, extensions });

		assert!(matches!(
			result,
			Err(LoaderError::InvalidLoaderRegistration(_))
		));
		assert_eq!(names(&registry.list_loaders()), before);
	}

	#[rstest]
	fn test_loader_without_extensions_can_be_registered() {
		let registry = LoaderRegistry::new();
		registry
			.register(StubLoader {
				name: "bare",
				extensions: &[],
			})
			.unwrap();
		assert!(registry.contains("bare"));
	}

	#[rstest]
	fn test_unregister() {
		let registry = LoaderRegistry::new();
		registry
			.register(StubLoader {
				name: "csv",
				extensions: &[".csv"],
			})
			.unwrap();

		assert!(registry.unregister("csv"));
		assert!(!registry.contains("csv"));
		assert!(!registry.unregister("csv"));
		assert!(!registry.unregister("never-registered"));
		assert_eq!(names(&registry.list_loaders()), vec!["json", "yaml"]);
	}

	#[rstest]
	fn test_unregister_does_not_remove_builtins() {
		let registry = LoaderRegistry::new();
		assert!(!registry.unregister("json"));
		assert_eq!(names(&registry.list_loaders()), vec!["json", "yaml"]);
	}

	#[rstest]
	fn test_extensions_include_custom_loaders() {
		let registry = LoaderRegistry::new();
		registry
			.register(StubLoader {
				name: "csv",
				extensions: &[".csv", ".json"],
			})
			.unwrap();

		assert_eq!(
			registry.list_extensions(),
			vec![".csv", ".json", ".js", ".yaml", ".yml"]
		);
		assert_eq!(
			registry.builtin_extensions(),
			vec![".json", ".js", ".yaml", ".yml"]
		);
	}

	#[rstest]
	fn test_clear_keeps_builtins() {
		let registry = LoaderRegistry::new();
		registry
			.register(StubLoader {
				name: "csv",
				extensions: &[".csv"],
			})
			.unwrap();
		registry.clear();
		assert!(registry.is_empty());
		assert_eq!(names(&registry.list_loaders()), vec!["json", "yaml"]);
	}

	#[rstest]
	fn test_with_builtins() {
		let registry = LoaderRegistry::with_builtins(vec![Arc::new(JsonLoader::new())]);
		assert_eq!(names(&registry.list_loaders()), vec!["json"]);
		assert_eq!(registry.builtin_extensions(), vec![".json", ".js"]);
	}

	#[rstest]
	fn test_concurrent_registration() {
		let registry = Arc::new(LoaderRegistry::new());
		let loader_names: [&'static str; 4] = ["a", "b", "c", "d"];

		std::thread::scope(|scope| {
			for name in loader_names {
				let registry = Arc::clone(&registry);
				scope.spawn(move || {
					registry
						.register(StubLoader {
							name,
							extensions: &[".dat"],
						})
						.unwrap();
					let _ = registry.list_loaders();
				});
			}
		});

		assert_eq!(registry.len(), 4);
		assert_eq!(registry.list_loaders().len(), 6);
	}

	#[rstest]
	fn test_debug_lists_names() {
		let registry = LoaderRegistry::new();
		let debug = format!("{:?}", registry);
		assert!(debug.contains("json"));
		assert!(debug.contains("yaml"));
	}
}
