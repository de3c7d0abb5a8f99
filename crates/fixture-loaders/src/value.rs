//! Decoded fixture values.
//!
//! Every loader produces a [`FixtureValue`] tree: nested mappings and
//! sequences whose leaves are strings, numbers, booleans, null, or
//! timestamps produced by date/time coercion.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::datetime::{DateTimeParser, Timestamp, coerce_mapping};

/// Mapping node of a decoded fixture, keyed by string.
pub type Mapping = IndexMap<String, FixtureValue>;

/// A decoded fixture value.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureValue {
	/// `null` / `~`.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Integer scalar.
	///
	/// Unsigned values that do not fit in an `i64` are widened to [`FixtureValue::Float`].
	Integer(i64),
	/// Floating point scalar.
	Float(f64),
	/// String scalar.
	String(String),
	/// Timestamp produced by date/time coercion.
	Timestamp(Timestamp),
	/// Ordered sequence.
	Sequence(Vec<FixtureValue>),
	/// String-keyed mapping.
	Mapping(Mapping),
}

impl FixtureValue {
	/// Returns true for [`FixtureValue::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Returns the boolean if this is a [`FixtureValue::Bool`].
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			_ => None,
		}
	}

	/// Returns the integer if this is a [`FixtureValue::Integer`].
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Integer(n) => Some(*n),
			_ => None,
		}
	}

	/// Returns the value as a float, widening integers.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Integer(n) => Some(*n as f64),
			Self::Float(n) => Some(*n),
			_ => None,
		}
	}

	/// Returns the string slice if this is a [`FixtureValue::String`].
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the timestamp if this is a [`FixtureValue::Timestamp`].
	pub fn as_timestamp(&self) -> Option<&Timestamp> {
		match self {
			Self::Timestamp(ts) => Some(ts),
			_ => None,
		}
	}

	/// Returns the elements if this is a [`FixtureValue::Sequence`].
	pub fn as_sequence(&self) -> Option<&[FixtureValue]> {
		match self {
			Self::Sequence(items) => Some(items),
			_ => None,
		}
	}

	/// Returns the entries if this is a [`FixtureValue::Mapping`].
	pub fn as_mapping(&self) -> Option<&Mapping> {
		match self {
			Self::Mapping(map) => Some(map),
			_ => None,
		}
	}

	/// Looks up `key` if this is a mapping.
	///
	/// ```
	/// # use fixture_loaders::FixtureValue;
	/// # use serde_json::json;
	/// let value = FixtureValue::from(json!({"username": "admin"}));
	/// assert_eq!(value.get("username").and_then(|v| v.as_str()), Some("admin"));
	/// assert!(value.get("email").is_none());
	/// ```
	pub fn get(&self, key: &str) -> Option<&FixtureValue> {
		self.as_mapping().and_then(|map| map.get(key))
	}

	/// Returns a short name for the variant, used in diagnostics.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Integer(_) => "integer",
			Self::Float(_) => "float",
			Self::String(_) => "string",
			Self::Timestamp(_) => "timestamp",
			Self::Sequence(_) => "sequence",
			Self::Mapping(_) => "mapping",
		}
	}
}

impl From<bool> for FixtureValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for FixtureValue {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<f64> for FixtureValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for FixtureValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}

impl From<String> for FixtureValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<Timestamp> for FixtureValue {
	fn from(value: Timestamp) -> Self {
		Self::Timestamp(value)
	}
}

impl From<Vec<FixtureValue>> for FixtureValue {
	fn from(value: Vec<FixtureValue>) -> Self {
		Self::Sequence(value)
	}
}

impl From<Mapping> for FixtureValue {
	fn from(value: Mapping) -> Self {
		Self::Mapping(value)
	}
}

impl From<serde_json::Value> for FixtureValue {
	fn from(value: serde_json::Value) -> Self {
		use serde_json::Value;

		match value {
			Value::Null => Self::Null,
			Value::Bool(b) => Self::Bool(b),
			Value::Number(n) => match n.as_i64() {
				Some(i) => Self::Integer(i),
				None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
			},
			Value::String(s) => Self::String(s),
			Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
			Value::Object(map) => {
				Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
			}
		}
	}
}

impl<'de> de::Deserialize<'de> for FixtureValue {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		ValueSeed::new(None).deserialize(deserializer)
	}
}

/// YAML merge key (`<<: *defaults`).
const MERGE_KEY: &str = "<<";

/// Deserialization seed that builds a [`FixtureValue`] and, when given a
/// parser, coerces each mapping as soon as it has been decoded.
#[derive(Clone, Copy)]
pub(crate) struct ValueSeed<'a> {
	coercion: Option<&'a dyn DateTimeParser>,
	merge_keys: bool,
}

impl<'a> ValueSeed<'a> {
	pub(crate) fn new(coercion: Option<&'a dyn DateTimeParser>) -> Self {
		Self {
			coercion,
			merge_keys: false,
		}
	}

	/// Resolves `<<` entries into their enclosing mapping.
	///
	/// Explicit keys win over merged ones, and earlier sources in a merge
	/// sequence win over later ones.
	pub(crate) fn with_merge_keys(mut self) -> Self {
		self.merge_keys = true;
		self
	}
}

fn apply_merge<E: de::Error>(mapping: &mut Mapping, source: FixtureValue) -> Result<(), E> {
	let merge_into = |mapping: &mut Mapping, source: Mapping| {
		for (key, value) in source {
			mapping.entry(key).or_insert(value);
		}
	};

	match source {
		FixtureValue::Mapping(source) => merge_into(mapping, source),
		FixtureValue::Sequence(sources) => {
			for source in sources {
				match source {
					FixtureValue::Mapping(source) => merge_into(mapping, source),
					other => {
						return Err(E::custom(format!(
							"expected a mapping in merge sequence, found {}",
							other.type_name()
						)));
					}
				}
			}
		}
		other => {
			return Err(E::custom(format!(
				"expected a mapping or sequence of mappings for merge key, found {}",
				other.type_name()
			)));
		}
	}
	Ok(())
}

impl<'de> DeserializeSeed<'de> for ValueSeed<'_> {
	type Value = FixtureValue;

	fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(self)
	}
}

impl<'de> Visitor<'de> for ValueSeed<'_> {
	type Value = FixtureValue;

	fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
		formatter.write_str("a fixture value")
	}

	fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
		Ok(FixtureValue::Bool(v))
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
		Ok(FixtureValue::Integer(v))
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
		Ok(match i64::try_from(v) {
			Ok(i) => FixtureValue::Integer(i),
			Err(_) => FixtureValue::Float(v as f64),
		})
	}

	fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
		Ok(match i64::try_from(v) {
			Ok(i) => FixtureValue::Integer(i),
			Err(_) => FixtureValue::Float(v as f64),
		})
	}

	fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
		Ok(match i64::try_from(v) {
			Ok(i) => FixtureValue::Integer(i),
			Err(_) => FixtureValue::Float(v as f64),
		})
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
		Ok(FixtureValue::Float(v))
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
		Ok(FixtureValue::String(v.to_string()))
	}

	fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
		Ok(FixtureValue::String(v))
	}

	fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
		Ok(FixtureValue::Null)
	}

	fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
		Ok(FixtureValue::Null)
	}

	fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
	where
		D: Deserializer<'de>,
	{
		self.deserialize(deserializer)
	}

	fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
	where
		A: SeqAccess<'de>,
	{
		let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
		while let Some(item) = seq.next_element_seed(self)? {
			items.push(item);
		}
		Ok(FixtureValue::Sequence(items))
	}

	fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
	where
		A: MapAccess<'de>,
	{
		let mut mapping = Mapping::with_capacity(access.size_hint().unwrap_or(0));
		while let Some(key) = access.next_key_seed(KeySeed)? {
			let value = access.next_value_seed(self)?;
			mapping.insert(key, value);
		}

		if self.merge_keys
			&& let Some(source) = mapping.shift_remove(MERGE_KEY)
		{
			apply_merge::<A::Error>(&mut mapping, source)?;
		}

		if let Some(parser) = self.coercion {
			coerce_mapping(&mut mapping, parser);
		}
		Ok(FixtureValue::Mapping(mapping))
	}
}

/// Mapping keys are always strings; YAML scalar keys of other types are
/// stringified.
struct KeySeed;

impl<'de> DeserializeSeed<'de> for KeySeed {
	type Value = String;

	fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(self)
	}
}

impl<'de> Visitor<'de> for KeySeed {
	type Value = String;

	fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
		formatter.write_str("a scalar mapping key")
	}

	fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
		Ok(v.to_string())
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
		Ok(v.to_string())
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
		Ok(v.to_string())
	}

	fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
		Ok(v.to_string())
	}

	fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
		Ok(v.to_string())
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
		Ok(v.to_string())
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
		Ok(v.to_string())
	}

	fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
		Ok(v)
	}

	fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
		Ok("null".to_string())
	}
}
