//! Component and element properties.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single property value.
///
/// Only [`PropValue::Str`] and [`PropValue::Bool`] are representable as
/// markup attributes. Numbers and JSON values reach components through
/// their props but are never emitted by a render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
	/// A boolean attribute.
	Bool(bool),
	/// A number.
	Number(f64),
	/// A string attribute.
	Str(String),
	/// Any other JSON value.
	Json(serde_json::Value),
}

impl PropValue {
	/// Returns the string value.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the boolean value.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			_ => None,
		}
	}

	/// Returns the numeric value.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			Self::Number(n) => Some(*n),
			_ => None,
		}
	}

	/// Converts back into JSON.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Self::Bool(b) => serde_json::Value::Bool(*b),
			Self::Number(n) => serde_json::Number::from_f64(*n)
				.map(serde_json::Value::Number)
				.unwrap_or(serde_json::Value::Null),
			Self::Str(s) => serde_json::Value::String(s.clone()),
			Self::Json(v) => v.clone(),
		}
	}
}

impl From<&str> for PropValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_string())
	}
}

impl From<String> for PropValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<bool> for PropValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f64> for PropValue {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<i32> for PropValue {
	fn from(value: i32) -> Self {
		Self::Number(f64::from(value))
	}
}

impl From<serde_json::Value> for PropValue {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Bool(b) => Self::Bool(b),
			serde_json::Value::String(s) => Self::Str(s),
			serde_json::Value::Number(n) => match n.as_f64() {
				Some(f) => Self::Number(f),
				None => Self::Json(serde_json::Value::Number(n)),
			},
			other => Self::Json(other),
		}
	}
}

impl fmt::Display for PropValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(b) => write!(f, "{}", b),
			Self::Number(n) => write!(f, "{}", n),
			Self::Str(s) => f.write_str(s),
			Self::Json(v) => write!(f, "{}", v),
		}
	}
}

/// An ordered mapping from property name to value.
///
/// Insertion order is kept, since it decides attribute order in rendered
/// markup. Inserting an existing name replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
	entries: Vec<(String, PropValue)>,
}

impl Props {
	/// Creates empty props.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates props holding only an `id`.
	pub fn with_id(id: impl Into<String>) -> Self {
		Self::new().with("id", id.into())
	}

	/// Builder-style insert.
	pub fn with(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
		self.insert(name, value);
		self
	}

	/// Inserts a value and returns the previous one.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Option<PropValue> {
		let name = name.into();
		let value = value.into();
		match self.entries.iter_mut().find(|(n, _)| *n == name) {
			Some((_, existing)) => Some(std::mem::replace(existing, value)),
			None => {
				self.entries.push((name, value));
				None
			}
		}
	}

	/// Removes a value.
	pub fn remove(&mut self, name: &str) -> Option<PropValue> {
		let index = self.entries.iter().position(|(n, _)| n == name)?;
		Some(self.entries.remove(index).1)
	}

	/// Looks a value up by name.
	pub fn get(&self, name: &str) -> Option<&PropValue> {
		self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
	}

	/// String value of `name`.
	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.get(name).and_then(PropValue::as_str)
	}

	/// Boolean value of `name`.
	pub fn get_bool(&self, name: &str) -> Option<bool> {
		self.get(name).and_then(PropValue::as_bool)
	}

	/// Numeric value of `name`.
	pub fn get_number(&self, name: &str) -> Option<f64> {
		self.get(name).and_then(PropValue::as_number)
	}

	/// The `id` prop, when it is a string.
	pub fn id(&self) -> Option<&str> {
		self.get_str("id")
	}

	/// Whether `name` is present.
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
		self.entries.iter().map(|(n, v)| (n.as_str(), v))
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether there are no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Builds props from a JSON object. Returns `None` for other values.
	pub fn from_json(value: serde_json::Value) -> Option<Self> {
		match value {
			serde_json::Value::Object(map) => Some(map.into_iter().collect()),
			_ => None,
		}
	}

	/// Converts the props into a JSON object.
	pub fn to_json(&self) -> serde_json::Value {
		serde_json::Value::Object(
			self.entries
				.iter()
				.map(|(n, v)| (n.clone(), v.to_json()))
				.collect(),
		)
	}
}

impl<K, V> FromIterator<(K, V)> for Props
where
	K: Into<String>,
	V: Into<PropValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut props = Self::new();
		for (name, value) in iter {
			props.insert(name, value);
		}
		props
	}
}
