//! The request handed to [`Component::fetch`](super::Component::fetch).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// What the router knows about the navigation that triggered a fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
	/// Requested path.
	pub path: String,
	/// Route parameters extracted by the router.
	#[serde(default)]
	pub params: HashMap<String, String>,
	/// Query string parameters.
	#[serde(default)]
	pub query: HashMap<String, String>,
}

impl FetchRequest {
	/// Creates a request for `path` with no parameters.
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			..Self::default()
		}
	}

	/// Adds a route parameter.
	pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(name.into(), value.into());
		self
	}

	/// Adds a query parameter.
	pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.insert(name.into(), value.into());
		self
	}

	/// Route parameter by name.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	/// Query parameter by name.
	pub fn query_value(&self, name: &str) -> Option<&str> {
		self.query.get(name).map(String::as_str)
	}
}
