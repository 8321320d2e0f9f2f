//! A small compound selector matcher.
//!
//! Supported: a tag name, `#id`, `.class`, `[attr]` and `[attr="value"]`,
//! combined without whitespace (`div.box[data-ref="label"]`). Combinators
//! are not supported.
//!
//! Selector crates match against their own DOM types, so this one works on
//! [`DomElement`] directly.

use super::node::DomElement;

/// Errors raised while parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
	/// The selector was empty.
	#[error("Empty selector")]
	Empty,

	/// The selector used syntax this matcher does not understand.
	#[error("Unsupported selector '{selector}': {reason}")]
	Unsupported {
		/// The full selector.
		selector: String,
		/// What went wrong.
		reason: String,
	},
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
	Tag(String),
	Id(String),
	Class(String),
	Has(String),
	Equals(String, String),
}

/// A parsed compound selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
	parts: Vec<Part>,
}

impl Selector {
	/// Parses a compound selector.
	pub fn parse(source: &str) -> Result<Self, SelectorError> {
		let source = source.trim();
		if source.is_empty() {
			return Err(SelectorError::Empty);
		}
		let unsupported = |reason: &str| SelectorError::Unsupported {
			selector: source.to_string(),
			reason: reason.to_string(),
		};

		let mut parts = Vec::new();
		let mut rest = source;
		while let Some(first) = rest.chars().next() {
			match first {
				'#' | '.' => {
					let (name, tail) = split_name(&rest[1..]);
					if name.is_empty() {
						return Err(unsupported("expected a name"));
					}
					parts.push(if first == '#' {
						Part::Id(name.to_string())
					} else {
						Part::Class(name.to_string())
					});
					rest = tail;
				}
				'[' => {
					let end = rest.find(']').ok_or_else(|| unsupported("unclosed '['"))?;
					parts.push(parse_attribute(&rest[1..end]).ok_or_else(|| unsupported("bad attribute"))?);
					rest = &rest[end + 1..];
				}
				c if c.is_ascii_alphabetic() || c == '*' => {
					if !parts.is_empty() {
						return Err(unsupported("tag name must come first"));
					}
					if c == '*' {
						rest = &rest[1..];
						continue;
					}
					let (name, tail) = split_name(rest);
					parts.push(Part::Tag(name.to_ascii_lowercase()));
					rest = tail;
				}
				_ => return Err(unsupported("combinators are not supported")),
			}
		}
		Ok(Self { parts })
	}

	/// Selector matching `[name="value"]`.
	pub fn attribute_equals(name: &str, value: &str) -> Self {
		Self {
			parts: vec![Part::Equals(name.to_string(), value.to_string())],
		}
	}

	/// Selector matching `#id`.
	pub fn id(id: &str) -> Self {
		Self {
			parts: vec![Part::Id(id.to_string())],
		}
	}

	/// Whether `element` matches every part of this selector.
	pub fn matches(&self, element: &DomElement) -> bool {
		self.parts.iter().all(|part| match part {
			Part::Tag(tag) => element.tag_name().eq_ignore_ascii_case(tag),
			Part::Id(id) => element.get_attribute("id").as_deref() == Some(id.as_str()),
			Part::Class(class) => element
				.get_attribute("class")
				.is_some_and(|value| value.split_ascii_whitespace().any(|c| c == class)),
			Part::Has(name) => element.has_attribute(name),
			Part::Equals(name, value) => {
				element.get_attribute(name).as_deref() == Some(value.as_str())
			}
		})
	}
}

fn split_name(input: &str) -> (&str, &str) {
	let end = input
		.find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
		.unwrap_or(input.len());
	input.split_at(end)
}

fn parse_attribute(inner: &str) -> Option<Part> {
	match inner.split_once('=') {
		None => {
			let name = inner.trim();
			(!name.is_empty()).then(|| Part::Has(name.to_string()))
		}
		Some((name, value)) => {
			let name = name.trim();
			let value = value.trim();
			let value = value
				.strip_prefix('"')
				.and_then(|v| v.strip_suffix('"'))
				.or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
				.unwrap_or(value);
			(!name.is_empty()).then(|| Part::Equals(name.to_string(), value.to_string()))
		}
	}
}
