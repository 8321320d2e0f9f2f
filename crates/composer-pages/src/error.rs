//! Error types for composer-pages.
//!
//! Every fatal diagnostic raised by the render engine surfaces as a
//! [`ComponentError`]. Callers propagate it with `?`; nothing in the engine
//! retries a failed bind, since a failure means the server markup and the
//! client view disagree.

use crate::dom::SelectorError;

/// Convenience alias used throughout the crate.
pub type Result<T, E = ComponentError> = std::result::Result<T, E>;

/// Fatal errors raised while constructing, rendering or binding components.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComponentError {
	/// A component was constructed without an `id` prop.
	#[error("You must define an id for your component {component}")]
	MissingId {
		/// Name of the component type.
		component: String,
	},

	/// The root element of a component could not be found in the document.
	#[error("Could not bind root element '{id}'.")]
	RootNotFound {
		/// The component id that was looked up.
		id: String,
	},

	/// A `data-ref` element could not be found under the component root.
	#[error("Could not bind referenced element '{reference}'.")]
	ReferenceNotFound {
		/// The reference name.
		reference: String,
	},

	/// A reference name was registered twice under the strict policy.
	#[error("Element reference '{reference}' is already registered.")]
	DuplicateReference {
		/// The reference name.
		reference: String,
	},

	/// Server markup could not be parsed into a document.
	#[error("Failed to parse markup: {0}")]
	Markup(String),

	/// A selector handed to the DOM adapter was malformed.
	#[error(transparent)]
	Selector(#[from] SelectorError),

	/// A user lifecycle hook reported a failure.
	#[error("Lifecycle hook of component {component} failed: {message}")]
	Hook {
		/// Name of the component type.
		component: String,
		/// Message supplied by the hook.
		message: String,
	},
}

impl ComponentError {
	/// Builds a [`ComponentError::Hook`] for the given component.
	pub fn hook(component: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Hook {
			component: component.into(),
			message: message.into(),
		}
	}

	/// Returns `true` for errors caused by server markup that does not match
	/// the client view.
	pub fn is_markup_mismatch(&self) -> bool {
		matches!(
			self,
			Self::RootNotFound { .. } | Self::ReferenceNotFound { .. } | Self::Markup(_)
		)
	}
}
