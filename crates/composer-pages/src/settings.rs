//! Settings for the render engine.
//!
//! Settings are layered: defaults, then an optional TOML file, then
//! environment overrides.
//!
//! ```toml
//! [diagnostics]
//! level = "warnings"   # errors | warnings | logs
//! ansi = false
//! console = false
//!
//! [render]
//! duplicate_references = "last-wins"   # last-wins | reject
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logging::DiagnosticLevel;

/// Environment variable overriding [`DiagnosticsSettings::level`].
pub const ENV_DIAGNOSTICS_LEVEL: &str = "COMPOSER_DIAGNOSTICS_LEVEL";

/// Environment variable overriding [`DiagnosticsSettings::ansi`].
pub const ENV_DIAGNOSTICS_ANSI: &str = "COMPOSER_DIAGNOSTICS_ANSI";

/// Errors raised while loading settings.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// The settings file could not be read.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// The settings file is not valid TOML for these settings.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// An override carried an invalid value.
	#[error("Invalid setting {key}: {reason}")]
	Invalid {
		/// The offending key.
		key: String,
		/// Why it was rejected.
		reason: String,
	},
}

/// What happens when a reference name is registered twice in one component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferencePolicy {
	/// The later element replaces the earlier one and a warning is emitted.
	#[default]
	LastWins,
	/// The second registration fails with `DuplicateReference`.
	Reject,
}

/// Diagnostics section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsSettings {
	/// Level below which warnings and logs are dropped.
	pub level: DiagnosticLevel,
	/// Colour the console category labels.
	pub ansi: bool,
	/// Also print diagnostics to stderr.
	pub console: bool,
}

/// Render section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
	/// Policy for duplicate `ref` names.
	pub duplicate_references: ReferencePolicy,
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesSettings {
	/// Diagnostics settings.
	pub diagnostics: DiagnosticsSettings,
	/// Render settings.
	pub render: RenderSettings,
}

impl PagesSettings {
	/// Parses settings from a TOML document.
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(source)?)
	}

	/// Reads settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let content = std::fs::read_to_string(path.as_ref())?;
		Self::from_toml_str(&content)
	}

	/// Applies `COMPOSER_*` environment overrides on top of these settings.
	pub fn with_env_overrides(mut self) -> Result<Self, SettingsError> {
		if let Ok(level) = std::env::var(ENV_DIAGNOSTICS_LEVEL) {
			self.diagnostics.level = level.parse().map_err(|reason| SettingsError::Invalid {
				key: ENV_DIAGNOSTICS_LEVEL.to_string(),
				reason,
			})?;
		}
		if let Ok(ansi) = std::env::var(ENV_DIAGNOSTICS_ANSI) {
			self.diagnostics.ansi = parse_flag(&ansi).ok_or_else(|| SettingsError::Invalid {
				key: ENV_DIAGNOSTICS_ANSI.to_string(),
				reason: format!("expected a boolean, got '{}'", ansi),
			})?;
		}
		Ok(self)
	}
}

fn parse_flag(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Some(true),
		"0" | "false" | "no" | "off" => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = PagesSettings::default();
		assert_eq!(settings.diagnostics.level, DiagnosticLevel::Warnings);
		assert!(!settings.diagnostics.ansi);
		assert_eq!(
			settings.render.duplicate_references,
			ReferencePolicy::LastWins
		);
	}

	#[rstest]
	fn test_from_toml_str_partial() {
		let settings = PagesSettings::from_toml_str(
			r#"
			[render]
			duplicate_references = "reject"
			"#,
		)
		.unwrap();
		assert_eq!(settings.render.duplicate_references, ReferencePolicy::Reject);
		assert_eq!(settings.diagnostics, DiagnosticsSettings::default());
	}

	#[rstest]
	fn test_from_toml_str_rejects_unknown_level() {
		let result = PagesSettings::from_toml_str("[diagnostics]\nlevel = \"loud\"\n");
		assert!(matches!(result, Err(SettingsError::Toml(_))));
	}

	#[rstest]
	#[case("1", Some(true))]
	#[case("On", Some(true))]
	#[case("false", Some(false))]
	#[case("maybe", None)]
	fn test_parse_flag(#[case] input: &str, #[case] expected: Option<bool>) {
		assert_eq!(parse_flag(input), expected);
	}
}
