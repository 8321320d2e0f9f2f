//! Leveled diagnostics for the render engine.
//!
//! Diagnostics come in three severities:
//!
//! | Severity | Emitted when level is | Effect |
//! |----------|-----------------------|--------|
//! | `Error`  | always                | reported, then returned to the caller as `Err` |
//! | `Warning`| `Warnings` or `Logs`  | reported, execution continues |
//! | `Log`    | `Logs`                | reported, execution continues |
//!
//! Records are fanned out to [`DiagnosticHandler`] sinks. The default sink
//! forwards to `tracing`; [`ConsoleHandler`] prints the classic
//! `[ Warning ] - message` line and [`MemoryHandler`] keeps records around
//! for inspection.
//!
//! ## Example
//!
//! ```ignore
//! use composer_pages::logging::{Diagnostics, DiagnosticLevel, MemoryHandler};
//! use std::rc::Rc;
//!
//! let memory = Rc::new(MemoryHandler::new());
//! let diagnostics = Diagnostics::new(DiagnosticLevel::Warnings).with_handler(memory.clone());
//! diagnostics.warn("You are overriding the element reference '{0}'.", &[&"label"]);
//! assert_eq!(memory.warnings(), 1);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::ComponentError;
use crate::settings::DiagnosticsSettings;

/// Target used for every `tracing` event emitted by [`TracingHandler`].
pub const DIAGNOSTICS_TARGET: &str = "composer::diagnostics";

/// How chatty diagnostics are.
#[derive(
	Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
	/// Only fatal errors.
	Errors,
	/// Errors and advisory warnings.
	#[default]
	Warnings,
	/// Everything, including informational logs.
	Logs,
}

impl std::str::FromStr for DiagnosticLevel {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"errors" | "error" => Ok(Self::Errors),
			"warnings" | "warning" | "warn" => Ok(Self::Warnings),
			"logs" | "log" => Ok(Self::Logs),
			other => Err(format!("unknown diagnostic level '{}'", other)),
		}
	}
}

/// Severity of a single diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
	/// Fatal contract violation.
	Error,
	/// Likely programmer error; execution continues.
	Warning,
	/// Informational.
	Log,
}

impl Severity {
	/// Lowest [`DiagnosticLevel`] at which this severity is emitted.
	pub fn required_level(self) -> DiagnosticLevel {
		match self {
			Severity::Error => DiagnosticLevel::Errors,
			Severity::Warning => DiagnosticLevel::Warnings,
			Severity::Log => DiagnosticLevel::Logs,
		}
	}

	/// Category label printed by the console sink.
	pub fn label(self) -> &'static str {
		match self {
			Severity::Error => "Error",
			Severity::Warning => "Warning",
			Severity::Log => "Log",
		}
	}

	fn style(self) -> Style {
		match self {
			Severity::Error => Style::Red,
			Severity::Warning => Style::Yellow,
			Severity::Log => Style::Magenta,
		}
	}
}

/// One emitted diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRecord {
	/// Severity of the record.
	pub severity: Severity,
	/// Fully substituted message.
	pub message: String,
}

impl DiagnosticRecord {
	/// Creates a record.
	pub fn new(severity: Severity, message: impl Into<String>) -> Self {
		Self {
			severity,
			message: message.into(),
		}
	}
}

/// A sink receiving emitted diagnostics.
pub trait DiagnosticHandler {
	/// Handles one record.
	fn handle(&self, record: &DiagnosticRecord);
}

/// Forwards records to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHandler;

impl DiagnosticHandler for TracingHandler {
	fn handle(&self, record: &DiagnosticRecord) {
		match record.severity {
			Severity::Error => tracing::error!(target: DIAGNOSTICS_TARGET, "{}", record.message),
			Severity::Warning => tracing::warn!(target: DIAGNOSTICS_TARGET, "{}", record.message),
			Severity::Log => tracing::info!(target: DIAGNOSTICS_TARGET, "{}", record.message),
		}
	}
}

/// Prints `[ Category ] - message` lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleHandler {
	ansi: bool,
}

impl ConsoleHandler {
	/// Creates a console sink; `ansi` enables coloured category labels.
	pub fn new(ansi: bool) -> Self {
		Self { ansi }
	}

	/// Formats a record the way it is printed.
	pub fn format(&self, record: &DiagnosticRecord) -> String {
		let category = paint(record.severity.label(), record.severity.style(), self.ansi);
		format!("[ {} ] - {}", category, record.message)
	}
}

impl DiagnosticHandler for ConsoleHandler {
	fn handle(&self, record: &DiagnosticRecord) {
		eprintln!("{}", self.format(record));
	}
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemoryHandler {
	records: RefCell<Vec<DiagnosticRecord>>,
}

impl MemoryHandler {
	/// Creates an empty sink.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a copy of the collected records.
	pub fn records(&self) -> Vec<DiagnosticRecord> {
		self.records.borrow().clone()
	}

	/// Number of records with the given severity.
	pub fn count(&self, severity: Severity) -> usize {
		self.records
			.borrow()
			.iter()
			.filter(|r| r.severity == severity)
			.count()
	}

	/// Number of warnings collected.
	pub fn warnings(&self) -> usize {
		self.count(Severity::Warning)
	}

	/// Drops all collected records.
	pub fn clear(&self) {
		self.records.borrow_mut().clear();
	}
}

impl DiagnosticHandler for MemoryHandler {
	fn handle(&self, record: &DiagnosticRecord) {
		self.records.borrow_mut().push(record.clone());
	}
}

/// Leveled diagnostics fanned out to a list of sinks.
#[derive(Clone)]
pub struct Diagnostics {
	level: DiagnosticLevel,
	handlers: Vec<Rc<dyn DiagnosticHandler>>,
}

impl fmt::Debug for Diagnostics {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Diagnostics")
			.field("level", &self.level)
			.field("handlers", &self.handlers.len())
			.finish()
	}
}

impl Default for Diagnostics {
	fn default() -> Self {
		Self::new(DiagnosticLevel::default())
	}
}

impl Diagnostics {
	/// Creates diagnostics at `level` that forward to `tracing`.
	pub fn new(level: DiagnosticLevel) -> Self {
		Self {
			level,
			handlers: vec![Rc::new(TracingHandler)],
		}
	}

	/// Creates diagnostics with no sinks at all.
	pub fn silent(level: DiagnosticLevel) -> Self {
		Self {
			level,
			handlers: Vec::new(),
		}
	}

	/// Builds diagnostics from settings.
	pub fn from_settings(settings: &DiagnosticsSettings) -> Self {
		let mut diagnostics = Self::new(settings.level);
		if settings.console {
			diagnostics = diagnostics.with_handler(Rc::new(ConsoleHandler::new(settings.ansi)));
		}
		diagnostics
	}

	/// Adds a sink.
	pub fn with_handler(mut self, handler: Rc<dyn DiagnosticHandler>) -> Self {
		self.handlers.push(handler);
		self
	}

	/// Current level.
	pub fn level(&self) -> DiagnosticLevel {
		self.level
	}

	/// Changes the level.
	pub fn set_level(&mut self, level: DiagnosticLevel) {
		self.level = level;
	}

	/// Whether a record of this severity would be emitted.
	pub fn enabled(&self, severity: Severity) -> bool {
		self.level >= severity.required_level()
	}

	/// Reports a fatal error and hands it back for `Err(..)`.
	pub fn error(&self, err: ComponentError) -> ComponentError {
		self.emit(Severity::Error, err.to_string());
		err
	}

	/// Reports an advisory warning.
	pub fn warn(&self, template: &str, args: &[&dyn fmt::Display]) {
		if self.enabled(Severity::Warning) {
			self.emit(Severity::Warning, format_message(template, args));
		}
	}

	/// Reports an informational message.
	pub fn log(&self, template: &str, args: &[&dyn fmt::Display]) {
		if self.enabled(Severity::Log) {
			self.emit(Severity::Log, format_message(template, args));
		}
	}

	fn emit(&self, severity: Severity, message: String) {
		let record = DiagnosticRecord::new(severity, message);
		for handler in &self.handlers {
			handler.handle(&record);
		}
	}
}

/// Substitutes positional `{0}`, `{1}`, ... placeholders.
///
/// Every occurrence of a placeholder is replaced. Placeholders without a
/// matching argument are left untouched.
pub fn format_message(template: &str, args: &[&dyn fmt::Display]) -> String {
	let mut message = template.to_string();
	for (index, arg) in args.iter().enumerate() {
		let placeholder = format!("{{{}}}", index);
		if message.contains(&placeholder) {
			message = message.replace(&placeholder, &arg.to_string());
		}
	}
	message
}

/// ANSI text styles used by the console sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
	/// Bold text.
	Bold,
	/// Red foreground.
	Red,
	/// Yellow foreground.
	Yellow,
	/// Magenta foreground.
	Magenta,
	/// Light black (grey) foreground.
	LightBlack,
}

impl Style {
	fn codes(self) -> (&'static str, &'static str) {
		match self {
			Style::Bold => ("\x1B[1m", "\x1B[22m"),
			Style::Red => ("\x1B[31m", "\x1B[39m"),
			Style::Yellow => ("\x1B[33m", "\x1B[39m"),
			Style::Magenta => ("\x1B[35m", "\x1B[39m"),
			Style::LightBlack => ("\x1B[90m", "\x1B[39m"),
		}
	}
}

/// Wraps `text` in the escape codes of `style` when `enabled`.
pub fn paint(text: &str, style: Style, enabled: bool) -> String {
	if !enabled {
		return text.to_string();
	}
	let (open, close) = style.codes();
	format!("{}{}{}", open, text, close)
}
