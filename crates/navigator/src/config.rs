//! Navigator configuration.
//!
//! Everything has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! addressing = "identified"      # or "positional"
//! transitions = "sequenced"      # or "simultaneous"
//! mailbox_capacity = 128
//! max_queued_requests = 64
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::addressing::AddressingMode;
use crate::scheduler::TransitionPolicy;

/// Errors that can occur when loading a [`NavigatorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or an unknown key.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A value parsed but is out of range.
	#[error("invalid navigator config: {0}")]
	Invalid(String),
}

/// Tunables for one navigator instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigatorConfig {
	pub addressing: AddressingMode,
	pub transitions: TransitionPolicy,
	/// Bounded command mailbox size. Must be non-zero.
	pub mailbox_capacity: usize,
	/// Requests allowed to wait behind an in-flight transition.
	pub max_queued_requests: usize,
}

impl Default for NavigatorConfig {
	fn default() -> Self {
		Self {
			addressing: AddressingMode::default(),
			transitions: TransitionPolicy::default(),
			mailbox_capacity: 128,
			max_queued_requests: 64,
		}
	}
}

impl NavigatorConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a TOML file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.mailbox_capacity == 0 {
			return Err(ConfigError::Invalid("mailbox_capacity must be > 0".into()));
		}
		Ok(())
	}

	#[must_use]
	pub fn addressing(mut self, addressing: AddressingMode) -> Self {
		self.addressing = addressing;
		self
	}

	#[must_use]
	pub fn transitions(mut self, transitions: TransitionPolicy) -> Self {
		self.transitions = transitions;
		self
	}

	/// Sets the mailbox size.
	///
	/// # Panics
	///
	/// Panics if `capacity` is zero.
	#[must_use]
	pub fn mailbox_capacity(mut self, capacity: usize) -> Self {
		assert!(capacity > 0, "mailbox capacity must be > 0");
		self.mailbox_capacity = capacity;
		self
	}

	#[must_use]
	pub fn max_queued_requests(mut self, max: usize) -> Self {
		self.max_queued_requests = max;
		self
	}
}
