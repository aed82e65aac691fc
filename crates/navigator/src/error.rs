//! Error types for the navigator runtime.

use thiserror::Error;
use wayfinder_route::StackError;

use crate::config::ConfigError;

/// Errors surfaced to callers of the navigator.
///
/// Stale actions, unmatched `go_back_to` predicates and mid-sequence drift
/// are not errors and never appear here.
#[derive(Debug, Error)]
pub enum NavigatorError {
	/// A stack operation violated a stack invariant and was rejected.
	#[error("navigation rejected: {0}")]
	Stack(#[from] StackError),

	/// Too many navigation requests are waiting behind an in-flight transition.
	#[error("navigation queue is full ({capacity} pending requests)")]
	QueueFull {
		/// Configured queue bound.
		capacity: usize,
	},

	/// The navigator task has stopped.
	#[error("navigator is shut down")]
	Closed,

	/// Configuration could not be loaded.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Result type for navigator operations.
pub type Result<T> = std::result::Result<T, NavigatorError>;
