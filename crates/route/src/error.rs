use thiserror::Error;

/// Rejected stack mutations.
///
/// Every variant is reported before the stack is touched, so the prior state
/// is always intact. Except for [`StackError::StepMismatch`], which the
/// scheduler treats as drift, these indicate a coordinator bug rather than a
/// runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
	/// A stack was built from no routes at all.
	#[error("route stack must contain a root route")]
	Empty,

	/// Index 0 holds something other than a root route.
	#[error("route at index 0 must use root presentation")]
	MissingRoot,

	/// A root presentation appeared above index 0.
	#[error("root presentation is only valid at index 0, found at index {index}")]
	MisplacedRoot {
		/// Offending position.
		index: usize,
	},

	/// The identity is already on the stack.
	#[error("screen {id} is already on the stack at index {index}")]
	DuplicateId {
		/// Debug rendering of the identity.
		id: String,
		/// Position of the existing route.
		index: usize,
	},

	/// A transition function changed the identity of the screen it owns.
	#[error("screen identity changed from {before} to {after} while on the stack")]
	IdentityChanged {
		/// Identity before the transition.
		before: String,
		/// Identity the transition produced.
		after: String,
	},

	/// A positional access past the end of the stack.
	#[error("route index {index} is out of bounds for a stack of {len}")]
	OutOfBounds {
		/// Requested position.
		index: usize,
		/// Stack length at the time.
		len: usize,
	},

	/// Two stacks being diffed do not share a root.
	#[error("target root {target} differs from live root {current}")]
	RootMismatch {
		/// Live root identity.
		current: String,
		/// Target root identity.
		target: String,
	},

	/// A primitive step no longer matches the live stack.
	#[error("step {step} does not match the live stack")]
	StepMismatch {
		/// Debug rendering of the step.
		step: String,
	},
}

impl StackError {
	pub(crate) fn duplicate(id: &impl std::fmt::Debug, index: usize) -> Self {
		Self::DuplicateId {
			id: format!("{id:?}"),
			index,
		}
	}

	pub(crate) fn mismatch(step: &impl std::fmt::Debug) -> Self {
		Self::StepMismatch {
			step: format!("{step:?}"),
		}
	}

	/// Returns true for invariant violations, false for drift.
	pub fn is_invariant_violation(&self) -> bool {
		!matches!(self, Self::StepMismatch { .. })
	}
}

/// Result type for stack operations.
pub type Result<T> = std::result::Result<T, StackError>;
