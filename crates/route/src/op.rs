use std::fmt;
use std::sync::Arc;

use crate::route::{DismissHook, Route};

/// Screen predicate used by [`StackOp::GoBackTo`].
pub type Predicate<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;

/// A stack mutation expressed as a value.
///
/// Transition functions return these instead of touching the stack; the
/// navigator decides when and how each one is realised.
pub enum StackOp<S> {
	/// Append a pushed route.
	Push(S),
	/// Append a sheet.
	PresentSheet {
		screen: S,
		embedded: bool,
		on_dismiss: Option<DismissHook>,
	},
	/// Append a full-screen cover.
	PresentCover {
		screen: S,
		embedded: bool,
		on_dismiss: Option<DismissHook>,
	},
	/// Remove up to this many routes from the top, never the root.
	GoBack(usize),
	/// Remove routes above the topmost screen matching the predicate.
	GoBackTo(Predicate<S>),
	/// Remove everything except the root.
	GoBackToRoot,
	/// Remove the top route if it is a sheet or cover.
	Dismiss,
	/// Remove every removable route, regardless of style.
	DismissAll,
	/// Replace the route with the same identity in place, or append it.
	UpdateOrAppend(Route<S>),
}

impl<S> StackOp<S> {
	/// Builds a [`StackOp::GoBackTo`] from a closure.
	pub fn go_back_to(pred: impl Fn(&S) -> bool + Send + Sync + 'static) -> Self {
		Self::GoBackTo(Arc::new(pred))
	}

	/// Builds a plain sheet presentation.
	pub fn sheet(screen: S, embedded: bool) -> Self {
		Self::PresentSheet {
			screen,
			embedded,
			on_dismiss: None,
		}
	}

	/// Builds a plain cover presentation.
	pub fn cover(screen: S, embedded: bool) -> Self {
		Self::PresentCover {
			screen,
			embedded,
			on_dismiss: None,
		}
	}

	/// Stable operation name for logs.
	pub const fn name(&self) -> &'static str {
		match self {
			Self::Push(_) => "push",
			Self::PresentSheet { .. } => "present_sheet",
			Self::PresentCover { .. } => "present_cover",
			Self::GoBack(_) => "go_back",
			Self::GoBackTo(_) => "go_back_to",
			Self::GoBackToRoot => "go_back_to_root",
			Self::Dismiss => "dismiss",
			Self::DismissAll => "dismiss_all",
			Self::UpdateOrAppend(_) => "update_or_append",
		}
	}
}

impl<S: Clone> Clone for StackOp<S> {
	fn clone(&self) -> Self {
		match self {
			Self::Push(screen) => Self::Push(screen.clone()),
			Self::PresentSheet {
				screen,
				embedded,
				on_dismiss,
			} => Self::PresentSheet {
				screen: screen.clone(),
				embedded: *embedded,
				on_dismiss: on_dismiss.clone(),
			},
			Self::PresentCover {
				screen,
				embedded,
				on_dismiss,
			} => Self::PresentCover {
				screen: screen.clone(),
				embedded: *embedded,
				on_dismiss: on_dismiss.clone(),
			},
			Self::GoBack(count) => Self::GoBack(*count),
			Self::GoBackTo(pred) => Self::GoBackTo(Arc::clone(pred)),
			Self::GoBackToRoot => Self::GoBackToRoot,
			Self::Dismiss => Self::Dismiss,
			Self::DismissAll => Self::DismissAll,
			Self::UpdateOrAppend(route) => Self::UpdateOrAppend(route.clone()),
		}
	}
}

impl<S: fmt::Debug> fmt::Debug for StackOp<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Push(screen) => f.debug_tuple("Push").field(screen).finish(),
			Self::PresentSheet { screen, embedded, .. } => f
				.debug_struct("PresentSheet")
				.field("screen", screen)
				.field("embedded", embedded)
				.finish_non_exhaustive(),
			Self::PresentCover { screen, embedded, .. } => f
				.debug_struct("PresentCover")
				.field("screen", screen)
				.field("embedded", embedded)
				.finish_non_exhaustive(),
			Self::GoBack(count) => f.debug_tuple("GoBack").field(count).finish(),
			Self::GoBackTo(_) => f.write_str("GoBackTo(..)"),
			Self::GoBackToRoot => f.write_str("GoBackToRoot"),
			Self::Dismiss => f.write_str("Dismiss"),
			Self::DismissAll => f.write_str("DismissAll"),
			Self::UpdateOrAppend(route) => f.debug_tuple("UpdateOrAppend").field(route).finish(),
		}
	}
}

/// What a [`StackOp`] did to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpOutcome {
	/// The stack changed.
	Changed,
	/// The operation applied but had nothing to do.
	Unchanged,
	/// `GoBackTo` found no matching screen; the stack is untouched.
	NoMatch,
}
