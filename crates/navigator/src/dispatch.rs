//! Delivery of addressed actions to per-screen transition functions.

use std::fmt;

use wayfinder_route::{RouteStack, Screen, StackError};

use crate::addressing::RouteAction;
use crate::effect::Effects;
use crate::reducer::Reducer;

/// Outcome of [`dispatch`].
pub enum Dispatch<S, A> {
	/// The action reached the route now at `index`.
	Delivered { index: usize, effects: Effects<S, A> },
	/// The addressed route is gone; the action was discarded.
	Dropped,
}

impl<S, A> Dispatch<S, A> {
	pub fn is_dropped(&self) -> bool {
		matches!(self, Self::Dropped)
	}
}

impl<S: fmt::Debug, A: fmt::Debug> fmt::Debug for Dispatch<S, A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Delivered { index, effects } => f
				.debug_struct("Delivered")
				.field("index", index)
				.field("effects", effects)
				.finish(),
			Self::Dropped => f.write_str("Dropped"),
		}
	}
}

/// Resolves `action`'s address and runs `reducer` on that route's screen.
///
/// The reducer works on a copy; the result is written back in place only if
/// it kept the screen's identity. Unresolvable addresses are stale, not
/// errors.
pub fn dispatch<S, A, R>(stack: &mut RouteStack<S>, reducer: &R, action: &RouteAction<S::Id, A>) -> Result<Dispatch<S, A>, StackError>
where
	S: Screen,
	R: Reducer<Screen = S, Action = A> + ?Sized,
{
	let resolved = action.address.resolve(stack).and_then(|index| stack.get(index).map(|route| (index, route)));
	let Some((index, route)) = resolved else {
		tracing::debug!(address = ?action.address, len = stack.len(), "nav.dispatch: stale action dropped");
		return Ok(Dispatch::Dropped);
	};

	let mut screen = route.screen.clone();
	let effects = reducer.reduce(&mut screen, &action.action);
	stack.replace_screen(index, screen)?;
	tracing::trace!(index, effects = effects.len(), "nav.dispatch");
	Ok(Dispatch::Delivered { index, effects })
}
