//! Declarative results of a transition function.

use std::fmt;
use std::time::Duration;

use wayfinder_route::StackOp;

/// One follow-up requested by a transition function.
pub enum Effect<S, A> {
	/// Change the route stack.
	Navigate(StackOp<S>),
	/// Deliver `action` back to the originating route after `after`.
	///
	/// Dropped like any stale action if the route is gone by then.
	Send { action: A, after: Duration },
}

impl<S: fmt::Debug, A: fmt::Debug> fmt::Debug for Effect<S, A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Navigate(op) => f.debug_tuple("Navigate").field(op).finish(),
			Self::Send { action, after } => f.debug_struct("Send").field("action", action).field("after", after).finish(),
		}
	}
}

/// Ordered effects returned alongside a state transition.
pub struct Effects<S, A>(Vec<Effect<S, A>>);

impl<S, A> Effects<S, A> {
	/// No follow-up.
	pub fn none() -> Self {
		Self(Vec::new())
	}

	/// A single navigation request.
	pub fn navigate(op: StackOp<S>) -> Self {
		Self(vec![Effect::Navigate(op)])
	}

	/// A single delayed action.
	pub fn send_after(action: A, after: Duration) -> Self {
		Self(vec![Effect::Send { action, after }])
	}

	/// Appends an effect.
	#[must_use]
	pub fn with(mut self, effect: Effect<S, A>) -> Self {
		self.0.push(effect);
		self
	}

	/// Appends all effects of `other`, keeping order.
	pub fn merge(&mut self, other: Self) {
		self.0.extend(other.0);
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Effect<S, A>> {
		self.0.iter()
	}
}

impl<S, A> Default for Effects<S, A> {
	fn default() -> Self {
		Self::none()
	}
}

impl<S, A> IntoIterator for Effects<S, A> {
	type Item = Effect<S, A>;
	type IntoIter = std::vec::IntoIter<Effect<S, A>>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<S, A> FromIterator<Effect<S, A>> for Effects<S, A> {
	fn from_iter<I: IntoIterator<Item = Effect<S, A>>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl<S: fmt::Debug, A: fmt::Debug> fmt::Debug for Effects<S, A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}
