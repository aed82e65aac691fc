//! Folding presentation-layer removals back into canonical state.
//!
//! The presentation layer reports what it currently shows as a list of
//! identities, bottom to top. Only removals are trusted: identities the
//! stack does not know are ignored, order is ignored, and routes whose
//! insertion has not been acknowledged yet are not considered missing.
//! Nothing here goes through the scheduler, so nothing is re-animated.

use rustc_hash::FxHashSet;
use wayfinder_route::{Route, RouteStack, Screen};

/// Removes routes the presentation layer no longer shows.
///
/// Truncates at the lowest route that is missing from `snapshot` and not
/// listed in `unpresented`, taking everything above it along. The root is
/// never removed. Returns the removed routes, bottom first.
///
/// Applying the same snapshot twice is the same as applying it once.
pub fn reconcile<'a, S>(stack: &mut RouteStack<S>, snapshot: &[S::Id], unpresented: impl IntoIterator<Item = &'a S::Id>) -> Vec<Route<S>>
where
	S: Screen,
	S::Id: 'a,
{
	let shown: FxHashSet<&S::Id> = snapshot.iter().collect();
	let expected: FxHashSet<&S::Id> = unpresented.into_iter().collect();

	if !shown.contains(&stack.root().id()) {
		tracing::warn!(root = ?stack.root().id(), "nav.reconcile: snapshot omits the root, keeping it");
	}

	let missing = stack
		.ids()
		.enumerate()
		.skip(1)
		.find(|(_, id)| !shown.contains(id) && !expected.contains(id))
		.map(|(index, _)| index);
	let Some(index) = missing else {
		tracing::trace!(len = stack.len(), "nav.reconcile: nothing removed");
		return Vec::new();
	};

	let removed = stack.truncate(index);
	tracing::debug!(index, removed = removed.len(), len = stack.len(), "nav.reconcile");
	removed
}
