use wayfinder_route::{Route, RouteStack, Screen, StackError, StackOp, StepKind};

use crate::addressing::RouteAction;
use crate::dispatch::dispatch;
use crate::effect::Effects;
use crate::reconcile::reconcile;
use crate::reducer::from_fn;
use crate::scheduler::{TransitionPolicy, TransitionScheduler};

#[derive(Debug, Clone, PartialEq)]
struct Slot {
	id: u8,
	hits: u8,
}

impl Screen for Slot {
	type Id = u8;

	fn id(&self) -> u8 {
		self.id
	}
}

fn slot(id: u8) -> Slot {
	Slot { id, hits: 0 }
}

fn tall() -> RouteStack<Slot> {
	RouteStack::from_routes(vec![
		Route::root(slot(0), true),
		Route::push(slot(1)),
		Route::cover(slot(2), true, None),
		Route::push(slot(3)),
		Route::sheet(slot(4), false, None),
	])
	.unwrap()
}

/// Must drop actions whose target is gone without touching any route.
///
/// - Enforced in: `dispatch`, `Address::resolve`
/// - Failure symptom: A late action lands on whichever screen slid into the
///   vacated position and corrupts its state.
#[cfg_attr(test, test)]
pub(crate) fn test_stale_action_mutates_nothing() {
	let reducer = from_fn(|slot: &mut Slot, _: &()| {
		slot.hits += 1;
		Effects::<Slot, ()>::none()
	});
	let mut stack = tall();
	stack.go_back(2);
	let before = stack.clone();

	assert!(dispatch(&mut stack, &reducer, &RouteAction::at_index(4, ())).unwrap().is_dropped());
	assert!(dispatch(&mut stack, &reducer, &RouteAction::at_id(4, ())).unwrap().is_dropped());
	assert_eq!(stack, before);
}

/// Must not let a transition function change the identity of its screen.
///
/// - Enforced in: `dispatch`, `RouteStack::replace_screen`
/// - Failure symptom: The identity index points at a screen that no longer
///   carries that identity and identified actions go astray.
#[cfg_attr(test, test)]
pub(crate) fn test_identity_change_is_discarded() {
	let reducer = from_fn(|slot: &mut Slot, _: &()| {
		slot.id = 9;
		Effects::<Slot, ()>::none()
	});
	let mut stack = tall();
	let before = stack.clone();

	let err = dispatch(&mut stack, &reducer, &RouteAction::at_id(3, ())).unwrap_err();
	assert!(matches!(err, StackError::IdentityChanged { .. }));
	assert_eq!(stack, before);
}

/// Must keep at most one shape change in flight under sequenced transitions.
///
/// - Enforced in: `TransitionScheduler::pump`
/// - Failure symptom: The presentation layer drops one of two overlapping
///   push/pop/present/dismiss animations and its view tree disagrees with
///   canonical state.
#[cfg_attr(test, test)]
pub(crate) fn test_one_step_in_flight() {
	let mut stack = tall();
	let mut scheduler = TransitionScheduler::new(TransitionPolicy::Sequenced, 16);

	let mut advance = scheduler.request(&mut stack, StackOp::GoBackToRoot).unwrap();
	scheduler.request(&mut stack, StackOp::Push(slot(7))).unwrap();
	let mut kinds = Vec::new();
	while let [issued] = &advance.issued[..] {
		assert_eq!(scheduler.outstanding().len(), 1);
		kinds.push(issued.step.kind);
		let ticket = issued.ticket;
		advance = scheduler.acknowledge(&mut stack, ticket);
	}
	assert!(advance.issued.is_empty());
	assert_eq!(
		kinds,
		vec![StepKind::Dismiss, StepKind::Pop, StepKind::Dismiss, StepKind::Pop, StepKind::Push]
	);
	assert!(scheduler.is_idle());
}

/// Must never drop a route from reconciliation while its insertion is still
/// being animated.
///
/// - Enforced in: `reconcile`, `TransitionScheduler::unpresented`
/// - Failure symptom: A freshly pushed screen vanishes from canonical state
///   because the first snapshot after the push predates it.
#[cfg_attr(test, test)]
pub(crate) fn test_reconcile_spares_unpresented_routes() {
	let mut stack = RouteStack::new(slot(0), true);
	let mut scheduler = TransitionScheduler::new(TransitionPolicy::Sequenced, 16);
	scheduler.request(&mut stack, StackOp::Push(slot(1))).unwrap();

	let removed = reconcile(&mut stack, &[0], scheduler.unpresented());
	assert!(removed.is_empty());
	assert_eq!(stack.len(), 2);
}

/// Must keep the root through any reconciliation snapshot.
///
/// - Enforced in: `reconcile`, `RouteStack::truncate`
/// - Failure symptom: A malformed snapshot empties the stack and the host has
///   nothing to render.
#[cfg_attr(test, test)]
pub(crate) fn test_reconcile_keeps_root() {
	let mut stack = tall();
	reconcile(&mut stack, &[42], std::iter::empty());
	assert_eq!(stack.ids().copied().collect::<Vec<_>>(), vec![0]);
}
