use crate::{Route, RouteStack, Screen, StackError, StackOp};

#[derive(Debug, Clone, PartialEq)]
struct Page(&'static str);

impl Screen for Page {
	type Id = &'static str;

	fn id(&self) -> &'static str {
		self.0
	}
}

/// Must keep exactly one root route at index 0.
///
/// - Enforced in: `RouteStack::truncate`, `RouteStack::update_or_append`
/// - Failure symptom: Back navigation empties the stack and the host has nothing to render.
#[cfg_attr(test, test)]
pub(crate) fn test_root_survives_every_removal() {
	let mut stack = RouteStack::new(Page("home"), true);
	stack.push(Page("a")).unwrap();
	stack.present_cover(Page("b"), false, None).unwrap();

	for op in [StackOp::GoBack(usize::MAX), StackOp::DismissAll, StackOp::GoBackToRoot, StackOp::Dismiss] {
		stack.apply(&op).unwrap();
		assert_eq!(stack.root().id(), "home");
	}
	assert!(stack.truncate(0).is_empty(), "root must not be truncated away");
	assert_eq!(stack.len(), 1);
}

/// Must reject duplicate identities before mutating.
///
/// - Enforced in: `RouteStack::append`
/// - Failure symptom: Identity-addressed actions reach the wrong one of two routes sharing an id.
#[cfg_attr(test, test)]
pub(crate) fn test_duplicate_identity_rejected() {
	let mut stack = RouteStack::new(Page("home"), true);
	stack.present_sheet(Page("list"), true, None).unwrap();
	let before = stack.clone();

	let err = stack.apply(&StackOp::Push(Page("list"))).unwrap_err();
	assert!(matches!(err, StackError::DuplicateId { index: 1, .. }));
	assert!(err.is_invariant_violation());
	assert_eq!(stack, before);
}

/// Must never leave a gap below a removed route.
///
/// - Enforced in: `RouteStack::truncate`
/// - Failure symptom: A pushed screen survives while the sheet it was pushed into is gone.
#[cfg_attr(test, test)]
pub(crate) fn test_removal_takes_everything_above() {
	let mut stack = RouteStack::from_routes(vec![
		Route::root(Page("home"), true),
		Route::sheet(Page("list"), true, None),
		Route::push(Page("detail")),
	])
	.unwrap();

	let removed = stack.truncate(1);
	assert_eq!(removed.len(), 2);
	assert_eq!(stack.ids().copied().collect::<Vec<_>>(), vec!["home"]);
}
