use crate::error::{Result, StackError};
use crate::route::{ModalStyle, Style};
use crate::screen::Screen;
use crate::stack::RouteStack;

/// One atomic, individually animatable shape change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
	/// Push one navigation entry.
	Push,
	/// Present one sheet or cover.
	Present(ModalStyle),
	/// Pop one pushed entry.
	Pop,
	/// Dismiss one sheet or cover.
	Dismiss,
}

impl StepKind {
	pub const fn is_removal(self) -> bool {
		matches!(self, Self::Pop | Self::Dismiss)
	}

	pub const fn is_insertion(self) -> bool {
		!self.is_removal()
	}

	/// The step that removes a route of `style` from the top.
	pub const fn removing(style: Style) -> Self {
		if style.modal().is_some() { Self::Dismiss } else { Self::Pop }
	}

	/// The step that inserts a route of `style` on top.
	///
	/// Root routes are never inserted by a diff; they map to `Push` only so
	/// the function stays total.
	pub const fn inserting(style: Style) -> Self {
		match style.modal() {
			Some(modal) => Self::Present(modal),
			None => Self::Push,
		}
	}

	pub(crate) fn removes(self, style: Style) -> bool {
		self.is_removal() && Self::removing(style) == self && style != Style::Root
	}

	pub(crate) fn inserts(self, style: Style) -> bool {
		self.is_insertion() && Self::inserting(style) == self && style != Style::Root
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Push => "push",
			Self::Present(ModalStyle::Sheet) => "present_sheet",
			Self::Present(ModalStyle::Cover) => "present_cover",
			Self::Pop => "pop",
			Self::Dismiss => "dismiss",
		}
	}
}

/// A primitive step addressed at one route.
///
/// `index` is the position the route occupies: the top being removed, or
/// the slot being filled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Step<Id> {
	pub kind: StepKind,
	pub id: Id,
	pub index: usize,
}

/// Decomposes the change from `current` to `target` into primitive steps.
///
/// Routes are kept while both stacks agree on identity and style from the
/// root upwards. Everything above that common prefix is removed top-down,
/// then the target's remainder is inserted bottom-up. The two stacks must
/// share a root.
pub fn diff<S: Screen>(current: &RouteStack<S>, target: &RouteStack<S>) -> Result<Vec<Step<S::Id>>> {
	let (current_root, target_root) = (current.root(), target.root());
	if current_root.id() != target_root.id() {
		return Err(StackError::RootMismatch {
			current: format!("{:?}", current_root.id()),
			target: format!("{:?}", target_root.id()),
		});
	}

	let prefix = current
		.iter()
		.zip(target.iter())
		.take_while(|(live, wanted)| live.id() == wanted.id() && live.style() == wanted.style())
		.count();

	let removals = current.iter().enumerate().skip(prefix).rev().map(|(index, route)| Step {
		kind: StepKind::removing(route.style()),
		id: route.id(),
		index,
	});
	let insertions = target.iter().enumerate().skip(prefix).map(|(index, route)| Step {
		kind: StepKind::inserting(route.style()),
		id: route.id(),
		index,
	});

	let steps: Vec<_> = removals.chain(insertions).collect();
	tracing::trace!(prefix, steps = steps.len(), "stack.diff");
	Ok(steps)
}
