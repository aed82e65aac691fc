use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::error::{Result, StackError};
use crate::op::{OpOutcome, StackOp};
use crate::route::{DismissHook, Route, Style};
use crate::screen::Screen;
use crate::step::Step;

/// Where [`RouteStack::update_or_append`] put the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOrAppend {
	/// An existing route was replaced at this index.
	Updated(usize),
	/// The route was appended at this index.
	Appended(usize),
}

/// Ordered, identity-keyed sequence of routes.
///
/// Index order is presentation order. Index 0 is always the single root
/// route, identities are unique, and every mutation either keeps both
/// properties or is rejected before touching the stack.
#[derive(Debug, Clone)]
pub struct RouteStack<S: Screen> {
	routes: IndexMap<S::Id, Route<S>, FxBuildHasher>,
}

impl<S: Screen> RouteStack<S> {
	/// Creates a stack holding only `root`.
	pub fn new(root: S, embedded: bool) -> Self {
		let mut routes = IndexMap::with_hasher(FxBuildHasher);
		routes.insert(root.id(), Route::root(root, embedded));
		Self { routes }
	}

	/// Builds a stack from routes, bottom first.
	///
	/// Rejects empty input, a non-root first entry, root entries above index
	/// 0, and duplicate identities.
	pub fn from_routes(routes: impl IntoIterator<Item = Route<S>>) -> Result<Self> {
		let mut map: IndexMap<S::Id, Route<S>, FxBuildHasher> = IndexMap::with_hasher(FxBuildHasher);
		for (index, route) in routes.into_iter().enumerate() {
			check_style(index, route.style())?;
			let id = route.id();
			if let Some(existing) = map.get_index_of(&id) {
				return Err(StackError::duplicate(&id, existing));
			}
			map.insert(id, route);
		}
		if map.is_empty() {
			return Err(StackError::Empty);
		}
		Ok(Self { routes: map })
	}

	/// Number of routes, root included. Never zero.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Always false; kept for API symmetry with `len`.
	pub fn is_empty(&self) -> bool {
		false
	}

	pub fn get(&self, index: usize) -> Option<&Route<S>> {
		self.routes.get_index(index).map(|(_, route)| route)
	}

	pub fn get_by_id(&self, id: &S::Id) -> Option<&Route<S>> {
		self.routes.get(id)
	}

	pub fn index_of(&self, id: &S::Id) -> Option<usize> {
		self.routes.get_index_of(id)
	}

	pub fn contains(&self, id: &S::Id) -> bool {
		self.routes.contains_key(id)
	}

	/// Returns the root route.
	pub fn root(&self) -> &Route<S> {
		&self.routes[0]
	}

	/// Returns the topmost route.
	pub fn top(&self) -> &Route<S> {
		&self.routes[self.routes.len() - 1]
	}

	/// Iterates routes bottom to top.
	pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Route<S>> + ExactSizeIterator + '_ {
		self.routes.values()
	}

	/// Iterates identities bottom to top.
	pub fn ids(&self) -> impl DoubleEndedIterator<Item = &S::Id> + ExactSizeIterator + '_ {
		self.routes.keys()
	}

	/// Clones the routes out, bottom first.
	pub fn to_vec(&self) -> Vec<Route<S>> {
		self.routes.values().cloned().collect()
	}

	/// Replaces the screen at `index`, keeping its position and presentation.
	///
	/// The replacement must carry the same identity. Returns the previous
	/// screen.
	pub fn replace_screen(&mut self, index: usize, screen: S) -> Result<S> {
		let len = self.routes.len();
		let Some((id, route)) = self.routes.get_index_mut(index) else {
			return Err(StackError::OutOfBounds { index, len });
		};
		let after = screen.id();
		if *id != after {
			return Err(StackError::IdentityChanged {
				before: format!("{id:?}"),
				after: format!("{after:?}"),
			});
		}
		Ok(std::mem::replace(&mut route.screen, screen))
	}

	/// Appends a pushed route.
	pub fn push(&mut self, screen: S) -> Result<()> {
		self.append(Route::push(screen)).map(drop)
	}

	/// Appends a sheet.
	pub fn present_sheet(&mut self, screen: S, embedded: bool, on_dismiss: Option<DismissHook>) -> Result<()> {
		self.append(Route::sheet(screen, embedded, on_dismiss)).map(drop)
	}

	/// Appends a full-screen cover.
	pub fn present_cover(&mut self, screen: S, embedded: bool, on_dismiss: Option<DismissHook>) -> Result<()> {
		self.append(Route::cover(screen, embedded, on_dismiss)).map(drop)
	}

	/// Removes up to `count` routes from the top, clamped above the root.
	///
	/// Returns how many routes were removed.
	pub fn go_back(&mut self, count: usize) -> usize {
		let removed = count.min(self.routes.len() - 1);
		self.truncate(self.routes.len() - removed);
		removed
	}

	/// Removes routes above the topmost screen satisfying `pred`.
	///
	/// The matching route stays as the new top. Returns false, leaving the
	/// stack untouched, when nothing matches.
	pub fn go_back_to(&mut self, pred: impl Fn(&S) -> bool) -> bool {
		let found = self.routes.values().rposition(|route| pred(&route.screen));
		match found {
			Some(index) => {
				self.truncate(index + 1);
				true
			}
			None => false,
		}
	}

	/// Removes everything above the root. Returns how many routes were removed.
	pub fn go_back_to_root(&mut self) -> usize {
		self.go_back(self.routes.len())
	}

	/// Removes the top route if it is a sheet or cover.
	pub fn dismiss(&mut self) -> bool {
		if !self.top().is_modal() {
			return false;
		}
		self.truncate(self.routes.len() - 1);
		true
	}

	/// Replaces the route with the same identity in place, else appends.
	///
	/// A replacement at index 0 must be a root route and nothing else may be.
	pub fn update_or_append(&mut self, route: Route<S>) -> Result<UpdateOrAppend> {
		let id = route.id();
		match self.routes.get_index_of(&id) {
			Some(index) => {
				check_style(index, route.style())?;
				self.routes[index] = route;
				Ok(UpdateOrAppend::Updated(index))
			}
			None => self.append(route).map(UpdateOrAppend::Appended),
		}
	}

	/// Keeps the first `len` routes and returns the removed ones, bottom first.
	///
	/// `len` is clamped to at least 1 so the root survives.
	pub fn truncate(&mut self, len: usize) -> Vec<Route<S>> {
		let len = len.max(1);
		if len >= self.routes.len() {
			return Vec::new();
		}
		let removed = self.routes.drain(len..).map(|(_, route)| route).collect();
		debug_assert!(self.check_shape().is_ok(), "truncate broke stack shape");
		removed
	}

	/// Performs a declarative stack operation.
	pub fn apply(&mut self, op: &StackOp<S>) -> Result<OpOutcome> {
		let changed = match op {
			StackOp::Push(screen) => {
				self.push(screen.clone())?;
				true
			}
			StackOp::PresentSheet {
				screen,
				embedded,
				on_dismiss,
			} => {
				self.present_sheet(screen.clone(), *embedded, on_dismiss.clone())?;
				true
			}
			StackOp::PresentCover {
				screen,
				embedded,
				on_dismiss,
			} => {
				self.present_cover(screen.clone(), *embedded, on_dismiss.clone())?;
				true
			}
			StackOp::GoBack(count) => self.go_back(*count) > 0,
			StackOp::GoBackTo(pred) => {
				let before = self.routes.len();
				if !self.go_back_to(|screen| pred(screen)) {
					return Ok(OpOutcome::NoMatch);
				}
				self.routes.len() != before
			}
			StackOp::GoBackToRoot | StackOp::DismissAll => self.go_back_to_root() > 0,
			StackOp::Dismiss => self.dismiss(),
			StackOp::UpdateOrAppend(route) => {
				self.update_or_append(route.clone())?;
				true
			}
		};
		Ok(if changed { OpOutcome::Changed } else { OpOutcome::Unchanged })
	}

	/// Applies one primitive step, taking inserted routes from `target`.
	///
	/// Removal steps must name the current top; insertion steps must land on
	/// the position and parent `target` expects. Anything else is reported
	/// as [`StackError::StepMismatch`] with the stack untouched. Returns the
	/// removed route for removal steps.
	pub fn apply_step(&mut self, step: &Step<S::Id>, target: &Self) -> Result<Option<Route<S>>> {
		if step.kind.is_removal() {
			let top = self.routes.len() - 1;
			let top_route = self.top();
			let matches = top > 0 && top == step.index && top_route.id() == step.id && step.kind.removes(top_route.style());
			if !matches {
				return Err(StackError::mismatch(step));
			}
			return Ok(self.truncate(top).pop());
		}

		let parent_matches = step.index > 0
			&& self.routes.len() == step.index
			&& target.routes.get_index(step.index - 1).map(|(id, _)| id) == self.routes.get_index(step.index - 1).map(|(id, _)| id);
		let route = target.routes.get(&step.id).filter(|route| step.kind.inserts(route.style()));
		match route {
			Some(route) if parent_matches && !self.routes.contains_key(&step.id) => {
				self.append(route.clone())?;
				Ok(None)
			}
			_ => Err(StackError::mismatch(step)),
		}
	}

	/// Verifies the root and uniqueness invariants.
	pub fn check_shape(&self) -> Result<()> {
		if self.routes.is_empty() {
			return Err(StackError::Empty);
		}
		for (index, (id, route)) in self.routes.iter().enumerate() {
			check_style(index, route.style())?;
			let actual = route.id();
			if *id != actual {
				return Err(StackError::IdentityChanged {
					before: format!("{id:?}"),
					after: format!("{actual:?}"),
				});
			}
		}
		Ok(())
	}

	fn append(&mut self, route: Route<S>) -> Result<usize> {
		let index = self.routes.len();
		check_style(index, route.style())?;
		let id = route.id();
		if let Some(existing) = self.routes.get_index_of(&id) {
			tracing::warn!(id = ?id, existing, "stack.append: duplicate identity rejected");
			return Err(StackError::duplicate(&id, existing));
		}
		self.routes.insert(id, route);
		debug_assert!(self.check_shape().is_ok(), "append broke stack shape");
		Ok(index)
	}
}

impl<S: Screen + PartialEq> PartialEq for RouteStack<S> {
	/// Order-sensitive comparison; two stacks are equal when they hold equal
	/// routes in the same positions.
	fn eq(&self, other: &Self) -> bool {
		self.routes.len() == other.routes.len() && self.routes.values().eq(other.routes.values())
	}
}

fn check_style(index: usize, style: Style) -> Result<()> {
	match (index, style) {
		(0, Style::Root) => Ok(()),
		(0, _) => Err(StackError::MissingRoot),
		(index, Style::Root) => Err(StackError::MisplacedRoot { index }),
		_ => Ok(()),
	}
}
