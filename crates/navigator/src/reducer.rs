//! Transition functions and their composition.
//!
//! A [`Reducer`] owns one screen's state transitions. [`Reducer::pullback`]
//! lifts it over a screen union through [`Case`], and [`Reducer::combine`]
//! runs several in order. A [`RouteReducer`] is coordinator-level logic: it
//! sees the whole stack read-only, the index an action was delivered to, and
//! answers with effects.

use std::marker::PhantomData;

use wayfinder_route::{RouteStack, Screen, StackOp};

use crate::case::Case;
use crate::effect::{Effect, Effects};

/// A pure per-screen transition function.
pub trait Reducer: Send + Sync + 'static {
	type Screen;
	type Action;

	/// Applies `action` to `screen` and returns follow-up effects.
	fn reduce(&self, screen: &mut Self::Screen, action: &Self::Action) -> Effects<Self::Screen, Self::Action>;

	/// Lifts this reducer into a union that embeds its screen and action.
	///
	/// Actions or screens of other cases pass through untouched.
	fn pullback<W, WA>(self) -> Pullback<Self, W, WA>
	where
		Self: Sized,
		Self::Screen: Case<W>,
		Self::Action: Case<WA>,
	{
		Pullback {
			inner: self,
			_marker: PhantomData,
		}
	}

	/// Runs `self`, then `other`, concatenating their effects.
	fn combine<R>(self, other: R) -> Combine<Self, R>
	where
		Self: Sized,
		R: Reducer<Screen = Self::Screen, Action = Self::Action>,
	{
		Combine(self, other)
	}
}

/// A reducer built from a closure; see [`from_fn`].
pub struct FnReducer<S, A, F> {
	f: F,
	_marker: PhantomData<fn() -> (S, A)>,
}

/// Wraps a closure as a [`Reducer`].
pub fn from_fn<S, A, F>(f: F) -> FnReducer<S, A, F>
where
	F: Fn(&mut S, &A) -> Effects<S, A> + Send + Sync + 'static,
{
	FnReducer { f, _marker: PhantomData }
}

impl<S, A, F> Reducer for FnReducer<S, A, F>
where
	S: 'static,
	A: 'static,
	F: Fn(&mut S, &A) -> Effects<S, A> + Send + Sync + 'static,
{
	type Screen = S;
	type Action = A;

	fn reduce(&self, screen: &mut S, action: &A) -> Effects<S, A> {
		(self.f)(screen, action)
	}
}

/// See [`Reducer::pullback`].
pub struct Pullback<R, W, WA> {
	inner: R,
	_marker: PhantomData<fn() -> (W, WA)>,
}

impl<R, W, WA> Reducer for Pullback<R, W, WA>
where
	R: Reducer,
	R::Screen: Case<W> + 'static,
	R::Action: Case<WA> + 'static,
	W: 'static,
	WA: 'static,
{
	type Screen = W;
	type Action = WA;

	fn reduce(&self, screen: &mut W, action: &WA) -> Effects<W, WA> {
		let Some(action) = <R::Action as Case<WA>>::extract(action) else {
			return Effects::none();
		};
		let Some(part) = <R::Screen as Case<W>>::extract_mut(screen) else {
			return Effects::none();
		};
		lift_effects(self.inner.reduce(part, action))
	}
}

/// See [`Reducer::combine`].
pub struct Combine<A, B>(A, B);

impl<A, B> Reducer for Combine<A, B>
where
	A: Reducer,
	B: Reducer<Screen = A::Screen, Action = A::Action>,
{
	type Screen = A::Screen;
	type Action = A::Action;

	fn reduce(&self, screen: &mut Self::Screen, action: &Self::Action) -> Effects<Self::Screen, Self::Action> {
		let mut effects = self.0.reduce(screen, action);
		effects.merge(self.1.reduce(screen, action));
		effects
	}
}

/// Coordinator-level logic observing routed actions.
///
/// Runs after the addressed screen's own reducer, with the stack already
/// holding that screen's new state. It never mutates the stack directly.
pub trait RouteReducer: Send + Sync + 'static {
	type Screen: Screen;
	type Action;

	/// Reacts to `action`, which was delivered to the route at `index`.
	fn reduce(&self, stack: &RouteStack<Self::Screen>, index: usize, action: &Self::Action) -> Effects<Self::Screen, Self::Action>;
}

/// A route reducer built from a closure; see [`route_fn`].
pub struct FnRouteReducer<S, A, F> {
	f: F,
	_marker: PhantomData<fn() -> (S, A)>,
}

/// Wraps a closure as a [`RouteReducer`].
pub fn route_fn<S, A, F>(f: F) -> FnRouteReducer<S, A, F>
where
	S: Screen,
	F: Fn(&RouteStack<S>, usize, &A) -> Effects<S, A> + Send + Sync + 'static,
{
	FnRouteReducer { f, _marker: PhantomData }
}

impl<S, A, F> RouteReducer for FnRouteReducer<S, A, F>
where
	S: Screen,
	A: 'static,
	F: Fn(&RouteStack<S>, usize, &A) -> Effects<S, A> + Send + Sync + 'static,
{
	type Screen = S;
	type Action = A;

	fn reduce(&self, stack: &RouteStack<S>, index: usize, action: &A) -> Effects<S, A> {
		(self.f)(stack, index, action)
	}
}

/// Embeds a part's effects into the union.
pub fn lift_effects<P, PA, W, WA>(effects: Effects<P, PA>) -> Effects<W, WA>
where
	P: Case<W> + 'static,
	PA: Case<WA>,
	W: 'static,
{
	effects
		.into_iter()
		.map(|effect| match effect {
			Effect::Navigate(op) => Effect::Navigate(lift_op(op)),
			Effect::Send { action, after } => Effect::Send {
				action: action.embed(),
				after,
			},
		})
		.collect()
}

/// Embeds a part's stack operation into the union.
///
/// Predicates only match union screens holding this case.
pub fn lift_op<P, W>(op: StackOp<P>) -> StackOp<W>
where
	P: Case<W> + 'static,
	W: 'static,
{
	match op {
		StackOp::Push(screen) => StackOp::Push(screen.embed()),
		StackOp::PresentSheet {
			screen,
			embedded,
			on_dismiss,
		} => StackOp::PresentSheet {
			screen: screen.embed(),
			embedded,
			on_dismiss,
		},
		StackOp::PresentCover {
			screen,
			embedded,
			on_dismiss,
		} => StackOp::PresentCover {
			screen: screen.embed(),
			embedded,
			on_dismiss,
		},
		StackOp::GoBack(count) => StackOp::GoBack(count),
		StackOp::GoBackTo(pred) => StackOp::go_back_to(move |whole: &W| <P as Case<W>>::extract(whole).is_some_and(|part| pred(part))),
		StackOp::GoBackToRoot => StackOp::GoBackToRoot,
		StackOp::Dismiss => StackOp::Dismiss,
		StackOp::DismissAll => StackOp::DismissAll,
		StackOp::UpdateOrAppend(route) => StackOp::UpdateOrAppend(route.map(Case::embed)),
	}
}
