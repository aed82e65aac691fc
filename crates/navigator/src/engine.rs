//! Synchronous navigation state machine.
//!
//! [`NavigatorCore`] owns one stack and everything that mutates it. Each
//! call returns [`Output`]s for the driver to carry out: steps to animate
//! and actions to feed back later. The core never sleeps, spawns or waits,
//! so it can be exercised directly in tests or wrapped by
//! [`Navigator`](crate::runtime::Navigator).

use std::fmt;
use std::time::Duration;

use wayfinder_route::{Route, RouteStack, Screen, StackOp};

use crate::addressing::{Address, AddressingMode, RouteAction};
use crate::config::NavigatorConfig;
use crate::dispatch::{Dispatch, dispatch};
use crate::effect::Effect;
use crate::error::Result;
use crate::reconcile::reconcile;
use crate::reducer::{Reducer, RouteReducer};
use crate::scheduler::{Advance, Issued, StepTicket, TransitionScheduler};

/// Work the driver must perform on behalf of the core.
pub enum Output<Id, A> {
	/// Animate one step and acknowledge its ticket when done.
	Animate(Issued<Id>),
	/// Feed `action` back through [`NavigatorCore::send`] after `after`.
	Deliver { action: RouteAction<Id, A>, after: Duration },
}

impl<Id: fmt::Debug, A: fmt::Debug> fmt::Debug for Output<Id, A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Animate(issued) => f.debug_tuple("Animate").field(issued).finish(),
			Self::Deliver { action, after } => f
				.debug_struct("Deliver")
				.field("action", action)
				.field("after", after)
				.finish(),
		}
	}
}

type BoxedReducer<S, A> = Box<dyn Reducer<Screen = S, Action = A>>;
type BoxedRouteReducer<S, A> = Box<dyn RouteReducer<Screen = S, Action = A>>;

/// One route stack plus its dispatch, scheduling and reconciliation.
pub struct NavigatorCore<S: Screen, A> {
	stack: RouteStack<S>,
	addressing: AddressingMode,
	scheduler: TransitionScheduler<S>,
	reducer: BoxedReducer<S, A>,
	route_reducers: Vec<BoxedRouteReducer<S, A>>,
}

impl<S: Screen, A: 'static> NavigatorCore<S, A> {
	/// Creates a core over `stack` whose routes are driven by `reducer`.
	pub fn new(stack: RouteStack<S>, reducer: impl Reducer<Screen = S, Action = A>, config: &NavigatorConfig) -> Self {
		Self {
			stack,
			addressing: config.addressing,
			scheduler: TransitionScheduler::new(config.transitions, config.max_queued_requests),
			reducer: Box::new(reducer),
			route_reducers: Vec::new(),
		}
	}

	/// Adds coordinator-level logic run after every delivered action.
	#[must_use]
	pub fn with_route_reducer(mut self, reducer: impl RouteReducer<Screen = S, Action = A>) -> Self {
		self.route_reducers.push(Box::new(reducer));
		self
	}

	pub fn stack(&self) -> &RouteStack<S> {
		&self.stack
	}

	pub fn addressing(&self) -> AddressingMode {
		self.addressing
	}

	pub fn scheduler(&self) -> &TransitionScheduler<S> {
		&self.scheduler
	}

	/// True when no transition is in flight or queued.
	pub fn is_settled(&self) -> bool {
		self.scheduler.is_idle()
	}

	/// Address of the route at `index` under this core's addressing mode.
	pub fn address(&self, index: usize) -> Option<Address<S::Id>> {
		self.addressing.address(&self.stack, index)
	}

	/// Delivers an addressed action and runs the effects it produces.
	///
	/// Stale actions are dropped. A reducer that breaks a stack invariant
	/// has its result discarded and is logged.
	pub fn send(&mut self, action: RouteAction<S::Id, A>) -> Vec<Output<S::Id, A>> {
		let (index, mut effects) = match dispatch(&mut self.stack, self.reducer.as_ref(), &action) {
			Ok(Dispatch::Delivered { index, effects }) => (index, effects),
			Ok(Dispatch::Dropped) => return Vec::new(),
			Err(err) => {
				tracing::warn!(address = ?action.address, %err, "nav.dispatch: rejected");
				return Vec::new();
			}
		};
		for reducer in &self.route_reducers {
			effects.merge(reducer.reduce(&self.stack, index, &action.action));
		}

		// Follow-ups go to the originating route as it is before any of
		// these effects navigate.
		let origin = self.address(index);
		let mut outputs = Vec::new();
		for effect in effects {
			match effect {
				Effect::Navigate(op) => {
					let name = op.name();
					match self.navigate(op) {
						Ok(more) => outputs.extend(more),
						Err(err) => tracing::warn!(op = name, %err, "nav.effect: navigation rejected"),
					}
				}
				Effect::Send { action, after } => {
					if let Some(address) = origin.clone() {
						outputs.push(Output::Deliver {
							action: RouteAction { address, action },
							after,
						});
					}
				}
			}
		}
		outputs
	}

	/// Requests a navigation change.
	pub fn navigate(&mut self, op: StackOp<S>) -> Result<Vec<Output<S::Id, A>>> {
		let advance = self.scheduler.request(&mut self.stack, op)?;
		Ok(finish(advance))
	}

	/// Records that the presentation layer finished the step behind `ticket`.
	pub fn acknowledge(&mut self, ticket: StepTicket) -> Vec<Output<S::Id, A>> {
		let advance = self.scheduler.acknowledge(&mut self.stack, ticket);
		finish(advance)
	}

	/// Merges removals the presentation layer performed on its own.
	///
	/// Returns the routes that left canonical state.
	pub fn reconcile(&mut self, snapshot: &[S::Id]) -> Vec<Route<S>> {
		let removed = reconcile(&mut self.stack, snapshot, self.scheduler.unpresented());
		notify_dismissed(&removed);
		removed
	}
}

fn finish<S: Screen, A>(advance: Advance<S>) -> Vec<Output<S::Id, A>> {
	notify_dismissed(&advance.removed);
	advance.issued.into_iter().map(Output::Animate).collect()
}

fn notify_dismissed<S>(removed: &[Route<S>]) {
	for hook in removed.iter().filter_map(Route::on_dismiss) {
		hook.notify();
	}
}
