//! Compound transition scheduling.
//!
//! [`TransitionScheduler`] is a sans-IO state machine. It turns one logical
//! navigation request into primitive [`Step`]s, applies each to the
//! canonical stack as it is issued, and releases the next only after the
//! presentation layer acknowledges the previous one by [`StepTicket`].
//! Requests arriving while a transition is in flight are queued and start
//! from whatever the stack looks like once the queue ahead of them drains.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use serde::Deserialize;
use wayfinder_route::{OpOutcome, Route, RouteStack, Screen, StackError, StackOp, Step, diff};

use crate::error::{NavigatorError, Result};

/// Sequence number of one issued step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepTicket(u64);

impl StepTicket {
	pub const fn get(self) -> u64 {
		self.0
	}
}

/// How multi-step changes reach the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
	/// One step in flight at a time.
	#[default]
	Sequenced,
	/// Every step of a request is applied and issued at once. The next
	/// request still waits for all of them to be acknowledged.
	Simultaneous,
}

/// A step handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issued<Id> {
	pub ticket: StepTicket,
	pub step: Step<Id>,
}

/// What one scheduler call did to the canonical stack.
#[derive(Debug)]
pub struct Advance<S: Screen> {
	/// Steps to animate, in order.
	pub issued: Vec<Issued<S::Id>>,
	/// Routes removed from canonical state, in removal order.
	pub removed: Vec<Route<S>>,
}

impl<S: Screen> Advance<S> {
	pub fn is_empty(&self) -> bool {
		self.issued.is_empty() && self.removed.is_empty()
	}
}

impl<S: Screen> Default for Advance<S> {
	fn default() -> Self {
		Self {
			issued: Vec::new(),
			removed: Vec::new(),
		}
	}
}

struct Plan<S: Screen> {
	target: RouteStack<S>,
	/// Identities live when the plan started.
	origin: FxHashSet<S::Id>,
	steps: VecDeque<Step<S::Id>>,
}

/// Serializes navigation requests for one stack.
pub struct TransitionScheduler<S: Screen> {
	policy: TransitionPolicy,
	max_pending: usize,
	pending: VecDeque<StackOp<S>>,
	plan: Option<Plan<S>>,
	outstanding: Vec<Issued<S::Id>>,
	next_ticket: u64,
	drift_total: u64,
	rejected_total: u64,
}

impl<S: Screen> TransitionScheduler<S> {
	pub fn new(policy: TransitionPolicy, max_pending: usize) -> Self {
		Self {
			policy,
			max_pending,
			pending: VecDeque::new(),
			plan: None,
			outstanding: Vec::new(),
			next_ticket: 0,
			drift_total: 0,
			rejected_total: 0,
		}
	}

	pub fn policy(&self) -> TransitionPolicy {
		self.policy
	}

	/// True when nothing is in flight, planned or queued.
	pub fn is_idle(&self) -> bool {
		self.plan.is_none() && self.outstanding.is_empty() && self.pending.is_empty()
	}

	/// Number of requests waiting behind the current transition.
	pub fn pending_len(&self) -> usize {
		self.pending.len()
	}

	/// Steps issued and not yet acknowledged.
	pub fn outstanding(&self) -> &[Issued<S::Id>] {
		&self.outstanding
	}

	/// Identities whose insertion step is issued but unacknowledged.
	///
	/// The presentation layer has not shown these routes yet, so their
	/// absence from a reconciliation snapshot is not a removal.
	pub fn unpresented(&self) -> impl Iterator<Item = &S::Id> + '_ {
		self.outstanding
			.iter()
			.filter(|issued| issued.step.kind.is_insertion())
			.map(|issued| &issued.step.id)
	}

	/// How many times a plan had to be recomputed after the live stack
	/// diverged from it.
	pub fn drift_total(&self) -> u64 {
		self.drift_total
	}

	/// Queued requests dropped because they broke a stack invariant once
	/// their turn came.
	pub fn rejected_total(&self) -> u64 {
		self.rejected_total
	}

	/// Requests a navigation change.
	///
	/// Content-only updates of a route already on the stack apply at once,
	/// even mid-transition. Anything else starts immediately when the
	/// scheduler is free, or waits in the queue.
	pub fn request(&mut self, stack: &mut RouteStack<S>, op: StackOp<S>) -> Result<Advance<S>> {
		if let StackOp::UpdateOrAppend(route) = &op
			&& is_content_only(stack, route)
		{
			self.update_content(stack, route.clone())?;
			return Ok(Advance::default());
		}

		if self.plan.is_some() || !self.outstanding.is_empty() {
			if self.pending.len() >= self.max_pending {
				tracing::warn!(op = op.name(), capacity = self.max_pending, "nav.request: queue full");
				return Err(NavigatorError::QueueFull {
					capacity: self.max_pending,
				});
			}
			self.pending.push_back(op);
			tracing::trace!(pending = self.pending.len(), "nav.request.queued");
			return Ok(Advance::default());
		}

		let mut advance = Advance::default();
		self.start(stack, op, &mut advance)?;
		self.pump(stack, &mut advance);
		Ok(advance)
	}

	/// Records completion of an issued step and releases whatever follows.
	///
	/// Unknown or already acknowledged tickets are ignored.
	pub fn acknowledge(&mut self, stack: &mut RouteStack<S>, ticket: StepTicket) -> Advance<S> {
		let Some(position) = self.outstanding.iter().position(|issued| issued.ticket == ticket) else {
			tracing::debug!(ticket = ticket.0, "nav.step.ack: stale ticket");
			return Advance::default();
		};
		let done = self.outstanding.remove(position);
		tracing::trace!(
			ticket = ticket.0,
			step = done.step.kind.as_str(),
			index = done.step.index,
			outstanding = self.outstanding.len(),
			"nav.step.ack"
		);

		let mut advance = Advance::default();
		self.pump(stack, &mut advance);
		advance
	}

	fn update_content(&mut self, stack: &mut RouteStack<S>, route: Route<S>) -> Result<()> {
		let id = route.id();
		if let Some(plan) = self.plan.as_mut()
			&& let Some(index) = plan.target.index_of(&id)
		{
			plan.target.replace_screen(index, route.screen.clone())?;
		}
		stack.update_or_append(route)?;
		tracing::trace!(id = ?id, "nav.request.content");
		Ok(())
	}

	/// Computes the target for `op` and either applies it outright or
	/// installs a plan for [`Self::pump`] to drain.
	fn start(&mut self, stack: &mut RouteStack<S>, op: StackOp<S>, advance: &mut Advance<S>) -> Result<()> {
		let mut target = stack.clone();
		if target.apply(&op)? == OpOutcome::NoMatch {
			tracing::debug!(op = op.name(), "nav.request: no matching route");
			return Ok(());
		}
		let steps = diff(stack, &target)?;
		tracing::debug!(op = op.name(), steps = steps.len(), policy = ?self.policy, "nav.request");

		if steps.is_empty() {
			*stack = target;
			return Ok(());
		}
		if steps.len() == 1 || self.policy == TransitionPolicy::Simultaneous {
			for step in steps {
				advance.removed.extend(stack.apply_step(&step, &target)?);
				advance.issued.push(self.issue(step));
			}
			return Ok(());
		}

		self.plan = Some(Plan {
			target,
			origin: stack.ids().cloned().collect(),
			steps: steps.into(),
		});
		Ok(())
	}

	/// Issues plan steps and starts queued requests until something is in
	/// flight or there is nothing left to do.
	fn pump(&mut self, stack: &mut RouteStack<S>, advance: &mut Advance<S>) {
		while self.outstanding.is_empty() {
			if let Some(plan) = self.plan.as_mut() {
				let Some(step) = plan.steps.pop_front() else {
					tracing::trace!("nav.plan.done");
					self.plan = None;
					continue;
				};
				match stack.apply_step(&step, &plan.target) {
					Ok(removed) => {
						advance.removed.extend(removed);
						advance.issued.push(self.issue(step));
					}
					Err(StackError::StepMismatch { .. }) => self.replan(stack),
					Err(err) => {
						tracing::warn!(%err, "nav.plan: abandoned");
						self.plan = None;
					}
				}
				continue;
			}

			let Some(op) = self.pending.pop_front() else {
				break;
			};
			let name = op.name();
			if let Err(err) = self.start(stack, op, advance) {
				self.rejected_total += 1;
				tracing::warn!(op = name, %err, rejected_total = self.rejected_total, "nav.request: queued request rejected");
			}
		}
	}

	/// Recomputes the remaining steps from the live stack toward the same
	/// target, minus whatever the user removed since the plan started.
	fn replan(&mut self, stack: &RouteStack<S>) {
		let Some(plan) = self.plan.as_mut() else {
			return;
		};
		self.drift_total += 1;
		let lost = plan.target.iter().position(|route| {
			let id = route.id();
			plan.origin.contains(&id) && !stack.contains(&id)
		});
		if let Some(index) = lost {
			let dropped = plan.target.truncate(index);
			tracing::debug!(index, dropped = dropped.len(), "nav.drift: target trimmed to user removals");
		}
		match diff(stack, &plan.target) {
			Ok(steps) => {
				tracing::debug!(steps = steps.len(), drift_total = self.drift_total, "nav.drift");
				plan.steps = steps.into();
			}
			Err(err) => {
				tracing::warn!(%err, "nav.drift: target unreachable");
				self.plan = None;
			}
		}
	}

	fn issue(&mut self, step: Step<S::Id>) -> Issued<S::Id> {
		let ticket = StepTicket(self.next_ticket);
		self.next_ticket += 1;
		tracing::trace!(
			ticket = ticket.0,
			step = step.kind.as_str(),
			id = ?step.id,
			index = step.index,
			"nav.step.issue"
		);
		let issued = Issued { ticket, step };
		self.outstanding.push(issued.clone());
		issued
	}
}

fn is_content_only<S: Screen>(stack: &RouteStack<S>, route: &Route<S>) -> bool {
	stack.get_by_id(&route.id()).is_some_and(|live| live.style() == route.style())
}
