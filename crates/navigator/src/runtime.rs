//! Tokio driver for [`NavigatorCore`].
//!
//! One task owns the core. Everything that can touch the stack (addressed
//! actions, navigation requests, reconciliation snapshots, step
//! completions, delayed actions) arrives through its bounded mailbox and
//! is handled one command at a time. Presenter calls and delays run in
//! spawned tasks that post back through a weak sender, so the actor stops
//! once every [`NavigatorHandle`] is gone.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use wayfinder_route::{Route, Screen, StackOp, Step};

use crate::addressing::{Address, AddressingMode, RouteAction};
use crate::config::NavigatorConfig;
use crate::engine::{NavigatorCore, Output};
use crate::error::{NavigatorError, Result};
use crate::scheduler::{Issued, StepTicket};

/// The presentation layer as seen by the navigator.
#[async_trait]
pub trait Presenter<Id>: Send + Sync + 'static {
	/// Animates one primitive step, returning when it has finished.
	///
	/// There is no timeout; the next step waits for this one.
	async fn apply(&self, step: Step<Id>);
}

enum Command<S: Screen, A> {
	Action(RouteAction<S::Id, A>),
	Navigate {
		op: StackOp<S>,
		reply: oneshot::Sender<Result<()>>,
	},
	Reconcile(Vec<S::Id>),
	Completed(StepTicket),
	Routes(oneshot::Sender<Vec<Route<S>>>),
	Settled(oneshot::Sender<()>),
}

/// Actor owning one [`NavigatorCore`].
pub struct Navigator<S: Screen, A> {
	core: NavigatorCore<S, A>,
	presenter: Arc<dyn Presenter<S::Id>>,
	rx: mpsc::Receiver<Command<S, A>>,
	tx: mpsc::WeakSender<Command<S, A>>,
	cancel: CancellationToken,
	settled: Vec<oneshot::Sender<()>>,
}

impl<S, A> Navigator<S, A>
where
	S: Screen,
	A: Send + 'static,
{
	/// Spawns the actor task and returns a handle to it.
	///
	/// Must be called from within a tokio runtime.
	pub fn spawn(core: NavigatorCore<S, A>, presenter: Arc<dyn Presenter<S::Id>>, config: &NavigatorConfig) -> NavigatorHandle<S, A> {
		let (tx, rx) = mpsc::channel(config.mailbox_capacity.max(1));
		let cancel = CancellationToken::new();
		let addressing = core.addressing();
		let actor = Self {
			core,
			presenter,
			rx,
			tx: tx.downgrade(),
			cancel: cancel.clone(),
			settled: Vec::new(),
		};
		let join = tokio::spawn(actor.run());
		tracing::debug!(addressing = addressing.as_str(), mailbox = config.mailbox_capacity, "nav.runtime.spawned");

		NavigatorHandle {
			tx,
			addressing,
			cancel,
			join: Arc::new(Mutex::new(Some(join))),
		}
	}

	async fn run(mut self) {
		loop {
			let cmd = tokio::select! {
				biased;
				() = self.cancel.cancelled() => break,
				cmd = self.rx.recv() => match cmd {
					Some(cmd) => cmd,
					None => break,
				},
			};
			self.handle(cmd);
			self.notify_settled();
		}
		tracing::debug!(len = self.core.stack().len(), "nav.runtime.stopped");
	}

	fn handle(&mut self, cmd: Command<S, A>) {
		match cmd {
			Command::Action(action) => {
				let outputs = self.core.send(action);
				self.execute(outputs);
			}
			Command::Navigate { op, reply } => {
				let name = op.name();
				let result = match self.core.navigate(op) {
					Ok(outputs) => {
						self.execute(outputs);
						Ok(())
					}
					Err(err) => {
						tracing::warn!(op = name, %err, "nav.navigate: rejected");
						Err(err)
					}
				};
				let _ = reply.send(result);
			}
			Command::Reconcile(snapshot) => {
				self.core.reconcile(&snapshot);
			}
			Command::Completed(ticket) => {
				let outputs = self.core.acknowledge(ticket);
				self.execute(outputs);
			}
			Command::Routes(reply) => {
				let _ = reply.send(self.core.stack().to_vec());
			}
			Command::Settled(reply) => self.settled.push(reply),
		}
	}

	fn notify_settled(&mut self) {
		if self.settled.is_empty() || !self.core.is_settled() {
			return;
		}
		for waiter in self.settled.drain(..) {
			let _ = waiter.send(());
		}
	}

	fn execute(&self, outputs: Vec<Output<S::Id, A>>) {
		for output in outputs {
			match output {
				Output::Animate(Issued { ticket, step }) => {
					let presenter = Arc::clone(&self.presenter);
					let tx = self.tx.clone();
					tokio::spawn(async move {
						presenter.apply(step).await;
						if let Some(tx) = tx.upgrade() {
							let _ = tx.send(Command::Completed(ticket)).await;
						}
					});
				}
				Output::Deliver { action, after } => {
					let tx = self.tx.clone();
					let cancel = self.cancel.clone();
					tokio::spawn(async move {
						tokio::select! {
							() = cancel.cancelled() => return,
							() = tokio::time::sleep(after) => {}
						}
						if let Some(tx) = tx.upgrade() {
							let _ = tx.send(Command::Action(action)).await;
						}
					});
				}
			}
		}
	}
}

/// Cloneable handle to a running [`Navigator`].
pub struct NavigatorHandle<S: Screen, A> {
	tx: mpsc::Sender<Command<S, A>>,
	addressing: AddressingMode,
	cancel: CancellationToken,
	join: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl<S: Screen, A> Clone for NavigatorHandle<S, A> {
	fn clone(&self) -> Self {
		Self {
			tx: self.tx.clone(),
			addressing: self.addressing,
			cancel: self.cancel.clone(),
			join: Arc::clone(&self.join),
		}
	}
}

impl<S, A> NavigatorHandle<S, A>
where
	S: Screen,
	A: Send + 'static,
{
	pub fn addressing(&self) -> AddressingMode {
		self.addressing
	}

	/// Sends an addressed action. Stale targets are dropped by the actor.
	pub async fn send(&self, address: Address<S::Id>, action: A) -> Result<()> {
		self.command(Command::Action(RouteAction { address, action })).await
	}

	pub async fn send_to_index(&self, index: usize, action: A) -> Result<()> {
		self.send(Address::Index(index), action).await
	}

	pub async fn send_to_id(&self, id: S::Id, action: A) -> Result<()> {
		self.send(Address::Id(id), action).await
	}

	/// Requests a navigation change.
	///
	/// Resolves once the request is accepted, applied or queued, not when
	/// its animations finish; see [`Self::settled`].
	pub async fn navigate(&self, op: StackOp<S>) -> Result<()> {
		let (reply, rx) = oneshot::channel();
		self.command(Command::Navigate { op, reply }).await?;
		rx.await.map_err(|_| NavigatorError::Closed)?
	}

	/// Reports what the presentation layer currently shows, bottom to top.
	pub async fn reconcile(&self, snapshot: Vec<S::Id>) -> Result<()> {
		self.command(Command::Reconcile(snapshot)).await
	}

	/// Snapshot of the canonical routes, bottom to top.
	pub async fn routes(&self) -> Result<Vec<Route<S>>> {
		let (reply, rx) = oneshot::channel();
		self.command(Command::Routes(reply)).await?;
		rx.await.map_err(|_| NavigatorError::Closed)
	}

	/// Resolves when nothing is in flight or queued.
	pub async fn settled(&self) -> Result<()> {
		let (reply, rx) = oneshot::channel();
		self.command(Command::Settled(reply)).await?;
		rx.await.map_err(|_| NavigatorError::Closed)
	}

	/// Stops the actor and waits for it to exit.
	///
	/// Pending commands are discarded. Safe to call from several clones.
	pub async fn shutdown(&self) {
		self.cancel.cancel();
		let join = self.join.lock().await.take();
		if let Some(join) = join
			&& let Err(err) = join.await
		{
			tracing::warn!(%err, "nav.runtime: task failed");
		}
	}

	async fn command(&self, cmd: Command<S, A>) -> Result<()> {
		if self.cancel.is_cancelled() {
			return Err(NavigatorError::Closed);
		}
		self.tx.send(cmd).await.map_err(|_| NavigatorError::Closed)
	}
}
