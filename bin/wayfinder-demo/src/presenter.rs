use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;
use wayfinder_navigator::Presenter;
use wayfinder_navigator::route::Step;

/// Stands in for a UI toolkit: every step takes a fixed time to animate.
pub struct TimedPresenter {
	pub animation: Duration,
}

#[async_trait]
impl Presenter<Uuid> for TimedPresenter {
	async fn apply(&self, step: Step<Uuid>) {
		tracing::info!(kind = ?step.kind, index = step.index, id = %step.id, "demo.animate.start");
		tokio::time::sleep(self.animation).await;
		tracing::debug!(kind = ?step.kind, id = %step.id, "demo.animate.done");
	}
}
