use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Semaphore;
use wayfinder_navigator::NavigatorConfig;
use wayfinder_navigator::route::{DismissHook, ModalStyle, Route, RouteStack, Screen, StackOp, StepKind};

use crate::common::{NumberDetailAction, Recorder, ScreenAction, ScreenState, ids, spawn, spawn_home, top_id};

#[tokio::test(start_paused = true)]
async fn test_swipe_back_during_unwind_recomputes_remaining_steps() {
	let home = ScreenState::home();
	let list = ScreenState::list(0..4);
	let first = ScreenState::detail(3);
	let doubled = ScreenState::detail(6);
	let [home_id, list_id, first_id, doubled_id] = [&home, &list, &first, &doubled].map(|screen| screen.id());
	let stack = RouteStack::from_routes(vec![
		Route::root(home, true),
		Route::sheet(list, true, None),
		Route::push(first),
		Route::sheet(doubled, false, None),
	])
	.unwrap();

	let gate = Arc::new(Semaphore::new(0));
	let recorder = Arc::new(Recorder::gated(Arc::clone(&gate)));
	let handle = spawn(stack, &NavigatorConfig::default(), Arc::clone(&recorder));

	handle
		.send_to_id(doubled_id, ScreenAction::detail(NumberDetailAction::GoBackToRootTapped))
		.await
		.unwrap();
	assert_eq!(ids(&handle).await, vec![home_id, list_id, first_id]);

	// The user swipes the pushed detail away while the sheet is still
	// animating out.
	handle.reconcile(vec![home_id, list_id]).await.unwrap();
	assert_eq!(ids(&handle).await, vec![home_id, list_id]);

	gate.add_permits(8);
	handle.settled().await.unwrap();
	assert_eq!(ids(&handle).await, vec![home_id]);
	assert_eq!(recorder.steps(), vec![(StepKind::Dismiss, doubled_id), (StepKind::Dismiss, list_id)]);
	handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_racing_a_push_keeps_the_new_route() {
	let gate = Arc::new(Semaphore::new(0));
	let recorder = Arc::new(Recorder::gated(Arc::clone(&gate)));
	let handle = spawn_home(&NavigatorConfig::default(), Arc::clone(&recorder));
	let home = top_id(&handle).await;

	handle.send_to_id(home, ScreenAction::start()).await.unwrap();
	let shown = ids(&handle).await;
	let [_, list] = shown[..] else {
		panic!("expected the numbers list on top of home");
	};

	handle.reconcile(vec![home]).await.unwrap();
	assert_eq!(ids(&handle).await, vec![home, list]);

	gate.add_permits(1);
	handle.settled().await.unwrap();
	handle.reconcile(vec![home]).await.unwrap();
	assert_eq!(ids(&handle).await, vec![home]);
	assert_eq!(recorder.steps(), vec![(StepKind::Present(ModalStyle::Sheet), list)]);
	handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_swipe_down_fires_the_dismiss_hook() {
	let recorder = Arc::new(Recorder::default());
	let handle = spawn_home(&NavigatorConfig::default(), Arc::clone(&recorder));
	let home = top_id(&handle).await;
	let fired = Arc::new(AtomicUsize::new(0));
	let hook = {
		let fired = Arc::clone(&fired);
		DismissHook::new(move || {
			fired.fetch_add(1, Ordering::SeqCst);
		})
	};

	handle
		.navigate(StackOp::PresentCover {
			screen: ScreenState::detail(1),
			embedded: false,
			on_dismiss: Some(hook),
		})
		.await
		.unwrap();
	handle.settled().await.unwrap();
	assert_eq!(ids(&handle).await.len(), 2);
	assert_eq!(fired.load(Ordering::SeqCst), 0);

	handle.reconcile(vec![home]).await.unwrap();
	assert_eq!(ids(&handle).await, vec![home]);
	assert_eq!(fired.load(Ordering::SeqCst), 1);
	handle.shutdown().await;
}
