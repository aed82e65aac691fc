use std::sync::Arc;
use std::time::Duration;

use wayfinder_navigator::route::{ModalStyle, Presentation, StepKind};
use wayfinder_navigator::{AddressingMode, NavigatorConfig};

use crate::common::{NumberDetailAction, REFRESHED, Recorder, ScreenAction, ids, routes, spawn_home, tap, top_id};

#[tokio::test(start_paused = true)]
async fn test_numbers_flow_round_trip() {
	let recorder = Arc::new(Recorder::default());
	let handle = spawn_home(&NavigatorConfig::default(), Arc::clone(&recorder));
	let home = top_id(&handle).await;

	tap(&handle, ScreenAction::start()).await;
	let stack = routes(&handle).await;
	assert_eq!(stack.len(), 2);
	assert!(matches!(stack[1].presentation, Presentation::Sheet(ref modal) if modal.embedded));
	assert_eq!(stack[1].screen.as_list().unwrap().numbers, vec![0, 1, 2, 3]);
	let list = stack[1].id();

	tap(&handle, ScreenAction::select(2)).await;
	let first = top_id(&handle).await;
	tap(&handle, ScreenAction::detail(NumberDetailAction::ShowDouble(2))).await;
	let stack = routes(&handle).await;
	let doubled = stack[3].id();
	assert_eq!(stack[3].screen.as_detail().unwrap().number, 4);
	assert_eq!(ids(&handle).await, vec![home, list, first, doubled]);

	tap(&handle, ScreenAction::detail(NumberDetailAction::GoBackToNumbersList)).await;
	assert_eq!(ids(&handle).await, vec![home, list]);

	tap(&handle, ScreenAction::select(1)).await;
	let second = top_id(&handle).await;
	tap(&handle, ScreenAction::detail(NumberDetailAction::GoBackToRootTapped)).await;
	assert_eq!(ids(&handle).await, vec![home]);

	assert_eq!(
		recorder.steps(),
		vec![
			(StepKind::Present(ModalStyle::Sheet), list),
			(StepKind::Push, first),
			(StepKind::Present(ModalStyle::Sheet), doubled),
			(StepKind::Dismiss, doubled),
			(StepKind::Pop, first),
			(StepKind::Push, second),
			(StepKind::Pop, second),
			(StepKind::Dismiss, list),
		]
	);
	assert_eq!(recorder.max_active(), 1);
	handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_delayed_increment_refreshes_the_list() {
	let recorder = Arc::new(Recorder::default());
	let handle = spawn_home(&NavigatorConfig::default(), Arc::clone(&recorder));

	tap(&handle, ScreenAction::start()).await;
	tap(&handle, ScreenAction::select(3)).await;
	let animated = recorder.steps().len();
	tap(&handle, ScreenAction::detail(NumberDetailAction::IncrementAfterDelayTapped)).await;
	assert_eq!(routes(&handle).await[2].screen.as_detail().unwrap().number, 3);

	tokio::time::sleep(Duration::from_secs(4)).await;
	let stack = routes(&handle).await;
	assert_eq!(stack.len(), 3);
	assert_eq!(stack[2].screen.as_detail().unwrap().number, 4);
	assert_eq!(stack[1].screen.as_list().unwrap().numbers, REFRESHED.to_vec());
	assert!(matches!(stack[1].presentation, Presentation::Sheet(_)));
	assert_eq!(recorder.steps().len(), animated);
	handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_delayed_increment_after_going_back_is_dropped() {
	let recorder = Arc::new(Recorder::default());
	let handle = spawn_home(&NavigatorConfig::default(), Arc::clone(&recorder));

	tap(&handle, ScreenAction::start()).await;
	tap(&handle, ScreenAction::select(3)).await;
	tap(&handle, ScreenAction::detail(NumberDetailAction::IncrementAfterDelayTapped)).await;
	tap(&handle, ScreenAction::detail(NumberDetailAction::GoBackTapped)).await;

	tokio::time::sleep(Duration::from_secs(4)).await;
	let stack = routes(&handle).await;
	assert_eq!(stack.len(), 2);
	assert_eq!(stack[1].screen.as_list().unwrap().numbers, vec![0, 1, 2, 3]);
	handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_positional_actions_follow_the_slot() {
	let config = NavigatorConfig::default().addressing(AddressingMode::Positional);
	let recorder = Arc::new(Recorder::default());
	let handle = spawn_home(&config, Arc::clone(&recorder));
	assert_eq!(handle.addressing(), AddressingMode::Positional);

	handle.send_to_index(0, ScreenAction::start()).await.unwrap();
	handle.settled().await.unwrap();
	handle.send_to_index(1, ScreenAction::select(5)).await.unwrap();
	handle.settled().await.unwrap();
	assert_eq!(routes(&handle).await[2].screen.as_detail().unwrap().number, 5);

	handle
		.send_to_index(2, ScreenAction::detail(NumberDetailAction::GoBackTapped))
		.await
		.unwrap();
	handle.settled().await.unwrap();
	let before = ids(&handle).await;
	assert_eq!(before.len(), 2);

	handle
		.send_to_index(2, ScreenAction::detail(NumberDetailAction::IncrementTapped))
		.await
		.unwrap();
	handle.settled().await.unwrap();
	let stack = routes(&handle).await;
	assert_eq!(stack.iter().map(|route| route.id()).collect::<Vec<_>>(), before);
	assert_eq!(stack[1].screen.as_list().unwrap().numbers, vec![0, 1, 2, 3]);
	handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_kill_all_unwinds_one_step_at_a_time() {
	let recorder = Arc::new(Recorder::default());
	let handle = spawn_home(&NavigatorConfig::default(), Arc::clone(&recorder));
	let home = top_id(&handle).await;

	tap(&handle, ScreenAction::start()).await;
	tap(&handle, ScreenAction::select(1)).await;
	tap(&handle, ScreenAction::detail(NumberDetailAction::ShowDouble(1))).await;
	let built = recorder.steps().len();

	tap(&handle, ScreenAction::detail(NumberDetailAction::KillAll)).await;
	assert_eq!(ids(&handle).await, vec![home]);
	let kinds: Vec<_> = recorder.steps()[built..].iter().map(|(kind, _)| *kind).collect();
	assert_eq!(kinds, vec![StepKind::Dismiss, StepKind::Pop, StepKind::Dismiss]);
	assert_eq!(recorder.max_active(), 1);
	handle.shutdown().await;
}
