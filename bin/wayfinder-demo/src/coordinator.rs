//! Transition functions for the demo screens and the coordinator above them.

use std::time::Duration;

use wayfinder_navigator::route::{RouteStack, StackOp};
use wayfinder_navigator::{Effects, Reducer, from_fn};

use crate::screens::{AppAction, AppScreen, DetailAction, HomeAction, ListAction, Number, NumberAction, NumberDetail};

/// Delay before a requested increment lands.
pub const INCREMENT_DELAY: Duration = Duration::from_secs(3);

pub fn screens() -> impl Reducer<Screen = AppScreen, Action = AppAction> {
	let detail = from_fn(|state: &mut NumberDetail, action: &DetailAction| match action {
		DetailAction::IncrementAfterDelayTapped => Effects::send_after(DetailAction::IncrementTapped, INCREMENT_DELAY),
		DetailAction::IncrementTapped => {
			state.number += 1;
			Effects::none()
		}
		_ => Effects::none(),
	});
	detail.pullback::<Number, NumberAction>().pullback::<AppScreen, AppAction>()
}

/// Turns screen intents into stack operations.
pub fn routes(stack: &RouteStack<AppScreen>, _index: usize, action: &AppAction) -> Effects<AppScreen, AppAction> {
	let op = match action {
		AppAction::Home(HomeAction::StartTapped) => StackOp::sheet(AppScreen::list(0..4), true),
		AppAction::Number(NumberAction::List(ListAction::NumberSelected(number))) => {
			StackOp::Push(AppScreen::detail(*number))
		}
		AppAction::Number(NumberAction::Detail(action)) => match action {
			DetailAction::ShowDouble(number) => StackOp::sheet(AppScreen::detail(number * 2), false),
			DetailAction::GoBackTapped => StackOp::GoBack(1),
			DetailAction::GoBackToNumbersList => StackOp::go_back_to(AppScreen::is_list),
			DetailAction::GoBackToRootTapped => StackOp::GoBackToRoot,
			DetailAction::KillAll => StackOp::DismissAll,
			DetailAction::IncrementTapped => return refresh_list(stack),
			DetailAction::IncrementAfterDelayTapped => return Effects::none(),
		},
	};
	Effects::navigate(op)
}

/// Rewrites the topmost numbers list once any detail has been incremented.
fn refresh_list(stack: &RouteStack<AppScreen>) -> Effects<AppScreen, AppAction> {
	let Some(mut route) = stack.iter().rev().find(|route| route.screen.is_list()).cloned() else {
		return Effects::none();
	};
	if let AppScreen::Number(Number::List(list)) = &mut route.screen {
		list.numbers = vec![10, 20, 30, 50, 100];
	}
	Effects::navigate(StackOp::UpdateOrAppend(route))
}
