//! Scripted tour of a coordinator-driven navigation flow.
//!
//! A home screen opens a numbers list in a sheet, drills into details,
//! schedules a delayed increment, simulates a user swipe and unwinds again.
//! Every animation is faked by [`TimedPresenter`] so the step ordering can
//! be read off the log.

mod cli;
mod coordinator;
mod presenter;
mod screens;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use presenter::TimedPresenter;
use screens::{AppAction, AppScreen, DetailAction, HomeAction, ListAction};
use wayfinder_navigator::route::RouteStack;
use wayfinder_navigator::{Address, AddressingMode, Navigator, NavigatorConfig, NavigatorCore, NavigatorHandle, route_fn};

type Handle = NavigatorHandle<AppScreen, AppAction>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let config = load_config(&cli)?;
	tracing::info!(addressing = config.addressing.as_str(), transitions = ?config.transitions, "demo.start");

	let presenter = Arc::new(TimedPresenter {
		animation: Duration::from_millis(cli.animation_ms),
	});
	let core = NavigatorCore::new(RouteStack::new(AppScreen::home(), true), coordinator::screens(), &config)
		.with_route_reducer(route_fn(coordinator::routes));
	let handle = Navigator::spawn(core, presenter, &config);

	let result = tour(&handle).await;
	handle.shutdown().await;
	result
}

fn load_config(cli: &Cli) -> anyhow::Result<NavigatorConfig> {
	let mut config = match &cli.config {
		Some(path) => NavigatorConfig::from_path(path).with_context(|| format!("failed to load {}", path.display()))?,
		None => NavigatorConfig::default(),
	};
	if let Some(addressing) = cli.addressing {
		config = config.addressing(addressing.into());
	}
	if let Some(transitions) = cli.transitions {
		config = config.transitions(transitions.into());
	}
	config.validate()?;
	Ok(config)
}

async fn tour(handle: &Handle) -> anyhow::Result<()> {
	tap(handle, HomeAction::StartTapped).await?;
	tap(handle, ListAction::NumberSelected(2)).await?;
	tap(handle, DetailAction::ShowDouble(2)).await?;

	tap(handle, DetailAction::IncrementAfterDelayTapped).await?;
	tokio::time::sleep(coordinator::INCREMENT_DELAY + Duration::from_millis(200)).await;
	log_stack(handle, "after delayed increment").await?;

	swipe_down(handle).await?;

	tap(handle, DetailAction::GoBackToNumbersList).await?;
	tap(handle, ListAction::NumberSelected(5)).await?;
	tap(handle, DetailAction::ShowDouble(5)).await?;
	tap(handle, DetailAction::KillAll).await?;

	let labels = labels(handle).await?;
	println!("{}", labels.join(" > "));
	Ok(())
}

/// Sends `action` from the top screen and waits for every animation it causes.
async fn tap(handle: &Handle, action: impl Into<AppAction>) -> anyhow::Result<()> {
	let routes = handle.routes().await?;
	let top = routes.last().context("route stack is empty")?;
	let address = match handle.addressing() {
		AddressingMode::Positional => Address::Index(routes.len() - 1),
		AddressingMode::Identified => Address::Id(top.id()),
	};
	let action = action.into();
	tracing::info!(from = %top.screen.label(), ?action, "demo.tap");

	handle.send(address, action).await?;
	handle.settled().await?;
	log_stack(handle, "settled").await
}

/// Pretends the user dragged the top sheet away without going through the
/// navigator.
async fn swipe_down(handle: &Handle) -> anyhow::Result<()> {
	let mut shown: Vec<_> = handle.routes().await?.iter().map(|route| route.id()).collect();
	shown.pop();
	tracing::info!(remaining = shown.len(), "demo.gesture.swipe_down");
	handle.reconcile(shown).await?;
	log_stack(handle, "after gesture").await
}

async fn labels(handle: &Handle) -> anyhow::Result<Vec<String>> {
	Ok(handle.routes().await?.iter().map(|route| route.screen.label()).collect())
}

async fn log_stack(handle: &Handle, when: &str) -> anyhow::Result<()> {
	let labels = labels(handle).await?;
	tracing::info!(when, stack = %labels.join(" > "), "demo.stack");
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("wayfinder_demo=debug,wayfinder_navigator=debug,wayfinder_route=debug,info")
		} else {
			EnvFilter::new("wayfinder_demo=info,warn")
		}
	});
	tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
