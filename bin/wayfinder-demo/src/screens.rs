//! Screen states and actions of the demo flow.

use uuid::Uuid;
use wayfinder_navigator::route::Screen;

#[derive(Debug, Clone, PartialEq)]
pub struct Home {
	pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumbersList {
	pub id: Uuid,
	pub numbers: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberDetail {
	pub id: Uuid,
	pub number: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Number {
	List(NumbersList),
	Detail(NumberDetail),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppScreen {
	Home(Home),
	Number(Number),
}

impl AppScreen {
	pub fn home() -> Self {
		Self::Home(Home { id: Uuid::new_v4() })
	}

	pub fn list(numbers: impl IntoIterator<Item = i64>) -> Self {
		Self::Number(Number::List(NumbersList {
			id: Uuid::new_v4(),
			numbers: numbers.into_iter().collect(),
		}))
	}

	pub fn detail(number: i64) -> Self {
		Self::Number(Number::Detail(NumberDetail {
			id: Uuid::new_v4(),
			number,
		}))
	}

	pub fn is_list(&self) -> bool {
		matches!(self, Self::Number(Number::List(_)))
	}

	/// Short human-readable label for logs.
	pub fn label(&self) -> String {
		match self {
			Self::Home(_) => "home".to_owned(),
			Self::Number(Number::List(list)) => format!("list{:?}", list.numbers),
			Self::Number(Number::Detail(detail)) => format!("detail({})", detail.number),
		}
	}
}

impl Screen for AppScreen {
	type Id = Uuid;

	fn id(&self) -> Uuid {
		match self {
			Self::Home(home) => home.id,
			Self::Number(Number::List(list)) => list.id,
			Self::Number(Number::Detail(detail)) => detail.id,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeAction {
	StartTapped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListAction {
	NumberSelected(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailAction {
	GoBackTapped,
	GoBackToRootTapped,
	GoBackToNumbersList,
	IncrementAfterDelayTapped,
	IncrementTapped,
	ShowDouble(i64),
	KillAll,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NumberAction {
	List(ListAction),
	Detail(DetailAction),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
	Home(HomeAction),
	Number(NumberAction),
}

impl From<HomeAction> for AppAction {
	fn from(action: HomeAction) -> Self {
		Self::Home(action)
	}
}

impl From<ListAction> for AppAction {
	fn from(action: ListAction) -> Self {
		Self::Number(NumberAction::List(action))
	}
}

impl From<DetailAction> for AppAction {
	fn from(action: DetailAction) -> Self {
		Self::Number(NumberAction::Detail(action))
	}
}

wayfinder_navigator::case!(AppScreen::Home => Home);
wayfinder_navigator::case!(AppScreen::Number => Number);
wayfinder_navigator::case!(Number::List => NumbersList);
wayfinder_navigator::case!(Number::Detail => NumberDetail);
wayfinder_navigator::case!(AppAction::Home => HomeAction);
wayfinder_navigator::case!(AppAction::Number => NumberAction);
wayfinder_navigator::case!(NumberAction::List => ListAction);
wayfinder_navigator::case!(NumberAction::Detail => DetailAction);
