//! Action addressing against a mutable, reorderable stack.

use serde::Deserialize;
use wayfinder_route::{RouteStack, Screen};

/// How a coordinator targets actions at routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressingMode {
	/// By position at send time. Needed when screens lack a stable identity.
	Positional,
	/// By screen identity. Survives insertions and removals below the target.
	#[default]
	Identified,
}

impl AddressingMode {
	/// Builds the address this mode uses for the route at `index`.
	///
	/// Returns `None` when `index` is past the top.
	pub fn address<S: Screen>(self, stack: &RouteStack<S>, index: usize) -> Option<Address<S::Id>> {
		let route = stack.get(index)?;
		Some(match self {
			Self::Positional => Address::Index(index),
			Self::Identified => Address::Id(route.id()),
		})
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Positional => "positional",
			Self::Identified => "identified",
		}
	}
}

/// Target of a routed action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Address<Id> {
	Index(usize),
	Id(Id),
}

impl<Id: Eq + std::hash::Hash> Address<Id> {
	/// Resolves to a live index, or `None` when the target is gone.
	///
	/// Positional addresses are only bounds-checked; whatever route sits at
	/// that index now receives the action.
	pub fn resolve<S>(&self, stack: &RouteStack<S>) -> Option<usize>
	where
		S: Screen<Id = Id>,
	{
		match self {
			Self::Index(index) => (*index < stack.len()).then_some(*index),
			Self::Id(id) => stack.index_of(id),
		}
	}
}

/// An inner screen action paired with the route it was sent from.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteAction<Id, A> {
	pub address: Address<Id>,
	pub action: A,
}

impl<Id, A> RouteAction<Id, A> {
	pub fn at_index(index: usize, action: A) -> Self {
		Self {
			address: Address::Index(index),
			action,
		}
	}

	pub fn at_id(id: Id, action: A) -> Self {
		Self {
			address: Address::Id(id),
			action,
		}
	}
}
