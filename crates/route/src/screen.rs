use std::fmt::Debug;
use std::hash::Hash;

/// Screen state stored in a route.
///
/// The engine never looks inside a screen beyond its identity. Identities
/// must be unique within one stack and stable for as long as the screen is
/// on it.
pub trait Screen: Clone + Send + 'static {
	/// Stable identity, compared for equality only.
	type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

	/// Returns this screen's identity.
	fn id(&self) -> Self::Id;
}
