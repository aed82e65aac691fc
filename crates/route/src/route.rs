use std::fmt;
use std::sync::Arc;

use crate::screen::Screen;

/// Notification fired when a modal route leaves the stack.
///
/// Equality is identity of the callback, so routes carrying hooks still
/// compare structurally.
#[derive(Clone)]
pub struct DismissHook(Arc<dyn Fn() + Send + Sync>);

impl DismissHook {
	/// Wraps a callback.
	pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
		Self(Arc::new(f))
	}

	/// Invokes the callback.
	pub fn notify(&self) {
		(self.0)();
	}
}

impl fmt::Debug for DismissHook {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("DismissHook(..)")
	}
}

impl PartialEq for DismissHook {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

/// Modal presentation flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalStyle {
	/// Partial-height sheet.
	Sheet,
	/// Full-screen cover.
	Cover,
}

/// Metadata shared by sheets and covers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modal {
	/// Whether the presented content gets its own nested navigation context.
	pub embedded: bool,
	/// Fired once when the route is removed, by the engine or by the user.
	pub on_dismiss: Option<DismissHook>,
}

/// How a route is shown relative to the one below it.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
	/// Bottom of the stack. Exactly one per stack, never popped.
	Root {
		/// Whether the root is wrapped in a navigation context.
		embedded: bool,
	},
	/// Stacked navigation entry.
	Push,
	/// Modal sheet anchored at the route below.
	Sheet(Modal),
	/// Modal full-screen cover anchored at the route below.
	Cover(Modal),
}

/// Fieldless presentation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
	Root,
	Push,
	Sheet,
	Cover,
}

impl Style {
	/// Returns the modal flavour for sheets and covers.
	pub const fn modal(self) -> Option<ModalStyle> {
		match self {
			Self::Sheet => Some(ModalStyle::Sheet),
			Self::Cover => Some(ModalStyle::Cover),
			Self::Root | Self::Push => None,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Root => "root",
			Self::Push => "push",
			Self::Sheet => "sheet",
			Self::Cover => "cover",
		}
	}
}

impl Presentation {
	/// Returns the fieldless style tag.
	pub const fn style(&self) -> Style {
		match self {
			Self::Root { .. } => Style::Root,
			Self::Push => Style::Push,
			Self::Sheet(_) => Style::Sheet,
			Self::Cover(_) => Style::Cover,
		}
	}

	/// Returns modal metadata for sheets and covers.
	pub fn modal(&self) -> Option<&Modal> {
		match self {
			Self::Sheet(modal) | Self::Cover(modal) => Some(modal),
			Self::Root { .. } | Self::Push => None,
		}
	}

	/// Returns true when the presented content owns a navigation context.
	pub fn is_embedded(&self) -> bool {
		match self {
			Self::Root { embedded } => *embedded,
			Self::Push => false,
			Self::Sheet(modal) | Self::Cover(modal) => modal.embedded,
		}
	}
}

/// One entry in a navigation stack: a screen plus its presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<S> {
	pub screen: S,
	pub presentation: Presentation,
}

impl<S> Route<S> {
	/// Creates the root route.
	pub fn root(screen: S, embedded: bool) -> Self {
		Self {
			screen,
			presentation: Presentation::Root { embedded },
		}
	}

	/// Creates a pushed route.
	pub fn push(screen: S) -> Self {
		Self {
			screen,
			presentation: Presentation::Push,
		}
	}

	/// Creates a sheet route.
	pub fn sheet(screen: S, embedded: bool, on_dismiss: Option<DismissHook>) -> Self {
		Self {
			screen,
			presentation: Presentation::Sheet(Modal { embedded, on_dismiss }),
		}
	}

	/// Creates a full-screen cover route.
	pub fn cover(screen: S, embedded: bool, on_dismiss: Option<DismissHook>) -> Self {
		Self {
			screen,
			presentation: Presentation::Cover(Modal { embedded, on_dismiss }),
		}
	}

	pub const fn style(&self) -> Style {
		self.presentation.style()
	}

	/// Returns true for sheets and covers.
	pub const fn is_modal(&self) -> bool {
		self.style().modal().is_some()
	}

	/// Returns the dismissal hook, if this is a modal route that has one.
	pub fn on_dismiss(&self) -> Option<&DismissHook> {
		self.presentation.modal().and_then(|modal| modal.on_dismiss.as_ref())
	}

	/// Maps the screen while keeping the presentation.
	pub fn map<T>(self, f: impl FnOnce(S) -> T) -> Route<T> {
		Route {
			screen: f(self.screen),
			presentation: self.presentation,
		}
	}
}

impl<S: Screen> Route<S> {
	/// Returns the identity of the referenced screen.
	pub fn id(&self) -> S::Id {
		self.screen.id()
	}
}
