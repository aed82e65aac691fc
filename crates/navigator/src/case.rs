//! Embedding and extraction between a screen union and one of its cases.

/// A part of a tagged union.
///
/// Implemented by the inner screen (or action) type for each outer union it
/// belongs to. Pairs with [`Reducer::pullback`](crate::Reducer::pullback) to
/// run a transition function over just its own case.
pub trait Case<Whole>: Sized {
	/// Wraps the part into the union.
	fn embed(self) -> Whole;

	/// Borrows the part if `whole` holds this case.
	fn extract(whole: &Whole) -> Option<&Self>;

	/// Mutably borrows the part if `whole` holds this case.
	fn extract_mut(whole: &mut Whole) -> Option<&mut Self>;
}

/// Implements [`Case`] for a single-field enum variant.
///
/// ```ignore
/// wayfinder_navigator::case!(ScreenState::Home => HomeState);
/// ```
#[macro_export]
macro_rules! case {
	($union:ident :: $variant:ident => $part:ty) => {
		impl $crate::Case<$union> for $part {
			fn embed(self) -> $union {
				$union::$variant(self)
			}

			fn extract(whole: &$union) -> Option<&Self> {
				match whole {
					$union::$variant(part) => Some(part),
					#[allow(unreachable_patterns)]
					_ => None,
				}
			}

			fn extract_mut(whole: &mut $union) -> Option<&mut Self> {
				match whole {
					$union::$variant(part) => Some(part),
					#[allow(unreachable_patterns)]
					_ => None,
				}
			}
		}
	};
}
