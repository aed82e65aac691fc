#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Navigation engine over a [`RouteStack`](wayfinder_route::RouteStack).
//!
//! # Layers
//!
//! - [`addressing`] resolves an action for "the screen at index 3" or "the
//!   screen with id X" against the live stack and drops it when the target
//!   is gone.
//! - [`reducer`] and [`case`] lift per-screen transition functions over a
//!   screen union so each only ever sees its own state.
//! - [`scheduler`] turns one logical navigation change into a queue of
//!   primitive steps and releases them one acknowledgement at a time.
//! - [`reconcile`] folds user-driven removals reported by the presentation
//!   layer back into canonical state without animating anything.
//! - [`engine`] ties these together as a synchronous state machine and
//!   [`runtime`] drives it from a single tokio task per stack.

pub mod addressing;
pub mod case;
pub mod config;
pub mod dispatch;
pub mod effect;
pub mod engine;
pub mod error;
#[cfg(test)]
mod invariants;
pub mod reconcile;
pub mod reducer;
pub mod runtime;
pub mod scheduler;

pub use addressing::{Address, AddressingMode, RouteAction};
pub use case::Case;
pub use config::{ConfigError, NavigatorConfig};
pub use dispatch::{Dispatch, dispatch};
pub use effect::{Effect, Effects};
pub use engine::{NavigatorCore, Output};
pub use error::{NavigatorError, Result};
pub use reconcile::reconcile;
pub use reducer::{Combine, FnReducer, FnRouteReducer, Pullback, Reducer, RouteReducer, from_fn, route_fn};
pub use runtime::{Navigator, NavigatorHandle, Presenter};
pub use scheduler::{Advance, Issued, StepTicket, TransitionPolicy, TransitionScheduler};
pub use wayfinder_route as route;
