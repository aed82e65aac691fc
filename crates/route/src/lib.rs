//! Route stack data model for data-driven navigation.
//!
//! A [`RouteStack`] is an ordered, identity-keyed sequence of [`Route`]s with
//! exactly one root at index 0. Navigation is expressed as values: a
//! [`StackOp`] describes what should happen, [`diff`] decomposes the change
//! into primitive [`Step`]s, and [`RouteStack::apply_step`] replays them one
//! at a time against the live stack.

/// Error types for stack invariant violations.
pub mod error;
#[cfg(test)]
mod invariants;
/// Declarative stack-operation requests.
pub mod op;
/// Routes and presentation styles.
pub mod route;
/// Screen identity contract.
pub mod screen;
/// The route stack and its operations.
pub mod stack;
/// Primitive transition steps and the structural diff.
pub mod step;

pub use error::{Result, StackError};
pub use op::{OpOutcome, Predicate, StackOp};
pub use route::{DismissHook, Modal, ModalStyle, Presentation, Route, Style};
pub use screen::Screen;
pub use stack::{RouteStack, UpdateOrAppend};
pub use step::{Step, StepKind, diff};
