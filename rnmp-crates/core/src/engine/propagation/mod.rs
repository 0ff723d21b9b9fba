//! Contains the propagator interface and the contexts through which propagators talk to the
//! solver.
//!
//! A propagator is created from a [`PropagatorConstructor`], which registers the variables it
//! reads with the watch list. Whenever one of those variables changes, [`Propagator::notify`]
//! is called with the [`LocalId`] under which it was registered, and the propagator may ask to
//! be enqueued. The engine then calls [`Propagator::propagate`] until no propagator is enqueued
//! anymore or one of them fails.
mod constructor;
mod contexts;
mod local_id;
mod propagator;
mod propagator_id;

pub use constructor::*;
pub use contexts::*;
pub use local_id::LocalId;
pub use propagator::*;
pub use propagator_id::*;
