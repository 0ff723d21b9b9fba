//! Contains structures and traits to define the decision making procedure of the search.
//!
//! A [`Brancher`] proposes the next decision as a [`Predicate`] over one decision variable of the
//! planning model. The engine then opens a choice point whose alternatives cover the rest of the
//! domain of that variable.
//!
//! The provided [`branchers::WorksheetBrancher`] combines a
//! [`variable_selection::VariableSelector`], which picks either the selection flag or the start
//! of a worksheet, with a [`value_selection::ValueSelector`], which picks the start value.
//! Selection flags are always tried with "executed" first.
mod brancher;
pub mod branchers;
mod selection_context;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::*;
pub use selection_context::SelectionContext;

#[cfg(doc)]
use crate::predicates::Predicate;
