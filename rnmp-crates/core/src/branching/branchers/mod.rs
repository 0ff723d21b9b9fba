//! Provides the [`WorksheetBrancher`], the brancher used by the solver.
mod worksheet_brancher;

pub use worksheet_brancher::*;
