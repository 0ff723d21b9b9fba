//! The propagators of the planning model: one per constraint family.
mod channeling;
pub mod cumulative;
mod max_blocked;
mod objective_bound;
mod optional_start;
mod precedence;

pub use channeling::*;
pub use max_blocked::*;
pub use objective_bound::*;
pub use optional_start::*;
pub use precedence::*;
