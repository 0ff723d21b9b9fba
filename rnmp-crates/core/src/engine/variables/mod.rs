//! The variables a propagator can read and narrow: plain domains and offset views over them.
mod domain_id;
mod integer_variable;
mod offset_view;

pub use domain_id::DomainId;
pub use integer_variable::*;
pub use offset_view::OffsetView;
