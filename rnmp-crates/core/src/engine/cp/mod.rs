mod assignments;
mod domain_events;
mod propagator_queue;
#[cfg(test)]
pub(crate) mod test_solver;
mod trailed;
mod watch_list_cp;

pub use assignments::Assignments;
pub use assignments::EmptyDomain;
pub use domain_events::*;
pub(crate) use propagator_queue::PropagatorQueue;
pub use trailed::*;
pub(crate) use watch_list_cp::WatchListCP;
pub use watch_list_cp::Watchers;
