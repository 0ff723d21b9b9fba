use crate::create_statistics_struct;

create_statistics_struct!(
    /// Core statistics of the engine (e.g. the number of decisions)
    EngineStatistics {
        /// The number of decisions taken by the search
        num_decisions: u64,
        /// The number of nodes which failed, either through propagation or because a solution was
        /// found and the search continued past it
        num_failures: u64,
        /// The number of times a propagator was invoked
        num_propagations: u64,
        /// The number of improving solutions found
        num_solutions: u64,
        /// The number of times the search restored an earlier checkpoint
        num_backtracks: u64,
        /// The largest number of open choice points
        peak_depth: u64,
        /// The amount of time (in milliseconds) which is spent in the solver
        time_spent_in_solver: u64,
});
