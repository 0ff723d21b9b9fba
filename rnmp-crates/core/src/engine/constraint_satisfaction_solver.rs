use log::debug;

use super::cp::Assignments;
use super::cp::EmptyDomain;
use super::cp::PropagatorQueue;
use super::cp::TrailedValues;
use super::cp::WatchListCP;
use super::predicates::Predicate;
use super::propagation::EnqueueDecision;
use super::propagation::Entailment;
use super::propagation::NotificationContext;
use super::propagation::PropagationContext;
use super::propagation::PropagationContextMut;
use super::propagation::Propagator;
use super::propagation::PropagatorConstructor;
use super::propagation::PropagatorConstructorContext;
use super::propagation::PropagatorId;
use super::solver_statistics::EngineStatistics;
use super::variables::DomainId;
use super::variables::IntegerVariable;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::PropagationStatusCP;
use crate::containers::KeyedVec;
use crate::rnmp_assert_moderate;
use crate::rnmp_assert_simple;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// The propagation engine: owns the domain store, the propagators and the queue which drives
/// them to a fixed point.
///
/// The search does not live here; it uses [`ConstraintSatisfactionSolver::new_checkpoint`],
/// [`ConstraintSatisfactionSolver::post`], [`ConstraintSatisfactionSolver::propagate`] and
/// [`ConstraintSatisfactionSolver::restore_to`] to explore the search tree.
pub struct ConstraintSatisfactionSolver {
    state: CSPSolverState,
    assignments: Assignments,
    trailed_values: TrailedValues,
    watch_list: WatchListCP,
    propagators: KeyedVec<PropagatorId, Box<dyn Propagator>>,
    propagator_queue: PropagatorQueue,
    pub(crate) statistics: EngineStatistics,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CSPSolverState {
    Ready,
    /// A root-level propagation failed; no assignment can satisfy the constraints.
    Infeasible,
}

impl std::fmt::Debug for ConstraintSatisfactionSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintSatisfactionSolver")
            .field("state", &self.state)
            .field("assignments", &self.assignments)
            .field(
                "propagators",
                &self
                    .propagators
                    .iter()
                    .map(|propagator| propagator.name().to_owned())
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl Default for ConstraintSatisfactionSolver {
    fn default() -> Self {
        ConstraintSatisfactionSolver {
            state: CSPSolverState::Ready,
            assignments: Assignments::default(),
            trailed_values: TrailedValues::default(),
            watch_list: WatchListCP::default(),
            propagators: KeyedVec::default(),
            propagator_queue: PropagatorQueue::default(),
            statistics: EngineStatistics::default(),
        }
    }
}

impl ConstraintSatisfactionSolver {
    /// Creates a variable with the domain `[lower_bound, upper_bound]`.
    pub fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.watch_list.grow();
        self.assignments.grow(lower_bound, upper_bound)
    }

    pub fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    pub fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(&self.assignments)
    }

    pub fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(&self.assignments)
    }

    pub fn is_infeasible(&self) -> bool {
        self.state == CSPSolverState::Infeasible
    }

    /// Marks the problem as having no solution; used when the model itself is contradictory.
    pub(crate) fn declare_infeasible(&mut self) {
        self.state = CSPSolverState::Infeasible;
    }

    /// Adds a propagator and propagates the root to a fixed point.
    ///
    /// If the root becomes inconsistent the solver is left in the infeasible state and every later
    /// call fails with [`ConstraintOperationError::InfeasibleState`].
    pub fn add_propagator<Constructor: PropagatorConstructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<(), ConstraintOperationError> {
        if self.is_infeasible() {
            return Err(ConstraintOperationError::InfeasibleState);
        }
        if self.get_checkpoint() != 0 {
            return Err(ConstraintOperationError::NotAtRoot);
        }

        let propagator_id = PropagatorId(self.propagators.len() as u32);
        let context = PropagatorConstructorContext::new(
            &mut self.watch_list,
            &mut self.trailed_values,
            &self.assignments,
            propagator_id,
        );
        let propagator = constructor.create(context);
        let priority = propagator.priority();

        let pushed_id = self.propagators.push(Box::new(propagator));
        rnmp_assert_simple!(pushed_id == propagator_id);

        self.propagator_queue
            .enqueue_propagator(propagator_id, priority);

        if let Err(inconsistency) = self.propagate() {
            debug!(
                "Root became inconsistent after adding {}: {inconsistency}",
                self.propagators[propagator_id].name()
            );
            self.state = CSPSolverState::Infeasible;
            return Err(ConstraintOperationError::InfeasiblePropagator);
        }

        Ok(())
    }

    pub fn get_checkpoint(&self) -> usize {
        self.assignments.get_checkpoint()
    }

    pub fn new_checkpoint(&mut self) {
        rnmp_assert_simple!(self.propagator_queue.is_empty());

        self.assignments.new_checkpoint();
        self.trailed_values.new_checkpoint();
    }

    /// Undoes every change made after checkpoint `checkpoint` was taken.
    pub fn restore_to(&mut self, checkpoint: usize) {
        rnmp_assert_simple!(checkpoint <= self.get_checkpoint());

        self.assignments.synchronise(checkpoint);
        self.trailed_values.synchronise(checkpoint);
        self.propagator_queue.clear();

        for propagator in self.propagators.iter_mut() {
            propagator.synchronise(PropagationContext::new(
                &self.assignments,
                &self.trailed_values,
            ));
        }
    }

    /// Narrows a domain outside of any propagator, e.g. for a decision.
    pub fn post(&mut self, predicate: Predicate) -> Result<(), EmptyDomain> {
        self.assignments.post_predicate(predicate)
    }

    /// Notifies the watchers of every pending event and runs enqueued propagators until no
    /// propagator is enqueued or one of them fails. On failure the queue and the pending events
    /// are cleared; the domains are left as they were at the failure and must be restored by the
    /// caller.
    pub fn propagate(&mut self) -> PropagationStatusCP {
        loop {
            self.notify_propagators_about_domain_events();

            let Some(propagator_id) = self.propagator_queue.pop() else {
                break;
            };

            self.statistics.num_propagations += 1;

            let context = PropagationContextMut::new(
                &mut self.assignments,
                &mut self.trailed_values,
                propagator_id,
            );
            if let Err(inconsistency) = self.propagators[propagator_id].propagate(context) {
                self.propagator_queue.clear();
                self.assignments.clear_events();
                return Err(inconsistency);
            }
        }

        rnmp_assert_moderate!(!self.assignments.has_pending_events());

        Ok(())
    }

    fn notify_propagators_about_domain_events(&mut self) {
        for (event, domain) in self.assignments.take_events() {
            for &propagator_var in self.watch_list.get_affected_propagators(event, domain) {
                let propagator = &mut self.propagators[propagator_var.propagator];
                let context =
                    NotificationContext::new(&self.assignments, &mut self.trailed_values);

                if propagator.notify(context, propagator_var.variable, event)
                    == EnqueueDecision::Enqueue
                {
                    self.propagator_queue
                        .enqueue_propagator(propagator_var.propagator, propagator.priority());
                }
            }
        }
    }

    /// Returns the names of the propagators which report that the current domains violate them.
    pub fn violated_propagators(&self) -> Vec<&str> {
        let context = PropagationContext::new(&self.assignments, &self.trailed_values);

        self.propagators
            .iter()
            .filter(|propagator| propagator.is_entailed(context) == Entailment::False)
            .map(|propagator| propagator.name())
            .collect()
    }

    pub fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics
            .log(statistic_logger.attach_to_prefix("engine"));

        for (propagator_id, propagator) in self.propagators.keys().zip(self.propagators.iter()) {
            propagator.log_statistics(
                statistic_logger
                    .attach_to_prefix(propagator.name())
                    .attach_to_prefix(propagator_id.0),
            );
        }
    }
}
