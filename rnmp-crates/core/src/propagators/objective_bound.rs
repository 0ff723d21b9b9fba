use crate::basic_types::PropagationStatusCP;
use crate::create_statistics_struct;
use crate::engine::cp::DomainEvents;
use crate::engine::cp::IntDomainEvent;
use crate::engine::cp::TrailedInteger;
use crate::engine::propagation::EnqueueDecision;
use crate::engine::propagation::Entailment;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::NotificationContext;
use crate::engine::propagation::Priority;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::DomainId;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// The [`PropagatorConstructor`] for the [`ObjectiveBoundPropagator`].
#[derive(Clone, Debug)]
pub struct ObjectiveBoundArgs {
    pub objective: DomainId,
    /// The selection flag of every worksheet with its importance.
    pub selections: Box<[(DomainId, i32)]>,
    /// `perturbed[road][t]`
    pub perturbed: Box<[Box<[DomainId]>]>,
    /// `roads_cost[road][t]`
    pub roads_cost: Box<[Box<[i32]>]>,
}

impl PropagatorConstructor for ObjectiveBoundArgs {
    type PropagatorImpl = ObjectiveBoundPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let num_selections = self.selections.len();
        let horizon = self.perturbed.first().map_or(0, |row| row.len());

        for (index, &(selected, _)) in self.selections.iter().enumerate() {
            context.register(selected, DomainEvents::ASSIGN, LocalId::from(index as u32));
        }
        for (road, row) in self.perturbed.iter().enumerate() {
            for (t, &cell) in row.iter().enumerate() {
                context.register(
                    cell,
                    DomainEvents::ASSIGN,
                    LocalId::from((num_selections + road * horizon + t) as u32),
                );
            }
        }
        let objective_id = num_selections + self.perturbed.len() * horizon;
        context.register(
            self.objective,
            DomainEvents::BOUNDS,
            LocalId::from(objective_id as u32),
        );

        let disruption_lower_bounds = (0..horizon)
            .map(|t| {
                let disruption = self
                    .perturbed
                    .iter()
                    .zip(self.roads_cost.iter())
                    .map(|(row, costs)| costs[t] as i64 * context.lower_bound(&row[t]) as i64)
                    .sum::<i64>();
                context.new_trailed_integer(disruption)
            })
            .collect();
        let num_fixed = self
            .perturbed
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| context.is_fixed(*cell))
            .count();
        let num_fixed_cells = context.new_trailed_integer(num_fixed as i64);

        ObjectiveBoundPropagator {
            objective: self.objective,
            selections: self.selections,
            perturbed: self.perturbed,
            roads_cost: self.roads_cost,
            horizon,
            disruption_lower_bounds,
            num_fixed_cells,
            statistics: ObjectiveBoundStatistics::default(),
        }
    }
}

create_statistics_struct!(ObjectiveBoundStatistics {
    num_forced_selections: u64,
    num_objective_fixings: u64,
});

/// Bounds the objective `urgency - peak disruption` from the current domains.
///
/// The disruption caused at each time step by the cells already perturbed is kept in trailed
/// integers which are updated when a cell is assigned, so that they follow backtracking.
#[derive(Clone, Debug)]
pub struct ObjectiveBoundPropagator {
    objective: DomainId,
    selections: Box<[(DomainId, i32)]>,
    perturbed: Box<[Box<[DomainId]>]>,
    roads_cost: Box<[Box<[i32]>]>,
    horizon: usize,
    disruption_lower_bounds: Vec<TrailedInteger>,
    num_fixed_cells: TrailedInteger,
    statistics: ObjectiveBoundStatistics,
}

impl ObjectiveBoundPropagator {
    fn num_cells(&self) -> usize {
        self.perturbed.len() * self.horizon
    }

    fn peak_lower_bound<Context: ReadDomains>(&self, context: &Context) -> i64 {
        self.disruption_lower_bounds
            .iter()
            .map(|&disruption| context.value(disruption))
            .max()
            .unwrap_or(0)
    }

    fn urgency<Context: ReadDomains>(&self, context: &Context, upper: bool) -> i64 {
        self.selections
            .iter()
            .map(|&(selected, importance)| {
                let value = if upper {
                    context.upper_bound(&selected)
                } else {
                    context.lower_bound(&selected)
                };
                importance as i64 * value as i64
            })
            .sum()
    }

    fn all_cells_fixed<Context: ReadDomains>(&self, context: &Context) -> bool {
        context.value(self.num_fixed_cells) == self.num_cells() as i64
    }
}

fn clamp_to_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl Propagator for ObjectiveBoundPropagator {
    fn name(&self) -> &str {
        "ObjectiveBound"
    }

    fn priority(&self) -> Priority {
        Priority::Medium
    }

    fn notify(
        &mut self,
        mut context: NotificationContext,
        local_id: LocalId,
        _event: IntDomainEvent,
    ) -> EnqueueDecision {
        let index = local_id.unpack() as usize;
        let num_selections = self.selections.len();

        if (num_selections..num_selections + self.num_cells()).contains(&index) {
            let road = (index - num_selections) / self.horizon;
            let t = (index - num_selections) % self.horizon;

            context.add_assign(self.num_fixed_cells, 1);
            if context.lower_bound(&self.perturbed[road][t]) == 1 {
                context.add_assign(
                    self.disruption_lower_bounds[t],
                    self.roads_cost[road][t] as i64,
                );
            }
        }

        EnqueueDecision::Enqueue
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let peak_lower_bound = self.peak_lower_bound(&context);
        let upper_bound = self.urgency(&context, true) - peak_lower_bound;
        context.set_upper_bound(&self.objective, clamp_to_i32(upper_bound))?;

        if self.all_cells_fixed(&context) {
            let lower_bound = self.urgency(&context, false) - peak_lower_bound;
            if clamp_to_i32(lower_bound) > context.lower_bound(&self.objective) {
                self.statistics.num_objective_fixings += 1;
            }
            context.set_lower_bound(&self.objective, clamp_to_i32(lower_bound))?;
        }

        let objective_lower_bound = context.lower_bound(&self.objective) as i64;
        for &(selected, importance) in self.selections.iter() {
            if context.is_fixed(&selected) {
                continue;
            }

            // Excluding the worksheet loses its importance for good.
            if upper_bound - (importance as i64) < objective_lower_bound {
                self.statistics.num_forced_selections += 1;
                context.set_lower_bound(&selected, 1)?;
            }
        }

        Ok(())
    }

    fn is_entailed(&self, context: PropagationContext) -> Entailment {
        let all_selections_fixed = self
            .selections
            .iter()
            .all(|(selected, _)| context.is_fixed(selected));
        if !all_selections_fixed || !self.all_cells_fixed(&context) {
            return Entailment::Unknown;
        }

        let value = self.urgency(&context, false) - self.peak_lower_bound(&context);
        let lower_bound = context.lower_bound(&self.objective) as i64;
        let upper_bound = context.upper_bound(&self.objective) as i64;

        if value < lower_bound || value > upper_bound {
            Entailment::False
        } else if lower_bound == upper_bound {
            Entailment::True
        } else {
            Entailment::Unknown
        }
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }
}
