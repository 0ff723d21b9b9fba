use std::collections::VecDeque;

use super::InstanceError;

/// The predecessor lists of the precedence relation, with the order in which it can be traversed.
#[derive(Clone, Debug)]
pub struct PrecedenceGraph {
    predecessors: Vec<Vec<usize>>,
    topological_order: Vec<usize>,
}

impl PrecedenceGraph {
    /// Builds the graph over `num_worksheets` nodes; fails on self loops and cycles.
    pub fn new(
        num_worksheets: usize,
        precedences: &[(usize, usize)],
    ) -> Result<PrecedenceGraph, InstanceError> {
        let mut predecessors = vec![Vec::new(); num_worksheets];
        let mut successors = vec![Vec::new(); num_worksheets];

        for &(pred, succ) in precedences {
            if pred >= num_worksheets || succ >= num_worksheets {
                return Err(InstanceError::UnknownWorksheet { pred, succ });
            }
            if pred == succ {
                return Err(InstanceError::SelfPrecedence(pred));
            }
            predecessors[succ].push(pred);
            successors[pred].push(succ);
        }

        // Kahn's algorithm
        let mut in_degree = predecessors.iter().map(Vec::len).collect::<Vec<_>>();
        let mut ready = (0..num_worksheets)
            .filter(|&node| in_degree[node] == 0)
            .collect::<VecDeque<_>>();
        let mut topological_order = Vec::with_capacity(num_worksheets);

        while let Some(node) = ready.pop_front() {
            topological_order.push(node);
            for &succ in &successors[node] {
                in_degree[succ] -= 1;
                if in_degree[succ] == 0 {
                    ready.push_back(succ);
                }
            }
        }

        if topological_order.len() < num_worksheets {
            let on_cycle = (0..num_worksheets)
                .find(|&node| in_degree[node] > 0)
                .unwrap_or_default();
            return Err(InstanceError::CyclicPrecedences(on_cycle));
        }

        Ok(PrecedenceGraph {
            predecessors,
            topological_order,
        })
    }

    pub fn topological_order(&self) -> &[usize] {
        &self.topological_order
    }

    /// The weight of every worksheet: `weight(i) = sum over predecessors p of (1 + weight(p))`.
    ///
    /// Multiple precedences between the same pair count multiple times.
    pub fn weights(&self) -> Vec<u64> {
        let mut weights = vec![0_u64; self.predecessors.len()];

        for &node in &self.topological_order {
            weights[node] = self.predecessors[node]
                .iter()
                .fold(0_u64, |acc, &pred| {
                    acc.saturating_add(weights[pred].saturating_add(1))
                });
        }

        weights
    }
}
