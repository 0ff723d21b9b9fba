//! Provides the [`VariableSelector`] trait which is required for variable selectors to
//! implement; the main method in this trait is [`VariableSelector::select_variable`].
//!
//! Both selectors only ever return variables which are not yet fixed.
mod importance_first;
mod precedence_weight;

pub use importance_first::ImportanceFirst;
pub use precedence_weight::PrecedenceWeight;

use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// A decision variable of a worksheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WorksheetVariable {
    /// The flag stating whether the worksheet with this index is executed.
    Selected(usize),
    /// The start of the worksheet with this index.
    Start(usize),
}

/// Determines which variable to branch on next.
pub trait VariableSelector: std::fmt::Debug {
    /// Returns the variable to branch on, or [`None`] once every variable the selector knows of
    /// is fixed.
    fn select_variable(&mut self, context: &SelectionContext) -> Option<WorksheetVariable>;
}

impl<Selector: VariableSelector + ?Sized> VariableSelector for Box<Selector> {
    fn select_variable(&mut self, context: &SelectionContext) -> Option<WorksheetVariable> {
        (**self).select_variable(context)
    }
}

/// The unfixed selection flag with the highest importance; the first one wins ties.
fn most_important_unfixed(
    context: &SelectionContext,
    selected: &[DomainId],
    importance: &[i32],
) -> Option<WorksheetVariable> {
    let mut best: Option<(usize, i32)> = None;
    for (index, (&flag, &importance)) in selected.iter().zip(importance).enumerate() {
        if context.is_integer_fixed(flag) {
            continue;
        }
        if best.map_or(true, |(_, best_importance)| importance > best_importance) {
            best = Some((index, importance));
        }
    }

    best.map(|(index, _)| WorksheetVariable::Selected(index))
}
