use super::TerminationCondition;

/// A [`TerminationCondition`] which never triggers; the search runs until it is exhausted.
#[derive(Clone, Copy, Debug)]
pub struct Indefinite;

impl TerminationCondition for Indefinite {
    fn should_stop(&mut self) -> bool {
        false
    }
}
