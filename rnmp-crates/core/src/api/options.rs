/// How the solver picks the next variable to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SearchStrategy {
    /// Complete executed worksheets first, then decide the most important worksheets.
    ImportanceFirst,
    /// Place the worksheets with the most (transitive) predecessors first.
    PrecedenceWeight,
}

/// How the solver picks the start of a worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum StartValueSelection {
    /// The latest start in the current domain.
    LatestStart,
    /// The start which adds the least disruption to the roads.
    LeastDisruption,
}

/// The difficulty class of an instance, read from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceTier {
    Easy,
    Medium,
    Hard,
}

impl InstanceTier {
    /// Names containing `EASY` or `MEDIUM` select those tiers; anything else is [`Self::Hard`].
    pub fn from_name(name: Option<&str>) -> InstanceTier {
        match name {
            Some(name) if name.contains("EASY") => InstanceTier::Easy,
            Some(name) if name.contains("MEDIUM") => InstanceTier::Medium,
            _ => InstanceTier::Hard,
        }
    }

    pub fn default_search(self) -> SearchStrategy {
        match self {
            InstanceTier::Easy => SearchStrategy::PrecedenceWeight,
            InstanceTier::Medium | InstanceTier::Hard => SearchStrategy::ImportanceFirst,
        }
    }

    pub fn default_start_value(self) -> StartValueSelection {
        match self {
            InstanceTier::Easy => StartValueSelection::LeastDisruption,
            InstanceTier::Medium | InstanceTier::Hard => StartValueSelection::LatestStart,
        }
    }
}

/// Options which influence the search of the [`crate::Solver`].
///
/// Unset options are derived from the [`InstanceTier`] of the instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverOptions {
    pub search: Option<SearchStrategy>,
    pub start_value: Option<StartValueSelection>,
}
