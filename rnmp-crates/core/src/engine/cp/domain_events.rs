use std::fmt::Display;

use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// A description of the kinds of events that can happen on a bounded integer domain.
#[derive(Debug, EnumSetType, Hash)]
pub enum IntDomainEvent {
    /// The domain collapsed to a single value.
    Assign,
    /// The lower bound was tightened.
    LowerBound,
    /// The upper bound was tightened.
    UpperBound,
}

impl Display for IntDomainEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntDomainEvent::Assign => write!(f, "[Event:Assign]"),
            IntDomainEvent::LowerBound => write!(f, "[Event:LB]"),
            IntDomainEvent::UpperBound => write!(f, "[Event:UB]"),
        }
    }
}

/// The set of events a propagator subscribes to for one variable.
#[derive(Debug, Copy, Clone)]
pub struct DomainEvents {
    events: EnumSet<IntDomainEvent>,
}

impl DomainEvents {
    /// Both lower and upper bound tightening.
    pub const BOUNDS: DomainEvents =
        DomainEvents::new(enum_set!(IntDomainEvent::LowerBound | IntDomainEvent::UpperBound));
    /// Every event.
    pub const ANY_INT: DomainEvents = DomainEvents::new(enum_set!(
        IntDomainEvent::Assign | IntDomainEvent::LowerBound | IntDomainEvent::UpperBound
    ));
    pub const LOWER_BOUND: DomainEvents = DomainEvents::new(enum_set!(IntDomainEvent::LowerBound));
    pub const UPPER_BOUND: DomainEvents = DomainEvents::new(enum_set!(IntDomainEvent::UpperBound));
    pub const ASSIGN: DomainEvents = DomainEvents::new(enum_set!(IntDomainEvent::Assign));

    pub(crate) const fn new(events: EnumSet<IntDomainEvent>) -> DomainEvents {
        DomainEvents { events }
    }

    pub(crate) fn events(&self) -> EnumSet<IntDomainEvent> {
        self.events
    }
}
