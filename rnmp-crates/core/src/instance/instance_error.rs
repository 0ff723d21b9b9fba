use thiserror::Error;

/// Reasons for rejecting an instance before solving.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    #[error("the horizon must be non-negative, got {0}")]
    NegativeHorizon(i32),
    #[error("the cost row of road {road} has {actual} entries instead of {expected}")]
    CostRowLength {
        road: usize,
        expected: usize,
        actual: usize,
    },
    #[error("{what} must be non-negative, got {value}")]
    NegativeQuantity { what: String, value: i32 },
    #[error(
        "worksheet {worksheet} has duration {duration} but {roads} roads and {workers} worker \
         amounts"
    )]
    DurationMismatch {
        worksheet: usize,
        duration: i32,
        roads: usize,
        workers: usize,
    },
    #[error("{context} refers to road {road}, but there are only {num_roads} roads")]
    UnknownRoad {
        context: String,
        road: usize,
        num_roads: usize,
    },
    #[error("worksheet {worksheet} refers to work center {work_center}, but there are only {num_work_centers}")]
    UnknownWorkCenter {
        worksheet: usize,
        work_center: usize,
        num_work_centers: usize,
    },
    #[error("precedence ({pred}, {succ}) refers to a worksheet which does not exist")]
    UnknownWorksheet { pred: usize, succ: usize },
    #[error("worksheet {0} cannot precede itself")]
    SelfPrecedence(usize),
    #[error("the precedences contain a cycle through worksheet {0}")]
    CyclicPrecedences(usize),
    #[error("the window [{est}, {lst}] of worksheet {worksheet} does not fit in a 32-bit integer once its duration {duration} is added")]
    WindowOutOfRange {
        worksheet: usize,
        est: i32,
        lst: i32,
        duration: i32,
    },
    #[error("the objective of this instance does not fit in a 32-bit integer")]
    ObjectiveOutOfRange,
}
