use std::fmt::Display;

use rnmp_core::instance::InstanceError;
use rnmp_core::EvaluationError;
use thiserror::Error;

use crate::parsers::ParseError;

pub type RnmpResult<T> = Result<T, RnmpError>;

#[derive(Error, Debug)]
pub enum RnmpError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The file {0} is not supported.")]
    InvalidInstanceFile(String),
    #[error("The file could not be parsed, more details: {0}")]
    Parse(#[from] ParseError),
    #[error("The instance is malformed, more details: {0}")]
    Instance(#[from] InstanceError),
    #[error("The solution could not be evaluated, more details: {0}")]
    Evaluation(#[from] EvaluationError),
}

impl RnmpError {
    pub fn invalid_instance(path: impl Display) -> Self {
        Self::InvalidInstanceFile(format!("{}", path))
    }
}
