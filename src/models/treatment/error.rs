use std::error::Error as StdError;

use thiserror::Error;
use twine_solvers::equation::EvalError;

use crate::support::root::BracketError;

use super::{DosePoint, Location, Parameter};

/// A plant was asked for something its configuration cannot provide.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// The process model does not report `parameter` at `location`.
    #[error("{parameter} is not available at {location}")]
    Unreadable {
        location: Location,
        parameter: Parameter,
    },

    /// No chemical addition point exists at this position.
    #[error("no {0} addition point")]
    UnknownDosePoint(DosePoint),

    /// Percent TOC removal needs a positive influent TOC.
    #[error("TOC removal is undefined for influent TOC of {influent} mg/L")]
    UndefinedTocRemoval { influent: f64 },

    #[error("invalid dose search bracket")]
    Bracket(#[from] BracketError),
}

/// Errors that can occur while running a plant.
#[derive(Debug, Error)]
pub enum PlantError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The process model itself failed.
    #[error("process model failed")]
    Model(#[source] Box<dyn StdError + Send + Sync>),
}

impl PlantError {
    pub(super) fn model(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Model(Box::new(err))
    }
}

impl<ME> From<EvalError<ME, ConfigurationError>> for PlantError
where
    ME: StdError + Send + Sync + 'static,
{
    fn from(err: EvalError<ME, ConfigurationError>) -> Self {
        match err {
            EvalError::Model(err) => Self::model(err),
            EvalError::Problem(err) => Self::Configuration(err),
        }
    }
}
