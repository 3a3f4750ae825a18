use std::error::Error as StdError;

use thiserror::Error;

use crate::{
    models::treatment::{ConfigurationError, DoseTarget, PlantError},
    support::root::RootError,
};

use super::SetpointFlags;

/// Errors that end an [`auto_dose`](super::auto_dose) run.
///
/// Every variant is terminal; the plant is left with whatever doses were
/// applied when the error occurred.
#[derive(Debug, Error)]
pub enum AutoDoseError {
    #[error("invalid plant configuration")]
    Configuration(#[from] ConfigurationError),

    #[error("process model failed")]
    Model(#[source] Box<dyn StdError + Send + Sync>),

    /// Bisection confirmed a sign change but found no non-negative root.
    #[error("no root found for {target}")]
    RootNotFound { target: DoseTarget },

    /// Neither the secant search nor its fallback reached a non-negative dose.
    #[error("no feasible dose found for {target}")]
    InfeasibleSearch { target: DoseTarget },

    #[error("setpoints not met after {passes} passes ({flags:?})")]
    IterationBudgetExceeded { passes: usize, flags: SetpointFlags },

    /// TOC removal requirements are only defined below the configured
    /// alkalinity limit. `alkalinity` is in mg/L as CaCO3.
    #[error("TOC removal is not supported for influent alkalinity of {alkalinity} mg/L")]
    UnsupportedRawWater { alkalinity: f64 },
}

impl AutoDoseError {
    pub(super) fn from_search(target: DoseTarget, err: RootError<PlantError>) -> Self {
        match err {
            RootError::NoRootInBracket { .. } => Self::RootNotFound { target },
            RootError::Infeasible { .. } => Self::InfeasibleSearch { target },
            RootError::Objective(err) => err.into(),
        }
    }
}

impl From<PlantError> for AutoDoseError {
    fn from(err: PlantError) -> Self {
        match err {
            PlantError::Configuration(err) => Self::Configuration(err),
            PlantError::Model(err) => Self::Model(err),
        }
    }
}
