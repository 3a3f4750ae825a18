//! Single-dose problems and the objective that drives them.

use std::{fmt, marker::PhantomData};

use tracing::trace;
use twine_core::{EquationProblem, Model};
use twine_solvers::equation;

use crate::support::root::{Bracket, Objective};

use super::{
    ConfigurationError, DosePoint, Location, Parameter, Plant, PlantError, PlantInput, WaterQuality,
};

/// Quantities a dose can be solved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetParameter {
    Ph,
    Alkalinity,
    Tthm,
    Haa5,
    /// Percent TOC removed between the influent and the target location.
    TocRemoval,
    FreeChlorine,
}

impl TargetParameter {
    /// The effluent parameter read directly, or `None` for derived quantities.
    fn parameter(self) -> Option<Parameter> {
        match self {
            Self::Ph => Some(Parameter::Ph),
            Self::Alkalinity => Some(Parameter::Alkalinity),
            Self::Tthm => Some(Parameter::Tthm),
            Self::Haa5 => Some(Parameter::Haa5),
            Self::FreeChlorine => Some(Parameter::FreeChlorine),
            Self::TocRemoval => None,
        }
    }

    /// Observes this quantity at `location`.
    fn observe(
        self,
        quality: &impl WaterQuality,
        location: Location,
    ) -> Result<f64, ConfigurationError> {
        match self.parameter() {
            Some(parameter) => quality.read(location, parameter),
            None => quality.toc_removal(location),
        }
    }
}

impl fmt::Display for TargetParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parameter() {
            Some(parameter) => parameter.fmt(f),
            None => f.write_str("TOC removal"),
        }
    }
}

/// One single-variable dosing problem.
///
/// Find the dose at `dose` that brings `parameter` at `location` to `value`,
/// starting the search from `bracket`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoseTarget {
    pub dose: DosePoint,
    pub parameter: TargetParameter,
    pub location: Location,
    pub value: f64,
    pub bracket: Bracket,
}

impl fmt::Display for DoseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} dose for {} of {} at {}",
            self.dose, self.parameter, self.value, self.location
        )
    }
}

/// Maps a dose onto a full plant input and scores the resulting effluent.
struct DoseProblem<'a, Q> {
    target: &'a DoseTarget,
    base: &'a PlantInput,
    _effluent: PhantomData<Q>,
}

impl<'a, Q> DoseProblem<'a, Q> {
    fn new(target: &'a DoseTarget, base: &'a PlantInput) -> Self {
        Self {
            target,
            base,
            _effluent: PhantomData,
        }
    }
}

impl<Q: WaterQuality> EquationProblem<1> for DoseProblem<'_, Q> {
    type Input = PlantInput;
    type Output = Q;
    type Error = ConfigurationError;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        let mut input = self.base.clone();
        input.doses.set(self.target.dose, x[0])?;
        Ok(input)
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        let target = self.target;
        let observed = target.parameter.observe(output, target.location)?;
        Ok([observed - target.value])
    }
}

/// The residual `observed - target` as a function of one dose.
///
/// Every evaluation applies the dose to the plant and re-runs its model, so
/// the plant always reflects the most recently evaluated dose.
pub struct DoseObjective<'a, M: Model<Input = PlantInput>> {
    plant: &'a mut Plant<M>,
    target: &'a DoseTarget,
}

impl<'a, M> DoseObjective<'a, M>
where
    M: Model<Input = PlantInput>,
    M::Output: WaterQuality,
{
    pub fn new(plant: &'a mut Plant<M>, target: &'a DoseTarget) -> Self {
        Self { plant, target }
    }
}

impl<M> Objective for DoseObjective<'_, M>
where
    M: Model<Input = PlantInput>,
    M::Output: WaterQuality,
{
    type Error = PlantError;

    fn evaluate(&mut self, dose: f64) -> Result<f64, PlantError> {
        let problem = DoseProblem::<M::Output>::new(self.target, self.plant.input());
        let evaluation = equation::evaluate(self.plant.model(), &problem, [dose])?;

        let [residual] = evaluation.residuals;
        self.plant
            .commit(evaluation.snapshot.input, evaluation.snapshot.output);

        trace!(dose, residual, target = %self.target, "dose evaluated");
        Ok(residual)
    }
}
