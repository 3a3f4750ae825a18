use tracing::trace;
use twine_core::Model;
use uom::si::{f64::MassConcentration, mass_concentration::milligram_per_liter};

use crate::support::root::{self, RootConfig, RootError, RootSolution};

use super::{
    ConfigurationError, DoseObjective, DosePoint, DoseTarget, Doses, Location, Parameter,
    PlantError, WaterQuality,
};

/// Design conditions the process model simulates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Conditions {
    /// Average water temperature.
    #[default]
    Average,

    /// Minimum water temperature, the worst case for disinfection.
    Coldest,
}

/// Everything a process model needs to simulate the plant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantInput {
    pub doses: Doses,
    pub conditions: Conditions,
}

/// A treatment plant: a process model, its current input and the latest result.
///
/// The effluent always reflects the most recent [`Plant::run`] or dose search.
/// [`Plant::set_dose`] only changes the input, so callers that read after
/// setting a dose must run the model first.
#[derive(Debug)]
pub struct Plant<M: Model<Input = PlantInput>> {
    model: M,
    input: PlantInput,
    effluent: M::Output,
}

impl<M> Plant<M>
where
    M: Model<Input = PlantInput>,
    M::Output: WaterQuality,
{
    /// Creates a plant and runs the model once so the effluent is current.
    ///
    /// # Errors
    ///
    /// Returns [`PlantError::Model`] if the initial run fails.
    pub fn new(model: M, input: PlantInput) -> Result<Self, PlantError> {
        let effluent = model.call(&input).map_err(PlantError::model)?;
        Ok(Self {
            model,
            input,
            effluent,
        })
    }

    /// Sets the dose at `point`, leaving every other dose untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the plant has no such addition point.
    pub fn set_dose(
        &mut self,
        point: DosePoint,
        dose: MassConcentration,
    ) -> Result<(), ConfigurationError> {
        self.input
            .doses
            .set(point, dose.get::<milligram_per_liter>())
    }

    /// Re-runs the process model with the current input.
    ///
    /// # Errors
    ///
    /// Returns [`PlantError::Model`] if the model fails.
    pub fn run(&mut self) -> Result<(), PlantError> {
        self.effluent = self.model.call(&self.input).map_err(PlantError::model)?;
        trace!("plant model run");
        Ok(())
    }

    /// Reads `parameter` at `location` from the latest effluent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Unreadable`] if the model does not report it.
    pub fn read(
        &self,
        location: Location,
        parameter: Parameter,
    ) -> Result<f64, ConfigurationError> {
        self.effluent.read(location, parameter)
    }

    /// Percent TOC removed between the influent and `location`.
    ///
    /// # Errors
    ///
    /// Returns an error if either TOC is unreadable or the influent TOC is not positive.
    pub fn toc_removal(&self, location: Location) -> Result<f64, ConfigurationError> {
        self.effluent.toc_removal(location)
    }

    /// Finds the dose that meets `target` and leaves it applied.
    ///
    /// The plant's effluent reflects the returned dose when this succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`RootError`] if no usable dose exists or a model run fails.
    pub fn find_dose(
        &mut self,
        target: &DoseTarget,
        config: &RootConfig,
    ) -> Result<RootSolution, RootError<PlantError>> {
        let mut objective = DoseObjective::new(self, target);
        root::find_root(&mut objective, target.bracket, config)
    }

    /// Current dose at `point`, if it exists.
    #[must_use]
    pub fn dose(&self, point: DosePoint) -> Option<MassConcentration> {
        self.input
            .doses
            .get(point)
            .map(MassConcentration::new::<milligram_per_liter>)
    }

    #[must_use]
    pub fn doses(&self) -> &Doses {
        &self.input.doses
    }

    #[must_use]
    pub fn conditions(&self) -> Conditions {
        self.input.conditions
    }

    #[must_use]
    pub fn effluent(&self) -> &M::Output {
        &self.effluent
    }

    pub(super) fn model(&self) -> &M {
        &self.model
    }

    pub(super) fn input(&self) -> &PlantInput {
        &self.input
    }

    /// Replaces the input and effluent with an already evaluated pair.
    pub(super) fn commit(&mut self, input: PlantInput, effluent: M::Output) {
        self.input = input;
        self.effluent = effluent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::treatment::{
        Chemical, UnitProcess,
        test_support::{TestPlantModel, plant_input},
    };

    fn end_of_system() -> Location {
        Location::first(UnitProcess::EndOfSystem)
    }

    #[test]
    fn new_plant_is_already_simulated() {
        let plant = Plant::new(TestPlantModel::default(), plant_input()).unwrap();

        assert_relative_eq!(
            plant
                .read(Location::first(UnitProcess::Influent), Parameter::Ph)
                .unwrap(),
            7.8
        );
        assert_relative_eq!(plant.toc_removal(end_of_system()).unwrap(), 0.0);
    }

    #[test]
    fn set_dose_takes_effect_on_run() {
        let mut plant = Plant::new(TestPlantModel::default(), plant_input()).unwrap();
        let alum = DosePoint::new(Chemical::Alum, 0);

        plant
            .set_dose(alum, MassConcentration::new::<milligram_per_liter>(20.0))
            .unwrap();
        assert_relative_eq!(plant.toc_removal(end_of_system()).unwrap(), 0.0);

        plant.run().unwrap();
        assert_relative_eq!(
            plant.toc_removal(end_of_system()).unwrap(),
            30.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            plant.dose(alum).unwrap().get::<milligram_per_liter>(),
            20.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn unknown_dose_point_is_a_configuration_error() {
        let mut plant = Plant::new(TestPlantModel::default(), plant_input()).unwrap();
        let missing = DosePoint::new(Chemical::Alum, 3);

        let err = plant
            .set_dose(missing, MassConcentration::new::<milligram_per_liter>(1.0))
            .unwrap_err();

        assert_eq!(err, ConfigurationError::UnknownDosePoint(missing));
        assert!(plant.dose(missing).is_none());
    }

    #[test]
    fn coldest_conditions_reach_the_model() {
        let mut input = plant_input();
        input.conditions = Conditions::Coldest;
        let cold = Plant::new(TestPlantModel::default(), input).unwrap();
        let average = Plant::new(TestPlantModel::default(), plant_input()).unwrap();

        assert_eq!(cold.conditions(), Conditions::Coldest);
        assert!(
            cold.read(end_of_system(), Parameter::Tthm).unwrap()
                < average.read(end_of_system(), Parameter::Tthm).unwrap()
        );
    }
}
