//! Auto-dosing many independent scenarios.
//!
//! Each [`Scenario`] carries its own freshly configured plant, so scenarios
//! never share dosing state. A [`FailurePolicy`] decides whether one failed
//! scenario stops the batch.

use thiserror::Error;
use tracing::{info, warn};
use twine_core::Model;

use super::{
    AutoDoseConfig, AutoDoseError, AutoDoseReport, Plant, PlantInput, Setpoints, WaterQuality,
    auto_dose,
};

/// A named plant and the setpoints to dose it to.
pub struct Scenario<M: Model<Input = PlantInput>> {
    pub name: String,
    pub plant: Plant<M>,
    pub setpoints: Setpoints,
}

/// What to do when a scenario fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure.
    #[default]
    Abort,

    /// Record the failure and continue with the next scenario.
    Skip,
}

/// A scenario after dosing, with the plant in its final state.
pub struct Outcome<M: Model<Input = PlantInput>> {
    pub name: String,
    pub plant: Plant<M>,
    pub result: Result<AutoDoseReport, AutoDoseError>,
}

/// A scenario failed under [`FailurePolicy::Abort`].
#[derive(Debug, Error)]
#[error("scenario `{scenario}` failed")]
pub struct BatchError {
    pub scenario: String,
    #[source]
    pub source: AutoDoseError,
}

/// Runs [`auto_dose`] on every scenario in order.
///
/// # Errors
///
/// Under [`FailurePolicy::Abort`], returns the first scenario failure as a
/// [`BatchError`]. Under [`FailurePolicy::Skip`], never fails; failures are
/// kept in each [`Outcome::result`].
pub fn auto_dose_all<M, I>(
    scenarios: I,
    config: &AutoDoseConfig,
    policy: FailurePolicy,
) -> Result<Vec<Outcome<M>>, BatchError>
where
    M: Model<Input = PlantInput>,
    M::Output: WaterQuality,
    I: IntoIterator<Item = Scenario<M>>,
{
    let mut outcomes = Vec::new();

    for Scenario {
        name,
        mut plant,
        setpoints,
    } in scenarios
    {
        let result = match auto_dose(&mut plant, &setpoints, config) {
            Ok(report) => {
                info!(scenario = %name, passes = report.passes, "scenario dosed");
                Ok(report)
            }
            Err(source) => match policy {
                FailurePolicy::Abort => {
                    return Err(BatchError {
                        scenario: name,
                        source,
                    });
                }
                FailurePolicy::Skip => {
                    warn!(scenario = %name, error = %source, "skipping failed scenario");
                    Err(source)
                }
            },
        };

        outcomes.push(Outcome {
            name,
            plant,
            result,
        });
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::{MassConcentration, Ratio},
        mass_concentration::milligram_per_liter,
        ratio::percent,
    };

    use crate::{
        models::treatment::test_support::{TestPlantModel, plant_input},
        support::constraint::UnitInterval,
    };

    fn scenario(name: &str, model: TestPlantModel) -> Scenario<TestPlantModel> {
        Scenario {
            name: name.to_owned(),
            plant: Plant::new(model, plant_input()).unwrap(),
            setpoints: Setpoints {
                raw_ph: 8.0,
                raw_alkalinity: MassConcentration::new::<milligram_per_liter>(80.0),
                chlorine_residual: MassConcentration::new::<milligram_per_liter>(0.2),
                finished_ph: 8.0,
                dbp_safety_factor: UnitInterval::new(Ratio::new::<percent>(10.0)).unwrap(),
            },
        }
    }

    fn scenarios() -> Vec<Scenario<TestPlantModel>> {
        vec![
            scenario("typical", TestPlantModel::default()),
            scenario(
                "hard water",
                TestPlantModel {
                    influent_alkalinity: 75.0,
                    ..TestPlantModel::default()
                },
            ),
            scenario(
                "low toc",
                TestPlantModel {
                    influent_toc: 1.2,
                    ..TestPlantModel::default()
                },
            ),
        ]
    }

    #[test]
    fn skip_keeps_going_after_a_failure() {
        let outcomes =
            auto_dose_all(scenarios(), &AutoDoseConfig::default(), FailurePolicy::Skip).unwrap();

        let names: Vec<_> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["typical", "hard water", "low toc"]);

        assert!(outcomes[0].result.as_ref().is_ok_and(|r| r.flags.all()));
        assert!(matches!(
            outcomes[1].result,
            Err(AutoDoseError::UnsupportedRawWater { .. })
        ));
        assert!(outcomes[2].result.is_ok());
    }

    #[test]
    fn abort_stops_at_the_first_failure() {
        let config = AutoDoseConfig::default();

        let err = auto_dose_all(scenarios(), &config, FailurePolicy::Abort)
            .err()
            .unwrap();

        assert_eq!(err.scenario, "hard water");
        assert!(matches!(
            err.source,
            AutoDoseError::UnsupportedRawWater { .. }
        ));
        assert_eq!(err.to_string(), "scenario `hard water` failed");
    }

    #[test]
    fn scenarios_do_not_share_state() {
        let outcomes = auto_dose_all(
            vec![
                scenario("first", TestPlantModel::default()),
                scenario("second", TestPlantModel::default()),
            ],
            &AutoDoseConfig::default(),
            FailurePolicy::Abort,
        )
        .unwrap();

        assert_eq!(outcomes[0].plant.doses(), outcomes[1].plant.doses());
        assert_eq!(
            outcomes[0].result.as_ref().map(|r| r.passes).ok(),
            outcomes[1].result.as_ref().map(|r| r.passes).ok()
        );
    }
}
