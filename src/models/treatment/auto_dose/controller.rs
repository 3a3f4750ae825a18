use tracing::debug;
use twine_core::Model;
use uom::si::{
    f64::MassConcentration,
    mass_concentration::{microgram_per_liter, milligram_per_liter},
    ratio::{percent, ratio},
};

use crate::{
    models::treatment::{
        ConfigurationError, DoseTarget, Location, Parameter, Plant, PlantInput, TargetParameter,
        WaterQuality,
    },
    support::root::Bracket,
};

use super::{AutoDoseConfig, AutoDoseError, Setpoints, removal_requirement};

/// The dosing steps of one controller pass, applied to a borrowed plant.
pub(super) struct Controller<'a, M: Model<Input = PlantInput>> {
    plant: &'a mut Plant<M>,
    setpoints: &'a Setpoints,
    config: &'a AutoDoseConfig,
    searches: usize,
}

impl<'a, M> Controller<'a, M>
where
    M: Model<Input = PlantInput>,
    M::Output: WaterQuality,
{
    pub(super) fn new(
        plant: &'a mut Plant<M>,
        setpoints: &'a Setpoints,
        config: &'a AutoDoseConfig,
    ) -> Self {
        Self {
            plant,
            setpoints,
            config,
            searches: 0,
        }
    }

    pub(super) fn plant(&self) -> &Plant<M> {
        self.plant
    }

    /// Dose searches run so far.
    pub(super) fn searches(&self) -> usize {
        self.searches
    }

    /// Raises raw water alkalinity with lime, then trims pH with lime or CO2.
    ///
    /// Lime moves both pH and alkalinity, so when pH needs less lime than
    /// alkalinity did, the alkalinity dose is restored.
    pub(super) fn adjust_raw_water(&mut self) -> Result<(), AutoDoseError> {
        let config = self.config;
        let at = config.locations.raw_adjustment;
        let lime = config.dose_points.raw_lime;

        let alkalinity = DoseTarget {
            dose: lime,
            parameter: TargetParameter::Alkalinity,
            location: at,
            value: self.setpoints.raw_alkalinity.get::<milligram_per_liter>(),
            bracket: config.brackets.lime,
        };
        let mut alkalinity_lime = None;
        if self.plant.read(at, Parameter::Alkalinity)? < alkalinity.value {
            alkalinity_lime = Some(self.solve(alkalinity)?);
        }

        let raw_ph = self.setpoints.raw_ph;
        if self.plant.read(at, Parameter::Ph)? < raw_ph {
            let ph = DoseTarget {
                dose: lime,
                parameter: TargetParameter::Ph,
                location: at,
                value: raw_ph,
                bracket: config.brackets.lime,
            };
            let ph_lime = self.solve(ph)?;
            if let Some(alkalinity_lime) = alkalinity_lime.filter(|&dose| ph_lime < dose) {
                debug!(ph_lime, alkalinity_lime, "restoring alkalinity lime dose");
                self.solve(alkalinity)?;
            }
        } else {
            self.solve(DoseTarget {
                dose: config.dose_points.raw_carbon_dioxide,
                parameter: TargetParameter::Ph,
                location: at,
                value: raw_ph,
                bracket: config.brackets.carbon_dioxide,
            })?;
        }
        Ok(())
    }

    /// Sets alum for TOC removal and DBP limits without crossing the
    /// rapid-mix pH floor.
    ///
    /// The floor wins: holding it may leave TOC and DBP targets unmet.
    pub(super) fn adjust_coagulant(&mut self) -> Result<(), AutoDoseError> {
        let config = self.config;
        let at = config.locations;

        self.plant
            .set_dose(config.dose_points.coagulant, config.alum_minimum)?;
        self.plant.run()?;

        let influent_toc = self.plant.read(at.influent, Parameter::Toc)?;
        let influent_alkalinity = MassConcentration::new::<milligram_per_liter>(
            self.plant.read(at.influent, Parameter::Alkalinity)?,
        );
        let requirement = removal_requirement(
            influent_toc,
            influent_alkalinity,
            config.removal_alkalinity_limit,
        )?;
        if let Some(required) = requirement {
            let target =
                required.get::<percent>() * (1.0 + config.toc_removal_margin.get::<ratio>());
            if self.plant.toc_removal(at.end_of_system)? < target {
                self.solve(self.alum_target(
                    TargetParameter::TocRemoval,
                    at.end_of_system,
                    target,
                    config.brackets.alum,
                ))?;
            }
        }

        let retained = 1.0 - self.setpoints.dbp_safety_factor.as_ref().get::<ratio>();
        let limits = [
            (Parameter::Tthm, TargetParameter::Tthm, config.tthm_mcl),
            (Parameter::Haa5, TargetParameter::Haa5, config.haa5_mcl),
        ];
        for (parameter, target_parameter, mcl) in limits {
            let target = mcl.get::<microgram_per_liter>() * retained;
            if self.plant.read(at.end_of_system, parameter)? > target {
                self.solve(self.alum_target(
                    target_parameter,
                    at.end_of_system,
                    target,
                    config.brackets.alum,
                ))?;
            }
        }

        let floor = config.rapid_mix_ph_floor;
        if self.plant.read(at.rapid_mix, Parameter::Ph)? < floor {
            let alum = config.brackets.alum;
            let bracket = alum.with_lower(0.0).map_err(ConfigurationError::from)?;
            let dose = self.solve(self.alum_target(
                TargetParameter::Ph,
                at.rapid_mix,
                floor,
                bracket,
            ))?;
            debug!(dose, floor, "alum limited by rapid-mix pH floor");
        }
        Ok(())
    }

    /// Brings the end-of-system chlorine residual to its setpoint.
    pub(super) fn adjust_chlorine(&mut self) -> Result<(), AutoDoseError> {
        let config = self.config;
        let at = config.locations.end_of_system;
        let setpoint = self.setpoints.chlorine_residual;

        let residual = MassConcentration::new::<milligram_per_liter>(
            self.plant.read(at, Parameter::FreeChlorine)?,
        );
        if (residual - setpoint).abs() >= config.tolerances.chlorine {
            self.solve(DoseTarget {
                dose: config.dose_points.hypochlorite,
                parameter: TargetParameter::FreeChlorine,
                location: at,
                value: setpoint.get::<milligram_per_liter>(),
                bracket: config.brackets.hypochlorite,
            })?;
        }
        Ok(())
    }

    /// Sets finished water pH for corrosion control with lime or CO2.
    pub(super) fn adjust_corrosion_ph(&mut self) -> Result<(), AutoDoseError> {
        let config = self.config;
        let at = config.locations.finished;
        let setpoint = self.setpoints.finished_ph;

        let (dose, bracket) = if self.plant.read(at, Parameter::Ph)? < setpoint {
            (config.dose_points.finished_lime, config.brackets.lime)
        } else {
            (
                config.dose_points.finished_carbon_dioxide,
                config.brackets.carbon_dioxide,
            )
        };
        self.solve(DoseTarget {
            dose,
            parameter: TargetParameter::Ph,
            location: at,
            value: setpoint,
            bracket,
        })?;
        Ok(())
    }

    fn alum_target(
        &self,
        parameter: TargetParameter,
        location: Location,
        value: f64,
        bracket: Bracket,
    ) -> DoseTarget {
        DoseTarget {
            dose: self.config.dose_points.coagulant,
            parameter,
            location,
            value,
            bracket,
        }
    }

    /// Solves `target`, leaving the dose applied, and returns the dose in mg/L.
    fn solve(&mut self, target: DoseTarget) -> Result<f64, AutoDoseError> {
        let solution = self
            .plant
            .find_dose(&target, &self.config.root)
            .map_err(|err| AutoDoseError::from_search(target, err))?;
        self.searches += 1;

        let dose = solution.x.into_inner();
        debug!(
            %target,
            dose,
            residual = solution.residual,
            method = ?solution.method,
            evaluations = solution.evaluations,
            "dose applied"
        );
        Ok(dose)
    }
}
