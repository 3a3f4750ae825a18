//! A deterministic synthetic plant for tests.
//!
//! Every relationship is linear or saturating so expected doses can be
//! worked out by hand:
//!
//! - Lime raises pH by `lime_ph` and alkalinity by `lime_alkalinity` per mg/L.
//!   Past `lime_ph_peak`, further lime lowers pH at the same rate.
//! - Carbon dioxide lowers pH by `co2_ph` per mg/L.
//! - Alum lowers rapid-mix pH by `alum_ph` per mg/L and removes a fraction
//!   `max_toc_removal * A / (A + half_removal_alum)` of the TOC.
//! - End-of-system chlorine is `chlorine_yield * H - chlorine_demand * TOC`.
//! - DBPs scale with remaining TOC and `1 + H`.

use thiserror::Error;
use twine_core::Model;

use super::{
    Chemical, Conditions, DosePoint, Doses, Location, Parameter, PlantInput, UnitProcess,
    WaterQuality,
};

/// Plant input with two lime and carbon dioxide points and one of each other chemical.
pub(crate) fn plant_input() -> PlantInput {
    PlantInput {
        doses: Doses::new()
            .with_points(Chemical::Lime, 2)
            .with_points(Chemical::CarbonDioxide, 2)
            .with_points(Chemical::Alum, 1)
            .with_points(Chemical::Hypochlorite, 1),
        conditions: Conditions::Average,
    }
}

#[derive(Debug, Clone)]
pub(crate) struct TestPlantModel {
    pub influent_ph: f64,
    pub influent_alkalinity: f64,
    pub influent_toc: f64,
    pub lime_ph: f64,
    pub lime_ph_peak: f64,
    pub lime_alkalinity: f64,
    pub co2_ph: f64,
    pub alum_ph: f64,
    pub alum_alkalinity: f64,
    pub max_toc_removal: f64,
    pub half_removal_alum: f64,
    pub chlorine_yield: f64,
    pub chlorine_demand: f64,
    pub tthm_yield: f64,
    pub haa5_yield: f64,
    pub cold_dbp_factor: f64,
    pub max_alum: f64,
}

impl Default for TestPlantModel {
    fn default() -> Self {
        Self {
            influent_ph: 7.8,
            influent_alkalinity: 40.0,
            influent_toc: 3.5,
            lime_ph: 0.05,
            lime_ph_peak: f64::INFINITY,
            lime_alkalinity: 1.35,
            co2_ph: 0.1,
            alum_ph: 0.02,
            alum_alkalinity: 0.5,
            max_toc_removal: 0.6,
            half_removal_alum: 20.0,
            chlorine_yield: 0.7,
            chlorine_demand: 0.1,
            tthm_yield: 10.0,
            haa5_yield: 8.0,
            cold_dbp_factor: 0.8,
            max_alum: f64::INFINITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Sample {
    pub ph: f64,
    pub alkalinity: f64,
    pub toc: f64,
    pub free_chlorine: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TestEffluent {
    pub influent: Sample,
    pub raw: Sample,
    pub rapid_mix: Sample,
    pub finished: Sample,
    pub end_of_system: Sample,
    pub tthm: f64,
    pub haa5: f64,
}

#[derive(Debug, Error)]
pub(crate) enum TestModelError {
    #[error("alum dose of {0} mg/L is outside the model's range")]
    AlumOverdose(f64),
}

fn dose(doses: &Doses, chemical: Chemical, instance: usize) -> f64 {
    doses
        .get(DosePoint::new(chemical, instance))
        .unwrap_or_default()
}

impl TestPlantModel {
    /// Lime dose as seen by pH, folded back past the peak.
    fn lime_for_ph(&self, lime: f64) -> f64 {
        if lime <= self.lime_ph_peak {
            lime
        } else {
            2.0 * self.lime_ph_peak - lime
        }
    }
}

impl Model for TestPlantModel {
    type Input = PlantInput;
    type Output = TestEffluent;
    type Error = TestModelError;

    fn call(&self, input: &PlantInput) -> Result<TestEffluent, TestModelError> {
        let doses = &input.doses;
        let raw_lime = dose(doses, Chemical::Lime, 0);
        let raw_co2 = dose(doses, Chemical::CarbonDioxide, 0);
        let alum = dose(doses, Chemical::Alum, 0);
        let hypochlorite = dose(doses, Chemical::Hypochlorite, 0);
        let finished_lime = dose(doses, Chemical::Lime, 1);
        let finished_co2 = dose(doses, Chemical::CarbonDioxide, 1);

        if alum > self.max_alum {
            return Err(TestModelError::AlumOverdose(alum));
        }

        let influent = Sample {
            ph: self.influent_ph,
            alkalinity: self.influent_alkalinity,
            toc: self.influent_toc,
            free_chlorine: 0.0,
        };
        let raw = Sample {
            ph: influent.ph + self.lime_ph * self.lime_for_ph(raw_lime) - self.co2_ph * raw_co2,
            alkalinity: influent.alkalinity + self.lime_alkalinity * raw_lime,
            ..influent
        };
        let rapid_mix = Sample {
            ph: raw.ph - self.alum_ph * alum,
            alkalinity: raw.alkalinity - self.alum_alkalinity * alum,
            ..raw
        };

        let coagulant = alum.max(0.0);
        let removal = self.max_toc_removal * coagulant / (coagulant + self.half_removal_alum);
        let treated_toc = influent.toc * (1.0 - removal);

        let finished = Sample {
            ph: rapid_mix.ph + self.lime_ph * self.lime_for_ph(finished_lime)
                - self.co2_ph * finished_co2,
            alkalinity: rapid_mix.alkalinity + self.lime_alkalinity * finished_lime,
            toc: treated_toc,
            free_chlorine: hypochlorite,
        };
        let end_of_system = Sample {
            free_chlorine: (self.chlorine_yield * hypochlorite
                - self.chlorine_demand * treated_toc)
                .max(0.0),
            ..finished
        };

        let temperature_factor = match input.conditions {
            Conditions::Average => 1.0,
            Conditions::Coldest => self.cold_dbp_factor,
        };
        let formation = temperature_factor * treated_toc * (1.0 + hypochlorite.max(0.0));

        Ok(TestEffluent {
            influent,
            raw,
            rapid_mix,
            finished,
            end_of_system,
            tthm: self.tthm_yield * formation,
            haa5: self.haa5_yield * formation,
        })
    }
}

impl WaterQuality for TestEffluent {
    fn value(&self, location: Location, parameter: Parameter) -> Option<f64> {
        if location.instance != 0 {
            return None;
        }
        let sample = match location.process {
            UnitProcess::Influent => &self.influent,
            UnitProcess::RawWaterAdjustment => &self.raw,
            UnitProcess::RapidMix => &self.rapid_mix,
            UnitProcess::FinishedWater => &self.finished,
            UnitProcess::EndOfSystem => &self.end_of_system,
            UnitProcess::Sedimentation | UnitProcess::Filtration => return None,
        };
        match parameter {
            Parameter::Ph => Some(sample.ph),
            Parameter::Alkalinity => Some(sample.alkalinity),
            Parameter::Toc => Some(sample.toc),
            Parameter::FreeChlorine => Some(sample.free_chlorine),
            Parameter::Tthm if location.process == UnitProcess::EndOfSystem => Some(self.tthm),
            Parameter::Haa5 if location.process == UnitProcess::EndOfSystem => Some(self.haa5),
            Parameter::Tthm | Parameter::Haa5 => None,
        }
    }
}
