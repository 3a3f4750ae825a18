use uom::si::{
    f64::{MassConcentration, Ratio},
    mass_concentration::{microgram_per_liter, milligram_per_liter},
    ratio::percent,
};

use crate::{
    models::treatment::{Chemical, DosePoint, Location, UnitProcess},
    support::root::{Bracket, RootConfig},
};

/// Configuration for [`auto_dose`](super::auto_dose).
///
/// The defaults are the regulatory and operating constants the controller
/// was designed around.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoDoseConfig {
    /// Passes before giving up with
    /// [`AutoDoseError::IterationBudgetExceeded`](super::AutoDoseError::IterationBudgetExceeded).
    pub max_passes: usize,

    pub tolerances: Tolerances,

    /// Alum dose reset at the start of every coagulant step, for turbidity control.
    pub alum_minimum: MassConcentration,

    /// Lowest pH allowed at rapid mix before alum is cut back.
    pub rapid_mix_ph_floor: f64,

    /// Multiplicative margin added to the TOC removal requirement.
    pub toc_removal_margin: Ratio,

    /// Influent alkalinity (as CaCO3) at or above which TOC removal
    /// requirements are not supported.
    pub removal_alkalinity_limit: MassConcentration,

    /// Maximum contaminant level for total trihalomethanes.
    pub tthm_mcl: MassConcentration,

    /// Maximum contaminant level for five haloacetic acids.
    pub haa5_mcl: MassConcentration,

    pub dose_points: DosePoints,
    pub locations: Locations,
    pub brackets: Brackets,

    /// Root finder settings shared by every dose search.
    pub root: RootConfig,
}

impl Default for AutoDoseConfig {
    fn default() -> Self {
        Self {
            max_passes: 50,
            tolerances: Tolerances::default(),
            alum_minimum: MassConcentration::new::<milligram_per_liter>(18.0),
            rapid_mix_ph_floor: 5.5,
            toc_removal_margin: Ratio::new::<percent>(5.0),
            removal_alkalinity_limit: MassConcentration::new::<milligram_per_liter>(60.0),
            tthm_mcl: MassConcentration::new::<microgram_per_liter>(80.0),
            haa5_mcl: MassConcentration::new::<microgram_per_liter>(60.0),
            dose_points: DosePoints::default(),
            locations: Locations::default(),
            brackets: Brackets::default(),
            root: RootConfig::default(),
        }
    }
}

/// How close an observation must be to its setpoint to count as met.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub ph: f64,
    pub alkalinity: MassConcentration,
    pub chlorine: MassConcentration,
    /// In percentage points of TOC removal.
    pub toc_removal: Ratio,
    /// Applied to both TTHM and HAA5.
    pub dbp: MassConcentration,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            ph: 0.01,
            alkalinity: MassConcentration::new::<milligram_per_liter>(0.5),
            chlorine: MassConcentration::new::<milligram_per_liter>(0.01),
            toc_removal: Ratio::new::<percent>(0.5),
            dbp: MassConcentration::new::<microgram_per_liter>(0.5),
        }
    }
}

/// The addition point each controller step adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DosePoints {
    pub raw_lime: DosePoint,
    pub raw_carbon_dioxide: DosePoint,
    pub coagulant: DosePoint,
    pub hypochlorite: DosePoint,
    pub finished_lime: DosePoint,
    pub finished_carbon_dioxide: DosePoint,
}

impl Default for DosePoints {
    fn default() -> Self {
        Self {
            raw_lime: DosePoint::new(Chemical::Lime, 0),
            raw_carbon_dioxide: DosePoint::new(Chemical::CarbonDioxide, 0),
            coagulant: DosePoint::new(Chemical::Alum, 0),
            hypochlorite: DosePoint::new(Chemical::Hypochlorite, 0),
            finished_lime: DosePoint::new(Chemical::Lime, 1),
            finished_carbon_dioxide: DosePoint::new(Chemical::CarbonDioxide, 1),
        }
    }
}

/// Where each setpoint is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locations {
    pub influent: Location,
    pub raw_adjustment: Location,
    pub rapid_mix: Location,
    pub finished: Location,
    pub end_of_system: Location,
}

impl Default for Locations {
    fn default() -> Self {
        Self {
            influent: Location::first(UnitProcess::Influent),
            raw_adjustment: Location::first(UnitProcess::RawWaterAdjustment),
            rapid_mix: Location::first(UnitProcess::RapidMix),
            finished: Location::first(UnitProcess::FinishedWater),
            end_of_system: Location::first(UnitProcess::EndOfSystem),
        }
    }
}

/// Initial search brackets per chemical, in mg/L.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brackets {
    pub lime: Bracket,
    pub carbon_dioxide: Bracket,
    /// Used for TOC and DBP targets. The rapid-mix pH floor search relaxes
    /// the lower bound to zero.
    pub alum: Bracket,
    pub hypochlorite: Bracket,
}

impl Default for Brackets {
    fn default() -> Self {
        Self {
            lime: Bracket::new_unchecked(0.0, 100.0),
            carbon_dioxide: Bracket::new_unchecked(0.0, 50.0),
            alum: Bracket::new_unchecked(18.0, 150.0),
            hypochlorite: Bracket::new_unchecked(0.0, 10.0),
        }
    }
}
