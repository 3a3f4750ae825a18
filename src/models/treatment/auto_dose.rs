//! Multi-setpoint dose control.
//!
//! [`auto_dose`] repeats a fixed sequence of dose searches until every
//! setpoint holds at once:
//!
//! 1. Raw water alkalinity, raised with lime.
//! 2. Raw water pH, raised with lime or lowered with carbon dioxide.
//! 3. Alum for TOC removal and DBP limits, capped by the rapid-mix pH floor.
//! 4. End-of-system free chlorine, set with hypochlorite.
//! 5. Finished water pH for corrosion control, with lime or carbon dioxide.
//!
//! Each step reads the plant's current effluent before deciding, and the
//! [`SetpointFlags`] are recomputed from scratch after every pass.

mod config;
mod controller;
mod error;
mod flags;
mod removal;
mod setpoints;

pub use config::{AutoDoseConfig, Brackets, DosePoints, Locations, Tolerances};
pub use error::AutoDoseError;
pub use flags::SetpointFlags;
pub use removal::removal_requirement;
pub use setpoints::Setpoints;

use tracing::{debug, info};
use twine_core::Model;

use super::{Plant, PlantInput, WaterQuality};

use controller::Controller;

/// Summary of a converged [`auto_dose`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoDoseReport {
    /// Passes taken, including the one that converged.
    pub passes: usize,

    /// Flags from the final pass; all are set.
    pub flags: SetpointFlags,

    /// Dose searches run across all passes.
    pub searches: usize,
}

/// Adjusts the plant's doses until every setpoint in `setpoints` is met.
///
/// The plant is modified in place and keeps the final doses on success.
/// Only the alum dose is reset by the controller; callers running many
/// scenarios should start each from a freshly configured plant.
///
/// # Errors
///
/// Returns an [`AutoDoseError`] if a read or model run fails, a dose search
/// finds no usable dose, the raw water is outside the supported range, or
/// the setpoints are still unmet after `config.max_passes` passes.
pub fn auto_dose<M>(
    plant: &mut Plant<M>,
    setpoints: &Setpoints,
    config: &AutoDoseConfig,
) -> Result<AutoDoseReport, AutoDoseError>
where
    M: Model<Input = PlantInput>,
    M::Output: WaterQuality,
{
    let mut controller = Controller::new(plant, setpoints, config);
    let mut flags = SetpointFlags::default();

    for pass in 1..=config.max_passes {
        controller.adjust_raw_water()?;
        controller.adjust_coagulant()?;
        controller.adjust_chlorine()?;
        controller.adjust_corrosion_ph()?;

        flags = SetpointFlags::observe(controller.plant(), setpoints, config)?;
        debug!(pass, ?flags, "auto-dose pass finished");

        if flags.all() {
            info!(
                passes = pass,
                searches = controller.searches(),
                "all setpoints met"
            );
            return Ok(AutoDoseReport {
                passes: pass,
                flags,
                searches: controller.searches(),
            });
        }
    }

    Err(AutoDoseError::IterationBudgetExceeded {
        passes: config.max_passes,
        flags,
    })
}
