//! Chemical dosing for water treatment plants.
//!
//! A plant is simulated by an external [`twine_core::Model`] that maps a full
//! dosing configuration ([`PlantInput`]) to water quality at named locations
//! ([`WaterQuality`]). [`Plant`] wraps such a model with the current doses and
//! the latest simulated effluent.
//!
//! On top of that:
//!
//! - [`DoseTarget`] describes one single-dose problem, such as "the lime dose
//!   that brings raw water alkalinity to 80 mg/L", and [`Plant::find_dose`]
//!   solves it with [`crate::support::root::find_root`].
//! - [`auto_dose`] sequences those problems until every setpoint holds.
//! - [`batch`] runs [`auto_dose`] across many independent scenarios.

mod auto_dose;
mod chemical;
mod error;
mod location;
mod plant;
mod quality;
mod target;

pub mod batch;

#[cfg(test)]
mod test_support;

pub use auto_dose::{
    AutoDoseConfig, AutoDoseError, AutoDoseReport, Brackets, DosePoints, Locations, SetpointFlags,
    Setpoints, Tolerances, auto_dose, removal_requirement,
};
pub use chemical::{Chemical, DosePoint, Doses};
pub use error::{ConfigurationError, PlantError};
pub use location::{Location, UnitProcess};
pub use plant::{Conditions, Plant, PlantInput};
pub use quality::{Parameter, WaterQuality};
pub use target::{DoseObjective, DoseTarget, TargetParameter};
