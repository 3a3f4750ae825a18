//! Domain models.
//!
//! # Organization
//!
//! Models are organized into domain-specific submodules. The
//! [`treatment`] module covers drinking water treatment plants: adapting a
//! process simulation, solving for individual chemical doses, and driving
//! all setpoints to convergence with [`treatment::auto_dose`].
//!
//! Process simulations plug in as [`twine_core::Model`] implementations whose
//! input is a [`treatment::PlantInput`] and whose output implements
//! [`treatment::WaterQuality`].

pub mod treatment;
