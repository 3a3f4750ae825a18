//! # WTP Auto-Dose
//!
//! Chemical dose control for simulated drinking water treatment plants,
//! built on [Twine](https://github.com/isentropic-dev/twine).
//!
//! A plant's process simulation is any [`twine_core::Model`] that maps chemical
//! doses to water quality. This crate finds the doses that meet a set of
//! water quality setpoints at once: raw water pH and alkalinity, disinfection
//! byproduct limits, the distribution chlorine residual and corrosion-control
//! pH.
//!
//! ## Crate layout
//!
//! - [`models`]: The treatment plant adapter, dose targets, the
//!   [`auto_dose`](models::treatment::auto_dose) controller and batch runs.
//! - [`support`]: Domain-free utilities used by models, including the
//!   hybrid bisection/secant root finder.
//!
//! ## Stability
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! ## Diagnostics
//!
//! Progress is reported through [`tracing`]: each model evaluation at `trace`,
//! each dose search and controller pass at `debug`, convergence at `info`, and
//! fallbacks or skipped scenarios at `warn`. No subscriber is installed.

pub mod models;
pub mod support;
