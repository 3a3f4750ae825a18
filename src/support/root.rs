//! Hybrid single-variable root finding.
//!
//! [`find_root`] drives an [`Objective`] toward zero on a [`Bracket`]:
//!
//! - If the residuals at the bracket ends have opposite signs, a multi-pass
//!   bisection searches the bracket for up to three roots.
//! - Otherwise a multi-start secant search runs from evenly spaced points in
//!   the bracket, tracking the non-negative points with the smallest and
//!   largest residuals as a fallback when no attempt converges.
//!
//! In both cases the smallest non-negative root wins, and the objective is
//! evaluated at the winner last so any state it carries reflects the result.
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//! use wtp_autodose::support::root::{Bracket, Method, RootConfig, find_root, from_fn};
//!
//! let mut objective = from_fn(|x: f64| Ok::<_, Infallible>(x * x - 4.0));
//! let bracket = Bracket::new(0.0, 5.0).unwrap();
//!
//! let solution = find_root(&mut objective, bracket, &RootConfig::default()).unwrap();
//!
//! assert_eq!(solution.method, Method::Bisection);
//! assert!((solution.x.into_inner() - 2.0).abs() < 1e-3);
//! ```

mod bisection;
mod bracket;
mod candidates;
mod config;
mod error;
mod extrema;
mod secant;

pub use bracket::{Bracket, BracketError};
pub use config::RootConfig;
pub use error::RootError;

use std::marker::PhantomData;

use tracing::{debug, trace, warn};

use crate::support::constraint::{Constrained, NonNegative};

use extrema::Extrema;

/// A scalar function whose root is sought.
///
/// Evaluation takes `&mut self` because objectives commonly drive a stateful
/// model, where evaluating at `x` leaves `x` applied.
pub trait Objective {
    /// Error returned when an evaluation fails.
    type Error;

    /// Returns the residual `f(x)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the objective cannot be evaluated at `x`.
    fn evaluate(&mut self, x: f64) -> Result<f64, Self::Error>;
}

/// An [`Objective`] backed by a closure.
///
/// Created by [`from_fn`].
pub struct FromFn<F, E> {
    f: F,
    _error: PhantomData<fn() -> E>,
}

/// Wraps a closure returning `Result<f64, E>` as an [`Objective`].
pub fn from_fn<F, E>(f: F) -> FromFn<F, E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    FromFn {
        f,
        _error: PhantomData,
    }
}

impl<F, E> Objective for FromFn<F, E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    type Error = E;

    fn evaluate(&mut self, x: f64) -> Result<f64, E> {
        (self.f)(x)
    }
}

/// Strategy that produced a [`RootSolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// The bracket ends had opposite signs and bisection found a root.
    Bisection,

    /// The bracket ends had the same sign and a secant attempt converged.
    Secant,

    /// No secant attempt converged; the non-negative point with the smallest
    /// residual magnitude was used instead.
    ExtremaFallback,
}

/// The result of a root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSolution {
    /// The selected root, always non-negative.
    pub x: Constrained<f64, NonNegative>,

    /// Residual at `x` from the final evaluation.
    pub residual: f64,

    /// Strategy that selected `x`.
    pub method: Method,

    /// Total objective evaluations, including the final one at `x`.
    pub evaluations: usize,
}

/// Finds the smallest non-negative root of `objective` starting from `bracket`.
///
/// The objective is evaluated at the returned root as the last action.
///
/// # Errors
///
/// - [`RootError::NoRootInBracket`] if bisection records no non-negative root.
/// - [`RootError::Infeasible`] if the secant search and its fallback never
///   evaluate a non-negative point.
/// - [`RootError::Objective`] if any evaluation fails.
pub fn find_root<O: Objective>(
    objective: &mut O,
    bracket: Bracket,
    config: &RootConfig,
) -> Result<RootSolution, RootError<O::Error>> {
    let mut probe = Probe::new(objective);

    let f_lower = probe.eval(bracket.lower())?;
    let f_upper = probe.eval(bracket.upper())?;

    let (x, method) = if f_lower * f_upper < 0.0 {
        let x = bisection::search(&mut probe, bracket, f_lower, config)?;
        (x, Method::Bisection)
    } else {
        secant::search(&mut probe, bracket, config)?
    };

    let residual = probe.eval(x)?;
    let x = NonNegative::new(x).map_err(|_| RootError::Infeasible {
        lower: bracket.lower(),
        upper: bracket.upper(),
    })?;

    if method == Method::ExtremaFallback {
        warn!(
            x = x.into_inner(),
            residual, "no root converged, using closest evaluated point"
        );
    }
    debug!(
        ?method,
        x = x.into_inner(),
        residual,
        evaluations = probe.evaluations,
        "root search finished"
    );

    Ok(RootSolution {
        x,
        residual,
        method,
        evaluations: probe.evaluations,
    })
}

/// Counts evaluations and tracks residual extrema across a search.
struct Probe<'a, O> {
    objective: &'a mut O,
    evaluations: usize,
    extrema: Extrema,
}

impl<'a, O: Objective> Probe<'a, O> {
    fn new(objective: &'a mut O) -> Self {
        Self {
            objective,
            evaluations: 0,
            extrema: Extrema::empty(),
        }
    }

    fn eval(&mut self, x: f64) -> Result<f64, RootError<O::Error>> {
        let residual = self.objective.evaluate(x).map_err(RootError::Objective)?;
        self.evaluations += 1;
        self.extrema.observe(x, residual);
        trace!(x, residual, "objective evaluated");
        Ok(residual)
    }
}
