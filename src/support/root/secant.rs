//! Multi-start secant search for unbracketed problems.

use super::{Bracket, Method, Objective, Probe, RootConfig, RootError, candidates::Candidates};

/// Runs secant attempts from evenly spaced starts across the bracket.
///
/// Returns the smallest non-negative converged root, or if no attempt
/// converges, the tracked non-negative point closest to zero residual.
///
/// # Errors
///
/// Returns [`RootError::Infeasible`] if no non-negative point was ever
/// evaluated, or [`RootError::Objective`] if an evaluation fails.
pub(super) fn search<O: Objective>(
    probe: &mut Probe<'_, O>,
    bracket: Bracket,
    config: &RootConfig,
) -> Result<(f64, Method), RootError<O::Error>> {
    let mut roots = Candidates::with_capacity(config.secant_starts);

    #[allow(clippy::cast_precision_loss)]
    let starts = config.secant_starts as f64;
    let span = bracket.width().abs();

    for attempt in 0..config.secant_starts {
        #[allow(clippy::cast_precision_loss)]
        let x0 = bracket.lower() + span * (attempt as f64 / starts);
        roots.record(attempt_from(probe, x0, config)?);
    }

    if let Some(root) = roots.min_non_negative() {
        return Ok((root, Method::Secant));
    }

    probe
        .extrema
        .closest()
        .map(|x| (x, Method::ExtremaFallback))
        .ok_or(RootError::Infeasible {
            lower: bracket.lower(),
            upper: bracket.upper(),
        })
}

/// Runs one secant attempt from `x0` and `x0 + secant_step`.
///
/// The attempt converges when a point meets the residual tolerance or when
/// successive points come within `x_tol`. The latter counts as a root even
/// if the residual there is large, as at a jump in the objective.
///
/// Returns `None` if the attempt stalls on a flat secant, diverges to a
/// non-finite point, or exhausts its iterations.
fn attempt_from<O: Objective>(
    probe: &mut Probe<'_, O>,
    x0: f64,
    config: &RootConfig,
) -> Result<Option<f64>, RootError<O::Error>> {
    let mut x0 = x0;
    let mut f0 = probe.eval(x0)?;
    if f0.abs() < config.residual_tol {
        return Ok(Some(x0));
    }

    let mut x1 = x0 + config.secant_step;
    let mut f1 = probe.eval(x1)?;

    for _ in 0..config.secant_iters {
        if f1.abs() < config.residual_tol {
            return Ok(Some(x1));
        }

        let df = f1 - f0;
        if df == 0.0 {
            return Ok(None);
        }

        let x2 = x1 - f1 * (x1 - x0) / df;
        if !x2.is_finite() {
            return Ok(None);
        }

        (x0, f0) = (x1, f1);
        x1 = x2;
        f1 = probe.eval(x1)?;

        if (x1 - x0).abs() < config.x_tol {
            return Ok(Some(x1));
        }
    }

    Ok((f1.abs() < config.residual_tol).then_some(x1))
}
