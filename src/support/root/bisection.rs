//! Multi-pass bisection for bracketed searches.
//!
//! The first pass halves the full bracket. If it finds a root, two retry
//! passes search below and above that root (offset by
//! [`RootConfig::retry_offset`]) so that a smaller root elsewhere in a
//! non-monotonic bracket is not missed.

use super::{Bracket, Objective, Probe, RootConfig, RootError, candidates::Candidates};

/// Returns the smallest non-negative root found across all passes.
///
/// `f_lower` is the residual at `bracket.lower()`, already evaluated.
///
/// # Errors
///
/// Returns [`RootError::NoRootInBracket`] if no pass records a non-negative
/// root, or [`RootError::Objective`] if an evaluation fails.
pub(super) fn search<O: Objective>(
    probe: &mut Probe<'_, O>,
    bracket: Bracket,
    f_lower: f64,
    config: &RootConfig,
) -> Result<f64, RootError<O::Error>> {
    let mut roots = Candidates::with_capacity(3);

    let first = halve(probe, bracket.lower(), bracket.upper(), f_lower, config)?;
    roots.record(first);

    if let Some(root) = first {
        let below = root - config.retry_offset;
        if below > bracket.lower() {
            roots.record(halve(probe, bracket.lower(), below, f_lower, config)?);
        }

        let above = root + config.retry_offset;
        let f_above = probe.eval(above)?;
        roots.record(halve(
            probe,
            above,
            bracket.upper() + config.retry_offset,
            f_above,
            config,
        )?);
    }

    roots.min_non_negative().ok_or(RootError::NoRootInBracket {
        lower: bracket.lower(),
        upper: bracket.upper(),
    })
}

/// Halves `[lower, upper]` until a midpoint residual is within tolerance.
///
/// The half whose lower end shares the sign of `f_lower` is discarded, so a
/// pass whose ends have the same sign may still walk into a sign change.
fn halve<O: Objective>(
    probe: &mut Probe<'_, O>,
    mut lower: f64,
    mut upper: f64,
    mut f_lower: f64,
    config: &RootConfig,
) -> Result<Option<f64>, RootError<O::Error>> {
    for _ in 0..config.bisection_iters {
        let mid = 0.5 * (lower + upper);
        let f_mid = probe.eval(mid)?;

        if f_mid.abs() < config.residual_tol {
            return Ok(Some(mid));
        }

        if f_mid.signum() == f_lower.signum() {
            lower = mid;
            f_lower = f_mid;
        } else {
            upper = mid;
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_abs_diff_eq;

    use crate::support::root::from_fn;

    #[test]
    fn single_pass_converges_on_monotonic_function() {
        let mut objective = from_fn(|x: f64| Ok::<_, Infallible>(1.35 * x - 40.0));
        let mut probe = Probe::new(&mut objective);
        let config = RootConfig::default();

        let root = halve(&mut probe, 0.0, 100.0, -40.0, &config).unwrap();

        assert_abs_diff_eq!(root.unwrap(), 40.0 / 1.35, epsilon = 1e-3);
    }

    #[test]
    fn same_sign_pass_without_root_records_nothing() {
        let mut objective = from_fn(|x: f64| Ok::<_, Infallible>(x + 1.0));
        let mut probe = Probe::new(&mut objective);

        let root = halve(&mut probe, 0.0, 10.0, 1.0, &RootConfig::default()).unwrap();

        assert_eq!(root, None);
        assert_eq!(probe.evaluations, 25);
    }

    #[test]
    fn too_few_iterations_records_nothing() {
        let mut objective = from_fn(|x: f64| Ok::<_, Infallible>(x - 1.0 / 3.0));
        let mut probe = Probe::new(&mut objective);
        let config = RootConfig {
            bisection_iters: 3,
            ..RootConfig::default()
        };

        let root = halve(&mut probe, 0.0, 10.0, -1.0 / 3.0, &config).unwrap();

        assert_eq!(root, None);
    }

    #[test]
    fn retry_passes_find_a_smaller_root() {
        let mut objective =
            from_fn(|x: f64| Ok::<_, Infallible>((x + 5.0) * (x - 3.0) * (x - 12.0)));
        let mut probe = Probe::new(&mut objective);
        let bracket = Bracket::new(-10.0, 15.0).unwrap();
        let f_lower = probe.eval(-10.0).unwrap();

        let root = search(&mut probe, bracket, f_lower, &RootConfig::default()).unwrap();

        assert_abs_diff_eq!(root, 3.0, epsilon = 1e-4);
    }
}
