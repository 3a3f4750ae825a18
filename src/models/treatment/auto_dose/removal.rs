use uom::si::{
    f64::{MassConcentration, Ratio},
    mass_concentration::milligram_per_liter,
    ratio::percent,
};

use super::AutoDoseError;

/// Influent TOC (mg/L) below which no removal is required.
const EXEMPT_BELOW: f64 = 2.0;

/// Required percent TOC removal by influent TOC, as `(lower bound, requirement)`.
///
/// Both upper bands apply 45 %.
const BANDS: [(f64, f64); 3] = [(EXEMPT_BELOW, 35.0), (4.0, 45.0), (8.0, 45.0)];

/// Percent TOC removal required for the given influent.
///
/// Returns `Ok(None)` when the influent TOC is low enough to be exempt.
///
/// # Errors
///
/// Returns [`AutoDoseError::UnsupportedRawWater`] if the influent TOC is not
/// exempt and its alkalinity is at or above `alkalinity_limit`.
pub fn removal_requirement(
    influent_toc: f64,
    influent_alkalinity: MassConcentration,
    alkalinity_limit: MassConcentration,
) -> Result<Option<Ratio>, AutoDoseError> {
    if influent_toc < EXEMPT_BELOW {
        return Ok(None);
    }
    if influent_alkalinity >= alkalinity_limit {
        return Err(AutoDoseError::UnsupportedRawWater {
            alkalinity: influent_alkalinity.get::<milligram_per_liter>(),
        });
    }

    let requirement = BANDS
        .iter()
        .rev()
        .find(|(lower, _)| influent_toc >= *lower)
        .map_or(0.0, |&(_, requirement)| requirement);

    Ok(Some(Ratio::new::<percent>(requirement)))
}
