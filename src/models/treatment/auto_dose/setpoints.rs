use uom::si::f64::{MassConcentration, Ratio};

use crate::support::constraint::{Constrained, UnitInterval};

/// Water quality targets for one [`auto_dose`](super::auto_dose) run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Setpoints {
    /// Minimum pH after raw water adjustment.
    pub raw_ph: f64,

    /// Minimum alkalinity (as CaCO3) after raw water adjustment.
    pub raw_alkalinity: MassConcentration,

    /// Free chlorine residual at the end of the distribution system.
    pub chlorine_residual: MassConcentration,

    /// Finished water pH for corrosion control.
    pub finished_ph: f64,

    /// Fraction of each DBP MCL held back when setting DBP targets.
    pub dbp_safety_factor: Constrained<Ratio, UnitInterval>,
}
