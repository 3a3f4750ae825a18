use std::{collections::BTreeMap, fmt};

use super::ConfigurationError;

/// Treatment chemicals whose doses the controller adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Chemical {
    /// Hydrated lime; raises pH and alkalinity.
    Lime,

    /// Carbon dioxide; lowers pH without adding alkalinity.
    CarbonDioxide,

    /// Aluminum sulfate coagulant; removes organic carbon and depresses pH.
    Alum,

    /// Sodium hypochlorite; provides the free chlorine residual.
    Hypochlorite,
}

impl fmt::Display for Chemical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lime => "lime",
            Self::CarbonDioxide => "carbon dioxide",
            Self::Alum => "alum",
            Self::Hypochlorite => "hypochlorite",
        })
    }
}

/// One place where a chemical is added.
///
/// Plants may add the same chemical at several points; `instance` is the
/// zero-based index of the point in flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DosePoint {
    pub chemical: Chemical,
    pub instance: usize,
}

impl DosePoint {
    #[must_use]
    pub const fn new(chemical: Chemical, instance: usize) -> Self {
        Self { chemical, instance }
    }
}

impl fmt::Display for DosePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.chemical, self.instance)
    }
}

/// Chemical doses at every addition point of a plant, in mg/L.
///
/// The set of addition points is fixed when the plant is configured;
/// setting a dose at a point that was never added is a configuration error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Doses {
    points: BTreeMap<Chemical, Vec<f64>>,
}

impl Doses {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` addition points for `chemical`, each starting at zero dose.
    #[must_use]
    pub fn with_points(mut self, chemical: Chemical, count: usize) -> Self {
        self.points
            .entry(chemical)
            .or_default()
            .extend(std::iter::repeat_n(0.0, count));
        self
    }

    /// Number of addition points configured for `chemical`.
    #[must_use]
    pub fn points(&self, chemical: Chemical) -> usize {
        self.points.get(&chemical).map_or(0, Vec::len)
    }

    /// Dose at `point` in mg/L, or `None` if the point does not exist.
    #[must_use]
    pub fn get(&self, point: DosePoint) -> Option<f64> {
        self.points
            .get(&point.chemical)
            .and_then(|doses| doses.get(point.instance))
            .copied()
    }

    /// Sets the dose at `point` in mg/L, leaving every other dose untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownDosePoint`] if the point does not exist.
    pub fn set(&mut self, point: DosePoint, dose: f64) -> Result<(), ConfigurationError> {
        let slot = self
            .points
            .get_mut(&point.chemical)
            .and_then(|doses| doses.get_mut(point.instance))
            .ok_or(ConfigurationError::UnknownDosePoint(point))?;
        *slot = dose;
        Ok(())
    }

    /// Iterates over every addition point and its dose.
    pub fn iter(&self) -> impl Iterator<Item = (DosePoint, f64)> + '_ {
        self.points.iter().flat_map(|(&chemical, doses)| {
            doses
                .iter()
                .enumerate()
                .map(move |(instance, &dose)| (DosePoint::new(chemical, instance), dose))
        })
    }
}
