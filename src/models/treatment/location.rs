use std::fmt;

/// Unit processes along the treatment train, in flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UnitProcess {
    /// Untreated water entering the plant.
    Influent,

    /// Raw water after pH and alkalinity adjustment.
    RawWaterAdjustment,

    /// Rapid mix, where coagulant is added.
    RapidMix,

    Sedimentation,

    Filtration,

    /// Finished water after corrosion control.
    FinishedWater,

    /// Water at the far end of the distribution system.
    EndOfSystem,
}

impl fmt::Display for UnitProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Influent => "influent",
            Self::RawWaterAdjustment => "raw water adjustment",
            Self::RapidMix => "rapid mix",
            Self::Sedimentation => "sedimentation",
            Self::Filtration => "filtration",
            Self::FinishedWater => "finished water",
            Self::EndOfSystem => "end of system",
        })
    }
}

/// A sampling location: one instance of a unit process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub process: UnitProcess,
    pub instance: usize,
}

impl Location {
    #[must_use]
    pub const fn new(process: UnitProcess, instance: usize) -> Self {
        Self { process, instance }
    }

    /// The first instance of `process`.
    #[must_use]
    pub const fn first(process: UnitProcess) -> Self {
        Self::new(process, 0)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.process, self.instance)
    }
}
