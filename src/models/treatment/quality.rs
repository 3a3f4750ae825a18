use std::fmt;

use super::{ConfigurationError, Location, UnitProcess};

/// Water quality parameters a process model reports.
///
/// Units are fixed per parameter:
///
/// - `Ph`: standard units
/// - `Alkalinity`: mg/L as CaCO3
/// - `Toc`, `FreeChlorine`: mg/L
/// - `Tthm`, `Haa5`: µg/L
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Parameter {
    Ph,
    Alkalinity,
    Toc,
    FreeChlorine,
    Tthm,
    Haa5,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ph => "pH",
            Self::Alkalinity => "alkalinity",
            Self::Toc => "TOC",
            Self::FreeChlorine => "free chlorine",
            Self::Tthm => "TTHM",
            Self::Haa5 => "HAA5",
        })
    }
}

/// Simulated water quality throughout a plant.
///
/// Implemented by the output type of a plant's process model.
pub trait WaterQuality {
    /// Returns `parameter` at `location`, or `None` if the model does not
    /// report it there.
    fn value(&self, location: Location, parameter: Parameter) -> Option<f64>;

    /// Returns `parameter` at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Unreadable`] if the model does not report it.
    fn read(&self, location: Location, parameter: Parameter) -> Result<f64, ConfigurationError> {
        self.value(location, parameter)
            .ok_or(ConfigurationError::Unreadable {
                location,
                parameter,
            })
    }

    /// Percent TOC removed between the plant influent and `location`.
    ///
    /// # Errors
    ///
    /// Returns an error if either TOC is unreadable or the influent TOC is not
    /// positive.
    fn toc_removal(&self, location: Location) -> Result<f64, ConfigurationError> {
        let influent = self.read(Location::first(UnitProcess::Influent), Parameter::Toc)?;
        if influent <= 0.0 {
            return Err(ConfigurationError::UndefinedTocRemoval { influent });
        }
        let remaining = self.read(location, Parameter::Toc)?;
        Ok((influent - remaining) / influent * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    /// Reports only TOC, at the influent and end of system.
    struct TocOnly {
        influent: f64,
        end_of_system: f64,
    }

    impl WaterQuality for TocOnly {
        fn value(&self, location: Location, parameter: Parameter) -> Option<f64> {
            match (location.process, parameter) {
                (UnitProcess::Influent, Parameter::Toc) => Some(self.influent),
                (UnitProcess::EndOfSystem, Parameter::Toc) => Some(self.end_of_system),
                _ => None,
            }
        }
    }

    #[test]
    fn toc_removal_is_a_percentage_of_influent() {
        let quality = TocOnly {
            influent: 4.0,
            end_of_system: 2.5,
        };

        let removal = quality
            .toc_removal(Location::first(UnitProcess::EndOfSystem))
            .unwrap();

        assert_relative_eq!(removal, 37.5);
    }

    #[test]
    fn zero_influent_toc_is_rejected() {
        let quality = TocOnly {
            influent: 0.0,
            end_of_system: 0.0,
        };

        assert_eq!(
            quality.toc_removal(Location::first(UnitProcess::EndOfSystem)),
            Err(ConfigurationError::UndefinedTocRemoval { influent: 0.0 })
        );
    }

    #[test]
    fn unreported_values_are_configuration_errors() {
        let quality = TocOnly {
            influent: 4.0,
            end_of_system: 2.5,
        };
        let rapid_mix = Location::first(UnitProcess::RapidMix);

        assert_eq!(
            quality.read(rapid_mix, Parameter::Ph),
            Err(ConfigurationError::Unreadable {
                location: rapid_mix,
                parameter: Parameter::Ph,
            })
        );
        assert!(quality.toc_removal(rapid_mix).is_err());
    }
}
