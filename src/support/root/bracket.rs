use thiserror::Error;

/// Initial search interval for a root.
///
/// The bounds are finite and strictly ordered.
/// A bracket does not need to straddle a sign change; that only selects
/// which search strategy runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    lower: f64,
    upper: f64,
}

/// Errors from constructing a [`Bracket`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BracketError {
    #[error("bracket bounds must be finite")]
    NonFinite,

    #[error("lower bound {lower} must be below upper bound {upper}")]
    Unordered { lower: f64, upper: f64 },
}

impl Bracket {
    /// Creates a bracket from its bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`BracketError`] if either bound is not finite or if
    /// `lower >= upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, BracketError> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(BracketError::NonFinite);
        }
        if lower >= upper {
            return Err(BracketError::Unordered { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Creates a bracket without validating the bounds.
    ///
    /// The caller must ensure both bounds are finite and `lower < upper`.
    #[must_use]
    pub const fn new_unchecked(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Returns a copy of this bracket with a different lower bound.
    ///
    /// # Errors
    ///
    /// Returns a [`BracketError`] if the new bounds are invalid.
    pub fn with_lower(self, lower: f64) -> Result<Self, BracketError> {
        Self::new(lower, self.upper)
    }

    #[must_use]
    pub const fn lower(&self) -> f64 {
        self.lower
    }

    #[must_use]
    pub const fn upper(&self) -> f64 {
        self.upper
    }

    /// Width of the bracket.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}
