/// A point and its residual.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f64,
    residual: f64,
}

/// Tracks the non-negative points with the smallest and largest residuals.
///
/// Residuals are compared by signed value, so when every residual has the
/// same sign one of the two extremes is also the point closest to zero.
/// Points with negative `x` are never tracked.
pub(super) struct Extrema {
    min: Option<Point>,
    max: Option<Point>,
}

impl Extrema {
    pub(super) fn empty() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Updates the extremes with an evaluated point.
    pub(super) fn observe(&mut self, x: f64, residual: f64) {
        if x < 0.0 || x.is_nan() || residual.is_nan() {
            return;
        }
        let point = Point { x, residual };

        if self.min.is_none_or(|min| residual < min.residual) {
            self.min = Some(point);
        }
        if self.max.is_none_or(|max| residual > max.residual) {
            self.max = Some(point);
        }
    }

    /// Returns whichever extreme has the smaller residual magnitude.
    ///
    /// Ties go to the minimum.
    pub(super) fn closest(&self) -> Option<f64> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if max.residual.abs() < min.residual.abs() => Some(max.x),
            (Some(min), _) => Some(min.x),
            (None, max) => max.map(|max| max.x),
        }
    }
}
