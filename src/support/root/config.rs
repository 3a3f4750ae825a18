/// Tolerances and iteration limits for [`find_root`](super::find_root).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootConfig {
    /// A point is recorded as a root once `|f(x)|` falls below this value.
    pub residual_tol: f64,

    /// A secant attempt converges once successive points are closer than
    /// this, and its last point is recorded as a root whatever its residual.
    pub x_tol: f64,

    /// Halving steps per bisection pass.
    pub bisection_iters: usize,

    /// Secant updates per attempt.
    pub secant_iters: usize,

    /// Number of evenly spaced secant starting points.
    pub secant_starts: usize,

    /// Offset from each secant starting point to its second point.
    pub secant_step: f64,

    /// Distance from the first bisection root to the retry sub-brackets.
    ///
    /// This is in the units of `x` (mg/L for chemical doses), so it may need
    /// adjusting for objectives with very different scales.
    pub retry_offset: f64,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            residual_tol: 1e-3,
            x_tol: 1e-5,
            bisection_iters: 25,
            secant_iters: 25,
            secant_starts: 10,
            secant_step: 1e-2,
            retry_offset: 0.1,
        }
    }
}
