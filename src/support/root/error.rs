use thiserror::Error;

/// Errors that can occur during a root search.
#[derive(Debug, Error)]
pub enum RootError<E> {
    /// Bisection confirmed a sign change but recorded no non-negative root.
    #[error("no non-negative root found in [{lower}, {upper}]")]
    NoRootInBracket { lower: f64, upper: f64 },

    /// The secant search never evaluated a usable non-negative point.
    #[error("no feasible non-negative point found from [{lower}, {upper}]")]
    Infeasible { lower: f64, upper: f64 },

    /// The objective failed to evaluate.
    #[error("objective evaluation failed")]
    Objective(#[source] E),
}
