/// Roots recorded by the passes or attempts of a single search.
///
/// Each entry is `None` when its pass or attempt did not converge.
pub(super) struct Candidates {
    roots: Vec<Option<f64>>,
}

impl Candidates {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            roots: Vec::with_capacity(capacity),
        }
    }

    pub(super) fn record(&mut self, root: Option<f64>) {
        self.roots.push(root);
    }

    /// Returns the smallest recorded root that is zero or greater.
    pub(super) fn min_non_negative(&self) -> Option<f64> {
        self.roots
            .iter()
            .flatten()
            .copied()
            .filter(|x| *x >= 0.0)
            .min_by(f64::total_cmp)
    }
}
